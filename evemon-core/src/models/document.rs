//! API document types.
//!
//! Every [`DocumentType`] maps to exactly one endpoint path and one document
//! name. The name is used both for logging and for naming cache entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ============================================================================
// Document Scope
// ============================================================================

/// Which identity a document is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentScope {
    /// Keyed on the account (user/key) identifier.
    Account,
    /// Keyed on the character identifier.
    Character,
}

// ============================================================================
// Document Type
// ============================================================================

/// Documents that can be requested from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Characters on an account.
    CharacterList,
    /// Full character sheet.
    CharacterSheet,
    /// Skill currently in training.
    SkillInTraining,
    /// Skill training queue.
    SkillQueue,
}

impl DocumentType {
    /// Returns all document types.
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::CharacterList,
            Self::CharacterSheet,
            Self::SkillInTraining,
            Self::SkillQueue,
        ]
    }

    /// Returns the endpoint path for this document.
    pub fn path(&self) -> &'static str {
        match self {
            Self::CharacterList => "/account/Characters.xml.aspx",
            Self::CharacterSheet => "/char/CharacterSheet.xml.aspx",
            Self::SkillInTraining => "/char/SkillInTraining.xml.aspx",
            Self::SkillQueue => "/char/SkillQueue.xml.aspx",
        }
    }

    /// Returns the document name, e.g. `CharacterSheet.xml`.
    pub fn doc_name(&self) -> &'static str {
        match self {
            Self::CharacterList => "Characters.xml",
            Self::CharacterSheet => "CharacterSheet.xml",
            Self::SkillInTraining => "SkillInTraining.xml",
            Self::SkillQueue => "SkillQueue.xml",
        }
    }

    /// Returns the CLI name for this document (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::CharacterList => "characters",
            Self::CharacterSheet => "charsheet",
            Self::SkillInTraining => "intraining",
            Self::SkillQueue => "skillqueue",
        }
    }

    /// Returns which identity this document is keyed on.
    pub fn scope(&self) -> DocumentScope {
        match self {
            Self::CharacterList => DocumentScope::Account,
            Self::CharacterSheet | Self::SkillInTraining | Self::SkillQueue => {
                DocumentScope::Character
            }
        }
    }

    /// Returns true if the document needs a character ID.
    pub fn is_character_scoped(&self) -> bool {
        self.scope() == DocumentScope::Character
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.doc_name())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    /// Parses either the CLI name (`charsheet`) or the document name
    /// (`CharacterSheet.xml`), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|doc| {
                doc.cli_name().eq_ignore_ascii_case(wanted)
                    || doc.doc_name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| CoreError::InvalidDocumentType(wanted.to_string()))
    }
}
