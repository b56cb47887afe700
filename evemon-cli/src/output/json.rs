//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use evemon_core::{DocumentScope, DocumentType};
use evemon_fetch::{FetchOutcome, FetchResult};
use evemon_store::EntryInfo;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutput {
    pub document: String,
    pub outcome: String,
    pub http_status: u16,
    pub locally_cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload_bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_error: Option<String>,
    pub cache_path: String,
    #[serde(serialize_with = "serialize_datetime")]
    pub fetched_at: DateTime<Utc>,
}

/// JSON output for a cache entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntryOutput {
    pub document: String,
    pub path: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime_opt"
    )]
    pub modified_at: Option<DateTime<Utc>>,
}

/// JSON output for a document type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutput {
    pub name: String,
    pub document: String,
    pub path: String,
    pub scope: String,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

#[allow(clippy::ref_option)]
fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

fn outcome_name(outcome: FetchOutcome) -> &'static str {
    match outcome {
        FetchOutcome::Succeeded => "fresh",
        FetchOutcome::FailedWithFallback => "cached",
        FetchOutcome::FailedNoFallback => "failed",
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats one fetch result. The payload is included as text when
    /// `with_payload` is set.
    pub fn format_result(
        &self,
        result: &FetchResult,
        cache_path: &Path,
        with_payload: bool,
    ) -> Result<String> {
        self.format(&Self::result_to_output(result, cache_path, with_payload))
    }

    /// Formats several fetch results as an array.
    pub fn format_results(&self, results: &[(FetchResult, PathBuf)]) -> Result<String> {
        let outputs: Vec<FetchOutput> = results
            .iter()
            .map(|(result, path)| Self::result_to_output(result, path, false))
            .collect();
        self.format(&outputs)
    }

    /// Formats the state of one cache entry.
    pub fn format_entry(
        &self,
        document: DocumentType,
        path: &Path,
        info: Option<&EntryInfo>,
    ) -> Result<String> {
        self.format(&CacheEntryOutput {
            document: document.doc_name().to_string(),
            path: path.display().to_string(),
            exists: info.is_some(),
            size: info.map(|i| i.size),
            modified_at: info.and_then(|i| i.modified_at),
        })
    }

    /// Formats the list of fetchable documents.
    pub fn format_documents(&self) -> Result<String> {
        let outputs: Vec<DocumentOutput> = DocumentType::all()
            .iter()
            .map(|doc| DocumentOutput {
                name: doc.cli_name().to_string(),
                document: doc.doc_name().to_string(),
                path: doc.path().to_string(),
                scope: match doc.scope() {
                    DocumentScope::Account => "account".to_string(),
                    DocumentScope::Character => "character".to_string(),
                },
            })
            .collect();
        self.format(&outputs)
    }

    fn result_to_output(
        result: &FetchResult,
        cache_path: &Path,
        with_payload: bool,
    ) -> FetchOutput {
        FetchOutput {
            document: result.document.doc_name().to_string(),
            outcome: outcome_name(result.outcome()).to_string(),
            http_status: result.http_status,
            locally_cached: result.locally_cached,
            payload_bytes: result.payload.as_ref().map(Vec::len),
            payload: if with_payload {
                result.payload_text().map(|t| t.into_owned())
            } else {
                None
            },
            error: result.error.as_ref().map(ToString::to_string),
            cache_error: result.cache_error.as_ref().map(ToString::to_string),
            cache_path: cache_path.display().to_string(),
            fetched_at: result.fetched_at,
        }
    }
}
