//! Text output formatting with colors.

use chrono::{DateTime, Duration, Utc};
use evemon_core::{DocumentScope, DocumentType};
use evemon_fetch::{FetchOutcome, FetchResult};
use evemon_store::EntryInfo;
use std::path::Path;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the result of one fetch.
    ///
    /// ```text
    /// CharacterSheet.xml (cached)
    /// Status:  503
    /// Error:   HTTP status 503
    /// Payload: 4.2 KB
    /// Cache:   /home/pilot/.config/evemon/sheets/2002_CharacterSheet.xml
    /// ```
    pub fn format_result(&self, result: &FetchResult, cache_path: &Path) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({})",
            self.bold(result.document.doc_name()),
            self.format_outcome(result.outcome())
        ));
        lines.push(format!("Status:  {}", Self::format_status(result.http_status)));

        if let Some(error) = &result.error {
            lines.push(format!("Error:   {}", self.red(&error.to_string())));
        }

        match &result.payload {
            Some(payload) => lines.push(format!("Payload: {}", format_size(payload.len() as u64))),
            None => lines.push(format!("Payload: {}", self.dim("none"))),
        }

        lines.push(format!("Cache:   {}", cache_path.display()));
        if let Some(cache_error) = &result.cache_error {
            lines.push(format!("         {}", self.yellow(&cache_error.to_string())));
        }

        lines.join("\n")
    }

    /// Formats one line per document, for watch mode.
    pub fn format_summary(&self, results: &[FetchResult]) -> String {
        let mut lines = Vec::new();

        lines.push(self.bold("Documents"));
        lines.push("─".repeat(50));

        for result in results {
            let size = result
                .payload
                .as_ref()
                .map_or_else(|| "-".to_string(), |p| format_size(p.len() as u64));
            lines.push(format!(
                "{:<22} {:<10} {:>5} {:>10}",
                result.document.doc_name(),
                self.format_outcome(result.outcome()),
                Self::format_status(result.http_status),
                size
            ));
        }

        lines.join("\n")
    }

    /// Formats the state of one cache entry.
    pub fn format_entry(
        &self,
        document: DocumentType,
        path: &Path,
        info: Option<&EntryInfo>,
    ) -> String {
        let mut lines = vec![
            self.bold(document.doc_name()),
            format!("Path:    {}", path.display()),
        ];

        match info {
            Some(info) => {
                lines.push(format!("Size:    {}", format_size(info.size)));
                if let Some(modified) = info.modified_at {
                    lines.push(format!(
                        "Written: {} ({})",
                        modified.format("%Y-%m-%d %H:%M:%S UTC"),
                        format_age(Utc::now() - modified)
                    ));
                }
            }
            None => lines.push(format!("Size:    {}", self.dim("not cached"))),
        }

        lines.join("\n")
    }

    /// Formats the table of fetchable documents.
    pub fn format_documents(&self) -> String {
        let mut lines = vec![
            self.bold(&format!(
                "{:<12} {:<22} {:<10} {}",
                "NAME", "DOCUMENT", "SCOPE", "PATH"
            )),
        ];

        for doc in DocumentType::all() {
            let scope = match doc.scope() {
                DocumentScope::Account => "account",
                DocumentScope::Character => "character",
            };
            lines.push(format!(
                "{:<12} {:<22} {:<10} {}",
                doc.cli_name(),
                doc.doc_name(),
                scope,
                self.dim(doc.path())
            ));
        }

        lines.join("\n")
    }

    /// Formats the watch mode header.
    pub fn format_watch_header(&self, at: DateTime<Utc>, interval_secs: u64) -> String {
        format!(
            "{} - {} (refresh: {}s)",
            self.bold("EveMon Watch Mode"),
            at.with_timezone(&chrono::Local).format("%H:%M:%S"),
            interval_secs
        )
    }

    fn format_outcome(&self, outcome: FetchOutcome) -> String {
        match outcome {
            FetchOutcome::Succeeded => self.green("fresh"),
            FetchOutcome::FailedWithFallback => self.yellow("cached"),
            FetchOutcome::FailedNoFallback => self.red("failed"),
        }
    }

    fn format_status(status: u16) -> String {
        if status == 0 {
            "-".to_string()
        } else {
            status.to_string()
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }
}

/// Formats a byte count.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1_048_576 {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    } else if bytes >= 1_024 {
        format!("{:.1} KB", bytes as f64 / 1_024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Formats how long ago something happened.
pub fn format_age(age: Duration) -> String {
    if age < Duration::minutes(1) {
        "just now".to_string()
    } else if age < Duration::hours(1) {
        format!("{}m ago", age.num_minutes())
    } else if age < Duration::days(1) {
        let mins = age.num_minutes() % 60;
        if mins > 0 {
            format!("{}h {}m ago", age.num_hours(), mins)
        } else {
            format!("{}h ago", age.num_hours())
        }
    } else {
        format!("{}d ago", age.num_days())
    }
}
