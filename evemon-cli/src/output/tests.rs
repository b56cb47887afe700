//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{TextFormatter, format_age, format_size};
    use chrono::{Duration, Utc};
    use evemon_core::DocumentType;
    use evemon_fetch::{FetchError, FetchResult, TransportError};
    use evemon_store::{CacheError, EntryInfo};
    use std::path::Path;

    const CACHE_PATH: &str = "/tmp/evemon/sheets/2002_CharacterSheet.xml";

    #[test]
    fn test_format_fresh_result() {
        let formatter = TextFormatter::new(false);
        let result = FetchResult::fresh(DocumentType::CharacterSheet, vec![b'x'; 2048]);

        let output = formatter.format_result(&result, Path::new(CACHE_PATH));

        assert!(output.starts_with("CharacterSheet.xml (fresh)"));
        assert!(output.contains("Status:  200"));
        assert!(output.contains("Payload: 2.0 KB"));
        assert!(output.contains(CACHE_PATH));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_format_cached_result() {
        let formatter = TextFormatter::new(false);
        let result =
            FetchResult::failed(DocumentType::CharacterSheet, 503, FetchError::HttpStatus(503))
                .with_cached_payload(b"old".to_vec());

        let output = formatter.format_result(&result, Path::new(CACHE_PATH));

        assert!(output.starts_with("CharacterSheet.xml (cached)"));
        assert!(output.contains("Status:  503"));
        assert!(output.contains("Error:   HTTP status 503"));
        assert!(output.contains("Payload: 3 B"));
    }

    #[test]
    fn test_format_failed_result() {
        let formatter = TextFormatter::new(false);
        let result = FetchResult::failed(
            DocumentType::SkillQueue,
            0,
            FetchError::Transport(TransportError::Timeout),
        )
        .with_cache_error(CacheError::Miss {
            key: "2002_SkillQueue.xml".to_string(),
        });

        let output = formatter.format_result(&result, Path::new(CACHE_PATH));

        assert!(output.starts_with("SkillQueue.xml (failed)"));
        assert!(output.contains("Status:  -"));
        assert!(output.contains("Payload: none"));
        assert!(output.contains("No cache file for 2002_SkillQueue.xml"));
    }

    #[test]
    fn test_format_result_with_colors() {
        let formatter = TextFormatter::new(true);
        let result = FetchResult::fresh(DocumentType::CharacterSheet, b"<eveapi/>".to_vec());

        let output = formatter.format_result(&result, Path::new(CACHE_PATH));

        assert!(output.contains("\x1b[32mfresh\x1b[0m"));
        assert!(output.contains("\x1b[1mCharacterSheet.xml\x1b[0m"));
    }

    #[test]
    fn test_format_summary() {
        let formatter = TextFormatter::new(false);
        let results = vec![
            FetchResult::fresh(DocumentType::CharacterSheet, b"sheet".to_vec()),
            FetchResult::failed(DocumentType::SkillQueue, 500, FetchError::HttpStatus(500)),
        ];

        let output = formatter.format_summary(&results);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("CharacterSheet.xml"));
        assert!(lines[2].contains("fresh"));
        assert!(lines[3].contains("failed"));
        assert!(lines[3].contains("500"));
    }

    #[test]
    fn test_format_entry_missing() {
        let formatter = TextFormatter::new(false);
        let output =
            formatter.format_entry(DocumentType::CharacterSheet, Path::new(CACHE_PATH), None);

        assert!(output.contains("not cached"));
        assert!(output.contains(CACHE_PATH));
    }

    #[test]
    fn test_format_entry_present() {
        let formatter = TextFormatter::new(false);
        let info = EntryInfo {
            path: CACHE_PATH.into(),
            size: 512,
            modified_at: Some(Utc::now() - Duration::minutes(5)),
        };

        let output = formatter.format_entry(
            DocumentType::CharacterSheet,
            Path::new(CACHE_PATH),
            Some(&info),
        );

        assert!(output.contains("Size:    512 B"));
        assert!(output.contains("5m ago"));
    }

    #[test]
    fn test_format_documents() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_documents();

        assert_eq!(output.lines().count(), DocumentType::all().len() + 1);
        assert!(output.contains("characters"));
        assert!(output.contains("/char/SkillQueue.xml.aspx"));
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1_048_576), "3.0 MB");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::seconds(30)), "just now");
        assert_eq!(format_age(Duration::minutes(42)), "42m ago");
        assert_eq!(format_age(Duration::hours(2)), "2h ago");
        assert_eq!(format_age(Duration::minutes(125)), "2h 5m ago");
        assert_eq!(format_age(Duration::days(3)), "3d ago");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use evemon_core::DocumentType;
    use evemon_fetch::{FetchError, FetchResult};
    use evemon_store::CacheError;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(output, r#"{"a":1}"#);
    }

    #[test]
    fn test_format_result_fields() {
        let formatter = JsonFormatter::new(false);
        let result =
            FetchResult::failed(DocumentType::SkillQueue, 503, FetchError::HttpStatus(503))
                .with_cached_payload(b"<eveapi/>".to_vec());

        let output = formatter
            .format_result(&result, Path::new("/cache/1_SkillQueue.xml"), true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["document"], "SkillQueue.xml");
        assert_eq!(value["outcome"], "cached");
        assert_eq!(value["httpStatus"], 503);
        assert_eq!(value["locallyCached"], true);
        assert_eq!(value["payloadBytes"], 9);
        assert_eq!(value["payload"], "<eveapi/>");
        assert_eq!(value["error"], "HTTP status 503");
        assert_eq!(value["cachePath"], "/cache/1_SkillQueue.xml");
        assert!(value.get("cacheError").is_none());
    }

    #[test]
    fn test_format_results_omits_payload() {
        let formatter = JsonFormatter::new(false);
        let results = vec![(
            FetchResult::failed(DocumentType::CharacterSheet, 500, FetchError::HttpStatus(500))
                .with_cache_error(CacheError::Miss {
                    key: "1_CharacterSheet.xml".to_string(),
                }),
            PathBuf::from("/cache/1_CharacterSheet.xml"),
        )];

        let output = formatter.format_results(&results).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["outcome"], "failed");
        assert!(value[0].get("payload").is_none());
        assert_eq!(value[0]["cacheError"], "No cache file for 1_CharacterSheet.xml");
    }

    #[test]
    fn test_format_entry_missing() {
        let formatter = JsonFormatter::new(false);
        let output = formatter
            .format_entry(DocumentType::CharacterList, Path::new("/cache/1_Characters.xml"), None)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["exists"], false);
        assert!(value.get("size").is_none());
    }

    #[test]
    fn test_format_documents() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_documents().unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value.as_array().unwrap().len(), 4);
        assert_eq!(value[0]["name"], "characters");
        assert_eq!(value[0]["scope"], "account");
        assert_eq!(value[1]["document"], "CharacterSheet.xml");
    }
}
