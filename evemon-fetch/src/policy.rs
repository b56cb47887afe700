//! Cache fallback policy.
//!
//! Runs after every live attempt, whichever entry point issued it:
//!
//! 1. A 200 response is written to the cache, replacing the old entry.
//!    A failed write is recorded on the result; the fresh payload stays.
//! 2. Anything else (non-200 status or transport error) looks up the cache.
//!    On a hit the cached bytes become the payload and the result is marked
//!    `locally_cached`; on a miss the result keeps no payload.
//!
//! The cache is read if and only if the live attempt did not return 200.

use evemon_core::{CacheKey, DocumentType};
use evemon_store::{CacheError, CacheStore};
use tracing::{error, info, warn};

use crate::error::TransportError;
use crate::result::FetchResult;
use crate::transport::HttpResponse;

/// Turns a raw transport outcome into the final [`FetchResult`].
pub fn apply(
    store: &CacheStore,
    key: &CacheKey,
    document: DocumentType,
    response: Result<HttpResponse, TransportError>,
) -> FetchResult {
    let result = FetchResult::from_response(document, response);

    if result.is_success() {
        store_fresh(store, key, result)
    } else {
        fall_back(store, key, result)
    }
}

fn store_fresh(store: &CacheStore, key: &CacheKey, result: FetchResult) -> FetchResult {
    let Some(payload) = result.payload.as_deref() else {
        return result;
    };

    match store.write(key, payload) {
        Ok(path) => {
            info!(
                document = %result.document,
                path = %path.display(),
                size = payload.len(),
                "Caching document"
            );
            result
        }
        Err(e) => {
            error!(document = %result.document, error = %e, "Couldn't cache document");
            result.with_cache_error(e)
        }
    }
}

fn fall_back(store: &CacheStore, key: &CacheKey, result: FetchResult) -> FetchResult {
    if let Some(e) = &result.error {
        warn!(
            document = %result.document,
            status = result.http_status,
            error = %e,
            "Live fetch failed"
        );
    }

    match store.read(key) {
        Ok(Some(entry)) => {
            let age_secs = entry.age().map(|age| age.num_seconds());
            warn!(
                document = %result.document,
                key = %key,
                age_secs = ?age_secs,
                "Using cached document"
            );
            result.with_cached_payload(entry.bytes)
        }
        Ok(None) => {
            let miss = CacheError::Miss {
                key: key.to_string(),
            };
            warn!(document = %result.document, key = %key, "No cache file for document");
            result.with_cache_error(miss)
        }
        Err(e) => {
            warn!(document = %result.document, error = %e, "Cache entry unreadable");
            result.with_cache_error(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::result::FetchOutcome;
    use evemon_core::Credentials;
    use tempfile::TempDir;

    fn setup(doc: DocumentType) -> (TempDir, CacheStore, CacheKey) {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        let creds = Credentials::new("1001", "vcode").with_character("123");
        let key = CacheKey::derive(doc, &creds).unwrap();
        (temp_dir, store, key)
    }

    #[test]
    fn test_success_writes_cache() {
        let (_dir, store, key) = setup(DocumentType::CharacterSheet);

        let result = apply(
            &store,
            &key,
            DocumentType::CharacterSheet,
            Ok(HttpResponse::ok(b"B1".to_vec())),
        );

        assert_eq!(result.outcome(), FetchOutcome::Succeeded);
        assert_eq!(store.read(&key).unwrap().unwrap().bytes, b"B1");
    }

    #[test]
    fn test_success_ignores_existing_entry() {
        let (_dir, store, key) = setup(DocumentType::CharacterSheet);
        store.write(&key, b"OLD").unwrap();

        let result = apply(
            &store,
            &key,
            DocumentType::CharacterSheet,
            Ok(HttpResponse::ok(b"NEW".to_vec())),
        );

        assert_eq!(result.payload.as_deref(), Some(&b"NEW"[..]));
        assert!(!result.locally_cached);
        assert!(result.cache_error.is_none());
        assert_eq!(store.read(&key).unwrap().unwrap().bytes, b"NEW");
    }

    #[test]
    fn test_error_status_falls_back() {
        let (_dir, store, key) = setup(DocumentType::SkillQueue);
        store.write(&key, b"queue\nwith\nlines\n").unwrap();

        let result = apply(
            &store,
            &key,
            DocumentType::SkillQueue,
            Ok(HttpResponse::new(500, b"oops".to_vec())),
        );

        assert_eq!(result.outcome(), FetchOutcome::FailedWithFallback);
        assert_eq!(result.http_status, 500);
        assert_eq!(result.error, Some(FetchError::HttpStatus(500)));
        assert_eq!(result.payload.as_deref(), Some(&b"queue\nwith\nlines\n"[..]));
    }

    #[test]
    fn test_failure_does_not_touch_cache() {
        let (_dir, store, key) = setup(DocumentType::SkillQueue);
        store.write(&key, b"kept").unwrap();

        apply(
            &store,
            &key,
            DocumentType::SkillQueue,
            Err(TransportError::Timeout),
        );

        assert_eq!(store.read(&key).unwrap().unwrap().bytes, b"kept");
    }

    #[test]
    fn test_miss_is_recorded() {
        let (_dir, store, key) = setup(DocumentType::SkillInTraining);

        let result = apply(
            &store,
            &key,
            DocumentType::SkillInTraining,
            Err(TransportError::Timeout),
        );

        assert_eq!(result.outcome(), FetchOutcome::FailedNoFallback);
        assert!(result.cache_error.as_ref().is_some_and(CacheError::is_miss));
        assert!(!store.sheets_dir().exists());
    }
}
