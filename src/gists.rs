use std::sync::Arc;

use crate::cache::LruCache;
use crate::error::FetchError;
use crate::models::{FetchRequest, GistSummary, RawGist};
use crate::simplify::simplify;
use crate::upstream::{GistSource, RawResult};

pub type FetchOutcome = Result<Arc<Vec<GistSummary>>, FetchError>;

/// Fetch-and-cache path for a user's gists.
///
/// Owns the one cache instance of the process. Every outcome is cached, failures
/// included, and replayed until evicted or cleared.
pub struct GistService {
    source: Arc<dyn GistSource>,
    cache: LruCache<FetchRequest, FetchOutcome>,
}

impl GistService {
    pub fn new(source: Arc<dyn GistSource>, cache_capacity: usize) -> Self {
        Self {
            source,
            cache: LruCache::new(cache_capacity),
        }
    }

    pub async fn fetch_user_gists(&self, username: &str, per_page: u32, page: u64) -> FetchOutcome {
        let key = FetchRequest {
            username: username.to_string(),
            per_page,
            page,
        };

        self.cache
            .get_or_compute(key, || async move {
                let raw = self.source.fetch_raw(username, per_page, page).await;
                let outcome = classify(username, raw);
                if let Err(e) = &outcome {
                    tracing::warn!(username, page, per_page, error = %e, "gist fetch failed");
                }
                outcome
            })
            .await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cached_entries(&self) -> usize {
        self.cache.len().await
    }
}

// Turn a raw upstream answer into a typed outcome
pub fn classify(username: &str, raw: RawResult) -> FetchOutcome {
    match raw {
        RawResult::Ok { status: 200, body } => {
            let records: Vec<RawGist> = serde_json::from_value(body)
                .map_err(|e| FetchError::Internal(e.to_string()))?;
            Ok(Arc::new(simplify(&records)))
        }
        RawResult::Ok { status: 404, .. } => Err(FetchError::NotFound(username.to_string())),
        RawResult::Ok { status: 403, .. } => Err(FetchError::RateLimited),
        RawResult::Ok { status, .. } => Err(FetchError::Upstream(status)),
        RawResult::TimedOut => Err(FetchError::Timeout),
        RawResult::TransportError(message) => Err(FetchError::Transport(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::upstream::MockGistSource;
    use serde_json::{Value, json};

    fn ok(body: Value) -> RawResult {
        RawResult::Ok { status: 200, body }
    }

    fn status(status: u16) -> RawResult {
        RawResult::Ok {
            status,
            body: Value::Null,
        }
    }

    fn service_returning(raw: RawResult, times: usize) -> GistService {
        let mut source = MockGistSource::new();
        source
            .expect_fetch_raw()
            .times(times)
            .returning(move |_, _, _| raw.clone());
        GistService::new(Arc::new(source), 128)
    }

    #[test]
    fn classify_maps_statuses() {
        assert_eq!(
            classify("ghost", status(404)),
            Err(FetchError::NotFound("ghost".into()))
        );
        assert_eq!(classify("x", status(403)), Err(FetchError::RateLimited));
        assert_eq!(classify("x", status(500)), Err(FetchError::Upstream(500)));
        assert_eq!(classify("x", status(301)), Err(FetchError::Upstream(301)));
        assert_eq!(classify("x", RawResult::TimedOut), Err(FetchError::Timeout));
        assert_eq!(
            classify("x", RawResult::TransportError("refused".into())),
            Err(FetchError::Transport("refused".into()))
        );
    }

    #[test]
    fn classify_rejects_non_list_body() {
        let err = classify("x", ok(json!({ "message": "weird" }))).unwrap_err();
        assert_eq!(err.kind(), FailureKind::InternalError);
        assert!(err.to_string().starts_with("Internal server error: "));
    }

    #[test]
    fn one_odd_record_does_not_fail_the_page() {
        let gists = classify(
            "x",
            ok(json!([
                { "id": "a", "public": "yes" },
                { "id": 42, "files": { "b.txt": {} } }
            ])),
        )
        .unwrap();

        assert_eq!(gists.len(), 2);
        assert_eq!(gists[0].id.as_deref(), Some("a"));
        assert!(gists[0].public);
        assert_eq!(gists[1].id, None);
        assert_eq!(gists[1].files, vec!["b.txt"]);
    }

    #[test]
    fn classify_empty_list_is_success() {
        assert!(classify("x", ok(json!([]))).unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_identical_call_hits_cache() {
        let service = service_returning(ok(json!([{ "id": "a" }, { "id": "b" }])), 1);

        let first = service.fetch_user_gists("octocat", 30, 1).await.unwrap();
        let second = service.fetch_user_gists("octocat", 30, 1).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].id.as_deref(), Some("a"));
        assert_eq!(first[1].id.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn each_parameter_is_part_of_the_key() {
        let service = service_returning(ok(json!([])), 4);

        service.fetch_user_gists("octocat", 30, 1).await.unwrap();
        service.fetch_user_gists("octocat", 30, 2).await.unwrap();
        service.fetch_user_gists("octocat", 10, 1).await.unwrap();
        service.fetch_user_gists("hubot", 30, 1).await.unwrap();

        assert_eq!(service.cached_entries().await, 4);
    }

    #[tokio::test]
    async fn failures_are_replayed_from_cache() {
        let service = service_returning(RawResult::TimedOut, 1);

        assert_eq!(
            service.fetch_user_gists("octocat", 30, 1).await,
            Err(FetchError::Timeout)
        );
        assert_eq!(
            service.fetch_user_gists("octocat", 30, 1).await,
            Err(FetchError::Timeout)
        );
    }

    #[tokio::test]
    async fn clear_cache_calls_upstream_again() {
        let service = service_returning(status(404), 2);

        service.fetch_user_gists("ghost", 30, 1).await.unwrap_err();
        service.clear_cache().await;
        assert_eq!(service.cached_entries().await, 0);
        service.fetch_user_gists("ghost", 30, 1).await.unwrap_err();
    }

    #[tokio::test]
    async fn passes_parameters_through() {
        let mut source = MockGistSource::new();
        source
            .expect_fetch_raw()
            .withf(|username, per_page, page| {
                username.to_string() == "octocat" && *per_page == 5 && *page == 3
            })
            .times(1)
            .returning(|_, _, _| RawResult::Ok {
                status: 200,
                body: json!([]),
            });
        let service = GistService::new(Arc::new(source), 8);

        assert!(service.fetch_user_gists("octocat", 5, 3).await.unwrap().is_empty());
    }
}
