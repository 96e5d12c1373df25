//! External book-metadata lookup with a two-level TTL cache
//!
//! Lookup order: process-local map (fixed 1 h TTL), then the durable
//! ExternalBookInfo collection (configurable TTL), then an HTTP GET to
//! the configured template URL. Every network call, successful or not,
//! appends one entry to the audit log.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    config::ExternalApiConfig,
    error::{AppError, AppResult},
    models::{ExternalApiLog, ExternalBookInfo},
    repository::Repository,
};

const MEMORY_CACHE_TTL: Duration = Duration::from_secs(3600);
const API_NAME: &str = "OpenLibrary";

#[derive(Clone)]
pub struct ExternalApiService {
    repository: Repository,
    client: reqwest::Client,
    config: ExternalApiConfig,
    cache: Arc<RwLock<HashMap<String, (ExternalBookInfo, Instant)>>>,
}

impl ExternalApiService {
    pub fn new(repository: Repository, config: ExternalApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            repository,
            client,
            config,
            cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Book metadata for an ISBN. `Ok(None)` means the upstream had no
    /// data; transport failures surface as `AppError::Upstream`.
    pub async fn get_book_info(&self, isbn: &str) -> AppResult<Option<ExternalBookInfo>> {
        let key = isbn.to_lowercase();

        if let Some(info) = self.memory_cached(&key).await {
            tracing::info!("Book info retrieved from cache for ISBN {}", isbn);
            return Ok(Some(info));
        }

        let ttl = Duration::from_secs(self.config.cache_ttl_seconds);
        if let Some(stored) = self.repository.book_info.find_fresh(isbn, ttl).await {
            self.cache
                .write()
                .await
                .insert(key, (stored.clone(), Instant::now()));
            tracing::info!("Book info retrieved from storage for ISBN {}", isbn);
            return Ok(Some(stored));
        }

        self.fetch_from_upstream(isbn, &key).await
    }

    /// Audit log, newest first
    pub async fn get_logs(&self, page: i64, page_size: i64) -> Vec<ExternalApiLog> {
        let logs = self.repository.api_logs.list(page, page_size).await;
        tracing::info!("Retrieved {} API logs", logs.len());
        logs
    }

    async fn memory_cached(&self, key: &str) -> Option<ExternalBookInfo> {
        let cache = self.cache.read().await;
        cache
            .get(key)
            .filter(|(_, cached_at)| cached_at.elapsed() < MEMORY_CACHE_TTL)
            .map(|(info, _)| info.clone())
    }

    async fn fetch_from_upstream(
        &self,
        isbn: &str,
        key: &str,
    ) -> AppResult<Option<ExternalBookInfo>> {
        if self.config.book_info_url.is_empty() {
            return Err(AppError::Internal(
                "External API URL not configured".to_string(),
            ));
        }
        let url = self.config.book_info_url.replace("{isbn}", isbn);

        let started = Instant::now();
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                self.repository
                    .api_logs
                    .append(ExternalApiLog {
                        id: 0,
                        api_name: API_NAME.to_string(),
                        endpoint: url.clone(),
                        request_data: format!("ISBN: {}", isbn),
                        response_data: String::new(),
                        status_code: 0,
                        is_success: false,
                        error_message: Some(e.to_string()),
                        response_time_ms: started.elapsed().as_millis() as i64,
                        created_at: Utc::now(),
                    })
                    .await;
                tracing::error!("HTTP error retrieving book info for ISBN {}: {}", isbn, e);
                return Err(AppError::Upstream(e.to_string()));
            }
        };
        let response_time_ms = started.elapsed().as_millis() as i64;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let mut log = ExternalApiLog {
            id: 0,
            api_name: API_NAME.to_string(),
            endpoint: url,
            request_data: format!("ISBN: {}", isbn),
            response_data: String::new(),
            status_code: status.as_u16() as i32,
            is_success: status.is_success(),
            error_message: None,
            response_time_ms,
            created_at: Utc::now(),
        };

        if !status.is_success() {
            log.error_message = Some(format!("HTTP {}", status.as_u16()));
            log.response_data = body;
            self.repository.api_logs.append(log).await;
            tracing::warn!("External API call failed for ISBN {}: {}", isbn, status);
            return Ok(None);
        }

        let info = self
            .repository
            .book_info
            .insert(parse_book_info(isbn, &body))
            .await?;

        self.cache
            .write()
            .await
            .insert(key.to_string(), (info.clone(), Instant::now()));

        log.response_data = serde_json::to_string(&info).unwrap_or_default();
        self.repository.api_logs.append(log).await;

        tracing::info!("Book info retrieved from external API for ISBN {}", isbn);
        Ok(Some(info))
    }
}

/// Extract metadata fields from an upstream payload. Absent or
/// malformed fields degrade to empty strings or 0; the parse itself
/// never fails.
fn parse_book_info(isbn: &str, body: &str) -> ExternalBookInfo {
    let root: serde_json::Value = serde_json::from_str(body).unwrap_or(serde_json::Value::Null);

    let title = root["title"].as_str().unwrap_or_default().to_string();
    let author = root["authors"][0]["name"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let publisher = root["publishers"][0]
        .as_str()
        .unwrap_or_default()
        .to_string();
    // A 4-digit year parsed from the tail of the publish date, e.g.
    // "Jan 01, 1984" or "1984"
    let published_year = root["publish_date"]
        .as_str()
        .and_then(|date| date.get(date.len().saturating_sub(4)..))
        .and_then(|tail| tail.parse::<i32>().ok())
        .unwrap_or(0);
    // Description is either a plain string or a {type, value} object
    let description = root["description"]
        .as_str()
        .or_else(|| root["description"]["value"].as_str())
        .map(str::to_string);

    ExternalBookInfo {
        id: 0,
        isbn: isbn.to_string(),
        title,
        author,
        publisher,
        published_year,
        description,
        api_source: API_NAME.to_string(),
        raw_data: body.to_string(),
        cached_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::store::JsonStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixture {
        _dir: tempfile::TempDir,
        repository: Repository,
        service: ExternalApiService,
    }

    fn fixture(base_url: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonStore::new(dir.path()).unwrap());
        let repository = Repository::new(store);
        let config = ExternalApiConfig {
            book_info_url: format!("{}/isbn/{{isbn}}.json", base_url),
            cache_ttl_seconds: 3600,
            timeout_seconds: 2,
        };
        let service = ExternalApiService::new(repository.clone(), config).unwrap();
        Fixture {
            _dir: dir,
            repository,
            service,
        }
    }

    fn upstream_payload() -> serde_json::Value {
        json!({
            "title": "Neuromancer",
            "authors": [{"name": "William Gibson"}],
            "publishers": ["Ace"],
            "publish_date": "Jul 01, 1984",
            "description": {"type": "/type/text", "value": "Cyberpunk."}
        })
    }

    #[tokio::test]
    async fn repeated_lookup_within_ttl_hits_upstream_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/isbn/111.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let fx = fixture(&server.uri());
        let first = fx.service.get_book_info("111").await.unwrap().unwrap();
        let second = fx.service.get_book_info("111").await.unwrap().unwrap();

        assert_eq!(first.title, "Neuromancer");
        assert_eq!(first.author, "William Gibson");
        assert_eq!(first.publisher, "Ace");
        assert_eq!(first.published_year, 1984);
        assert_eq!(first.description.as_deref(), Some("Cyberpunk."));
        assert_eq!(second.id, first.id);

        // Exactly one audit entry for the single network call
        assert_eq!(fx.repository.api_logs.count().await, 1);
    }

    #[tokio::test]
    async fn fresh_stored_entry_serves_a_new_instance_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/isbn/111.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let fx = fixture(&server.uri());
        fx.service.get_book_info("111").await.unwrap().unwrap();

        // A second instance starts with an empty process-local cache and
        // must fall back to the durable collection instead of refetching
        let config = ExternalApiConfig {
            book_info_url: format!("{}/isbn/{{isbn}}.json", server.uri()),
            cache_ttl_seconds: 3600,
            timeout_seconds: 2,
        };
        let second = ExternalApiService::new(fx.repository.clone(), config).unwrap();

        let info = second.get_book_info("111").await.unwrap().unwrap();
        assert_eq!(info.title, "Neuromancer");

        // The durable hit repopulated the process-local cache
        assert!(second.memory_cached("111").await.is_some());

        // Still a single network call, so a single audit entry
        assert_eq!(fx.repository.api_logs.count().await, 1);
    }

    #[tokio::test]
    async fn upstream_miss_is_none_and_still_audited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .expect(1)
            .mount(&server)
            .await;

        let fx = fixture(&server.uri());
        let result = fx.service.get_book_info("000").await.unwrap();
        assert!(result.is_none());

        let logs = fx.service.get_logs(1, 10).await;
        assert_eq!(logs.len(), 1);
        assert!(!logs[0].is_success);
        assert_eq!(logs[0].status_code, 404);
        assert_eq!(logs[0].error_message.as_deref(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn transport_failure_is_upstream_error_and_audited() {
        // Nothing listens here; the connection is refused
        let fx = fixture("http://127.0.0.1:9");

        let err = fx.service.get_book_info("111").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));

        let logs = fx.service.get_logs(1, 10).await;
        assert_eq!(logs.len(), 1);
        assert!(!logs[0].is_success);
        assert_eq!(logs[0].status_code, 0);
        assert!(logs[0].error_message.is_some());
    }

    #[tokio::test]
    async fn malformed_payload_degrades_to_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri());
        let info = fx.service.get_book_info("222").await.unwrap().unwrap();
        assert_eq!(info.title, "");
        assert_eq!(info.author, "");
        assert_eq!(info.published_year, 0);
        assert_eq!(info.raw_data, "not json at all");
    }

    #[tokio::test]
    async fn logs_are_listed_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
            .mount(&server)
            .await;

        let fx = fixture(&server.uri());
        fx.service.get_book_info("111").await.unwrap();
        fx.service.get_book_info("222").await.unwrap();

        let logs = fx.service.get_logs(1, 10).await;
        assert_eq!(logs.len(), 2);
        assert!(logs[0].created_at >= logs[1].created_at);
        assert!(logs[0].endpoint.contains("222"));
    }

    #[test]
    fn parse_handles_plain_string_description_and_year_only_date() {
        let body = json!({
            "title": "T",
            "publish_date": "1999",
            "description": "plain"
        })
        .to_string();
        let info = parse_book_info("x", &body);
        assert_eq!(info.published_year, 1999);
        assert_eq!(info.description.as_deref(), Some("plain"));
        assert_eq!(info.author, "");
        assert_eq!(info.publisher, "");
    }
}
