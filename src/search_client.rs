// ============================================================================
// File: src/search_client.rs
// Tavily web search client
// ============================================================================

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::FinderSettings;
use crate::error::{FinderError, Result};
use crate::models::{SearchRequest, SearchResult};

/// Ranked web retrieval. Implementations must keep provider ordering.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}

pub struct TavilyClient {
    client: Client,
    base_url: String,
    api_key: String,
    search_depth: String,
}

impl TavilyClient {
    pub fn new(api_key: String, settings: &FinderSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| FinderError::Config(format!("failed to build search client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.tavily_url.trim_end_matches('/').to_string(),
            api_key,
            search_depth: settings.search_depth.clone(),
        })
    }
}

#[async_trait]
impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let url = format!("{}/search", self.base_url);
        let request = SearchRequest {
            query: query.to_string(),
            search_depth: self.search_depth.clone(),
            max_results,
            include_answer: false,
            include_raw_content: false,
        };

        debug!(query, max_results, depth = %self.search_depth, "calling search API");

        let http_response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FinderError::Search(format!("{} ({})", e, url)))?;

        // Check HTTP status
        if !http_response.status().is_success() {
            let status = http_response.status();
            let error_text = http_response.text().await.unwrap_or_default();
            return Err(FinderError::Search(format!(
                "HTTP {} from {}: {}",
                status,
                url,
                error_text.chars().take(500).collect::<String>()
            )));
        }

        let response_text = http_response
            .text()
            .await
            .map_err(|e| FinderError::Search(format!("failed to read response body: {}", e)))?;

        let body: Value = match serde_json::from_str(&response_text) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "search response is not JSON, treating as no results");
                return Ok(Vec::new());
            }
        };

        let results = parse_results(&body);
        debug!(count = results.len(), "search returned results");
        Ok(results)
    }
}

/// Pull `results` out of a provider response. Any unexpected shape yields no
/// results instead of an error.
pub fn parse_results(body: &Value) -> Vec<SearchResult> {
    let Some(items) = body.get("results").and_then(Value::as_array) else {
        warn!("search response has no results array, treating as no results");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|item| SearchResult {
            title: item.get("title").and_then(Value::as_str).map(str::to_string),
            url: item.get("url").and_then(Value::as_str).map(str::to_string),
            content: item
                .get("content")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;
    use serde_json::json;

    fn client_for(base_url: String) -> TavilyClient {
        let settings = FinderSettings {
            tavily_url: base_url,
            ..FinderSettings::default()
        };
        TavilyClient::new("tvly-test".to_string(), &settings).unwrap()
    }

    #[test]
    fn keeps_provider_order_and_duplicates() {
        let body = json!({
            "query": "tata dealer pune",
            "results": [
                {"title": "B Motors", "url": "https://b.example", "content": "second", "score": 0.4},
                {"title": "A Motors", "url": "https://a.example", "content": "first", "score": 0.9},
                {"title": "B Motors", "url": "https://b.example", "content": "second", "score": 0.4}
            ]
        });
        let results = parse_results(&body);
        let titles: Vec<_> = results.iter().map(|r| r.title.as_deref().unwrap()).collect();
        assert_eq!(titles, ["B Motors", "A Motors", "B Motors"]);
    }

    #[test]
    fn missing_fields_are_tolerated() {
        let body = json!({
            "results": [
                {"url": "https://a.example"},
                {"title": 42, "url": null, "content": "text"},
                "not an object"
            ]
        });
        let results = parse_results(&body);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, None);
        assert_eq!(results[0].content, "");
        assert_eq!(results[1].title, None);
        assert_eq!(results[1].url, None);
        assert_eq!(results[1].content, "text");
    }

    #[test]
    fn unexpected_shapes_mean_no_results() {
        assert!(parse_results(&json!([1, 2, 3])).is_empty());
        assert!(parse_results(&json!({"answer": "none"})).is_empty());
        assert!(parse_results(&json!({"results": "oops"})).is_empty());
        assert!(parse_results(&json!({"results": []})).is_empty());
    }

    #[test]
    fn request_body_has_fixed_flags() {
        let request = SearchRequest {
            query: "Tata Motors dealer showroom Baner".to_string(),
            search_depth: "advanced".to_string(),
            max_results: 6,
            include_answer: false,
            include_raw_content: false,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "Tata Motors dealer showroom Baner",
                "search_depth": "advanced",
                "max_results": 6,
                "include_answer": false,
                "include_raw_content": false
            })
        );
    }

    #[tokio::test]
    async fn posts_fixed_request_and_parses_results() {
        let (url, request) = serve_once(
            "200 OK",
            r#"{"results": [{"title": "A", "url": "https://a.in", "content": "Baner"}]}"#,
        )
        .await;

        let results = client_for(url).search("Tata Baner", 4).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Baner");

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /search "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer tvly-test"));
        assert!(request.contains(r#""query":"Tata Baner""#));
        assert!(request.contains(r#""search_depth":"advanced""#));
        assert!(request.contains(r#""max_results":4"#));
        assert!(request.contains(r#""include_answer":false"#));
        assert!(request.contains(r#""include_raw_content":false"#));
    }

    #[tokio::test]
    async fn non_json_success_body_means_no_results() {
        let (url, _request) = serve_once("200 OK", "<html>maintenance</html>").await;
        let results = client_for(url).search("Tata Baner", 6).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn error_status_is_a_search_error() {
        let (url, _request) = serve_once("401 Unauthorized", "bad key").await;
        let err = client_for(url).search("Tata Baner", 6).await.unwrap_err();

        assert!(matches!(err, FinderError::Search(_)));
        let message = err.to_string();
        assert!(message.contains("401"), "{}", message);
        assert!(message.contains("bad key"), "{}", message);
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_search_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{}", addr))
            .search("Tata Baner", 6)
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Search(_)));
    }
}
