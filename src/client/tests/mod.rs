//! Test utilities and common test fixtures for client modules

use serde_json::json;


pub const TEST_TOKEN: &str = "test-token";
pub const TEST_PAGE_ID: &str = "1234567890";

/// JSON returned by `GET /{page}`
pub fn page_info_json() -> serde_json::Value {
    json!({
        "id": TEST_PAGE_ID,
        "name": "Test Page",
        "username": "testpage",
        "fan_count": 12345,
        "followers_count": 23456
    })
}

/// JSON returned when a post is created
pub fn post_created_json(id: &str) -> serde_json::Value {
    json!({ "id": id })
}

/// JSON returned by `GET /{page}/feed`
pub fn feed_json(messages: &[&str]) -> serde_json::Value {
    let data: Vec<_> = messages
        .iter()
        .enumerate()
        .map(|(i, message)| {
            json!({
                "id": format!("{TEST_PAGE_ID}_{}", i + 1),
                "message": message,
                "created_time": format!("2024-05-0{}T10:00:00+0000", i + 1),
                "permalink_url": format!("https://www.facebook.com/{TEST_PAGE_ID}/posts/{}", i + 1)
            })
        })
        .collect();

    json!({
        "data": data,
        "paging": { "cursors": { "before": "b", "after": "a" } }
    })
}

/// Graph API error envelope
pub fn graph_error_json(message: &str, code: i64) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": "OAuthException",
            "code": code,
            "fbtrace_id": "AbCdEf123"
        }
    })
}

/// Mock HTTP server for testing
pub struct MockServer {
    pub server: wiremock::MockServer,
}

impl MockServer {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = wiremock::MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server, standing in for the versioned Graph root
    pub fn base_url(&self) -> String {
        format!("{}/v18.0", self.server.uri())
    }

    /// Create a test config pointing to this mock server
    pub fn test_config(&self) -> crate::client::config::ClientConfig {
        crate::client::config::ClientConfig::new(TEST_TOKEN, TEST_PAGE_ID)
            .with_base_url(self.base_url())
    }

    /// Method and path of every request received so far, in order
    pub async fn received(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| (request.method.as_str().to_string(), request.url.path().to_string()))
            .collect()
    }
}

#[allow(clippy::module_inception)]
mod tests {
    use super::*;
    use crate::domain::{FeedPage, PageInfo};

    #[test]
    fn test_fixtures_deserialize() {
        let info: PageInfo = serde_json::from_value(page_info_json()).unwrap();
        assert_eq!(info.id, TEST_PAGE_ID);
        assert_eq!(info.fan_count, Some(12345));

        let feed: FeedPage = serde_json::from_value(feed_json(&["a", "b"])).unwrap();
        assert_eq!(feed.data.len(), 2);
        assert_eq!(feed.data[1].created_time.as_deref(), Some("2024-05-02T10:00:00+0000"));
    }

    #[test]
    fn test_error_fixture() {
        let error = graph_error_json("Invalid OAuth access token.", 190);
        assert_eq!(error["error"]["message"], "Invalid OAuth access token.");
        assert_eq!(error["error"]["code"], 190);
    }
}
