//! Core HTTP client for the Graph API

use compact_str::{format_compact, CompactString};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{
    config::ClientConfig,
    error::{ClientError, Result, UNKNOWN_ERROR},
};
use crate::domain::{
    FeedPage, GraphErrorEnvelope, PageInfo, PostHandle, PostRequest, DEFAULT_FEED_LIMIT,
    PAGE_INFO_FIELDS, POST_FIELDS,
};

/// HTTP client bound to a single Facebook Page
#[derive(Debug, Clone)]
pub struct GraphApi {
    client: Client,
    config: ClientConfig,
}

impl GraphApi {
    /// Create a new Graph API client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request.timeout)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { client, config })
    }

    /// Publish any post request with a single form-encoded POST
    #[instrument(skip(self, request), fields(page_id = %self.config.page_id, edge = request.edge()))]
    pub async fn publish(&self, request: &PostRequest) -> Result<PostHandle> {
        validate_post(request)?;

        let url = self.page_url(request.edge());
        let mut form = request.form_fields();
        form.push(("access_token", self.config.access_token.as_str()));

        let response = self.client.post(url.as_str()).form(&form).send().await?;
        let handle: PostHandle = self.handle_response(response).await?;

        debug!(post_id = %handle.id, "Post published");
        Ok(handle)
    }

    /// Get page metadata
    #[instrument(skip(self), fields(page_id = %self.config.page_id))]
    pub async fn get_page_info(&self) -> Result<PageInfo> {
        let url = self.page_url("");
        self.get_json(&url, &[("fields", PAGE_INFO_FIELDS)]).await
    }

    /// Get the most recent posts of the page feed, [`DEFAULT_FEED_LIMIT`] unless given
    #[instrument(skip(self), fields(page_id = %self.config.page_id))]
    pub async fn get_recent_posts(&self, limit: Option<u32>) -> Result<FeedPage> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT);
        if limit == 0 {
            return Err(ClientError::invalid_input("limit", "must be at least 1"));
        }

        let url = self.page_url("feed");
        let limit = limit.to_string();
        let feed: FeedPage = self
            .get_json(&url, &[("fields", POST_FIELDS), ("limit", limit.as_str())])
            .await?;

        debug!(post_count = feed.data.len(), "Successfully fetched feed");
        Ok(feed)
    }

    /// Perform authenticated GET request and deserialize JSON response
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self.authenticated_get(url).query(query).send().await?;
        self.handle_response(response).await
    }

    // Private helper methods

    /// Create authenticated GET request builder
    fn authenticated_get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .query(&[("access_token", self.config.access_token.as_str())])
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(&self, response: Response) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url_path = response.url().path().to_string();
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            serde_json::from_str(&body).map_err(|e| ClientError::malformed(url_path, e))
        } else {
            warn!(status = status.as_u16(), endpoint = %url_path, "Graph API request failed");
            self.handle_error_response(status.as_u16(), &body)
        }
    }

    /// Handle error responses from the Graph API
    fn handle_error_response<T>(&self, status: u16, body: &str) -> Result<T> {
        let error = serde_json::from_str::<GraphErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_default();

        let message = error
            .message
            .unwrap_or_else(|| UNKNOWN_ERROR.into());

        Err(ClientError::graph_api(status, message, error.code))
    }

    /// Build URL for a page edge; an empty edge addresses the page node itself
    fn page_url(&self, edge: &str) -> CompactString {
        let base = self.config.base_url.trim_end_matches('/');
        if edge.is_empty() {
            format_compact!("{}/{}", base, self.config.page_id)
        } else {
            format_compact!("{}/{}/{}", base, self.config.page_id, edge)
        }
    }
}

fn validate_post(request: &PostRequest) -> Result<()> {
    match request {
        PostRequest::Text { message } if message.is_empty() => {
            Err(ClientError::invalid_input("message", "text posts need a message"))
        },
        PostRequest::Text { .. } => Ok(()),
        PostRequest::Photo { photo_url, .. } => validate_url("photo_url", photo_url),
        PostRequest::Link { link, .. } => validate_url("link", link),
    }
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(ClientError::invalid_input(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => Err(ClientError::invalid_input(field, format!("'{value}' is not a URL: {e}"))),
    }
}
