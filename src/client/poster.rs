//! Page publishing capability
//!
//! Callers depend on [`PagePoster`] rather than on the HTTP client, so the
//! same flow can run against the Graph API or against [`DryRunPoster`].

use std::sync::Mutex;

use async_trait::async_trait;
use compact_str::{format_compact, CompactString};
use tracing::info;

use super::{api::GraphApi, error::Result};
use crate::domain::{FeedPage, PageInfo, PostHandle, PostRequest};

/// Operations available on a single Facebook Page
#[async_trait]
pub trait PagePoster: Send + Sync {
    /// Publish a post and return the identifier assigned to it
    async fn publish(&self, request: &PostRequest) -> Result<PostHandle>;

    /// Fetch page metadata
    async fn page_info(&self) -> Result<PageInfo>;

    /// Fetch up to `limit` of the newest posts
    async fn recent_posts(&self, limit: Option<u32>) -> Result<FeedPage>;

    /// Human readable name of the backend, used in logs
    fn backend(&self) -> &'static str;

    async fn post_text(&self, message: &str) -> Result<PostHandle> {
        self.publish(&PostRequest::text(message)).await
    }

    async fn post_photo(&self, message: &str, photo_url: &str) -> Result<PostHandle> {
        self.publish(&PostRequest::photo(message, photo_url)).await
    }

    async fn post_link(&self, message: &str, link: &str) -> Result<PostHandle> {
        self.publish(&PostRequest::link(message, link)).await
    }
}

#[async_trait]
impl PagePoster for GraphApi {
    async fn publish(&self, request: &PostRequest) -> Result<PostHandle> {
        GraphApi::publish(self, request).await
    }

    async fn page_info(&self) -> Result<PageInfo> {
        self.get_page_info().await
    }

    async fn recent_posts(&self, limit: Option<u32>) -> Result<FeedPage> {
        self.get_recent_posts(limit).await
    }

    fn backend(&self) -> &'static str {
        "graph-api"
    }
}

/// Poster that never touches the network
///
/// Every published request is recorded and answered with a placeholder id.
#[derive(Debug)]
pub struct DryRunPoster {
    page_id: CompactString,
    published: Mutex<Vec<PostRequest>>,
}

impl DryRunPoster {
    pub fn new(page_id: impl Into<CompactString>) -> Self {
        Self {
            page_id: page_id.into(),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first
    #[cfg(test)]
    pub fn published(&self) -> Vec<PostRequest> {
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl PagePoster for DryRunPoster {
    async fn publish(&self, request: &PostRequest) -> Result<PostHandle> {
        let mut published = self
            .published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        published.push(request.clone());

        let id = format_compact!("dry-run-{}", published.len());
        info!(
            post_id = %id,
            edge = request.edge(),
            chars = request.message().chars().count(),
            "Dry run: post not sent"
        );

        Ok(PostHandle { id, post_id: None })
    }

    async fn page_info(&self) -> Result<PageInfo> {
        Ok(PageInfo {
            id: self.page_id.clone(),
            name: "(dry run)".into(),
            ..Default::default()
        })
    }

    async fn recent_posts(&self, _limit: Option<u32>) -> Result<FeedPage> {
        Ok(FeedPage::default())
    }

    fn backend(&self) -> &'static str {
        "dry-run"
    }
}
