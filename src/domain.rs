// Graph API Pages reference: https://developers.facebook.com/docs/pages-api
use compact_str::CompactString;
use serde::Deserialize;

/// Fields requested from the page node
pub const PAGE_INFO_FIELDS: &str = "id,name,username,fan_count,followers_count";

/// Feed page size used when the caller does not pick one
pub const DEFAULT_FEED_LIMIT: u32 = 10;

/// Fields requested for each post in the feed
pub const POST_FIELDS: &str = "id,message,created_time,permalink_url";

/// Content to publish on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRequest {
    Text {
        message: CompactString,
    },
    Photo {
        message: CompactString,
        photo_url: CompactString,
    },
    Link {
        message: CompactString,
        link: CompactString,
    },
}

impl PostRequest {
    pub fn text(message: impl Into<CompactString>) -> Self {
        Self::Text { message: message.into() }
    }

    pub fn photo(message: impl Into<CompactString>, photo_url: impl Into<CompactString>) -> Self {
        Self::Photo { message: message.into(), photo_url: photo_url.into() }
    }

    pub fn link(message: impl Into<CompactString>, link: impl Into<CompactString>) -> Self {
        Self::Link { message: message.into(), link: link.into() }
    }

    pub fn message(&self) -> &str {
        match self {
            PostRequest::Text { message }
            | PostRequest::Photo { message, .. }
            | PostRequest::Link { message, .. } => message,
        }
    }

    /// Page edge the request is posted to
    pub fn edge(&self) -> &'static str {
        match self {
            PostRequest::Photo { .. } => "photos",
            PostRequest::Text { .. } | PostRequest::Link { .. } => "feed",
        }
    }

    /// Form fields for the request body, without the access token
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            PostRequest::Text { message } => vec![("message", message.as_str())],
            PostRequest::Photo { message, photo_url } => {
                vec![("message", message.as_str()), ("url", photo_url.as_str())]
            },
            PostRequest::Link { message, link } => {
                vec![("message", message.as_str()), ("link", link.as_str())]
            },
        }
    }
}

/// Page metadata returned by `GET /{page}`
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub id: CompactString,
    pub name: CompactString,
    #[serde(default)]
    pub username: Option<CompactString>,
    #[serde(default)]
    pub fan_count: Option<u64>,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

/// Identifier of a freshly created post or photo
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PostHandle {
    pub id: CompactString,
    /// Feed story id; only the `photos` edge returns it
    #[serde(default)]
    pub post_id: Option<CompactString>,
}

/// One post in the page feed
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PostSummary {
    pub id: CompactString,
    #[serde(default)]
    pub message: Option<CompactString>,
    // Graph timestamps use a `+0000` offset and pass through unparsed.
    #[serde(default)]
    pub created_time: Option<CompactString>,
    #[serde(default)]
    pub permalink_url: Option<CompactString>,
}

/// A page of the feed edge
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct FeedPage {
    pub data: Vec<PostSummary>,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    #[serde(default)]
    pub error: Option<GraphErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GraphErrorBody {
    #[serde(default)]
    pub message: Option<CompactString>,
    #[serde(default)]
    pub code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_post_request_routing() {
        assert_eq!(PostRequest::text("hi").edge(), "feed");
        assert_eq!(PostRequest::link("hi", "https://example.com").edge(), "feed");
        assert_eq!(PostRequest::photo("hi", "https://example.com/a.jpg").edge(), "photos");
    }

    #[test]
    fn test_form_fields() {
        let photo = PostRequest::photo("caption", "https://example.com/a.jpg");
        assert_eq!(
            photo.form_fields(),
            vec![("message", "caption"), ("url", "https://example.com/a.jpg")]
        );

        let link = PostRequest::link("read this", "https://example.com");
        assert_eq!(
            link.form_fields(),
            vec![("message", "read this"), ("link", "https://example.com")]
        );
        assert_eq!(link.message(), "read this");
    }

    #[test]
    fn test_page_info_optional_counts() {
        let info: PageInfo = serde_json::from_value(json!({
            "id": "42",
            "name": "Test Page"
        }))
        .unwrap();

        assert_eq!(info.name, "Test Page");
        assert_eq!(info.fan_count, None);
        assert_eq!(info.followers_count, None);
    }

    #[test]
    fn test_page_info_requires_name() {
        let result = serde_json::from_value::<PageInfo>(json!({ "id": "42" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_feed_page_ignores_paging() {
        let feed: FeedPage = serde_json::from_value(json!({
            "data": [
                { "id": "42_1", "message": "hello", "created_time": "2024-05-01T10:00:00+0000" },
                { "id": "42_2" }
            ],
            "paging": { "cursors": { "before": "a", "after": "b" } }
        }))
        .unwrap();

        assert_eq!(feed.data.len(), 2);
        assert_eq!(feed.data[0].message.as_deref(), Some("hello"));
        assert_eq!(feed.data[1].message, None);
    }

    #[test]
    fn test_error_envelope_without_message() {
        let envelope: GraphErrorEnvelope =
            serde_json::from_value(json!({ "error": { "code": 100 } })).unwrap();
        let body = envelope.error.unwrap();
        assert_eq!(body.message, None);
        assert_eq!(body.code, Some(100));
    }
}
