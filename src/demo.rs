use std::io::Write;

use chrono::{DateTime, Local};
use compact_str::{format_compact, CompactString};
use tracing::{debug, info, instrument};

use crate::{
    client::PagePoster,
    domain::{PageInfo, PostHandle, PostSummary},
    result::Result,
};

/// Number of characters of each post shown in the recent posts listing
pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// How many recent posts to list
    pub recent_limit: u32,
    /// Attach the test post to this link instead of posting plain text
    pub link: Option<CompactString>,
    /// Publish the test post as a photo fetched from this URL
    pub photo_url: Option<CompactString>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            link: None,
            photo_url: None,
        }
    }
}

/// What the demonstration saw, step by step
#[derive(Debug, Clone)]
pub struct DemoSummary {
    pub page: PageInfo,
    pub post: PostHandle,
    pub recent: Vec<PostSummary>,
}

/// Fetches page info, publishes a timestamped test post and lists recent posts.
///
/// Steps run strictly in order and the first failure aborts the sequence.
#[instrument(skip_all, fields(backend = poster.backend(), recent_limit = options.recent_limit))]
pub async fn run_demo<P, W>(poster: &P, out: &mut W, options: &DemoOptions) -> Result<DemoSummary>
where
    P: PagePoster + ?Sized,
    W: Write,
{
    writeln!(out, "📊 Fetching page info...")?;
    let page = poster.page_info().await?;
    writeln!(out, "   Page name: {}", page.name)?;
    if let Some(username) = &page.username {
        writeln!(out, "   Username: @{username}")?;
    }
    writeln!(out, "   Fans: {}", format_count(page.fan_count.unwrap_or(0)))?;
    writeln!(out, "   Followers: {}", format_count(page.followers_count.unwrap_or(0)))?;
    writeln!(out)?;

    writeln!(out, "✍️  Publishing test post...")?;
    let message = test_message(Local::now());
    let post = match (&options.photo_url, &options.link) {
        (Some(photo_url), _) => poster.post_photo(&message, photo_url).await?,
        (None, Some(link)) => poster.post_link(&message, link).await?,
        (None, None) => poster.post_text(&message).await?,
    };
    info!(post_id = %post.id, "Test post published");
    writeln!(out, "   ✅ Published! Post id: {}", post.id)?;
    if let Some(post_id) = &post.post_id {
        writeln!(out, "   Feed post id: {post_id}")?;
    }
    writeln!(out)?;

    writeln!(out, "📝 Fetching the {} most recent posts...", options.recent_limit)?;
    let recent = poster.recent_posts(Some(options.recent_limit)).await?.data;
    for (idx, post) in recent.iter().enumerate() {
        debug!(post_id = %post.id, "Listing recent post");
        let message = post.message.as_deref().unwrap_or("(no content)");
        writeln!(out, "   {}. {}...", idx + 1, preview(message))?;
        writeln!(out, "      Created: {}", post.created_time.as_deref().unwrap_or(""))?;
        if let Some(url) = &post.permalink_url {
            writeln!(out, "      Link: {url}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "✅ All steps completed!")?;

    Ok(DemoSummary { page, post, recent })
}

/// Body of the test post published by the demonstration
pub fn test_message(now: DateTime<Local>) -> CompactString {
    format_compact!(
        "🤖 Automated test post\n\nPublished at: {}",
        now.format("%Y-%m-%d %H:%M:%S")
    )
}

/// First [`PREVIEW_CHARS`] characters of a post message
pub fn preview(message: &str) -> CompactString {
    message.chars().take(PREVIEW_CHARS).collect()
}

/// Formats a count with `,` thousands separators
pub fn format_count(value: u64) -> CompactString {
    let digits = value.to_string();
    let mut formatted = CompactString::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(c);
    }
    formatted
}
