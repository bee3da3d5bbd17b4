//! Graph API client modules
//!
//! This module provides a testable Facebook Page client split into focused
//! components: configuration, errors, the HTTP layer and the publishing
//! capability that callers program against.

pub mod api;
pub mod config;
pub mod error;
pub mod poster;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use api::GraphApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use poster::{DryRunPoster, PagePoster};
