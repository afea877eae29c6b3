//! cccdl - resolve direct video/audio download links from a media page
//!
//! This library fetches a single HTML page, locates its download section and
//! picks the first link matching a requested container format and, for audio,
//! a spoken-language tag.

pub mod cli;
pub mod config;
pub mod document;
pub mod fetch;
pub mod media;
pub mod resolver;

pub use cli::Cli;
pub use config::Config;
pub use document::{Document, HtmlDocument, Node, SelectorSpec};
pub use fetch::{HttpFetcher, PageFetcher};
pub use media::{Format, Language, MediaKind, Request};
pub use resolver::LinkResolver;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Rejected caller input, detected before any network access
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Format '{0}' not supported")]
    UnsupportedFormat(String),

    #[error("Language '{0}' not supported")]
    UnsupportedLanguage(String),
}

/// Error types surfaced by link resolution
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch page: {0}")]
    Fetch(String),

    #[error("Failed to parse page: {0}")]
    Parse(String),
}

impl ResolveError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ResolveError::Validation(_) => 1,
            ResolveError::Fetch(_) | ResolveError::Parse(_) => 2,
        }
    }
}
