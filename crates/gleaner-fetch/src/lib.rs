//! Gleaner Content Fetcher
//!
//! Turns a URL or a local file path into readable text for the extractor.
//!
//! - URLs: one HTTP GET with a bounded timeout and a browser-like User-Agent
//! - Local files: read as UTF-8
//! - HTML (by content type, extension or sniffing) is reduced to visible text
//!
//! No retries: the caller decides whether to surface or re-run.
//!
//! # Examples
//!
//! ```no_run
//! use gleaner_fetch::{FetchConfig, Fetcher, Source};
//!
//! # async fn example() -> Result<(), gleaner_fetch::FetchError> {
//! let fetcher = Fetcher::new(FetchConfig::default())?;
//! let source = Source::parse("https://example.com/conference")?;
//! let text = fetcher.fetch(&source).await?;
//! println!("{} chars", text.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod fetcher;
mod text;

pub use config::{FetchConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
pub use error::FetchError;
pub use fetcher::{Fetcher, Source};
pub use text::html_to_text;
