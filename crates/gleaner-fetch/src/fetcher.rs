//! Source resolution and fetching

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::text::{collapse_whitespace, html_to_text, looks_like_html};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// Where content comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Remote page
    Url(Url),

    /// Local document
    File(PathBuf),
}

impl Source {
    /// Classify user input: `http://` and `https://` prefixes are URLs, anything else a path
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        let trimmed = input.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Url::parse(trimmed)
                .map(Source::Url)
                .map_err(|e| FetchError::InvalidUrl(trimmed.to_string(), e.to_string()))
        } else {
            Ok(Source::File(PathBuf::from(trimmed)))
        }
    }

    /// URL of a remote source, used for provenance in prompts and ids
    pub fn url(&self) -> Option<&Url> {
        match self {
            Source::Url(url) => Some(url),
            Source::File(_) => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches sources and returns their readable text
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with the given configuration
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            ACCEPT,
            reqwest::header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,text/plain;q=0.8,*/*;q=0.5",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            reqwest::header::HeaderValue::from_static("en-US,en;q=0.8,zh-CN;q=0.5"),
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Active configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch a source; no retries
    pub async fn fetch(&self, source: &Source) -> Result<String, FetchError> {
        let text = match source {
            Source::Url(url) => self.fetch_url(url).await?,
            Source::File(path) => read_file(path).await?,
        };
        info!("Fetched {} chars from {}", text.chars().count(), source);
        Ok(text)
    }

    async fn fetch_url(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("html"));

        let body = response.text().await.map_err(|e| transport_error(url, e))?;
        debug!("Received {} bytes from {} (html: {})", body.len(), url, is_html);

        if is_html || looks_like_html(&body) {
            Ok(html_to_text(&body))
        } else {
            Ok(collapse_whitespace(&body))
        }
    }
}

async fn read_file(path: &Path) -> Result<String, FetchError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            FetchError::NotFound(path.to_path_buf())
        } else {
            FetchError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let text = String::from_utf8(bytes).map_err(|_| FetchError::NotText(path.to_path_buf()))?;

    let is_html = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

    if is_html {
        Ok(html_to_text(&text))
    } else {
        Ok(collapse_whitespace(&text))
    }
}

fn transport_error(url: &Url, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse_url() {
        let source = Source::parse("https://example.com/event").unwrap();
        assert!(matches!(source, Source::Url(_)));
        assert_eq!(source.url().map(|u| u.as_str()), Some("https://example.com/event"));
    }

    #[test]
    fn test_source_parse_path() {
        let source = Source::parse("./notes/event.txt").unwrap();
        assert_eq!(source, Source::File(PathBuf::from("./notes/event.txt")));
        assert!(source.url().is_none());
    }

    #[test]
    fn test_source_parse_bad_url() {
        let result = Source::parse("https://");
        assert!(matches!(result, Err(FetchError::InvalidUrl(_, _))));
    }
}
