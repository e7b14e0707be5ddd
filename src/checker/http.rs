// src/checker/http.rs
// =============================================================================
// This module fetches one URL and reports what happened.
//
// Key functionality:
// - One GET per call, with the client's timeout
// - Transport problems (DNS, refused connection, timeout, TLS, redirect loop)
//   become FetchResult::Unreachable instead of errors
// - The body is only read when the caller wants it AND the response is a
//   successful HTML response; everything else returns just the status
//
// The Fetcher trait is the seam the crawl engine talks to, so the engine can
// be driven by an in-memory fake in tests.
//
// Rust concepts:
// - BoxFuture: lets a trait method return a future (async fn in traits
//   isn't object-safe)
// - Enums with data: FetchResult carries either a response or a failure kind
// - #[serde(tag, content)]: adjacently tagged JSON for LinkOutcome
// =============================================================================

use futures::future::BoxFuture;
use reqwest::{header::CONTENT_TYPE, Client};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::error::CheckerError;

const USER_AGENT: &str = concat!("check-links/", env!("CARGO_PKG_VERSION"));

/// Why a URL could not be reached at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportFailure {
    Timeout,
    DnsError,
    SslError,
    ConnectionFailed,
    TooManyRedirects,
    Other,
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransportFailure::Timeout => "request timed out",
            TransportFailure::DnsError => "could not resolve hostname",
            TransportFailure::SslError => "SSL certificate error",
            TransportFailure::ConnectionFailed => "connection failed",
            TransportFailure::TooManyRedirects => "too many redirects",
            TransportFailure::Other => "request failed",
        };
        f.write_str(text)
    }
}

/// Result of one fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// The server answered. `final_url` is where redirects ended up.
    Response {
        status: u16,
        final_url: Url,
        body: Option<String>,
    },
    Unreachable(TransportFailure),
}

impl FetchResult {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchResult::Response { status, .. } => Some(*status),
            FetchResult::Unreachable(_) => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            FetchResult::Response { body, .. } => body.as_deref(),
            FetchResult::Unreachable(_) => None,
        }
    }

    pub fn outcome(&self) -> LinkOutcome {
        match self {
            FetchResult::Response { status, .. } => LinkOutcome::Status(*status),
            FetchResult::Unreachable(failure) => LinkOutcome::Unreachable(*failure),
        }
    }
}

/// Terminal state of a checked URL, as stored in the crawl results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// The server answered with this status code
    Status(u16),
    /// The request never got an answer
    Unreachable(TransportFailure),
}

impl LinkOutcome {
    /// 4xx/5xx statuses and unreachable URLs are broken
    pub fn is_broken(&self) -> bool {
        match self {
            LinkOutcome::Status(code) => *code >= 400,
            LinkOutcome::Unreachable(_) => true,
        }
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkOutcome::Status(code) => write!(f, "HTTP {}", code),
            LinkOutcome::Unreachable(failure) => write!(f, "unreachable ({})", failure),
        }
    }
}

/// Fetches one URL. Implementations must never panic or return errors for
/// per-URL problems; those are reported through FetchResult.
pub trait Fetcher {
    fn fetch<'a>(&'a self, url: &'a Url, want_body: bool) -> BoxFuture<'a, FetchResult>;
}

/// The real fetcher, backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, CheckerError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }

    // Sends one GET request
    //
    // Parameters:
    //   url: the URL to fetch (borrowed, reqwest gets a clone)
    //   want_body: read the body if the response turns out to be HTML
    //
    // Returns: FetchResult with the status, final URL and maybe the body
    async fn get(&self, url: &Url, want_body: bool) -> FetchResult {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchResult::Unreachable(categorize_error(&e)),
        };

        let status = response.status();
        let final_url = response.url().clone();
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase().contains("text/html"))
            .unwrap_or(false);

        let body = if want_body && is_html && status.is_success() {
            match response.text().await {
                Ok(text) => Some(text),
                // The status already arrived; a body cut off mid-read just
                // means nothing to extract
                Err(_) => None,
            }
        } else {
            None
        };

        FetchResult::Response {
            status: status.as_u16(),
            final_url,
            body,
        }
    }
}

impl Fetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a Url, want_body: bool) -> BoxFuture<'a, FetchResult> {
        Box::pin(self.get(url, want_body))
    }
}

// Categorizes reqwest errors into the failure kinds we report
fn categorize_error(error: &reqwest::Error) -> TransportFailure {
    let error_string = format!("{:?}", error).to_ascii_lowercase();

    if error.is_timeout() {
        TransportFailure::Timeout
    } else if error.is_redirect() {
        TransportFailure::TooManyRedirects
    } else if error_string.contains("certificate") || error_string.contains("tls") {
        TransportFailure::SslError
    } else if error.is_connect() {
        if error_string.contains("dns") || error_string.contains("resolve") {
            TransportFailure::DnsError
        } else {
            TransportFailure::ConnectionFailed
        }
    } else {
        TransportFailure::Other
    }
}
