//! HTTP client wrapper for fetching IMDb event pages.
//!
//! IMDb pages are rendered by Next.js and embed their data as a JSON blob in
//! a `<script id="__NEXT_DATA__">` tag. Only the `props.pageProps` subtree of
//! that blob is used.

use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

use rand::Rng;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use scraper::{Html, Selector};
use serde_json::Value;

use crate::config::{ACCEPT_LANGUAGE, HTTP_TIMEOUT_SECS, THROTTLE_SECS, USER_AGENT};
use crate::error::{AwardsError, Result};

#[allow(clippy::expect_used)] // Static selector that is guaranteed to be valid
static NEXT_DATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script#__NEXT_DATA__").expect("valid selector"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` with timeout, browser user agent and
/// English `Accept-Language`.
pub fn create_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// Random pause between requests to keep the load on IMDb low.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    enabled: bool,
}

impl Throttle {
    pub fn new(no_sleep: bool) -> Self {
        Self { enabled: !no_sleep }
    }

    /// Pick the pause for the next request, or `None` when disabled.
    pub fn next_pause(&self) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let (min, max) = THROTTLE_SECS;
        Some(Duration::from_secs(rand::thread_rng().gen_range(min..=max)))
    }
}

/// Fetch a page and return the `props.pageProps` of its embedded JSON.
///
/// There is no retry: any network, status or parse failure is returned to
/// the caller. After a successful download the throttle pause is slept.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - Page URL
/// * `throttle` - Pause policy applied after the request
pub fn fetch_page_props(client: &Client, url: &str, throttle: &Throttle) -> Result<Value> {
    let pause = throttle.next_pause();
    tracing::debug!(
        url,
        sleep_secs = pause.map(|p| p.as_secs()).unwrap_or(0),
        "Requesting page"
    );

    let response = client.get(url).send()?.error_for_status()?;
    let body = response.text()?;

    if let Some(pause) = pause {
        thread::sleep(pause);
    }

    extract_page_props(&body, url)
}

/// Extract `props.pageProps` from the `__NEXT_DATA__` script of a page.
pub fn extract_page_props(html: &str, url: &str) -> Result<Value> {
    let document = Html::parse_document(html);
    let script = document
        .select(&NEXT_DATA_SELECTOR)
        .next()
        .ok_or_else(|| AwardsError::MissingPageData {
            url: url.to_string(),
        })?;
    let json: String = script.text().collect();
    let mut data: Value = serde_json::from_str(&json)?;

    data.get_mut("props")
        .and_then(|props| props.get_mut("pageProps"))
        .map(Value::take)
        .ok_or_else(|| AwardsError::MissingKey {
            key: "props.pageProps".to_string(),
            context: url.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_throttle_disabled() {
        assert!(Throttle::new(true).next_pause().is_none());
    }

    #[test]
    fn test_throttle_range() {
        let throttle = Throttle::new(false);
        for _ in 0..50 {
            let secs = throttle.next_pause().unwrap().as_secs();
            assert!((2..=6).contains(&secs), "pause {secs}s out of range");
        }
    }

    #[test]
    fn test_extract_page_props() {
        let html = r#"<html><head>
            <script id="__NEXT_DATA__" type="application/json">{"props":{"pageProps":{"eventName":"Academy Awards, USA"}}}</script>
            </head><body></body></html>"#;
        let props = extract_page_props(html, "https://example.com").unwrap();
        assert_eq!(props["eventName"], "Academy Awards, USA");
    }

    #[test]
    fn test_extract_page_props_missing_script() {
        let err = extract_page_props("<html><body></body></html>", "https://example.com")
            .unwrap_err();
        assert!(matches!(err, AwardsError::MissingPageData { .. }));
    }

    #[test]
    fn test_extract_page_props_missing_key() {
        let html = r#"<script id="__NEXT_DATA__">{"props":{}}</script>"#;
        let err = extract_page_props(html, "https://example.com").unwrap_err();
        assert!(matches!(err, AwardsError::MissingKey { .. }));
    }

    #[test]
    fn test_extract_page_props_invalid_json() {
        let html = r#"<script id="__NEXT_DATA__">{not json</script>"#;
        let err = extract_page_props(html, "https://example.com").unwrap_err();
        assert!(matches!(err, AwardsError::Json(_)));
    }
}
