//! Unsplash search API client
//!
//! One request shape: `GET {base_url}/search/photos` with `query`,
//! `lang=pl` and `page` parameters, authenticated by a static Client-ID
//! header. Every failure mode funnels into the page's error list; no
//! error type escapes this module.

use serde::Deserialize;

use crate::config::Config;
use crate::state::data::PartialImage;

/// Raw JSON shape of a search response. All fields are optional: the API
/// returns `errors` without `results` on a rejected request, and plain
/// error bodies carry neither.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Option<Vec<SearchResult>>,
    total_pages: Option<u32>,
    errors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    urls: ResultUrls,
}

#[derive(Debug, Deserialize)]
struct ResultUrls {
    small: String,
}

/// Outcome of one search request, before dimension probing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// API-reported errors, or the raw body when it was not valid JSON.
    pub errors: Vec<String>,
    /// `Some` iff the response carried a `results` array.
    pub results: Option<SearchResults>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// One small-size image per result, in response order.
    pub images: Vec<PartialImage>,
    /// Reported total page count (0 when absent).
    pub total_pages: u32,
}

/// Classify a response body.
///
/// A body that does not parse as the expected JSON shape becomes a
/// single error entry holding the raw text, so whatever the server said
/// is what the user sees.
pub fn classify_body(body: &str) -> SearchOutcome {
    let response: SearchResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) => {
            return SearchOutcome {
                errors: vec![body.to_string()],
                results: None,
            };
        }
    };

    SearchOutcome {
        errors: response.errors.unwrap_or_default(),
        results: response.results.map(|results| SearchResults {
            images: results
                .into_iter()
                .map(|r| PartialImage::from_url(r.urls.small))
                .collect(),
            total_pages: response.total_pages.unwrap_or(0),
        }),
    }
}

/// Thin wrapper around a shared `reqwest::Client` plus the credentials.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    access_key: String,
}

impl UnsplashClient {
    pub fn new(config: &Config) -> Self {
        UnsplashClient {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        }
    }

    /// The shared HTTP client, reused by the dimension probe.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch one page of search results.
    ///
    /// Transport failures (the request never produced a body) surface
    /// through the same error-list channel as parse failures.
    pub async fn search_photos(&self, query: &str, page: u32) -> SearchOutcome {
        let url = format!("{}/search/photos", self.base_url);
        let request = self
            .http
            .get(&url)
            .query(&[("query", query), ("lang", "pl"), ("page", &page.to_string())])
            .header("Accept", "application/json")
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Cache-Control", "no-cache");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return SearchOutcome {
                    errors: vec![e.to_string()],
                    results: None,
                };
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return SearchOutcome {
                    errors: vec![e.to_string()],
                    results: None,
                };
            }
        };

        classify_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_results() {
        let body = r#"{
            "total_pages": 42,
            "results": [
                {"urls": {"small": "https://images.example/a-small.jpg", "full": "https://images.example/a-full.jpg"}},
                {"urls": {"small": "https://images.example/b-small.jpg"}}
            ]
        }"#;

        let outcome = classify_body(body);
        assert!(outcome.errors.is_empty());
        let results = outcome.results.expect("results present");
        assert_eq!(results.total_pages, 42);
        assert_eq!(results.images.len(), 2);
        assert_eq!(results.images[0].url, "https://images.example/a-small.jpg");
        // Order preserved
        assert_eq!(results.images[1].url, "https://images.example/b-small.jpg");
    }

    #[test]
    fn test_classify_api_errors() {
        let outcome = classify_body(r#"{"errors": ["bad query"]}"#);
        assert_eq!(outcome.errors, ["bad query".to_string()]);
        assert!(outcome.results.is_none());
    }

    #[test]
    fn test_classify_non_json_body() {
        let outcome = classify_body("<html>502 Bad Gateway</html>");
        assert_eq!(outcome.errors, ["<html>502 Bad Gateway</html>".to_string()]);
        assert!(outcome.results.is_none());
    }

    #[test]
    fn test_classify_missing_total_pages_defaults_to_zero() {
        let body = r#"{"results": []}"#;
        let outcome = classify_body(body);
        assert_eq!(outcome.results.expect("results").total_pages, 0);
    }

    #[test]
    fn test_classify_missing_results() {
        // Valid JSON with neither errors nor results: zero images, no errors.
        let outcome = classify_body(r#"{"total": 0}"#);
        assert!(outcome.errors.is_empty());
        assert!(outcome.results.is_none());
    }
}
