//! Unsplash API module
//!
//! - client.rs: the search request and response classification
//! - probe.rs: sequential intrinsic-dimension probing of result images

pub mod client;
pub mod probe;

use crate::state::data::{FetchedPage, PageResults};

pub use client::UnsplashClient;

/// One full fetch cycle for a page: search, then probe every result
/// image sequentially. The output feeds `WallState::apply_page` as-is.
pub async fn fetch_page(client: &UnsplashClient, query: &str, page: u32) -> FetchedPage {
    let outcome = client.search_photos(query, page).await;

    let results = match outcome.results {
        Some(results) => Some(PageResults {
            images: probe::probe_images(client.http(), results.images).await,
            total_pages: results.total_pages,
        }),
        None => None,
    };

    FetchedPage {
        errors: outcome.errors,
        results,
    }
}
