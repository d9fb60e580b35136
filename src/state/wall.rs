//! Wall engine state machine: pagination, error list, and the column set
//!
//! All shared state mutated by fetch completions lives here, behind
//! explicit transition functions (`start_query`, `request_next_page`,
//! `apply_page`), so the whole machine is unit-testable without a
//! rendering surface.
//!
//! Fetches are identified by a `FetchTicket`. The epoch in the ticket is
//! bumped on every query commit; a completion carrying a stale epoch is
//! discarded instead of corrupting the newer query's wall.

use super::data::FetchedPage;
use super::layout::{layout_bricks, Column, WallGeometry};

/// How close to the end of the content (logical px) counts as "near
/// bottom" for prefetching the next page.
const SCROLL_LOOKAHEAD: f32 = 20.0;

/// The viewport is near the bottom when the visible window plus the
/// scroll offset reaches the content height, minus the lookahead margin.
pub fn is_close_to_bottom(visible_height: f32, scroll_offset: f32, content_height: f32) -> bool {
    visible_height + scroll_offset >= content_height - SCROLL_LOOKAHEAD
}

/// Identifies one outstanding fetch: which query cycle it belongs to
/// and which page it should load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: u64,
    pub page: u32,
}

/// Pagination, error, and column state for the committed query.
#[derive(Debug)]
pub struct WallState {
    /// Current 1-based page index.
    page: u32,
    /// Total pages reported by the API; 0 until the first response.
    max_page: u32,
    /// A fetch is in flight.
    loading: bool,
    /// Bumped on every query commit; stamps outgoing tickets.
    epoch: u64,
    /// Errors from the last fetch; non-empty replaces the wall.
    errors: Vec<String>,
    columns: Vec<Column>,
    column_count: usize,
}

impl WallState {
    pub fn new(column_count: usize) -> Self {
        WallState {
            page: 1,
            max_page: 0,
            loading: false,
            epoch: 0,
            errors: Vec::new(),
            columns: vec![Column::default(); column_count],
            column_count,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether `epoch` belongs to the current query cycle.
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    /// A new query was committed: reset pagination to page 1, recreate
    /// the columns wholesale, bump the epoch, and enter `Loading`.
    ///
    /// Returns the ticket for the first fetch of the new cycle.
    pub fn start_query(&mut self) -> FetchTicket {
        self.page = 1;
        self.max_page = 0;
        self.columns = vec![Column::default(); self.column_count];
        self.epoch += 1;
        self.loading = true;
        FetchTicket {
            epoch: self.epoch,
            page: self.page,
        }
    }

    /// A near-bottom scroll signal. Advances to the next page and enters
    /// `Loading`, unless a fetch is already in flight or the last known
    /// page has been reached.
    pub fn request_next_page(&mut self) -> Option<FetchTicket> {
        if self.loading || self.page >= self.max_page {
            return None;
        }
        // Advance before issuing the request.
        self.page += 1;
        self.loading = true;
        Some(FetchTicket {
            epoch: self.epoch,
            page: self.page,
        })
    }

    /// A fetch completed. Stale-epoch completions are discarded
    /// untouched; current ones replace the error list, update the page
    /// bound, lay out the page's images, and leave `Loading`.
    ///
    /// Returns whether the page was applied.
    pub fn apply_page(&mut self, ticket: FetchTicket, geometry: &WallGeometry, page: FetchedPage) -> bool {
        if !self.is_current(ticket.epoch) {
            return false;
        }

        self.errors = page.errors;
        if let Some(results) = page.results {
            self.max_page = results.total_pages;
            let sized: Vec<_> = results.images.into_iter().map(|p| p.image).collect();
            layout_bricks(&mut self.columns, geometry, &sized);
        }
        self.loading = false;
        true
    }
}
