//! Query controller: debounce generations and the commit policy
//!
//! Keystrokes arrive at arbitrary frequency. Each one bumps a generation
//! counter and the caller schedules a timer carrying that generation;
//! only the timer whose generation is still current gets to evaluate the
//! text. Stale timers are no-ops, which also covers teardown: a timer
//! that fires after the controller moved on cannot commit anything.

use std::time::Duration;

/// Quiet period required before the latest input is evaluated.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Minimum committed query length, after trimming.
const MIN_QUERY_LEN: usize = 3;

/// Trim the raw input and apply the length policy.
///
/// Returns the committable query, or `None` when the input is empty or
/// shorter than three characters after trimming.
pub fn sanitize(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        None
    } else {
        Some(trimmed)
    }
}

/// Owns the committed search term and the debounce bookkeeping.
#[derive(Debug, Default)]
pub struct QueryController {
    /// Latest raw text, not yet evaluated.
    raw: String,
    /// Bumped on every input; identifies the newest pending timer.
    generation: u64,
    /// Last value that passed evaluation.
    committed: Option<String>,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw text change and return the generation the caller
    /// should attach to the debounce timer it schedules.
    pub fn note_input(&mut self, raw: String) -> u64 {
        self.raw = raw;
        self.generation += 1;
        self.generation
    }

    /// A debounce timer fired. Evaluates the stored raw text only when
    /// `generation` is still the newest one.
    ///
    /// Returns the newly committed query, or `None` when the timer was
    /// stale, the input failed the policy, or the value equals the
    /// current committed query (identical re-commit is a no-op).
    pub fn try_commit(&mut self, generation: u64) -> Option<String> {
        if generation != self.generation {
            return None;
        }
        let candidate = sanitize(&self.raw)?;
        if self.committed.as_deref() == Some(candidate) {
            return None;
        }
        let candidate = candidate.to_string();
        self.committed = Some(candidate.clone());
        Some(candidate)
    }

    /// The current committed query, if any.
    pub fn committed(&self) -> Option<&str> {
        self.committed.as_deref()
    }
}
