//! Per-document edit sessions
//!
//! Applying a resort back into a live buffer is, from the host's point of
//! view, just another edit event. The session owns the previous-snapshot
//! baseline plus the guard state that keeps the sorter from reacting to its
//! own output, so the classifier and sorter themselves stay pure.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::classify::classify;
use super::sort::{sort_todos, SortOrder, SortScope};

/// Default minimum gap between two completed resorts.
pub const DEFAULT_GUARD_WINDOW: Duration = Duration::from_millis(100);

/// A rewritten document along with the cursor's relocated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedEdit {
    /// The resorted document text
    pub text: String,

    /// The line the cursor's original line moved to; the caller keeps the
    /// character offset within the line unchanged.
    pub cursor_line: usize,
}

/// Edit-session state for one live-edited document.
///
/// Construct one session per document and feed every edit notification
/// through [`Session::handle_edit`]. No state is shared between sessions or
/// held globally.
#[derive(Debug)]
pub struct Session {
    order: SortOrder,
    scope: SortScope,
    guard_window: Duration,

    /// Snapshot from the previous edit event; `None` until the first event.
    previous: Option<String>,

    /// The text the last resort produced.
    last_sorted: Option<String>,

    /// When the last resort completed.
    last_sort_at: Option<Instant>,
}

impl Session {
    /// Creates a session with the default guard window.
    pub fn new(order: SortOrder, scope: SortScope) -> Self {
        Self {
            order,
            scope,
            guard_window: DEFAULT_GUARD_WINDOW,
            previous: None,
            last_sorted: None,
            last_sort_at: None,
        }
    }

    /// Overrides the minimum gap between two completed resorts.
    pub fn with_guard_window(mut self, window: Duration) -> Self {
        self.guard_window = window;
        self
    }

    /// Feeds one edit notification through the classifier and, when the
    /// edit was a checkbox toggle, through the sorter.
    ///
    /// Returns `Some` only when the document text actually changed; the
    /// caller should replace the buffer with `text` and move the cursor to
    /// `cursor_line`. Everything else, including a tripped rate guard, is a
    /// silent no-op that leaves the buffer alone.
    pub fn handle_edit(&mut self, cursor_line: usize, new_text: &str) -> Option<SortedEdit> {
        let previous = self.previous.replace(new_text.to_string());

        // First event: no baseline to diff against, record and wait.
        let previous = previous?;

        if !classify(&previous, new_text).is_toggle() {
            return None;
        }

        self.resort(cursor_line, new_text)
    }

    fn resort(&mut self, cursor_line: usize, text: &str) -> Option<SortedEdit> {
        // The document already settled into our own output.
        if self.last_sorted.as_deref() == Some(text) {
            return None;
        }

        if let Some(at) = self.last_sort_at {
            if at.elapsed() < self.guard_window {
                warn!(
                    window_ms = self.guard_window.as_millis() as u64,
                    "resort suppressed, possible feedback loop"
                );
                return None;
            }
        }

        let began = Instant::now();
        let result = sort_todos(text, &self.order, self.scope);
        if result.output == text {
            return None;
        }

        debug!(
            elapsed_ms = began.elapsed().as_millis() as u64,
            "resorted checklist"
        );

        self.last_sort_at = Some(Instant::now());
        self.last_sorted = Some(result.output.clone());
        self.previous = Some(result.output.clone());

        let cursor_line = result.line_map.get(cursor_line).copied().unwrap_or(cursor_line);
        Some(SortedEdit {
            text: result.output,
            cursor_line,
        })
    }
}
