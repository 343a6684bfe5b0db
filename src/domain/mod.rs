//! Core sorting logic for ticktidy
//!
//! Pure text-in, text-out computation without any I/O concerns: the line
//! grammar, the toggle classifier, the status sorter, and the per-document
//! edit session that ties them together.

mod classify;
mod line;
mod session;
mod sort;

pub use classify::{classify, Classification};
pub use line::TodoLine;
pub use session::{Session, SortedEdit, DEFAULT_GUARD_WINDOW};
pub use sort::{sort_todos, SortOrder, SortResult, SortScope};
