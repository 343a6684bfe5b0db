//! ticktidy - Keeps markdown checklists sorted by completion status
//!
//! ticktidy watches live-edited checklist documents and, whenever a single
//! checkbox is toggled, resorts the affected list by status while leaving
//! every other line in place. The core is a pure library (classifier,
//! sorter, edit session); the CLI wraps it for files, pipes, and a
//! filesystem watch mode.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{classify, sort_todos, Classification, Session, SortOrder, SortResult, SortScope, SortedEdit};
