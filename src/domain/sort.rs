//! Status-ordered checklist sorting
//!
//! Reorders checklist lines by status marker while every other line keeps
//! its place, and reports where each original line ended up so a cursor can
//! follow its line across the resort.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::line::TodoLine;

/// Ordering over status markers.
///
/// Configured as a string of marker characters; markers appearing earlier
/// sort first. Markers absent from the configuration rank after every
/// configured marker and keep their original relative order among
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SortOrder {
    markers: Vec<char>,
}

impl SortOrder {
    /// Creates an order from a string of markers, first-sorts-first.
    pub fn new(markers: &str) -> Self {
        Self {
            markers: markers.chars().collect(),
        }
    }

    /// Rank of a marker under this order; lower sorts first.
    pub fn rank(&self, mark: char) -> usize {
        self.markers
            .iter()
            .position(|&m| m == mark)
            .unwrap_or(self.markers.len())
    }
}

impl Default for SortOrder {
    /// Unchecked, in progress, checked, cancelled.
    fn default() -> Self {
        Self::new(" /x-")
    }
}

impl From<String> for SortOrder {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.markers.into_iter().collect()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.markers {
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

/// Which checklist lines sort together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortScope {
    /// Each contiguous block of checklist lines sorts independently;
    /// headings, blank lines and other text pin the blocks in place.
    #[default]
    Runs,

    /// All checklist lines in the document sort as one group, while every
    /// non-checklist line keeps its absolute position.
    Document,
}

/// A reordered document plus the permutation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortResult {
    /// The reassembled document text
    pub output: String,

    /// For every original line index, the index that line occupies in
    /// `output`. Total over all lines, checklist or not.
    pub line_map: Vec<usize>,
}

/// Sorts the checklist lines of `text` by status.
///
/// The output always has the same line count and the same multiset of line
/// contents as the input; only checklist lines move, and equal-status lines
/// keep their original relative order. When the document is already sorted
/// the output equals the input and `line_map` is the identity.
pub fn sort_todos(text: &str, order: &SortOrder, scope: SortScope) -> SortResult {
    let lines: Vec<&str> = text.split('\n').collect();
    let ranks: Vec<Option<usize>> = lines
        .iter()
        .map(|line| TodoLine::parse(line).map(|todo| order.rank(todo.mark)))
        .collect();

    // arrangement[new_index] = original index
    let arrangement = match scope {
        SortScope::Runs => arrange_runs(&ranks),
        SortScope::Document => arrange_document(&ranks),
    };

    let mut line_map = vec![0; lines.len()];
    for (new_index, &original) in arrangement.iter().enumerate() {
        line_map[original] = new_index;
    }

    let output = arrangement
        .iter()
        .map(|&i| lines[i])
        .collect::<Vec<_>>()
        .join("\n");

    SortResult { output, line_map }
}

/// Sorts each maximal contiguous run of checklist lines independently.
fn arrange_runs(ranks: &[Option<usize>]) -> Vec<usize> {
    let mut arrangement = Vec::with_capacity(ranks.len());
    let mut run: Vec<usize> = Vec::new();

    for (i, rank) in ranks.iter().enumerate() {
        match rank {
            Some(_) => run.push(i),
            None => {
                drain_sorted(&mut run, ranks, &mut arrangement);
                arrangement.push(i);
            }
        }
    }
    drain_sorted(&mut run, ranks, &mut arrangement);

    arrangement
}

/// Stably sorts one run by rank and appends it to the arrangement.
fn drain_sorted(run: &mut Vec<usize>, ranks: &[Option<usize>], arrangement: &mut Vec<usize>) {
    run.sort_by_key(|&i| ranks[i]);
    arrangement.append(run);
}

/// Sorts every checklist line in the document as a single group, keeping
/// non-checklist lines at their absolute positions.
fn arrange_document(ranks: &[Option<usize>]) -> Vec<usize> {
    let mut todos: Vec<usize> = (0..ranks.len()).filter(|&i| ranks[i].is_some()).collect();
    todos.sort_by_key(|&i| ranks[i]);

    let mut next = 0;
    (0..ranks.len())
        .map(|i| {
            if ranks[i].is_some() {
                let original = todos[next];
                next += 1;
                original
            } else {
                i
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sort_runs(text: &str) -> SortResult {
        sort_todos(text, &SortOrder::default(), SortScope::Runs)
    }

    #[test]
    fn unchecked_sorts_before_checked() {
        let result = sort_runs("- [x] a\n- [ ] b\n- [x] c");
        assert_eq!(result.output, "- [ ] b\n- [x] a\n- [x] c");
        assert_eq!(result.line_map, vec![1, 0, 2]);
    }

    #[test]
    fn equal_status_keeps_original_order() {
        let result = sort_runs("- [x] a\n- [ ] b\n- [ ] c\n- [x] d");
        assert_eq!(result.output, "- [ ] b\n- [ ] c\n- [x] a\n- [x] d");
    }

    #[test]
    fn non_items_stay_put() {
        let result = sort_runs("# Header\n- [x] a\n- [ ] b");
        assert_eq!(result.output, "# Header\n- [ ] b\n- [x] a");
        assert_eq!(result.line_map, vec![0, 2, 1]);
    }

    #[test]
    fn runs_sort_independently() {
        let text = "- [x] a\n- [ ] b\n\n- [x] c\n- [ ] d";
        let result = sort_runs(text);
        assert_eq!(result.output, "- [ ] b\n- [x] a\n\n- [ ] d\n- [x] c");
    }

    #[test]
    fn document_scope_sorts_across_runs() {
        let text = "- [x] a\n# middle\n- [ ] b";
        let result = sort_todos(text, &SortOrder::default(), SortScope::Document);
        assert_eq!(result.output, "- [ ] b\n# middle\n- [x] a");
        assert_eq!(result.line_map, vec![2, 1, 0]);
    }

    #[test]
    fn sorted_input_is_identity() {
        let text = "# List\n- [ ] a\n- [x] b\n";
        let result = sort_runs(text);
        assert_eq!(result.output, text);
        assert_eq!(result.line_map, vec![0, 1, 2, 3]);
    }

    #[test]
    fn custom_order_reverses_default() {
        let order = SortOrder::new("x ");
        let result = sort_todos("- [ ] a\n- [x] b", &order, SortScope::Runs);
        assert_eq!(result.output, "- [x] b\n- [ ] a");
    }

    #[test]
    fn unknown_marks_sort_last_in_original_order() {
        let result = sort_runs("- [?] a\n- [x] b\n- [!] c\n- [ ] d");
        assert_eq!(result.output, "- [ ] d\n- [x] b\n- [?] a\n- [!] c");
    }

    #[test]
    fn trailing_newline_is_preserved() {
        let result = sort_runs("- [x] a\n- [ ] b\n");
        assert_eq!(result.output, "- [ ] b\n- [x] a\n");
    }

    #[test]
    fn empty_document_round_trips() {
        let result = sort_runs("");
        assert_eq!(result.output, "");
        assert_eq!(result.line_map, vec![0]);
    }

    #[test]
    fn indented_items_sort_within_their_run() {
        let result = sort_runs("  - [x] a\n  - [ ] b");
        assert_eq!(result.output, "  - [ ] b\n  - [x] a");
    }

    #[test]
    fn sort_order_round_trips_through_string() {
        let order = SortOrder::new("x /");
        let text: String = order.clone().into();
        assert_eq!(SortOrder::from(text), order);
    }
}
