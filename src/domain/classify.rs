//! Edit classification
//!
//! Decides whether the difference between two snapshots of a document is a
//! single checklist line whose status marker flipped. Anything else, from
//! ordinary typing to inserting or deleting lines, is not a toggle and must
//! not trigger a resort.

use super::line::TodoLine;

/// Outcome of comparing two document snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Exactly one line changed, and only its status marker differs.
    Toggle {
        /// Index of the toggled line
        line: usize,
    },

    /// Anything else, including "no change at all".
    NotAToggle,
}

impl Classification {
    /// Returns true for the [`Classification::Toggle`] variant.
    pub fn is_toggle(&self) -> bool {
        matches!(self, Classification::Toggle { .. })
    }
}

/// Compares two snapshots and reports whether the edit between them was a
/// checkbox toggle.
///
/// A toggle requires equal line counts, exactly one differing line, and that
/// line parsing as a checklist item on both sides with identical prefix and
/// suffix but a different marker.
pub fn classify(old_text: &str, new_text: &str) -> Classification {
    let old_lines: Vec<&str> = old_text.split('\n').collect();
    let new_lines: Vec<&str> = new_text.split('\n').collect();

    if old_lines.len() != new_lines.len() {
        return Classification::NotAToggle;
    }

    let mut changed = None;
    for (i, (old, new)) in old_lines.iter().zip(&new_lines).enumerate() {
        if old != new {
            if changed.is_some() {
                return Classification::NotAToggle;
            }
            changed = Some(i);
        }
    }

    let Some(line) = changed else {
        return Classification::NotAToggle;
    };

    let (Some(old), Some(new)) = (
        TodoLine::parse(old_lines[line]),
        TodoLine::parse(new_lines[line]),
    ) else {
        return Classification::NotAToggle;
    };

    if old.prefix == new.prefix && old.suffix == new.suffix && old.mark != new.mark {
        Classification::Toggle { line }
    } else {
        Classification::NotAToggle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_single_toggle() {
        let old = "# List\n- [ ] buy milk\n- [ ] call home";
        let new = "# List\n- [x] buy milk\n- [ ] call home";
        assert_eq!(classify(old, new), Classification::Toggle { line: 1 });
    }

    #[test]
    fn text_edit_is_not_a_toggle() {
        let old = "- [ ] buy milk";
        let new = "- [ ] buy bread";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn indent_change_is_not_a_toggle() {
        let old = "- [ ] item";
        let new = "  - [x] item";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn rejects_multiple_changed_lines() {
        let old = "- [ ] a\n- [ ] b";
        let new = "- [x] a\n- [x] b";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn rejects_line_count_mismatch() {
        let old = "- [ ] a";
        let new = "- [x] a\n- [ ] b";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn identical_documents_are_not_a_toggle() {
        let text = "- [ ] a\n- [x] b";
        assert_eq!(classify(text, text), Classification::NotAToggle);
    }

    #[test]
    fn rejects_non_item_becoming_item() {
        let old = "buy milk";
        let new = "- [ ] buy milk";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn rejects_change_on_non_item_line() {
        let old = "# Heading\n- [ ] a";
        let new = "# Headline\n- [ ] a";
        assert_eq!(classify(old, new), Classification::NotAToggle);
    }

    #[test]
    fn toggle_between_custom_marks() {
        let old = "- [/] in progress";
        let new = "- [x] in progress";
        assert_eq!(classify(old, new), Classification::Toggle { line: 0 });
    }
}
