//! Checklist line grammar
//!
//! A checklist line has the shape `<indent><bullet?>[<mark>]<rest>`:
//! leading whitespace, an optional `- ` list bullet, an opening bracket, a
//! single status-marker character, a closing bracket, and arbitrary trailing
//! text. Lines that do not match are never reordered.

/// A checklist line decomposed around its status marker.
///
/// `prefix` is everything up to and including the opening `[`, `suffix`
/// everything from the closing `]` onward, so `prefix + mark + suffix`
/// reassembles the original line verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoLine<'a> {
    /// Indentation plus optional bullet, ending in `[`
    pub prefix: &'a str,

    /// The single status-marker character between the brackets
    pub mark: char,

    /// The closing `]` and all trailing text
    pub suffix: &'a str,
}

impl<'a> TodoLine<'a> {
    /// Parses a line against the checklist grammar.
    ///
    /// Returns `None` for anything that is not a checklist item, including
    /// empty brackets (`[]`) and brackets holding more than one character.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut prefix_len = line.len() - line.trim_start().len();

        if line[prefix_len..].starts_with("- ") {
            prefix_len += 2;
        }

        let body = line[prefix_len..].strip_prefix('[')?;
        prefix_len += 1;

        let mut chars = body.chars();
        let mark = chars.next()?;
        let suffix = chars.as_str();
        if !suffix.starts_with(']') {
            return None;
        }

        Some(Self {
            prefix: &line[..prefix_len],
            mark,
            suffix,
        })
    }
}
