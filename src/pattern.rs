//! Extraction pattern synthesis.
//!
//! The rendered reference carries the same markup as the template with the
//! call-site replaced by its rendered value. The surrounding text of the
//! template line is escaped and reused verbatim, and the call-site position
//! becomes the single capture group. Whitespace runs inside the surrounding
//! text match any whitespace run, and the capture absorbs whitespace at both
//! boundaries.
//!
//! Lines whose surrounding text is generic (short or absent) will match the
//! first structurally similar line in the reference document.
use crate::error::{ExtractError, Result};
use crate::literal::CallSiteGrammar;
use regex::Regex;

/// Stand-in for the call-site while the line is split. NUL never appears in
/// template markup, so it cannot collide with real text.
const WILDCARD_MARKER: &str = "\u{0}LITERAL\u{0}";

/// Non-greedy so the value stops at the first occurrence of the right segment.
const CAPTURE: &str = r"\s*(.*?)\s*";

#[derive(Debug, Clone)]
pub struct ExtractionPattern {
    left: String,
    right: String,
    regex: Regex,
}

impl ExtractionPattern {
    /// Build the pattern for a template line holding exactly one call-site.
    ///
    /// Lines with zero or several call-sites fail with
    /// [`ExtractError::MalformedLine`].
    pub fn synthesize(grammar: &CallSiteGrammar, line: &str) -> Result<Self> {
        let marked = grammar.replace_all(line, WILDCARD_MARKER);
        let segments: Vec<&str> = marked.split(WILDCARD_MARKER).collect();
        let [left, right] = segments.as_slice() else {
            return Err(ExtractError::MalformedLine {
                segments: segments.len(),
            });
        };
        let regex = Regex::new(&compose(left, right))?;
        debug_assert_eq!(regex.captures_len(), 2);
        Ok(Self {
            left: (*left).to_string(),
            right: (*right).to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True when there is no surrounding text to anchor on.
    pub fn is_generic(&self) -> bool {
        self.left.trim().is_empty() && self.right.trim().is_empty()
    }

    /// Rebuild a line with `value` in the call-site position.
    #[cfg(test)]
    pub fn reproduce(&self, value: &str) -> String {
        format!("{}{}{}", self.left, value, self.right)
    }

    /// Captured value for `line`, trimmed, if the line matches.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(line)?;
        caps.get(1).map(|value| value.as_str().trim())
    }
}

fn compose(left: &str, right: &str) -> String {
    let mut source = escape_segment(left);
    source.push_str(CAPTURE);
    let right = escape_segment(right);
    if right.is_empty() {
        // Anchor so the lazy capture runs to end of line instead of matching nothing.
        source.push('$');
    } else {
        source.push_str(&right);
    }
    source
}

fn escape_segment(segment: &str) -> String {
    segment
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
