//! Call-site grammar for page literals.
//!
//! A call-site is `<marker>("<key>"[, extra args])`. Anything else on the line
//! is opaque text; extra arguments are accepted and ignored.
use crate::error::Result;
use regex::Regex;
use std::ops::Range;

/// Marker used by the page templates when no profile overrides it.
pub const DEFAULT_MARKER: &str = "@PageLiteralsHelper.GetLiteral";

/// One literal reference found on a template line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub key: String,
    /// Byte range of the whole call-site within the line.
    pub span: Range<usize>,
}

/// Compiled matcher for a single call-site marker.
#[derive(Debug, Clone)]
pub struct CallSiteGrammar {
    regex: Regex,
}

impl CallSiteGrammar {
    pub fn new(marker: &str) -> Result<Self> {
        let pattern = format!(r#"{}\("([^"]+)"[^)]*\)"#, regex::escape(marker));
        let regex = Regex::new(&pattern)?;
        Ok(Self { regex })
    }

    /// All call-sites on `line`, left to right.
    pub fn call_sites(&self, line: &str) -> Vec<CallSite> {
        self.regex
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let key = caps.get(1)?;
                Some(CallSite {
                    key: key.as_str().to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }

    /// Replace every call-site on `line` with `replacement`, verbatim.
    pub fn replace_all(&self, line: &str, replacement: &str) -> String {
        self.regex
            .replace_all(line, regex::NoExpand(replacement))
            .into_owned()
    }
}
