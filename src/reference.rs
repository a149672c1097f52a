//! Rendered reference document, held as trimmed lines in document order.
use crate::error::{ExtractError, Result};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceIndex {
    lines: Vec<String>,
}

impl ReferenceIndex {
    /// Read `path` fully; every line is kept, including blank ones.
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).map_err(|err| ExtractError::io("read reference", path, err))?;
        let index = Self::from_text(&text);
        tracing::info!(
            path = %path.display(),
            lines = index.len(),
            "loaded reference document"
        );
        Ok(index)
    }

    pub fn from_text(text: &str) -> Self {
        let lines = text.lines().map(|line| line.trim().to_string()).collect();
        Self { lines }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
