//! Default value lookup against the reference document.
use crate::pattern::ExtractionPattern;
use crate::reference::ReferenceIndex;

/// First match in document order wins. Later candidates are not inspected, so
/// repeated boilerplate lines in the reference always resolve to the earliest.
pub fn resolve(pattern: &ExtractionPattern, index: &ReferenceIndex) -> Option<String> {
    index
        .lines()
        .enumerate()
        .find_map(|(idx, line)| {
            let value = pattern.capture(line)?;
            tracing::debug!(line = idx + 1, value, "reference line matched");
            Some(value.to_string())
        })
}
