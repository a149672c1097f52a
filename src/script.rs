//! Accumulated SQL script and its single atomic write.
use crate::error::{ExtractError, Result};
use std::io::Write;
use std::path::Path;

/// Append-only list of script lines; each record ends with a blank line.
#[derive(Debug, Default)]
pub struct OutputScript {
    lines: Vec<String>,
    records: usize,
}

impl OutputScript {
    pub fn push_record(&mut self, lines: Vec<String>) {
        self.lines.extend(lines);
        self.lines.push(String::new());
        self.records += 1;
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Replace `path` with the rendered script. The content goes to a temp file
    /// next to the destination first and is renamed over it once complete.
    pub fn write_atomic(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|err| ExtractError::io("create temp file in", parent, err))?;
        let tmp_path = tmp.path().to_path_buf();
        tmp.write_all(self.render().as_bytes())
            .map_err(|err| ExtractError::io("write", &tmp_path, err))?;
        // NamedTempFile is created 0600; the script gets regular file permissions.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|err| ExtractError::io("set permissions on", &tmp_path, err))?;
        }
        tmp.persist(path)
            .map_err(|err| ExtractError::io("write", path, err.error))?;
        Ok(())
    }
}
