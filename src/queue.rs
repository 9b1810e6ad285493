//! The pending-line file
//!
//! Producers append one untranslated line at a time; the worker drains the
//! whole file once per run. Draining truncates the file before any
//! translation is attempted, so a crash mid-run loses that batch. Lines are
//! consumed at most once.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Every boundary a universal-newline reader splits on
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Whitespace plus the ASCII separator controls, which `str::trim` keeps
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// Splits raw file contents into trimmed, non-empty lines, order preserved
pub fn parse_pending(contents: &str) -> Vec<String> {
    contents
        .split(is_line_boundary)
        .map(|line| line.trim_matches(is_blank))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct PendingQueue {
    path: PathBuf,
    seen: HashSet<String>,
}

impl PendingQueue {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seen: HashSet::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every pending line and empties the file
    ///
    /// A missing file means there is no work and is left untouched. Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn read_pending(&self) -> io::Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read(&self.path)?;
        let contents = String::from_utf8_lossy(&raw);

        // Truncate before handing anything out
        fs::write(&self.path, "")?;

        Ok(parse_pending(&contents))
    }

    /// Appends `text` as one pending line
    ///
    /// Returns `false` when the trimmed text is empty or was already queued
    /// through this handle.
    pub fn enqueue(&mut self, text: &str) -> io::Result<bool> {
        let text = text.trim_matches(is_blank);
        if text.is_empty() || self.seen.contains(text) {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{text}")?;

        self.seen.insert(text.to_string());
        Ok(true)
    }
}
