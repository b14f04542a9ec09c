//! In-memory source file representation.
//!
//! Hosts hand these to the type checker. Construction is eager: the line
//! table is computed up front, so position mapping needs no interior
//! mutability and the value stays cheap to clone around.

use memchr::memchr_iter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trompe_sfc::ScriptKind;

/// ECMAScript language version a source file is parsed as.
///
/// Synthesized sources are always parsed at the ceiling, so [`EsNext`]
/// is the default.
///
/// [`EsNext`]: ScriptTarget::EsNext
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ScriptTarget {
    Es5,
    Es2015,
    Es2020,
    Es2022,
    #[default]
    EsNext,
}

/// A loaded or synthesized source file.
///
/// The text and its line table are coupled, so fields are private and the
/// only way in is [`SourceFile::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    file_name: PathBuf,
    text: String,
    language_version: ScriptTarget,
    script_kind: ScriptKind,
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(
        file_name: PathBuf,
        text: String,
        language_version: ScriptTarget,
        script_kind: ScriptKind,
    ) -> Self {
        let line_starts = compute_line_starts(&text);
        Self {
            file_name,
            text,
            language_version,
            script_kind,
            line_starts,
        }
    }

    /// Path the file was requested under, not necessarily a path that
    /// exists on disk.
    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_version(&self) -> ScriptTarget {
        self.language_version
    }

    pub fn script_kind(&self) -> ScriptKind {
        self.script_kind
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line and column for a byte offset into the text.
    ///
    /// Offsets past the end clamp to the final position.
    pub fn line_col_at(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        (line, column)
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for newline in memchr_iter(b'\n', text.as_bytes()) {
        starts.push(newline + 1);
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(text: &str) -> SourceFile {
        SourceFile::new(
            PathBuf::from("/proj/src/mod.ts"),
            text.to_string(),
            ScriptTarget::EsNext,
            ScriptKind::Ts,
        )
    }

    #[test]
    fn test_line_table() {
        let sf = file("ab\ncd\n\nef");
        assert_eq!(sf.line_count(), 4);
        assert_eq!(sf.line_col_at(0), (1, 1));
        assert_eq!(sf.line_col_at(2), (1, 3));
        assert_eq!(sf.line_col_at(3), (2, 1));
        assert_eq!(sf.line_col_at(6), (3, 1));
        assert_eq!(sf.line_col_at(7), (4, 1));
        assert_eq!(sf.line_col_at(8), (4, 2));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let sf = file("ab\ncd");
        assert_eq!(sf.line_col_at(999), (2, 3));
    }

    #[test]
    fn test_empty_text() {
        let sf = file("");
        assert!(sf.is_empty());
        assert_eq!(sf.line_count(), 1);
        assert_eq!(sf.line_col_at(0), (1, 1));
    }

    #[test]
    fn test_accessors() {
        let sf = file("export default 1");
        assert_eq!(sf.file_name(), Path::new("/proj/src/mod.ts"));
        assert_eq!(sf.text(), "export default 1");
        assert_eq!(sf.language_version(), ScriptTarget::EsNext);
        assert_eq!(sf.script_kind(), ScriptKind::Ts);
    }

    #[test]
    fn test_script_target_ordering() {
        assert!(ScriptTarget::Es5 < ScriptTarget::Es2015);
        assert!(ScriptTarget::Es2022 < ScriptTarget::EsNext);
        assert_eq!(ScriptTarget::default(), ScriptTarget::EsNext);
    }
}
