//! The host seam between a type checker driver and the file system.
//!
//! Drivers program against [`CompilerHost`]; [`SystemHost`] is the plain
//! disk-backed implementation and the usual delegate for decoration.

use crate::source_file::{ScriptTarget, SourceFile};
use std::fs;
use std::path::Path;
use trompe_sfc::ScriptKind;

/// File loading and probing operations a checker driver needs.
///
/// Object safe on purpose: hosts get stacked, and a decorator holds its
/// delegate as `Box<dyn CompilerHost>`.
pub trait CompilerHost {
    /// Load `path` as a source file at the requested language version.
    ///
    /// Returns `None` when no file can be produced; implementations
    /// report the reason through `on_error` instead of panicking.
    fn get_source_file(
        &self,
        path: &Path,
        language_version: ScriptTarget,
        on_error: &mut dyn FnMut(&str),
    ) -> Option<SourceFile>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Read a file's text. `None` covers both absence and read failure.
    fn read_file(&self, path: &Path) -> Option<String>;
}

/// Host backed directly by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl CompilerHost for SystemHost {
    fn get_source_file(
        &self,
        path: &Path,
        language_version: ScriptTarget,
        on_error: &mut dyn FnMut(&str),
    ) -> Option<SourceFile> {
        match fs::read_to_string(path) {
            Ok(text) => Some(SourceFile::new(
                path.to_path_buf(),
                text,
                language_version,
                ScriptKind::from_path(path),
            )),
            Err(err) => {
                on_error(&format!("cannot read {}: {}", path.display(), err));
                None
            }
        }
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_loads_file_with_kind_from_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "mod.tsx", "export const x = 1\n");

        let host = SystemHost::new();
        let sf = host
            .get_source_file(&path, ScriptTarget::EsNext, &mut |_| {})
            .unwrap();

        assert_eq!(sf.text(), "export const x = 1\n");
        assert_eq!(sf.script_kind(), ScriptKind::Tsx);
        assert_eq!(sf.file_name(), path.as_path());
    }

    #[test]
    fn test_missing_file_reports_through_callback() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.ts");

        let host = SystemHost::new();
        let mut messages = Vec::new();
        let sf = host.get_source_file(&missing, ScriptTarget::EsNext, &mut |message| {
            messages.push(message.to_string());
        });

        assert!(sf.is_none());
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("nope.ts"));
    }

    #[test]
    fn test_probes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "present.ts", "x");

        let host = SystemHost::new();
        assert!(host.file_exists(&path));
        assert!(!host.file_exists(&dir.path().join("absent.ts")));
        assert_eq!(host.read_file(&path).as_deref(), Some("x"));
        assert_eq!(host.read_file(&dir.path().join("absent.ts")), None);
    }
}
