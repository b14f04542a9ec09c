//! Compiler options consumed by resolution.
//!
//! Options are an immutable value handed to the hooks at construction
//! time; nothing here is read from ambient process state. The
//! resolution-relevant subset of a `tsconfig.json` can be loaded directly,
//! with graceful degradation for drivers that do not care whether the
//! file is present.

use crate::paths::{absolutize, resolve_against};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path-mapping table: wildcard pattern to ordered substitution targets.
///
/// Ordered keys keep wildcard derivation deterministic; the target list
/// order is load-bearing ("first configured destination" is positional).
pub type PathMap = BTreeMap<String, Vec<String>>;

/// Resolution-relevant compiler options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Base directory non-relative specifiers are resolved against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<PathBuf>,

    /// Path-mapping table (`"@/*": ["src/*"]` style)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMap>,

    /// Project root; the effective base directory when `base_url` is
    /// unset. Not part of the serialized form: when loading from a
    /// tsconfig it is the file's directory.
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            paths: None,
            project_root: PathBuf::from("."),
        }
    }
}

impl CompilerOptions {
    /// Options with an explicit project root and nothing else configured.
    pub fn with_project_root(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            ..Default::default()
        }
    }

    /// The directory non-relative lookups and alias substitutions resolve
    /// against: `base_url` when configured (itself resolved from the
    /// project root), otherwise the project root.
    pub fn effective_base_dir(&self) -> PathBuf {
        match &self.base_url {
            Some(base) => resolve_against(&self.project_root, base),
            None => absolutize(&self.project_root),
        }
    }

    /// Load the resolution-relevant subset of a `tsconfig.json`-style
    /// file. The project root becomes the file's directory.
    pub fn from_tsconfig_file(path: &Path) -> Result<Self, TsconfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: serde_json::Value = serde_json::from_str(&content)?;

        let mut options = match config.get("compilerOptions") {
            Some(compiler_options) => serde_json::from_value(compiler_options.clone())?,
            None => Self::default(),
        };
        options.project_root = root_for(path);
        Ok(options)
    }

    /// Like [`from_tsconfig_file`](Self::from_tsconfig_file), but a
    /// missing or malformed file degrades to defaults rooted at the
    /// file's directory, with a warning.
    pub fn from_tsconfig_file_or_default(path: &Path) -> Self {
        match Self::from_tsconfig_file(path) {
            Ok(options) => options,
            Err(err) => {
                tracing::warn!(
                    "failed to load {}: {}; using default compiler options",
                    path.display(),
                    err
                );
                Self::with_project_root(root_for(path))
            }
        }
    }
}

/// The directory a config file governs.
fn root_for(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Error loading compiler options from a tsconfig-style file.
#[derive(Debug, Error)]
pub enum TsconfigError {
    #[error("failed to read tsconfig: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tsconfig: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_tsconfig(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("tsconfig.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_tsconfig() {
        let dir = TempDir::new().unwrap();
        let path = write_tsconfig(
            &dir,
            r#"{
                "compilerOptions": {
                    "strict": true,
                    "baseUrl": ".",
                    "paths": { "@/*": ["src/*"] }
                }
            }"#,
        );

        let options = CompilerOptions::from_tsconfig_file(&path).unwrap();
        assert_eq!(options.base_url, Some(PathBuf::from(".")));
        assert_eq!(options.project_root, dir.path());
        let paths = options.paths.unwrap();
        assert_eq!(paths.get("@/*").unwrap(), &vec!["src/*".to_string()]);
    }

    #[test]
    fn test_load_tsconfig_without_compiler_options() {
        let dir = TempDir::new().unwrap();
        let path = write_tsconfig(&dir, "{}");

        let options = CompilerOptions::from_tsconfig_file(&path).unwrap();
        assert_eq!(options.base_url, None);
        assert_eq!(options.paths, None);
        assert_eq!(options.project_root, dir.path());
    }

    #[test]
    fn test_malformed_tsconfig_errors() {
        let dir = TempDir::new().unwrap();
        let path = write_tsconfig(&dir, "not json at all");

        let err = CompilerOptions::from_tsconfig_file(&path).unwrap_err();
        assert!(matches!(err, TsconfigError::Json(_)));
    }

    #[test]
    fn test_degradation_keeps_project_root() {
        let dir = TempDir::new().unwrap();
        let path = write_tsconfig(&dir, "not json at all");

        let options = CompilerOptions::from_tsconfig_file_or_default(&path);
        assert_eq!(options.base_url, None);
        assert_eq!(options.project_root, dir.path());
    }

    #[test]
    fn test_missing_tsconfig_degrades() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tsconfig.json");

        let options = CompilerOptions::from_tsconfig_file_or_default(&path);
        assert_eq!(options.project_root, dir.path());
    }

    #[test]
    fn test_effective_base_dir() {
        let options = CompilerOptions::with_project_root("/proj");
        assert_eq!(options.effective_base_dir(), PathBuf::from("/proj"));

        let mut options = CompilerOptions::with_project_root("/proj");
        options.base_url = Some(PathBuf::from("sub"));
        assert_eq!(options.effective_base_dir(), PathBuf::from("/proj/sub"));

        let mut options = CompilerOptions::with_project_root("/proj");
        options.base_url = Some(PathBuf::from("/abs"));
        assert_eq!(options.effective_base_dir(), PathBuf::from("/abs"));
    }
}
