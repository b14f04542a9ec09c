//! Lexical path arithmetic.
//!
//! Resolution computes candidate paths that need not exist yet, so all
//! normalization here stays lexical: `.` and `..` components collapse
//! without touching the file system.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without consulting the file system.
///
/// Intended for already-absolute inputs; a `..` at the start of a relative
/// path is dropped, the same way a `..` at the root is.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = path.components().peekable();
    let mut out = if let Some(c @ Component::Prefix(..)) = components.peek().copied() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) => unreachable!(),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(c) => out.push(c),
        }
    }
    out
}

/// Resolve a path against the process working directory and normalize.
///
/// Absolute inputs pass straight through normalization.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&cwd.join(path)),
        Err(_) => normalize_path(path),
    }
}

/// Resolve a path against a base directory and normalize.
///
/// An absolute `path` wins over the base; a relative base is itself
/// resolved from the working directory first.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    absolutize(&base.join(path))
}
