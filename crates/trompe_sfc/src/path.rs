//! Composite-path classification.
//!
//! A composite file lives on disk as `Name.vue`. Toward a resolver it may
//! travel as `Name.vue.ts`: the trailing suffix is synthetic, appended only
//! so extension-based dispatch treats the path as a script file. Nothing
//! with that doubled extension is expected to exist physically.

use std::path::{Path, PathBuf};

/// Extension that marks a composite component file.
pub const COMPOSITE_EXTENSION: &str = ".vue";

/// Suffix appended to a composite path to present it as a script file.
pub const SYNTHETIC_SUFFIX: &str = ".ts";

/// Whether the path denotes a composite file, in either its on-disk form
/// (`.vue`) or its synthetic form (`.vue.ts`).
pub fn is_composite_path(path: &Path) -> bool {
    match path.to_str() {
        Some(s) => s.ends_with(COMPOSITE_EXTENSION) || ends_with_synthetic(s),
        None => false,
    }
}

/// Whether the path carries the synthetic `.vue.ts` form.
pub fn has_synthetic_suffix(path: &Path) -> bool {
    path.to_str().map(ends_with_synthetic).unwrap_or(false)
}

/// Strip the synthetic suffix, yielding the on-disk `.vue` path.
///
/// Returns `None` when the path is not in synthetic form.
pub fn strip_synthetic_suffix(path: &Path) -> Option<PathBuf> {
    let s = path.to_str()?;
    let stripped = s.strip_suffix(SYNTHETIC_SUFFIX)?;
    if !stripped.ends_with(COMPOSITE_EXTENSION) {
        return None;
    }
    Some(PathBuf::from(stripped))
}

/// Append the synthetic suffix to a composite path.
///
/// Paths already in synthetic form pass through unchanged; non-composite
/// paths return `None`.
pub fn to_synthetic_path(path: &Path) -> Option<PathBuf> {
    let s = path.to_str()?;
    if ends_with_synthetic(s) {
        return Some(PathBuf::from(s));
    }
    if !s.ends_with(COMPOSITE_EXTENSION) {
        return None;
    }
    Some(PathBuf::from(format!("{s}{SYNTHETIC_SUFFIX}")))
}

#[inline]
fn ends_with_synthetic(s: &str) -> bool {
    s.strip_suffix(SYNTHETIC_SUFFIX)
        .is_some_and(|rest| rest.ends_with(COMPOSITE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_composite_path() {
        assert!(is_composite_path(Path::new("/proj/src/App.vue")));
        assert!(is_composite_path(Path::new("/proj/src/App.vue.ts")));
        assert!(!is_composite_path(Path::new("/proj/src/app.ts")));
        assert!(!is_composite_path(Path::new("/proj/src/vue.ts")));
        assert!(!is_composite_path(Path::new("/proj/src/App.vuets")));
    }

    #[test]
    fn test_has_synthetic_suffix() {
        assert!(has_synthetic_suffix(Path::new("App.vue.ts")));
        assert!(!has_synthetic_suffix(Path::new("App.vue")));
        assert!(!has_synthetic_suffix(Path::new("App.ts")));
    }

    #[test]
    fn test_strip_synthetic_suffix() {
        assert_eq!(
            strip_synthetic_suffix(Path::new("/a/App.vue.ts")),
            Some(PathBuf::from("/a/App.vue"))
        );
        assert_eq!(strip_synthetic_suffix(Path::new("/a/App.vue")), None);
        assert_eq!(strip_synthetic_suffix(Path::new("/a/app.ts")), None);
    }

    #[test]
    fn test_to_synthetic_path() {
        assert_eq!(
            to_synthetic_path(Path::new("/a/App.vue")),
            Some(PathBuf::from("/a/App.vue.ts"))
        );
        assert_eq!(
            to_synthetic_path(Path::new("/a/App.vue.ts")),
            Some(PathBuf::from("/a/App.vue.ts"))
        );
        assert_eq!(to_synthetic_path(Path::new("/a/app.ts")), None);
    }
}
