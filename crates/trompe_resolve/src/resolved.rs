//! Resolution result types.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extension a module can be resolved with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extension {
    Ts,
    Tsx,
    Dts,
    Js,
    Jsx,
}

impl Extension {
    /// Classify a path by its extension.
    ///
    /// `.d.ts` wins over `.ts`; a synthetic `.vue.ts` path classifies as
    /// plain `.ts`. Returns `None` for anything outside the known set.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".d.ts") {
            Some(Self::Dts)
        } else if name.ends_with(".ts") {
            Some(Self::Ts)
        } else if name.ends_with(".tsx") {
            Some(Self::Tsx)
        } else if name.ends_with(".js") {
            Some(Self::Js)
        } else if name.ends_with(".jsx") {
            Some(Self::Jsx)
        } else {
            None
        }
    }

    /// The extension with its leading dot
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => ".ts",
            Self::Tsx => ".tsx",
            Self::Dts => ".d.ts",
            Self::Js => ".js",
            Self::Jsx => ".jsx",
        }
    }

    /// Whether the extension names a TypeScript source.
    pub fn is_typescript(&self) -> bool {
        matches!(self, Self::Ts | Self::Tsx | Self::Dts)
    }
}

/// How a resolution result came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionOrigin {
    /// The resolved path is physically present with the recorded extension
    Real,
    /// The path was manufactured (a virtualized composite file or a
    /// speculative fallback) and carries an assumed extension
    Synthesized,
}

/// A successfully resolved module specifier.
///
/// Absence is not represented here; an unresolved specifier is a `None`
/// slot in the batch result it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModule {
    /// Absolute path the specifier resolved to
    pub resolved_file_name: PathBuf,

    /// Extension the result was resolved with
    pub extension: Extension,

    /// Whether the path is physically present or manufactured
    pub origin: ResolutionOrigin,
}

impl ResolvedModule {
    /// A result backed by a physically present file.
    pub fn real(resolved_file_name: PathBuf, extension: Extension) -> Self {
        Self {
            resolved_file_name,
            extension,
            origin: ResolutionOrigin::Real,
        }
    }

    /// A manufactured result with the assumed script extension.
    pub fn synthesized(resolved_file_name: PathBuf) -> Self {
        Self {
            resolved_file_name,
            extension: Extension::Ts,
            origin: ResolutionOrigin::Synthesized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_path() {
        assert_eq!(Extension::from_path(Path::new("/a/b.ts")), Some(Extension::Ts));
        assert_eq!(Extension::from_path(Path::new("/a/b.tsx")), Some(Extension::Tsx));
        assert_eq!(Extension::from_path(Path::new("/a/b.d.ts")), Some(Extension::Dts));
        assert_eq!(Extension::from_path(Path::new("/a/b.js")), Some(Extension::Js));
        assert_eq!(Extension::from_path(Path::new("/a/b.vue.ts")), Some(Extension::Ts));
        assert_eq!(Extension::from_path(Path::new("/a/b.vue")), None);
        assert_eq!(Extension::from_path(Path::new("/a/b")), None);
    }

    #[test]
    fn test_extension_as_str() {
        assert_eq!(Extension::Dts.as_str(), ".d.ts");
        assert_eq!(Extension::Ts.as_str(), ".ts");
    }
}
