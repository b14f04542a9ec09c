//! Script syntax kinds.

use serde::{Deserialize, Serialize};

/// Syntax kind of a script region or plain source file.
///
/// The accepted set is closed: plain script, typed script, and their
/// JSX-flavored variants. Anything else is not a script kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// Plain script, also the fallback for absent or unlabeled blocks
    #[default]
    Js,
    /// Plain script with JSX
    Jsx,
    /// Typed script
    Ts,
    /// Typed script with JSX
    Tsx,
}

impl ScriptKind {
    /// Map a declared `lang` tag to a kind, case-insensitively.
    ///
    /// Returns `None` for anything outside the accepted set; callers
    /// decide whether that means "reject the block" or "fall back".
    pub fn from_lang(lang: &str) -> Option<Self> {
        if lang.eq_ignore_ascii_case("js") {
            Some(Self::Js)
        } else if lang.eq_ignore_ascii_case("jsx") {
            Some(Self::Jsx)
        } else if lang.eq_ignore_ascii_case("ts") {
            Some(Self::Ts)
        } else if lang.eq_ignore_ascii_case("tsx") {
            Some(Self::Tsx)
        } else {
            None
        }
    }

    /// Infer a kind from a plain file path's extension, defaulting to
    /// plain script for anything unrecognized.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ts") => Self::Ts,
            Some(ext) if ext.eq_ignore_ascii_case("tsx") => Self::Tsx,
            Some(ext) if ext.eq_ignore_ascii_case("jsx") => Self::Jsx,
            _ => Self::Js,
        }
    }

    /// Canonical lowercase tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Js => "js",
            Self::Jsx => "jsx",
            Self::Ts => "ts",
            Self::Tsx => "tsx",
        }
    }

    /// Whether this kind is one of the typed variants
    pub fn is_typed(&self) -> bool {
        matches!(self, Self::Ts | Self::Tsx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_lang_accepted_set() {
        assert_eq!(ScriptKind::from_lang("js"), Some(ScriptKind::Js));
        assert_eq!(ScriptKind::from_lang("jsx"), Some(ScriptKind::Jsx));
        assert_eq!(ScriptKind::from_lang("ts"), Some(ScriptKind::Ts));
        assert_eq!(ScriptKind::from_lang("tsx"), Some(ScriptKind::Tsx));
        assert_eq!(ScriptKind::from_lang("TS"), Some(ScriptKind::Ts));
    }

    #[test]
    fn test_from_lang_rejects_everything_else() {
        assert_eq!(ScriptKind::from_lang("coffee"), None);
        assert_eq!(ScriptKind::from_lang("typescript"), None);
        assert_eq!(ScriptKind::from_lang(""), None);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(ScriptKind::from_path(Path::new("a/b.ts")), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_path(Path::new("b.tsx")), ScriptKind::Tsx);
        assert_eq!(ScriptKind::from_path(Path::new("c.jsx")), ScriptKind::Jsx);
        assert_eq!(ScriptKind::from_path(Path::new("d.js")), ScriptKind::Js);
        assert_eq!(ScriptKind::from_path(Path::new("e.mjs")), ScriptKind::Js);
        assert_eq!(ScriptKind::from_path(Path::new("no_ext")), ScriptKind::Js);
    }
}
