//! Wildcard alias fallback.
//!
//! When standard resolution misses, a specifier gets one more chance: a
//! single-character wildcard prefix (default `@`) substitutes a source
//! directory, relative specifiers resolve against the importing file, and
//! anything else resolves from the working directory.

use crate::options::CompilerOptions;
use crate::paths::{absolutize, resolve_against};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

/// Substitution directory assumed when a wildcard has no configured
/// `<wildcard>/*` target, and the target of the default `@` rule.
const DEFAULT_SUBSTITUTION: &str = "src";

/// Alias rules derived once from a compiler-options value.
///
/// A wildcard is the first character of a path-mapping key, excluding the
/// relative and absolute markers (`.` and `/`). With no mapping table at
/// all, the single default rule `@` -> `src` applies; an empty table
/// yields no rules.
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Wildcard symbol to substitution directory (trailing `*` stripped)
    rules: FxHashMap<char, String>,
    /// Effective base directory all substitutions resolve against
    base_dir: PathBuf,
}

impl AliasTable {
    /// Derive the alias rules from the options' path-mapping table.
    pub fn from_options(options: &CompilerOptions) -> Self {
        let base_dir = options.effective_base_dir();
        let mut rules: FxHashMap<char, String> = FxHashMap::default();

        match &options.paths {
            Some(paths) => {
                for key in paths.keys() {
                    let Some(symbol) = key.chars().next() else {
                        continue;
                    };
                    if matches!(symbol, '.' | '/') {
                        continue;
                    }
                    let substitution = paths
                        .get(&format!("{symbol}/*"))
                        .and_then(|targets| targets.first())
                        .map(|target| target.trim_end_matches('*').to_string())
                        .unwrap_or_else(|| DEFAULT_SUBSTITUTION.to_string());
                    rules.insert(symbol, substitution);
                }
            }
            None => {
                rules.insert('@', DEFAULT_SUBSTITUTION.to_string());
            }
        }

        Self { rules, base_dir }
    }

    /// Whether a wildcard symbol has a rule.
    pub fn has_wildcard(&self, symbol: char) -> bool {
        self.rules.contains_key(&symbol)
    }

    /// The directory alias substitutions resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Best-effort absolute path for a specifier that standard resolution
    /// could not place.
    pub fn fallback_path(&self, specifier: &str, containing_file: &Path) -> PathBuf {
        if let Some((substitution, remainder)) = self.match_wildcard(specifier) {
            return resolve_against(&self.base_dir, &Path::new(substitution).join(remainder));
        }
        if specifier.starts_with('.') {
            let dir = containing_file.parent().unwrap_or_else(|| Path::new("."));
            return resolve_against(dir, Path::new(specifier));
        }
        // Bare or absolute names outside the alias rules resolve from the
        // working directory, a deliberately permissive fallback
        absolutize(Path::new(specifier))
    }

    /// A specifier matches a wildcard when its first two characters are
    /// the symbol followed by '/'. Returns the substitution and the
    /// remainder after the separator.
    fn match_wildcard<'s>(&self, specifier: &'s str) -> Option<(&str, &'s str)> {
        let mut chars = specifier.chars();
        let symbol = chars.next()?;
        if chars.next() != Some('/') {
            return None;
        }
        let substitution = self.rules.get(&symbol)?;
        Some((substitution.as_str(), &specifier[symbol.len_utf8() + 1..]))
    }
}
