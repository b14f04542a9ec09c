//! Standard module resolution.
//!
//! A TS/Node-flavored lookup: extension probing for relative specifiers,
//! path mappings, base-directory lookup, and a `node_modules` ascent for
//! bare ones. Every probe goes through an injected [`ResolutionHost`], so
//! a caller can answer for paths that are not physically present; that
//! injection point is what makes composite-file virtualization possible
//! upstack.

use crate::options::CompilerOptions;
use crate::paths::{absolutize, normalize_path, resolve_against};
use crate::resolved::{Extension, ResolvedModule};
use std::path::{Path, PathBuf};

/// Extensions probed for a candidate, in priority order.
const EXTENSIONS: [&str; 3] = [".ts", ".tsx", ".d.ts"];

/// Index files probed for a directory candidate, in priority order.
const INDEX_FILES: [&str; 3] = ["index.ts", "index.tsx", "index.d.ts"];

/// package.json fields naming a package entry point, in priority order.
const ENTRY_FIELDS: [&str; 3] = ["types", "typings", "main"];

/// File-system probes resolution runs through.
///
/// Implementations may answer for paths that do not physically exist;
/// that is the point of injecting them.
pub trait ResolutionHost {
    fn file_exists(&self, path: &Path) -> bool;
    fn read_file(&self, path: &Path) -> Option<String>;
}

/// Resolve one module specifier from the importing file.
///
/// Returns `None` when nothing matches; this function never errors and
/// never consults the file system except through `host`.
pub fn resolve_module_name(
    specifier: &str,
    containing_file: &Path,
    options: &CompilerOptions,
    host: &dyn ResolutionHost,
) -> Option<ResolvedModule> {
    let resolver = Resolver { options, host };

    if is_relative_specifier(specifier) {
        let candidate = resolve_against(&containing_dir(containing_file), Path::new(specifier));
        return resolver.resolve_file_or_directory(&candidate);
    }
    if Path::new(specifier).is_absolute() {
        return resolver.resolve_file_or_directory(&absolutize(Path::new(specifier)));
    }
    resolver.resolve_bare(specifier, containing_file)
}

struct Resolver<'a> {
    options: &'a CompilerOptions,
    host: &'a dyn ResolutionHost,
}

impl Resolver<'_> {
    /// Probe a candidate as a file, then as a directory.
    fn resolve_file_or_directory(&self, candidate: &Path) -> Option<ResolvedModule> {
        self.resolve_file(candidate)
            .or_else(|| self.resolve_directory(candidate))
    }

    /// Extension probing for a single candidate path.
    fn resolve_file(&self, candidate: &Path) -> Option<ResolvedModule> {
        let name = candidate.to_str()?;

        // Emitted-JS specifiers retry with their typed counterparts first
        if let Some(stem) = name.strip_suffix(".js").or_else(|| name.strip_suffix(".jsx")) {
            for ext in EXTENSIONS {
                let replaced = PathBuf::from(format!("{stem}{ext}"));
                if self.host.file_exists(&replaced) {
                    return Some(self.found(replaced));
                }
            }
        }

        // A candidate already naming a typed source is taken verbatim.
        // Plain .js/.jsx files are not resolution targets here; their only
        // way in is the typed replacement above.
        if let Some(extension) = Extension::from_path(candidate) {
            if extension.is_typescript() && self.host.file_exists(candidate) {
                return Some(ResolvedModule::real(candidate.to_path_buf(), extension));
            }
        }

        // Append known extensions. Append, never replace: `Child.vue`
        // must probe `Child.vue.ts`.
        for ext in EXTENSIONS {
            let with_ext = PathBuf::from(format!("{name}{ext}"));
            if self.host.file_exists(&with_ext) {
                return Some(self.found(with_ext));
            }
        }
        None
    }

    /// Index-file probing for a directory candidate.
    fn resolve_directory(&self, candidate: &Path) -> Option<ResolvedModule> {
        for index in INDEX_FILES {
            let index_path = candidate.join(index);
            if self.host.file_exists(&index_path) {
                return Some(self.found(index_path));
            }
        }
        None
    }

    /// Non-relative specifiers: path mappings, then the base directory,
    /// then the `node_modules` ascent.
    fn resolve_bare(&self, specifier: &str, containing_file: &Path) -> Option<ResolvedModule> {
        if let Some(resolved) = self.resolve_path_mappings(specifier) {
            return Some(resolved);
        }
        if self.options.base_url.is_some() {
            let candidate = normalize_path(&self.options.effective_base_dir().join(specifier));
            if let Some(resolved) = self.resolve_file_or_directory(&candidate) {
                return Some(resolved);
            }
        }
        self.resolve_node_modules(specifier, containing_file)
    }

    /// Configured path mappings: an exact key first, then single-`*`
    /// patterns with the longest matched prefix winning.
    fn resolve_path_mappings(&self, specifier: &str) -> Option<ResolvedModule> {
        let paths = self.options.paths.as_ref()?;
        let base_dir = self.options.effective_base_dir();

        if let Some(targets) = paths.get(specifier) {
            for target in targets.iter().filter(|t| !t.contains('*')) {
                let candidate = resolve_against(&base_dir, Path::new(target));
                if let Some(resolved) = self.resolve_file_or_directory(&candidate) {
                    return Some(resolved);
                }
            }
        }

        let mut matches: Vec<(&str, &str, &[String])> = Vec::new();
        for (pattern, targets) in paths {
            let Some(star) = pattern.find('*') else {
                continue;
            };
            let prefix = &pattern[..star];
            let suffix = &pattern[star + 1..];
            if specifier.len() >= prefix.len() + suffix.len()
                && specifier.starts_with(prefix)
                && specifier.ends_with(suffix)
            {
                matches.push((prefix, suffix, targets));
            }
        }
        matches.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        for (prefix, suffix, targets) in matches {
            let star_match = &specifier[prefix.len()..specifier.len() - suffix.len()];
            for target in targets {
                let substituted = target.replacen('*', star_match, 1);
                let candidate = resolve_against(&base_dir, Path::new(&substituted));
                if let Some(resolved) = self.resolve_file_or_directory(&candidate) {
                    return Some(resolved);
                }
            }
        }
        None
    }

    /// Walk `node_modules` directories from the importing file upward,
    /// with an `@types` fallback at each level.
    fn resolve_node_modules(
        &self,
        specifier: &str,
        containing_file: &Path,
    ) -> Option<ResolvedModule> {
        let (package_name, subpath) = split_package_specifier(specifier);
        let mut dir = containing_dir(containing_file);

        loop {
            let node_modules = dir.join("node_modules");
            if let Some(resolved) = self.resolve_package(&node_modules.join(package_name), subpath)
            {
                return Some(resolved);
            }
            let types_root = node_modules
                .join("@types")
                .join(types_package_name(package_name));
            if let Some(resolved) = self.resolve_package(&types_root, subpath) {
                return Some(resolved);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Resolve inside one package directory.
    fn resolve_package(&self, package_root: &Path, subpath: Option<&str>) -> Option<ResolvedModule> {
        match subpath {
            Some(subpath) => self.resolve_file_or_directory(&package_root.join(subpath)),
            None => self
                .resolve_package_entry(package_root)
                .or_else(|| self.resolve_directory(package_root)),
        }
    }

    /// package.json entry fields, read through the probes.
    fn resolve_package_entry(&self, package_root: &Path) -> Option<ResolvedModule> {
        let manifest = self.host.read_file(&package_root.join("package.json"))?;
        let manifest: serde_json::Value = serde_json::from_str(&manifest).ok()?;

        for field in ENTRY_FIELDS {
            if let Some(entry) = manifest.get(field).and_then(|v| v.as_str()) {
                let candidate = normalize_path(&package_root.join(entry));
                if let Some(resolved) = self.resolve_file_or_directory(&candidate) {
                    return Some(resolved);
                }
            }
        }
        None
    }

    fn found(&self, path: PathBuf) -> ResolvedModule {
        let extension = Extension::from_path(&path).unwrap_or(Extension::Ts);
        ResolvedModule::real(path, extension)
    }
}

/// Whether a specifier is relative (`.`, `..`, `./x`, `../x`).
fn is_relative_specifier(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Directory of the importing file, absolutized.
fn containing_dir(containing_file: &Path) -> PathBuf {
    absolutize(containing_file.parent().unwrap_or_else(|| Path::new(".")))
}

/// Split a bare specifier into package name and optional subpath; scoped
/// packages keep their scope in the name.
fn split_package_specifier(specifier: &str) -> (&str, Option<&str>) {
    if let Some(rest) = specifier.strip_prefix('@') {
        if let Some(scope_sep) = rest.find('/') {
            let after_scope = &rest[scope_sep + 1..];
            if let Some(name_sep) = after_scope.find('/') {
                let name_len = 1 + scope_sep + 1 + name_sep;
                return (&specifier[..name_len], Some(&specifier[name_len + 1..]));
            }
        }
        return (specifier, None);
    }
    match specifier.split_once('/') {
        Some((name, sub)) => (name, Some(sub)),
        None => (specifier, None),
    }
}

/// `@types` package name for a dependency, with scopes mangled the way
/// DefinitelyTyped publishes them.
fn types_package_name(package_name: &str) -> String {
    match package_name.strip_prefix('@') {
        Some(rest) => rest.replace('/', "__"),
        None => package_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PathMap;
    use crate::resolved::ResolutionOrigin;
    use rustc_hash::FxHashMap;

    struct FakeHost {
        files: FxHashMap<PathBuf, String>,
    }

    impl FakeHost {
        fn new(paths: &[&str]) -> Self {
            let mut files = FxHashMap::default();
            for path in paths {
                files.insert(PathBuf::from(path), String::new());
            }
            Self { files }
        }

        fn with_content(mut self, path: &str, content: &str) -> Self {
            self.files.insert(PathBuf::from(path), content.to_string());
            self
        }
    }

    impl ResolutionHost for FakeHost {
        fn file_exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }

        fn read_file(&self, path: &Path) -> Option<String> {
            self.files.get(path).cloned()
        }
    }

    fn options() -> CompilerOptions {
        CompilerOptions::with_project_root("/proj")
    }

    #[test]
    fn test_relative_extension_probing() {
        let host = FakeHost::new(&["/proj/src/child.ts"]);
        let resolved =
            resolve_module_name("./child", Path::new("/proj/src/App.vue.ts"), &options(), &host)
                .unwrap();

        assert_eq!(resolved.resolved_file_name, PathBuf::from("/proj/src/child.ts"));
        assert_eq!(resolved.extension, Extension::Ts);
        assert_eq!(resolved.origin, ResolutionOrigin::Real);
    }

    #[test]
    fn test_relative_with_explicit_extension() {
        let host = FakeHost::new(&["/proj/src/child.tsx"]);
        let resolved =
            resolve_module_name("./child.tsx", Path::new("/proj/src/main.ts"), &options(), &host)
                .unwrap();
        assert_eq!(resolved.extension, Extension::Tsx);
    }

    #[test]
    fn test_js_specifier_prefers_typed_source() {
        let host = FakeHost::new(&["/proj/src/util.ts", "/proj/src/util.js"]);
        let resolved =
            resolve_module_name("./util.js", Path::new("/proj/src/main.ts"), &options(), &host)
                .unwrap();
        assert_eq!(resolved.resolved_file_name, PathBuf::from("/proj/src/util.ts"));
    }

    #[test]
    fn test_plain_js_file_is_not_a_target() {
        let host = FakeHost::new(&["/proj/src/legacy.js"]);
        assert!(resolve_module_name(
            "./legacy.js",
            Path::new("/proj/src/main.ts"),
            &options(),
            &host
        )
        .is_none());
    }

    #[test]
    fn test_directory_index_probing() {
        let host = FakeHost::new(&["/proj/src/widgets/index.ts"]);
        let resolved =
            resolve_module_name("./widgets", Path::new("/proj/src/main.ts"), &options(), &host)
                .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/src/widgets/index.ts")
        );
    }

    #[test]
    fn test_extension_appended_to_composite_specifier() {
        // The suffixed form "exists" as far as the probes are concerned;
        // appending (not replacing) is what makes this reachable.
        let host = FakeHost::new(&["/proj/src/Child.vue.ts"]);
        let resolved = resolve_module_name(
            "./Child.vue",
            Path::new("/proj/src/App.vue.ts"),
            &options(),
            &host,
        )
        .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/src/Child.vue.ts")
        );
        assert_eq!(resolved.extension, Extension::Ts);
    }

    #[test]
    fn test_path_mapping() {
        let mut opts = options();
        let mut paths = PathMap::new();
        paths.insert("@/*".to_string(), vec!["src/*".to_string()]);
        opts.paths = Some(paths);

        let host = FakeHost::new(&["/proj/src/utils/helper.ts"]);
        let resolved = resolve_module_name(
            "@/utils/helper",
            Path::new("/proj/src/App.vue.ts"),
            &opts,
            &host,
        )
        .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/src/utils/helper.ts")
        );
    }

    #[test]
    fn test_path_mapping_longest_prefix_wins() {
        let mut opts = options();
        let mut paths = PathMap::new();
        paths.insert("@/*".to_string(), vec!["src/*".to_string()]);
        paths.insert("@/gen/*".to_string(), vec!["generated/*".to_string()]);
        opts.paths = Some(paths);

        let host = FakeHost::new(&["/proj/generated/api.ts", "/proj/src/gen/api.ts"]);
        let resolved =
            resolve_module_name("@/gen/api", Path::new("/proj/src/main.ts"), &opts, &host).unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/generated/api.ts")
        );
    }

    #[test]
    fn test_exact_path_mapping_key() {
        let mut opts = options();
        let mut paths = PathMap::new();
        paths.insert("config".to_string(), vec!["src/config.ts".to_string()]);
        opts.paths = Some(paths);

        let host = FakeHost::new(&["/proj/src/config.ts"]);
        let resolved =
            resolve_module_name("config", Path::new("/proj/src/main.ts"), &opts, &host).unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/src/config.ts")
        );
    }

    #[test]
    fn test_base_url_lookup() {
        let mut opts = options();
        opts.base_url = Some(PathBuf::from("."));

        let host = FakeHost::new(&["/proj/lib/math.ts"]);
        let resolved =
            resolve_module_name("lib/math", Path::new("/proj/src/main.ts"), &opts, &host).unwrap();
        assert_eq!(resolved.resolved_file_name, PathBuf::from("/proj/lib/math.ts"));
    }

    #[test]
    fn test_node_modules_entry_fields() {
        let host = FakeHost::new(&["/proj/node_modules/left-pad/lib/index.d.ts"]).with_content(
            "/proj/node_modules/left-pad/package.json",
            r#"{ "main": "lib/index.js", "types": "lib/index.d.ts" }"#,
        );
        let resolved = resolve_module_name(
            "left-pad",
            Path::new("/proj/src/deep/mod.ts"),
            &options(),
            &host,
        )
        .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/node_modules/left-pad/lib/index.d.ts")
        );
        assert_eq!(resolved.extension, Extension::Dts);
    }

    #[test]
    fn test_node_modules_package_subpath() {
        let host = FakeHost::new(&["/proj/node_modules/lodash/fp.d.ts"]);
        let resolved = resolve_module_name(
            "lodash/fp",
            Path::new("/proj/src/main.ts"),
            &options(),
            &host,
        )
        .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/node_modules/lodash/fp.d.ts")
        );
    }

    #[test]
    fn test_types_package_fallback() {
        let host = FakeHost::new(&["/proj/node_modules/@types/lodash/index.d.ts"]);
        let resolved = resolve_module_name(
            "lodash",
            Path::new("/proj/src/main.ts"),
            &options(),
            &host,
        )
        .unwrap();
        assert_eq!(
            resolved.resolved_file_name,
            PathBuf::from("/proj/node_modules/@types/lodash/index.d.ts")
        );
    }

    #[test]
    fn test_scoped_package_split() {
        assert_eq!(split_package_specifier("@scope/pkg"), ("@scope/pkg", None));
        assert_eq!(
            split_package_specifier("@scope/pkg/sub/path"),
            ("@scope/pkg", Some("sub/path"))
        );
        assert_eq!(split_package_specifier("pkg"), ("pkg", None));
        assert_eq!(split_package_specifier("pkg/sub"), ("pkg", Some("sub")));
    }

    #[test]
    fn test_scoped_types_name() {
        assert_eq!(types_package_name("@scope/pkg"), "scope__pkg");
        assert_eq!(types_package_name("pkg"), "pkg");
    }

    #[test]
    fn test_unresolvable_returns_none() {
        let host = FakeHost::new(&[]);
        assert!(resolve_module_name(
            "./missing",
            Path::new("/proj/src/main.ts"),
            &options(),
            &host
        )
        .is_none());
        assert!(resolve_module_name(
            "missing-lib",
            Path::new("/proj/src/main.ts"),
            &options(),
            &host
        )
        .is_none());
    }
}
