//! The composite-aware compiler host decorator.
//!
//! [`SfcHost`] wraps any [`CompilerHost`] and upgrades two of its
//! operations: source loading virtualizes composite component files into
//! their embedded scripts, and module resolution layers an alias/relative
//! fallback over standard resolution run with composite-aware probes.
//! Everything else passes through to the delegate untouched.

use crate::host::CompilerHost;
use crate::loader::load_composite_source;
use crate::source_file::{ScriptTarget, SourceFile};
use std::path::Path;
use trompe_resolve::{
    resolve_module_name, AliasTable, CompilerOptions, ResolutionHost, ResolvedModule,
};
use trompe_sfc::{is_composite_path, strip_synthetic_suffix, PadOption};

/// Decorator adding composite-file support to a delegate host.
///
/// Construction is explicit composition: the delegate is captured behind
/// a box, the alias table is derived from the options once, and the
/// decorated operations close over both.
pub struct SfcHost {
    delegate: Box<dyn CompilerHost>,
    options: CompilerOptions,
    aliases: AliasTable,
    pad: PadOption,
}

impl SfcHost {
    pub fn new(delegate: Box<dyn CompilerHost>, options: CompilerOptions) -> Self {
        let aliases = AliasTable::from_options(&options);
        Self {
            delegate,
            options,
            aliases,
            pad: PadOption::default(),
        }
    }

    /// Pad extracted script content so positions reported against it line
    /// up with the container source. Off by default; the default output
    /// is the exact inner text of the script block.
    pub fn pad(mut self, pad: PadOption) -> Self {
        self.pad = pad;
        self
    }

    /// The options this host was constructed with.
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Resolve a batch of import specifiers found in `containing_file`.
    ///
    /// The result has exactly one slot per specifier, in input order. A
    /// `None` slot marks a specifier left deliberately unresolved for the
    /// driver to diagnose; this method itself never fails.
    pub fn resolve_module_names<S: AsRef<str>>(
        &self,
        specifiers: &[S],
        containing_file: &Path,
    ) -> Vec<Option<ResolvedModule>> {
        let probes = CompositeProbes {
            host: self.delegate.as_ref(),
        };
        specifiers
            .iter()
            .map(|specifier| self.resolve_one(specifier.as_ref(), containing_file, &probes))
            .collect()
    }

    fn resolve_one(
        &self,
        specifier: &str,
        containing_file: &Path,
        probes: &CompositeProbes<'_>,
    ) -> Option<ResolvedModule> {
        if let Some(resolved) = resolve_module_name(specifier, containing_file, &self.options, probes)
        {
            return Some(self.canonicalize(resolved));
        }

        let fallback = self.aliases.fallback_path(specifier, containing_file);
        tracing::debug!("fallback resolution for {}: {}", specifier, fallback.display());

        if is_composite_path(Path::new(specifier)) {
            return Some(ResolvedModule::synthesized(fallback));
        }
        if self.delegate.file_exists(&fallback) {
            // A real non-script asset; the project supplies a declaration
            // for it elsewhere, so the slot stays unresolved
            tracing::debug!("{} exists, leaving {} unresolved", fallback.display(), specifier);
            return None;
        }
        // Speculative: assume a script will exist at the computed path and
        // let downstream diagnostics surface the real problem
        Some(ResolvedModule::synthesized(fallback))
    }

    /// Strip a synthetic suffix whose suffixed form is not physically
    /// present, so the recorded path points at the real composite file.
    fn canonicalize(&self, resolved: ResolvedModule) -> ResolvedModule {
        match strip_synthetic_suffix(&resolved.resolved_file_name) {
            Some(stripped) if !self.delegate.file_exists(&resolved.resolved_file_name) => {
                ResolvedModule::synthesized(stripped)
            }
            _ => resolved,
        }
    }
}

impl CompilerHost for SfcHost {
    fn get_source_file(
        &self,
        path: &Path,
        language_version: ScriptTarget,
        on_error: &mut dyn FnMut(&str),
    ) -> Option<SourceFile> {
        if is_composite_path(path) {
            return Some(load_composite_source(self.delegate.as_ref(), path, self.pad));
        }
        self.delegate.get_source_file(path, language_version, on_error)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.delegate.file_exists(path)
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        self.delegate.read_file(path)
    }
}

/// Resolution probes that report a composite file as present under its
/// synthetic script name.
struct CompositeProbes<'a> {
    host: &'a dyn CompilerHost,
}

impl ResolutionHost for CompositeProbes<'_> {
    fn file_exists(&self, path: &Path) -> bool {
        if let Some(stripped) = strip_synthetic_suffix(path) {
            return self.host.file_exists(&stripped) || self.host.file_exists(path);
        }
        self.host.file_exists(path)
    }

    fn read_file(&self, path: &Path) -> Option<String> {
        if let Some(stripped) = strip_synthetic_suffix(path) {
            if !self.host.file_exists(path) {
                return self.host.read_file(&stripped);
            }
        }
        self.host.read_file(path)
    }
}
