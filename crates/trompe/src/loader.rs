//! Composite source loading.
//!
//! Answers `get_source_file` for composite paths. Extraction failures
//! never escape this boundary: an unreadable, malformed, or script-less
//! container loads as an empty file, and the checker sees a module with
//! no exports instead of a hard error.

use crate::host::CompilerHost;
use crate::source_file::{ScriptTarget, SourceFile};
use std::path::Path;
use trompe_sfc::{parse_sfc, PadOption, ScriptKind, SfcParseOptions};

/// Synthesize the source file for a composite path.
///
/// The requested path is read through the delegate verbatim; resolution
/// may have handed out a suffixed synthetic name, and the delegate
/// answers for what is physically present. Synthesized sources are
/// always parsed at the latest language version.
pub(crate) fn load_composite_source(
    delegate: &dyn CompilerHost,
    path: &Path,
    pad: PadOption,
) -> SourceFile {
    let (text, script_kind) = match extract_script(delegate, path, pad) {
        Some(extracted) => extracted,
        None => (String::new(), ScriptKind::Js),
    };
    SourceFile::new(path.to_path_buf(), text, ScriptTarget::EsNext, script_kind)
}

/// The script text and kind, or `None` when the container is unreadable,
/// malformed, or carries no recognized script block.
fn extract_script(
    delegate: &dyn CompilerHost,
    path: &Path,
    pad: PadOption,
) -> Option<(String, ScriptKind)> {
    let source = delegate.read_file(path)?;
    let options = SfcParseOptions {
        filename: path.display().to_string(),
        pad,
    };
    let descriptor = match parse_sfc(&source, options) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            tracing::debug!("container parse failed for {}: {}", path.display(), err);
            return None;
        }
    };
    let (script, script_kind) = descriptor.recognized_script()?;
    Some((script.content.to_string(), script_kind))
}
