//! Composite-file type definitions.
//!
//! Zero-copy design using borrowed strings so parsing a container never
//! allocates for the common case.

use crate::script_kind::ScriptKind;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

/// Parsed result of a composite component file.
///
/// Only the script region is materialized; markup and style regions are
/// scanned for their extent and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcDescriptor<'a> {
    /// Filename the source was read from
    #[serde(borrow)]
    pub filename: Cow<'a, str>,

    /// Full container source
    #[serde(borrow)]
    pub source: Cow<'a, str>,

    /// The single script block, when present
    pub script: Option<SfcScriptBlock<'a>>,
}

impl<'a> Default for SfcDescriptor<'a> {
    fn default() -> Self {
        Self {
            filename: Cow::Borrowed(""),
            source: Cow::Borrowed(""),
            script: None,
        }
    }
}

impl<'a> SfcDescriptor<'a> {
    /// The script block together with its mapped syntax kind, or `None`
    /// when the block is absent, unlabeled, or tagged with a language
    /// outside the accepted js/jsx/ts/tsx set.
    pub fn recognized_script(&self) -> Option<(&SfcScriptBlock<'a>, ScriptKind)> {
        let script = self.script.as_ref()?;
        let kind = script.script_kind()?;
        Some((script, kind))
    }

    /// Convert to owned version (for serialization or storage)
    pub fn into_owned(self) -> SfcDescriptor<'static> {
        SfcDescriptor {
            filename: Cow::Owned(self.filename.into_owned()),
            source: Cow::Owned(self.source.into_owned()),
            script: self.script.map(|s| s.into_owned()),
        }
    }
}

/// Script block extracted from a composite file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SfcScriptBlock<'a> {
    /// Block content, exclusive of the surrounding tags
    #[serde(borrow)]
    pub content: Cow<'a, str>,

    /// Block location in the container source
    pub loc: BlockLocation,

    /// Declared script language, verbatim from the `lang` attribute
    #[serde(default, borrow)]
    pub lang: Option<Cow<'a, str>>,

    /// Additional attributes on the opening tag
    #[serde(default)]
    pub attrs: FxHashMap<Cow<'a, str>, Cow<'a, str>>,
}

impl<'a> SfcScriptBlock<'a> {
    /// Map the declared language to a syntax kind.
    ///
    /// Unlabeled blocks and unrecognized tags yield `None`; callers treat
    /// both the same as an absent script.
    pub fn script_kind(&self) -> Option<ScriptKind> {
        ScriptKind::from_lang(self.lang.as_deref()?)
    }

    /// Convert to owned version
    pub fn into_owned(self) -> SfcScriptBlock<'static> {
        SfcScriptBlock {
            content: Cow::Owned(self.content.into_owned()),
            loc: self.loc,
            lang: self.lang.map(|s| Cow::Owned(s.into_owned())),
            attrs: self
                .attrs
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k.into_owned()), Cow::Owned(v.into_owned())))
                .collect(),
        }
    }
}

/// Location information for a block.
///
/// `start`/`start_line`/`start_column` describe the first byte of the
/// block content (not the opening tag), so padding and diagnostic
/// remapping can be derived from them directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockLocation {
    /// Content start offset in source
    pub start: usize,

    /// Content end offset in source
    pub end: usize,

    /// Content start line (1-based)
    pub start_line: usize,

    /// Content start column (1-based)
    pub start_column: usize,

    /// Content end line (1-based)
    pub end_line: usize,

    /// Content end column (1-based)
    pub end_column: usize,
}

/// Parse options for a composite file
#[derive(Debug, Clone, Default)]
pub struct SfcParseOptions {
    /// Filename recorded on the descriptor
    pub filename: String,

    /// Pad extracted script content so its positions line up with the
    /// container source
    pub pad: PadOption,
}

/// Padding applied to extracted block content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PadOption {
    /// No padding; content is the exact inner text
    #[default]
    None,
    /// Prefix one newline per container line preceding the block, so line
    /// numbers reported against the extracted content match the container
    Line,
    /// Replace everything preceding the block with whitespace of the same
    /// shape, so both line and column positions match the container
    Space,
}

/// Error raised by the container parser.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct SfcError {
    /// Human-readable message
    pub message: String,

    /// Stable machine-readable code
    #[serde(default)]
    pub code: Option<String>,

    /// Location of the offending block, when known
    #[serde(default)]
    pub loc: Option<BlockLocation>,
}

impl SfcError {
    pub(crate) fn new(message: impl Into<String>, code: &str, loc: Option<BlockLocation>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
            loc,
        }
    }
}
