//! # trompe_sfc
//!
//! Composite-container grammar for Trompe.
//!
//! A composite component file carries markup, script, and style regions in
//! one container. This crate parses the container just far enough to lift
//! out the single script region, classify its declared language, and
//! recognize composite paths in both their on-disk (`.vue`) and synthetic
//! (`.vue.ts`) forms. It never parses the script content itself; that text
//! is handed to the consumer verbatim.

mod parse;
mod path;
mod script_kind;
mod types;

pub use parse::parse_sfc;
pub use path::{
    has_synthetic_suffix, is_composite_path, strip_synthetic_suffix, to_synthetic_path,
    COMPOSITE_EXTENSION, SYNTHETIC_SUFFIX,
};
pub use script_kind::ScriptKind;
pub use types::{
    BlockLocation, PadOption, SfcDescriptor, SfcError, SfcParseOptions, SfcScriptBlock,
};
