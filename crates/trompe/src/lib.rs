//! # trompe
//!
//! Trompe - Compiler host virtualization for composite component files.
//!
//! ## Name Origin
//!
//! **Trompe** comes from *trompe-l'œil* (/tʁɔ̃p.lœj/), the French painting
//! technique that renders a flat surface so convincingly that the eye
//! accepts it as real depth. `trompe` plays the same trick on a type
//! checker: composite component files are presented so convincingly as
//! plain script modules that the checker never notices the markup and
//! styling wrapped around them.
//!
//! ## Purpose
//!
//! A checker driver hands `trompe` its compiler host and gets the same
//! host back with two operations upgraded:
//!
//! - **Source loading**: requests for composite paths synthesize a source
//!   file holding exactly the embedded script block, or an empty file
//!   when no usable script exists
//! - **Module resolution**: batches of import specifiers run through the
//!   standard algorithm with composite-aware probes, then through an
//!   alias/relative fallback that answers with an explicit absence marker
//!   instead of an error
//!
//! ## Architecture
//!
//! ```text
//!      checker driver
//!           ↓
//!        SfcHost (decorator)  ← this crate
//!        ↓      ↓
//! trompe_sfc  trompe_resolve
//! (container  (standard + fallback
//!  grammar)    resolution)
//!           ↓
//!   delegate CompilerHost (disk, overlay, ...)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use trompe::{CompilerHost, CompilerOptions, ScriptTarget, SfcHost, SystemHost};
//!
//! let options = CompilerOptions::with_project_root("/proj");
//! let host = SfcHost::new(Box::new(SystemHost::new()), options);
//!
//! let source = host.get_source_file(
//!     Path::new("/proj/src/App.vue"),
//!     ScriptTarget::EsNext,
//!     &mut |message| eprintln!("{}", message),
//! );
//! let resolved = host.resolve_module_names(
//!     &["./Child.vue", "@/utils/helper"],
//!     Path::new("/proj/src/App.vue"),
//! );
//! # let _ = (source, resolved);
//! ```

mod host;
mod loader;
mod sfc_host;
mod source_file;

pub use host::{CompilerHost, SystemHost};
pub use sfc_host::SfcHost;
pub use source_file::{ScriptTarget, SourceFile};

// Re-export the vocabulary a driver needs alongside the host
pub use trompe_resolve::{
    CompilerOptions, Extension, PathMap, ResolutionOrigin, ResolvedModule, TsconfigError,
};
pub use trompe_sfc::{PadOption, ScriptKind};
