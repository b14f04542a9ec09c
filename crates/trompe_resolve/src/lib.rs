//! # trompe_resolve
//!
//! Module resolution for Trompe.
//!
//! Standard TS/Node-flavored resolution parameterized over injectable
//! file-system probes, so a host can answer for files that are not
//! physically present, plus the wildcard-alias fallback applied when the
//! standard algorithm comes up empty. Configuration is an immutable
//! [`CompilerOptions`] value; nothing ambient is consulted, and no result
//! is ever cached here.

mod aliases;
mod options;
mod paths;
mod resolved;
mod resolver;

pub use aliases::AliasTable;
pub use options::{CompilerOptions, PathMap, TsconfigError};
pub use paths::{absolutize, normalize_path, resolve_against};
pub use resolved::{Extension, ResolutionOrigin, ResolvedModule};
pub use resolver::{resolve_module_name, ResolutionHost};
