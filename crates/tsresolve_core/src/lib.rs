//! tsconfig resolution for build-file generators.
//!
//! This crate reads `tsconfig.json`-style files and answers the questions a
//! build-file generator asks about TypeScript sources:
//! - Parsing relaxed JSON (comments, trailing commas)
//! - Following `extends` chains through pluggable resolvers, with cycle
//!   breaking and one parse per file
//! - Expanding module specifiers through `compilerOptions.paths`
//! - Mapping source files to their `outDir`/`declarationDir` outputs
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use tsresolve_core::{IdentityResolver, TsConfigCache};
//!
//! # fn main() -> Result<(), tsresolve_core::ConfigError> {
//! let mut cache = TsConfigCache::new();
//! let config = cache.load(&IdentityResolver, Path::new("/path/to/workspace"), "apps/web/tsconfig.json")?;
//!
//! for candidate in config.expand_paths(".", "@app/components/Button") {
//!     println!("{candidate}");
//! }
//! println!("{}", config.to_out_dir("src/index.ts"));
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod constants;
mod error;
mod expand;
mod jsonc;
mod loader;
mod output;
pub mod path_util;
mod resolver;
mod types;

// Re-export public API
pub use collector::{collect_tsconfigs, find_git_root, find_git_root_from};
pub use constants::{TSCONFIG_FILE_NAME, is_tsconfig_file_name};
pub use error::ConfigError;
pub use jsonc::{from_slice as parse_relaxed_json, normalize as normalize_relaxed_json};
pub use loader::TsConfigCache;
pub use path_util::is_relative_path;
pub use resolver::{ExtendsResolver, IdentityResolver, PackageResolver};
pub use types::{TsConfig, TsConfigPaths};
