//! Static dependency resolution for Elm modules.
//!
//! Starting from an entry file, each module's import block is scanned line
//! by line (stopping as soon as the block ends), imports are mapped to file
//! paths, and newly found source modules are scanned in turn. Files that
//! cannot be read are left out of the result rather than failing the run.
//!
//! ```no_run
//! let deps = elm_deps::find_all_dependencies("src/Main.elm".as_ref())?;
//! for path in deps {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), elm_deps::errors::DepsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod manifest;
pub mod output;
pub mod parse;
pub mod paths;
pub mod resolve;

pub use resolve::{find_all_dependencies, find_all_dependencies_with, DependencyWalker};
