pub mod known;
pub mod walker;

pub use known::KnownDependencies;
pub use walker::{DependencyWalker, Resolution, Visit, VisitStatus, WalkReport};

use crate::errors::Result;
use std::path::{Path, PathBuf};

/// Every file `entry` transitively imports, in discovery order.
///
/// The base directory comes from `entry`'s module declaration, and
/// `elm.json` source directories are consulted for modules missing from it.
/// Files that cannot be read are left out without failing the call.
pub fn find_all_dependencies(entry: &Path) -> Result<Vec<PathBuf>> {
    find_all_dependencies_with(entry, &[], None, &[])
}

/// [`find_all_dependencies`] continuing from earlier results: `known` paths
/// are never reported twice and `visited` files are never rescanned. When
/// `base_dir` is given, the entry's module declaration is not read.
pub fn find_all_dependencies_with(
    entry: &Path,
    known: &[PathBuf],
    base_dir: Option<&Path>,
    visited: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let seed = Resolution::seeded(known, visited);
    let report = DependencyWalker::new().walk_seeded(entry, base_dir, seed)?;
    Ok(report.dependencies)
}
