use crate::paths::normalize_path;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Insertion-ordered set of dependency paths.
///
/// Paths are normalized on the way in, so `a/./B.elm` and `a/B.elm` are the
/// same member. Order is the order of first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownDependencies {
    order: Vec<PathBuf>,
    members: HashSet<PathBuf>,
}

impl KnownDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains(&normalize_path(path))
    }

    /// Append `path` unless already present. Returns true if it was added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        let path = normalize_path(&path);
        if self.members.contains(&path) {
            return false;
        }
        self.members.insert(path.clone());
        self.order.push(path);
        true
    }

    /// Drop every member contained in `excluded`, keeping the order of the rest.
    pub fn exclude(&mut self, excluded: &HashSet<PathBuf>) {
        if excluded.is_empty() {
            return;
        }
        self.order.retain(|p| !excluded.contains(p));
        self.members.retain(|p| !excluded.contains(p));
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_vec(self) -> Vec<PathBuf> {
        self.order
    }
}

impl FromIterator<PathBuf> for KnownDependencies {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut known = KnownDependencies::new();
        for path in iter {
            known.insert(path);
        }
        known
    }
}

impl Extend<PathBuf> for KnownDependencies {
    fn extend<I: IntoIterator<Item = PathBuf>>(&mut self, iter: I) {
        for path in iter {
            self.insert(path);
        }
    }
}
