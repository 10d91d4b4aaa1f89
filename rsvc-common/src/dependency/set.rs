// rsvc-common/src/dependency/set.rs
use std::collections::HashSet;

use crate::model::LibraryDependency;

/// Insertion-ordered set of dependencies, unique by key. The first occurrence of a key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnfulfilledSet {
    items: Vec<LibraryDependency>,
    keys: HashSet<String>,
}

impl UnfulfilledSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if a dependency with the same key is already present.
    pub fn insert(&mut self, dependency: LibraryDependency) -> bool {
        if self.keys.insert(dependency.key()) {
            self.items.push(dependency);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LibraryDependency> {
        self.items.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.items.iter().map(LibraryDependency::key).collect()
    }

    pub fn into_vec(self) -> Vec<LibraryDependency> {
        self.items
    }
}

impl Extend<LibraryDependency> for UnfulfilledSet {
    fn extend<I: IntoIterator<Item = LibraryDependency>>(&mut self, iter: I) {
        for dependency in iter {
            self.insert(dependency);
        }
    }
}

impl FromIterator<LibraryDependency> for UnfulfilledSet {
    fn from_iter<I: IntoIterator<Item = LibraryDependency>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for UnfulfilledSet {
    type Item = LibraryDependency;
    type IntoIter = std::vec::IntoIter<LibraryDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a UnfulfilledSet {
    type Item = &'a LibraryDependency;
    type IntoIter = std::slice::Iter<'a, LibraryDependency>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
