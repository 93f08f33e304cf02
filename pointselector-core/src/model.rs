//! The ordered list of models a session walks through

use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::path::PathBuf;

/// One model file and its companion point set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// File name including extension, as written to the manifest and log
    pub file_name: String,
    /// File name with the model extension stripped
    pub stem: String,
    /// Full path to the model file
    pub model_path: PathBuf,
    /// Full path to the companion point-set file
    pub point_set_path: PathBuf,
}

impl ModelEntry {
    pub fn new(
        file_name: impl Into<String>,
        stem: impl Into<String>,
        model_path: PathBuf,
        point_set_path: PathBuf,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            stem: stem.into(),
            model_path,
            point_set_path,
        }
    }
}

/// Ordered, immutable list of models discovered at session start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelList {
    entries: Vec<ModelEntry>,
}

impl ModelList {
    pub fn from_entries(entries: Vec<ModelEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&ModelEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelEntry> {
        self.entries.iter()
    }
}

impl Index<usize> for ModelList {
    type Output = ModelEntry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a ModelList {
    type Item = &'a ModelEntry;
    type IntoIter = std::slice::Iter<'a, ModelEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(stem: &str) -> ModelEntry {
        ModelEntry::new(
            format!("{}.ply", stem),
            stem,
            PathBuf::from(format!("/cases/{}.ply", stem)),
            PathBuf::from(format!("/cases/{}.mrk.json", stem)),
        )
    }

    #[test]
    fn test_model_list_access() {
        let list = ModelList::from_entries(vec![entry("a"), entry("b")]);
        assert_eq!(list.len(), 2);
        assert!(!list.is_empty());
        assert_eq!(list[1].stem, "b");
        assert!(list.get(2).is_none());
        assert_eq!(list.iter().count(), 2);
    }

    #[test]
    fn test_empty_list() {
        let list = ModelList::default();
        assert!(list.is_empty());
        assert!(list.get(0).is_none());
    }
}
