use crate::error::DictError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_enabled() -> bool {
    true
}

/// One loaded dictionary, identified by its path.
///
/// Entries are values: changing the enabled flag yields a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub path: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl DictionaryEntry {
    /// A newly added dictionary starts enabled.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    pub fn disabled(path: impl Into<String>) -> Self {
        Self::new(path).with_enabled(false)
    }

    pub fn with_enabled(&self, enabled: bool) -> Self {
        Self {
            path: self.path.clone(),
            enabled,
        }
    }
}

/// Ordered dictionary stack. Position is lookup priority: the first entry
/// wins on stroke conflicts. Paths are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DictionaryEntry>", into = "Vec<DictionaryEntry>")]
pub struct DictionaryList(Vec<DictionaryEntry>);

impl DictionaryList {
    pub fn new(entries: Vec<DictionaryEntry>) -> Result<Self, DictError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for e in &entries {
            if !seen.insert(e.path.as_str()) {
                return Err(DictError::DuplicatePath {
                    path: e.path.clone(),
                });
            }
        }
        Ok(Self(entries))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DictionaryEntry> {
        self.0.get(index)
    }

    pub fn into_vec(self) -> Vec<DictionaryEntry> {
        self.0
    }

    // Crate-internal edits only ever move or replace existing entries, so
    // uniqueness cannot be broken through this.
    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<DictionaryEntry> {
        &mut self.0
    }

    pub(crate) fn from_unique(entries: Vec<DictionaryEntry>) -> Self {
        Self(entries)
    }
}

impl TryFrom<Vec<DictionaryEntry>> for DictionaryList {
    type Error = DictError;

    fn try_from(entries: Vec<DictionaryEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<DictionaryList> for Vec<DictionaryEntry> {
    fn from(list: DictionaryList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a DictionaryList {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
