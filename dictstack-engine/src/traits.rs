use dictstack_core::types::DictionaryList;

/// The host engine's configuration store, as far as dictionaries go.
///
/// Writes always replace the whole ordered list.
pub trait DictionaryHost {
    fn dictionaries(&self) -> anyhow::Result<DictionaryList>;
    fn set_dictionaries(&mut self, dictionaries: DictionaryList) -> anyhow::Result<()>;
}

/// Persisted copy of the pre-solo stack.
///
/// `load` returns `None` when nothing is stored. `clear` on an empty store is
/// not an error.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<DictionaryList>>;
    fn save(&self, snapshot: &DictionaryList) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}
