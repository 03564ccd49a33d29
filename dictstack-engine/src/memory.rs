use crate::traits::{DictionaryHost, SnapshotStore};
use dictstack_core::types::DictionaryList;
use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    dictionaries: DictionaryList,
}

impl MemoryHost {
    pub fn new(dictionaries: DictionaryList) -> Self {
        Self { dictionaries }
    }

    pub fn list(&self) -> &DictionaryList {
        &self.dictionaries
    }
}

impl DictionaryHost for MemoryHost {
    fn dictionaries(&self) -> anyhow::Result<DictionaryList> {
        Ok(self.dictionaries.clone())
    }

    fn set_dictionaries(&mut self, dictionaries: DictionaryList) -> anyhow::Result<()> {
        self.dictionaries = dictionaries;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    stored: Mutex<Option<DictionaryList>>,
}

impl MemorySnapshotStore {
    pub fn with_snapshot(snapshot: DictionaryList) -> Self {
        Self {
            stored: Mutex::new(Some(snapshot)),
        }
    }

    pub fn peek(&self) -> Option<DictionaryList> {
        self.stored.lock().ok().and_then(|s| s.clone())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> anyhow::Result<Option<DictionaryList>> {
        let stored = self
            .stored
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        Ok(stored.clone())
    }

    fn save(&self, snapshot: &DictionaryList) -> anyhow::Result<()> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        *stored = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| anyhow::anyhow!("snapshot store lock poisoned"))?;
        *stored = None;
        Ok(())
    }
}
