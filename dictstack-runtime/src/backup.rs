use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dictstack_core::types::{DictionaryEntry, DictionaryList};
use dictstack_engine::traits::SnapshotStore;

use crate::fs_util::{remove_if_exists, write_atomic};

/// On-disk pre-solo snapshot: a JSON array of `[path, enabled]` pairs.
///
/// A missing file, an empty file and an empty array all mean "no backup".
#[derive(Debug, Clone)]
pub struct BackupFile {
    path: PathBuf,
}

impl BackupFile {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_config_dir(config_dir: &Path) -> Self {
        Self::at_path(crate::paths::backup_path(config_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SnapshotStore for BackupFile {
    fn load(&self) -> anyhow::Result<Option<DictionaryList>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("failed to read backup: {}", self.path.display())));
            }
        };

        if raw.trim().is_empty() {
            return Ok(None);
        }

        let pairs: Vec<(String, bool)> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse backup: {}", self.path.display()))?;
        if pairs.is_empty() {
            return Ok(None);
        }

        let entries = pairs
            .into_iter()
            .map(|(path, enabled)| DictionaryEntry { path, enabled })
            .collect();
        let list = DictionaryList::new(entries)
            .with_context(|| format!("invalid backup: {}", self.path.display()))?;
        Ok(Some(list))
    }

    fn save(&self, snapshot: &DictionaryList) -> anyhow::Result<()> {
        let pairs: Vec<(&str, bool)> = snapshot
            .iter()
            .map(|e| (e.path.as_str(), e.enabled))
            .collect();
        let json = serde_json::to_vec(&pairs).context("encode backup JSON")?;
        write_atomic(&self.path, &json)?;
        log::debug!("wrote solo backup: {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        remove_if_exists(&self.path)?;
        log::debug!("cleared solo backup: {}", self.path.display());
        Ok(())
    }
}
