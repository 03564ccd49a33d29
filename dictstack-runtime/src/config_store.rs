use anyhow::Context;
use dictstack_core::types::DictionaryList;
use dictstack_engine::traits::DictionaryHost;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::fs_util::write_atomic;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct HostConfig {
    #[serde(default)]
    dictionaries: DictionaryList,

    // Settings other than the dictionary stack pass through untouched.
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

/// A host configuration file, `{"dictionaries": [{"path", "enabled"}, ...]}`.
#[derive(Debug, Clone)]
pub struct DictionaryConfigStore {
    path: PathBuf,
}

impl DictionaryConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<HostConfig> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: HostConfig = serde_json::from_slice(&bytes)
            .with_context(|| format!("decode config JSON: {}", self.path.display()))?;
        Ok(cfg)
    }

    fn save(&self, cfg: &HostConfig) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        write_atomic(&self.path, &json)
            .with_context(|| format!("replace config: {}", self.path.display()))
    }
}

impl DictionaryHost for DictionaryConfigStore {
    fn dictionaries(&self) -> anyhow::Result<DictionaryList> {
        Ok(self.load()?.dictionaries)
    }

    fn set_dictionaries(&mut self, dictionaries: DictionaryList) -> anyhow::Result<()> {
        let mut cfg = if self.path.exists() {
            self.load()?
        } else {
            HostConfig {
                dictionaries: DictionaryList::empty(),
                other: serde_json::Map::new(),
            }
        };
        cfg.dictionaries = dictionaries;
        self.save(&cfg)
    }
}
