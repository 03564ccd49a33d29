use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use dictstack_engine::commands::DictCommands;
use dictstack_engine::dispatch::DictCommand;
use dictstack_engine::error::CommandError;
use dictstack_engine::session::SoloState;
use dictstack_engine::traits::DictionaryHost;

use crate::backup::BackupFile;

/// Process-wide handle to the dictionary commands.
///
/// Cloning shares one solo session; every command runs under the lock.
#[derive(Clone)]
pub struct DictCommandService {
    backup: BackupFile,
    commands: Arc<Mutex<DictCommands>>,
}

impl DictCommandService {
    pub fn new(config_dir: &Path) -> Self {
        let backup = BackupFile::in_config_dir(config_dir);
        Self {
            commands: Arc::new(Mutex::new(DictCommands::new(Arc::new(backup.clone())))),
            backup,
        }
    }

    pub fn backup(&self) -> &BackupFile {
        &self.backup
    }

    // Commands commit session state only after the host write succeeds, so a
    // poisoned lock still guards a consistent session.
    fn lock(&self) -> MutexGuard<'_, DictCommands> {
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn solo_state(&self) -> SoloState {
        self.lock().solo_state()
    }

    pub fn priority_dict(
        &self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        self.lock().priority_dict(host, cmdline)
    }

    pub fn toggle_dict(
        &self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        self.lock().toggle_dict(host, cmdline)
    }

    pub fn solo_dict(
        &self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        self.lock().solo_dict(host, cmdline)
    }

    pub fn end_solo_dict(
        &self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        self.lock().end_solo_dict(host, cmdline)
    }

    pub fn execute(
        &self,
        host: &mut dyn DictionaryHost,
        command: &DictCommand,
    ) -> Result<(), CommandError> {
        self.lock().execute(host, command)
    }

    pub fn dispatch(&self, host: &mut dyn DictionaryHost, line: &str) -> Result<(), CommandError> {
        self.lock().dispatch(host, line)
    }
}
