use crate::error::CommandError;
use crate::traits::SnapshotStore;
use dictstack_core::ordering::{apply_toggles, disable_all};
use dictstack_core::selection::ToggleSelection;
use dictstack_core::types::DictionaryList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoloState {
    Normal,
    Solo,
}

/// Process-wide solo mode bookkeeping.
///
/// While solo, `previous` holds the stack to restore on exit and the store
/// holds a copy of it so a killed process can recover on its next run.
#[derive(Debug, Default)]
pub struct SoloSession {
    active: bool,
    previous: Option<DictionaryList>,
    recovery_checked: bool,
}

impl SoloSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SoloState {
        if self.active {
            SoloState::Solo
        } else {
            SoloState::Normal
        }
    }

    pub fn recovery_checked(&self) -> bool {
        self.recovery_checked
    }

    pub fn previous_snapshot(&self) -> Option<&DictionaryList> {
        self.previous.as_ref()
    }

    /// Enters solo mode (or extends it), handing the new stack to `write`.
    ///
    /// On entry every dictionary is disabled before the toggles apply. While
    /// already solo, toggles apply to `current` as-is. The session only
    /// switches to solo once `write` succeeds; if it fails, the backup taken
    /// for this entry is removed again.
    pub fn solo_toggle<F>(
        &mut self,
        selections: &[ToggleSelection],
        current: &DictionaryList,
        store: &dyn SnapshotStore,
        write: F,
    ) -> Result<(), CommandError>
    where
        F: FnOnce(DictionaryList) -> Result<(), CommandError>,
    {
        self.recover_once(store);

        if self.active {
            return write(apply_toggles(selections, current)?);
        }

        let solo = apply_toggles(selections, &disable_all(current))?;

        // The backup must exist before the host changes.
        persist(store, current).map_err(CommandError::Backup)?;
        if let Err(e) = write(solo) {
            if let Err(clear_err) = store.clear() {
                log::warn!("failed to roll back solo backup: {clear_err:#}");
            }
            return Err(e);
        }

        self.previous = Some(current.clone());
        self.active = true;
        log::info!(
            "entered solo mode ({} dictionaries backed up)",
            current.len()
        );
        Ok(())
    }

    /// Leaves solo mode, handing the stack to restore (if any) to `restore`.
    ///
    /// If `restore` fails the session, its snapshot and the backup stay as
    /// they were so the exit can be retried. Otherwise the backup is always
    /// gone afterwards.
    pub fn solo_end<F>(
        &mut self,
        store: &dyn SnapshotStore,
        restore: F,
    ) -> Result<(), CommandError>
    where
        F: FnOnce(&DictionaryList) -> Result<(), CommandError>,
    {
        let previous = if self.recovery_checked {
            self.previous.clone()
        } else {
            // Nothing ran yet in this process; a leftover backup is the only
            // record of the stack a previous run was in solo from.
            load_backup(store)
        };
        let previous = previous.filter(|p| !p.is_empty());

        if let Some(p) = &previous {
            restore(p)?;
        }

        let was_active = self.active;
        self.active = false;
        self.previous = None;

        if let Err(e) = store.clear() {
            log::warn!("failed to delete solo backup: {e:#}");
        }

        match &previous {
            Some(p) => log::info!("left solo mode, restored {} dictionaries", p.len()),
            None if was_active => log::info!("left solo mode, nothing to restore"),
            None => log::debug!("end solo requested outside solo mode"),
        }
        Ok(())
    }

    fn recover_once(&mut self, store: &dyn SnapshotStore) {
        if self.recovery_checked {
            return;
        }
        self.recovery_checked = true;

        if let Some(snapshot) = load_backup(store) {
            if let Err(e) = store.clear() {
                log::warn!("failed to delete recovered solo backup: {e:#}");
            }
            log::info!(
                "resuming solo mode from backup ({} dictionaries)",
                snapshot.len()
            );
            self.previous = Some(snapshot);
            self.active = true;
        }
    }
}

// An empty stack is never worth restoring, so it is not written either.
fn persist(store: &dyn SnapshotStore, snapshot: &DictionaryList) -> anyhow::Result<()> {
    if snapshot.is_empty() {
        store.clear()
    } else {
        store.save(snapshot)
    }
}

/// Reads a leftover backup. Read failures count as no backup.
fn load_backup(store: &dyn SnapshotStore) -> Option<DictionaryList> {
    match store.load() {
        Ok(Some(s)) if !s.is_empty() => Some(s),
        Ok(_) => None,
        Err(e) => {
            log::warn!("ignoring unreadable solo backup: {e:#}");
            None
        }
    }
}
