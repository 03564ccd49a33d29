use crate::error::CommandError;
use crate::session::{SoloSession, SoloState};
use crate::traits::{DictionaryHost, SnapshotStore};
use dictstack_core::ordering::{prioritize, restore_snapshot, toggle};
use dictstack_core::selection::{parse_toggles, split_selections};
use dictstack_core::types::DictionaryList;
use std::sync::Arc;

/// The four dictionary commands, bound to one solo session.
///
/// Each command reads the host's stack once, computes the replacement in
/// full and writes it back once. A failing command writes nothing, and the
/// solo session only moves once the host accepted the new stack.
pub struct DictCommands {
    session: SoloSession,
    backup: Arc<dyn SnapshotStore>,
}

impl DictCommands {
    pub fn new(backup: Arc<dyn SnapshotStore>) -> Self {
        Self {
            session: SoloSession::new(),
            backup,
        }
    }

    pub fn solo_state(&self) -> SoloState {
        self.session.state()
    }

    /// `PRIORITY_DICT`: comma-separated fragments, moved to the front in order.
    pub fn priority_dict(
        &mut self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        let selections = split_selections(cmdline);
        let current = read(host)?;
        let updated = prioritize(&selections, &current)?;
        write(host, updated)
    }

    /// `TOGGLE_DICT`: comma-separated `+`/`-`/`!` selections.
    pub fn toggle_dict(
        &mut self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        let selections = split_selections(cmdline);
        let current = read(host)?;
        let updated = toggle(&selections, &current)?;
        write(host, updated)
    }

    /// `SOLO_DICT`: same grammar as `TOGGLE_DICT`, applied on top of solo mode.
    pub fn solo_dict(
        &mut self,
        host: &mut dyn DictionaryHost,
        cmdline: &str,
    ) -> Result<(), CommandError> {
        let selections = parse_toggles(&split_selections(cmdline))?;
        let current = read(host)?;
        self.session
            .solo_toggle(&selections, &current, self.backup.as_ref(), |updated| {
                write(host, updated)
            })
    }

    /// `END_SOLO_DICT`: the argument is ignored.
    pub fn end_solo_dict(
        &mut self,
        host: &mut dyn DictionaryHost,
        _cmdline: &str,
    ) -> Result<(), CommandError> {
        let current = read(host)?;
        self.session.solo_end(self.backup.as_ref(), |snapshot| {
            write(host, restore_snapshot(snapshot, &current))
        })
    }
}

fn read(host: &dyn DictionaryHost) -> Result<DictionaryList, CommandError> {
    host.dictionaries().map_err(CommandError::Host)
}

fn write(host: &mut dyn DictionaryHost, list: DictionaryList) -> Result<(), CommandError> {
    host.set_dictionaries(list).map_err(CommandError::Host)
}
