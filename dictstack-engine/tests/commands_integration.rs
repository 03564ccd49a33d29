use dictstack_core::error::DictError;
use dictstack_core::types::{DictionaryEntry, DictionaryList};
use dictstack_engine::commands::DictCommands;
use dictstack_engine::error::CommandError;
use dictstack_engine::memory::{MemoryHost, MemorySnapshotStore};
use dictstack_engine::session::SoloState;
use dictstack_engine::traits::{DictionaryHost, SnapshotStore};
use std::sync::Arc;

fn user() -> DictionaryEntry {
    DictionaryEntry::new("user.json")
}

fn commands() -> DictionaryEntry {
    DictionaryEntry::new("commands.json")
}

fn english() -> DictionaryEntry {
    DictionaryEntry::new("main.json")
}

fn spanish() -> DictionaryEntry {
    DictionaryEntry::new("spanish/main.json")
}

fn extra() -> DictionaryEntry {
    DictionaryEntry::new("extra.json")
}

fn list(entries: Vec<DictionaryEntry>) -> DictionaryList {
    DictionaryList::new(entries).unwrap()
}

type Fixture = (MemoryHost, Arc<MemorySnapshotStore>, DictCommands);

fn setup() -> Fixture {
    let host = MemoryHost::new(list(vec![user(), commands(), english(), spanish()]));
    let store = Arc::new(MemorySnapshotStore::default());
    let cmds = DictCommands::new(store.clone());
    (host, store, cmds)
}

fn with_backup(backup: Vec<DictionaryEntry>) -> Fixture {
    let host = MemoryHost::new(list(vec![user(), commands(), english(), spanish()]));
    let store = Arc::new(MemorySnapshotStore::with_snapshot(list(backup)));
    let cmds = DictCommands::new(store.clone());
    (host, store, cmds)
}

fn entries(host: &MemoryHost) -> Vec<DictionaryEntry> {
    host.list().entries().to_vec()
}

#[test]
fn priority_dict_shortest_path_is_default() {
    let (mut host, _store, mut cmds) = setup();

    cmds.priority_dict(&mut host, "main.json").unwrap();
    assert_eq!(entries(&host), vec![english(), user(), commands(), spanish()]);

    cmds.priority_dict(&mut host, "spanish/main.json").unwrap();
    assert_eq!(entries(&host), vec![spanish(), english(), user(), commands()]);
}

#[test]
fn priority_dict_multiple() {
    let (mut host, _store, mut cmds) = setup();
    cmds.priority_dict(&mut host, "user.json, spanish/main.json, commands.json")
        .unwrap();
    assert_eq!(entries(&host), vec![user(), spanish(), commands(), english()]);
}

#[test]
fn priority_dict_invalid_leaves_host_untouched() {
    let (mut host, _store, mut cmds) = setup();
    let err = cmds
        .priority_dict(&mut host, "main.json, foobar.json")
        .unwrap_err();
    assert!(matches!(err, CommandError::Dict(DictError::NoMatch { .. })));
    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);
}

#[test]
fn toggle_dict_shortest_path_is_default() {
    let (mut host, _store, mut cmds) = setup();
    cmds.toggle_dict(&mut host, "+main.json, -spanish/main.json")
        .unwrap();
    assert_eq!(
        entries(&host),
        vec![
            user(),
            commands(),
            english().with_enabled(true),
            spanish().with_enabled(false),
        ]
    );
}

#[test]
fn toggle_dict_multiple() {
    let (mut host, _store, mut cmds) = setup();
    cmds.toggle_dict(&mut host, "+spanish/main.json, !commands.json, -user.json")
        .unwrap();
    assert_eq!(
        entries(&host),
        vec![
            user().with_enabled(false),
            commands().with_enabled(false),
            english(),
            spanish(),
        ]
    );
}

#[test]
fn toggle_dict_invalid_toggle() {
    let (mut host, _store, mut cmds) = setup();
    let err = cmds.toggle_dict(&mut host, "=user.json").unwrap_err();
    assert!(matches!(err, CommandError::Dict(DictError::InvalidToggle { .. })));
}

#[test]
fn toggle_dict_invalid_dictionary() {
    let (mut host, _store, mut cmds) = setup();
    let err = cmds.toggle_dict(&mut host, "+foobar.json").unwrap_err();
    assert!(matches!(err, CommandError::Dict(DictError::NoMatch { .. })));
}

#[test]
fn toggle_dict_conflicting_selections_last_wins() {
    let (mut host, _store, mut cmds) = setup();
    cmds.toggle_dict(&mut host, "-user.json, +user.json, -user.json")
        .unwrap();
    assert_eq!(entries(&host)[0], user().with_enabled(false));
}

#[test]
fn solo_dict() {
    let (mut host, store, mut cmds) = setup();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    assert_eq!(
        entries(&host),
        vec![
            user().with_enabled(false),
            commands().with_enabled(false),
            english().with_enabled(false),
            spanish(),
        ]
    );
    assert_eq!(cmds.solo_state(), SoloState::Solo);
    assert_eq!(
        store.peek(),
        Some(list(vec![user(), commands(), english(), spanish()]))
    );
}

#[test]
fn solo_round_trip_restores_exactly() {
    let (mut host, store, mut cmds) = setup();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    cmds.end_solo_dict(&mut host, "").unwrap();

    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);
    assert_eq!(cmds.solo_state(), SoloState::Normal);
    assert_eq!(store.peek(), None);
}

#[test]
fn end_solo_dict_restores_previous_state() {
    let (mut host, _store, mut cmds) = setup();
    cmds.toggle_dict(&mut host, "-main.json").unwrap();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![user(), commands(), english().with_enabled(false), spanish()]
    );
}

#[test]
fn end_solo_dict_doesnt_delete_new_dictionaries() {
    let (mut host, _store, mut cmds) = setup();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();

    // A dictionary is loaded while solo is active.
    let mut live = host.dictionaries().unwrap().into_vec();
    live.push(extra());
    host.set_dictionaries(list(live)).unwrap();

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![user(), commands(), english(), spanish(), extra()]
    );
}

#[test]
fn end_solo_dict_keeps_snapshot_order_over_solo_reordering() {
    let (mut host, _store, mut cmds) = setup();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    cmds.priority_dict(&mut host, "spanish/main.json").unwrap();
    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);
}

#[test]
fn repeated_solo_dict_extends_the_solo_set() {
    let (mut host, _store, mut cmds) = setup();
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    cmds.solo_dict(&mut host, "+user.json").unwrap();
    assert_eq!(
        entries(&host),
        vec![
            user(),
            commands().with_enabled(false),
            english().with_enabled(false),
            spanish(),
        ]
    );

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);
}

#[test]
fn failed_solo_dict_changes_nothing() {
    let (mut host, store, mut cmds) = setup();
    assert!(cmds.solo_dict(&mut host, "+spanish/main.json, =user.json").is_err());
    assert!(cmds.solo_dict(&mut host, "+foobar.json").is_err());

    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);
    assert_eq!(cmds.solo_state(), SoloState::Normal);
    assert_eq!(store.peek(), None);
}

#[test]
fn backed_up_dictionaries_restored_after_solo_if_backup_exists() {
    // The backup predates this process: it holds main.json disabled.
    let (mut host, store, mut cmds) = with_backup(vec![
        user(),
        commands(),
        english().with_enabled(false),
        spanish(),
    ]);

    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    assert_eq!(store.peek(), None);

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![user(), commands(), english().with_enabled(false), spanish()]
    );
}

#[test]
fn recovered_session_applies_toggles_to_current_stack() {
    let (mut host, _store, mut cmds) = with_backup(vec![user(), commands(), english(), spanish()]);

    cmds.solo_dict(&mut host, "-user.json").unwrap();
    assert_eq!(cmds.solo_state(), SoloState::Solo);
    // Already solo: nothing else was disabled.
    assert_eq!(
        entries(&host),
        vec![user().with_enabled(false), commands(), english(), spanish()]
    );
}

#[test]
fn end_solo_dict_without_first_doing_solo_restores_backup() {
    let (mut host, store, mut cmds) = with_backup(vec![
        user().with_enabled(false),
        commands(),
        english(),
        spanish().with_enabled(false),
    ]);

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![
            user().with_enabled(false),
            commands(),
            english(),
            spanish().with_enabled(false),
        ]
    );
    assert_eq!(store.peek(), None);
}

#[test]
fn end_solo_dict_without_first_doing_solo_uses_snapshot_order() {
    let (mut host, _store, mut cmds) = with_backup(vec![
        spanish().with_enabled(false),
        user().with_enabled(false),
    ]);

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![
            spanish().with_enabled(false),
            user().with_enabled(false),
            commands(),
            english(),
        ]
    );
}

#[test]
fn end_solo_dict_drops_backup_entries_no_longer_loaded() {
    let (mut host, _store, mut cmds) = with_backup(vec![extra(), english().with_enabled(false)]);

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(
        entries(&host),
        vec![english().with_enabled(false), user(), commands(), spanish()]
    );
}

#[test]
fn end_solo_dict_without_session_or_backup_is_noop() {
    let (mut host, store, mut cmds) = setup();
    cmds.toggle_dict(&mut host, "-commands.json").unwrap();

    cmds.end_solo_dict(&mut host, "whatever").unwrap();
    assert_eq!(
        entries(&host),
        vec![user(), commands().with_enabled(false), english(), spanish()]
    );
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn dispatch_runs_command_lines() {
    let (mut host, _store, mut cmds) = setup();
    cmds.dispatch(&mut host, "SOLO_DICT:+main.json").unwrap();
    cmds.dispatch(&mut host, "PRIORITY_DICT:main.json").unwrap();
    assert_eq!(
        entries(&host),
        vec![
            english(),
            user().with_enabled(false),
            commands().with_enabled(false),
            spanish().with_enabled(false),
        ]
    );

    cmds.dispatch(&mut host, "END_SOLO_DICT").unwrap();
    assert_eq!(entries(&host), vec![user(), commands(), english(), spanish()]);

    assert!(matches!(
        cmds.dispatch(&mut host, "FOO_DICT:x"),
        Err(CommandError::UnknownCommand(_))
    ));
}

/// Host whose next write fails once, like a config file on a full disk.
struct FailingWriteHost {
    inner: MemoryHost,
    fail_next_write: bool,
}

impl FailingWriteHost {
    fn new() -> Self {
        Self {
            inner: MemoryHost::new(list(vec![user(), commands(), english(), spanish()])),
            fail_next_write: false,
        }
    }
}

impl DictionaryHost for FailingWriteHost {
    fn dictionaries(&self) -> anyhow::Result<DictionaryList> {
        self.inner.dictionaries()
    }

    fn set_dictionaries(&mut self, dictionaries: DictionaryList) -> anyhow::Result<()> {
        if std::mem::take(&mut self.fail_next_write) {
            anyhow::bail!("config is read-only");
        }
        self.inner.set_dictionaries(dictionaries)
    }
}

#[test]
fn failed_write_on_solo_entry_leaves_session_normal() {
    let mut host = FailingWriteHost::new();
    let store = Arc::new(MemorySnapshotStore::default());
    let mut cmds = DictCommands::new(store.clone());

    host.fail_next_write = true;
    let err = cmds.solo_dict(&mut host, "+spanish/main.json").unwrap_err();
    assert!(matches!(err, CommandError::Host(_)));
    assert_eq!(cmds.solo_state(), SoloState::Normal);
    assert_eq!(store.peek(), None);
    assert_eq!(entries(&host.inner), vec![user(), commands(), english(), spanish()]);

    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();
    assert_eq!(
        entries(&host.inner),
        vec![
            user().with_enabled(false),
            commands().with_enabled(false),
            english().with_enabled(false),
            spanish(),
        ]
    );
}

#[test]
fn failed_write_on_solo_exit_can_be_retried() {
    let mut host = FailingWriteHost::new();
    let store = Arc::new(MemorySnapshotStore::default());
    let mut cmds = DictCommands::new(store.clone());
    cmds.solo_dict(&mut host, "+spanish/main.json").unwrap();

    host.fail_next_write = true;
    let err = cmds.end_solo_dict(&mut host, "").unwrap_err();
    assert!(matches!(err, CommandError::Host(_)));
    assert_eq!(cmds.solo_state(), SoloState::Solo);
    assert_eq!(
        store.peek(),
        Some(list(vec![user(), commands(), english(), spanish()]))
    );

    cmds.end_solo_dict(&mut host, "").unwrap();
    assert_eq!(entries(&host.inner), vec![user(), commands(), english(), spanish()]);
    assert_eq!(cmds.solo_state(), SoloState::Normal);
    assert_eq!(store.peek(), None);
}
