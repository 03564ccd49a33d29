use crate::error::DictError;
use crate::path::NormalizedFragment;
use crate::selection::{ToggleSelection, parse_toggles};
use crate::types::DictionaryList;
use std::collections::HashSet;

/// Index of the best match for `fragment`.
///
/// Among all entries whose path ends with the fragment, the shortest path
/// wins; equal lengths keep list order.
pub fn match_dictionary(fragment: &str, list: &DictionaryList) -> Result<usize, DictError> {
    let normalized = NormalizedFragment::parse(fragment);
    list.iter()
        .enumerate()
        .filter(|(_, e)| normalized.matches(&e.path))
        .min_by_key(|(_, e)| e.path.chars().count())
        .map(|(i, _)| i)
        .ok_or_else(|| DictError::no_match(fragment))
}

/// Moves the selected dictionaries to the front, in selection order.
/// Untouched entries keep their relative order.
pub fn prioritize<S: AsRef<str>>(
    selections: &[S],
    list: &DictionaryList,
) -> Result<DictionaryList, DictError> {
    let mut out = list.clone();
    for fragment in selections.iter().rev() {
        let idx = match_dictionary(fragment.as_ref(), &out)?;
        let entries = out.as_mut_vec();
        let entry = entries.remove(idx);
        entries.insert(0, entry);
    }
    Ok(out)
}

/// Applies parsed toggles in order. Later selections see earlier ones, so
/// conflicting selections of one dictionary resolve to the last.
pub fn apply_toggles(
    selections: &[ToggleSelection],
    list: &DictionaryList,
) -> Result<DictionaryList, DictError> {
    let mut out = list.clone();
    for sel in selections {
        let idx = match_dictionary(&sel.fragment, &out)?;
        let entries = out.as_mut_vec();
        let enabled = sel.action.apply(entries[idx].enabled);
        entries[idx] = entries[idx].with_enabled(enabled);
    }
    Ok(out)
}

/// Parses sigil-prefixed selections (`+`, `-`, `!`) and applies them.
pub fn toggle<S: AsRef<str>>(
    selections: &[S],
    list: &DictionaryList,
) -> Result<DictionaryList, DictError> {
    let parsed = parse_toggles(selections)?;
    apply_toggles(&parsed, list)
}

pub fn disable_all(list: &DictionaryList) -> DictionaryList {
    DictionaryList::from_unique(list.iter().map(|e| e.with_enabled(false)).collect())
}

/// Merges a pre-solo snapshot back over the live list.
///
/// Snapshot order and state win for every path still loaded; live entries
/// the snapshot never saw follow unchanged. Snapshot paths no longer loaded
/// are dropped: unlike replaying the snapshot verbatim, a dictionary removed
/// during solo stays removed instead of being loaded again.
pub fn restore_snapshot(snapshot: &DictionaryList, current: &DictionaryList) -> DictionaryList {
    let live: HashSet<&str> = current.iter().map(|e| e.path.as_str()).collect();
    let known: HashSet<&str> = snapshot.iter().map(|e| e.path.as_str()).collect();

    let restored = snapshot
        .iter()
        .filter(|e| live.contains(e.path.as_str()))
        .chain(current.iter().filter(|e| !known.contains(e.path.as_str())))
        .cloned()
        .collect();

    DictionaryList::from_unique(restored)
}
