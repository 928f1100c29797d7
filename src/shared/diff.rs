//! Differenz zweier Listen nach Identitäts-Schlüssel.

use std::collections::HashSet;
use std::hash::Hash;

/// Ergebnis von `list_diff`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDiff<T> {
    /// In `list`, aber nicht in `old`
    pub added: Vec<T>,
    /// In `old`, aber nicht in `list`
    pub removed: Vec<T>,
}

/// Vergleicht zwei Listen per Schlüssel. Reihenfolge bleibt erhalten.
pub fn list_diff<T, K, F>(list: &[T], old: &[T], key: F) -> ListDiff<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let old_keys: HashSet<K> = old.iter().map(&key).collect();
    let new_keys: HashSet<K> = list.iter().map(&key).collect();
    ListDiff {
        added: list
            .iter()
            .filter(|item| !old_keys.contains(&key(item)))
            .cloned()
            .collect(),
        removed: old
            .iter()
            .filter(|item| !new_keys.contains(&key(item)))
            .cloned()
            .collect(),
    }
}
