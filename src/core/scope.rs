//! Scope-gebundene Add/Remove-Verwaltung über externe Render-Collections.
//!
//! Ein `ScopedCollection` merkt sich jedes Objekt, das es in die Backing-
//! Collection eingefügt hat. Entfernt wird nur, was im Scope getrackt ist;
//! beim Schließen (oder Drop) wird der komplette Scope wieder ausgetragen.

use std::cell::RefCell;
use std::fmt;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

/// Schnittstelle einer Collection mit Identitäts-Semantik.
pub trait RenderCollection {
    /// Gespeichertes Objekt (typisch ein geteiltes Handle)
    type Item: Clone;
    /// Identitäts-Schlüssel
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Liefert den Schlüssel eines Objekts.
    fn key_of(item: &Self::Item) -> Self::Key;

    /// Ist das Objekt enthalten?
    fn contains(&self, key: Self::Key) -> bool;

    /// Fügt ein Objekt ein.
    fn add(&mut self, item: Self::Item);

    /// Entfernt ein Objekt, optional mit Zerstörung. Gibt `true` zurück wenn es enthalten war.
    fn remove(&mut self, key: Self::Key, destroy: bool) -> bool;
}

/// Konfigurationsfehler beim Zugriff auf die Backing-Collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// Keine Collection gebunden (kein aktiver Viewer / keine Scene)
    #[error("Collection `{0}` ist nicht gebunden (kein aktiver Viewer)")]
    Unbound(&'static str),
    /// Die Collection wird gerade anderweitig verändert
    #[error("Collection `{0}` ist bereits ausgeliehen")]
    Busy(&'static str),
}

/// Getrackter Scope über einer Backing-Collection.
pub struct ScopedCollection<C: RenderCollection> {
    label: &'static str,
    backing: Weak<RefCell<C>>,
    scope: IndexMap<C::Key, C::Item>,
}

impl<C: RenderCollection> ScopedCollection<C> {
    /// Erstellt einen Scope über einer Collection.
    pub fn new(label: &'static str, backing: &Rc<RefCell<C>>) -> Self {
        Self {
            label,
            backing: Rc::downgrade(backing),
            scope: IndexMap::new(),
        }
    }

    /// Erstellt einen ungebundenen Scope (jedes `add` schlägt fehl bis `bind`).
    pub fn unbound(label: &'static str) -> Self {
        Self {
            label,
            backing: Weak::new(),
            scope: IndexMap::new(),
        }
    }

    /// Bindet den Scope an eine (neue) Collection.
    ///
    /// Bereits getrackte Objekte werden vorher aus der alten Collection ausgetragen.
    pub fn bind(&mut self, backing: &Rc<RefCell<C>>) {
        if let Some(current) = self.backing.upgrade() {
            if Rc::ptr_eq(&current, backing) {
                return;
            }
        }
        if !self.scope.is_empty() {
            log::debug!(
                "Scope `{}` wird umgebunden, {} Objekte werden ausgetragen",
                self.label,
                self.scope.len()
            );
            self.remove_scope(true);
        }
        self.backing = Rc::downgrade(backing);
    }

    /// Ist eine lebende Collection gebunden?
    pub fn is_bound(&self) -> bool {
        self.backing.strong_count() > 0
    }

    /// Prüft, ob `add` gerade gelingen würde (gebunden und nicht ausgeliehen).
    pub fn writable(&self) -> Result<(), ScopeError> {
        let backing = self
            .backing
            .upgrade()
            .ok_or(ScopeError::Unbound(self.label))?;
        let writable = backing.try_borrow_mut().is_ok();
        if writable {
            Ok(())
        } else {
            Err(ScopeError::Busy(self.label))
        }
    }

    /// Label für Logs.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Getrackte Objekte in Einfüge-Reihenfolge.
    pub fn scope(&self) -> impl Iterator<Item = &C::Item> {
        self.scope.values()
    }

    /// Anzahl getrackter Objekte.
    pub fn len(&self) -> usize {
        self.scope.len()
    }

    /// Ist der Scope leer?
    pub fn is_empty(&self) -> bool {
        self.scope.is_empty()
    }

    /// Wird das Objekt von diesem Scope getrackt?
    pub fn contains(&self, key: C::Key) -> bool {
        self.scope.contains_key(&key)
    }

    /// Fügt ein Objekt ein (idempotent) und trackt es.
    ///
    /// Ist das Objekt bereits in der Collection, wird es nur getrackt.
    pub fn add(&mut self, item: C::Item) -> Result<C::Item, ScopeError> {
        let backing = self
            .backing
            .upgrade()
            .ok_or(ScopeError::Unbound(self.label))?;
        let mut collection = backing
            .try_borrow_mut()
            .map_err(|_| ScopeError::Busy(self.label))?;

        let key = C::key_of(&item);
        if !collection.contains(key) {
            collection.add(item.clone());
        }
        self.scope.insert(key, item.clone());
        Ok(item)
    }

    /// Entfernt ein getracktes Objekt. Gibt `true` zurück wenn entfernt wurde.
    ///
    /// Nicht getrackte Objekte bleiben unangetastet, auch wenn sie in der
    /// Collection liegen.
    pub fn remove(&mut self, key: C::Key, destroy: bool) -> bool {
        if !self.scope.contains_key(&key) {
            return false;
        }
        if let Some(backing) = self.backing.upgrade() {
            let Ok(mut collection) = backing.try_borrow_mut() else {
                log::warn!(
                    "Scope `{}`: Collection ausgeliehen, {:?} bleibt getrackt",
                    self.label,
                    key
                );
                return false;
            };
            collection.remove(key, destroy);
        }
        self.scope.shift_remove(&key);
        true
    }

    /// Entfernt alle getrackten Objekte, die das Prädikat erfüllen.
    /// Gibt die Anzahl entfernter Objekte zurück.
    pub fn remove_where<F>(&mut self, mut predicate: F, destroy: bool) -> usize
    where
        F: FnMut(&C::Item) -> bool,
    {
        let keys: Vec<C::Key> = self
            .scope
            .iter()
            .filter(|(_, item)| predicate(item))
            .map(|(key, _)| *key)
            .collect();
        keys.into_iter()
            .filter(|key| self.remove(*key, destroy))
            .count()
    }

    /// Entfernt alle getrackten Objekte.
    pub fn remove_scope(&mut self, destroy: bool) -> usize {
        self.remove_where(|_| true, destroy)
    }

    /// Schließt den Scope: alles austragen und zerstören.
    pub fn close(mut self) -> usize {
        self.remove_scope(true)
    }
}

impl<C: RenderCollection> Drop for ScopedCollection<C> {
    fn drop(&mut self) {
        if !self.scope.is_empty() {
            self.remove_scope(true);
        }
    }
}

impl<C: RenderCollection> fmt::Debug for ScopedCollection<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedCollection")
            .field("label", &self.label)
            .field("bound", &self.is_bound())
            .field("tracked", &self.scope.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal-Collection über Zahlen, zählt Einfügungen und Zerstörungen.
    #[derive(Default)]
    struct CountingCollection {
        items: Vec<u32>,
        inserts: usize,
        destroyed: Vec<u32>,
    }

    impl RenderCollection for CountingCollection {
        type Item = u32;
        type Key = u32;

        fn key_of(item: &u32) -> u32 {
            *item
        }

        fn contains(&self, key: u32) -> bool {
            self.items.contains(&key)
        }

        fn add(&mut self, item: u32) {
            self.inserts += 1;
            self.items.push(item);
        }

        fn remove(&mut self, key: u32, destroy: bool) -> bool {
            let before = self.items.len();
            self.items.retain(|i| *i != key);
            if destroy {
                self.destroyed.push(key);
            }
            before != self.items.len()
        }
    }

    fn backing() -> Rc<RefCell<CountingCollection>> {
        Rc::new(RefCell::new(CountingCollection::default()))
    }

    #[test]
    fn test_add_is_idempotent() {
        let collection = backing();
        let mut scope = ScopedCollection::new("test", &collection);

        assert_eq!(scope.add(7), Ok(7));
        assert_eq!(scope.add(7), Ok(7));

        assert_eq!(collection.borrow().inserts, 1);
        assert_eq!(collection.borrow().items, vec![7]);
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_add_tracks_item_already_in_collection() {
        let collection = backing();
        collection.borrow_mut().add(3);
        let mut scope = ScopedCollection::new("test", &collection);

        scope.add(3).expect("gebunden");
        assert_eq!(collection.borrow().inserts, 1);
        assert!(scope.contains(3));
    }

    #[test]
    fn test_unbound_add_fails_without_mutation() {
        let mut scope: ScopedCollection<CountingCollection> = ScopedCollection::unbound("test");
        assert_eq!(scope.add(1), Err(ScopeError::Unbound("test")));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_add_fails_after_collection_dropped() {
        let collection = backing();
        let mut scope = ScopedCollection::new("test", &collection);
        drop(collection);
        assert!(matches!(scope.add(1), Err(ScopeError::Unbound(_))));
    }

    #[test]
    fn test_writable_reports_busy_collection() {
        let collection = backing();
        let scope = ScopedCollection::new("test", &collection);
        assert_eq!(scope.writable(), Ok(()));

        let held = collection.borrow();
        assert_eq!(scope.writable(), Err(ScopeError::Busy("test")));
        drop(held);
        assert_eq!(scope.writable(), Ok(()));
    }

    #[test]
    fn test_remove_only_tracked_items() {
        let collection = backing();
        collection.borrow_mut().add(99);
        let mut scope = ScopedCollection::new("test", &collection);
        scope.add(1).expect("gebunden");

        assert!(!scope.remove(99, false), "fremdes Objekt darf nicht entfernt werden");
        assert!(collection.borrow().contains(99));

        assert!(scope.remove(1, true));
        assert!(!scope.remove(1, true), "zweites Remove ist ein No-op");
        assert_eq!(collection.borrow().destroyed, vec![1]);
    }

    #[test]
    fn test_remove_where_filters_by_predicate() {
        let collection = backing();
        let mut scope = ScopedCollection::new("test", &collection);
        for i in 0..6 {
            scope.add(i).expect("gebunden");
        }

        let removed = scope.remove_where(|i| i % 2 == 0, false);
        assert_eq!(removed, 3);
        assert_eq!(collection.borrow().items, vec![1, 3, 5]);
        assert_eq!(scope.scope().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_remove_scope_leaves_no_tracked_item_behind() {
        let collection = backing();
        collection.borrow_mut().add(100);
        let mut scope = ScopedCollection::new("test", &collection);
        scope.add(1).expect("gebunden");
        scope.add(2).expect("gebunden");
        scope.remove(1, false);
        scope.add(3).expect("gebunden");
        scope.add(1).expect("gebunden");

        scope.remove_scope(false);

        assert!(scope.is_empty());
        assert_eq!(collection.borrow().items, vec![100]);
    }

    #[test]
    fn test_drop_releases_scope() {
        let collection = backing();
        {
            let mut scope = ScopedCollection::new("test", &collection);
            scope.add(4).expect("gebunden");
            scope.add(5).expect("gebunden");
        }
        assert!(collection.borrow().items.is_empty());
        assert_eq!(collection.borrow().destroyed, vec![4, 5]);
    }

    #[test]
    fn test_close_destroys_everything() {
        let collection = backing();
        let mut scope = ScopedCollection::new("test", &collection);
        scope.add(8).expect("gebunden");
        assert_eq!(scope.close(), 1);
        assert_eq!(collection.borrow().destroyed, vec![8]);
    }

    #[test]
    fn test_rebind_moves_nothing_but_releases_old_scope() {
        let old = backing();
        let new = backing();
        let mut scope = ScopedCollection::new("test", &old);
        scope.add(1).expect("gebunden");

        scope.bind(&new);
        assert!(old.borrow().items.is_empty());
        assert!(scope.is_empty());

        scope.add(2).expect("gebunden");
        assert_eq!(new.borrow().items, vec![2]);
    }
}
