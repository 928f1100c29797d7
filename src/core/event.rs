//! Explizite Change-Notification (Subscribe/Raise).

use std::fmt;

/// Handle eines registrierten Listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Event mit beliebig vielen Listenern, synchron in Registrierungsreihenfolge.
pub struct ChangeEvent<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T> ChangeEvent<T> {
    /// Erstellt ein Event ohne Listener.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Registriert einen Listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Entfernt einen Listener. Gibt `true` zurück wenn er registriert war.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        before != self.listeners.len()
    }

    /// Benachrichtigt alle Listener.
    pub fn raise(&mut self, value: &T) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(value);
        }
    }

    /// Anzahl registrierter Listener.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Default for ChangeEvent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ChangeEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeEvent")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_raise_reaches_listeners_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut event = ChangeEvent::new();
        let sink = seen.clone();
        let id = event.subscribe(move |v: &u32| sink.borrow_mut().push(*v));

        event.raise(&1);
        assert!(event.unsubscribe(id));
        assert!(!event.unsubscribe(id));
        event.raise(&2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(event.listener_count(), 0);
    }
}
