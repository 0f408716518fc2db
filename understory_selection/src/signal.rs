// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synchronous change notification.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use smallvec::SmallVec;

/// Handle returned by [`ChangeSignal::subscribe`], used to unsubscribe later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut()>;

#[derive(Default)]
struct Registry {
    listeners: SmallVec<[(ListenerId, Listener); 2]>,
    next_id: u64,
    delivering: bool,
    detached: SmallVec<[ListenerId; 2]>,
    pending_removal: SmallVec<[ListenerId; 2]>,
}

/// A single-threaded observer list for "selection changed" notifications.
///
/// Cloning a `ChangeSignal` yields another handle onto the *same* listener
/// list, which is how a wrapper re-raises an inner selection's changes to its
/// own observers.
///
/// Delivery is synchronous and in subscription order. Listeners may subscribe
/// or unsubscribe on the signal that is currently being raised:
/// - a listener added during delivery is first called on the next raise,
/// - a listener removed during delivery is dropped once delivery finishes.
///
/// A listener that raises the signal it is being called from does not cause
/// a second, nested delivery; see [`ChangeSignal::raise`].
#[derive(Clone, Default)]
pub struct ChangeSignal {
    registry: Rc<RefCell<Registry>>,
}

impl ChangeSignal {
    /// Creates a signal with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` and returns its id.
    pub fn subscribe(&self, listener: impl FnMut() + 'static) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes the listener registered under `id`.
    ///
    /// Returns `false` if no such listener exists.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut registry = self.registry.borrow_mut();
        if let Some(pos) = registry.listeners.iter().position(|(l, _)| *l == id) {
            registry.listeners.remove(pos);
            return true;
        }
        if registry.detached.contains(&id) && !registry.pending_removal.contains(&id) {
            registry.pending_removal.push(id);
            return true;
        }
        false
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let registry = self.registry.borrow();
        registry.listeners.len() + registry.detached.len() - registry.pending_removal.len()
    }

    /// Calls every registered listener once.
    ///
    /// A `raise` issued by a listener while this signal is already delivering
    /// is dropped; the listeners are in the middle of being called for the
    /// outer raise and are not called again.
    pub fn raise(&self) {
        let mut active = {
            let mut registry = self.registry.borrow_mut();
            if registry.delivering {
                // A listener caused a nested raise; the outer delivery already
                // holds the list.
                return;
            }
            registry.delivering = true;
            let active = core::mem::take(&mut registry.listeners);
            registry.detached = active.iter().map(|(id, _)| *id).collect();
            active
        };

        for (_, listener) in &mut active {
            listener();
        }

        let mut registry = self.registry.borrow_mut();
        let added = core::mem::replace(&mut registry.listeners, active);
        registry.listeners.extend(added);
        let removed = core::mem::take(&mut registry.pending_removal);
        registry.listeners.retain(|(id, _)| !removed.contains(id));
        registry.detached.clear();
        registry.delivering = false;
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use super::ChangeSignal;

    #[test]
    fn raise_calls_listeners_in_order() {
        let signal = ChangeSignal::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let log = log.clone();
            signal.subscribe(move || log.borrow_mut().push(n));
        }
        signal.raise();
        assert_eq!(*log.borrow(), [0, 1, 2]);
    }

    #[test]
    fn clones_share_listeners() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        signal.subscribe(move || h.set(h.get() + 1));

        let other = signal.clone();
        other.raise();
        assert_eq!(hits.get(), 1);
        assert_eq!(other.listener_count(), 1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let id = signal.subscribe(move || h.set(h.get() + 1));
        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.raise();
        assert_eq!(hits.get(), 0);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn subscribe_during_raise_is_deferred() {
        let signal = ChangeSignal::new();
        let late_hits = Rc::new(Cell::new(0));
        let added = Rc::new(Cell::new(false));

        let handle = signal.clone();
        let late = late_hits.clone();
        let flag = added.clone();
        signal.subscribe(move || {
            if !flag.get() {
                flag.set(true);
                let late = late.clone();
                handle.subscribe(move || late.set(late.get() + 1));
            }
        });

        signal.raise();
        assert_eq!(late_hits.get(), 0, "new listener must wait for the next raise");
        signal.raise();
        assert_eq!(late_hits.get(), 1);
        assert_eq!(signal.listener_count(), 2);
    }

    #[test]
    fn unsubscribe_during_raise_takes_effect_afterwards() {
        let signal = ChangeSignal::new();
        let hits = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let handle = signal.clone();
        let h = hits.clone();
        let slot = own_id.clone();
        let id = signal.subscribe(move || {
            h.set(h.get() + 1);
            if let Some(id) = slot.get() {
                assert!(handle.unsubscribe(id), "deferred removal is accepted");
            }
        });
        own_id.set(Some(id));

        signal.raise();
        signal.raise();
        assert_eq!(hits.get(), 1);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn raise_from_a_listener_is_dropped() {
        let signal = ChangeSignal::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let handle = signal.clone();
        let first = log.clone();
        signal.subscribe(move || {
            first.borrow_mut().push("first");
            handle.raise();
        });
        let second = log.clone();
        signal.subscribe(move || second.borrow_mut().push("second"));

        signal.raise();
        assert_eq!(*log.borrow(), ["first", "second"]);
    }
}
