//! Listener fan-out for color changes.
//!
//! # Design
//!
//! [`ListenerSet`] holds zero-argument callbacks in shared,
//! reference-counted storage (`Rc<RefCell<..>>`) and invokes them in
//! registration order. Two registration styles share one ordered list:
//!
//! - [`ListenerSet::register`] is append-only. The callback lives as long as
//!   the set. Intended for static renderers registered once at startup.
//! - [`ListenerSet::subscribe`] returns a [`Subscription`] guard. Dropping
//!   the guard unsubscribes; the dead entry is pruned on the next notify.
//!
//! # Failure Modes
//!
//! - **Panicking listener**: the panic unwinds out of [`ListenerSet::notify`]
//!   and the remaining listeners are not called.
//! - **Re-entrant registration**: callbacks are collected before any of them
//!   runs, so registering from inside a callback is allowed; the new
//!   listener first fires on the following notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type CallbackRc = Rc<dyn Fn()>;
type CallbackWeak = Weak<dyn Fn()>;

enum Entry {
    Registered(CallbackRc),
    Subscribed(CallbackWeak),
}

impl Entry {
    fn upgrade(&self) -> Option<CallbackRc> {
        match self {
            Self::Registered(cb) => Some(Rc::clone(cb)),
            Self::Subscribed(weak) => weak.upgrade(),
        }
    }

    fn is_live(&self) -> bool {
        match self {
            Self::Registered(_) => true,
            Self::Subscribed(weak) => weak.strong_count() > 0,
        }
    }
}

/// Ordered set of color-change listeners.
///
/// Cloning creates a new handle to the **same** list.
#[derive(Clone, Default)]
pub struct ListenerSet {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("listener_count", &self.entries.borrow().len())
            .finish()
    }
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener that stays registered for the life of the set.
    pub fn register(&self, callback: impl Fn() + 'static) {
        self.entries
            .borrow_mut()
            .push(Entry::Registered(Rc::new(callback)));
    }

    /// Append a listener that stays registered while the returned guard is
    /// alive.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.entries
            .borrow_mut()
            .push(Entry::Subscribed(Rc::downgrade(&strong)));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Number of entries, including dropped subscriptions not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every live listener in registration order and prune dead
    /// subscriptions. Returns the number of listeners invoked.
    pub fn notify(&self) -> usize {
        // Collect first so no borrow is held while callbacks run.
        let callbacks: Vec<CallbackRc> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(Entry::is_live);
            entries.iter().filter_map(Entry::upgrade).collect()
        };

        for cb in &callbacks {
            cb();
        }
        callbacks.len()
    }
}

/// RAII guard for a subscribed listener.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// callback, so the `Weak` held by the set fails to upgrade from then on.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notification_order_is_registration_order() {
        let set = ListenerSet::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = Rc::clone(&log);
            set.register(move || log.borrow_mut().push(i));
        }
        let log_sub = Rc::clone(&log);
        let _sub = set.subscribe(move || log_sub.borrow_mut().push(3));

        assert_eq!(set.notify(), 4);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn registered_listeners_are_permanent() {
        let set = ListenerSet::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        set.register(move || c.set(c.get() + 1));

        set.notify();
        set.notify();
        assert_eq!(count.get(), 2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn subscription_drop_unsubscribes() {
        let set = ListenerSet::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let sub = set.subscribe(move || c.set(c.get() + 1));

        set.notify();
        assert_eq!(count.get(), 1);

        drop(sub);
        assert_eq!(set.notify(), 0);
        assert_eq!(count.get(), 1);
        assert!(set.is_empty(), "dead subscription should be pruned");
    }

    #[test]
    fn partial_subscriber_drop_keeps_order() {
        let set = ListenerSet::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _a = set.subscribe(move || l1.borrow_mut().push('a'));
        let l2 = Rc::clone(&log);
        let b = set.subscribe(move || l2.borrow_mut().push('b'));
        let l3 = Rc::clone(&log);
        set.register(move || l3.borrow_mut().push('c'));

        drop(b);
        set.notify();
        assert_eq!(*log.borrow(), vec!['a', 'c']);
    }

    #[test]
    fn registering_during_notify_fires_next_time() {
        let set = ListenerSet::new();
        let inner_count = Rc::new(Cell::new(0));

        let handle = set.clone();
        let ic = Rc::clone(&inner_count);
        let registered = Rc::new(Cell::new(false));
        let reg = Rc::clone(&registered);
        set.register(move || {
            if !reg.get() {
                reg.set(true);
                let ic = Rc::clone(&ic);
                handle.register(move || ic.set(ic.get() + 1));
            }
        });

        assert_eq!(set.notify(), 1);
        assert_eq!(inner_count.get(), 0);
        assert_eq!(set.notify(), 2);
        assert_eq!(inner_count.get(), 1);
    }

    #[test]
    fn panicking_listener_aborts_the_rest() {
        let set = ListenerSet::new();
        let reached = Rc::new(Cell::new(false));
        set.register(|| panic!("listener failure"));
        let r = Rc::clone(&reached);
        set.register(move || r.set(true));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| set.notify()));
        assert!(result.is_err());
        assert!(!reached.get());
    }

    #[test]
    fn clone_shares_listeners() {
        let a = ListenerSet::new();
        let b = a.clone();
        a.register(|| {});
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn debug_format() {
        let set = ListenerSet::new();
        set.register(|| {});
        assert!(format!("{set:?}").contains("listener_count: 1"));
        let sub = set.subscribe(|| {});
        assert!(format!("{sub:?}").contains("Subscription"));
    }
}
