//! Observable change streams
//!
//! A minimal publish/subscribe primitive. Each [`Observable`] owns its own
//! ordered listener list; there is no shared or global registry.
//!
//! - Listeners are called synchronously, in registration order.
//! - A listener registered while a publish is in flight only sees later
//!   publishes.
//! - A listener removed while a publish is in flight is not called again.
//!
//! Streams are single-threaded (`Rc<RefCell<..>>`).

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Listener callback type
pub type Listener<T> = Rc<dyn Fn(&T)>;

type ListenerId = u64;

struct Listeners<T> {
    next_id: ListenerId,
    entries: IndexMap<ListenerId, Listener<T>, FxBuildHasher>,
}

impl<T> Listeners<T> {
    fn new() -> Self {
        Self {
            next_id: 0,
            entries: IndexMap::default(),
        }
    }
}

/// Type-independent view of a listener list, so [`Subscription`] needs no
/// type parameter.
trait Registry {
    fn remove(&self, id: ListenerId);
    fn contains(&self, id: ListenerId) -> bool;
}

impl<T> Registry for RefCell<Listeners<T>> {
    fn remove(&self, id: ListenerId) {
        // shift_remove keeps the remaining listeners in registration order
        let removed = self.borrow_mut().entries.shift_remove(&id);
        if removed.is_some() {
            tracing::trace!(id, "observable listener removed");
        }
        // The closure may own subscriptions to this stream; drop it unborrowed
        drop(removed);
    }

    fn contains(&self, id: ListenerId) -> bool {
        self.borrow().entries.contains_key(&id)
    }
}

/// An ordered, synchronous change stream
///
/// Cloning an `Observable` produces a new, empty stream. Listeners belong to
/// the instance they were registered on, so a copied animation never notifies
/// the observers of the original.
pub struct Observable<T> {
    listeners: Rc<RefCell<Listeners<T>>>,
}

impl<T: 'static> Observable<T> {
    /// Create a stream with no listeners
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(RefCell::new(Listeners::new())),
        }
    }

    /// Register a listener
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn observe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id;
            listeners.next_id += 1;
            listeners.entries.insert(id, Rc::new(callback));
            id
        };

        let registry: Weak<dyn Registry> = Rc::downgrade(&self.listeners) as Weak<dyn Registry>;
        Subscription {
            registry: Some(registry),
            id,
        }
    }

    /// Deliver `value` to every registered listener, in registration order
    pub fn publish(&self, value: &T) {
        // Snapshot first so listeners may subscribe or unsubscribe re-entrantly
        let snapshot: SmallVec<[(ListenerId, Listener<T>); 4]> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            if self.listeners.borrow().entries.contains_key(&id) {
                listener(value);
            }
        }
    }

    /// Number of live listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Check if no listener is registered
    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }

    /// Remove every listener
    ///
    /// Outstanding [`Subscription`]s become inactive.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut self.listeners.borrow_mut().entries);
        drop(removed);
    }
}

impl<T: 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("subscribers", &self.listeners.borrow().entries.len())
            .finish()
    }
}

/// Handle for a registered listener
///
/// Dropping the handle removes the listener. If the stream is already gone,
/// dropping is a no-op.
#[must_use = "dropping a Subscription immediately removes its listener"]
pub struct Subscription {
    registry: Option<Weak<dyn Registry>>,
    id: ListenerId,
}

impl Subscription {
    /// Remove the listener now
    pub fn unsubscribe(mut self) {
        self.release();
    }

    /// Keep the listener registered for the lifetime of the stream
    pub fn detach(mut self) {
        self.registry = None;
    }

    /// Check if the listener is still registered on a live stream
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.contains(self.id))
    }

    fn release(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.remove(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_publish_reaches_listener() {
        let stream = Observable::new();
        let seen = Rc::new(Cell::new(0));

        let sink = seen.clone();
        let _sub = stream.observe(move |v: &i32| sink.set(*v));

        stream.publish(&7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let stream = Observable::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<_> = (0..4)
            .map(|i| {
                let order = order.clone();
                stream.observe(move |_: &()| order.borrow_mut().push(i))
            })
            .collect();

        stream.publish(&());
        assert_eq!(*order.borrow(), vec![0, 1, 2, 3]);
        drop(subs);
    }

    #[test]
    fn test_order_preserved_after_middle_unsubscribe() {
        let stream = Observable::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut subs: Vec<_> = (0..3)
            .map(|i| {
                let order = order.clone();
                Some(stream.observe(move |_: &()| order.borrow_mut().push(i)))
            })
            .collect();

        subs[1].take().unwrap().unsubscribe();
        stream.publish(&());
        assert_eq!(*order.borrow(), vec![0, 2]);
    }

    #[test]
    fn test_drop_subscription_removes_listener() {
        let stream = Observable::new();
        let count = Rc::new(Cell::new(0));

        let sink = count.clone();
        let sub = stream.observe(move |_: &()| sink.set(sink.get() + 1));
        stream.publish(&());
        assert_eq!(count.get(), 1);

        drop(sub);
        stream.publish(&());
        assert_eq!(count.get(), 1);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_detach_keeps_listener() {
        let stream = Observable::new();
        let count = Rc::new(Cell::new(0));

        let sink = count.clone();
        stream
            .observe(move |_: &()| sink.set(sink.get() + 1))
            .detach();

        stream.publish(&());
        stream.publish(&());
        assert_eq!(count.get(), 2);
        assert_eq!(stream.subscriber_count(), 1);
    }

    #[test]
    fn test_listener_added_during_publish_misses_in_flight_value() {
        let stream = Rc::new(Observable::new());
        let late_seen = Rc::new(RefCell::new(Vec::new()));
        let late_subs = Rc::new(RefCell::new(Vec::new()));

        let inner_stream = Rc::downgrade(&stream);
        let inner_seen = late_seen.clone();
        let inner_subs = late_subs.clone();
        let _sub = stream.observe(move |v: &i32| {
            if *v == 1 {
                if let Some(stream) = inner_stream.upgrade() {
                    let seen = inner_seen.clone();
                    let sub = stream.observe(move |v: &i32| seen.borrow_mut().push(*v));
                    inner_subs.borrow_mut().push(sub);
                }
            }
        });

        stream.publish(&1);
        assert!(late_seen.borrow().is_empty());

        stream.publish(&2);
        assert_eq!(*late_seen.borrow(), vec![2]);
    }

    #[test]
    fn test_listener_removed_during_publish_is_skipped() {
        let stream = Observable::new();
        let second_calls = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let to_remove = victim.clone();
        let _first = stream.observe(move |_: &()| {
            to_remove.borrow_mut().take();
        });

        let sink = second_calls.clone();
        *victim.borrow_mut() = Some(stream.observe(move |_: &()| sink.set(sink.get() + 1)));

        stream.publish(&());
        assert_eq!(second_calls.get(), 0);
    }

    #[test]
    fn test_clone_is_independent_stream() {
        let stream = Observable::new();
        let count = Rc::new(Cell::new(0));

        let sink = count.clone();
        let _sub = stream.observe(move |_: &()| sink.set(sink.get() + 1));

        let copy = stream.clone();
        assert!(copy.is_empty());
        copy.publish(&());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_subscription_outlives_stream() {
        let stream = Observable::<()>::new();
        let sub = stream.observe(|_| {});
        assert!(sub.is_active());

        drop(stream);
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_dropping_listener_that_owns_subscription() {
        let stream = Observable::<()>::new();
        let inner = stream.observe(|_| {});
        let outer = stream.observe(move |_| {
            let _keep = &inner;
        });
        assert_eq!(stream.subscriber_count(), 2);

        drop(outer);
        assert!(stream.is_empty());
    }

    #[test]
    fn test_clear_with_listener_that_owns_subscription() {
        let stream = Observable::<()>::new();
        let inner = stream.observe(|_| {});
        stream
            .observe(move |_| {
                let _keep = &inner;
            })
            .detach();

        stream.clear();
        assert!(stream.is_empty());
        stream.publish(&());
    }

    #[test]
    fn test_clear_deactivates_subscriptions() {
        let stream = Observable::<()>::new();
        let sub = stream.observe(|_| {});
        stream.clear();
        assert!(!sub.is_active());
    }
}
