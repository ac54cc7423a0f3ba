//! Type-erased animations
//!
//! [`AnyAnimation`] stores any [`Animation`] behind a uniform surface so
//! heterogeneous strategies can share one container. It keeps value
//! semantics: cloning deep-copies the concrete animation, and advancing one
//! copy never affects another.

use std::fmt;

use tempo_core::{Observable, Subscription};

use crate::animation::{Animation, AnimationEvent};

/// Object-safe view of an animation that can copy itself
trait DynAnimation<T> {
    fn value(&self) -> T;
    fn is_finished(&self) -> bool;
    fn advance(&mut self, dt: f64);
    fn clone_box(&self) -> Box<dyn DynAnimation<T>>;
}

impl<A> DynAnimation<A::Value> for A
where
    A: Animation + Clone + 'static,
{
    fn value(&self) -> A::Value {
        Animation::value(self)
    }

    fn is_finished(&self) -> bool {
        Animation::is_finished(self)
    }

    fn advance(&mut self, dt: f64) {
        Animation::advance(self, dt);
    }

    fn clone_box(&self) -> Box<dyn DynAnimation<A::Value>> {
        Box::new(self.clone())
    }
}

/// An animation with its concrete type erased
///
/// Holds a snapshot of the value and finished flag, refreshed after every
/// `advance`, plus its own change stream. Like [`Spring`](crate::Spring), a
/// clone starts with no observers.
pub struct AnyAnimation<T> {
    value: T,
    finished: bool,
    inner: Box<dyn DynAnimation<T>>,
    events: Observable<AnimationEvent<T>>,
}

impl<T> AnyAnimation<T>
where
    T: Clone + PartialEq + 'static,
{
    /// Erase `animation`, taking ownership of it
    pub fn new<A>(animation: A) -> Self
    where
        A: Animation<Value = T> + Clone + 'static,
    {
        Self {
            value: Animation::value(&animation),
            finished: Animation::is_finished(&animation),
            inner: Box::new(animation),
            events: Observable::new(),
        }
    }

    pub fn value(&self) -> T {
        self.value.clone()
    }

    /// Borrow the current value without cloning
    pub fn value_ref(&self) -> &T {
        &self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Subscribe to value changes and completion
    ///
    /// `Changed` is published whenever an `advance` produces a different
    /// value; `Completed` on the step where the animation becomes finished.
    pub fn observe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AnimationEvent<T>) + 'static,
    {
        self.events.observe(callback)
    }

    /// Advance the owned animation and refresh the snapshot
    pub fn advance(&mut self, dt: f64) {
        let was_finished = self.finished;

        self.inner.advance(dt);
        let value = self.inner.value();
        self.finished = self.inner.is_finished();

        let changed = value != self.value;
        self.value = value;

        if changed {
            self.events.publish(&AnimationEvent::Changed(self.value.clone()));
        }
        if self.finished && !was_finished {
            self.events
                .publish(&AnimationEvent::Completed(self.value.clone()));
        }
    }
}

impl<T> Clone for AnyAnimation<T>
where
    T: Clone + 'static,
{
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            finished: self.finished,
            inner: self.inner.clone_box(),
            events: Observable::new(),
        }
    }
}

impl<T> Animation for AnyAnimation<T>
where
    T: Clone + PartialEq + 'static,
{
    type Value = T;

    fn value(&self) -> T {
        self.value.clone()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn advance(&mut self, dt: f64) {
        AnyAnimation::advance(self, dt);
    }
}

impl<T: fmt::Debug> fmt::Debug for AnyAnimation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyAnimation")
            .field("value", &self.value)
            .field("finished", &self.finished)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
