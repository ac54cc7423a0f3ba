//! The animation abstraction and its combinators
//!
//! Every strategy in this crate (timing curves, springs, erased wrappers)
//! implements [`Animation`]: it owns a current value and a finished flag and
//! is stepped forward by an externally supplied time delta. Nothing here reads
//! a clock.

use crate::erased::AnyAnimation;

/// A steppable computation that owns a current value
pub trait Animation {
    /// The animated value type
    type Value: Clone;

    /// The current value
    fn value(&self) -> Self::Value;

    /// Whether the animation has come to rest
    fn is_finished(&self) -> bool;

    /// Step the animation forward by `dt` seconds
    ///
    /// Callers pass finite, non-negative deltas, once per tick.
    fn advance(&mut self, dt: f64);
}

/// Notification published on animation change streams
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationEvent<T> {
    /// The value changed during an `advance`
    Changed(T),
    /// The animation finished (or a spring settled) with this value
    Completed(T),
}

impl<T> AnimationEvent<T> {
    /// The value carried by the event
    pub fn value(&self) -> &T {
        match self {
            AnimationEvent::Changed(value) | AnimationEvent::Completed(value) => value,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AnimationEvent::Completed(_))
    }
}

/// Combinators available on every [`Animation`]
pub trait AnimationExt: Animation + Sized {
    /// Transform the output value
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Value) -> U,
        U: Clone,
    {
        Map {
            animation: self,
            f,
        }
    }

    /// Run `next` once this animation finishes
    fn chain<B>(self, next: B) -> Chain<Self, B>
    where
        B: Animation<Value = Self::Value>,
    {
        Chain {
            first: self,
            second: next,
        }
    }

    /// Erase the concrete type
    fn boxed(self) -> AnyAnimation<Self::Value>
    where
        Self: Clone + 'static,
        Self::Value: PartialEq + 'static,
    {
        AnyAnimation::new(self)
    }
}

impl<A: Animation> AnimationExt for A {}

/// Animation whose output is transformed by a function
///
/// Created by [`AnimationExt::map`].
#[derive(Clone, Debug)]
pub struct Map<A, F> {
    animation: A,
    f: F,
}

impl<A, F> Map<A, F> {
    /// The wrapped animation
    pub fn inner(&self) -> &A {
        &self.animation
    }
}

impl<A, F, U> Animation for Map<A, F>
where
    A: Animation,
    F: Fn(A::Value) -> U,
    U: Clone,
{
    type Value = U;

    fn value(&self) -> U {
        (self.f)(self.animation.value())
    }

    fn is_finished(&self) -> bool {
        self.animation.is_finished()
    }

    fn advance(&mut self, dt: f64) {
        self.animation.advance(dt);
    }
}

/// Two animations run back to back
///
/// Created by [`AnimationExt::chain`]. Time left over in the step that
/// finishes the first animation is not carried into the second.
#[derive(Clone, Debug)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A, B> Animation for Chain<A, B>
where
    A: Animation,
    B: Animation<Value = A::Value>,
{
    type Value = A::Value;

    fn value(&self) -> A::Value {
        if self.first.is_finished() {
            self.second.value()
        } else {
            self.first.value()
        }
    }

    fn is_finished(&self) -> bool {
        self.first.is_finished() && self.second.is_finished()
    }

    fn advance(&mut self, dt: f64) {
        if self.first.is_finished() {
            self.second.advance(dt);
        } else {
            self.first.advance(dt);
        }
    }
}
