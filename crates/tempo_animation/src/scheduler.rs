//! Animation scheduler
//!
//! Holds a set of type-erased animations and advances them together. The
//! scheduler owns no clock: the host passes the elapsed time of each frame to
//! [`AnimationScheduler::advance`].

use slotmap::{new_key_type, SlotMap};

use crate::animation::Animation;
use crate::erased::AnyAnimation;

new_key_type! {
    pub struct AnimationId;
}

/// A container that ticks all of its animations with the same delta
pub struct AnimationScheduler<T> {
    animations: SlotMap<AnimationId, AnyAnimation<T>>,
}

impl<T> AnimationScheduler<T>
where
    T: Clone + PartialEq + 'static,
{
    pub fn new() -> Self {
        Self {
            animations: SlotMap::with_key(),
        }
    }

    /// Add an animation, erasing its concrete type
    pub fn add<A>(&mut self, animation: A) -> AnimationId
    where
        A: Animation<Value = T> + Clone + 'static,
    {
        self.insert(AnyAnimation::new(animation))
    }

    /// Add an already erased animation, keeping its observers
    pub fn insert(&mut self, animation: AnyAnimation<T>) -> AnimationId {
        self.animations.insert(animation)
    }

    pub fn get(&self, id: AnimationId) -> Option<&AnyAnimation<T>> {
        self.animations.get(id)
    }

    pub fn get_mut(&mut self, id: AnimationId) -> Option<&mut AnyAnimation<T>> {
        self.animations.get_mut(id)
    }

    /// Current value of an animation
    pub fn value(&self, id: AnimationId) -> Option<T> {
        self.animations.get(id).map(AnyAnimation::value)
    }

    pub fn remove(&mut self, id: AnimationId) -> Option<AnyAnimation<T>> {
        self.animations.remove(id)
    }

    /// Advance every unfinished animation by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        for (_, animation) in self.animations.iter_mut() {
            if !animation.is_finished() {
                animation.advance(dt);
            }
        }
    }

    /// Drop finished animations, returning how many were removed
    pub fn remove_finished(&mut self) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, animation| !animation.is_finished());
        let removed = before - self.animations.len();
        if removed > 0 {
            tracing::debug!(
                removed,
                remaining = self.animations.len(),
                "AnimationScheduler: removed finished animations"
            );
        }
        removed
    }

    /// Check if any animations are still active
    pub fn has_active_animations(&self) -> bool {
        self.animations.values().any(|a| !a.is_finished())
    }

    /// Iterate over all animations
    pub fn iter(&self) -> impl Iterator<Item = (AnimationId, &AnyAnimation<T>)> {
        self.animations.iter()
    }

    /// Get the number of animations in the scheduler
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }
}

impl<T> Default for AnimationScheduler<T>
where
    T: Clone + PartialEq + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
