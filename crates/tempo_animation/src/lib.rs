//! Tempo Animation Engine
//!
//! Timing curves, spring physics, and type-erased animations driven by an
//! external clock.
//!
//! # Features
//!
//! - **Timing Curves**: Cubic-bezier progress curves (Newton-Raphson with bisection fallback)
//! - **Spring Physics**: Semi-implicit Euler springs with tension, damping, mass
//! - **Interruptible**: Springs keep their velocity when retargeted
//! - **Type Erasure**: Store heterogeneous animations with value semantics
//! - **Change Streams**: Observe value changes and completion
//! - **Presets**: Named springs and curves loaded from TOML
//!
//! Nothing in this crate reads a clock. The host calls `advance(dt)` once per
//! frame with the elapsed seconds.
//!
//! # Example
//!
//! ```rust
//! use tempo_animation::{AnimationExt, BasicAnimation, Spring, SpringConfig, UnitBezier};
//!
//! let fade = BasicAnimation::new(0.0_f64, 1.0, 0.3, UnitBezier::ease_in_out());
//! let slide = Spring::new(SpringConfig::stiff(), 0.0).with_target(120.0);
//!
//! let mut animations = vec![fade.boxed(), slide.boxed()];
//! for _ in 0..120 {
//!     for animation in &mut animations {
//!         animation.advance(1.0 / 60.0);
//!     }
//! }
//!
//! assert!(animations.iter().all(|a| a.is_finished()));
//! assert_eq!(animations[1].value(), 120.0);
//! ```

pub mod animation;
pub mod bezier;
pub mod config;
pub mod erased;
pub mod error;
pub mod scheduler;
pub mod spring;
pub mod timing;
pub mod values;

pub use animation::{Animation, AnimationEvent, AnimationExt, Chain, Map};
pub use bezier::UnitBezier;
pub use config::{AnimationConfig, CurveConfig};
pub use erased::AnyAnimation;
pub use error::ConfigError;
pub use scheduler::{AnimationId, AnimationScheduler};
pub use spring::{Spring, SpringConfig};
pub use timing::BasicAnimation;
pub use values::Interpolate;

pub use tempo_core::{Observable, Subscription};
