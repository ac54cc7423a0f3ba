//! Tempo Core
//!
//! Foundational primitives shared by the Tempo animation crates:
//!
//! - **Observable streams**: ordered, synchronous publish/subscribe scoped to
//!   the instance that owns the stream
//! - **Subscriptions**: RAII handles that remove their listener on drop
//!
//! # Example
//!
//! ```rust
//! use tempo_core::Observable;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let stream = Observable::new();
//! let seen = Rc::new(Cell::new(0.0));
//!
//! let sink = seen.clone();
//! let subscription = stream.observe(move |value: &f64| sink.set(*value));
//!
//! stream.publish(&4.0);
//! assert_eq!(seen.get(), 4.0);
//!
//! // Dropping the handle removes the listener
//! drop(subscription);
//! stream.publish(&8.0);
//! assert_eq!(seen.get(), 4.0);
//! ```

pub mod observable;

pub use observable::{Observable, Subscription};
