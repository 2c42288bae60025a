//! One-way hooks through which synchronized hovers leave the sync core.
//!
//! Business logic (selection panels, suggestion lists) and host bindings
//! observe hovers here without being able to influence propagation.

pub mod sinks;

pub use sinks::{HoverCallbacks, HoverHostCallback, HoverSink};
