//! Event system for the sort visualizer
//!
//! This crate provides the event bus and event types that carry sort
//! progress from the driver to whatever renders it.

mod bus;
mod types;

pub use bus::{EventBus, Subscription};
pub use types::*;
