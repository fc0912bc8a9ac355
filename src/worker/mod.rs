//! Worker Module
//!
//! Lifecycle (install, activate) and the control channel.

mod control;
mod lifecycle;

pub use control::ControlMessage;
pub use lifecycle::{LifecycleState, Worker};
