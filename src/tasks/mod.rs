//! Background Tasks Module
//!
//! Detached tasks spawned by the request router.

mod revalidate;

pub use revalidate::spawn_revalidation;
