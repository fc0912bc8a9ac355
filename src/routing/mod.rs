//! Routing Module
//!
//! Request classification and the per-class caching strategies.

mod classify;
mod router;


pub use classify::{classify, RouteClass};
pub use router::RequestRouter;
