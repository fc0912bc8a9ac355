//! Models Module
//!
//! Request and response DTOs for the gateway API.

pub mod requests;
pub mod responses;

pub use requests::{ControlRequest, FetchQuery};
pub use responses::{
    CacheInfoResponse, ClearCacheResponse, ErrorResponse, HealthResponse, StatsResponse,
};
