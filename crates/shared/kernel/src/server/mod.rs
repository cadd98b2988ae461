//! HTTP plumbing shared by every slice: the state registry handlers extract slices from,
//! and [`ApiError`], the single error type handlers return.

mod error;
mod state;

pub use error::{ApiError, ApiErrorExt, ErrorBody, ViolationDetail, not_found};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};

use axum::http::{HeaderName, header};

/// Headers for responses that must never be served from a cache.
pub const NO_CACHE: [(HeaderName, &str); 2] = [
    (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (header::PRAGMA, "no-cache"),
];
