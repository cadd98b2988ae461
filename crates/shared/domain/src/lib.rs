//! # Domain Models
//!
//! Pure data types shared by every crate in the workspace: the raw request record, the
//! typed feature row handed to classifiers, response payloads and configuration.
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.
//!
//! Payload types carry `utoipa::ToSchema` derives when the `server` feature is enabled.

pub mod config;
pub mod constants;
pub mod frame;
pub mod input;
pub mod response;
pub mod scheme;
