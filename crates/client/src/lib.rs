//! Client-side companion to the atelier API: a typed HTTP client plus the
//! polling loop that converts asynchronous job completion into a single
//! awaited result.

pub mod api;
pub mod poll;

pub use api::{ApiClient, ClientError};
pub use poll::{poll_project, PollConfig, PollError};
