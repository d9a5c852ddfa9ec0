//! Todo API HTTP client
//!
//! A cookie-carrying client for the to-do backend. Requests that fail with
//! 401 are recovered once by re-establishing the session through the
//! auto-login endpoint with the stored token.

#[macro_use]
extern crate tracing;

pub mod client;
pub mod types;

pub use client::{ApiRequest, ClientError, TodoClient, TodoClientBuilder};
