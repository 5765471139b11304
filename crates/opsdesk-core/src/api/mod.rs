//! REST API client module for the opsdesk backend.
//!
//! This module provides the `ApiClient`, the single gateway every request
//! leaves through. It attaches the bearer token held by the token store and
//! applies the global 401 policy (clear the token, redirect to sign-in).

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
