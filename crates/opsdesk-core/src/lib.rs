//! Core library for opsdesk.
//!
//! This crate holds everything the client shell needs that is not drawing:
//!
//! - `auth`: token stores and the `SessionManager` state machine
//! - `api`: the HTTP client boundary to the backend
//! - `access`: roles, the navigation table and route guards
//! - `router`: the `Navigator` that owns the current route
//! - `config`: configuration loading
//! - `models`: wire types for authentication and the domain screens

pub mod access;
pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod router;

pub use access::{GuardOutcome, LayoutGuard, LayoutOutcome, NavigationItem, Role, RoleGuard};
pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, Session, SessionHandle, SessionManager, SessionSnapshot, SessionStatus};
pub use config::Config;
pub use router::Navigator;
