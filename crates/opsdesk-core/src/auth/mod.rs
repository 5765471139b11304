//! Authentication module for managing sessions and stored credentials.
//!
//! This module provides:
//! - `TokenStore`: durable bearer-token storage (file, OS keychain, memory)
//! - `Session`: the identity validated from an authentication exchange
//! - `SessionManager`: the state machine behind sign-in, sign-up, sign-out
//!   and refresh, publishing `SessionSnapshot`s to `SessionHandle` readers
//!
//! A stored token is never trusted until a refresh exchange succeeds.

pub mod credentials;
pub mod error;
pub mod manager;
pub mod session;
pub mod token_store;

pub use credentials::KeyringTokenStore;
pub use error::{AuthError, GENERIC_AUTH_FAILURE};
pub use manager::{
    AuthApi, SessionCell, SessionHandle, SessionManager, SessionRevoker, SessionSnapshot,
    SessionStatus,
};
pub use session::Session;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
