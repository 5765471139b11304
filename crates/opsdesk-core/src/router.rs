//! Client-side router.
//!
//! The `Navigator` owns the current path. Redirects issued by the HTTP
//! client boundary or the session manager go through it, so they compose
//! with whatever the shell is doing instead of tearing the process down.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

pub mod routes {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const UNAUTHORIZED: &str = "/unauthorized";

    /// Sign-in and sign-up pages are reachable without a session.
    pub fn is_public(path: &str) -> bool {
        path == LOGIN || path == SIGNUP
    }
}

/// Cheap to clone; all clones share one route.
#[derive(Clone)]
pub struct Navigator {
    tx: Arc<watch::Sender<String>>,
}

impl Navigator {
    pub fn new(initial: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(initial.into());
        Self { tx: Arc::new(tx) }
    }

    /// Current path
    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    /// Move to `path`. Navigating to the current path is a no-op.
    pub fn navigate(&self, path: &str) {
        let changed = self.tx.send_if_modified(|current| {
            if current == path {
                false
            } else {
                *current = path.to_string();
                true
            }
        });
        if changed {
            debug!(path, "Navigated");
        }
    }

    /// Abandon the current page and go to sign-in.
    pub fn redirect_to_login(&self) {
        self.navigate(routes::LOGIN);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(routes::ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_route() {
        let nav = Navigator::default();
        let other = nav.clone();
        other.navigate("/customers");
        assert_eq!(nav.current(), "/customers");
    }

    #[test]
    fn test_redirect_to_login() {
        let nav = Navigator::new("/invoices");
        nav.redirect_to_login();
        assert_eq!(nav.current(), routes::LOGIN);
    }

    #[test]
    fn test_public_routes() {
        assert!(routes::is_public(routes::LOGIN));
        assert!(routes::is_public(routes::SIGNUP));
        assert!(!routes::is_public(routes::UNAUTHORIZED));
        assert!(!routes::is_public("/admin"));
    }
}
