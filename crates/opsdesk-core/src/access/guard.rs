//! Route guards.
//!
//! Guards are pure functions of the current session snapshot and path. The
//! shell re-runs them whenever either changes and applies the outcome; they
//! keep no state and never wait on anything themselves.

use super::navigation::{self, NavigationItem};
use super::Role;
use crate::auth::{Session, SessionSnapshot};
use crate::router::routes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still resolving: show a blocking progress indicator.
    Loading,
    Redirect(&'static str),
    Render,
}

/// Why the first stage stopped.
enum Gate {
    Loading,
    SignIn,
}

impl From<Gate> for GuardOutcome {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Loading => GuardOutcome::Loading,
            Gate::SignIn => GuardOutcome::Redirect(routes::LOGIN),
        }
    }
}

/// Shared first stage: wait for loading, then require a session.
fn authenticated<'s>(snapshot: &'s SessionSnapshot, path: &str) -> Result<&'s Session, Gate> {
    if snapshot.is_loading() && !routes::is_public(path) {
        return Err(Gate::Loading);
    }
    snapshot.session().ok_or(Gate::SignIn)
}

/// Renders children only for sessions whose role is on the allow-list.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allowed: Vec<Role>,
}

impl RoleGuard {
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    /// Guard for a menu route, allowing whoever the menu shows it to.
    pub fn for_route(path: &str) -> Option<Self> {
        navigation::allowed_roles(path).map(|allowed| Self { allowed })
    }

    pub fn evaluate(&self, snapshot: &SessionSnapshot, path: &str) -> GuardOutcome {
        match authenticated(snapshot, path) {
            Err(gate) => gate.into(),
            Ok(session) if session.has_any_role(&self.allowed) => GuardOutcome::Render,
            Ok(_) => GuardOutcome::Redirect(routes::UNAUTHORIZED),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum LayoutOutcome<'s> {
    Loading,
    Redirect(&'static str),
    /// Authenticated shell: navigation around the content slot.
    Shell {
        session: &'s Session,
        navigation: Vec<&'static NavigationItem>,
    },
}

/// Gate for the authenticated shell. A role with no navigation is treated
/// the same as a role that is not permitted.
pub struct LayoutGuard;

impl LayoutGuard {
    pub fn evaluate<'s>(snapshot: &'s SessionSnapshot, path: &str) -> LayoutOutcome<'s> {
        let session = match authenticated(snapshot, path) {
            Ok(session) => session,
            Err(Gate::Loading) => return LayoutOutcome::Loading,
            Err(Gate::SignIn) => return LayoutOutcome::Redirect(routes::LOGIN),
        };

        let navigation = navigation::resolve_navigation(&session.role);
        if navigation.is_empty() {
            return LayoutOutcome::Redirect(routes::UNAUTHORIZED);
        }
        LayoutOutcome::Shell { session, navigation }
    }
}

/// Full decision for one path, as the shell applies it.
///
/// Public pages always render. `/unauthorized` needs a session. The root
/// and unknown paths send a signed-in user to their home route. Menu
/// routes go through the layout guard and then the route's allow-list.
pub fn evaluate_route(snapshot: &SessionSnapshot, path: &str) -> GuardOutcome {
    if routes::is_public(path) {
        return GuardOutcome::Render;
    }

    if path == routes::UNAUTHORIZED {
        return match authenticated(snapshot, path) {
            Ok(_) => GuardOutcome::Render,
            Err(gate) => gate.into(),
        };
    }

    let session = match LayoutGuard::evaluate(snapshot, path) {
        LayoutOutcome::Loading => return GuardOutcome::Loading,
        LayoutOutcome::Redirect(to) => return GuardOutcome::Redirect(to),
        LayoutOutcome::Shell { session, .. } => session,
    };

    match RoleGuard::for_route(path) {
        Some(guard) => guard.evaluate(snapshot, path),
        None => GuardOutcome::Redirect(navigation::home_route(&session.role)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionStatus;
    use chrono::Utc;

    fn session(role: &str) -> Session {
        Session {
            user_id: "1".to_string(),
            email: "user@example.com".to_string(),
            role: role.to_string(),
            display_name: None,
            token: "jwt".to_string(),
            established_at: Utc::now(),
        }
    }

    fn signed_in(role: &str) -> SessionSnapshot {
        SessionSnapshot {
            status: SessionStatus::Authenticated,
            session: Some(session(role)),
            error: None,
            initial_load_pending: false,
        }
    }

    fn signed_out() -> SessionSnapshot {
        SessionSnapshot {
            status: SessionStatus::Unauthenticated,
            session: None,
            error: None,
            initial_load_pending: false,
        }
    }

    fn loading() -> SessionSnapshot {
        SessionSnapshot {
            status: SessionStatus::Loading,
            session: None,
            error: None,
            initial_load_pending: true,
        }
    }

    #[test]
    fn test_role_mismatch_redirects_to_unauthorized_not_login() {
        let guard = RoleGuard::new(&[Role::Admin]);
        assert_eq!(
            guard.evaluate(&signed_in("customer"), "/admin"),
            GuardOutcome::Redirect(routes::UNAUTHORIZED)
        );
    }

    #[test]
    fn test_role_guard_renders_allowed_role() {
        let guard = RoleGuard::new(&[Role::Admin, Role::Hr]);
        assert_eq!(guard.evaluate(&signed_in("hr"), "/employees"), GuardOutcome::Render);
    }

    #[test]
    fn test_missing_session_redirects_to_login() {
        let guard = RoleGuard::new(&[Role::Admin]);
        assert_eq!(
            guard.evaluate(&signed_out(), "/admin"),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }

    #[test]
    fn test_loading_blocks_protected_content() {
        let guard = RoleGuard::new(&Role::ALL);
        assert_eq!(guard.evaluate(&loading(), "/admin"), GuardOutcome::Loading);
        assert_eq!(LayoutGuard::evaluate(&loading(), "/admin"), LayoutOutcome::Loading);
    }

    #[test]
    fn test_loading_does_not_block_public_pages() {
        let guard = RoleGuard::new(&Role::ALL);
        assert_eq!(
            guard.evaluate(&loading(), routes::LOGIN),
            GuardOutcome::Redirect(routes::LOGIN)
        );
        assert_eq!(evaluate_route(&loading(), routes::SIGNUP), GuardOutcome::Render);
    }

    #[test]
    fn test_unknown_role_gets_no_shell() {
        assert_eq!(
            LayoutGuard::evaluate(&signed_in("auditor"), "/admin"),
            LayoutOutcome::Redirect(routes::UNAUTHORIZED)
        );
        assert_eq!(
            RoleGuard::new(&Role::ALL).evaluate(&signed_in("auditor"), "/admin"),
            GuardOutcome::Redirect(routes::UNAUTHORIZED)
        );
    }

    #[test]
    fn test_layout_shell_carries_navigation() {
        let snapshot = signed_in("sales_exec");
        match LayoutGuard::evaluate(&snapshot, "/leads") {
            LayoutOutcome::Shell { session, navigation } => {
                assert_eq!(session.role, "sales_exec");
                assert_eq!(navigation.len(), 4);
            }
            other => panic!("expected shell, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_guard_without_session_redirects_to_login() {
        assert_eq!(
            LayoutGuard::evaluate(&signed_out(), "/admin"),
            LayoutOutcome::Redirect(routes::LOGIN)
        );
    }

    #[test]
    fn test_route_allow_list_from_navigation() {
        assert_eq!(evaluate_route(&signed_in("sales_exec"), "/customers"), GuardOutcome::Render);
        assert_eq!(
            evaluate_route(&signed_in("sales_exec"), "/employees"),
            GuardOutcome::Redirect(routes::UNAUTHORIZED)
        );
        assert_eq!(evaluate_route(&signed_in("finance"), "/finance/records"), GuardOutcome::Render);
    }

    #[test]
    fn test_root_and_unknown_paths_go_home() {
        assert_eq!(
            evaluate_route(&signed_in("hr"), routes::ROOT),
            GuardOutcome::Redirect("/hr")
        );
        assert_eq!(
            evaluate_route(&signed_in("admin"), "/does/not/exist"),
            GuardOutcome::Redirect("/admin")
        );
        assert_eq!(
            evaluate_route(&signed_out(), routes::ROOT),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }

    #[test]
    fn test_unauthorized_page_needs_session() {
        assert_eq!(evaluate_route(&signed_in("auditor"), routes::UNAUTHORIZED), GuardOutcome::Render);
        assert_eq!(
            evaluate_route(&signed_out(), routes::UNAUTHORIZED),
            GuardOutcome::Redirect(routes::LOGIN)
        );
    }

    #[test]
    fn test_error_state_redirects_to_login() {
        let snapshot = SessionSnapshot {
            status: SessionStatus::Error,
            session: None,
            error: None,
            initial_load_pending: false,
        };
        assert_eq!(evaluate_route(&snapshot, "/admin"), GuardOutcome::Redirect(routes::LOGIN));
    }
}
