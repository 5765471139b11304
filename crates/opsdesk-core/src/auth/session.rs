use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::access::Role;
use crate::models::AuthResponse;

use super::AuthError;

/// The identity and credential currently recognized by the client.
#[derive(Clone, PartialEq, Serialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    /// Role as the backend spelled it; may be outside the known set.
    pub role: String,
    pub display_name: Option<String>,
    #[serde(skip)]
    pub token: String,
    pub established_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from an exchange response.
    ///
    /// A token plus a user with id and role are mandatory; anything less is
    /// a protocol violation. `fallback_email` fills in the email when the
    /// backend omits it (the caller knows what it signed in with).
    pub fn from_auth_response(
        response: AuthResponse,
        fallback_email: Option<&str>,
    ) -> Result<Self, AuthError> {
        let token = response
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::ProtocolViolation("missing token".to_string()))?;

        let user = response
            .user
            .ok_or_else(|| AuthError::ProtocolViolation("missing user".to_string()))?;

        let user_id = user
            .id
            .filter(|id| !id.is_blank())
            .map(|id| id.to_string())
            .ok_or_else(|| AuthError::ProtocolViolation("missing user id".to_string()))?;

        let role = user
            .role
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .ok_or_else(|| AuthError::ProtocolViolation("missing user role".to_string()))?;

        let email = user
            .email
            .or_else(|| fallback_email.map(str::to_string))
            .unwrap_or_default();

        Ok(Self {
            user_id,
            email,
            role,
            display_name: user.name.filter(|n| !n.trim().is_empty()),
            token,
            established_at: Utc::now(),
        })
    }

    /// Known role, or `None` for a role outside the closed set.
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn has_any_role(&self, allowed: &[Role]) -> bool {
        self.role().is_some_and(|role| allowed.contains(&role))
    }

    /// Name for the status bar.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

// Token stays out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .field("token", &"<redacted>")
            .field("established_at", &self.established_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RecordId, UserRecord};

    fn response(token: Option<&str>, id: Option<RecordId>, role: Option<&str>) -> AuthResponse {
        AuthResponse {
            token: token.map(str::to_string),
            user: Some(UserRecord {
                id,
                email: Some("ada@example.com".to_string()),
                role: role.map(str::to_string),
                name: Some("Ada".to_string()),
            }),
        }
    }

    #[test]
    fn test_valid_response() {
        let session =
            Session::from_auth_response(response(Some("jwt"), Some(RecordId::Number(3)), Some("hr")), None)
                .unwrap();
        assert_eq!(session.user_id, "3");
        assert_eq!(session.role(), Some(Role::Hr));
        assert_eq!(session.label(), "Ada");
        assert_eq!(session.token, "jwt");
    }

    #[test]
    fn test_missing_token_is_protocol_violation() {
        for token in [None, Some(""), Some("   ")] {
            let err = Session::from_auth_response(
                response(token, Some(RecordId::Number(1)), Some("admin")),
                None,
            )
            .unwrap_err();
            assert!(matches!(err, AuthError::ProtocolViolation(_)));
        }
    }

    #[test]
    fn test_missing_user_fields_are_protocol_violations() {
        let no_id = Session::from_auth_response(response(Some("jwt"), None, Some("admin")), None);
        assert!(matches!(no_id, Err(AuthError::ProtocolViolation(_))));

        let blank_id = Session::from_auth_response(
            response(Some("jwt"), Some(RecordId::Text(String::new())), Some("admin")),
            None,
        );
        assert!(matches!(blank_id, Err(AuthError::ProtocolViolation(_))));

        let no_role = Session::from_auth_response(response(Some("jwt"), Some(RecordId::Number(1)), None), None);
        assert!(matches!(no_role, Err(AuthError::ProtocolViolation(_))));

        let no_user = Session::from_auth_response(
            AuthResponse { token: Some("jwt".to_string()), user: None },
            None,
        );
        assert!(matches!(no_user, Err(AuthError::ProtocolViolation(_))));
    }

    #[test]
    fn test_unknown_role_is_accepted_but_unrecognized() {
        let session = Session::from_auth_response(
            response(Some("jwt"), Some(RecordId::Number(1)), Some("auditor")),
            None,
        )
        .unwrap();
        assert_eq!(session.role(), None);
        assert!(!session.has_any_role(&Role::ALL));
    }

    #[test]
    fn test_fallback_email_and_label() {
        let resp = AuthResponse {
            token: Some("jwt".to_string()),
            user: Some(UserRecord {
                id: Some(RecordId::Text("u1".to_string())),
                email: None,
                role: Some("customer".to_string()),
                name: None,
            }),
        };
        let session = Session::from_auth_response(resp, Some("me@example.com")).unwrap();
        assert_eq!(session.email, "me@example.com");
        assert_eq!(session.label(), "me@example.com");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::from_auth_response(
            response(Some("secret-jwt"), Some(RecordId::Number(1)), Some("admin")),
            None,
        )
        .unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-jwt"));
        assert!(debug.contains("<redacted>"));
    }
}
