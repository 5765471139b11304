//! Wire types for the authentication exchanges.

use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

/// Body returned by sign-in, sign-up and refresh.
///
/// Both halves are optional on the wire so that a malformed response can be
/// reported as a protocol violation instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let json = r#"{"token":"jwt","user":{"id":7,"email":"a@b.c","role":"admin","name":"Ada"}}"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token.as_deref(), Some("jwt"));
        let user = resp.user.unwrap();
        assert_eq!(user.id, Some(RecordId::Number(7)));
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_eq!(user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_parse_partial_response() {
        let resp: AuthResponse = serde_json::from_str(r#"{"user":{"email":"a@b.c"}}"#).unwrap();
        assert!(resp.token.is_none());
        assert!(resp.user.unwrap().id.is_none());

        let resp: AuthResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.token.is_none() && resp.user.is_none());
    }

    #[test]
    fn test_sign_up_request_shape() {
        let req = SignUpRequest { email: "a@b.c", password: "pw", name: "Ada" };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, serde_json::json!({"email": "a@b.c", "password": "pw", "name": "Ada"}));
    }
}
