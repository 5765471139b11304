use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role assigned to a user by the backend.
///
/// The set is closed. The backend sends the snake_case name; anything else
/// is kept as a raw string on the session and resolves to no access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Finance,
    SalesManager,
    SalesExec,
    Customer,
    Hr,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Finance,
        Role::SalesManager,
        Role::SalesExec,
        Role::Customer,
        Role::Hr,
    ];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Finance => "finance",
            Role::SalesManager => "sales_manager",
            Role::SalesExec => "sales_exec",
            Role::Customer => "customer",
            Role::Hr => "hr",
        }
    }

    /// Human-readable name for the status bar.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Finance => "Finance",
            Role::SalesManager => "Sales Manager",
            Role::SalesExec => "Sales Executive",
            Role::Customer => "Customer",
            Role::Hr => "Human Resources",
        }
    }

    /// Parse a wire name. Matching is exact; the backend owns the spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Role::ALL.into_iter().find(|role| role.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}
