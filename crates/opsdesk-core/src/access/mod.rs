//! Who may see what: roles, the navigation table and route guards.

pub mod guard;
pub mod navigation;
pub mod role;

pub use guard::{evaluate_route, GuardOutcome, LayoutGuard, LayoutOutcome, RoleGuard};
pub use navigation::{
    allowed_roles, home_route, item_for_path, navigation_for, resolve_navigation, NavigationItem,
    NAVIGATION,
};
pub use role::{Role, UnknownRole};
