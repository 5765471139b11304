//! Static navigation table and the role→navigation resolver.
//!
//! Menu entries are plain data. Icons are identifiers that the shell looks
//! up in its own registry when drawing.

use super::Role;
use crate::router::routes;

#[derive(Debug, PartialEq, Eq)]
pub struct NavigationItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    /// Never empty.
    pub roles: &'static [Role],
}

impl NavigationItem {
    pub fn is_visible_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

use Role::{Admin, Customer, Finance, Hr, SalesExec, SalesManager};

/// Menu order is table order.
pub static NAVIGATION: &[NavigationItem] = &[
    NavigationItem { name: "Dashboard", href: "/admin", icon: "dashboard", roles: &[Admin] },
    NavigationItem { name: "Dashboard", href: "/finance", icon: "dashboard", roles: &[Finance] },
    NavigationItem {
        name: "Dashboard",
        href: "/sales",
        icon: "dashboard",
        roles: &[SalesManager, SalesExec],
    },
    NavigationItem { name: "Dashboard", href: "/hr", icon: "dashboard", roles: &[Hr] },
    NavigationItem { name: "Dashboard", href: "/portal", icon: "dashboard", roles: &[Customer] },
    NavigationItem {
        name: "Leads",
        href: "/leads",
        icon: "leads",
        roles: &[SalesManager, SalesExec],
    },
    NavigationItem {
        name: "Customers",
        href: "/customers",
        icon: "customers",
        roles: &[Admin, SalesManager, SalesExec],
    },
    NavigationItem {
        name: "Products",
        href: "/products",
        icon: "products",
        roles: &[Admin, SalesManager, SalesExec],
    },
    NavigationItem {
        name: "Quotations",
        href: "/quotations",
        icon: "quotations",
        roles: &[Admin, SalesManager, Customer],
    },
    NavigationItem {
        name: "Invoices",
        href: "/invoices",
        icon: "invoices",
        roles: &[Admin, Finance, Customer],
    },
    NavigationItem {
        name: "Finance",
        href: "/finance/records",
        icon: "finance",
        roles: &[Admin, Finance],
    },
    NavigationItem { name: "Employees", href: "/employees", icon: "employees", roles: &[Admin, Hr] },
    NavigationItem {
        name: "Departments",
        href: "/departments",
        icon: "departments",
        roles: &[Admin, Hr],
    },
];

/// Menu for a known role.
pub fn navigation_for(role: Role) -> Vec<&'static NavigationItem> {
    NAVIGATION.iter().filter(|item| item.is_visible_to(role)).collect()
}

/// Menu for a role as the backend spelled it. Unknown roles get nothing.
pub fn resolve_navigation(role: &str) -> Vec<&'static NavigationItem> {
    match Role::parse(role) {
        Some(role) => navigation_for(role),
        None => Vec::new(),
    }
}

/// Where a freshly signed-in user lands.
pub fn home_route(role: &str) -> &'static str {
    resolve_navigation(role)
        .first()
        .map(|item| item.href)
        .unwrap_or(routes::UNAUTHORIZED)
}

/// Roles allowed on `path`, or `None` if no menu entry points there.
pub fn allowed_roles(path: &str) -> Option<Vec<Role>> {
    let mut roles: Vec<Role> = Vec::new();
    let mut found = false;
    for item in NAVIGATION.iter().filter(|item| item.href == path) {
        found = true;
        for role in item.roles {
            if !roles.contains(role) {
                roles.push(*role);
            }
        }
    }
    found.then_some(roles)
}

/// Menu entry for a path, used for page titles.
pub fn item_for_path(path: &str) -> Option<&'static NavigationItem> {
    NAVIGATION.iter().find(|item| item.href == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_item_has_roles() {
        for item in NAVIGATION {
            assert!(!item.roles.is_empty(), "{} has no roles", item.href);
        }
    }

    #[test]
    fn test_every_role_sees_only_its_items() {
        for role in Role::ALL {
            let nav = navigation_for(role);
            assert!(!nav.is_empty(), "{} has no navigation", role);
            for item in nav {
                assert!(item.roles.contains(&role));
            }
        }
    }

    #[test]
    fn test_resolution_is_deterministic_and_reference_equal() {
        for role in Role::ALL {
            let first = resolve_navigation(role.as_str());
            let second = resolve_navigation(role.as_str());
            assert_eq!(first.len(), second.len());
            for (a, b) in first.iter().zip(second.iter()) {
                assert!(std::ptr::eq(*a, *b));
            }
        }
    }

    #[test]
    fn test_sales_exec_navigation() {
        let nav: Vec<(&str, &str)> = resolve_navigation("sales_exec")
            .iter()
            .map(|item| (item.name, item.href))
            .collect();
        assert_eq!(
            nav,
            vec![
                ("Dashboard", "/sales"),
                ("Leads", "/leads"),
                ("Customers", "/customers"),
                ("Products", "/products"),
            ]
        );
    }

    #[test]
    fn test_unknown_role_resolves_to_empty() {
        assert!(resolve_navigation("superuser").is_empty());
        assert!(resolve_navigation("").is_empty());
        assert_eq!(home_route("superuser"), routes::UNAUTHORIZED);
    }

    #[test]
    fn test_home_route_is_first_item() {
        assert_eq!(home_route("admin"), "/admin");
        assert_eq!(home_route("customer"), "/portal");
        assert_eq!(home_route("sales_manager"), "/sales");
    }

    #[test]
    fn test_allowed_roles() {
        let roles = allowed_roles("/customers").unwrap();
        assert_eq!(roles, vec![Role::Admin, Role::SalesManager, Role::SalesExec]);
        assert_eq!(allowed_roles("/hr").unwrap(), vec![Role::Hr]);
        assert!(allowed_roles("/nowhere").is_none());
    }
}
