//! Role-gated admin menu: a static table plus one pure filter, instead of
//! per-screen role checks.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Seller,
}

impl Role {
    /// Backend role ids as exposed by the users endpoint.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Manager),
            3 => Some(Role::Seller),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Seller => "seller",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Dashboard,
    Users,
    Products,
    Sales,
    Company,
    Storefront,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Dashboard => "Dashboard",
            MenuItem::Users => "Users",
            MenuItem::Products => "Products",
            MenuItem::Sales => "Sales",
            MenuItem::Company => "Company",
            MenuItem::Storefront => "Storefront",
        }
    }
}

const ALL_ROLES: &[Role] = &[Role::Admin, Role::Manager, Role::Seller];

const MENU: &[(MenuItem, &[Role])] = &[
    (MenuItem::Dashboard, ALL_ROLES),
    (MenuItem::Users, &[Role::Admin]),
    (MenuItem::Products, &[Role::Admin, Role::Manager]),
    (MenuItem::Sales, ALL_ROLES),
    (MenuItem::Company, &[Role::Admin]),
    (MenuItem::Storefront, ALL_ROLES),
];

/// Menu entries the given role may see, in display order.
pub fn visible_items(role: Role) -> Vec<MenuItem> {
    MENU.iter()
        .filter(|(_, allowed)| allowed.contains(&role))
        .map(|(item, _)| *item)
        .collect()
}
