//! Role-based access policy
//!
//! Every protected route names exactly one [`Policy`]; the decision for a
//! role is made here and nowhere else.

use super::model::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Browse the catalogue
    Read,
    /// Create, change or delete catalogue records and inspect users
    Manage,
}

impl Policy {
    pub fn allows(&self, role: Role) -> bool {
        match (self, role) {
            (Policy::Read, Role::Admin | Role::Customer) => true,
            (Policy::Manage, Role::Admin) => true,
            (Policy::Manage, Role::Customer) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_can_read() {
        assert!(Policy::Read.allows(Role::Admin));
        assert!(Policy::Read.allows(Role::Customer));
    }

    #[test]
    fn only_admins_manage() {
        assert!(Policy::Manage.allows(Role::Admin));
        assert!(!Policy::Manage.allows(Role::Customer));
    }
}
