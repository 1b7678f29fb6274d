// User shape consumed, not owned, by the core
//
// The session provider supplies this; the engine trusts whatever identity
// strings it is given. Only the access filter layer inspects role,
// department, permissions, and plant access.

use serde::{Deserialize, Serialize};

use super::step::{Department, UserRole};

/// A user as seen by the access filter layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub department: Department,
    /// Permission strings, e.g. "workflow.start", "inbound.create"
    pub permissions: Vec<String>,
    /// Plant ids this user may see records for
    pub plant_access: Vec<String>,
}

impl User {
    pub fn new<I, N>(id: I, name: N, role: UserRole, department: Department) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        User {
            id: id.into(),
            name: name.into(),
            role,
            department,
            permissions: vec![],
            plant_access: vec![],
        }
    }

    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions = permissions.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_plant_access(mut self, plants: &[&str]) -> Self {
        self.plant_access = plants.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Super admins bypass every plant and department filter
    pub fn is_super_admin(&self) -> bool {
        self.role == UserRole::SuperAdmin
    }

    /// Admin-or-above, used by the navigation department override
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::SuperAdmin | UserRole::Admin)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_super_admin() || self.permissions.iter().any(|p| p == permission)
    }

    pub fn can_access_plant(&self, plant_id: &str) -> bool {
        self.is_super_admin() || self.plant_access.iter().any(|p| p == plant_id)
    }
}
