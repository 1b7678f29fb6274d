// Plant and department scoping, permission checks, navigation filtering

//! # Record Filters and Permission Checks
//!
//! Each department-scoped filter hard-codes the allow-list of departments
//! permitted to view one record class. The workflow-process filter goes one
//! level finer: a department sees only the business domains mapped to it,
//! matched on the explicit [`ProcessDomain`] field of each record.
//!
//! [`can_perform_action`] dispatches on a fixed action-to-permission table
//! and answers `false` for unrecognized actions - unknown is denied.

use crate::models::{
    Department, InboundOperation, Investigation, ProcessDomain, ProcurementProcess,
    ProjectProcess, QualityCheck, User,
};

/// Any record shape carrying a plant id can be plant-filtered.
pub trait PlantScoped {
    fn plant_id(&self) -> &str;
}

/// Records that additionally belong to a business domain, used by the
/// workflow-process filter.
pub trait DomainScoped: PlantScoped {
    fn domain(&self) -> ProcessDomain;
}

macro_rules! impl_scoped {
    ($($record:ty),+ $(,)?) => {
        $(
            impl PlantScoped for $record {
                fn plant_id(&self) -> &str {
                    &self.plant_id
                }
            }

            impl DomainScoped for $record {
                fn domain(&self) -> ProcessDomain {
                    <$record>::DOMAIN
                }
            }
        )+
    };
}

impl_scoped!(
    InboundOperation,
    ProjectProcess,
    ProcurementProcess,
    Investigation,
    QualityCheck,
);

/// Keep only items at plants the user may access; super admins see all.
///
/// Idempotent: filtering an already-filtered collection changes nothing.
pub fn filter_by_plant_access<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    if user.is_super_admin() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| user.can_access_plant(item.plant_id()))
        .collect()
}

fn filter_with_allow_list<T: PlantScoped>(
    items: Vec<T>,
    user: &User,
    allowed: &[Department],
) -> Vec<T> {
    if user.is_super_admin() {
        return items;
    }
    if !allowed.contains(&user.department) {
        return vec![];
    }
    filter_by_plant_access(items, user)
}

const CUSTOMER_DEPARTMENTS: &[Department] = &[
    Department::Marketing,
    Department::Finance,
    Department::Operations,
    Department::Admin,
];

const ORDER_DEPARTMENTS: &[Department] = &[
    Department::Marketing,
    Department::Operations,
    Department::Logistics,
    Department::Finance,
    Department::Admin,
];

const INVENTORY_DEPARTMENTS: &[Department] = &[
    Department::Operations,
    Department::Procurement,
    Department::Logistics,
    Department::Admin,
];

const PRODUCT_DEPARTMENTS: &[Department] = &[
    Department::Marketing,
    Department::Operations,
    Department::Procurement,
    Department::Admin,
];

const TRUCK_DEPARTMENTS: &[Department] = &[
    Department::Operations,
    Department::Logistics,
    Department::Admin,
];

pub fn filter_customers_by_department<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    filter_with_allow_list(items, user, CUSTOMER_DEPARTMENTS)
}

pub fn filter_orders_by_department<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    filter_with_allow_list(items, user, ORDER_DEPARTMENTS)
}

pub fn filter_inventory_by_department<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    filter_with_allow_list(items, user, INVENTORY_DEPARTMENTS)
}

pub fn filter_products_by_department<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    filter_with_allow_list(items, user, PRODUCT_DEPARTMENTS)
}

pub fn filter_trucks_by_department<T: PlantScoped>(items: Vec<T>, user: &User) -> Vec<T> {
    filter_with_allow_list(items, user, TRUCK_DEPARTMENTS)
}

/// Business domains a department may see workflow-process records for.
fn domains_for_department(department: Department) -> &'static [ProcessDomain] {
    match department {
        Department::Operations => &[
            ProcessDomain::InboundLogistics,
            ProcessDomain::Investigations,
            ProcessDomain::Quality,
        ],
        Department::Logistics => &[ProcessDomain::InboundLogistics],
        Department::Projects => &[ProcessDomain::Projects],
        Department::Procurement => &[ProcessDomain::Procurement],
        Department::Quality => &[ProcessDomain::Quality, ProcessDomain::Investigations],
        Department::Admin => &[
            ProcessDomain::InboundLogistics,
            ProcessDomain::Projects,
            ProcessDomain::Procurement,
            ProcessDomain::Investigations,
            ProcessDomain::Quality,
        ],
        Department::Finance | Department::Hr | Department::Marketing => &[],
    }
}

/// Keep only workflow-process records in domains mapped to the user's
/// department, at plants the user may access. Super admins see all.
pub fn filter_workflow_processes_by_department<T: DomainScoped>(
    items: Vec<T>,
    user: &User,
) -> Vec<T> {
    if user.is_super_admin() {
        return items;
    }
    let domains = domains_for_department(user.department);
    let visible: Vec<T> = items
        .into_iter()
        .filter(|item| domains.contains(&item.domain()))
        .collect();
    filter_by_plant_access(visible, user)
}

/// Permission string required for an action, or `None` for unknown actions.
fn required_permission(action: &str) -> Option<&'static str> {
    match action {
        "start_process" => Some("workflow.start"),
        "advance_process" => Some("workflow.advance"),
        "assign_process" => Some("workflow.assign"),
        "create_inbound_operation" => Some("inbound.create"),
        "update_inbound_operation" => Some("inbound.update"),
        "create_project" => Some("projects.create"),
        "approve_budget" => Some("projects.approve_budget"),
        "create_procurement" => Some("procurement.create"),
        "open_investigation" => Some("investigations.open"),
        "perform_quality_check" => Some("quality.check"),
        "view_dashboard" => Some("dashboard.view"),
        "manage_users" => Some("admin.users"),
        _ => None,
    }
}

/// Whether the user may perform a named action, optionally at a target
/// plant. Unknown actions are denied.
pub fn can_perform_action(action: &str, user: &User, target_plant: Option<&str>) -> bool {
    if user.is_super_admin() {
        return true;
    }
    if let Some(plant) = target_plant {
        if !user.can_access_plant(plant) {
            return false;
        }
    }
    match required_permission(action) {
        Some(permission) => user.has_permission(permission),
        None => false,
    }
}

/// One entry in a navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub path: &'static str,
    /// Permission required to see this entry
    pub permission: &'static str,
    /// For business-process entries: the owning department
    pub department: Option<Department>,
}

const fn core_item(
    id: &'static str,
    label: &'static str,
    path: &'static str,
    permission: &'static str,
) -> NavItem {
    NavItem {
        id,
        label,
        path,
        permission,
        department: None,
    }
}

const fn process_item(
    id: &'static str,
    label: &'static str,
    path: &'static str,
    permission: &'static str,
    department: Department,
) -> NavItem {
    NavItem {
        id,
        label,
        path,
        permission,
        department: Some(department),
    }
}

const CORE_MODULES: &[NavItem] = &[
    core_item("dashboard", "Dashboard", "/dashboard", "dashboard.view"),
    core_item("inventory", "Inventory", "/inventory", "inventory.view"),
    core_item("finance", "Finance", "/finance", "finance.view"),
    core_item("hr", "Human Resources", "/hr", "hr.view"),
    core_item("procurement", "Procurement", "/procurement", "procurement.view"),
    core_item("reports", "Reports", "/reports", "reports.view"),
];

const PROCESS_MODULES: &[NavItem] = &[
    process_item(
        "inbound-operations",
        "Inbound Operations",
        "/processes/inbound",
        "inbound.view",
        Department::Operations,
    ),
    process_item(
        "projects",
        "Projects",
        "/processes/projects",
        "projects.view",
        Department::Projects,
    ),
    process_item(
        "procurement-processes",
        "Procurement Processes",
        "/processes/procurement",
        "procurement.view",
        Department::Procurement,
    ),
    process_item(
        "investigations",
        "Investigations",
        "/processes/investigations",
        "investigations.view",
        Department::Quality,
    ),
    process_item(
        "quality-checks",
        "Quality Checks",
        "/processes/quality",
        "quality.view",
        Department::Quality,
    ),
];

/// The two menus a user is entitled to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub core: Vec<NavItem>,
    pub processes: Vec<NavItem>,
}

/// Filter the static menus down to what the user holds permissions for.
///
/// Business-process entries additionally require a department match, with
/// an override for admins.
pub fn authorized_navigation(user: &User) -> Navigation {
    let core = CORE_MODULES
        .iter()
        .filter(|item| user.has_permission(item.permission))
        .copied()
        .collect();

    let processes = PROCESS_MODULES
        .iter()
        .filter(|item| {
            user.has_permission(item.permission)
                && (user.is_admin() || item.department == Some(user.department))
        })
        .copied()
        .collect();

    Navigation { core, processes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        NewInboundOperation, NewInvestigation, NewProjectProcess, ProcessPriority, UserRole,
    };

    struct Truck {
        plant_id: String,
    }

    impl PlantScoped for Truck {
        fn plant_id(&self) -> &str {
            &self.plant_id
        }
    }

    fn trucks() -> Vec<Truck> {
        vec![
            Truck { plant_id: "plant-1".into() },
            Truck { plant_id: "plant-2".into() },
            Truck { plant_id: "plant-3".into() },
        ]
    }

    fn super_admin() -> User {
        User::new("user-1", "Root", UserRole::SuperAdmin, Department::Admin)
    }

    fn ops_staff() -> User {
        User::new("user-5", "Ops", UserRole::Staff, Department::Operations)
            .with_plant_access(&["plant-1", "plant-2"])
    }

    #[test]
    fn test_plant_filter_is_idempotent() {
        let user = ops_staff();
        let once = filter_by_plant_access(trucks(), &user);
        let twice = filter_by_plant_access(
            once.iter()
                .map(|t| Truck { plant_id: t.plant_id.clone() })
                .collect(),
            &user,
        );
        assert_eq!(once.len(), 2);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn test_super_admin_bypasses_every_filter() {
        let user = super_admin();
        assert_eq!(filter_by_plant_access(trucks(), &user).len(), 3);
        assert_eq!(filter_trucks_by_department(trucks(), &user).len(), 3);
        assert_eq!(filter_customers_by_department(trucks(), &user).len(), 3);
        assert_eq!(filter_orders_by_department(trucks(), &user).len(), 3);
    }

    #[test]
    fn test_unauthorized_department_sees_nothing_despite_plant_access() {
        // HR is not on the trucks allow-list, plant access notwithstanding
        let hr = User::new("user-7", "HR", UserRole::Staff, Department::Hr)
            .with_plant_access(&["plant-1", "plant-2", "plant-3"]);
        assert!(filter_trucks_by_department(trucks(), &hr).is_empty());
        assert!(filter_inventory_by_department(trucks(), &hr).is_empty());
    }

    #[test]
    fn test_allowed_department_composes_with_plant_access() {
        let user = ops_staff();
        let visible = filter_trucks_by_department(trucks(), &user);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|t| t.plant_id != "plant-3"));
    }

    #[test]
    fn test_workflow_process_filter_matches_on_domain() {
        let inbound = InboundOperation::create(NewInboundOperation {
            plant_id: "plant-1".into(),
            supplier: "Gulf Gas".into(),
            truck_number: "T-101".into(),
            driver_name: "A. Bello".into(),
            quantity_kg: 25_000.0,
        });
        let investigation = Investigation::create(NewInvestigation {
            plant_id: "plant-1".into(),
            subject: "Seal mismatch".into(),
            severity: ProcessPriority::High,
        });

        // operations sees inbound and investigations
        let ops = ops_staff();
        assert_eq!(
            filter_workflow_processes_by_department(vec![inbound.clone()], &ops).len(),
            1
        );
        assert_eq!(
            filter_workflow_processes_by_department(vec![investigation.clone()], &ops).len(),
            1
        );

        // projects does not see inbound domain records
        let projects = User::new("user-8", "PM", UserRole::Staff, Department::Projects)
            .with_plant_access(&["plant-1"]);
        assert!(filter_workflow_processes_by_department(vec![inbound], &projects).is_empty());
        let project = ProjectProcess::create(NewProjectProcess {
            plant_id: "plant-1".into(),
            title: "Tank farm expansion".into(),
            budget: 1_500_000.0,
        });
        assert_eq!(
            filter_workflow_processes_by_department(vec![project], &projects).len(),
            1
        );
    }

    #[test]
    fn test_workflow_process_filter_still_respects_plant_access() {
        let far_away = InboundOperation::create(NewInboundOperation {
            plant_id: "plant-9".into(),
            supplier: "Gulf Gas".into(),
            truck_number: "T-101".into(),
            driver_name: "A. Bello".into(),
            quantity_kg: 25_000.0,
        });
        assert!(filter_workflow_processes_by_department(vec![far_away], &ops_staff()).is_empty());
    }

    #[test]
    fn test_can_perform_action_table() {
        let user = User::new("user-5", "Ops", UserRole::Staff, Department::Operations)
            .with_permissions(&["inbound.create"])
            .with_plant_access(&["plant-1"]);

        assert!(can_perform_action("create_inbound_operation", &user, None));
        assert!(can_perform_action("create_inbound_operation", &user, Some("plant-1")));
        // plant the user cannot access
        assert!(!can_perform_action("create_inbound_operation", &user, Some("plant-2")));
        // permission not held
        assert!(!can_perform_action("approve_budget", &user, None));
        // unknown action is denied
        assert!(!can_perform_action("launch_rocket", &user, None));
        // super admin is unconditional
        assert!(can_perform_action("launch_rocket", &super_admin(), Some("plant-9")));
    }

    #[test]
    fn test_navigation_requires_permission_and_department() {
        let user = User::new("user-5", "Ops", UserRole::Staff, Department::Operations)
            .with_permissions(&["dashboard.view", "inbound.view", "projects.view"]);

        let nav = authorized_navigation(&user);
        let core_ids: Vec<&str> = nav.core.iter().map(|i| i.id).collect();
        assert_eq!(core_ids, vec!["dashboard"]);

        // holds projects.view but is not in the projects department
        let process_ids: Vec<&str> = nav.processes.iter().map(|i| i.id).collect();
        assert_eq!(process_ids, vec!["inbound-operations"]);
    }

    #[test]
    fn test_navigation_admin_override_spans_departments() {
        let admin = User::new("user-2", "Admin", UserRole::Admin, Department::Admin)
            .with_permissions(&["inbound.view", "projects.view"]);
        let nav = authorized_navigation(&admin);
        let process_ids: Vec<&str> = nav.processes.iter().map(|i| i.id).collect();
        assert_eq!(process_ids, vec!["inbound-operations", "projects"]);

        let root_nav = authorized_navigation(&super_admin());
        assert_eq!(root_nav.core.len(), CORE_MODULES.len());
        assert_eq!(root_nav.processes.len(), PROCESS_MODULES.len());
    }
}
