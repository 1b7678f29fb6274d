// Identifiers and closed enumerations for the workflow domain
//
// StepId and ProcessType are thin string wrappers so that clients can define
// workflow graphs with their own vocabulary, while Department, ProcessDomain
// and UserRole are closed enums: the access filter layer and the dashboard
// aggregation dispatch on them by equality, never by substring matching on
// display strings.

use serde::{Deserialize, Serialize};

/// Identifier of one step (node) inside a workflow definition.
///
/// Examples: "product-request", "check-availability", "budget-approval".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub String);

impl StepId {
    /// Create a new step id from any string-like input
    pub fn new<S: Into<String>>(id: S) -> Self {
        StepId(id.into())
    }

    /// Get the step identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepId {
    fn from(s: &str) -> Self {
        StepId(s.to_string())
    }
}

impl From<String> for StepId {
    fn from(s: String) -> Self {
        StepId(s)
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag identifying which kind of business workflow a definition or instance
/// represents.
///
/// Examples: "inbound-operation", "project-management". At most one *active*
/// definition may exist per process type at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessType(pub String);

impl ProcessType {
    /// Create a new process type from any string-like input
    pub fn new<S: Into<String>>(tag: S) -> Self {
        ProcessType(tag.into())
    }

    /// Get the process type tag as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProcessType {
    fn from(s: &str) -> Self {
        ProcessType(s.to_string())
    }
}

impl From<String> for ProcessType {
    fn from(s: String) -> Self {
        ProcessType(s)
    }
}

impl std::fmt::Display for ProcessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organizational unit owning a workflow step or a record class.
///
/// The unit of functional access scoping: department-scoped filters keep a
/// fixed allow-list of these values per record class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Operations,
    Finance,
    Hr,
    Procurement,
    Projects,
    Quality,
    Logistics,
    Marketing,
    Admin,
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Department::Operations => "operations",
            Department::Finance => "finance",
            Department::Hr => "hr",
            Department::Procurement => "procurement",
            Department::Projects => "projects",
            Department::Quality => "quality",
            Department::Logistics => "logistics",
            Department::Marketing => "marketing",
            Department::Admin => "admin",
        };
        write!(f, "{}", name)
    }
}

/// Business domain a process type belongs to.
///
/// Explicit classification field carried on every workflow definition and
/// business record, so the workflow-process filter and the dashboard match
/// on it by equality instead of searching display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessDomain {
    InboundLogistics,
    Projects,
    Procurement,
    Investigations,
    Quality,
}

impl std::fmt::Display for ProcessDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProcessDomain::InboundLogistics => "inbound_logistics",
            ProcessDomain::Projects => "projects",
            ProcessDomain::Procurement => "procurement",
            ProcessDomain::Investigations => "investigations",
            ProcessDomain::Quality => "quality",
        };
        write!(f, "{}", name)
    }
}

/// Role a user holds, and the minimum role a workflow step requires.
///
/// `SuperAdmin` bypasses every plant and department filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Manager,
    Supervisor,
    Staff,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Supervisor => "supervisor",
            UserRole::Staff => "staff",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_id_creation() {
        let step1 = StepId::from("product-request");
        let step2 = StepId::from("product-request".to_string());
        let step3 = StepId::new("product-request");

        assert_eq!(step1, step2);
        assert_eq!(step2, step3);
        assert_eq!(step1.as_str(), "product-request");
        assert_eq!(step1.to_string(), "product-request");
    }

    #[test]
    fn test_process_type_creation() {
        let inbound = ProcessType::from("inbound-operation");
        let projects = ProcessType::new("project-management");

        assert_ne!(inbound, projects);
        assert_eq!(inbound.as_str(), "inbound-operation");
        assert_eq!(format!("{}", projects), "project-management");
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(
            serde_json::to_value(Department::Operations).unwrap(),
            serde_json::json!("operations")
        );
        assert_eq!(
            serde_json::to_value(ProcessDomain::InboundLogistics).unwrap(),
            serde_json::json!("inbound_logistics")
        );
        assert_eq!(
            serde_json::to_value(UserRole::SuperAdmin).unwrap(),
            serde_json::json!("super_admin")
        );
    }
}
