// Standard workflow catalog - the seeded definitions the ERP ships with

//! # Standard Catalog
//!
//! Seeded workflow definitions for the two shipped business processes: the
//! inbound LPG operation (product request through post-delivery posting) and
//! the project management workflow (initiation through closeout). The engine
//! registers these at construction via
//! [`WorkflowEngine::with_standard_catalog`].
//!
//! Definitions are data, not code: adding a process to the catalog means
//! authoring steps and transitions here and nothing else. Every seeded
//! definition must pass [`WorkflowDefinition::validate`] and have no
//! unreachable steps - the tests at the bottom pin both.
//!
//! [`WorkflowEngine::with_standard_catalog`]: crate::engine::WorkflowEngine::with_standard_catalog

use crate::models::{
    Department, ProcessDomain, ProcessType, StepId, StepTarget, UserRole, WorkflowDefinition,
    WorkflowStep, WorkflowTransition,
};

/// All definitions seeded into a standard engine.
pub fn standard_catalog() -> Vec<WorkflowDefinition> {
    vec![inbound_operation_workflow(), project_management_workflow()]
}

fn step(
    id: &str,
    name: &str,
    department: Department,
    role: UserRole,
    description: &str,
    transitions: Vec<WorkflowTransition>,
) -> WorkflowStep {
    WorkflowStep::new(id, name, department, role, description, transitions)
}

fn go(action: &str, target: &str, label: &str) -> WorkflowTransition {
    WorkflowTransition::new(action, StepTarget::step(target), label)
}

fn finish(action: &str, label: &str) -> WorkflowTransition {
    WorkflowTransition::new(action, StepTarget::Complete, label)
}

/// Inbound LPG operation: product request, truck nomination and dispatch,
/// loading, transit, arrival quality check, offload, and inventory posting.
pub fn inbound_operation_workflow() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "inbound-operation-v1",
        "Inbound LPG Operation",
        "End-to-end receipt of LPG product from supplier depot to plant inventory",
        ProcessType::from("inbound-operation"),
        ProcessDomain::InboundLogistics,
        "1.0",
        StepId::from("product-request"),
        vec![
            step(
                "product-request",
                "Product Request",
                Department::Operations,
                UserRole::Staff,
                "Raise a request for product against a supplier contract",
                vec![go("submitted", "check-availability", "Submit Request")],
            ),
            step(
                "check-availability",
                "Check Product Availability",
                Department::Operations,
                UserRole::Supervisor,
                "Confirm the supplier depot can fulfil the requested quantity",
                vec![
                    go("available", "request-truck", "Product Available"),
                    go("unavailable", "product-request", "Revise Request"),
                ],
            )
            .decision(),
            step(
                "request-truck",
                "Request Truck",
                Department::Logistics,
                UserRole::Staff,
                "Request a truck for the confirmed load",
                vec![go("truck_requested", "nominate-truck", "Truck Requested")],
            ),
            step(
                "nominate-truck",
                "Nominate Truck",
                Department::Logistics,
                UserRole::Supervisor,
                "Nominate a specific truck and driver for the haul",
                vec![go("truck_nominated", "dispatch-truck", "Truck Nominated")],
            ),
            step(
                "dispatch-truck",
                "Dispatch Truck",
                Department::Logistics,
                UserRole::Supervisor,
                "Dispatch the nominated truck to the supplier depot",
                vec![go("truck_dispatched", "vehicle-loading", "Truck Dispatched")],
            ),
            step(
                "vehicle-loading",
                "Vehicle Loading",
                Department::Operations,
                UserRole::Staff,
                "Load product at the supplier depot and record loaded quantity",
                vec![go("loading_complete", "seal-truck", "Loading Complete")],
            ),
            step(
                "seal-truck",
                "Seal Truck",
                Department::Operations,
                UserRole::Supervisor,
                "Fit and record the security seals on the loaded truck",
                vec![go("sealed", "issue-waybill", "Truck Sealed")],
            ),
            step(
                "issue-waybill",
                "Issue Waybill",
                Department::Logistics,
                UserRole::Staff,
                "Issue the waybill covering the sealed load",
                vec![go("waybill_issued", "product-transit", "Waybill Issued")],
            ),
            step(
                "product-transit",
                "Product In Transit",
                Department::Logistics,
                UserRole::Staff,
                "Track the truck en route to the receiving plant",
                vec![go("arrived", "confirm-arrival", "Truck Arrived")],
            ),
            step(
                "confirm-arrival",
                "Confirm Arrival",
                Department::Operations,
                UserRole::Staff,
                "Verify seals and waybill against the dispatched load",
                vec![go("arrival_confirmed", "quality-check", "Arrival Confirmed")],
            ),
            step(
                "quality-check",
                "Quality Check",
                Department::Quality,
                UserRole::Staff,
                "Sample and test the arrived product before offload",
                vec![
                    go("passed", "proceed-offload", "Quality Passed"),
                    go("quality_failed", "quality-investigation", "Quality Failed"),
                ],
            )
            .decision(),
            step(
                "quality-investigation",
                "Quality Investigation",
                Department::Quality,
                UserRole::Supervisor,
                "Investigate a failed quality check and decide disposition",
                vec![go("resolved", "proceed-offload", "Investigation Resolved")],
            ),
            step(
                "proceed-offload",
                "Offload Approval",
                Department::Operations,
                UserRole::Manager,
                "Approve offloading of the arrived product into storage",
                vec![go("offload_approved", "confirm-offload", "Offload Approved")],
            )
            .approval(),
            step(
                "confirm-offload",
                "Confirm Offload",
                Department::Operations,
                UserRole::Supervisor,
                "Confirm offloaded quantity against the waybill",
                vec![go("offload_confirmed", "enter-inventory", "Offload Confirmed")],
            ),
            step(
                "enter-inventory",
                "Enter Inventory",
                Department::Operations,
                UserRole::Staff,
                "Post the received quantity into plant inventory",
                vec![go("inventory_entered", "post-delivery", "Inventory Entered")],
            ),
            step(
                "post-delivery",
                "Post Delivery",
                Department::Finance,
                UserRole::Manager,
                "Post the delivery to accounts and close out the operation",
                vec![finish("delivery_posted", "Delivery Posted")],
            )
            .approval(),
        ],
    )
}

/// Project management workflow: initiation, planning, budget approval,
/// contractor selection, execution, monitoring, closeout.
pub fn project_management_workflow() -> WorkflowDefinition {
    WorkflowDefinition::new(
        "project-management-v1",
        "Project Management Workflow",
        "Capital and maintenance projects from initiation to closeout",
        ProcessType::from("project-management"),
        ProcessDomain::Projects,
        "1.0",
        StepId::from("project-initiation"),
        vec![
            step(
                "project-initiation",
                "Project Initiation",
                Department::Projects,
                UserRole::Staff,
                "Register the project and its sponsoring department",
                vec![go("submitted", "project-planning", "Submit Project")],
            ),
            step(
                "project-planning",
                "Project Planning",
                Department::Projects,
                UserRole::Supervisor,
                "Produce the scope, schedule, and budget estimate",
                vec![go("plan_ready", "budget-approval", "Plan Ready")],
            ),
            step(
                "budget-approval",
                "Budget Approval",
                Department::Finance,
                UserRole::Manager,
                "Approve or reject the proposed project budget",
                vec![
                    go("approved", "contractor-selection", "Budget Approved"),
                    go("rejected", "project-planning", "Budget Rejected"),
                ],
            )
            .decision()
            .approval(),
            step(
                "contractor-selection",
                "Contractor Selection",
                Department::Procurement,
                UserRole::Supervisor,
                "Select and contract the executing vendor",
                vec![go("contractor_selected", "project-execution", "Contractor Selected")],
            ),
            step(
                "project-execution",
                "Project Execution",
                Department::Projects,
                UserRole::Staff,
                "Execute the contracted work packages",
                vec![go("work_complete", "project-monitoring", "Work Complete")],
            ),
            step(
                "project-monitoring",
                "Project Monitoring",
                Department::Projects,
                UserRole::Supervisor,
                "Review delivered work against scope and quality",
                vec![go("review_passed", "project-closeout", "Review Passed")],
            ),
            step(
                "project-closeout",
                "Project Closeout",
                Department::Projects,
                UserRole::Manager,
                "Close contracts, reconcile budget, archive the project",
                vec![finish("closed", "Project Closed")],
            )
            .approval(),
        ],
    )
}

/// The main-path actions that drive an inbound operation from product
/// request to completion, in firing order.
pub fn inbound_main_path() -> Vec<&'static str> {
    vec![
        "submitted",
        "available",
        "truck_requested",
        "truck_nominated",
        "truck_dispatched",
        "loading_complete",
        "sealed",
        "waybill_issued",
        "arrived",
        "arrival_confirmed",
        "passed",
        "offload_approved",
        "offload_confirmed",
        "inventory_entered",
        "delivery_posted",
    ]
}
