// Core domain models for plantflow
// Generic data structures shared by the engine and the access filter layer

//! # Domain Models
//!
//! Pure data shapes with no engine state: identifiers and enumerations,
//! workflow graphs, process instances, notifications, business-process
//! records, and the `User` shape consumed (not owned) by the core.

// Identifiers and closed enumerations (steps, process types, departments)
pub mod step;

// Workflow definitions: the immutable step graph a process executes against
pub mod workflow;

// Process instances: live executions with append-only history
pub mod process;

// Notifications tied to a user or role recipient
pub mod notification;

// Domain-specific business-process records (inbound, projects, ...)
pub mod records;

// The user shape consumed by the access filter layer
pub mod user;

pub use step::{Department, ProcessDomain, ProcessType, StepId, UserRole};

pub use workflow::{StepTarget, WorkflowDefinition, WorkflowStep, WorkflowTransition};

pub use process::{
    ProcessData, ProcessHistoryEntry, ProcessInstance, ProcessPriority, ProcessStatus,
};

pub use notification::{NotificationKind, ProcessNotification, Recipient};

pub use records::{
    InboundOperation, InboundOperationPatch, InboundStatus, Investigation, InvestigationPatch,
    InvestigationStatus, NewInboundOperation, NewInvestigation, NewProcurementProcess,
    NewProjectProcess, NewQualityCheck, ProcurementProcess, ProcurementProcessPatch,
    ProcurementStatus, ProjectProcess, ProjectProcessPatch, ProjectStatus, QualityCheck,
    QualityCheckPatch, QualityCheckStatus,
};

pub use user::User;
