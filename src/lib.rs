// plantflow - process orchestration core for an LPG distribution ERP

//! # plantflow
//!
//! This is the library root for plantflow, the workflow engine behind a
//! multi-department LPG distribution ERP. The crate owns three subsystems:
//!
//! ## Core Components
//!
//! ### Domain Models (`models`)
//! - [`WorkflowDefinition`]: a named template for one kind of business
//!   process (inbound LPG operations, project management, ...)
//! - [`WorkflowStep`] / [`WorkflowTransition`]: the nodes and labeled edges
//!   of a definition's step graph
//! - [`ProcessInstance`]: one live execution of a definition against a real
//!   business record, with an append-only transition history
//! - Business-process records ([`InboundOperation`], [`ProjectProcess`],
//!   [`ProcurementProcess`], [`Investigation`], [`QualityCheck`]) correlated
//!   to instances via their reference number
//!
//! ### Workflow Engine (`engine`)
//! [`WorkflowEngine`] owns the definition catalog and the live instance
//! collection behind a pluggable [`ProcessStorage`] backend. It is the only
//! sanctioned way to move a process forward: `advance_process` validates the
//! requested action against the closed set of transitions declared on the
//! instance's current step and appends exactly one history entry per move.
//!
//! ### Access Filter Layer (`access`)
//! Stateless predicates applied by callers before display: plant-scoped and
//! department-scoped record filters, a permission check, and the navigation
//! menu filter. The engine itself performs no authorization - the filters
//! are pure functions so they can be tested with synthetic users.
//!
//! ## Error Policy
//!
//! Queries report "nothing there" as `Ok(None)` / empty collections.
//! Mutations on a missing id and invalid actions are explicit typed errors
//! ([`PlantFlowError`]) carrying the offending id, step, and action so the
//! caller can render a meaningful message.

// Core domain models: workflow graphs, process instances, business records
pub mod models;

// Engine implementation: storage abstraction, lifecycle operations, stats
pub mod engine;

// Access filter layer: plant/department scoping and permission checks
pub mod access;

// Seeded standard workflow catalog (inbound LPG operation, project management)
pub mod catalog;

// Re-export core domain types for easy access
pub use models::{
    Department,
    InboundOperation,
    Investigation,
    NotificationKind,
    ProcessData,
    ProcessDomain,
    ProcessHistoryEntry,
    ProcessInstance,
    ProcessNotification,
    ProcessPriority,
    ProcessStatus,
    ProcessType,
    ProcurementProcess,
    ProjectProcess,
    QualityCheck,
    Recipient,
    StepId,
    StepTarget,
    User,
    UserRole,
    WorkflowDefinition,
    WorkflowStep,
    WorkflowTransition,
};

// Re-export engine types for convenience
pub use engine::{
    stats::DashboardStats,
    storage::{InMemoryStorage, ProcessStorage},
    WorkflowEngine,
};

// Re-export the access filter layer surface
pub use access::{
    authorized_navigation, can_perform_action, filter_by_plant_access, Navigation, PlantScoped,
};

use thiserror::Error;

/// Error type covering every fallible operation in the crate.
///
/// Invalid actions and unknown ids on mutation paths are both surfaced as
/// explicit variants - the engine never silently ignores a bad input. Each
/// variant carries enough context (process type, step, action, id) for the
/// caller to build a user-facing message.
#[derive(Error, Debug)]
pub enum PlantFlowError {
    /// No active workflow definition exists for the requested process type
    #[error("no active workflow for process type '{process_type}'")]
    NoActiveWorkflow { process_type: String },

    /// A workflow definition referenced by id does not exist
    #[error("workflow not found: {id}")]
    WorkflowNotFound { id: String },

    /// A workflow definition failed structural validation
    #[error("invalid workflow definition '{id}': {reason}")]
    InvalidDefinition { id: String, reason: String },

    /// A process instance referenced by id does not exist
    #[error("process not found: {id}")]
    ProcessNotFound { id: String },

    /// The instance is completed, failed, or cancelled and cannot advance
    #[error("process {id} is not active (status: {status})")]
    ProcessNotActive { id: String, status: String },

    /// The requested action has no matching transition from the current step
    #[error(
        "no transition for action '{action}' from step '{step}' in process {process_id} \
         (available: {available:?})"
    )]
    InvalidAction {
        process_id: String,
        step: String,
        action: String,
        available: Vec<String>,
    },

    /// A business-process record referenced by id does not exist
    #[error("record not found: {id}")]
    RecordNotFound { id: String },

    /// A notification referenced by id does not exist
    #[error("notification not found: {id}")]
    NotificationNotFound { id: String },

    /// Storage-related errors from the backing store
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    /// JSON serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate-wide result alias over [`PlantFlowError`].
pub type Result<T> = std::result::Result<T, PlantFlowError>;
