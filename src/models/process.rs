// Process instances - live executions of a workflow definition

//! # Process Instances
//!
//! A `ProcessInstance` is one live execution of a [`WorkflowDefinition`]
//! against a real-world business record (referenced by `reference_id`). The
//! instance tracks its current step, status, a free-form data bag, and an
//! append-only history: every transition appends exactly one
//! [`ProcessHistoryEntry`] with before/after snapshots of the data bag.
//! History entries are never edited, truncated, or reordered.
//!
//! Status is one-directional: `Active` is the only state a process advances
//! from; `Completed`, `Failed`, and `Cancelled` are final.
//!
//! [`WorkflowDefinition`]: super::workflow::WorkflowDefinition

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::{ProcessType, StepId};
use super::workflow::{StepTarget, WorkflowDefinition};

/// Free-form key/value bag carrying process-specific fields.
///
/// Examples: quantity, truck number, approval comments.
pub type ProcessData = HashMap<String, serde_json::Value>;

/// Lifecycle status of a process instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Active,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProcessStatus::Active => "active",
            ProcessStatus::Completed => "completed",
            ProcessStatus::Failed => "failed",
            ProcessStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", name)
    }
}

/// Priority assigned at start and carried for display/sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for ProcessPriority {
    fn default() -> Self {
        ProcessPriority::Medium
    }
}

/// Immutable audit record appended each time an instance changes step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessHistoryEntry {
    /// The step the instance was at when the action fired
    pub step: StepId,

    /// The action/condition label that fired ("started" for the synthetic
    /// entry recorded at process start)
    pub action: String,

    /// Who performed the action
    pub performed_by: String,

    /// When the action fired (UTC)
    pub timestamp: DateTime<Utc>,

    /// Optional free-text comments supplied with the action
    pub comments: Option<String>,

    /// Snapshot of the data bag before the action (None for the start entry)
    pub previous_data: Option<ProcessData>,

    /// Snapshot of the data bag after the action
    pub new_data: Option<ProcessData>,
}

/// One live, mutable execution of a workflow definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInstance {
    /// Unique instance identifier
    pub id: Uuid,

    /// Process-type tag this instance was started against
    pub process_type: ProcessType,

    /// Id of the definition this instance was instantiated from
    pub workflow_id: String,

    /// Identifier of the concrete business record, e.g. an inbound number
    pub reference_id: String,

    /// Current position in the step graph; `Complete` iff status is Completed
    pub current_step: StepTarget,

    /// Lifecycle status
    pub status: ProcessStatus,

    /// Display/sorting priority
    pub priority: ProcessPriority,

    /// Who started the process
    pub initiated_by: String,

    /// Current assignee, if any
    pub assigned_to: Option<String>,

    /// Free-form process data
    pub data: ProcessData,

    /// Append-only transition history (the start entry is index 0)
    pub history: Vec<ProcessHistoryEntry>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Stamped when the process advances into the completion sentinel
    pub completed_at: Option<DateTime<Utc>>,

    /// Optional deadline; stored for overdue reporting, never enforced
    pub due_date: Option<DateTime<Utc>>,
}

impl ProcessInstance {
    /// Create a new instance positioned at the definition's start step.
    ///
    /// The history starts with exactly one synthetic "started" entry and the
    /// data bag is the caller-supplied map verbatim.
    pub fn new(
        workflow: &WorkflowDefinition,
        reference_id: &str,
        initiated_by: &str,
        data: ProcessData,
    ) -> Self {
        let now = Utc::now();
        let start_entry = ProcessHistoryEntry {
            step: workflow.start_step.clone(),
            action: "started".to_string(),
            performed_by: initiated_by.to_string(),
            timestamp: now,
            comments: None,
            previous_data: None,
            new_data: Some(data.clone()),
        };

        ProcessInstance {
            id: Uuid::new_v4(),
            process_type: workflow.process_type.clone(),
            workflow_id: workflow.id.clone(),
            reference_id: reference_id.to_string(),
            current_step: StepTarget::Step(workflow.start_step.clone()),
            status: ProcessStatus::Active,
            priority: ProcessPriority::default(),
            initiated_by: initiated_by.to_string(),
            assigned_to: None,
            data,
            history: vec![start_entry],
            created_at: now,
            updated_at: now,
            completed_at: None,
            due_date: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProcessStatus::Active
    }

    /// The current step id, unless the instance has reached completion
    pub fn current_step_id(&self) -> Option<&StepId> {
        self.current_step.step_id()
    }

    /// Most recent history entry
    pub fn last_entry(&self) -> Option<&ProcessHistoryEntry> {
        self.history.last()
    }

    /// Apply a resolved transition: move to the target, merge the caller's
    /// partial data update (caller wins on key collision), and append one
    /// history entry bracketing the merge.
    ///
    /// The caller (the engine) has already validated that `action` fires a
    /// transition from the current step; this method only mutates state.
    pub fn apply_transition(
        &mut self,
        action: &str,
        target: StepTarget,
        performed_by: &str,
        comments: Option<String>,
        patch: Option<ProcessData>,
    ) {
        let step_left = match &self.current_step {
            StepTarget::Step(id) => id.clone(),
            // advance on a completed instance is rejected before this point
            StepTarget::Complete => return,
        };

        let previous_data = self.data.clone();
        if let Some(patch) = patch {
            self.data.extend(patch);
        }

        let now = Utc::now();
        self.history.push(ProcessHistoryEntry {
            step: step_left,
            action: action.to_string(),
            performed_by: performed_by.to_string(),
            timestamp: now,
            comments,
            previous_data: Some(previous_data),
            new_data: Some(self.data.clone()),
        });

        if target.is_complete() {
            self.status = ProcessStatus::Completed;
            self.completed_at = Some(now);
        }
        self.current_step = target;
        self.updated_at = now;
    }
}
