// Dashboard aggregation - pure read-side derivation, no mutation

//! # Dashboard Statistics
//!
//! [`DashboardStats::compute`] derives the dashboard counters from the
//! current instance and investigation collections. It is a pure function of
//! its inputs (including `now`, passed in for testability): approval gates
//! and departments come from the explicit fields on the owning workflow
//! step, never from matching display strings.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Department, Investigation, ProcessInstance, WorkflowDefinition};

/// Counters rendered on the landing dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Instances with status `Active`
    pub active_processes: usize,

    /// Active instances currently sitting at an approval-gate step
    pub pending_approvals: usize,

    /// Investigations in `Pending` or `Ongoing` status
    pub open_investigations: usize,

    /// Instances completed on the same UTC calendar day as `now`
    pub completed_today: usize,

    /// Active instances whose due date has passed
    pub overdue_tasks: usize,

    /// Active instances by the department owning their current step
    pub by_department: HashMap<Department, usize>,

    /// Active instances by process type tag
    pub by_process_type: HashMap<String, usize>,
}

impl DashboardStats {
    /// Derive the stats for `now` from the given collections.
    ///
    /// `workflows` is keyed by definition id; instances whose definition or
    /// current step cannot be resolved still count as active but contribute
    /// nothing to the per-department or approval breakdowns.
    pub fn compute(
        instances: &[ProcessInstance],
        workflows: &HashMap<String, WorkflowDefinition>,
        investigations: &[Investigation],
        now: DateTime<Utc>,
    ) -> Self {
        let mut stats = DashboardStats::default();

        for instance in instances {
            if let Some(completed_at) = instance.completed_at {
                if same_utc_day(completed_at, now) {
                    stats.completed_today += 1;
                }
            }

            if !instance.is_active() {
                continue;
            }
            stats.active_processes += 1;

            if instance.due_date.is_some_and(|due| due < now) {
                stats.overdue_tasks += 1;
            }

            *stats
                .by_process_type
                .entry(instance.process_type.as_str().to_string())
                .or_insert(0) += 1;

            let step = instance
                .current_step_id()
                .and_then(|id| workflows.get(&instance.workflow_id).and_then(|w| w.step(id)));
            if let Some(step) = step {
                *stats.by_department.entry(step.department).or_insert(0) += 1;
                if step.approval_gate {
                    stats.pending_approvals += 1;
                }
            }
        }

        stats.open_investigations = investigations
            .iter()
            .filter(|i| i.status.is_open())
            .count();

        stats
    }
}

fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.year() == b.year() && a.ordinal() == b.ordinal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{inbound_main_path, inbound_operation_workflow};
    use crate::models::{
        NewInvestigation, ProcessData, ProcessPriority, ProcessStatus, StepTarget,
    };
    use chrono::Duration;

    fn advance_along(
        instance: &mut ProcessInstance,
        workflow: &WorkflowDefinition,
        actions: &[&str],
    ) {
        for action in actions {
            let step = instance.current_step_id().unwrap().clone();
            let target = workflow.resolve_transition(&step, action).unwrap().target.clone();
            instance.apply_transition(action, target, "user-1", None, None);
        }
    }

    #[test]
    fn test_mixed_population_aggregation() {
        let workflow = inbound_operation_workflow();
        let mut workflows = HashMap::new();
        workflows.insert(workflow.id.clone(), workflow.clone());
        let now = Utc::now();

        // still at the start step (operations department)
        let at_start = ProcessInstance::new(&workflow, "INB-001", "user-1", ProcessData::new());

        // parked at the offload approval gate
        let mut at_gate = ProcessInstance::new(&workflow, "INB-002", "user-1", ProcessData::new());
        advance_along(&mut at_gate, &workflow, &inbound_main_path()[..11]);
        assert_eq!(at_gate.current_step, StepTarget::step("proceed-offload"));

        // active and overdue
        let mut overdue = ProcessInstance::new(&workflow, "INB-003", "user-1", ProcessData::new());
        overdue.due_date = Some(now - Duration::hours(4));

        // driven all the way through today
        let mut done = ProcessInstance::new(&workflow, "INB-004", "user-1", ProcessData::new());
        advance_along(&mut done, &workflow, &inbound_main_path());
        assert_eq!(done.status, ProcessStatus::Completed);

        let investigations = vec![
            Investigation::create(NewInvestigation {
                plant_id: "plant-1".into(),
                subject: "Seal mismatch".into(),
                severity: ProcessPriority::High,
            }),
            {
                let mut closed = Investigation::create(NewInvestigation {
                    plant_id: "plant-1".into(),
                    subject: "Short load".into(),
                    severity: ProcessPriority::Low,
                });
                closed.status = crate::models::InvestigationStatus::Closed;
                closed
            },
        ];

        let instances = vec![at_start, at_gate, overdue, done];
        let stats = DashboardStats::compute(&instances, &workflows, &investigations, now);

        assert_eq!(stats.active_processes, 3);
        assert_eq!(stats.pending_approvals, 1);
        assert_eq!(stats.open_investigations, 1);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.overdue_tasks, 1);
        assert_eq!(stats.by_process_type["inbound-operation"], 3);
        // start step and overdue instance are at product-request (operations),
        // the gated instance is at proceed-offload (also operations)
        assert_eq!(stats.by_department[&Department::Operations], 3);
    }

    #[test]
    fn test_empty_inputs_produce_zeroes() {
        let stats = DashboardStats::compute(&[], &HashMap::new(), &[], Utc::now());
        assert_eq!(stats, DashboardStats::default());
    }
}
