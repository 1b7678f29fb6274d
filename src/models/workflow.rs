// Workflow definitions - immutable templates for one kind of business process

//! # Workflow Definitions
//!
//! A `WorkflowDefinition` is a complete state machine for one business
//! process: the set of steps (nodes), the labeled transitions between them
//! (edges keyed by an action string), the start step, and the distinguished
//! completion sentinel [`StepTarget::Complete`].
//!
//! Definitions are created at catalog initialization and never mutated at
//! runtime, so the engine can resolve transitions against them without
//! locking. `validate()` performs the structural analysis the engine relies
//! on: a unique start step, unique step ids, and every transition target
//! resolving to a step in the same definition or to completion.

use serde::{Deserialize, Serialize};

use super::step::{Department, ProcessDomain, ProcessType, StepId, UserRole};

/// Destination of a workflow transition.
///
/// Either another step in the same definition or the completion sentinel.
/// Advancing into `Complete` is the only way an instance reaches the
/// `Completed` status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepTarget {
    Step(StepId),
    Complete,
}

impl StepTarget {
    /// Convenience constructor for a step target
    pub fn step<S: Into<StepId>>(id: S) -> Self {
        StepTarget::Step(id.into())
    }

    /// The step id, if this target is not the completion sentinel
    pub fn step_id(&self) -> Option<&StepId> {
        match self {
            StepTarget::Step(id) => Some(id),
            StepTarget::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, StepTarget::Complete)
    }
}

impl std::fmt::Display for StepTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepTarget::Step(id) => write!(f, "{}", id),
            StepTarget::Complete => write!(f, "completed"),
        }
    }
}

/// A labeled edge out of a workflow step.
///
/// The `action` is the condition label callers supply to `advance_process`;
/// the `label` is a human-readable caption for UI purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTransition {
    /// Condition label that must be supplied to fire this transition
    /// Examples: "submitted", "approved", "quality_failed"
    pub action: String,

    /// Destination step, or completion
    pub target: StepTarget,

    /// Human-readable caption shown on action buttons
    pub label: String,
}

impl WorkflowTransition {
    pub fn new<A, L>(action: A, target: StepTarget, label: L) -> Self
    where
        A: Into<String>,
        L: Into<String>,
    {
        WorkflowTransition {
            action: action.into(),
            target,
            label: label.into(),
        }
    }
}

/// One node in a definition's directed step graph.
///
/// A step with zero transitions is implicitly terminal. `approval_gate` and
/// `decision_point` are explicit classification flags - the dashboard counts
/// pending approvals by `approval_gate` equality, never by matching the step
/// name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStep {
    /// Unique identifier within the owning definition
    pub id: StepId,

    /// Display name, e.g. "Check Product Availability"
    pub name: String,

    /// Department responsible for acting on this step
    pub department: Department,

    /// Human description of what happens at this step
    pub description: String,

    /// Minimum role required to act on this step
    pub required_role: UserRole,

    /// Whether outgoing transitions are mutually exclusive business outcomes
    /// (approved/rejected) rather than a single automatic next step
    pub decision_point: bool,

    /// Whether this step is an approval gate, counted in dashboard stats
    pub approval_gate: bool,

    /// Outgoing edges, keyed by action label
    pub transitions: Vec<WorkflowTransition>,
}

impl WorkflowStep {
    pub fn new<I, N, D>(
        id: I,
        name: N,
        department: Department,
        required_role: UserRole,
        description: D,
        transitions: Vec<WorkflowTransition>,
    ) -> Self
    where
        I: Into<StepId>,
        N: Into<String>,
        D: Into<String>,
    {
        WorkflowStep {
            id: id.into(),
            name: name.into(),
            department,
            description: description.into(),
            required_role,
            decision_point: false,
            approval_gate: false,
            transitions,
        }
    }

    /// Mark this step as a decision point
    pub fn decision(mut self) -> Self {
        self.decision_point = true;
        self
    }

    /// Mark this step as an approval gate
    pub fn approval(mut self) -> Self {
        self.approval_gate = true;
        self
    }

    /// Find the outgoing transition matching an action label
    pub fn transition(&self, action: &str) -> Option<&WorkflowTransition> {
        self.transitions.iter().find(|t| t.action == action)
    }

    /// The closed set of action labels that can fire from this step
    pub fn available_actions(&self) -> Vec<String> {
        self.transitions.iter().map(|t| t.action.clone()).collect()
    }

    /// A step with no outgoing transitions is terminal
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// An immutable, named template describing one kind of business process.
///
/// Only one definition per process type may be active at a time; starting a
/// process for a type with no active definition fails rather than silently
/// picking an inactive or older version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Unique identifier, e.g. "inbound-operation-v1"
    pub id: String,

    /// Display name, e.g. "Inbound LPG Operation"
    pub name: String,

    /// Human description of the overall process
    pub description: String,

    /// Process-type tag instances are started against
    pub process_type: ProcessType,

    /// Business domain this process belongs to
    pub domain: ProcessDomain,

    /// Version string, e.g. "1.0"
    pub version: String,

    /// Whether this definition may be instantiated
    pub active: bool,

    /// The step new instances begin at
    pub start_step: StepId,

    /// All steps in this definition's graph
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowDefinition {
    #[allow(clippy::too_many_arguments)]
    pub fn new<I, N, D, V>(
        id: I,
        name: N,
        description: D,
        process_type: ProcessType,
        domain: ProcessDomain,
        version: V,
        start_step: StepId,
        steps: Vec<WorkflowStep>,
    ) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        D: Into<String>,
        V: Into<String>,
    {
        WorkflowDefinition {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            process_type,
            domain,
            version: version.into(),
            active: true,
            start_step,
            steps,
        }
    }

    /// Look up a step by id
    pub fn step(&self, id: &StepId) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| &s.id == id)
    }

    /// Resolve the transition that `action` fires from `from_step`.
    ///
    /// Returns `None` when the step does not exist or the action has no
    /// matching edge. This is the lookup `advance_process` gates on.
    pub fn resolve_transition(&self, from_step: &StepId, action: &str) -> Option<&WorkflowTransition> {
        self.step(from_step).and_then(|s| s.transition(action))
    }

    /// The closed set of actions available from a step (empty for unknown steps)
    pub fn available_actions(&self, from_step: &StepId) -> Vec<String> {
        self.step(from_step)
            .map(|s| s.available_actions())
            .unwrap_or_default()
    }

    /// Validate that the definition is well-formed.
    ///
    /// Checks: step ids are unique, exactly one step matches `start_step`,
    /// and every transition target references a step in this definition or
    /// the completion sentinel.
    pub fn validate(&self) -> Result<(), String> {
        let mut step_ids = std::collections::HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(&step.id) {
                return Err(format!("duplicate step id '{}'", step.id));
            }
        }

        if !step_ids.contains(&self.start_step) {
            return Err(format!("start step '{}' not found in steps", self.start_step));
        }

        for step in &self.steps {
            for transition in &step.transitions {
                if let StepTarget::Step(target) = &transition.target {
                    if !step_ids.contains(target) {
                        return Err(format!(
                            "transition '{}' from step '{}' references unknown step '{}'",
                            transition.action, step.id, target
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// Steps reachable in one transition from the given step
    pub fn outgoing_steps(&self, from_step: &StepId) -> Vec<&StepId> {
        self.step(from_step)
            .map(|s| {
                s.transitions
                    .iter()
                    .filter_map(|t| t.target.step_id())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find steps that can never be reached from the start step.
    ///
    /// Depth-first search over the step graph; unreachable steps indicate a
    /// definition authoring problem.
    pub fn find_unreachable_steps(&self) -> Vec<&StepId> {
        let mut reachable = std::collections::HashSet::new();
        let mut to_visit = vec![&self.start_step];

        while let Some(step_id) = to_visit.pop() {
            if reachable.insert(step_id) {
                for next in self.outgoing_steps(step_id) {
                    if !reachable.contains(next) {
                        to_visit.push(next);
                    }
                }
            }
        }

        self.steps
            .iter()
            .map(|s| &s.id)
            .filter(|id| !reachable.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_definition() -> WorkflowDefinition {
        WorkflowDefinition::new(
            "test-flow-v1",
            "Test Flow",
            "Three steps in a line",
            ProcessType::from("test-flow"),
            ProcessDomain::InboundLogistics,
            "1.0",
            StepId::from("start"),
            vec![
                WorkflowStep::new(
                    "start",
                    "Start",
                    Department::Operations,
                    UserRole::Staff,
                    "Kick off",
                    vec![WorkflowTransition::new(
                        "go",
                        StepTarget::step("middle"),
                        "Go",
                    )],
                ),
                WorkflowStep::new(
                    "middle",
                    "Middle",
                    Department::Operations,
                    UserRole::Staff,
                    "Halfway",
                    vec![WorkflowTransition::new(
                        "finish",
                        StepTarget::Complete,
                        "Finish",
                    )],
                ),
                WorkflowStep::new(
                    "orphan",
                    "Orphan",
                    Department::Operations,
                    UserRole::Staff,
                    "Never reached",
                    vec![],
                ),
            ],
        )
    }

    #[test]
    fn test_validation_passes_for_well_formed_definition() {
        assert!(linear_definition().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unknown_start_step() {
        let mut def = linear_definition();
        def.start_step = StepId::from("nowhere");
        let err = def.validate().unwrap_err();
        assert!(err.contains("start step"));
    }

    #[test]
    fn test_validation_rejects_dangling_transition_target() {
        let mut def = linear_definition();
        def.steps[0].transitions[0].target = StepTarget::step("missing");
        let err = def.validate().unwrap_err();
        assert!(err.contains("unknown step 'missing'"));
    }

    #[test]
    fn test_validation_rejects_duplicate_step_ids() {
        let mut def = linear_definition();
        let duplicate = def.steps[0].clone();
        def.steps.push(duplicate);
        let err = def.validate().unwrap_err();
        assert!(err.contains("duplicate step id"));
    }

    #[test]
    fn test_resolve_transition() {
        let def = linear_definition();

        let hit = def.resolve_transition(&StepId::from("start"), "go").unwrap();
        assert_eq!(hit.target, StepTarget::step("middle"));

        assert!(def.resolve_transition(&StepId::from("start"), "finish").is_none());
        assert!(def.resolve_transition(&StepId::from("missing"), "go").is_none());
    }

    #[test]
    fn test_available_actions_are_a_closed_set() {
        let def = linear_definition();
        assert_eq!(def.available_actions(&StepId::from("start")), vec!["go"]);
        assert!(def.available_actions(&StepId::from("orphan")).is_empty());
    }

    #[test]
    fn test_unreachable_step_detection() {
        let def = linear_definition();
        let unreachable = def.find_unreachable_steps();
        assert_eq!(unreachable, vec![&StepId::from("orphan")]);
    }

    #[test]
    fn test_terminal_and_classification_flags() {
        let def = linear_definition();
        assert!(def.step(&StepId::from("orphan")).unwrap().is_terminal());

        let gated = WorkflowStep::new(
            "offload-approval",
            "Offload Approval",
            Department::Operations,
            UserRole::Manager,
            "Approve offload",
            vec![],
        )
        .approval()
        .decision();
        assert!(gated.approval_gate);
        assert!(gated.decision_point);
    }
}
