// WorkflowEngine - the only sanctioned way to move a process forward

//! # Engine Operations
//!
//! [`WorkflowEngine`] owns the definition catalog, the live instance
//! collection, notifications, and the per-domain business records, all
//! behind a [`ProcessStorage`] backend.
//!
//! The core invariant-preserving operation is [`WorkflowEngine::advance_process`]:
//! it resolves the instance's current step in its owning definition, gates
//! the requested action against that step's closed set of transitions, and
//! applies step change plus history append atomically per instance. A
//! per-instance async lock serializes every read-modify-write of the same
//! instance (advance and assign alike); different instances proceed in
//! parallel.
//!
//! Error policy is uniform: unknown ids on any mutation path and unknown
//! actions are both explicit errors. Queries return empty collections or
//! `Ok(None)` when nothing matches.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::standard_catalog;
use crate::models::{
    InboundOperation, InboundOperationPatch, Investigation, InvestigationPatch, NewInboundOperation,
    NewInvestigation, NewProcurementProcess, NewProjectProcess, NewQualityCheck, NotificationKind,
    ProcessData, ProcessInstance, ProcessNotification, ProcessStatus, ProcessType,
    ProcurementProcess, ProcurementProcessPatch, ProjectProcess, ProjectProcessPatch, QualityCheck,
    QualityCheckPatch, Recipient, User, WorkflowDefinition,
};
use crate::engine::stats::DashboardStats;
use crate::engine::storage::ProcessStorage;
use crate::{PlantFlowError, Result};

/// The workflow engine: definition catalog, instance lifecycle, queries,
/// notifications, and business-record factories over one storage backend.
pub struct WorkflowEngine {
    storage: Arc<dyn ProcessStorage>,

    /// Per-instance locks guarding every read-modify-write of an instance.
    /// `put_instance` is whole-object replace, so advance and assign must
    /// both hold the lock or a stale snapshot could overwrite a committed
    /// write. Entries are dropped once an instance leaves `Active`.
    instance_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl WorkflowEngine {
    /// Create an engine over the given storage with an empty catalog.
    pub fn new(storage: Arc<dyn ProcessStorage>) -> Self {
        WorkflowEngine {
            storage,
            instance_locks: DashMap::new(),
        }
    }

    fn instance_lock(&self, process_id: &Uuid) -> Arc<Mutex<()>> {
        self.instance_locks
            .entry(*process_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Create an engine and register the standard catalog (inbound LPG
    /// operation, project management).
    pub async fn with_standard_catalog(storage: Arc<dyn ProcessStorage>) -> Result<Self> {
        let engine = WorkflowEngine::new(storage);
        for definition in standard_catalog() {
            engine.register_workflow(definition).await?;
        }
        Ok(engine)
    }

    // -----------------------------------------------------------------------
    // Workflow definitions
    // -----------------------------------------------------------------------

    /// Validate and store a workflow definition.
    pub async fn register_workflow(
        &self,
        definition: WorkflowDefinition,
    ) -> Result<WorkflowDefinition> {
        definition
            .validate()
            .map_err(|reason| PlantFlowError::InvalidDefinition {
                id: definition.id.clone(),
                reason,
            })?;
        debug!(workflow = %definition.id, process_type = %definition.process_type, "registering workflow");
        self.storage.put_workflow(definition).await
    }

    /// The unique *active* definition for a process type.
    ///
    /// Inactive or older versions are never picked silently; with no active
    /// definition this is a `NoActiveWorkflow` error.
    pub async fn workflow_by_type(&self, process_type: &ProcessType) -> Result<WorkflowDefinition> {
        self.storage
            .list_workflows()
            .await?
            .into_iter()
            .find(|w| w.active && &w.process_type == process_type)
            .ok_or_else(|| PlantFlowError::NoActiveWorkflow {
                process_type: process_type.to_string(),
            })
    }

    // -----------------------------------------------------------------------
    // Instance lifecycle
    // -----------------------------------------------------------------------

    /// Start a new process of the given type against a business record.
    ///
    /// The new instance begins at the definition's start step with status
    /// `Active`, a single synthetic "started" history entry, and the
    /// caller-supplied data bag verbatim.
    pub async fn start_process(
        &self,
        process_type: &ProcessType,
        reference_id: &str,
        initiated_by: &str,
        data: ProcessData,
    ) -> Result<ProcessInstance> {
        let workflow = self.workflow_by_type(process_type).await?;
        let instance = ProcessInstance::new(&workflow, reference_id, initiated_by, data);
        let instance = self.storage.put_instance(instance).await?;
        info!(
            process = %instance.id,
            process_type = %process_type,
            reference = %reference_id,
            step = %instance.current_step,
            "process started"
        );
        Ok(instance)
    }

    /// Advance a process along the transition the action fires from its
    /// current step.
    ///
    /// Fails with `ProcessNotFound` for an unknown id, `ProcessNotActive`
    /// for a finished instance, and `InvalidAction` (carrying the closed set
    /// of available actions) when the action matches no transition - in all
    /// three cases the instance is left entirely unmodified.
    pub async fn advance_process(
        &self,
        process_id: &Uuid,
        action: &str,
        performed_by: &str,
        comments: Option<String>,
        data: Option<ProcessData>,
    ) -> Result<ProcessInstance> {
        // Serialize concurrent writers of this instance
        let lock = self.instance_lock(process_id);
        let _guard = lock.lock().await;

        let mut instance = self
            .storage
            .instance(process_id)
            .await?
            .ok_or_else(|| PlantFlowError::ProcessNotFound {
                id: process_id.to_string(),
            })?;

        if !instance.is_active() {
            return Err(PlantFlowError::ProcessNotActive {
                id: process_id.to_string(),
                status: instance.status.to_string(),
            });
        }

        let workflow = self
            .storage
            .workflow(&instance.workflow_id)
            .await?
            .ok_or_else(|| PlantFlowError::WorkflowNotFound {
                id: instance.workflow_id.clone(),
            })?;

        // Active instances always sit at a concrete step
        let current_step = instance
            .current_step_id()
            .cloned()
            .ok_or_else(|| PlantFlowError::InvalidDefinition {
                id: workflow.id.clone(),
                reason: format!("active process {} has no current step", instance.id),
            })?;

        let transition = match workflow.resolve_transition(&current_step, action) {
            Some(t) => t.clone(),
            None => {
                warn!(
                    process = %instance.id,
                    step = %current_step,
                    action = %action,
                    "rejected action with no matching transition"
                );
                return Err(PlantFlowError::InvalidAction {
                    process_id: process_id.to_string(),
                    step: current_step.to_string(),
                    action: action.to_string(),
                    available: workflow.available_actions(&current_step),
                });
            }
        };

        instance.apply_transition(action, transition.target, performed_by, comments, data);
        let instance = self.storage.put_instance(instance).await?;

        if instance.status == ProcessStatus::Completed {
            // finished instances can never advance again, drop the lock entry
            self.instance_locks.remove(process_id);
            info!(process = %instance.id, action = %action, "process completed");
        } else {
            info!(
                process = %instance.id,
                action = %action,
                step = %instance.current_step,
                "process advanced"
            );
        }
        Ok(instance)
    }

    /// Assign a process to a user and notify them.
    ///
    /// No role or department validation happens here - that responsibility
    /// belongs to the access filter layer in the calling UI.
    pub async fn assign_process(&self, process_id: &Uuid, assignee_id: &str) -> Result<()> {
        // Same lock as advance: the read below and the put further down
        // bracket await points, and put_instance replaces the whole object
        let lock = self.instance_lock(process_id);
        let _guard = lock.lock().await;

        let mut instance = self
            .storage
            .instance(process_id)
            .await?
            .ok_or_else(|| PlantFlowError::ProcessNotFound {
                id: process_id.to_string(),
            })?;

        instance.assigned_to = Some(assignee_id.to_string());
        instance.updated_at = chrono::Utc::now();
        let instance = self.storage.put_instance(instance).await?;

        self.notify(
            Recipient::User(assignee_id.to_string()),
            NotificationKind::Assignment,
            "Process assigned",
            format!(
                "You were assigned {} ({})",
                instance.reference_id, instance.process_type
            ),
        )
        .await?;
        info!(process = %process_id, assignee = %assignee_id, "process assigned");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Single-instance lookup; `Ok(None)` when absent.
    pub async fn process_instance(&self, process_id: &Uuid) -> Result<Option<ProcessInstance>> {
        self.storage.instance(process_id).await
    }

    pub async fn processes_by_type(
        &self,
        process_type: &ProcessType,
    ) -> Result<Vec<ProcessInstance>> {
        let instances = self.storage.list_instances().await?;
        Ok(instances
            .into_iter()
            .filter(|i| &i.process_type == process_type)
            .collect())
    }

    pub async fn processes_by_status(&self, status: ProcessStatus) -> Result<Vec<ProcessInstance>> {
        let instances = self.storage.list_instances().await?;
        Ok(instances.into_iter().filter(|i| i.status == status).collect())
    }

    pub async fn processes_by_assignee(&self, assignee_id: &str) -> Result<Vec<ProcessInstance>> {
        let instances = self.storage.list_instances().await?;
        Ok(instances
            .into_iter()
            .filter(|i| i.assigned_to.as_deref() == Some(assignee_id))
            .collect())
    }

    /// Derive the dashboard counters from the current collections.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let instances = self.storage.list_instances().await?;
        let investigations = self.storage.list_investigations().await?;
        let workflows = self
            .storage
            .list_workflows()
            .await?
            .into_iter()
            .map(|w| (w.id.clone(), w))
            .collect();
        Ok(DashboardStats::compute(
            &instances,
            &workflows,
            &investigations,
            chrono::Utc::now(),
        ))
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    /// Create a notification for a user or role.
    pub async fn notify<T, M>(
        &self,
        recipient: Recipient,
        kind: NotificationKind,
        title: T,
        message: M,
    ) -> Result<ProcessNotification>
    where
        T: Into<String>,
        M: Into<String>,
    {
        self.storage
            .put_notification(ProcessNotification::new(recipient, kind, title, message))
            .await
    }

    /// Unread-first list of notifications addressed to the user directly or
    /// via their role, newest first within each group.
    pub async fn notifications_for_user(&self, user: &User) -> Result<Vec<ProcessNotification>> {
        let mut notifications: Vec<_> = self
            .storage
            .list_notifications()
            .await?
            .into_iter()
            .filter(|n| n.addressed_to(&user.id, user.role))
            .collect();
        notifications.sort_by(|a, b| a.read.cmp(&b.read).then(b.created_at.cmp(&a.created_at)));
        Ok(notifications)
    }

    /// Flip one notification's read flag. Idempotent when called twice.
    pub async fn mark_notification_read(&self, notification_id: &Uuid) -> Result<()> {
        let mut notification = self
            .storage
            .notification(notification_id)
            .await?
            .ok_or_else(|| PlantFlowError::NotificationNotFound {
                id: notification_id.to_string(),
            })?;
        if !notification.read {
            notification.read = true;
            self.storage.put_notification(notification).await?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Business-record factories
    // -----------------------------------------------------------------------

    pub async fn create_inbound_operation(
        &self,
        input: NewInboundOperation,
    ) -> Result<InboundOperation> {
        let record = InboundOperation::create(input);
        info!(number = %record.number, plant = %record.plant_id, "inbound operation created");
        self.storage.put_inbound_operation(record).await
    }

    pub async fn update_inbound_operation(
        &self,
        id: &Uuid,
        patch: InboundOperationPatch,
    ) -> Result<InboundOperation> {
        let mut record = self
            .storage
            .inbound_operation(id)
            .await?
            .ok_or_else(|| PlantFlowError::RecordNotFound { id: id.to_string() })?;
        record.apply(patch);
        self.storage.put_inbound_operation(record).await
    }

    pub async fn inbound_operations(&self) -> Result<Vec<InboundOperation>> {
        self.storage.list_inbound_operations().await
    }

    pub async fn create_project_process(
        &self,
        input: NewProjectProcess,
    ) -> Result<ProjectProcess> {
        let record = ProjectProcess::create(input);
        info!(number = %record.number, plant = %record.plant_id, "project process created");
        self.storage.put_project_process(record).await
    }

    pub async fn update_project_process(
        &self,
        id: &Uuid,
        patch: ProjectProcessPatch,
    ) -> Result<ProjectProcess> {
        let mut record = self
            .storage
            .project_process(id)
            .await?
            .ok_or_else(|| PlantFlowError::RecordNotFound { id: id.to_string() })?;
        record.apply(patch);
        self.storage.put_project_process(record).await
    }

    pub async fn project_processes(&self) -> Result<Vec<ProjectProcess>> {
        self.storage.list_project_processes().await
    }

    pub async fn create_procurement_process(
        &self,
        input: NewProcurementProcess,
    ) -> Result<ProcurementProcess> {
        let record = ProcurementProcess::create(input);
        info!(number = %record.number, plant = %record.plant_id, "procurement process created");
        self.storage.put_procurement_process(record).await
    }

    pub async fn update_procurement_process(
        &self,
        id: &Uuid,
        patch: ProcurementProcessPatch,
    ) -> Result<ProcurementProcess> {
        let mut record = self
            .storage
            .procurement_process(id)
            .await?
            .ok_or_else(|| PlantFlowError::RecordNotFound { id: id.to_string() })?;
        record.apply(patch);
        self.storage.put_procurement_process(record).await
    }

    pub async fn procurement_processes(&self) -> Result<Vec<ProcurementProcess>> {
        self.storage.list_procurement_processes().await
    }

    pub async fn create_investigation(&self, input: NewInvestigation) -> Result<Investigation> {
        let record = Investigation::create(input);
        info!(number = %record.number, plant = %record.plant_id, "investigation opened");
        self.storage.put_investigation(record).await
    }

    pub async fn update_investigation(
        &self,
        id: &Uuid,
        patch: InvestigationPatch,
    ) -> Result<Investigation> {
        let mut record = self
            .storage
            .investigation(id)
            .await?
            .ok_or_else(|| PlantFlowError::RecordNotFound { id: id.to_string() })?;
        record.apply(patch);
        self.storage.put_investigation(record).await
    }

    pub async fn investigations(&self) -> Result<Vec<Investigation>> {
        self.storage.list_investigations().await
    }

    pub async fn perform_quality_check(&self, input: NewQualityCheck) -> Result<QualityCheck> {
        let record = QualityCheck::create(input);
        info!(
            number = %record.number,
            plant = %record.plant_id,
            passed = record.passed,
            "quality check performed"
        );
        self.storage.put_quality_check(record).await
    }

    pub async fn update_quality_check(
        &self,
        id: &Uuid,
        patch: QualityCheckPatch,
    ) -> Result<QualityCheck> {
        let mut record = self
            .storage
            .quality_check(id)
            .await?
            .ok_or_else(|| PlantFlowError::RecordNotFound { id: id.to_string() })?;
        record.apply(patch);
        self.storage.put_quality_check(record).await
    }

    pub async fn quality_checks(&self) -> Result<Vec<QualityCheck>> {
        self.storage.list_quality_checks().await
    }
}
