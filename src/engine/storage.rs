// Storage abstraction for the workflow engine

//! # Storage Abstraction Layer
//!
//! The engine persists definitions, instances, notifications, and business
//! records through the [`ProcessStorage`] trait rather than owning
//! collections directly. The default [`InMemoryStorage`] keeps everything in
//! `RwLock<HashMap>` maps - data lives for the life of the process, which is
//! the reference behavior; a durable backend would implement the same trait
//! and must preserve the invariants the engine relies on (append-only
//! instance history, one-directional status).
//!
//! All `put_*` operations are insert-or-replace; existence checks and
//! not-found errors are the engine's responsibility, so storage backends
//! stay dumb.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::models::{
    InboundOperation, Investigation, ProcessInstance, ProcessNotification, ProcurementProcess,
    ProjectProcess, QualityCheck, WorkflowDefinition,
};
use crate::Result;

/// Storage backend for all engine-owned collections.
///
/// Every operation is async and returns `Result` so that network-backed
/// implementations fit the same seam. Lookups return `Ok(None)` for a
/// missing id - absence is not a storage error.
#[async_trait::async_trait]
pub trait ProcessStorage: Send + Sync {
    // Workflow definitions
    async fn put_workflow(&self, definition: WorkflowDefinition) -> Result<WorkflowDefinition>;
    async fn workflow(&self, id: &str) -> Result<Option<WorkflowDefinition>>;
    async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>>;

    // Process instances
    async fn put_instance(&self, instance: ProcessInstance) -> Result<ProcessInstance>;
    async fn instance(&self, id: &Uuid) -> Result<Option<ProcessInstance>>;
    async fn list_instances(&self) -> Result<Vec<ProcessInstance>>;

    // Notifications
    async fn put_notification(
        &self,
        notification: ProcessNotification,
    ) -> Result<ProcessNotification>;
    async fn notification(&self, id: &Uuid) -> Result<Option<ProcessNotification>>;
    async fn list_notifications(&self) -> Result<Vec<ProcessNotification>>;

    // Inbound operations
    async fn put_inbound_operation(&self, record: InboundOperation) -> Result<InboundOperation>;
    async fn inbound_operation(&self, id: &Uuid) -> Result<Option<InboundOperation>>;
    async fn list_inbound_operations(&self) -> Result<Vec<InboundOperation>>;

    // Project processes
    async fn put_project_process(&self, record: ProjectProcess) -> Result<ProjectProcess>;
    async fn project_process(&self, id: &Uuid) -> Result<Option<ProjectProcess>>;
    async fn list_project_processes(&self) -> Result<Vec<ProjectProcess>>;

    // Procurement processes
    async fn put_procurement_process(
        &self,
        record: ProcurementProcess,
    ) -> Result<ProcurementProcess>;
    async fn procurement_process(&self, id: &Uuid) -> Result<Option<ProcurementProcess>>;
    async fn list_procurement_processes(&self) -> Result<Vec<ProcurementProcess>>;

    // Investigations
    async fn put_investigation(&self, record: Investigation) -> Result<Investigation>;
    async fn investigation(&self, id: &Uuid) -> Result<Option<Investigation>>;
    async fn list_investigations(&self) -> Result<Vec<Investigation>>;

    // Quality checks
    async fn put_quality_check(&self, record: QualityCheck) -> Result<QualityCheck>;
    async fn quality_check(&self, id: &Uuid) -> Result<Option<QualityCheck>>;
    async fn list_quality_checks(&self) -> Result<Vec<QualityCheck>>;
}

/// In-memory storage for development, testing, and single-process use.
///
/// `list_*` results are sorted by creation time so callers see a stable
/// append order regardless of map iteration order.
#[derive(Default)]
pub struct InMemoryStorage {
    workflows: RwLock<HashMap<String, WorkflowDefinition>>,
    instances: RwLock<HashMap<Uuid, ProcessInstance>>,
    notifications: RwLock<HashMap<Uuid, ProcessNotification>>,
    inbound_operations: RwLock<HashMap<Uuid, InboundOperation>>,
    project_processes: RwLock<HashMap<Uuid, ProjectProcess>>,
    procurement_processes: RwLock<HashMap<Uuid, ProcurementProcess>>,
    investigations: RwLock<HashMap<Uuid, Investigation>>,
    quality_checks: RwLock<HashMap<Uuid, QualityCheck>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProcessStorage for InMemoryStorage {
    async fn put_workflow(&self, definition: WorkflowDefinition) -> Result<WorkflowDefinition> {
        let mut workflows = self.workflows.write().unwrap();
        workflows.insert(definition.id.clone(), definition.clone());
        Ok(definition)
    }

    async fn workflow(&self, id: &str) -> Result<Option<WorkflowDefinition>> {
        let workflows = self.workflows.read().unwrap();
        Ok(workflows.get(id).cloned())
    }

    async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>> {
        let workflows = self.workflows.read().unwrap();
        let mut all: Vec<_> = workflows.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn put_instance(&self, instance: ProcessInstance) -> Result<ProcessInstance> {
        let mut instances = self.instances.write().unwrap();
        instances.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn instance(&self, id: &Uuid) -> Result<Option<ProcessInstance>> {
        let instances = self.instances.read().unwrap();
        Ok(instances.get(id).cloned())
    }

    async fn list_instances(&self) -> Result<Vec<ProcessInstance>> {
        let instances = self.instances.read().unwrap();
        let mut all: Vec<_> = instances.values().cloned().collect();
        all.sort_by_key(|i| i.created_at);
        Ok(all)
    }

    async fn put_notification(
        &self,
        notification: ProcessNotification,
    ) -> Result<ProcessNotification> {
        let mut notifications = self.notifications.write().unwrap();
        notifications.insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn notification(&self, id: &Uuid) -> Result<Option<ProcessNotification>> {
        let notifications = self.notifications.read().unwrap();
        Ok(notifications.get(id).cloned())
    }

    async fn list_notifications(&self) -> Result<Vec<ProcessNotification>> {
        let notifications = self.notifications.read().unwrap();
        let mut all: Vec<_> = notifications.values().cloned().collect();
        all.sort_by_key(|n| n.created_at);
        Ok(all)
    }

    async fn put_inbound_operation(&self, record: InboundOperation) -> Result<InboundOperation> {
        let mut records = self.inbound_operations.write().unwrap();
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn inbound_operation(&self, id: &Uuid) -> Result<Option<InboundOperation>> {
        let records = self.inbound_operations.read().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn list_inbound_operations(&self) -> Result<Vec<InboundOperation>> {
        let records = self.inbound_operations.read().unwrap();
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }

    async fn put_project_process(&self, record: ProjectProcess) -> Result<ProjectProcess> {
        let mut records = self.project_processes.write().unwrap();
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn project_process(&self, id: &Uuid) -> Result<Option<ProjectProcess>> {
        let records = self.project_processes.read().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn list_project_processes(&self) -> Result<Vec<ProjectProcess>> {
        let records = self.project_processes.read().unwrap();
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }

    async fn put_procurement_process(
        &self,
        record: ProcurementProcess,
    ) -> Result<ProcurementProcess> {
        let mut records = self.procurement_processes.write().unwrap();
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn procurement_process(&self, id: &Uuid) -> Result<Option<ProcurementProcess>> {
        let records = self.procurement_processes.read().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn list_procurement_processes(&self) -> Result<Vec<ProcurementProcess>> {
        let records = self.procurement_processes.read().unwrap();
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }

    async fn put_investigation(&self, record: Investigation) -> Result<Investigation> {
        let mut records = self.investigations.write().unwrap();
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn investigation(&self, id: &Uuid) -> Result<Option<Investigation>> {
        let records = self.investigations.read().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn list_investigations(&self) -> Result<Vec<Investigation>> {
        let records = self.investigations.read().unwrap();
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }

    async fn put_quality_check(&self, record: QualityCheck) -> Result<QualityCheck> {
        let mut records = self.quality_checks.write().unwrap();
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn quality_check(&self, id: &Uuid) -> Result<Option<QualityCheck>> {
        let records = self.quality_checks.read().unwrap();
        Ok(records.get(id).cloned())
    }

    async fn list_quality_checks(&self) -> Result<Vec<QualityCheck>> {
        let records = self.quality_checks.read().unwrap();
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by_key(|r| r.created_at);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::inbound_operation_workflow;
    use crate::models::{NewInboundOperation, ProcessData, ProcessInstance};

    #[tokio::test]
    async fn test_workflow_roundtrip() {
        let storage = InMemoryStorage::new();
        let def = inbound_operation_workflow();

        storage.put_workflow(def.clone()).await.unwrap();
        let found = storage.workflow(&def.id).await.unwrap().unwrap();
        assert_eq!(found.process_type, def.process_type);

        assert!(storage.workflow("missing").await.unwrap().is_none());
        assert_eq!(storage.list_workflows().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_instance_put_is_insert_or_replace() {
        let storage = InMemoryStorage::new();
        let def = inbound_operation_workflow();
        let mut instance = ProcessInstance::new(&def, "INB-001", "user-1", ProcessData::new());

        storage.put_instance(instance.clone()).await.unwrap();
        instance.assigned_to = Some("user-2".into());
        storage.put_instance(instance.clone()).await.unwrap();

        let stored = storage.instance(&instance.id).await.unwrap().unwrap();
        assert_eq!(stored.assigned_to.as_deref(), Some("user-2"));
        assert_eq!(storage.list_instances().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_collections_are_independent() {
        let storage = InMemoryStorage::new();
        let op = InboundOperation::create(NewInboundOperation {
            plant_id: "plant-1".into(),
            supplier: "Gulf Gas".into(),
            truck_number: "T-101".into(),
            driver_name: "A. Bello".into(),
            quantity_kg: 25_000.0,
        });

        storage.put_inbound_operation(op.clone()).await.unwrap();
        assert_eq!(storage.list_inbound_operations().await.unwrap().len(), 1);
        assert!(storage.list_project_processes().await.unwrap().is_empty());
        assert!(storage.investigation(&op.id).await.unwrap().is_none());
    }
}
