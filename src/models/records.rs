// Business-process records - domain-specific records correlated to process
// instances via their reference number

//! # Business-Process Records
//!
//! Each record class carries the fields specific to one business flow:
//! truck/seal/quantity data for inbound operations, budget/contractor data
//! for projects, vendor/quote data for procurement, findings/resolution for
//! investigations, and pass/fail for quality checks.
//!
//! Records are created through engine factories that generate a
//! human-readable number (`INB-<epoch millis>` and friends), mutated via
//! typed patches (shallow merge, supplied fields win), and never deleted.
//! Each class has its own status enumeration mirroring, but not identical
//! to, the generic process status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::process::{ProcessData, ProcessPriority};
use super::step::ProcessDomain;

/// Generate a human-readable record number from a type prefix and the
/// current time, e.g. `INB-1724400000000`.
pub(crate) fn next_record_number(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

// ---------------------------------------------------------------------------
// Inbound operations
// ---------------------------------------------------------------------------

/// Status of an inbound LPG delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundStatus {
    Requested,
    InTransit,
    Offloading,
    Received,
    Cancelled,
}

/// One inbound LPG delivery: truck, seal, and quantity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundOperation {
    pub id: Uuid,
    /// Human-readable number, `INB-` prefixed
    pub number: String,
    /// Id of the process instance driving this operation, once started
    pub process_instance_id: Option<Uuid>,
    pub plant_id: String,
    pub supplier: String,
    pub truck_number: String,
    pub driver_name: String,
    pub seal_number: Option<String>,
    pub quantity_kg: f64,
    pub status: InboundStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating an inbound operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInboundOperation {
    pub plant_id: String,
    pub supplier: String,
    pub truck_number: String,
    pub driver_name: String,
    pub quantity_kg: f64,
}

/// Partial update: supplied fields overwrite, absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundOperationPatch {
    pub process_instance_id: Option<Uuid>,
    pub supplier: Option<String>,
    pub truck_number: Option<String>,
    pub driver_name: Option<String>,
    pub seal_number: Option<String>,
    pub quantity_kg: Option<f64>,
    pub status: Option<InboundStatus>,
}

impl InboundOperation {
    pub const DOMAIN: ProcessDomain = ProcessDomain::InboundLogistics;

    pub fn create(input: NewInboundOperation) -> Self {
        let now = Utc::now();
        InboundOperation {
            id: Uuid::new_v4(),
            number: next_record_number("INB"),
            process_instance_id: None,
            plant_id: input.plant_id,
            supplier: input.supplier,
            truck_number: input.truck_number,
            driver_name: input.driver_name,
            seal_number: None,
            quantity_kg: input.quantity_kg,
            status: InboundStatus::Requested,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: InboundOperationPatch) {
        if let Some(v) = patch.process_instance_id {
            self.process_instance_id = Some(v);
        }
        if let Some(v) = patch.supplier {
            self.supplier = v;
        }
        if let Some(v) = patch.truck_number {
            self.truck_number = v;
        }
        if let Some(v) = patch.driver_name {
            self.driver_name = v;
        }
        if let Some(v) = patch.seal_number {
            self.seal_number = Some(v);
        }
        if let Some(v) = patch.quantity_kg {
            self.quantity_kg = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Project processes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Initiated,
    Planning,
    Approved,
    Executing,
    Closed,
    Cancelled,
}

/// One capital or maintenance project: budget and contractor data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProcess {
    pub id: Uuid,
    /// Human-readable number, `PRJ-` prefixed
    pub number: String,
    pub process_instance_id: Option<Uuid>,
    pub plant_id: String,
    pub title: String,
    pub budget: f64,
    pub contractor: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProjectProcess {
    pub plant_id: String,
    pub title: String,
    pub budget: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectProcessPatch {
    pub process_instance_id: Option<Uuid>,
    pub title: Option<String>,
    pub budget: Option<f64>,
    pub contractor: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectProcess {
    pub const DOMAIN: ProcessDomain = ProcessDomain::Projects;

    pub fn create(input: NewProjectProcess) -> Self {
        let now = Utc::now();
        ProjectProcess {
            id: Uuid::new_v4(),
            number: next_record_number("PRJ"),
            process_instance_id: None,
            plant_id: input.plant_id,
            title: input.title,
            budget: input.budget,
            contractor: None,
            status: ProjectStatus::Initiated,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ProjectProcessPatch) {
        if let Some(v) = patch.process_instance_id {
            self.process_instance_id = Some(v);
        }
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.budget {
            self.budget = v;
        }
        if let Some(v) = patch.contractor {
            self.contractor = Some(v);
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Procurement processes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcurementStatus {
    QuoteRequested,
    QuoteReceived,
    Ordered,
    Delivered,
    Cancelled,
}

/// One procurement cycle: vendor, requested items, and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcurementProcess {
    pub id: Uuid,
    /// Human-readable number, `PRO-` prefixed
    pub number: String,
    pub process_instance_id: Option<Uuid>,
    pub plant_id: String,
    pub vendor: String,
    pub items: Vec<String>,
    pub total_amount: f64,
    pub status: ProcurementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProcurementProcess {
    pub plant_id: String,
    pub vendor: String,
    pub items: Vec<String>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcurementProcessPatch {
    pub process_instance_id: Option<Uuid>,
    pub vendor: Option<String>,
    pub items: Option<Vec<String>>,
    pub total_amount: Option<f64>,
    pub status: Option<ProcurementStatus>,
}

impl ProcurementProcess {
    pub const DOMAIN: ProcessDomain = ProcessDomain::Procurement;

    pub fn create(input: NewProcurementProcess) -> Self {
        let now = Utc::now();
        ProcurementProcess {
            id: Uuid::new_v4(),
            number: next_record_number("PRO"),
            process_instance_id: None,
            plant_id: input.plant_id,
            vendor: input.vendor,
            items: input.items,
            total_amount: input.total_amount,
            status: ProcurementStatus::QuoteRequested,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ProcurementProcessPatch) {
        if let Some(v) = patch.process_instance_id {
            self.process_instance_id = Some(v);
        }
        if let Some(v) = patch.vendor {
            self.vendor = v;
        }
        if let Some(v) = patch.items {
            self.items = v;
        }
        if let Some(v) = patch.total_amount {
            self.total_amount = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Investigations
// ---------------------------------------------------------------------------

/// Status of an investigation. `Pending` and `Ongoing` count as open in the
/// dashboard aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
    Pending,
    Ongoing,
    Resolved,
    Closed,
}

impl InvestigationStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, InvestigationStatus::Pending | InvestigationStatus::Ongoing)
    }
}

/// An incident or discrepancy investigation: findings and resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
    pub id: Uuid,
    /// Human-readable number, `INV-` prefixed
    pub number: String,
    pub process_instance_id: Option<Uuid>,
    pub plant_id: String,
    pub subject: String,
    pub severity: ProcessPriority,
    pub findings: Option<String>,
    pub resolution: Option<String>,
    pub status: InvestigationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvestigation {
    pub plant_id: String,
    pub subject: String,
    pub severity: ProcessPriority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvestigationPatch {
    pub process_instance_id: Option<Uuid>,
    pub subject: Option<String>,
    pub severity: Option<ProcessPriority>,
    pub findings: Option<String>,
    pub resolution: Option<String>,
    pub status: Option<InvestigationStatus>,
}

impl Investigation {
    pub const DOMAIN: ProcessDomain = ProcessDomain::Investigations;

    pub fn create(input: NewInvestigation) -> Self {
        let now = Utc::now();
        Investigation {
            id: Uuid::new_v4(),
            number: next_record_number("INV"),
            process_instance_id: None,
            plant_id: input.plant_id,
            subject: input.subject,
            severity: input.severity,
            findings: None,
            resolution: None,
            status: InvestigationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: InvestigationPatch) {
        if let Some(v) = patch.process_instance_id {
            self.process_instance_id = Some(v);
        }
        if let Some(v) = patch.subject {
            self.subject = v;
        }
        if let Some(v) = patch.severity {
            self.severity = v;
        }
        if let Some(v) = patch.findings {
            self.findings = Some(v);
        }
        if let Some(v) = patch.resolution {
            self.resolution = Some(v);
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Quality checks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheckStatus {
    Pending,
    Passed,
    Failed,
}

/// One quality inspection performed on an arriving delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityCheck {
    pub id: Uuid,
    /// Human-readable number, `QC-` prefixed
    pub number: String,
    pub process_instance_id: Option<Uuid>,
    pub plant_id: String,
    pub inspector: String,
    /// Measured parameters, e.g. pressure, density, moisture
    pub parameters: ProcessData,
    pub passed: bool,
    pub remarks: Option<String>,
    pub status: QualityCheckStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewQualityCheck {
    pub plant_id: String,
    pub inspector: String,
    pub parameters: ProcessData,
    pub passed: bool,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityCheckPatch {
    pub process_instance_id: Option<Uuid>,
    pub inspector: Option<String>,
    pub parameters: Option<ProcessData>,
    pub passed: Option<bool>,
    pub remarks: Option<String>,
    pub status: Option<QualityCheckStatus>,
}

impl QualityCheck {
    pub const DOMAIN: ProcessDomain = ProcessDomain::Quality;

    pub fn create(input: NewQualityCheck) -> Self {
        let now = Utc::now();
        let status = if input.passed {
            QualityCheckStatus::Passed
        } else {
            QualityCheckStatus::Failed
        };
        QualityCheck {
            id: Uuid::new_v4(),
            number: next_record_number("QC"),
            process_instance_id: None,
            plant_id: input.plant_id,
            inspector: input.inspector,
            parameters: input.parameters,
            passed: input.passed,
            remarks: input.remarks,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: QualityCheckPatch) {
        if let Some(v) = patch.process_instance_id {
            self.process_instance_id = Some(v);
        }
        if let Some(v) = patch.inspector {
            self.inspector = v;
        }
        if let Some(v) = patch.parameters {
            self.parameters = v;
        }
        if let Some(v) = patch.passed {
            self.passed = v;
        }
        if let Some(v) = patch.remarks {
            self.remarks = Some(v);
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        self.updated_at = Utc::now();
    }
}
