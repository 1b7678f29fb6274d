// Workflow engine - lifecycle operations over a pluggable storage backend

//! # Workflow Engine
//!
//! The engine layer sits between the domain models and the presentation
//! layer that consumes this crate. It owns nothing ambient: a
//! [`WorkflowEngine`] is an explicit store object constructed over an
//! `Arc<dyn ProcessStorage>` and passed by reference to callers, which makes
//! fresh-state tests trivial.
//!
//! - `storage`: the [`ProcessStorage`] trait and the default
//!   [`InMemoryStorage`] implementation
//! - `core`: [`WorkflowEngine`] with the start/advance/assign lifecycle,
//!   queries, notifications, and business-record factories
//! - `stats`: the pure dashboard aggregation

pub mod core;
pub mod stats;
pub mod storage;

pub use self::core::WorkflowEngine;
pub use stats::DashboardStats;
pub use storage::{InMemoryStorage, ProcessStorage};
