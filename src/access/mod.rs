// Access filter layer - stateless authorization predicates

//! # Access Filter Layer
//!
//! Pure functions the presentation layer applies before displaying or
//! acting on records; the workflow engine never self-filters by caller
//! identity. Every filter short-circuits to "see everything" for a super
//! admin and composes department allow-lists with plant access. All
//! denials are empty collections or `false` - never errors.

pub mod filters;

pub use filters::{
    authorized_navigation, can_perform_action, filter_by_plant_access,
    filter_customers_by_department, filter_inventory_by_department, filter_orders_by_department,
    filter_products_by_department, filter_trucks_by_department,
    filter_workflow_processes_by_department, DomainScoped, NavItem, Navigation, PlantScoped,
};
