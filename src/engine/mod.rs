//! Reconciliation engine.
//!
//! The engine works in three stages:
//! 1. Planning: match declared monitors against recorded state and
//!    decide create/update/no-change, carrying remote identifiers
//!    forward by name.
//! 2. Diffing: field-level changes for display, with params compared
//!    structurally so server-added fields never show as drift.
//! 3. Executing: apply the plan against the remote API, reading each
//!    monitor back so state reflects what the server actually stored.

pub mod differ;
pub mod executor;
pub mod planner;

pub use executor::{ExecuteSummary, execute};
pub use planner::{Action, MonitorPlan, Plan, plan};
