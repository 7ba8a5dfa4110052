#![forbid(unsafe_code)]
//! scope-plan library.
//!
//! # Conventions
//!
//! - **Purity**: phase resolution and allocation are pure functions of
//!   their inputs; nothing here touches storage.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod allocate;
pub mod phase;

pub use allocate::{DailyPlan, SlotAllocation, allocate_slots, build_daily_plan};
pub use phase::{PhaseResolution, resolve_from_inventory, resolve_phase};
