//! # nightlight-app
//!
//! Application layer — the schedule loop and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DeviceApplier` — realise an on/off state on a device
//!   - `Clock` — read the local wall-clock time
//! - Provide the **driving/inbound port** for manual overrides: a bounded,
//!   cloneable `OverrideSender` that any number of producers may call
//! - Run the `ScheduleLoop`: force a baseline, follow the night window, and
//!   serialise scheduled and manual transitions through a single task
//! - Publish read-only `ScheduleStatus` snapshots for observers
//!
//! ## Dependency rule
//! Depends on `nightlight-domain` only (plus `tokio` for channels and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod override_queue;
pub mod ports;
pub mod schedule_loop;
pub mod status;
