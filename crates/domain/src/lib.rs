//! # nightlight-domain
//!
//! Pure domain model for the nightlight scheduler.
//!
//! ## Responsibilities
//! - Foundational types: [`TimeOfDay`](time::TimeOfDay), error conventions
//! - Define the **night window** (a daily range, possibly crossing midnight)
//! - Define **device states** and **override requests**
//! - The **window policy**: whether it is night, and when that changes
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod device;
pub mod override_request;
pub mod window;
pub mod window_policy;
