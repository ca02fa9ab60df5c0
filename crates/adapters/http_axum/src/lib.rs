//! # nightlight-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Accept **manual overrides** (`/turnOn`, `/turnOff`, `/api/override`) and
//!   hand them to the schedule loop through the bounded override queue
//! - Expose the latest **schedule status** as JSON (`/api/status`)
//! - Map queue errors into HTTP responses
//!
//! Handlers never wait for the device: a `202 Accepted` only means the
//! request was queued.
//!
//! ## Dependency rule
//! Depends on `nightlight-app` (override queue and status watcher) and
//! `nightlight-domain` (types used in request/response mapping). Never leaks
//! axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
