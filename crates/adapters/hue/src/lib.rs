//! # nightlight-adapter-hue
//!
//! Philips Hue adapter — switches lights managed by a Hue bridge.
//!
//! ## Responsibilities
//! - Resolve configured light names to bridge ids on startup
//! - Implement the `DeviceApplier` port with
//!   `PUT /api/{username}/lights/{id}/state`
//! - Translate bridge error payloads into typed errors
//!
//! ## Dependency rule
//! Same as other adapters: depends on `nightlight-app` and `nightlight-domain`.

mod bridge;
pub mod config;
pub mod error;
mod wire;

pub use bridge::{HueBridge, HueLight};
pub use config::HueConfig;
pub use error::HueError;
