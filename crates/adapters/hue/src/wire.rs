//! Hue bridge JSON payloads.
//!
//! The bridge answers failed calls with `200 OK` and a list of error
//! objects, so every response has to be inspected for them.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::HueError;

/// Body of `GET /api/{username}/lights`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LightsResponse {
    /// Lights keyed by bridge id.
    Lights(HashMap<String, LightInfo>),
    /// The bridge rejected the call.
    Replies(Vec<Reply>),
}

/// The subset of a light description we care about.
#[derive(Debug, Deserialize)]
pub(crate) struct LightInfo {
    pub name: String,
}

/// One entry of a bridge reply list: either a success or an error.
#[derive(Debug, Deserialize)]
pub(crate) struct Reply {
    #[serde(default)]
    pub error: Option<ReplyError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplyError {
    #[serde(rename = "type")]
    pub kind: u32,
    pub description: String,
}

/// The first error found in a reply list, if any.
pub(crate) fn first_error(replies: &[Reply]) -> Option<HueError> {
    replies
        .iter()
        .find_map(|reply| reply.error.as_ref())
        .map(|err| HueError::Bridge {
            kind: err.kind,
            description: err.description.clone(),
        })
}

/// Resolve light names to bridge ids, preserving the configured order.
///
/// When several lights share a name the lowest id wins.
pub(crate) fn resolve_lights(
    names: &[String],
    available: &HashMap<String, LightInfo>,
) -> Result<Vec<(String, String)>, HueError> {
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .filter(|(_, info)| info.name == *name)
                .map(|(id, _)| id)
                .min_by_key(|id| (id.len(), id.as_str()))
                .map(|id| (id.clone(), name.clone()))
                .ok_or_else(|| HueError::LightNotFound(name.clone()))
        })
        .collect()
}
