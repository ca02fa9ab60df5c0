//! Hue bridge client implementing `DeviceApplier`.

use nightlight_app::ports::DeviceApplier;
use nightlight_domain::device::DeviceState;
use nightlight_domain::error::ApplyError;

use crate::config::HueConfig;
use crate::error::HueError;
use crate::wire::{self, LightsResponse, Reply};

/// A light resolved on the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HueLight {
    /// Bridge-assigned id.
    pub id: String,
    /// Configured name.
    pub name: String,
}

/// Connection to a Hue bridge controlling a fixed set of lights.
#[derive(Debug, Clone)]
pub struct HueBridge {
    client: reqwest::Client,
    base_url: String,
    username: String,
    lights: Vec<HueLight>,
}

impl HueBridge {
    /// Connect to the bridge and resolve the configured light names.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::Http`] when the bridge is unreachable,
    /// [`HueError::Bridge`] when it rejects the username, and
    /// [`HueError::LightNotFound`] when a configured light does not exist.
    #[tracing::instrument(skip(config), fields(bridge = %config.bridge_address))]
    pub async fn connect(config: &HueConfig) -> Result<Self, HueError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        let base_url = config.base_url();
        let url = format!("{base_url}/api/{}/lights", config.username);

        let response: LightsResponse = client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let available = match response {
            LightsResponse::Lights(lights) => lights,
            LightsResponse::Replies(replies) => {
                return Err(wire::first_error(&replies).unwrap_or(HueError::UnexpectedResponse));
            }
        };

        let lights = wire::resolve_lights(&config.lights, &available)?
            .into_iter()
            .map(|(id, name)| HueLight { id, name })
            .collect::<Vec<_>>();
        tracing::info!(count = lights.len(), "resolved hue lights");

        Ok(Self {
            client,
            base_url,
            username: config.username.clone(),
            lights,
        })
    }

    /// Lights switched by this bridge connection.
    #[must_use]
    pub fn lights(&self) -> &[HueLight] {
        &self.lights
    }

    /// Switch every light, carrying on past individual failures.
    ///
    /// # Errors
    ///
    /// Returns [`HueError::PartialFailure`] when at least one light failed.
    pub async fn switch_all(&self, state: DeviceState) -> Result<(), HueError> {
        let mut failed = 0;
        for light in &self.lights {
            match self.switch_light(light, state).await {
                Ok(()) => tracing::debug!(light = %light.name, %state, "hue light switched"),
                Err(err) => {
                    tracing::warn!(light = %light.name, %state, error = %err, "failed to switch hue light");
                    failed += 1;
                }
            }
        }

        if failed == 0 {
            Ok(())
        } else {
            Err(HueError::PartialFailure {
                failed,
                total: self.lights.len(),
            })
        }
    }

    async fn switch_light(&self, light: &HueLight, state: DeviceState) -> Result<(), HueError> {
        let url = format!(
            "{}/api/{}/lights/{}/state",
            self.base_url, self.username, light.id
        );
        let replies: Vec<Reply> = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "on": state.is_on() }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match wire::first_error(&replies) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl DeviceApplier for HueBridge {
    async fn apply_state(&self, state: DeviceState) -> Result<(), ApplyError> {
        self.switch_all(state).await?;
        Ok(())
    }
}
