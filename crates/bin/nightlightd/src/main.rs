//! # nightlightd — nightlight daemon
//!
//! Composition root that wires the device driver, the schedule loop and the
//! HTTP adapter together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Build the configured device driver (virtual light or Hue bridge)
//! - Spawn the schedule loop with the system clock and the override queue
//! - Build the axum router around the queue and status handles
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no scheduling logic belongs here.

mod config;

use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use nightlight_adapter_http_axum::state::AppState;
use nightlight_adapter_hue::HueBridge;
use nightlight_adapter_virtual::VirtualLight;
use nightlight_app::override_queue::{self, OverrideReceiver};
use nightlight_app::ports::{DeviceApplier, SystemClock};
use nightlight_app::schedule_loop::{ScheduleContext, ScheduleLoop};
use nightlight_app::status::StatusWatcher;
use nightlight_domain::device::DeviceState;
use nightlight_domain::window::NightWindow;

use crate::config::{Config, Driver};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let window = config.night_window()?;
    let night_state = config.schedule.night_state;
    tracing::info!(
        %window,
        %night_state,
        driver = ?config.device.driver,
        "configuration loaded"
    );

    // Override queue
    let (sender, receiver) = override_queue::channel(config.overrides.queue_capacity);

    // Device + schedule loop
    let (schedule, watcher) = match config.device.driver {
        Driver::Virtual => start_schedule(window, night_state, VirtualLight::default(), receiver),
        Driver::Hue => {
            let bridge = HueBridge::connect(&config.hue).await?;
            start_schedule(window, night_state, bridge, receiver)
        }
    };

    // HTTP
    let app = nightlight_adapter_http_axum::router::build(AppState::new(sender, watcher));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "nightlightd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    schedule.abort();
    tracing::info!("nightlightd stopped");
    Ok(())
}

fn start_schedule<D>(
    window: NightWindow,
    night_state: DeviceState,
    applier: D,
    receiver: OverrideReceiver,
) -> (JoinHandle<()>, StatusWatcher)
where
    D: DeviceApplier + 'static,
{
    let context = ScheduleContext::new(window, night_state, applier);
    let (schedule, watcher) = ScheduleLoop::new(context, SystemClock, receiver);
    (schedule.spawn(), watcher)
}

/// Resolve on SIGINT (ctrl-c) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, stopping server");
}
