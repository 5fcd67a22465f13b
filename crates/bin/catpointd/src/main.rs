//! # catpointd — catpoint daemon
//!
//! Composition root that wires the adapters to the security service and
//! drives it from stdin.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the tracing subscriber
//! - Construct the in-memory repository and the image analyzer (adapters)
//! - Construct the security service, injecting adapters via port traits
//! - Attach the event bus and log every status event
//! - Read JSON commands line by line and print a status snapshot after each
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod command;
mod config;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use catpoint_adapter_fake_image::FakeImageAnalyzer;
use catpoint_adapter_memory::MemoryStatusRepository;
use catpoint_app::event_bus::InProcessEventBus;
use catpoint_app::services::security_service::SecurityService;

use crate::command::Snapshot;
use crate::config::{Config, SensorConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Adapters
    let repo =
        MemoryStatusRepository::with_sensors(config.sensors.iter().map(SensorConfig::to_sensor))?;
    let analyzer = FakeImageAnalyzer::new();

    // Service
    let mut service = SecurityService::new(repo, analyzer)
        .with_confidence_threshold(config.detection.confidence_threshold);

    // Event bus
    let bus = Arc::new(InProcessEventBus::new(config.events.capacity));
    let mut events = bus.subscribe();
    service.add_status_listener(bus);
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => tracing::info!(id = %event.id, kind = ?event.kind, "status event"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tracing::info!(
        sensors = config.sensors.len(),
        confidence_threshold = config.detection.confidence_threshold,
        "catpointd ready, reading commands from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        match command::parse(&line) {
            Ok(Some(cmd)) => {
                if let Err(err) = command::apply(&mut service, cmd).await {
                    tracing::warn!(
                        error = %err,
                        cause = ?std::error::Error::source(&err),
                        "command rejected"
                    );
                }
            }
            Ok(None) => continue,
            Err(err) => {
                tracing::warn!(error = %err, line = %line, "skipping malformed line");
                continue;
            }
        }

        let mut out = serde_json::to_string(&Snapshot::capture(&service)?)?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
