//! event-registry demo entry point.
//!
//! Subscribes a logging listener, emits one payload, and unsubscribes.

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use event_registry::{Listener, Registry, RegistryConfig};

fn main() -> anyhow::Result<()> {
    // Load .env first so RUST_LOG and LOG_FORMAT can come from it
    dotenvy::dotenv().ok();

    // Initialize tracing; LOG_FORMAT=json switches to structured output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = RegistryConfig::from_env();
    tracing::info!(max_listeners = config.max_listeners, "starting event-registry demo");

    let registry: Registry<Value> = Registry::with_config(config);
    let log_data = Listener::new(|data: &Value| tracing::info!(%data, "data received"));

    registry.on("data", &log_data)?;
    registry.emit("data", &json!({ "message": "Hello, world!" }))?;
    registry.off("data", &log_data)?;

    tracing::info!(events = registry.len(), "demo finished");
    Ok(())
}
