use std::sync::Arc;
use std::time::Duration;

mod config;
mod handler;
mod http;
mod logger;
mod server;
mod transport;

use logger::{
    AlertDestination, ConsoleDestination, Dispatcher, DispatcherBuilder, FileDestination, LevelSet,
};
use transport::MessageBirdTransport;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::Config::load_from(&config_path)?;

    // Build the Tokio runtime, honoring the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        println!("[CONFIG] Using {workers} worker threads");
    } else {
        println!("[CONFIG] Using default worker threads (CPU cores)");
    }

    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let (dispatcher, startup_errors) = build_dispatcher(&cfg);
    let dispatcher = Arc::new(dispatcher);
    println!("[CONFIG] Log destinations: {}", dispatcher.destinations().join(", "));

    // Sinks that failed to come up are reported through the ones that did
    for message in startup_errors {
        dispatcher.error(message).await;
    }
    if cfg.alert.active_key().is_none() {
        dispatcher
            .warning("SMS alerts disabled: alert.api_key or alert.recipients not configured")
            .await;
    }

    let addr = cfg.get_socket_addr()?;
    let grace = Duration::from_secs(cfg.server.shutdown_grace_secs);

    let listener = match server::create_listener(addr) {
        Ok(listener) => listener,
        Err(e) => {
            dispatcher.fatal(format!("Failed to bind {addr}: {e}")).await;
            dispatcher.flush().await;
            return Err(e.into());
        }
    };

    dispatcher.info(format!("Serving on {addr}")).await;

    let shutdown = Arc::new(server::ShutdownSignal::new());
    server::start_signal_handler(Arc::clone(&shutdown));

    let state = Arc::new(config::AppState::new(Arc::clone(&dispatcher)));
    let remaining = server::start_server_loop(listener, state, shutdown, grace).await;

    if remaining > 0 {
        dispatcher
            .warning(format!(
                "Shutting down with {remaining} connections still open after {}s",
                grace.as_secs()
            ))
            .await;
    }
    dispatcher.info("Server stopped").await;
    dispatcher.flush().await;

    Ok(())
}

/// Register the configured destinations.
///
/// Returns the dispatcher along with messages for sinks that could not be
/// set up; those are not fatal.
fn build_dispatcher(cfg: &config::Config) -> (Dispatcher, Vec<String>) {
    let mut errors = Vec::new();
    let mut builder: DispatcherBuilder = Dispatcher::builder();

    if cfg.logging.console {
        builder = builder.register(ConsoleDestination::new(), LevelSet::ALL);
    }

    if let Some(path) = cfg.logging.file_path() {
        match FileDestination::open(path) {
            Ok(file) => builder = builder.register(file, LevelSet::ALL),
            Err(e) => errors.push(format!("Failed to open log file '{path}': {e}")),
        }
    }

    if let Some(key) = cfg.alert.active_key() {
        match MessageBirdTransport::new(cfg.alert.endpoint.clone(), key) {
            Ok(transport) => {
                let alert = AlertDestination::new(
                    Arc::new(transport),
                    cfg.alert.originator.clone(),
                    cfg.alert.recipients.clone(),
                );
                builder = builder.register(alert, LevelSet::SEVERE);
            }
            Err(e) => errors.push(format!("Failed to set up SMS transport: {e}")),
        }
    }

    (builder.build(), errors)
}
