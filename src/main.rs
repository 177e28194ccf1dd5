pub mod app;
pub mod config;
pub mod controller;
pub mod input;
pub mod mapping;
pub mod persistence;
pub mod ui;
pub mod wizard;

#[cfg(test)]
mod testing;

use crate::app::MapperApp;
use crate::config::MapperConfig;
use crate::controller::EvdevScanner;
use crate::persistence::FsStorage;
use crate::ui::LinuxFramebuffer;
use crate::wizard::WizardSession;
use color_eyre::{eyre::eyre, Result};
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup()?;

    let config = MapperConfig::load().map_err(|e| eyre!("Failed to load config: {}", e))?;
    let level = config
        .level()
        .map_err(|e| eyre!("Failed to set up logging: {}", e))?;
    setup_logging(level);
    info!("Starting gamepad-map with {:?}", config);

    // Ohne Display kein Wizard
    let display = LinuxFramebuffer::open(&config.framebuffer)
        .map_err(|e| eyre!("Failed to open display: {}", e))?;

    let session = WizardSession::new(
        Box::new(EvdevScanner::new(config.input_dir.clone())),
        Box::new(FsStorage),
        config.export_root.clone(),
    )
    .with_save_confirmation(config.confirm_after_save);

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let app = MapperApp::create(session, Box::new(display))
        .start()
        .run_until_shutdown(shutdown)
        .await;
    app.shutdown();

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    Ok(())
}

fn setup_logging(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty()
        .init();
}

/// Cancels `shutdown` on SIGINT or SIGTERM.
async fn wait_for_signal(shutdown: CancellationToken) {
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("SIGINT received"),
                _ = terminate.recv() => info!("SIGTERM received"),
            }
        }
        Err(e) => {
            warn!("Failed to listen for SIGTERM: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for SIGINT: {}", e);
                return;
            }
            info!("SIGINT received");
        }
    }
    shutdown.cancel();
}
