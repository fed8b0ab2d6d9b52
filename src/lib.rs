#[cfg(feature = "gtk")]
pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
pub use error::{AppError, AppResult};

/// Entrypoint used by the `shapepad` binary.
#[cfg(feature = "gtk")]
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting shapepad");

    let config = config::load_app_config();
    tracing::debug!(?config, "loaded configuration");
    app::run(config)?;

    tracing::info!("shapepad exited");
    Ok(())
}
