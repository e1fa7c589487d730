//! Host errors

use board_physics::config::ConfigError;
use board_physics::render::BitmapError;
use thiserror::Error;

/// Anything that can stop the host before or after the run
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration could not be loaded, saved or validated
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Level art could not be built
    #[error("Asset error: {0}")]
    Asset(#[from] BitmapError),

    /// Snapshot could not be written
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] image::ImageError),

    /// A logger was already installed
    #[error("Logging error: {0}")]
    Logging(#[from] log::SetLoggerError),

    /// Bad command line
    #[error("Usage error: {0}")]
    Usage(String),
}
