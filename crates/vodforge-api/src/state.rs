//! Application state.

use std::sync::Arc;

use vodforge_engine::{EngineConfig, JobController};
use vodforge_media::{Encoder, FfmpegEncoder};
use vodforge_storage::{ObjectStore, S3Store};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub controller: Arc<JobController>,
}

impl AppState {
    /// Create state with the production storage and encoder wiring.
    pub fn new(config: ApiConfig, engine_config: EngineConfig) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn ObjectStore> = Arc::new(S3Store::from_env()?);
        let encoder: Arc<dyn Encoder> = Arc::new(
            FfmpegEncoder::new()
                .with_segment_seconds(engine_config.segment_seconds)
                .with_thumbnail_width(engine_config.thumbnail_width),
        );
        Ok(Self::with_controller(
            config,
            JobController::new(store, encoder, engine_config),
        ))
    }

    /// Create state around an existing controller (tests inject fakes
    /// here).
    pub fn with_controller(config: ApiConfig, controller: JobController) -> Self {
        Self {
            config,
            controller: Arc::new(controller),
        }
    }
}
