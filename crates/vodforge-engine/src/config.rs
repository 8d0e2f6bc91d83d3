//! Engine configuration.

use vodforge_models::encoding::{SEGMENT_SECONDS, THUMBNAIL_SCALE_WIDTH};

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root directory for per-job staging areas
    pub work_dir: String,
    /// Global bound on concurrently running encoder subprocesses,
    /// shared across all in-flight jobs
    pub max_encode_processes: usize,
    /// HLS segment duration in seconds
    pub segment_seconds: u32,
    /// Scale width for extracted thumbnails
    pub thumbnail_width: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            work_dir: "/tmp/vodforge".to_string(),
            max_encode_processes: 4,
            segment_seconds: SEGMENT_SECONDS,
            thumbnail_width: THUMBNAIL_SCALE_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("ENGINE_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/vodforge".to_string()),
            max_encode_processes: std::env::var("ENGINE_MAX_ENCODE_PROCESSES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(4),
            segment_seconds: std::env::var("ENGINE_SEGMENT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SEGMENT_SECONDS),
            thumbnail_width: std::env::var("ENGINE_THUMBNAIL_WIDTH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(THUMBNAIL_SCALE_WIDTH),
        }
    }
}
