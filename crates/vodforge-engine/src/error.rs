//! Engine error taxonomy.
//!
//! Every variant is terminal for the job that raised it: the engine
//! fails fast and reports precisely, leaving retry policy to the
//! caller (resubmit a new job).

use thiserror::Error;

use vodforge_media::MediaError;
use vodforge_models::LocatorError;
use vodforge_storage::StorageError;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can terminate a job.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid locator: {0}")]
    InvalidLocator(#[from] LocatorError),

    #[error("failed to fetch source: {0}")]
    Fetch(#[source] StorageError),

    #[error("encoding failed for {rendition}: {source}")]
    Encode {
        rendition: String,
        #[source]
        source: MediaError,
    },

    #[error("packaging failed: {0}")]
    Packaging(String),

    #[error("upload failed for {key}: {source}")]
    Upload {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("unsupported output group: {0}")]
    UnsupportedOutputGroup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn encode(rendition: impl Into<String>, source: MediaError) -> Self {
        Self::Encode {
            rendition: rendition.into(),
            source,
        }
    }

    pub fn packaging(msg: impl Into<String>) -> Self {
        Self::Packaging(msg.into())
    }

    pub fn upload(key: impl Into<String>, source: StorageError) -> Self {
        Self::Upload {
            key: key.into(),
            source,
        }
    }

    pub fn unsupported_output_group(msg: impl Into<String>) -> Self {
        Self::UnsupportedOutputGroup(msg.into())
    }

    /// True for errors a submitter caused (rejected before processing).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocator(_) | Self::UnsupportedOutputGroup(_)
        )
    }

    /// Human-readable summary stored on the job record. Never includes
    /// raw subprocess output, only the identifying context.
    pub fn job_message(&self) -> String {
        self.to_string()
    }
}
