//! The VodForge transcoding job engine.
//!
//! A submitted job moves through a small state machine
//! (`SUBMITTED -> PROGRESSING -> {COMPLETE, ERROR}`) driven by the
//! [`JobController`]: fetch the source from object storage into a
//! job-scoped staging area, encode each requested rendition with a
//! bounded pool of FFmpeg subprocesses, assemble the HLS package,
//! extract thumbnails, and upload everything back to storage.

pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod registry;
pub mod staging;
pub mod upload;

pub use config::EngineConfig;
pub use controller::JobController;
pub use error::{EngineError, EngineResult};
pub use registry::{JobRegistry, TransitionFields};
pub use staging::StagingArea;
