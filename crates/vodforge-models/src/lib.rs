//! Shared data models for the VodForge transcoding engine.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs and their lifecycle status
//! - Job specifications (input, output groups, renditions)
//! - Object-storage locators
//! - The rendition ladder and fixed encoding parameters

pub mod encoding;
pub mod job;
pub mod ladder;
pub mod locator;
pub mod spec;

// Re-export common types
pub use job::{Job, JobId, JobStatus};
pub use ladder::{bandwidth_for_height, DEFAULT_BANDWIDTH};
pub use locator::{Locator, LocatorError};
pub use spec::{ImageSetParams, JobSpec, OutputGroup, OutputGroupKind, Rendition};
