//! FFmpeg CLI wrapper and HLS packaging.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building (argv vectors, never shell strings)
//! - A runner that captures stderr for diagnostics
//! - The [`Encoder`] trait and its FFmpeg-backed implementation
//! - Master-playlist assembly for adaptive-bitrate packages

pub mod command;
pub mod encoder;
pub mod error;
pub mod manifest;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use encoder::{Encoder, FfmpegEncoder};
pub use error::{MediaError, MediaResult};
pub use manifest::{master_manifest, write_master_manifest};
