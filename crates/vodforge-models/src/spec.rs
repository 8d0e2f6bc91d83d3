//! Job specification: input, output groups, renditions.

use serde::{Deserialize, Serialize};

/// Default number of preview thumbnails per image set.
pub const DEFAULT_THUMBNAIL_COUNT: u32 = 10;
/// Default sampling interval between thumbnails, in seconds.
pub const DEFAULT_THUMBNAIL_INTERVAL_SECS: u32 = 10;

/// A transcoding job specification. Immutable after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Source object locator (`scheme://bucket/key`)
    pub input: String,
    /// Output groups, processed in submission order
    pub output_groups: Vec<OutputGroup>,
}

/// Kind of artifacts an output group produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutputGroupKind {
    /// HLS adaptive-bitrate package: per-rendition media playlists,
    /// segments, and a master playlist
    AdaptiveStream,
    /// Preview thumbnail images
    ImageSet,
}

/// One group of outputs sharing a destination prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputGroup {
    pub kind: OutputGroupKind,
    /// Destination locator prefix for the produced artifacts
    pub destination: String,
    /// Renditions to encode (ADAPTIVE_STREAM groups)
    #[serde(default)]
    pub renditions: Vec<Rendition>,
    /// Thumbnail extraction parameters (IMAGE_SET groups)
    #[serde(default)]
    pub image_set: ImageSetParams,
}

/// One encoded version of the source at a specific resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rendition {
    pub width: u32,
    pub height: u32,
    /// Infix used to disambiguate output file names,
    /// e.g. `_1080p` -> `stream_1080p.m3u8`
    pub name_modifier: String,
}

impl Rendition {
    pub fn new(width: u32, height: u32, name_modifier: impl Into<String>) -> Self {
        Self {
            width,
            height,
            name_modifier: name_modifier.into(),
        }
    }

    /// `WxH` string used in manifest RESOLUTION attributes.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Thumbnail extraction parameters for an IMAGE_SET group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSetParams {
    /// Maximum number of images to emit
    #[serde(default = "default_thumbnail_count")]
    pub count: u32,
    /// Seconds between sampled frames
    #[serde(default = "default_thumbnail_interval")]
    pub interval_seconds: u32,
}

fn default_thumbnail_count() -> u32 {
    DEFAULT_THUMBNAIL_COUNT
}

fn default_thumbnail_interval() -> u32 {
    DEFAULT_THUMBNAIL_INTERVAL_SECS
}

impl Default for ImageSetParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_THUMBNAIL_COUNT,
            interval_seconds: DEFAULT_THUMBNAIL_INTERVAL_SECS,
        }
    }
}
