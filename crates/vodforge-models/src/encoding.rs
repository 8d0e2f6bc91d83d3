//! Fixed encoding parameters and output naming conventions.
//!
//! Codec parameters are deterministic: the same job spec always
//! produces the same encoder invocation.

/// Video codec for all renditions (H.264)
pub const VIDEO_CODEC: &str = "libx264";
/// H.264 profile
pub const VIDEO_PROFILE: &str = "main";
/// Encoding preset
pub const PRESET: &str = "veryfast";
/// Constant Rate Factor (quality, lower is better)
pub const CRF: u8 = 23;
/// Audio codec
pub const AUDIO_CODEC: &str = "aac";
/// Audio bitrate
pub const AUDIO_BITRATE: &str = "128k";

/// HLS segment duration in seconds
pub const SEGMENT_SECONDS: u32 = 6;

/// Thumbnail scale width (height follows aspect ratio)
pub const THUMBNAIL_SCALE_WIDTH: u32 = 640;
/// Thumbnail JPEG quality (ffmpeg -q:v, lower is better)
pub const THUMBNAIL_QUALITY: u8 = 3;

/// Name of the master playlist within an adaptive-stream group.
pub const MASTER_PLAYLIST_NAME: &str = "master.m3u8";

/// Media playlist file name for a rendition, e.g. `stream_720p.m3u8`.
pub fn media_playlist_name(name_modifier: &str) -> String {
    format!("stream{}.m3u8", name_modifier)
}

/// Segment file name pattern for a rendition, e.g. `stream_720p_%03d.ts`.
pub fn segment_file_pattern(name_modifier: &str) -> String {
    format!("stream{}_%03d.ts", name_modifier)
}

/// Thumbnail file name pattern, zero-padded: `thumb_001.jpg`, ...
pub const THUMBNAIL_FILE_PATTERN: &str = "thumb_%03d.jpg";
