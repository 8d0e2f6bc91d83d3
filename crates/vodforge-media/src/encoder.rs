//! The encoder seam and its FFmpeg-backed implementation.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use vodforge_models::encoding::{
    media_playlist_name, segment_file_pattern, AUDIO_BITRATE, AUDIO_CODEC, CRF, PRESET,
    SEGMENT_SECONDS, THUMBNAIL_FILE_PATTERN, THUMBNAIL_QUALITY, THUMBNAIL_SCALE_WIDTH,
    VIDEO_CODEC, VIDEO_PROFILE,
};
use vodforge_models::{ImageSetParams, Rendition};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// External encoder boundary.
///
/// Production uses [`FfmpegEncoder`]; tests substitute an instrumented
/// fake to observe invocation counts and concurrency.
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Encode one rendition of `input` into `out_dir`, producing the
    /// rendition's media playlist and its segment files.
    async fn encode_rendition(
        &self,
        input: &Path,
        out_dir: &Path,
        rendition: &Rendition,
    ) -> MediaResult<()>;

    /// Extract preview thumbnails from `input` into `out_dir`. The
    /// source may run out before `params.count` frames; that is not an
    /// error.
    async fn extract_thumbnails(
        &self,
        input: &Path,
        out_dir: &Path,
        params: &ImageSetParams,
    ) -> MediaResult<()>;
}

/// FFmpeg-backed encoder.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    runner: FfmpegRunner,
    segment_seconds: u32,
    thumbnail_width: u32,
}

impl FfmpegEncoder {
    pub fn new() -> Self {
        Self {
            runner: FfmpegRunner::new(),
            segment_seconds: SEGMENT_SECONDS,
            thumbnail_width: THUMBNAIL_SCALE_WIDTH,
        }
    }

    /// Override the HLS segment duration.
    pub fn with_segment_seconds(mut self, seconds: u32) -> Self {
        self.segment_seconds = seconds;
        self
    }

    /// Override the thumbnail scale width.
    pub fn with_thumbnail_width(mut self, width: u32) -> Self {
        self.thumbnail_width = width;
        self
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Encoder for FfmpegEncoder {
    async fn encode_rendition(
        &self,
        input: &Path,
        out_dir: &Path,
        rendition: &Rendition,
    ) -> MediaResult<()> {
        let playlist = out_dir.join(media_playlist_name(&rendition.name_modifier));
        let segments = out_dir.join(segment_file_pattern(&rendition.name_modifier));

        debug!(
            "Encoding rendition {} ({}x{})",
            rendition.name_modifier, rendition.width, rendition.height
        );

        let cmd = FfmpegCommand::new(input, &playlist)
            .video_filter(format!("scale={}:{}", rendition.width, rendition.height))
            .video_codec(VIDEO_CODEC)
            .preset(PRESET)
            .crf(CRF)
            .output_arg("-profile:v")
            .output_arg(VIDEO_PROFILE)
            .audio_codec(AUDIO_CODEC)
            .audio_bitrate(AUDIO_BITRATE)
            .output_args([
                "-f",
                "hls",
                "-hls_time",
                &self.segment_seconds.to_string(),
                "-hls_playlist_type",
                "vod",
                "-hls_segment_filename",
            ])
            .output_arg(segments.to_string_lossy());

        self.runner.run(&cmd).await
    }

    async fn extract_thumbnails(
        &self,
        input: &Path,
        out_dir: &Path,
        params: &ImageSetParams,
    ) -> MediaResult<()> {
        let output = out_dir.join(THUMBNAIL_FILE_PATTERN);

        debug!(
            "Extracting up to {} thumbnails every {}s",
            params.count, params.interval_seconds
        );

        let cmd = FfmpegCommand::new(input, &output)
            .video_filter(format!(
                "fps=1/{},scale={}:-2",
                params.interval_seconds.max(1),
                self.thumbnail_width
            ))
            .frames(params.count)
            .output_arg("-q:v")
            .output_arg(THUMBNAIL_QUALITY.to_string());

        self.runner.run(&cmd).await
    }
}
