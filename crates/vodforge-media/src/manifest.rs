//! Master-playlist assembly for adaptive-bitrate packages.
//!
//! The media playlists are written by the encoder as a side effect of
//! segmenting; this module only builds the top-level master playlist.
//! Stream-info lines appear in rendition submission order. Players use
//! playlist order as a selection hint, so ordering is part of the
//! contract here, not an implementation detail.

use std::path::Path;

use vodforge_models::encoding::{media_playlist_name, MASTER_PLAYLIST_NAME};
use vodforge_models::{bandwidth_for_height, Rendition};

use crate::error::{MediaError, MediaResult};

/// Build the master playlist text for the given renditions.
pub fn master_manifest(renditions: &[Rendition]) -> MediaResult<String> {
    if renditions.is_empty() {
        return Err(MediaError::manifest(
            "adaptive-stream group has no renditions",
        ));
    }

    let mut manifest = String::new();
    manifest.push_str("#EXTM3U\n");
    manifest.push_str("#EXT-X-VERSION:3\n");
    manifest.push('\n');

    for rendition in renditions {
        manifest.push_str(&format!(
            "#EXT-X-STREAM-INF:BANDWIDTH={},RESOLUTION={}\n",
            bandwidth_for_height(rendition.height),
            rendition.resolution()
        ));
        manifest.push_str(&media_playlist_name(&rendition.name_modifier));
        manifest.push('\n');
    }

    Ok(manifest)
}

/// Write the master playlist into `dir` and return its path.
pub async fn write_master_manifest(
    dir: &Path,
    renditions: &[Rendition],
) -> MediaResult<std::path::PathBuf> {
    let contents = master_manifest(renditions)?;
    let path = dir.join(MASTER_PLAYLIST_NAME);
    tokio::fs::write(&path, contents).await?;
    Ok(path)
}
