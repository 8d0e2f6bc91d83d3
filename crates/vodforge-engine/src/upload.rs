//! Artifact upload.
//!
//! Uploads the staged artifacts of one output group under its
//! destination prefix. For adaptive-stream groups the master playlist
//! goes last, strictly after every media playlist and segment, so a
//! reader fetching the master playlist never observes dangling
//! references. Artifacts of a failed group are not rolled back; orphan
//! cleanup is a separate garbage-collection concern.

use std::path::Path;

use tracing::{debug, info};

use vodforge_models::encoding::MASTER_PLAYLIST_NAME;
use vodforge_models::{Locator, OutputGroupKind};
use vodforge_storage::{content_type_for, ObjectStore};

use crate::error::{EngineError, EngineResult};

/// Upload the relevant files from `dir` to `destination`.
pub async fn upload_artifacts(
    store: &dyn ObjectStore,
    dir: &Path,
    destination: &Locator,
    kind: OutputGroupKind,
) -> EngineResult<()> {
    let mut names = staged_file_names(dir, kind).await?;
    names.sort();

    // Master playlist is uploaded last
    let master = match kind {
        OutputGroupKind::AdaptiveStream => {
            let pos = names.iter().position(|n| n == MASTER_PLAYLIST_NAME);
            pos.map(|p| names.remove(p))
        }
        OutputGroupKind::ImageSet => None,
    };

    let mut uploaded = 0usize;
    for name in names.iter().chain(master.iter()) {
        let body = tokio::fs::read(dir.join(name)).await?;
        let key = destination.object_key(name);
        debug!("Uploading {} ({} bytes)", key, body.len());

        store
            .put(destination.bucket(), &key, body, content_type_for(name))
            .await
            .map_err(|e| EngineError::upload(key.clone(), e))?;
        uploaded += 1;
    }

    info!("Uploaded {} artifacts to {}", uploaded, destination);
    Ok(())
}

/// File names in `dir` relevant to an output group of `kind`.
async fn staged_file_names(dir: &Path, kind: OutputGroupKind) -> EngineResult<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let relevant = match kind {
            OutputGroupKind::AdaptiveStream => {
                name.ends_with(".m3u8") || name.ends_with(".ts")
            }
            OutputGroupKind::ImageSet => name.ends_with(".jpg"),
        };
        if relevant {
            names.push(name);
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vodforge_storage::MemoryStore;

    async fn stage_stream_files(dir: &Path) {
        for name in [
            "master.m3u8",
            "stream_720p.m3u8",
            "stream_720p_000.ts",
            "stream_720p_001.ts",
            "input.mp4", // not an artifact
        ] {
            tokio::fs::write(dir.join(name), b"x").await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_stream_upload_master_last() {
        let dir = tempfile::TempDir::new().unwrap();
        stage_stream_files(dir.path()).await;

        let store = MemoryStore::new();
        let destination = Locator::parse("s3://media/hls/abc/").unwrap();

        upload_artifacts(&store, dir.path(), &destination, OutputGroupKind::AdaptiveStream)
            .await
            .unwrap();

        let order = store.put_order();
        assert_eq!(order.len(), 4);
        assert_eq!(order.last().unwrap(), "hls/abc/master.m3u8");
        // Source file is not uploaded
        assert!(store.object("media", "hls/abc/input.mp4").is_none());
    }

    #[tokio::test]
    async fn test_content_types_preserved() {
        let dir = tempfile::TempDir::new().unwrap();
        stage_stream_files(dir.path()).await;

        let store = MemoryStore::new();
        let destination = Locator::parse("s3://media/hls/abc/").unwrap();
        upload_artifacts(&store, dir.path(), &destination, OutputGroupKind::AdaptiveStream)
            .await
            .unwrap();

        assert_eq!(
            store.object("media", "hls/abc/master.m3u8").unwrap().content_type,
            "application/vnd.apple.mpegurl"
        );
        assert_eq!(
            store
                .object("media", "hls/abc/stream_720p_000.ts")
                .unwrap()
                .content_type,
            "video/mp2t"
        );
    }

    #[tokio::test]
    async fn test_image_upload_filters_jpgs() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["thumb_001.jpg", "thumb_002.jpg", "input.mp4"] {
            tokio::fs::write(dir.path().join(name), b"x").await.unwrap();
        }

        let store = MemoryStore::new();
        let destination = Locator::parse("s3://media/thumbs/abc/").unwrap();
        upload_artifacts(&store, dir.path(), &destination, OutputGroupKind::ImageSet)
            .await
            .unwrap();

        let keys = store.keys_with_prefix("media", "thumbs/abc/");
        assert_eq!(keys, vec!["thumbs/abc/thumb_001.jpg", "thumbs/abc/thumb_002.jpg"]);
        assert_eq!(
            store.object("media", "thumbs/abc/thumb_001.jpg").unwrap().content_type,
            "image/jpeg"
        );
    }

    #[tokio::test]
    async fn test_empty_image_group_uploads_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = MemoryStore::new();
        let destination = Locator::parse("s3://media/thumbs/abc/").unwrap();

        upload_artifacts(&store, dir.path(), &destination, OutputGroupKind::ImageSet)
            .await
            .unwrap();
        assert!(store.put_order().is_empty());
    }
}
