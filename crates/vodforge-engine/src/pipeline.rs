//! Output-group processing.
//!
//! One job processes its output groups sequentially, in submission
//! order. Within an adaptive-stream group, renditions run concurrently,
//! each holding a permit from the global encode semaphore; the master
//! playlist is assembled only after every rendition has finished, and
//! uploaded only after its referenced artifacts.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;

use vodforge_media::{write_master_manifest, Encoder, MediaError};
use vodforge_models::{Locator, OutputGroup, OutputGroupKind};
use vodforge_storage::ObjectStore;

use crate::error::{EngineError, EngineResult};
use crate::staging::StagingArea;
use crate::upload::upload_artifacts;

/// Process one output group end to end: produce artifacts into the
/// staging area, then upload them under the group's destination.
pub async fn process_output_group(
    store: &Arc<dyn ObjectStore>,
    encoder: &Arc<dyn Encoder>,
    encode_slots: &Arc<Semaphore>,
    staging: &StagingArea,
    input: &Path,
    index: usize,
    group: &OutputGroup,
) -> EngineResult<()> {
    let destination = Locator::parse(&group.destination)?;
    let group_dir = staging.group_dir(index).await?;

    match group.kind {
        OutputGroupKind::AdaptiveStream => {
            encode_renditions(encoder, encode_slots, input, &group_dir, group).await?;

            write_master_manifest(&group_dir, &group.renditions)
                .await
                .map_err(|e| match e {
                    MediaError::Manifest(msg) => EngineError::Packaging(msg),
                    other => EngineError::Packaging(other.to_string()),
                })?;
        }
        OutputGroupKind::ImageSet => {
            // Thumbnail extraction is an encoder subprocess too, so it
            // competes for the same global slots.
            let permit = encode_slots.acquire().await.map_err(|_| {
                EngineError::encode("thumbnails", MediaError::internal("encoder pool closed"))
            })?;
            let result = encoder
                .extract_thumbnails(input, &group_dir, &group.image_set)
                .await;
            drop(permit);
            result.map_err(|e| EngineError::encode("thumbnails", e))?;
        }
    }

    upload_artifacts(store.as_ref(), &group_dir, &destination, group.kind).await
}

/// Encode every rendition of an adaptive-stream group, concurrently up
/// to the global encode bound. The first failure aborts the rest of
/// the group.
async fn encode_renditions(
    encoder: &Arc<dyn Encoder>,
    encode_slots: &Arc<Semaphore>,
    input: &Path,
    group_dir: &Path,
    group: &OutputGroup,
) -> EngineResult<()> {
    let mut tasks = JoinSet::new();

    for rendition in group.renditions.clone() {
        let encoder = Arc::clone(encoder);
        let slots = Arc::clone(encode_slots);
        let input = input.to_path_buf();
        let out_dir = group_dir.to_path_buf();

        tasks.spawn(async move {
            let name = rendition.name_modifier.clone();
            let Ok(_permit) = slots.acquire_owned().await else {
                return Err(EngineError::encode(
                    name,
                    MediaError::internal("encoder pool closed"),
                ));
            };
            encoder
                .encode_rendition(&input, &out_dir, &rendition)
                .await
                .map_err(|e| EngineError::encode(name, e))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(|e| {
            EngineError::encode("unknown", MediaError::internal(format!("encode task: {}", e)))
        })?;
        if let Err(e) = result {
            tasks.abort_all();
            return Err(e);
        }
    }

    info!(
        "Encoded {} rendition(s) for group {}",
        group.renditions.len(),
        group.destination
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use vodforge_media::MediaResult;
    use vodforge_models::{ImageSetParams, JobId, Rendition};
    use vodforge_storage::MemoryStore;

    /// Writes plausible artifacts instead of invoking FFmpeg.
    #[derive(Default)]
    struct StubEncoder {
        fail_rendition: Option<String>,
        thumbs_produced: Option<u32>,
        invocations: AtomicUsize,
    }

    #[async_trait]
    impl Encoder for StubEncoder {
        async fn encode_rendition(
            &self,
            _input: &Path,
            out_dir: &Path,
            rendition: &Rendition,
        ) -> MediaResult<()> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            if self.fail_rendition.as_deref() == Some(rendition.name_modifier.as_str()) {
                return Err(MediaError::ffmpeg_failed(
                    "FFmpeg exited with non-zero status",
                    Some("stub stderr".into()),
                    Some(1),
                ));
            }
            let name = &rendition.name_modifier;
            tokio::fs::write(out_dir.join(format!("stream{}.m3u8", name)), b"#EXTM3U\n")
                .await?;
            for i in 0..2 {
                tokio::fs::write(out_dir.join(format!("stream{}_{:03}.ts", name, i)), b"seg")
                    .await?;
            }
            Ok(())
        }

        async fn extract_thumbnails(
            &self,
            _input: &Path,
            out_dir: &Path,
            params: &ImageSetParams,
        ) -> MediaResult<()> {
            self.invocations.fetch_add(1, Ordering::SeqCst);
            let produced = self.thumbs_produced.unwrap_or(params.count);
            for i in 1..=produced.min(params.count) {
                tokio::fs::write(out_dir.join(format!("thumb_{:03}.jpg", i)), b"jpg").await?;
            }
            Ok(())
        }
    }

    fn stream_group(destination: &str, renditions: Vec<Rendition>) -> OutputGroup {
        serde_json::from_value(serde_json::json!({
            "kind": "ADAPTIVE_STREAM",
            "destination": destination,
            "renditions": serde_json::to_value(renditions).unwrap(),
        }))
        .unwrap()
    }

    fn image_group(destination: &str, count: u32) -> OutputGroup {
        serde_json::from_value(serde_json::json!({
            "kind": "IMAGE_SET",
            "destination": destination,
            "imageSet": { "count": count, "intervalSeconds": 1 },
        }))
        .unwrap()
    }

    struct Fixture {
        _root: tempfile::TempDir,
        staging: StagingArea,
        store: Arc<dyn ObjectStore>,
        memory: Arc<MemoryStore>,
        encoder: Arc<StubEncoder>,
        slots: Arc<Semaphore>,
    }

    async fn fixture(encoder: StubEncoder) -> Fixture {
        let root = tempfile::TempDir::new().unwrap();
        let work_dir = root.path().to_string_lossy().to_string();
        let staging = StagingArea::acquire(&work_dir, &JobId::new()).await.unwrap();
        tokio::fs::write(staging.input_path(Some("mp4")), b"source").await.unwrap();

        let memory = Arc::new(MemoryStore::new());
        let store: Arc<dyn ObjectStore> = memory.clone();
        let encoder = Arc::new(encoder);
        Fixture {
            _root: root,
            staging,
            store,
            memory,
            encoder,
            slots: Arc::new(Semaphore::new(2)),
        }
    }

    #[tokio::test]
    async fn test_stream_group_uploads_full_package() {
        let f = fixture(StubEncoder::default()).await;
        let group = stream_group(
            "s3://media/hls/v1/",
            vec![
                Rendition::new(1920, 1080, "_1080p"),
                Rendition::new(1280, 720, "_720p"),
            ],
        );
        let encoder: Arc<dyn Encoder> = f.encoder.clone();
        let input = f.staging.input_path(Some("mp4"));

        process_output_group(&f.store, &encoder, &f.slots, &f.staging, &input, 0, &group)
            .await
            .unwrap();

        let keys = f.memory.keys_with_prefix("media", "hls/v1/");
        assert!(keys.contains(&"hls/v1/master.m3u8".to_string()));
        assert!(keys.contains(&"hls/v1/stream_1080p.m3u8".to_string()));
        assert!(keys.contains(&"hls/v1/stream_720p_001.ts".to_string()));
        assert_eq!(f.memory.put_order().last().unwrap(), "hls/v1/master.m3u8");

        let master = f.memory.object("media", "hls/v1/master.m3u8").unwrap();
        let text = String::from_utf8(master.body).unwrap();
        assert!(text.contains("BANDWIDTH=8000000,RESOLUTION=1920x1080"));
        assert!(text.contains("BANDWIDTH=5000000,RESOLUTION=1280x720"));
    }

    #[tokio::test]
    async fn test_failing_rendition_fails_group_without_master() {
        let f = fixture(StubEncoder {
            fail_rendition: Some("_720p".into()),
            ..Default::default()
        })
        .await;
        let group = stream_group(
            "s3://media/hls/v1/",
            vec![
                Rendition::new(1920, 1080, "_1080p"),
                Rendition::new(1280, 720, "_720p"),
            ],
        );
        let encoder: Arc<dyn Encoder> = f.encoder.clone();
        let input = f.staging.input_path(Some("mp4"));

        let err = process_output_group(&f.store, &encoder, &f.slots, &f.staging, &input, 0, &group)
            .await
            .unwrap_err();

        match err {
            EngineError::Encode { rendition, .. } => assert_eq!(rendition, "_720p"),
            other => panic!("expected Encode error, got {:?}", other),
        }
        // Nothing player-facing was published
        assert!(f.memory.object("media", "hls/v1/master.m3u8").is_none());
    }

    #[tokio::test]
    async fn test_image_group_uploads_requested_count() {
        let f = fixture(StubEncoder::default()).await;
        let group = image_group("s3://media/thumbs/v1/", 10);
        let encoder: Arc<dyn Encoder> = f.encoder.clone();
        let input = f.staging.input_path(Some("mp4"));

        process_output_group(&f.store, &encoder, &f.slots, &f.staging, &input, 1, &group)
            .await
            .unwrap();

        let keys = f.memory.keys_with_prefix("media", "thumbs/v1/");
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0], "thumbs/v1/thumb_001.jpg");
        assert_eq!(keys[9], "thumbs/v1/thumb_010.jpg");
        for key in keys {
            assert_eq!(
                f.memory.object("media", &key).unwrap().content_type,
                "image/jpeg"
            );
        }
    }

    #[tokio::test]
    async fn test_short_source_uploads_fewer_thumbnails() {
        let f = fixture(StubEncoder {
            thumbs_produced: Some(3),
            ..Default::default()
        })
        .await;
        let group = image_group("s3://media/thumbs/v1/", 10);
        let encoder: Arc<dyn Encoder> = f.encoder.clone();
        let input = f.staging.input_path(Some("mp4"));

        process_output_group(&f.store, &encoder, &f.slots, &f.staging, &input, 0, &group)
            .await
            .unwrap();

        assert_eq!(f.memory.keys_with_prefix("media", "thumbs/v1/").len(), 3);
    }

    #[tokio::test]
    async fn test_empty_stream_group_is_packaging_error() {
        let f = fixture(StubEncoder::default()).await;
        let group = stream_group("s3://media/hls/v1/", vec![]);
        let encoder: Arc<dyn Encoder> = f.encoder.clone();
        let input = f.staging.input_path(Some("mp4"));

        let err = process_output_group(&f.store, &encoder, &f.slots, &f.staging, &input, 0, &group)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Packaging(_)));
    }
}
