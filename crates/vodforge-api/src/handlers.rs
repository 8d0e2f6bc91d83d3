//! Request handlers for job submission and status.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use vodforge_models::{Job, JobId, JobSpec, JobStatus};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe). No side effects.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Response to a job submission.
#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub id: JobId,
    pub status: JobStatus,
}

/// Submit a transcoding job. Registers the job and returns immediately;
/// callers poll `GET /v1/jobs/:id` for progress.
pub async fn create_job(
    State(state): State<AppState>,
    Json(spec): Json<JobSpec>,
) -> ApiResult<(StatusCode, Json<CreateJobResponse>)> {
    let (id, status) = state.controller.submit(spec)?;
    Ok((StatusCode::ACCEPTED, Json(CreateJobResponse { id, status })))
}

/// Fetch one job record.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Job>> {
    let id = JobId::from_string(id);
    state
        .controller
        .registry()
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("job {}", id)))
}

/// List all job records, newest first.
pub async fn list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.controller.registry().list())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use vodforge_engine::{EngineConfig, JobController};
    use vodforge_media::{Encoder, MediaResult};
    use vodforge_models::{ImageSetParams, Rendition};
    use vodforge_storage::MemoryStore;

    struct NoopEncoder;

    #[async_trait]
    impl Encoder for NoopEncoder {
        async fn encode_rendition(
            &self,
            _input: &std::path::Path,
            out_dir: &std::path::Path,
            rendition: &Rendition,
        ) -> MediaResult<()> {
            let name = &rendition.name_modifier;
            tokio::fs::write(out_dir.join(format!("stream{}.m3u8", name)), b"#EXTM3U\n")
                .await?;
            Ok(())
        }

        async fn extract_thumbnails(
            &self,
            _input: &std::path::Path,
            _out_dir: &std::path::Path,
            _params: &ImageSetParams,
        ) -> MediaResult<()> {
            Ok(())
        }
    }

    fn test_state(work_root: &tempfile::TempDir) -> AppState {
        let store = Arc::new(MemoryStore::new());
        store.insert("media", "raw/clip.mp4", b"src".to_vec(), "video/mp4");
        let controller = JobController::new(
            store,
            Arc::new(NoopEncoder),
            EngineConfig {
                work_dir: work_root.path().to_string_lossy().to_string(),
                max_encode_processes: 2,
                ..EngineConfig::default()
            },
        );
        AppState::with_controller(crate::config::ApiConfig::default(), controller)
    }

    fn stream_spec() -> JobSpec {
        serde_json::from_value(serde_json::json!({
            "input": "s3://media/raw/clip.mp4",
            "outputGroups": [{
                "kind": "ADAPTIVE_STREAM",
                "destination": "s3://media/hls/v1/",
                "renditions": [{ "width": 1280, "height": 720, "nameModifier": "_720p" }]
            }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_job_returns_accepted_submitted() {
        let root = tempfile::TempDir::new().unwrap();
        let state = test_state(&root);

        let (status, Json(response)) = create_job(State(state.clone()), Json(stream_spec()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(response.status, JobStatus::Submitted);

        // Record is queryable immediately
        let Json(job) = get_job(State(state), Path(response.id.to_string()))
            .await
            .unwrap();
        assert_eq!(job.id, response.id);
    }

    #[tokio::test]
    async fn test_create_job_rejects_bad_locator() {
        let root = tempfile::TempDir::new().unwrap();
        let state = test_state(&root);

        let spec: JobSpec = serde_json::from_value(serde_json::json!({
            "input": "no-scheme-here",
            "outputGroups": [{
                "kind": "IMAGE_SET",
                "destination": "s3://media/thumbs/v1/"
            }]
        }))
        .unwrap();

        let err = create_job(State(state), Json(spec)).await.unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_get_job_unknown_is_not_found() {
        let root = tempfile::TempDir::new().unwrap();
        let state = test_state(&root);

        let err = get_job(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_jobs() {
        let root = tempfile::TempDir::new().unwrap();
        let state = test_state(&root);

        create_job(State(state.clone()), Json(stream_spec()))
            .await
            .unwrap();
        create_job(State(state.clone()), Json(stream_spec()))
            .await
            .unwrap();

        let Json(jobs) = list_jobs(State(state)).await;
        assert_eq!(jobs.len(), 2);
    }

    #[tokio::test]
    async fn test_health_has_no_side_effects() {
        let Json(response) = health().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }
}
