//! Per-job staging areas.
//!
//! A staging area is a job-scoped scratch directory holding the
//! downloaded input and all locally produced artifacts before upload.
//! It is owned by exactly one job and removed on every exit path:
//! the controller releases it after the terminal transition, and the
//! `Drop` impl covers early returns and panics.

use std::path::{Path, PathBuf};

use tracing::warn;

use vodforge_models::JobId;

use crate::error::EngineResult;

/// A job-scoped scratch directory.
#[derive(Debug)]
pub struct StagingArea {
    path: PathBuf,
    released: bool,
}

impl StagingArea {
    /// Create the staging directory for `job_id` under `work_dir`.
    ///
    /// The name is derived from the job id, which is unique, so two
    /// jobs can never collide.
    pub async fn acquire(work_dir: &str, job_id: &JobId) -> EngineResult<Self> {
        let path = Path::new(work_dir).join(format!("job-{}", job_id));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self {
            path,
            released: false,
        })
    }

    /// Root of the staging directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Local path for the downloaded source file. Keeps the original
    /// extension when one is present so container sniffing has a hint.
    pub fn input_path(&self, extension: Option<&str>) -> PathBuf {
        match extension {
            Some(ext) => self.path.join(format!("input.{}", ext)),
            None => self.path.join("input"),
        }
    }

    /// Directory for one output group's artifacts.
    pub async fn group_dir(&self, index: usize) -> EngineResult<PathBuf> {
        let dir = self.path.join(format!("group-{}", index));
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    /// Remove the directory and all contents. Idempotent.
    pub async fn release(mut self) {
        self.released = true;
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to remove staging area {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }
}
