//! Job controller: drives the lifecycle state machine.
//!
//! Submission is non-blocking: the spec is validated, a registry record
//! is created in `SUBMITTED`, and processing is handed to a spawned
//! task. Callers poll job status through the registry. The controller
//! moves the job to `PROGRESSING` before touching any I/O and to
//! exactly one of `COMPLETE` or `ERROR` when processing ends; the
//! staging area is released exactly once, after the terminal
//! transition.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info};

use vodforge_media::Encoder;
use vodforge_models::{JobId, JobSpec, JobStatus, Locator, OutputGroupKind};
use vodforge_storage::ObjectStore;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::fetch::fetch_source;
use crate::pipeline::process_output_group;
use crate::registry::{JobRegistry, TransitionFields};
use crate::staging::StagingArea;

/// Orchestrates job processing over the registry, storage, and encoder.
#[derive(Clone)]
pub struct JobController {
    registry: JobRegistry,
    store: Arc<dyn ObjectStore>,
    encoder: Arc<dyn Encoder>,
    config: EngineConfig,
    /// Global bound on encoder subprocesses across all jobs
    encode_slots: Arc<Semaphore>,
}

impl JobController {
    /// Create a new controller.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        encoder: Arc<dyn Encoder>,
        config: EngineConfig,
    ) -> Self {
        let encode_slots = Arc::new(Semaphore::new(config.max_encode_processes.max(1)));
        Self {
            registry: JobRegistry::new(),
            store,
            encoder,
            config,
            encode_slots,
        }
    }

    /// The registry backing this controller (shared with the query
    /// interface).
    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    /// Validate and register a job, then hand processing to a spawned
    /// task. Returns immediately with the new id and its initial
    /// status.
    pub fn submit(&self, spec: JobSpec) -> EngineResult<(JobId, JobStatus)> {
        validate_spec(&spec)?;

        let id = self.registry.create(spec);
        info!(job_id = %id, "Job submitted");

        let controller = self.clone();
        let job_id = id.clone();
        tokio::spawn(async move {
            controller.process(job_id).await;
        });

        Ok((id, JobStatus::Submitted))
    }

    /// Drive one job to a terminal state.
    async fn process(&self, id: JobId) {
        // Unconditionally leave SUBMITTED before any I/O
        self.registry.transition(
            &id,
            JobStatus::Submitted,
            JobStatus::Progressing,
            TransitionFields::default(),
        );

        let Some(job) = self.registry.get(&id) else {
            error!(job_id = %id, "Job record vanished before processing");
            return;
        };

        let staging = match StagingArea::acquire(&self.config.work_dir, &id).await {
            Ok(staging) => staging,
            Err(e) => {
                error!(job_id = %id, "Failed to acquire staging area: {}", e);
                self.registry.transition(
                    &id,
                    JobStatus::Progressing,
                    JobStatus::Error,
                    TransitionFields::failed(e.job_message()),
                );
                return;
            }
        };

        match self.run_pipeline(&id, &staging, &job.spec).await {
            Ok(()) => {
                self.registry.transition(
                    &id,
                    JobStatus::Progressing,
                    JobStatus::Complete,
                    TransitionFields::finished(),
                );
                info!(job_id = %id, "Job complete");
            }
            Err(e) => {
                error!(job_id = %id, "Job failed: {}", e);
                self.registry.transition(
                    &id,
                    JobStatus::Progressing,
                    JobStatus::Error,
                    TransitionFields::failed(e.job_message()),
                );
            }
        }

        staging.release().await;
    }

    /// Fetch the source, then process output groups sequentially in
    /// submission order. The first failing group aborts the rest.
    async fn run_pipeline(
        &self,
        id: &JobId,
        staging: &StagingArea,
        spec: &JobSpec,
    ) -> EngineResult<()> {
        let input_locator = Locator::parse(&spec.input)?;
        let input_path = staging.input_path(input_locator.extension());

        fetch_source(self.store.as_ref(), &input_locator, &input_path).await?;
        info!(job_id = %id, "Source fetched");

        for (index, group) in spec.output_groups.iter().enumerate() {
            process_output_group(
                &self.store,
                &self.encoder,
                &self.encode_slots,
                staging,
                &input_path,
                index,
                group,
            )
            .await?;
            info!(job_id = %id, group = index, "Output group uploaded");
        }

        Ok(())
    }
}

/// Reject malformed specs before creating any state.
fn validate_spec(spec: &JobSpec) -> EngineResult<()> {
    Locator::parse(&spec.input)?;

    if spec.output_groups.is_empty() {
        return Err(EngineError::unsupported_output_group(
            "job has no output groups",
        ));
    }

    for group in &spec.output_groups {
        Locator::parse(&group.destination)?;
        if group.kind == OutputGroupKind::AdaptiveStream && group.renditions.is_empty() {
            return Err(EngineError::unsupported_output_group(
                "adaptive-stream group has no renditions",
            ));
        }
    }

    Ok(())
}
