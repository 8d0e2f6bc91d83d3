//! Thread-safe job registry.
//!
//! The registry is the single source of truth shared between the
//! submission path and the controller path. Records are mutated only
//! through [`JobRegistry::transition`], an atomic compare-and-set on
//! status, so out-of-order transitions under concurrent access are
//! rejected rather than applied.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use vodforge_models::{Job, JobId, JobSpec, JobStatus};

/// Fields set alongside a status transition.
#[derive(Debug, Clone, Default)]
pub struct TransitionFields {
    /// Terminal timestamp, set exactly once
    pub finished_at: Option<DateTime<Utc>>,
    /// Failure summary for `Error` transitions
    pub error_message: Option<String>,
}

impl TransitionFields {
    /// Fields for a terminal transition at `now`.
    pub fn finished() -> Self {
        Self {
            finished_at: Some(Utc::now()),
            error_message: None,
        }
    }

    /// Fields for a terminal `Error` transition.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            finished_at: Some(Utc::now()),
            error_message: Some(message.into()),
        }
    }
}

/// In-memory, mutex-guarded job store keyed by job id.
///
/// Jobs are never deleted automatically; retention is an external
/// concern.
#[derive(Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<JobId, Job>>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id, store the record in `Submitted`, and return the id.
    pub fn create(&self, spec: JobSpec) -> JobId {
        let job = Job::new(spec);
        let id = job.id.clone();
        self.jobs.lock().unwrap().insert(id.clone(), job);
        id
    }

    /// Fetch a snapshot of one job record.
    pub fn get(&self, id: &JobId) -> Option<Job> {
        self.jobs.lock().unwrap().get(id).cloned()
    }

    /// Snapshot of all job records, newest first.
    pub fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.lock().unwrap().values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// Atomically move `id` from `from` to `to`, applying `fields`.
    ///
    /// Returns false without mutating if the job does not exist or its
    /// current status is not `from`.
    pub fn transition(
        &self,
        id: &JobId,
        from: JobStatus,
        to: JobStatus,
        fields: TransitionFields,
    ) -> bool {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs.get_mut(id) else {
            return false;
        };
        if job.status != from {
            return false;
        }

        job.status = to;
        if let Some(finished_at) = fields.finished_at {
            job.finished_at = Some(finished_at);
        }
        if let Some(message) = fields.error_message {
            job.error_message = Some(message);
        }
        true
    }
}
