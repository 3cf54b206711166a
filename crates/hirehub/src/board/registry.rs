use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::domain::{JobDraft, JobId, JobPosting};

/// Error enumeration for registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("job {0} not found")]
    NotFound(JobId),
    #[error("duplicate job id {0}")]
    DuplicateId(JobId),
}

/// Authoritative in-memory collection of postings plus the session's applied-set.
///
/// Iteration order is insertion order with newly created postings at the head.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: Vec<JobPosting>,
    applied: BTreeSet<JobId>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the registry, rejecting duplicate ids.
    pub fn with_jobs(jobs: Vec<JobPosting>) -> Result<Self, RegistryError> {
        let mut seen = BTreeSet::new();
        for job in &jobs {
            if !seen.insert(job.id.clone()) {
                return Err(RegistryError::DuplicateId(job.id.clone()));
            }
        }

        Ok(Self {
            jobs,
            applied: BTreeSet::new(),
        })
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn applied(&self) -> &BTreeSet<JobId> {
        &self.applied
    }

    pub fn get(&self, id: &JobId) -> Option<&JobPosting> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn contains(&self, id: &JobId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn has_applied(&self, id: &JobId) -> bool {
        self.applied.contains(id)
    }

    pub fn create(&mut self, draft: JobDraft) -> JobPosting {
        self.create_at(draft, Utc::now())
    }

    pub fn create_at(&mut self, draft: JobDraft, posted_at: DateTime<Utc>) -> JobPosting {
        let id = self.fresh_id();
        let posting = JobPosting::from_draft(id, draft, posted_at);
        self.jobs.insert(0, posting.clone());
        debug!(job_id = %posting.id, title = %posting.title, "job created");
        posting
    }

    pub fn update(&mut self, id: &JobId, draft: JobDraft) -> Result<JobPosting, RegistryError> {
        let index = self
            .position(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        let posting = &mut self.jobs[index];
        posting.apply_draft(draft);
        debug!(job_id = %id, "job updated");
        Ok(posting.clone())
    }

    /// Removes a posting. Unknown ids are a no-op so stale deletes are harmless.
    pub fn delete(&mut self, id: &JobId) -> Option<JobPosting> {
        let index = self.position(id)?;
        let removed = self.jobs.remove(index);
        debug!(job_id = %id, "job deleted");
        Some(removed)
    }

    /// Returns `true` when the id was not already recorded.
    pub fn record_application(&mut self, job_id: JobId) -> bool {
        let inserted = self.applied.insert(job_id.clone());
        debug!(job_id = %job_id, inserted, "application recorded");
        inserted
    }

    fn position(&self, id: &JobId) -> Option<usize> {
        self.jobs.iter().position(|job| &job.id == id)
    }

    fn fresh_id(&self) -> JobId {
        loop {
            let candidate = JobId::generate();
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Picks the posting to select after `deleted` is removed: the first of the current view,
/// else the first remaining posting, else nothing.
pub fn successor_selection(
    view: &[JobPosting],
    remaining: &[JobPosting],
    deleted: &JobId,
) -> Option<JobId> {
    view.iter()
        .chain(remaining.iter())
        .find(|job| &job.id != deleted)
        .map(|job| job.id.clone())
}
