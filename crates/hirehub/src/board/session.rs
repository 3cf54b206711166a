//! Per-user board session.
//!
//! A [`BoardSession`] is created when a user starts browsing and dropped when they leave. It
//! owns the registry plus the role, filter, selection, draft and notice state that the
//! presentation layer renders; nothing here is global.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{Application, JobId, JobPosting, UserRole};
use super::draft::{ApplicationForm, DraftError, JobDraftForm};
use super::generation::GenerationFailure;
use super::registry::{successor_selection, JobRegistry, RegistryError};
use super::view::{derive_view, location_options, ViewConfig};
use crate::config::BoardConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient confirmation or error shown after a mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Auto-dismissing notice queue.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: chrono::Duration,
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            ttl: chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::days(1)),
            next_id: 1,
            notices: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
            created_at: now,
            expires_at: now + self.ttl,
        });
        id
    }

    pub fn all(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn active(&self, now: DateTime<Utc>) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.expires_at > now)
            .collect()
    }

    /// Drops expired notices, returning how many were removed.
    pub fn prune(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.expires_at > now);
        before - self.notices.len()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        before != self.notices.len()
    }
}

/// Identity of an open draft. Reopening or closing the form invalidates older tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftTarget {
    New,
    Edit(JobId),
}

#[derive(Debug, Clone)]
pub struct OpenDraft {
    pub token: DraftToken,
    pub target: DraftTarget,
    pub form: JobDraftForm,
    pub generating: bool,
}

/// A pending description request, tied to the draft it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub token: DraftToken,
    pub title: String,
    pub keywords: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The draft description was replaced.
    Applied,
    /// The gateway failed; the draft is unchanged and an error notice was raised.
    Failed,
    /// The originating draft is no longer open; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAffordance {
    Available,
    AlreadyApplied,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{role} cannot {action}")]
    Forbidden {
        role: UserRole,
        action: &'static str,
    },
    #[error("no job form is open")]
    NoOpenDraft,
    #[error("a job title is required to generate a description")]
    TitleRequired,
    #[error("a description is already being generated")]
    GenerationInProgress,
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub const POSTED_MESSAGE: &str = "Job posted successfully!";
pub const UPDATED_MESSAGE: &str = "Job updated successfully!";
pub const DELETED_MESSAGE: &str = "Job deleted successfully!";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate description from AI.";

pub struct BoardSession {
    registry: JobRegistry,
    role: UserRole,
    view: ViewConfig,
    selected: Option<JobId>,
    draft: Option<OpenDraft>,
    next_draft_token: u64,
    notices: NoticeBoard,
}

impl BoardSession {
    /// Starts a session as a job seeker with the first posting selected.
    pub fn new(registry: JobRegistry, config: &BoardConfig) -> Self {
        let selected = registry.jobs().first().map(|job| job.id.clone());
        Self {
            registry,
            role: UserRole::default(),
            view: ViewConfig::default(),
            selected,
            draft: None,
            next_draft_token: 1,
            notices: NoticeBoard::new(config.notice_ttl),
        }
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn set_role(&mut self, role: UserRole) {
        if self.role != role {
            info!(from = %self.role, to = %role, "role switched");
        }
        self.role = role;
    }

    pub fn view_config(&self) -> &ViewConfig {
        &self.view
    }

    pub fn view_config_mut(&mut self) -> &mut ViewConfig {
        &mut self.view
    }

    pub fn displayed_jobs(&self) -> Vec<JobPosting> {
        derive_view(self.registry.jobs(), &self.view)
    }

    pub fn location_options(&self) -> Vec<String> {
        location_options(self.registry.jobs())
    }

    /// Selects a posting; unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &JobId) -> bool {
        if self.registry.contains(id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn selected_id(&self) -> Option<&JobId> {
        self.selected.as_ref()
    }

    pub fn selected_job(&self) -> Option<&JobPosting> {
        self.selected.as_ref().and_then(|id| self.registry.get(id))
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    pub fn draft(&self) -> Option<&OpenDraft> {
        self.draft.as_ref()
    }

    pub fn draft_form_mut(&mut self) -> Option<&mut JobDraftForm> {
        self.draft.as_mut().map(|draft| &mut draft.form)
    }

    pub fn open_new_draft(&mut self) -> Result<DraftToken, SessionError> {
        self.require_recruiter("post jobs")?;
        Ok(self.open_draft(DraftTarget::New, JobDraftForm::default()))
    }

    pub fn open_edit_draft(&mut self, id: &JobId) -> Result<DraftToken, SessionError> {
        self.require_recruiter("edit jobs")?;
        let posting = self
            .registry
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        let form = JobDraftForm::from_posting(posting);
        Ok(self.open_draft(DraftTarget::Edit(id.clone()), form))
    }

    pub fn close_draft(&mut self) {
        self.draft = None;
    }

    /// Validates the open form and creates or updates the posting it targets.
    pub fn submit_draft(&mut self) -> Result<JobPosting, SessionError> {
        self.require_recruiter("save jobs")?;
        let draft = self.draft.as_ref().ok_or(SessionError::NoOpenDraft)?;
        let job_draft = draft.form.validate()?;
        let target = draft.target.clone();

        let saved = match target {
            DraftTarget::New => {
                let posting = self.registry.create(job_draft);
                self.notify(NoticeKind::Success, POSTED_MESSAGE);
                posting
            }
            DraftTarget::Edit(id) => match self.registry.update(&id, job_draft) {
                Ok(posting) => {
                    self.notify(NoticeKind::Success, UPDATED_MESSAGE);
                    posting
                }
                Err(err) => {
                    warn!(job_id = %id, "edited job no longer exists");
                    self.draft = None;
                    self.notify(NoticeKind::Error, "Job no longer exists.");
                    return Err(err.into());
                }
            },
        };

        self.draft = None;
        info!(job_id = %saved.id, title = %saved.title, "job saved");
        Ok(saved)
    }

    /// Issues a description request for the open draft.
    pub fn request_generation(
        &mut self,
        keywords: &str,
    ) -> Result<GenerationTicket, SessionError> {
        let draft = self.draft.as_mut().ok_or(SessionError::NoOpenDraft)?;
        let title = draft.form.title.trim().to_string();
        if title.is_empty() {
            return Err(SessionError::TitleRequired);
        }
        if draft.generating {
            return Err(SessionError::GenerationInProgress);
        }

        draft.generating = true;
        Ok(GenerationTicket {
            token: draft.token,
            title,
            keywords: keywords.trim().to_string(),
        })
    }

    /// Applies a gateway result if the draft it was requested for is still open.
    pub fn complete_generation(
        &mut self,
        ticket: &GenerationTicket,
        result: Result<String, GenerationFailure>,
    ) -> GenerationOutcome {
        let Some(draft) = self
            .draft
            .as_mut()
            .filter(|draft| draft.token == ticket.token)
        else {
            info!(title = %ticket.title, "discarding stale description");
            return GenerationOutcome::Stale;
        };

        draft.generating = false;
        match result {
            Ok(description) => {
                draft.form.description = description;
                GenerationOutcome::Applied
            }
            Err(GenerationFailure) => {
                self.notify(NoticeKind::Error, GENERATION_FAILED_MESSAGE);
                GenerationOutcome::Failed
            }
        }
    }

    /// Deletes a posting and repairs the selection. Unknown ids are a silent no-op.
    pub fn delete_job(&mut self, id: &JobId) -> Result<Option<JobPosting>, SessionError> {
        self.require_recruiter("delete jobs")?;
        let Some(removed) = self.registry.delete(id) else {
            return Ok(None);
        };

        if self.selected.as_ref() == Some(id) {
            let view = self.displayed_jobs();
            self.selected = successor_selection(&view, self.registry.jobs(), id);
        }

        self.notify(NoticeKind::Success, DELETED_MESSAGE);
        info!(job_id = %id, "job deleted");
        Ok(Some(removed))
    }

    /// Submits an application. The job id is recorded without checking that it still exists.
    pub fn apply(
        &mut self,
        job_id: &JobId,
        form: &ApplicationForm,
    ) -> Result<Application, SessionError> {
        let application = form.validate(job_id.clone())?;
        self.registry.record_application(job_id.clone());

        let subject = self
            .registry
            .get(job_id)
            .map(|job| job.title.clone())
            .unwrap_or_else(|| job_id.to_string());
        self.notify(
            NoticeKind::Success,
            format!("Successfully applied for {subject}!"),
        );
        info!(job_id = %job_id, "application submitted");
        Ok(application)
    }

    pub fn apply_affordance(&self, id: &JobId) -> ApplyAffordance {
        if self.registry.has_applied(id) {
            ApplyAffordance::AlreadyApplied
        } else {
            ApplyAffordance::Available
        }
    }

    fn open_draft(&mut self, target: DraftTarget, form: JobDraftForm) -> DraftToken {
        let token = DraftToken(self.next_draft_token);
        self.next_draft_token += 1;
        self.draft = Some(OpenDraft {
            token,
            target,
            form,
            generating: false,
        });
        token
    }

    fn require_recruiter(&self, action: &'static str) -> Result<(), SessionError> {
        match self.role {
            UserRole::Recruiter => Ok(()),
            role => Err(SessionError::Forbidden { role, action }),
        }
    }

    fn notify(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notices.push(kind, message, Utc::now());
    }
}
