pub mod description;
pub mod display;
pub mod domain;
pub mod draft;
pub mod generation;
pub mod registry;
pub mod seed;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;

pub use description::{parse_description, DescriptionSection};
pub use domain::{
    Application, ExperienceLevel, JobDraft, JobId, JobPosting, JobType, ParseLabelError,
    ResumeRef, UserRole,
};
pub use draft::{ApplicationForm, DraftError, JobDraftForm};
pub use generation::{DescriptionGateway, GeminiGateway, GenerationFailure};
pub use registry::{successor_selection, JobRegistry, RegistryError};
pub use seed::{starter_jobs, JobCsvImporter, JobImportError};
pub use session::{
    ApplyAffordance, BoardSession, DraftTarget, DraftToken, GenerationOutcome, GenerationTicket,
    Notice, NoticeBoard, NoticeKind, OpenDraft, SessionError,
};
pub use view::{derive_view, location_options, SortKey, UnknownSortKey, ViewConfig};
