pub mod memory;

pub use memory::MemoryStore;

use crate::{Application, StructuredResume};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to decode stored résumé payload: {0}")]
    Decode(String),
}

/// Outcome of an apply-to-job request. Expected conditions are values, not
/// errors; only store-level failures surface as `StoreError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    AlreadyApplied,
    NoResumeOnFile,
    JobNotFound,
}

/// Persistence collaborator seam. The ranking core only ever reads through
/// `fetch_applications_for_job`; everything else exists for the upload/apply
/// flow that feeds it.
pub trait ApplicationStore: Send + Sync {
    /// All submitted applications for a job, newest first. Records whose
    /// structured payload is malformed are excluded here, at the boundary,
    /// so scorers never see an invalid shape.
    fn fetch_applications_for_job(&self, job_id: i64) -> Result<Vec<Application>, StoreError>;

    fn apply_to_job(&self, candidate_id: i64, job_id: i64) -> Result<ApplyOutcome, StoreError>;

    /// Replace the candidate's structured résumé wholesale (no field merge).
    fn store_resume(
        &self,
        candidate_id: i64,
        file_name: &str,
        resume: &StructuredResume,
    ) -> Result<(), StoreError>;
}
