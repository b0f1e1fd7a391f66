use super::domain::{ApplicationId, CandidateApplication, JobId, JobPosting};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RecruitmentRepository: Send + Sync {
    fn job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn applications_for_job(&self, id: &JobId)
        -> Result<Vec<CandidateApplication>, RepositoryError>;
    fn application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<CandidateApplication>, RepositoryError>;
    fn update_application(&self, record: CandidateApplication) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
