use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{ApplicationId, ApplicationStatus, CandidateApplication, JobId, JobPosting};
use super::repository::{RecruitmentRepository, RepositoryError};
use super::scoring::{CandidateRanking, ScoringEngine, ValidationError};
use crate::access::{AccessPolicy, AccessSummary, Role};
use crate::config::RankingSettings;

/// Permissions required to read rankings for a job.
pub const VIEW_RANKINGS: &[&str] = &["view_applications"];
/// Permissions required to record or refresh scores.
pub const SCORE_APPLICATIONS: &[&str] = &["view_applications", "score_candidates"];
/// Roles admitted to take ownership of an application.
pub const ASSIGNING_ROLES: &[Role] = &[Role::Recruiter, Role::Manager, Role::Hr, Role::Admin];

/// Service composing the repository, the scoring engine, and the access policy.
pub struct RecruitmentService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
    access: AccessPolicy,
    settings: RankingSettings,
    clock: fn() -> DateTime<Utc>,
}

impl<R> RecruitmentService<R>
where
    R: RecruitmentRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ScoringEngine, settings: RankingSettings) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
            access: AccessPolicy::standard(),
            settings,
            clock: Utc::now,
        }
    }

    /// Replace the time source used for availability scoring.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_access_policy(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub fn access_policy(&self) -> &AccessPolicy {
        &self.access
    }

    pub fn settings(&self) -> RankingSettings {
        self.settings
    }

    fn require(
        &self,
        actor: Role,
        required: &'static [&'static str],
    ) -> Result<(), RecruitmentServiceError> {
        if self.access.has_permission(actor, required) {
            return Ok(());
        }
        warn!(%actor, required = ?required, "permission check failed");
        Err(RecruitmentServiceError::Forbidden {
            role: actor,
            required: required.join(", "),
        })
    }

    fn load_job(
        &self,
        job_id: &JobId,
    ) -> Result<(JobPosting, Vec<CandidateApplication>), RecruitmentServiceError> {
        if job_id.is_blank() {
            return Err(ValidationError::MissingJobId.into());
        }
        let job = self
            .repository
            .job(job_id)?
            .ok_or(RepositoryError::NotFound)?;
        let applications = self.repository.applications_for_job(job_id)?;
        Ok((job, applications))
    }

    fn load_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<CandidateApplication, RecruitmentServiceError> {
        if application_id.is_blank() {
            return Err(ValidationError::EmptyApplicationId.into());
        }
        let record = self
            .repository
            .application(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Ranked candidates for a job, bounded by `limit` or the configured default.
    pub fn rankings(
        &self,
        actor: Role,
        job_id: &JobId,
        limit: Option<usize>,
    ) -> Result<Vec<CandidateRanking>, RecruitmentServiceError> {
        self.require(actor, VIEW_RANKINGS)?;
        let (job, applications) = self.load_job(job_id)?;
        let limit = limit.unwrap_or(self.settings.ranking_limit);
        let rankings = self
            .engine
            .top_candidates(&job, &applications, (self.clock)(), limit)?;
        Ok(rankings)
    }

    /// Shortlist drawn only from applications a reviewer has scored.
    pub fn finalists(
        &self,
        actor: Role,
        job_id: &JobId,
        count: Option<usize>,
    ) -> Result<Vec<CandidateRanking>, RecruitmentServiceError> {
        self.require(actor, VIEW_RANKINGS)?;
        let (job, applications) = self.load_job(job_id)?;
        let count = count.unwrap_or(self.settings.finalist_count);
        let finalists = self
            .engine
            .final_top_n(&job, &applications, (self.clock)(), count)?;
        Ok(finalists)
    }

    /// Recompute and cache the automatic score on every application for a job.
    /// Returns the number of records whose cached value changed.
    pub fn refresh_auto_scores(
        &self,
        actor: Role,
        job_id: &JobId,
    ) -> Result<usize, RecruitmentServiceError> {
        self.require(actor, SCORE_APPLICATIONS)?;
        let (job, applications) = self.load_job(job_id)?;
        let rankings = self
            .engine
            .rank_candidates(&job, &applications, (self.clock)())?;

        let mut updated = 0;
        for mut record in applications {
            let Some(ranking) = rankings
                .iter()
                .find(|ranking| ranking.application_id == record.id)
            else {
                continue;
            };
            if record.auto_score == Some(ranking.auto_score) {
                continue;
            }
            record.auto_score = Some(ranking.auto_score);
            self.repository.update_application(record)?;
            updated += 1;
        }

        info!(job_id = %job.id, updated, "refreshed cached auto scores");
        Ok(updated)
    }

    /// Store a reviewer's score and mark the application as scored.
    pub fn record_manual_score(
        &self,
        actor: Role,
        application_id: &ApplicationId,
        score: u8,
    ) -> Result<CandidateApplication, RecruitmentServiceError> {
        self.require(actor, SCORE_APPLICATIONS)?;
        if score > 100 {
            return Err(ValidationError::ManualScoreOutOfRange {
                application_id: application_id.clone(),
                score,
            }
            .into());
        }

        let mut record = self.load_application(application_id)?;
        record.manual_score = Some(score);
        record.status = ApplicationStatus::Scored;
        self.repository.update_application(record.clone())?;

        info!(application_id = %record.id, score, %actor, "recorded manual score");
        Ok(record)
    }

    /// Hand an application to a recruiter and mark it as assigned.
    pub fn assign(
        &self,
        actor: Role,
        application_id: &ApplicationId,
        assignee: &str,
    ) -> Result<CandidateApplication, RecruitmentServiceError> {
        if !self.access.has_any_role(actor, ASSIGNING_ROLES) {
            warn!(%actor, "role may not assign applications");
            return Err(RecruitmentServiceError::Forbidden {
                role: actor,
                required: "recruiter, manager, hr or admin role".to_string(),
            });
        }
        let assignee = assignee.trim();
        if assignee.is_empty() {
            return Err(ValidationError::MissingAssignee.into());
        }

        let mut record = self.load_application(application_id)?;
        record.assigned_to = Some(assignee.to_string());
        record.status = ApplicationStatus::Assigned;
        self.repository.update_application(record.clone())?;

        info!(application_id = %record.id, assignee, %actor, "assigned application");
        Ok(record)
    }

    pub fn access_summary(&self, role: Role) -> AccessSummary {
        self.access.summary(role)
    }

    pub fn can_manage(&self, actor: Role, target: Role) -> bool {
        self.access.can_manage(actor, target)
    }
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("role '{role}' lacks required access: {required}")]
    Forbidden { role: Role, required: String },
}
