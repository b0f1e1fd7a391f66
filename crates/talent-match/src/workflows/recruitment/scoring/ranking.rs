use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::super::domain::{ApplicationId, CandidateApplication, JobPosting};
use super::{ScoreBreakdown, ScoringEngine};

pub const DEFAULT_RANKING_LIMIT: usize = 10;
pub const DEFAULT_FINALIST_COUNT: usize = 3;

/// A candidate's position against a job, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRanking {
    pub application_id: ApplicationId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    pub auto_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_score: Option<u8>,
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
}

/// Identity or range problems that make a ranking request unanswerable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("job id is required to rank candidates")]
    MissingJobId,
    #[error("application at position {position} has no id")]
    MissingApplicationId { position: usize },
    #[error("application id is required")]
    EmptyApplicationId,
    #[error("an assignee is required")]
    MissingAssignee,
    #[error("manual score {score} for application {application_id} exceeds 100")]
    ManualScoreOutOfRange {
        application_id: ApplicationId,
        score: u8,
    },
}

fn validate(
    job: &JobPosting,
    applications: &[CandidateApplication],
) -> Result<(), ValidationError> {
    if job.id.is_blank() {
        return Err(ValidationError::MissingJobId);
    }

    for (position, application) in applications.iter().enumerate() {
        if application.id.is_blank() {
            return Err(ValidationError::MissingApplicationId { position });
        }
        if let Some(score) = application.manual_score.filter(|score| *score > 100) {
            return Err(ValidationError::ManualScoreOutOfRange {
                application_id: application.id.clone(),
                score,
            });
        }
    }

    Ok(())
}

impl ScoringEngine {
    pub fn ranking_for(
        &self,
        job: &JobPosting,
        application: &CandidateApplication,
        now: DateTime<Utc>,
    ) -> CandidateRanking {
        let breakdown = self.compute_auto_score(&job.requirement, &application.profile, now);
        CandidateRanking {
            application_id: application.id.clone(),
            candidate_name: application.candidate_name.clone(),
            auto_score: breakdown.total,
            manual_score: application.manual_score,
            total_score: self.blend(breakdown.total, application.manual_score),
            breakdown,
        }
    }

    /// Every application ranked by blended score, highest first. Ties keep input order.
    pub fn rank_candidates(
        &self,
        job: &JobPosting,
        applications: &[CandidateApplication],
        now: DateTime<Utc>,
    ) -> Result<Vec<CandidateRanking>, ValidationError> {
        validate(job, applications)?;
        Ok(self.rank_validated(job, applications.iter(), now))
    }

    /// The first `limit` entries of [`Self::rank_candidates`].
    pub fn top_candidates(
        &self,
        job: &JobPosting,
        applications: &[CandidateApplication],
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CandidateRanking>, ValidationError> {
        let mut rankings = self.rank_candidates(job, applications, now)?;
        rankings.truncate(limit);
        Ok(rankings)
    }

    /// Top `count` among applications a reviewer has already scored. Unscored applications
    /// are left out entirely.
    pub fn final_top_n(
        &self,
        job: &JobPosting,
        applications: &[CandidateApplication],
        now: DateTime<Utc>,
        count: usize,
    ) -> Result<Vec<CandidateRanking>, ValidationError> {
        validate(job, applications)?;
        let reviewed = applications
            .iter()
            .filter(|application| application.manual_score.is_some());
        let mut rankings = self.rank_validated(job, reviewed, now);
        rankings.truncate(count);
        Ok(rankings)
    }

    fn rank_validated<'a>(
        &self,
        job: &JobPosting,
        applications: impl Iterator<Item = &'a CandidateApplication>,
        now: DateTime<Utc>,
    ) -> Vec<CandidateRanking> {
        let mut rankings: Vec<CandidateRanking> = applications
            .map(|application| self.ranking_for(job, application, now))
            .collect();
        rankings.sort_by(|left, right| right.total_score.cmp(&left.total_score));

        debug!(
            job_id = %job.id,
            ranked = rankings.len(),
            top_score = rankings.first().map(|ranking| ranking.total_score),
            "ranked candidates"
        );
        rankings
    }
}

/// Default-policy ranking of every application for a job.
pub fn rank_candidates(
    job: &JobPosting,
    applications: &[CandidateApplication],
    now: DateTime<Utc>,
) -> Result<Vec<CandidateRanking>, ValidationError> {
    ScoringEngine::default().rank_candidates(job, applications, now)
}

/// Default-policy shortlist of reviewed applications.
pub fn final_top_n(
    job: &JobPosting,
    applications: &[CandidateApplication],
    now: DateTime<Utc>,
    count: usize,
) -> Result<Vec<CandidateRanking>, ValidationError> {
    ScoringEngine::default().final_top_n(job, applications, now, count)
}
