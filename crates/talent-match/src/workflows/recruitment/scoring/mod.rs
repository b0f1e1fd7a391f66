mod config;
mod ranking;
mod rules;
mod salary;

pub use config::{
    AvailabilityPoints, BlendWeights, ExperiencePoints, QualityPoints, SalaryPoints,
    ScoringConfig, ScoringConfigError, SkillPoints,
};
pub use ranking::{
    final_top_n, rank_candidates, CandidateRanking, ValidationError, DEFAULT_FINALIST_COUNT,
    DEFAULT_RANKING_LIMIT,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicationProfile, JobRequirement};

/// Stateless scorer that applies a weighting policy to a job and an application.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Five-factor match score. Unparsable or missing inputs earn the factor's neutral
    /// award instead of failing.
    pub fn compute_auto_score(
        &self,
        job: &JobRequirement,
        profile: &ApplicationProfile,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        ScoreBreakdown::from_factors(
            rules::experience_match(&self.config.experience, job, profile),
            rules::skills_match(&self.config.skills, job, profile),
            rules::availability_score(&self.config.availability, profile, now),
            rules::salary_fit(&self.config.salary, job, profile),
            rules::application_quality(&self.config.quality, profile),
        )
    }

    /// Blends the automatic score with a reviewer's score, rounding half up.
    pub fn blend(&self, auto_score: u8, manual_score: Option<u8>) -> u8 {
        let Some(manual) = manual_score else {
            return auto_score;
        };
        let auto_share = u32::from(self.config.blend.auto_percent);
        let weighted =
            u32::from(auto_score) * auto_share + u32::from(manual) * (100 - auto_share);
        ((weighted + 50) / 100) as u8
    }
}

/// Scores with the default weighting policy.
pub fn compute_auto_score(
    job: &JobRequirement,
    profile: &ApplicationProfile,
    now: DateTime<Utc>,
) -> ScoreBreakdown {
    ScoringEngine::default().compute_auto_score(job, profile, now)
}

/// Per-factor contributions and their total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub experience_match: u8,
    pub skills_match: u8,
    pub availability_score: u8,
    pub salary_fit: u8,
    pub application_quality: u8,
    pub total: u8,
}

impl ScoreBreakdown {
    pub(crate) fn from_factors(
        experience_match: u8,
        skills_match: u8,
        availability_score: u8,
        salary_fit: u8,
        application_quality: u8,
    ) -> Self {
        let sum = [
            experience_match,
            skills_match,
            availability_score,
            salary_fit,
            application_quality,
        ]
        .iter()
        .map(|factor| u32::from(*factor))
        .sum::<u32>();

        Self {
            experience_match,
            skills_match,
            availability_score,
            salary_fit,
            application_quality,
            total: sum.min(100) as u8,
        }
    }

    pub fn factor_sum(&self) -> u32 {
        u32::from(self.experience_match)
            + u32::from(self.skills_match)
            + u32::from(self.availability_score)
            + u32::from(self.salary_fit)
            + u32::from(self.application_quality)
    }
}
