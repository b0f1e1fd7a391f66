use serde::{Deserialize, Serialize};

/// Weighting policy applied by the scoring engine.
///
/// The default reproduces the published rubric: experience 25, skills 30, availability 15,
/// salary 15, application quality 15, and a 60/40 blend between automatic and manual scores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub experience: ExperiencePoints,
    pub skills: SkillPoints,
    pub availability: AvailabilityPoints,
    pub salary: SalaryPoints,
    pub quality: QualityPoints,
    pub blend: BlendWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperiencePoints {
    pub meets_requirement: u8,
    pub one_level_below: u8,
    pub further_below: u8,
    /// Flat award when the job declares no level.
    pub undeclared: u8,
}

impl Default for ExperiencePoints {
    fn default() -> Self {
        Self {
            meets_requirement: 25,
            one_level_below: 15,
            further_below: 5,
            undeclared: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPoints {
    pub full_match: u8,
    /// Flat award when either side lists no skills.
    pub unknown: u8,
}

impl Default for SkillPoints {
    fn default() -> Self {
        Self {
            full_match: 30,
            unknown: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityPoints {
    pub immediate: u8,
    pub within_month: u8,
    pub within_two_months: u8,
    pub later: u8,
    pub unknown: u8,
}

impl Default for AvailabilityPoints {
    fn default() -> Self {
        Self {
            immediate: 15,
            within_month: 12,
            within_two_months: 8,
            later: 3,
            unknown: 12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPoints {
    pub within_range: u8,
    pub within_tolerance: u8,
    pub above_tolerance: u8,
    pub unknown: u8,
    /// Upper tolerance expressed as a percentage of the range maximum.
    pub tolerance_percent: u32,
}

impl Default for SalaryPoints {
    fn default() -> Self {
        Self {
            within_range: 15,
            within_tolerance: 10,
            above_tolerance: 3,
            unknown: 10,
            tolerance_percent: 110,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityPoints {
    pub cover_letter: u8,
    /// Cover letters must be strictly longer than this many characters.
    pub cover_letter_min_chars: usize,
    pub cv_file: u8,
    pub motivation_letter_file: u8,
    pub phone: u8,
    pub cap: u8,
}

impl Default for QualityPoints {
    fn default() -> Self {
        Self {
            cover_letter: 5,
            cover_letter_min_chars: 100,
            cv_file: 5,
            motivation_letter_file: 3,
            phone: 2,
            cap: 15,
        }
    }
}

/// Share of the automatic score in the blended total; the manual score takes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub auto_percent: u8,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self { auto_percent: 60 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring policy can award up to {max} points, above the 100 point scale")]
    ExceedsScale { max: u32 },
    #[error("automatic score share must be between 0 and 100 percent, got {0}")]
    InvalidBlend(u8),
    #[error("salary tolerance must be at least 100 percent of the range maximum, got {0}")]
    InvalidTolerance(u32),
}

impl ScoringConfig {
    /// Highest total the policy can produce.
    pub fn max_attainable(&self) -> u32 {
        let experience = [
            self.experience.meets_requirement,
            self.experience.one_level_below,
            self.experience.further_below,
            self.experience.undeclared,
        ];
        let availability = [
            self.availability.immediate,
            self.availability.within_month,
            self.availability.within_two_months,
            self.availability.later,
            self.availability.unknown,
        ];
        let salary = [
            self.salary.within_range,
            self.salary.within_tolerance,
            self.salary.above_tolerance,
            self.salary.unknown,
        ];
        let quality_sum = u32::from(self.quality.cover_letter)
            + u32::from(self.quality.cv_file)
            + u32::from(self.quality.motivation_letter_file)
            + u32::from(self.quality.phone);

        highest(&experience)
            + highest(&[self.skills.full_match, self.skills.unknown])
            + highest(&availability)
            + highest(&salary)
            + quality_sum.min(u32::from(self.quality.cap))
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.blend.auto_percent > 100 {
            return Err(ScoringConfigError::InvalidBlend(self.blend.auto_percent));
        }
        if self.salary.tolerance_percent < 100 {
            return Err(ScoringConfigError::InvalidTolerance(
                self.salary.tolerance_percent,
            ));
        }
        let max = self.max_attainable();
        if max > 100 {
            return Err(ScoringConfigError::ExceedsScale { max });
        }
        Ok(())
    }
}

fn highest(points: &[u8]) -> u32 {
    points.iter().copied().max().map(u32::from).unwrap_or(0)
}
