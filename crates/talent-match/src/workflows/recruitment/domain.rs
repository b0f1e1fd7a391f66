use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

/// Identifier wrapper for candidate applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl JobId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl ApplicationId {
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seniority scale shared by job postings and candidate profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "Débutant")]
    Debutant,
    #[serde(rename = "Intermédiaire")]
    Intermediaire,
    #[serde(rename = "Senior")]
    Senior,
}

impl ExperienceLevel {
    pub const fn rank(self) -> u8 {
        match self {
            Self::Debutant => 1,
            Self::Intermediaire => 2,
            Self::Senior => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Debutant => "Débutant",
            Self::Intermediaire => "Intermédiaire",
            Self::Senior => "Senior",
        }
    }

    /// Lenient parse tolerating case and missing accents.
    pub fn parse(raw: &str) -> Option<Self> {
        let folded: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .map(|ch| match ch {
                'é' | 'è' | 'ê' => 'e',
                other => other,
            })
            .collect();

        match folded.as_str() {
            "debutant" => Some(Self::Debutant),
            "intermediaire" => Some(Self::Intermediaire),
            "senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

/// Job attributes consumed by the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequirement {
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub skills: Vec<String>,
    /// Range in thousands, e.g. `"40k - 55k €"`.
    #[serde(default)]
    pub salary: Option<String>,
}

/// Job posting as supplied by the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(default)]
    pub id: JobId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub requirement: JobRequirement,
}

/// Candidate attributes consumed by the scoring engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfile {
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub skills: Vec<String>,
    /// A bare date means midnight UTC. Unreadable values are dropped, not rejected.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub availability_date: Option<DateTime<Utc>>,
    /// Expectation in thousands, e.g. `"45k"`.
    #[serde(default)]
    pub salary_expectation: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub cv_path: Option<String>,
    #[serde(default)]
    pub motivation_letter_path: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Lifecycle of an application record. Owned by the storage layer; the engines never move it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Assigned,
    Scored,
    Interviewing,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Assigned => "assigned",
            ApplicationStatus::Scored => "scored",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Application record as supplied by the storage collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    #[serde(default)]
    pub id: ApplicationId,
    #[serde(default)]
    pub job_id: JobId,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub manual_score: Option<u8>,
    /// Cached engine output. Always recomputable from the job and the profile.
    #[serde(default)]
    pub auto_score: Option<u8>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(flatten)]
    pub profile: ApplicationProfile,
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Reads an RFC 3339 timestamp, a zone-less `YYYY-MM-DDTHH:MM:SS` (taken as UTC), or a
/// bare `YYYY-MM-DD`.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_instant))
}
