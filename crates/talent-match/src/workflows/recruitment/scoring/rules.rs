use chrono::{DateTime, Utc};

use super::super::domain::{ApplicationProfile, ExperienceLevel, JobRequirement};
use super::config::{
    AvailabilityPoints, ExperiencePoints, QualityPoints, SalaryPoints, SkillPoints,
};
use super::salary::{parse_expectation, parse_range};

const NEUTRAL_RANK: u8 = 2;
const MILLIS_PER_DAY: i64 = 86_400_000;

fn declared(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

pub(crate) fn experience_match(
    points: &ExperiencePoints,
    job: &JobRequirement,
    profile: &ApplicationProfile,
) -> u8 {
    let Some(job_level) = declared(&job.experience_level) else {
        return points.undeclared;
    };

    let rank = |raw: Option<&str>| {
        raw.and_then(ExperienceLevel::parse)
            .map(ExperienceLevel::rank)
            .unwrap_or(NEUTRAL_RANK)
    };
    let job_rank = rank(Some(job_level));
    let candidate_rank = rank(declared(&profile.experience_level));

    if candidate_rank >= job_rank {
        points.meets_requirement
    } else if candidate_rank + 1 == job_rank {
        points.one_level_below
    } else {
        points.further_below
    }
}

fn normalized_skills(skills: &[String]) -> Vec<String> {
    skills
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Job skills covered by the candidate, matching substrings in either direction.
pub(crate) fn matched_skill_count(job_skills: &[String], candidate_skills: &[String]) -> usize {
    let candidate = normalized_skills(candidate_skills);
    normalized_skills(job_skills)
        .iter()
        .filter(|required| {
            candidate.iter().any(|offered| {
                offered.contains(required.as_str()) || required.contains(offered.as_str())
            })
        })
        .count()
}

pub(crate) fn skills_match(
    points: &SkillPoints,
    job: &JobRequirement,
    profile: &ApplicationProfile,
) -> u8 {
    let required = normalized_skills(&job.skills).len();
    if required == 0 || normalized_skills(&profile.skills).is_empty() {
        return points.unknown;
    }

    let matched = matched_skill_count(&job.skills, &profile.skills);
    let full = u32::from(points.full_match);
    let required = required as u32;
    // round-half-up of full * matched / required
    let score = (2 * full * matched as u32 + required) / (2 * required);
    score as u8
}

/// Whole days from `now` until `at`, rounded up.
pub(crate) fn days_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = at.signed_duration_since(now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

pub(crate) fn availability_score(
    points: &AvailabilityPoints,
    profile: &ApplicationProfile,
    now: DateTime<Utc>,
) -> u8 {
    let Some(available_at) = profile.availability_date else {
        return points.unknown;
    };

    match days_until(available_at, now) {
        days if days <= 0 => points.immediate,
        1..=30 => points.within_month,
        31..=60 => points.within_two_months,
        _ => points.later,
    }
}

/// Expectations below the range minimum fall into the tolerance band rather than being
/// rewarded or penalised separately.
pub(crate) fn salary_fit(
    points: &SalaryPoints,
    job: &JobRequirement,
    profile: &ApplicationProfile,
) -> u8 {
    let expectation = declared(&profile.salary_expectation).and_then(parse_expectation);
    let range = declared(&job.salary).and_then(parse_range);
    let (Some(expectation), Some(range)) = (expectation, range) else {
        return points.unknown;
    };

    let expectation = u64::from(expectation);
    if expectation >= u64::from(range.min) && expectation <= u64::from(range.max) {
        points.within_range
    } else if expectation * 100 <= u64::from(range.max) * u64::from(points.tolerance_percent) {
        points.within_tolerance
    } else {
        points.above_tolerance
    }
}

pub(crate) fn application_quality(points: &QualityPoints, profile: &ApplicationProfile) -> u8 {
    let mut score: u32 = 0;

    let cover_letter_chars = profile
        .cover_letter
        .as_deref()
        .map(|letter| letter.chars().count())
        .unwrap_or(0);
    if cover_letter_chars > points.cover_letter_min_chars {
        score += u32::from(points.cover_letter);
    }
    if declared(&profile.cv_path).is_some() {
        score += u32::from(points.cv_file);
    }
    if declared(&profile.motivation_letter_path).is_some() {
        score += u32::from(points.motivation_letter_file);
    }
    if declared(&profile.phone).is_some() {
        score += u32::from(points.phone);
    }

    score.min(u32::from(points.cap)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::recruitment::domain::start_of_day;
    use chrono::{NaiveDate, TimeZone};

    fn job() -> JobRequirement {
        JobRequirement {
            experience_level: Some("Intermédiaire".to_string()),
            skills: vec!["React".to_string(), "TypeScript".to_string()],
            salary: Some("40k - 55k €".to_string()),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0)
            .single()
            .expect("valid instant")
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn experience_awards_full_points_when_requirement_met() {
        let points = ExperiencePoints::default();
        for (job_level, candidate_level) in [
            ("Débutant", "Débutant"),
            ("Débutant", "Senior"),
            ("Intermédiaire", "Senior"),
            ("Senior", "Senior"),
        ] {
            let job = JobRequirement {
                experience_level: Some(job_level.to_string()),
                ..JobRequirement::default()
            };
            let profile = ApplicationProfile {
                experience_level: Some(candidate_level.to_string()),
                ..ApplicationProfile::default()
            };
            assert_eq!(experience_match(&points, &job, &profile), 25);
        }
    }

    #[test]
    fn experience_steps_down_below_requirement() {
        let points = ExperiencePoints::default();
        let job = JobRequirement {
            experience_level: Some("Senior".to_string()),
            ..JobRequirement::default()
        };
        let mut profile = ApplicationProfile {
            experience_level: Some("Intermédiaire".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(experience_match(&points, &job, &profile), 15);

        profile.experience_level = Some("Débutant".to_string());
        assert_eq!(experience_match(&points, &job, &profile), 5);

        profile.experience_level = None;
        assert_eq!(experience_match(&points, &job, &profile), 15);
    }

    #[test]
    fn experience_is_flat_without_job_level() {
        let points = ExperiencePoints::default();
        let profile = ApplicationProfile {
            experience_level: Some("Senior".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(
            experience_match(&points, &JobRequirement::default(), &profile),
            10
        );
    }

    #[test]
    fn unknown_job_level_counts_as_intermediate() {
        let points = ExperiencePoints::default();
        let job = JobRequirement {
            experience_level: Some("Expert".to_string()),
            ..JobRequirement::default()
        };
        let profile = ApplicationProfile {
            experience_level: Some("Débutant".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(experience_match(&points, &job, &profile), 15);
    }

    #[test]
    fn skills_match_substrings_both_ways() {
        assert_eq!(
            matched_skill_count(&strings(&["React", "Node"]), &strings(&["react.js", "no"])),
            2
        );
        assert_eq!(
            matched_skill_count(&strings(&["PostgreSQL"]), &strings(&["SQL"])),
            1
        );
        assert_eq!(
            matched_skill_count(&strings(&["Go"]), &strings(&["Python"])),
            0
        );
    }

    #[test]
    fn skills_match_ignores_order() {
        let job_skills = strings(&["Rust", "Docker", "Kubernetes"]);
        let candidate = strings(&["kubernetes", "rust"]);
        let mut reversed = candidate.clone();
        reversed.reverse();
        let mut job_reversed = job_skills.clone();
        job_reversed.reverse();

        let expected = matched_skill_count(&job_skills, &candidate);
        assert_eq!(matched_skill_count(&job_skills, &reversed), expected);
        assert_eq!(matched_skill_count(&job_reversed, &candidate), expected);
    }

    #[test]
    fn skills_score_scales_and_rounds() {
        let points = SkillPoints::default();
        let job = JobRequirement {
            skills: strings(&["Rust", "Docker", "Kubernetes"]),
            ..JobRequirement::default()
        };
        let mut profile = ApplicationProfile {
            skills: strings(&["Rust", "Docker", "Kubernetes"]),
            ..ApplicationProfile::default()
        };
        assert_eq!(skills_match(&points, &job, &profile), 30);

        profile.skills = strings(&["Rust"]);
        assert_eq!(skills_match(&points, &job, &profile), 10);

        profile.skills = strings(&["Rust", "Docker"]);
        assert_eq!(skills_match(&points, &job, &profile), 20);

        let job = JobRequirement {
            skills: strings(&["A1", "B2", "C3", "D4", "E5", "F6", "G7", "H8"]),
            ..JobRequirement::default()
        };
        profile.skills = strings(&["a1"]);
        // 30 * 1 / 8 = 3.75
        assert_eq!(skills_match(&points, &job, &profile), 4);
    }

    #[test]
    fn skills_fall_back_when_either_side_is_empty() {
        let points = SkillPoints::default();
        let profile = ApplicationProfile {
            skills: strings(&["Rust"]),
            ..ApplicationProfile::default()
        };
        assert_eq!(
            skills_match(&points, &JobRequirement::default(), &profile),
            15
        );
        assert_eq!(
            skills_match(&points, &job(), &ApplicationProfile::default()),
            15
        );
        let blank = ApplicationProfile {
            skills: strings(&["  "]),
            ..ApplicationProfile::default()
        };
        assert_eq!(skills_match(&points, &job(), &blank), 15);
    }

    fn day(year: i32, month: u32, date: u32) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(year, month, date).map(start_of_day)
    }

    fn at(year: i32, month: u32, date: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, date, hour, minute, 0)
            .single()
            .expect("valid instant")
    }

    #[test]
    fn days_until_rounds_up_partial_days() {
        let now = now();
        let days = |value: Option<DateTime<Utc>>| days_until(value.expect("date"), now);
        assert_eq!(days(day(2026, 10, 19)), 0);
        assert_eq!(days(day(2026, 10, 20)), 1);
        assert_eq!(days(day(2026, 10, 1)), -18);
        assert_eq!(days_until(at(2026, 10, 19, 9, 30), now), 0);
        assert_eq!(days_until(at(2026, 10, 19, 9, 31), now), 1);
        assert_eq!(days_until(at(2026, 11, 18, 23, 0), now), 31);

        let midnight = at(2026, 10, 19, 0, 0);
        assert_eq!(days_until(day(2026, 10, 21).expect("date"), midnight), 2);
    }

    #[test]
    fn availability_bands() {
        let points = AvailabilityPoints::default();
        let cases = [
            (None, 12),
            (day(2026, 9, 1), 15),
            (day(2026, 10, 19), 15),
            (day(2026, 10, 20), 12),
            (day(2026, 11, 18), 12),
            (day(2026, 11, 19), 8),
            (day(2026, 12, 18), 8),
            (day(2026, 12, 19), 3),
        ];
        for (available_at, expected) in cases {
            let profile = ApplicationProfile {
                availability_date: available_at,
                ..ApplicationProfile::default()
            };
            assert_eq!(
                availability_score(&points, &profile, now()),
                expected,
                "availability {available_at:?}"
            );
        }
    }

    #[test]
    fn availability_counts_the_time_of_day() {
        let points = AvailabilityPoints::default();
        let profile: ApplicationProfile = serde_json::from_value(serde_json::json!({
            "availabilityDate": "2026-11-18T23:00:00Z"
        }))
        .expect("profile deserializes");

        assert_eq!(availability_score(&points, &profile, now()), 8);

        let same_day_morning = ApplicationProfile {
            availability_date: Some(at(2026, 11, 18, 8, 0)),
            ..ApplicationProfile::default()
        };
        assert_eq!(availability_score(&points, &same_day_morning, now()), 12);
    }

    #[test]
    fn unreadable_availability_scores_neutral() {
        let mut job = job();
        job.experience_level = Some("Senior".to_string());
        let readable: ApplicationProfile = serde_json::from_value(serde_json::json!({
            "experienceLevel": "Senior",
            "skills": ["react"],
            "salaryExpectation": "50k",
            "phone": "0600000000"
        }))
        .expect("profile deserializes");
        let unreadable: ApplicationProfile = serde_json::from_value(serde_json::json!({
            "experienceLevel": "Senior",
            "skills": ["react"],
            "salaryExpectation": "50k",
            "phone": "0600000000",
            "availabilityDate": "dès que possible"
        }))
        .expect("profile deserializes");

        assert!(unreadable.availability_date.is_none());
        assert_eq!(
            availability_score(&AvailabilityPoints::default(), &unreadable, now()),
            12
        );
        assert_eq!(experience_match(&ExperiencePoints::default(), &job, &unreadable), 25);
        assert_eq!(skills_match(&SkillPoints::default(), &job, &unreadable), 15);
        assert_eq!(salary_fit(&SalaryPoints::default(), &job, &unreadable), 15);
        assert_eq!(application_quality(&QualityPoints::default(), &unreadable), 2);
        assert_eq!(unreadable, readable);
    }

    #[test]
    fn salary_fit_scenarios() {
        let points = SalaryPoints::default();
        let job = job();
        let mut profile = ApplicationProfile {
            salary_expectation: Some("45k".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(salary_fit(&points, &job, &profile), 15);

        profile.salary_expectation = Some("60k".to_string());
        assert_eq!(salary_fit(&points, &job, &profile), 10);

        profile.salary_expectation = Some("70k".to_string());
        assert_eq!(salary_fit(&points, &job, &profile), 3);

        profile.salary_expectation = None;
        assert_eq!(salary_fit(&points, &job, &profile), 10);

        profile.salary_expectation = Some("à discuter".to_string());
        assert_eq!(salary_fit(&points, &job, &profile), 10);
    }

    #[test]
    fn salary_tolerance_boundary_is_inclusive() {
        let points = SalaryPoints::default();
        let job = JobRequirement {
            salary: Some("40k - 50k".to_string()),
            ..JobRequirement::default()
        };
        let at_edge = ApplicationProfile {
            salary_expectation: Some("55k".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(salary_fit(&points, &job, &at_edge), 10);

        let past_edge = ApplicationProfile {
            salary_expectation: Some("56k".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(salary_fit(&points, &job, &past_edge), 3);
    }

    // Asking far below the range is not penalised: it lands in the tolerance band.
    #[test]
    fn salary_below_minimum_is_not_penalised() {
        let points = SalaryPoints::default();
        let profile = ApplicationProfile {
            salary_expectation: Some("20k".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(salary_fit(&points, &job(), &profile), 10);
    }

    #[test]
    fn quality_adds_up_present_materials() {
        let points = QualityPoints::default();
        let profile = ApplicationProfile {
            cover_letter: Some("x".repeat(150)),
            cv_path: Some("uploads/cv/jane.pdf".to_string()),
            motivation_letter_path: None,
            phone: Some("+33 6 12 34 56 78".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(application_quality(&points, &profile), 12);
    }

    #[test]
    fn quality_requires_cover_letter_over_threshold() {
        let points = QualityPoints::default();
        let profile = ApplicationProfile {
            cover_letter: Some("é".repeat(100)),
            ..ApplicationProfile::default()
        };
        assert_eq!(application_quality(&points, &profile), 0);

        let profile = ApplicationProfile {
            cover_letter: Some("é".repeat(101)),
            ..ApplicationProfile::default()
        };
        assert_eq!(application_quality(&points, &profile), 5);
    }

    #[test]
    fn quality_is_capped() {
        let points = QualityPoints {
            phone: 10,
            ..QualityPoints::default()
        };
        let profile = ApplicationProfile {
            cover_letter: Some("y".repeat(200)),
            cv_path: Some("cv.pdf".to_string()),
            motivation_letter_path: Some("lm.pdf".to_string()),
            phone: Some("0612345678".to_string()),
            ..ApplicationProfile::default()
        };
        assert_eq!(application_quality(&points, &profile), 15);
    }
}
