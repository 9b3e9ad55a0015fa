//! Skill and activity analysis
//!
//! Derives skills, language ranking, star totals, last activity and the
//! OSS score from a profile and its repositories. Pure functions; malformed
//! upstream data is ignored rather than reported.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::app::scoring_config::{
    OSS_FOLLOWER_WEIGHT_TENTHS, OSS_PUBLIC_REPO_WEIGHT_TENTHS, OSS_STAR_WEIGHT_TENTHS,
    SKILL_KEYWORDS, TOP_LANGUAGES_LIMIT,
};
use crate::domain::ports::{RawProfile, RawRepository};

/// Activity metrics for one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityAnalysis {
    pub total_stars: u64,
    pub top_languages: Vec<String>,
    pub recent_activity: Option<DateTime<Utc>>,
    pub oss_score: u64,
}

/// Everything the normalizer copies into a candidate record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAnalysis {
    pub skills: BTreeSet<String>,
    pub activity: ActivityAnalysis,
}

/// Run skill extraction and activity analysis together
pub fn analyze(profile: &RawProfile, repos: &[RawRepository]) -> CandidateAnalysis {
    CandidateAnalysis {
        skills: extract_skills(profile, repos),
        activity: analyze_activity(profile, repos),
    }
}

/// Union of repository languages, repository topics, and vocabulary keywords
/// found in the bio or any repository description.
pub fn extract_skills(profile: &RawProfile, repos: &[RawRepository]) -> BTreeSet<String> {
    let mut skills = BTreeSet::new();

    for repo in repos {
        if let Some(language) = repo.language.as_deref().filter(|l| !l.trim().is_empty()) {
            skills.insert(language.to_string());
        }
        skills.extend(repo.topics.iter().filter(|t| !t.trim().is_empty()).cloned());
    }

    let texts = profile
        .bio
        .iter()
        .chain(repos.iter().filter_map(|r| r.description.as_ref()))
        .map(|text| text.to_lowercase());

    for text in texts {
        for keyword in SKILL_KEYWORDS {
            if text.contains(&keyword.to_lowercase()) {
                skills.insert(keyword.to_string());
            }
        }
    }

    skills
}

pub fn analyze_activity(profile: &RawProfile, repos: &[RawRepository]) -> ActivityAnalysis {
    let total_stars: u64 = repos.iter().map(|r| r.stargazers_count).sum();

    ActivityAnalysis {
        total_stars,
        top_languages: top_languages(repos),
        recent_activity: repos
            .iter()
            .filter_map(|r| r.updated_at.as_deref())
            .filter_map(parse_timestamp)
            .max(),
        oss_score: oss_score(total_stars, profile.followers, profile.public_repos),
    }
}

/// floor(0.5 * stars + 0.3 * followers + 0.2 * public_repos)
pub fn oss_score(total_stars: u64, followers: u64, public_repos: u64) -> u64 {
    let tenths = total_stars
        .saturating_mul(OSS_STAR_WEIGHT_TENTHS)
        .saturating_add(followers.saturating_mul(OSS_FOLLOWER_WEIGHT_TENTHS))
        .saturating_add(public_repos.saturating_mul(OSS_PUBLIC_REPO_WEIGHT_TENTHS));
    tenths / 10
}

/// Languages by repository count, descending; ties keep first-seen order
fn top_languages(repos: &[RawRepository]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        if language.trim().is_empty() {
            continue;
        }
        let count = counts.entry(language).or_insert(0);
        if *count == 0 {
            first_seen.push(language);
        }
        *count += 1;
    }

    // Stable sort keeps first-seen order among equal counts
    first_seen.sort_by(|a, b| counts[b].cmp(&counts[a]));
    first_seen
        .into_iter()
        .take(TOP_LANGUAGES_LIMIT)
        .map(str::to_string)
        .collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
