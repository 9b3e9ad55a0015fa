//! Candidate normalization
//!
//! Maps a GitHub profile, its repositories and their analysis into the
//! canonical [`CandidateRecord`].

use chrono::SecondsFormat;

use crate::app::analyzer::CandidateAnalysis;
use crate::domain::entities::{CandidateIdentity, CandidateRecord, TopRepo};
use crate::domain::ports::{RawProfile, RawRepository};

const GITHUB_WEB_URL: &str = "https://github.com";

/// Build a candidate record. `None` without a profile.
pub fn normalize(
    profile: Option<&RawProfile>,
    repos: &[RawRepository],
    analysis: CandidateAnalysis,
) -> Option<CandidateRecord> {
    let profile = profile?;
    let login = profile.login.trim();
    if login.is_empty() {
        return None;
    }

    let name = profile
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(login)
        .to_string();

    let github_url = if profile.html_url.trim().is_empty() {
        format!("{}/{}", GITHUB_WEB_URL, login)
    } else {
        profile.html_url.clone()
    };

    let activity = analysis.activity;

    Some(CandidateRecord {
        name,
        identity: CandidateIdentity::CodeHost {
            github_username: login.to_string(),
            github_url,
        },
        location: profile
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        skills: analysis.skills.into_iter().collect(),
        top_languages: activity.top_languages,
        total_stars: activity.total_stars,
        recent_activity: activity
            .recent_activity
            .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        oss_score: activity.oss_score,
        top_repo: top_repo(repos),
    })
}

/// Repository with the most stars, forks breaking ties; first one wins on a full tie
pub fn top_repo(repos: &[RawRepository]) -> Option<TopRepo> {
    let mut ranked: Vec<&RawRepository> = repos.iter().collect();
    ranked.sort_by(|a, b| {
        (b.stargazers_count, b.forks_count).cmp(&(a.stargazers_count, a.forks_count))
    });
    ranked.first().map(|repo| TopRepo {
        name: repo.name.clone(),
        stars: repo.stargazers_count,
    })
}
