//! Candidate domain entity
//!
//! The canonical, source-agnostic shape every connector normalizes into.

use serde::{Deserialize, Serialize};

/// Where a candidate was found. Exactly one identity is populated per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateIdentity {
    /// Code-hosting account (GitHub)
    CodeHost {
        github_username: String,
        github_url: String,
    },
    /// Professional network profile (LinkedIn)
    ExternalNetwork { linkedin_url: String },
}

/// Most-starred repository of a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: String,
    pub stars: u64,
}

/// A normalized candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    #[serde(flatten)]
    pub identity: CandidateIdentity,
    pub location: Option<String>,
    /// Deduplicated; serialized in sorted order
    pub skills: Vec<String>,
    pub top_languages: Vec<String>,
    pub total_stars: u64,
    /// RFC 3339 timestamp of the latest repository update
    pub recent_activity: Option<String>,
    pub oss_score: u64,
    pub top_repo: Option<TopRepo>,
}

impl CandidateRecord {
    /// GitHub login, if this record came from the code host
    pub fn github_username(&self) -> Option<&str> {
        match &self.identity {
            CandidateIdentity::CodeHost {
                github_username, ..
            } => Some(github_username),
            CandidateIdentity::ExternalNetwork { .. } => None,
        }
    }

    /// Stable key for logging and tie-breaking
    pub fn key(&self) -> &str {
        match &self.identity {
            CandidateIdentity::CodeHost {
                github_username, ..
            } => github_username,
            CandidateIdentity::ExternalNetwork { linkedin_url } => linkedin_url,
        }
    }
}
