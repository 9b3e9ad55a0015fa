//! Candidate acceptance filter
//!
//! Each check is a [`CandidatePredicate`]; a [`CandidateFilter`] accepts a
//! record only when every configured predicate does.

use std::collections::HashSet;

use chrono::{DateTime, Months, Utc};

use crate::domain::entities::CandidateRecord;

/// A single acceptance check over a normalized candidate
pub trait CandidatePredicate: Send + Sync {
    fn accepts(&self, record: &CandidateRecord, now: DateTime<Utc>) -> bool;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Requires a repository update within the last `min_months` calendar months
#[derive(Debug, Clone, Copy)]
pub struct RecentActivity {
    pub min_months: u32,
}

impl CandidatePredicate for RecentActivity {
    fn accepts(&self, record: &CandidateRecord, now: DateTime<Utc>) -> bool {
        let Some(raw) = record.recent_activity.as_deref() else {
            return false;
        };
        let Ok(last_active) = DateTime::parse_from_rfc3339(raw.trim()) else {
            tracing::debug!(candidate = %record.key(), value = %raw, "Unparsable activity timestamp");
            return false;
        };
        match now.checked_sub_months(Months::new(self.min_months)) {
            Some(cutoff) => last_active.with_timezone(&Utc) >= cutoff,
            None => true,
        }
    }

    fn name(&self) -> &'static str {
        "recent_activity"
    }
}

/// Requires at least `min_stars` across all repositories
#[derive(Debug, Clone, Copy)]
pub struct MinStars {
    pub min_stars: u64,
}

impl CandidatePredicate for MinStars {
    fn accepts(&self, record: &CandidateRecord, _now: DateTime<Utc>) -> bool {
        record.total_stars >= self.min_stars
    }

    fn name(&self) -> &'static str {
        "min_stars"
    }
}

/// Requires every listed skill (case-insensitive)
#[derive(Debug, Clone)]
pub struct RequiredSkills {
    skills: Vec<String>,
}

impl RequiredSkills {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skills: skills
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

impl CandidatePredicate for RequiredSkills {
    fn accepts(&self, record: &CandidateRecord, _now: DateTime<Utc>) -> bool {
        let have: HashSet<String> = record
            .skills
            .iter()
            .chain(record.top_languages.iter())
            .map(|s| s.to_lowercase())
            .collect();
        self.skills.iter().all(|s| have.contains(s))
    }

    fn name(&self) -> &'static str {
        "required_skills"
    }
}

/// AND-combination of predicates
pub struct CandidateFilter {
    predicates: Vec<Box<dyn CandidatePredicate>>,
}

impl CandidateFilter {
    /// Filter with only the recency check
    pub fn new(min_activity_months: u32) -> Self {
        Self {
            predicates: vec![Box::new(RecentActivity {
                min_months: min_activity_months,
            })],
        }
    }

    pub fn with<P: CandidatePredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn accepts(&self, record: &CandidateRecord, now: DateTime<Utc>) -> bool {
        self.predicates.iter().all(|p| {
            let ok = p.accepts(record, now);
            if !ok {
                tracing::debug!(candidate = %record.key(), predicate = p.name(), "Candidate rejected");
            }
            ok
        })
    }
}

/// Recency check alone
pub fn accepts(record: &CandidateRecord, min_activity_months: u32, now: DateTime<Utc>) -> bool {
    RecentActivity {
        min_months: min_activity_months,
    }
    .accepts(record, now)
}
