//! Candidate search service
//!
//! Runs the GitHub discovery pipeline for one request:
//! query → repository search → owner dedupe → profile collection →
//! analysis → normalization → filter → ranking.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::analyzer::analyze;
use crate::app::filter::CandidateFilter;
use crate::app::normalizer::normalize;
use crate::app::profile_collector::ProfileCollector;
use crate::app::query_builder::build_query;
use crate::config::Config;
use crate::domain::entities::{CandidateRecord, SearchRequest};
use crate::domain::ports::{GitHubClient, RawRepository};
use crate::error::GitHubError;

/// Pipeline tunables, usually taken from [`Config`]
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub per_page: u32,
    pub max_pages: u32,
    pub repos_per_page: u32,
    pub concurrency: usize,
    pub min_activity_months: u32,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            per_page: config.search_per_page,
            max_pages: config.search_max_pages,
            repos_per_page: config.repos_per_page,
            concurrency: config.collector_concurrency,
            min_activity_months: config.min_activity_months,
        }
    }
}

/// Counters describing how a search went
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SearchMetadata {
    /// Repository matches GitHub reported for the query
    pub total_matched: u64,
    pub query: String,
    pub owners_discovered: usize,
    pub profiles_collected: usize,
    pub candidates_returned: usize,
    pub incomplete_results: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Ranked by OSS score, highest first
    pub candidates: Vec<CandidateRecord>,
    pub metadata: SearchMetadata,
}

pub struct CandidateSearchService<GC>
where
    GC: GitHubClient,
{
    github: Arc<GC>,
    collector: ProfileCollector<GC>,
    filter: CandidateFilter,
    settings: SearchSettings,
}

impl<GC> CandidateSearchService<GC>
where
    GC: GitHubClient,
{
    pub fn new(github: Arc<GC>, settings: SearchSettings) -> Self {
        Self {
            collector: ProfileCollector::new(
                github.clone(),
                settings.concurrency,
                settings.repos_per_page,
            ),
            filter: CandidateFilter::new(settings.min_activity_months),
            github,
            settings,
        }
    }

    /// Replace the default recency-only filter
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filter = filter;
        self
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, GitHubError> {
        self.search_at(request, Utc::now()).await
    }

    /// Run the pipeline with `now` as the reference time for the activity window.
    /// Only rate-limit exhaustion is returned as an error.
    pub async fn search_at(
        &self,
        request: &SearchRequest,
        now: DateTime<Utc>,
    ) -> Result<SearchOutcome, GitHubError> {
        let query = build_query(request);
        tracing::info!(
            query = %query,
            intent = %request.intent,
            experience_level = ?request.experience_level(),
            locations = ?request.locations(),
            work_types = ?request.work_types(),
            "Starting GitHub candidate search"
        );

        let search = match self
            .github
            .search_repositories(&query, 1, self.settings.per_page, self.settings.max_pages)
            .await
        {
            Ok(search) => search,
            Err(e) if e.is_terminal() => {
                tracing::error!(error = %e, "Repository search hit the rate limit");
                return Err(e);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Repository search failed, returning no candidates");
                return Ok(SearchOutcome {
                    candidates: Vec::new(),
                    metadata: SearchMetadata {
                        query,
                        ..Default::default()
                    },
                });
            }
        };

        let owners = owner_logins(&search.items);
        tracing::debug!(
            repositories = search.items.len(),
            owners = owners.len(),
            "Discovered repository owners"
        );

        let collected = self.collector.collect(&owners).await?;
        let profiles_collected = collected.len();

        let mut candidates: Vec<CandidateRecord> = collected
            .into_iter()
            .filter_map(|c| {
                let analysis = analyze(&c.profile, &c.repositories);
                normalize(Some(&c.profile), &c.repositories, analysis)
            })
            .filter(|record| self.filter.accepts(record, now))
            .collect();

        rank(&mut candidates);
        if let Some(limit) = request.limit {
            candidates.truncate(limit);
        }

        tracing::info!(
            owners = owners.len(),
            profiles = profiles_collected,
            candidates = candidates.len(),
            "GitHub candidate search finished"
        );

        Ok(SearchOutcome {
            metadata: SearchMetadata {
                total_matched: search.total_count,
                query,
                owners_discovered: owners.len(),
                profiles_collected,
                candidates_returned: candidates.len(),
                incomplete_results: search.incomplete_results,
            },
            candidates,
        })
    }
}

/// Unique owner logins of the matched repositories
pub fn owner_logins(repos: &[RawRepository]) -> BTreeSet<String> {
    repos
        .iter()
        .filter_map(|repo| {
            let login = repo.owner_login();
            if login.is_none() {
                tracing::warn!(repository = %repo.name, "Skipping search item without owner");
            }
            login
        })
        .map(str::to_string)
        .collect()
}

/// OSS score descending, login ascending on ties
fn rank(candidates: &mut [CandidateRecord]) {
    candidates.sort_by(|a, b| {
        b.oss_score
            .cmp(&a.oss_score)
            .then_with(|| a.key().cmp(b.key()))
    });
}
