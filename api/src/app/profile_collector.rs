//! Profile collector
//!
//! Fetches the profile and first repository page of each owner login,
//! a bounded number of logins at a time. Single-candidate failures are
//! absorbed; a rate-limit exhaustion aborts the whole batch.

use std::collections::BTreeSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::domain::ports::{GitHubClient, RawProfile, RawRepository};
use crate::error::GitHubError;

/// Profile plus repositories for one login
#[derive(Debug, Clone)]
pub struct CollectedProfile {
    pub profile: RawProfile,
    pub repositories: Vec<RawRepository>,
}

pub struct ProfileCollector<GC>
where
    GC: GitHubClient,
{
    client: Arc<GC>,
    concurrency: usize,
    repos_per_page: u32,
}

impl<GC> ProfileCollector<GC>
where
    GC: GitHubClient,
{
    pub fn new(client: Arc<GC>, concurrency: usize, repos_per_page: u32) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
            repos_per_page,
        }
    }

    /// Collect every login that yields a profile. The set guarantees each
    /// login is fetched once; output order is completion order.
    pub async fn collect(
        &self,
        logins: &BTreeSet<String>,
    ) -> Result<Vec<CollectedProfile>, GitHubError> {
        let mut pending = stream::iter(logins.iter().cloned())
            .map(|login| async move { self.collect_one(&login).await })
            .buffer_unordered(self.concurrency);

        let mut collected = Vec::with_capacity(logins.len());
        while let Some(result) = pending.next().await {
            // Returning drops the stream and abandons in-flight fetches
            if let Some(profile) = result? {
                collected.push(profile);
            }
        }

        tracing::info!(
            requested = logins.len(),
            collected = collected.len(),
            "Profile collection finished"
        );
        Ok(collected)
    }

    async fn collect_one(&self, login: &str) -> Result<Option<CollectedProfile>, GitHubError> {
        let (profile, repositories) = tokio::join!(
            self.client.get_user_profile(login),
            self.client.get_user_repositories(login, 1, self.repos_per_page),
        );

        let profile = match profile {
            Ok(profile) => profile,
            Err(e) if e.is_terminal() => return Err(e),
            Err(e) => {
                if let Err(repo_err) = repositories {
                    if repo_err.is_terminal() {
                        return Err(repo_err);
                    }
                }
                tracing::warn!(
                    login = %login,
                    status = ?e.status(),
                    error = %e,
                    "Skipping candidate without profile"
                );
                return Ok(None);
            }
        };

        let repositories = match repositories {
            Ok(repos) => repos,
            Err(e) if e.is_terminal() => return Err(e),
            Err(e) => {
                tracing::warn!(
                    login = %login,
                    status = ?e.status(),
                    error = %e,
                    "Repository fetch failed, keeping profile"
                );
                Vec::new()
            }
        };

        Ok(Some(CollectedProfile {
            profile,
            repositories,
        }))
    }
}
