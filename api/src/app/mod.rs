//! Application layer
//!
//! Contains the discovery pipeline stages and the service that orchestrates them.
//! Stages are pure functions where possible; only the collector and the search
//! service talk to the GitHub port.

pub mod analyzer;
pub mod filter;
pub mod normalizer;
pub mod profile_collector;
pub mod query_builder;
pub mod scoring_config;
pub mod search_service;

pub use analyzer::{analyze, analyze_activity, extract_skills, ActivityAnalysis, CandidateAnalysis};
pub use filter::{CandidateFilter, CandidatePredicate, MinStars, RecentActivity, RequiredSkills};
pub use normalizer::normalize;
pub use profile_collector::{CollectedProfile, ProfileCollector};
pub use query_builder::{build_query, fallback_query, DEFAULT_QUERY};
pub use search_service::{CandidateSearchService, SearchMetadata, SearchOutcome, SearchSettings};
