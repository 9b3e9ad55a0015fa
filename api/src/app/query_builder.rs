//! GitHub search query builder
//!
//! Turns a structured search request into a `/search/repositories` query
//! string. Terms are sanitized, percent-encoded and joined with `+`:
//!
//! ```text
//! title, topic:<skill>..., <skill>..., experience_level
//! ```
//!
//! Building never fails from the caller's point of view: any construction
//! error degrades to [`fallback_query`].

use regex::Regex;

use crate::app::scoring_config::MAX_QUERY_LENGTH;
use crate::domain::entities::{specified, SearchRequest};
use crate::error::QueryError;

/// Broad query used when the request carries nothing searchable
pub const DEFAULT_QUERY: &str = "stars:>10";

/// Characters kept in a term: word characters, `-`, `.` and spaces
const DISALLOWED_CHARS: &str = r"[^\w\-. ]";

/// Build the repository search query for a request
pub fn build_query(request: &SearchRequest) -> String {
    if request.title().is_none() && request.skills().next().is_none() {
        tracing::debug!("No title or skills in request, using fallback query");
        return non_empty_fallback(request);
    }

    match try_build_query(request) {
        Ok(query) if !query.is_empty() => query,
        Ok(_) => {
            tracing::debug!("All query terms were dropped, using fallback query");
            non_empty_fallback(request)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Query construction failed, using fallback query");
            non_empty_fallback(request)
        }
    }
}

/// Build the query from sanitized terms
pub fn try_build_query(request: &SearchRequest) -> Result<String, QueryError> {
    let cleaner = Regex::new(DISALLOWED_CHARS)?;
    let mut terms: Vec<String> = Vec::new();

    if let Some(title) = request.title.as_deref() {
        terms.extend(keyword_term(&cleaner, title));
    }
    for skill in &request.skills {
        terms.extend(topic_term(&cleaner, skill));
    }
    for skill in &request.skills {
        terms.extend(keyword_term(&cleaner, skill));
    }
    if let Some(level) = request.experience_level.as_deref() {
        terms.extend(keyword_term(&cleaner, level));
    }

    let query = terms.join("+");
    if query.len() > MAX_QUERY_LENGTH {
        return Err(QueryError::TooLong {
            length: query.len(),
            max: MAX_QUERY_LENGTH,
        });
    }
    Ok(query)
}

/// Degraded query: the raw title, or the skills joined by spaces, percent-encoded.
/// Empty when the request has neither.
pub fn fallback_query(request: &SearchRequest) -> String {
    let raw = match request.title() {
        Some(title) => title.to_string(),
        None => request.skills().collect::<Vec<_>>().join(" "),
    };
    urlencoding::encode(raw.trim()).into_owned()
}

fn non_empty_fallback(request: &SearchRequest) -> String {
    let query = fallback_query(request);
    if query.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        query
    }
}

/// Strip disallowed characters and trim; `None` for empty or `"unspecified"` terms
fn clean_term(cleaner: &Regex, raw: &str) -> Option<String> {
    let cleaned = cleaner.replace_all(raw, "");
    specified(&cleaned).map(str::to_string)
}

fn keyword_term(cleaner: &Regex, raw: &str) -> Option<String> {
    clean_term(cleaner, raw).map(|term| urlencoding::encode(&term).into_owned())
}

fn topic_term(cleaner: &Regex, raw: &str) -> Option<String> {
    clean_term(cleaner, raw).map(|term| {
        let hyphenated = term.split_whitespace().collect::<Vec<_>>().join("-");
        format!("topic:{}", urlencoding::encode(&hyphenated))
    })
}
