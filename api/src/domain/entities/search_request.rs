//! Search request domain entity
//!
//! The structured query produced upstream by the natural-language parser.
//! Values equal to `"unspecified"` are treated the same as missing ones.

use serde::{Deserialize, Serialize};

/// Marker the upstream parser emits for fields it could not determine
pub const UNSPECIFIED: &str = "unspecified";

/// A field that may arrive as a single string or as a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Specified values, in order, with blanks and `"unspecified"` removed
    pub fn values(&self) -> Vec<&str> {
        match self {
            OneOrMany::One(v) => specified(v).into_iter().collect(),
            OneOrMany::Many(vs) => vs.iter().filter_map(|v| specified(v)).collect(),
        }
    }
}

/// Structured candidate search request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub location: Option<OneOrMany>,
    #[serde(default)]
    pub work_type: Option<OneOrMany>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().and_then(specified)
    }

    pub fn experience_level(&self) -> Option<&str> {
        self.experience_level.as_deref().and_then(specified)
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().filter_map(|s| specified(s))
    }

    pub fn locations(&self) -> Vec<&str> {
        self.location.as_ref().map(OneOrMany::values).unwrap_or_default()
    }

    pub fn work_types(&self) -> Vec<&str> {
        self.work_type.as_ref().map(OneOrMany::values).unwrap_or_default()
    }
}

/// Returns the trimmed value unless it is blank or `"unspecified"`
pub fn specified(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNSPECIFIED) {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_request() {
        let json = r#"{
            "intent": "find_candidates",
            "title": "Gen-AI Engineer",
            "skills": ["LangChain", "RAG"],
            "experience_level": "senior",
            "location": "Europe",
            "work_type": ["contract", "remote"],
            "limit": 10
        }"#;
        let request: SearchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.title(), Some("Gen-AI Engineer"));
        assert_eq!(request.skills().collect::<Vec<_>>(), vec!["LangChain", "RAG"]);
        assert_eq!(request.locations(), vec!["Europe"]);
        assert_eq!(request.work_types(), vec!["contract", "remote"]);
        assert_eq!(request.limit, Some(10));
    }

    #[test]
    fn parse_minimal_request() {
        let request: SearchRequest = serde_json::from_str(r#"{"intent": "find"}"#).unwrap();
        assert!(request.title().is_none());
        assert_eq!(request.skills().count(), 0);
        assert!(request.locations().is_empty());
        assert!(request.limit.is_none());
    }

    #[test]
    fn unspecified_values_are_absent() {
        let json = r#"{
            "intent": "find",
            "title": "Unspecified",
            "skills": ["rust", "unspecified", "  "],
            "experience_level": "UNSPECIFIED",
            "location": ["unspecified", "Berlin"]
        }"#;
        let request: SearchRequest = serde_json::from_str(json).unwrap();
        assert!(request.title().is_none());
        assert!(request.experience_level().is_none());
        assert_eq!(request.skills().collect::<Vec<_>>(), vec!["rust"]);
        assert_eq!(request.locations(), vec!["Berlin"]);
    }
}
