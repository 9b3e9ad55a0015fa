//! Scoring configuration constants
//!
//! Tunable heuristics for candidate scoring and filtering. The OSS weights
//! are expressed in tenths so the score is computed in exact integer math.

/// OSS score weight per repository star (0.5)
pub const OSS_STAR_WEIGHT_TENTHS: u64 = 5;

/// OSS score weight per follower (0.3)
pub const OSS_FOLLOWER_WEIGHT_TENTHS: u64 = 3;

/// OSS score weight per public repository (0.2)
pub const OSS_PUBLIC_REPO_WEIGHT_TENTHS: u64 = 2;

/// Default recency window for the activity filter
pub const DEFAULT_ACTIVITY_MONTHS: u32 = 12;

/// Number of languages kept in `top_languages`
pub const TOP_LANGUAGES_LIMIT: usize = 5;

/// Domain keywords matched (case-insensitively) against bios and descriptions
pub const SKILL_KEYWORDS: &[&str] = &[
    "AI",
    "ML",
    "Gen-AI",
    "Machine Learning",
    "Artificial Intelligence",
    "LangChain",
    "RAG",
    "LLM",
    "NLP",
    "Deep Learning",
    "Python",
    "TensorFlow",
    "PyTorch",
];

/// GitHub rejects search queries longer than this
pub const MAX_QUERY_LENGTH: usize = 256;
