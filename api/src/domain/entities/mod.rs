//! Domain entities
//!
//! Pure domain models representing the search input and the normalized output.
//! Upstream GitHub shapes live next to the client port in `ports::github`.

pub mod candidate;
pub mod search_request;

pub use candidate::{CandidateIdentity, CandidateRecord, TopRepo};
pub use search_request::{specified, SearchRequest};
