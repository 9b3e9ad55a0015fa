//! Domain layer
//!
//! Contains pure data types with no I/O.
//! - `entities`: the search request and the normalized candidate record
//! - `ports`: Trait definitions for external dependencies (GitHub)

pub mod entities;
pub mod ports;
