//! Entity metadata and its two extraction paths: source annotations for
//! normal generation, generated artifacts for inspection.

mod annotation_parser;
mod artifact_parser;
mod metadata;

pub use annotation_parser::*;
pub use artifact_parser::*;
pub use metadata::*;
