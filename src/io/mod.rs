//! Input helpers.
//!
//! - tab-delimited data ingest (`ingest`)

pub mod ingest;

pub use ingest::*;
