//! Character-grid plotting.

pub mod ascii;

pub use ascii::*;
