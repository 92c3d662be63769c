//! Mathematical utilities: parameter covariance of least-squares fits.

pub mod covariance;

pub use covariance::*;
