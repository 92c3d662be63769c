//! The hyperbolic-tangent model.
//!
//! The model is implemented as small, pure functions so that the fitter, the
//! plots and the reporter all evaluate it the same way.

pub mod model;

pub use model::*;
