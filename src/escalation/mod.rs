//! Escalation factors: computation, lookup, extrapolation, and nominal/real conversion.

pub mod escalator;
pub mod extrapolation;

pub use escalator::{Escalator, EscalatorBuilder};
pub use extrapolation::estimate_factor;
