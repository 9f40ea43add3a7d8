//! Constraint types for version matching

#[allow(clippy::module_inception)]
mod constraint;
mod operator;
mod range;

pub use constraint::{Boundary, VersionConstraint};
pub use operator::{InvalidOperatorError, Operator};
pub use range::{ParsedRange, RangeLogic, RangeSet};
