//! Outbreak Trends math utilities.

pub mod math;

pub use math::growth::*;
pub use math::sum::*;
