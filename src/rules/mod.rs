//! Detection rules - the finding taxonomy and the pattern catalog

pub mod kinds;
pub mod patterns;

pub use kinds::FindingKind;
pub use patterns::{DetectionRule, PATTERN_CATALOG};
