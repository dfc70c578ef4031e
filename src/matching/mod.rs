//! Partial-information search over the layout corpus

/// Tiles recognition tends to confuse
pub mod confusable;
/// Constraint patterns and the anchored matcher
pub mod pattern;
/// Observation to corpus lookup
pub mod resolver;
