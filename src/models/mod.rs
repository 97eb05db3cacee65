//! Typed results produced by structured generation.
//!
//! Each model pairs a serde/schemars type with a [`Shape`](crate::generation::Shape)
//! that the validator enforces before deserialization.

use serde::Deserialize;

pub mod analysis;
pub mod plan;
pub mod review;

pub use analysis::*;
pub use plan::*;
pub use review::*;

/// Three-level rating used for priority, impact and confidence.
pub const LEVELS: &[&str] = &["high", "medium", "low"];

/// Deserialize an explicit `null` as the field's default.
///
/// The validator accepts `null` for optional fields; `#[serde(default)]`
/// alone only covers absent ones.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
