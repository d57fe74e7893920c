#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;

pub mod extras;
pub use error::*;

/// Checks whether the data held by the implementor is acceptable
/// before it gets passed further down (to the store, for example).
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}
