//! Core types shared across the crate.

mod error;
mod outcome;

pub use error::{Error, Result};
pub use outcome::Outcome;
