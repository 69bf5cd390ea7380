//! Artha Core - Fundamental types
//!
//! This crate provides the types shared by the Artha workspace:
//! - `Number`: Arbitrary precision decimal numbers
//! - `UndefinedResult`: the engine's single boundary error

mod error;
mod number;

pub use error::UndefinedResult;
pub use number::{Number, NumberError};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, UndefinedResult};
}
