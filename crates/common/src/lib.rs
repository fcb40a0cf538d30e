//! Wire types and errors shared across `openrouter-gateway` crates.

pub mod error;
pub mod protocol;

pub use error::{ErrorBody, GatewayError};
