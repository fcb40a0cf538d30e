//! Dashboard token verification.
//!
//! This module is free of HTTP types. The axum layer that reads `?token=` and
//! turns failures into 401s lives in `server::middleware`.

pub mod token;

pub use token::TokenVerifier;
