//! Outbound calls to the OpenRouter API.
//!
//! The upstream credential is attached here and nowhere else; it never appears
//! in responses, logs, or `Debug` output.

pub mod client;

pub use client::{Resource, UpstreamClient};
