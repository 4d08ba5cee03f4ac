//! Shared helpers for integration tests

mod server;
mod source;

pub use server::*;
pub use source::*;
