//! Rug Check Adapter
//!
//! Reputation lookups against the rug check service.

mod client;

pub use client::{RugCheckClient, RugCheckError};
