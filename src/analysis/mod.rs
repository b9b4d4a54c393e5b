//! Analysis modules.
//!
//! Feature extractors read single events; aggregators fold whole collections.

pub mod aggregator;
pub mod extract;

pub use aggregator::*;
