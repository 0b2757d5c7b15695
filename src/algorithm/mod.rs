//! Algorithm implementations for the provider network workflow
//!
//! Each stage is a function of the previous stage's output: synthesized
//! claims, shared-revenue aggregation, network construction, layout and
//! statistics.

pub mod aggregation;
pub mod layout;
pub mod network;
pub mod statistics;
pub mod synthesis;
