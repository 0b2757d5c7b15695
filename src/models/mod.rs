//! Domain models for the provider network
//!
//! Claims are the input facts; providers and patients are identified by
//! synthetic identifiers only.

pub mod claim;
pub mod provider;

pub use claim::{Claim, ClaimRecord};
pub use provider::{
    PatientId, ProviderId, ProviderProfile, ProviderRoster, RosterEntry, UNKNOWN_SPECIALTY,
};
