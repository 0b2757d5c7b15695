//! Utility modules for file IO and logging

pub mod io;
pub mod logging;

pub use io::{LoadReport, read_claims, read_roster, write_claims, write_roster};
