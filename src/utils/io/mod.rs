//! IO utilities for the flat files the pipeline reads and writes

pub mod csv_io;

pub use csv_io::{LoadReport, read_claims, read_roster, write_claims, write_roster};
