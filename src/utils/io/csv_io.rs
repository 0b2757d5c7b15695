//! CSV file operations
//!
//! Reading and writing of the claims table and the provider roster.
//! Rows that cannot be parsed or validated are skipped with a warning;
//! only a missing or unreadable file is an error.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::util::{safe_create_file, safe_open_file};
use crate::error::{NetworkError, Result};
use crate::models::{Claim, ClaimRecord, RosterEntry};
use crate::utils::logging::{
    create_spinner, log_operation_complete, log_operation_start, log_warning,
};

/// Columns a claims file must carry for any row to be usable
const REQUIRED_CLAIM_COLUMNS: [&str; 3] = [
    "servicing_provider_npi_number",
    "person_alias",
    "allowed_amount",
];

/// Records kept from a file together with the number of rows skipped
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> LoadReport<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

/// Read a claims CSV file
pub fn read_claims(path: &Path) -> Result<LoadReport<Claim>> {
    log_operation_start("Reading claims from", path);
    let start = Instant::now();
    let file = safe_open_file(path, "reading claims")?;
    let report = read_claims_from(file, path)?;
    log_operation_complete("read", path, report.records.len(), Some(start.elapsed()));
    Ok(report)
}

/// Read claims from any reader; `source` names the input in messages
pub fn read_claims_from<R: Read>(reader: R, source: &Path) -> Result<LoadReport<Claim>> {
    read_rows(reader, source, "claim", &REQUIRED_CLAIM_COLUMNS, |record: ClaimRecord, line| {
        record.into_claim(line)
    })
}

/// Read a provider roster CSV file
pub fn read_roster(path: &Path) -> Result<LoadReport<RosterEntry>> {
    log_operation_start("Reading provider roster from", path);
    let start = Instant::now();
    let file = safe_open_file(path, "reading provider roster")?;
    let report = read_roster_from(file, path)?;
    log_operation_complete("read", path, report.records.len(), Some(start.elapsed()));
    Ok(report)
}

/// Read roster entries from any reader; `source` names the input in messages
pub fn read_roster_from<R: Read>(reader: R, source: &Path) -> Result<LoadReport<RosterEntry>> {
    read_rows(reader, source, "roster", &["NPI"], |mut entry: RosterEntry, _| {
        entry.npi = entry.npi.trim().to_string();
        if entry.npi.is_empty() {
            return Err(NetworkError::InvalidInput("missing NPI".to_string()));
        }
        Ok(entry)
    })
}

fn read_rows<R, D, T, F>(
    reader: R,
    source: &Path,
    kind: &str,
    required_columns: &[&str],
    convert: F,
) -> Result<LoadReport<T>>
where
    R: Read,
    D: DeserializeOwned,
    F: Fn(D, u64) -> Result<T>,
{
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| NetworkError::csv(source, e))?
        .clone();
    warn_missing_columns(&headers, required_columns, source);

    let mut records = Vec::new();
    let mut skipped = 0;
    let pb = create_spinner(Some(&format!("Parsing {kind} rows")));

    for (idx, row) in reader.deserialize::<D>().enumerate() {
        // Header occupies line 1
        let line = idx as u64 + 2;
        let parsed = row
            .map_err(|e| NetworkError::csv(source, e))
            .and_then(|raw| convert(raw, line));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping malformed {kind} row {line} in {}: {e}", source.display());
                skipped += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    if skipped > 0 {
        log_warning(
            &format!("Skipped {skipped} malformed {kind} rows"),
            Some(source),
        );
    }
    debug!("Kept {} {kind} rows from {}", records.len(), source.display());

    Ok(LoadReport { records, skipped })
}

fn warn_missing_columns(headers: &StringRecord, required: &[&str], source: &Path) {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            log_warning(&format!("Column '{column}' not found"), Some(source));
        }
    }
}

/// Write claims to a CSV file, creating parent directories as needed
pub fn write_claims(path: &Path, claims: &[Claim]) -> Result<()> {
    write_rows(path, claims)
}

/// Write roster entries to a CSV file, creating parent directories as needed
pub fn write_roster(path: &Path, entries: &[RosterEntry]) -> Result<()> {
    write_rows(path, entries)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    log_operation_start("Writing", path);
    let file = safe_create_file(path)?;
    let mut writer = Writer::from_writer(file);
    write_to(&mut writer, rows).map_err(|e| NetworkError::csv(path, e))?;
    writer.flush().map_err(|e| NetworkError::io(path, e))?;
    log_operation_complete("wrote", path, rows.len(), None);
    Ok(())
}

fn write_to<W: Write, T: Serialize>(writer: &mut Writer<W>, rows: &[T]) -> csv::Result<()> {
    for row in rows {
        writer.serialize(row)?;
    }
    Ok(())
}
