//! Utility functions for error handling
//!
//! This module provides path-aware wrappers around filesystem operations.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{NetworkError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(NetworkError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found (needed for: {purpose})"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(NetworkError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is not a file (expected a file for: {purpose})"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for {purpose}: {e}"),
        };
        NetworkError::io(path, io::Error::new(e.kind(), context))
    })
}

/// Create a file for writing, creating missing parent directories first
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }
    fs::File::create(path).map_err(|e| NetworkError::io(path, e))
}

/// Make sure a directory exists, creating it when missing
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(NetworkError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "Path is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| NetworkError::io(path, e))
}
