//! Dotenv-style env file ingestion.
//!
//! Unlike the other formats, an env file does not populate the target
//! object: its variables are written into the **process environment**,
//! where a subsequent resolution pass picks them up. This is the one
//! operation in the crate that mutates process state, and it is kept
//! here, outside the binding engine, for exactly that reason.

use std::io;
use std::path::Path;

use super::error::SourceError;

/// Parses an env file from a reader and sets each variable in the
/// process environment.
///
/// Variables already present in the environment are not overwritten.
///
/// # Errors
///
/// Returns an error if the stream cannot be read or a line is malformed.
pub fn ingest(reader: impl io::Read) -> Result<(), SourceError> {
    dotenvy::from_read(io::BufReader::new(reader))?;
    tracing::debug!("Loaded env file into the process environment");
    Ok(())
}

/// Parses an env file at `path` and sets each variable in the process
/// environment.
///
/// Variables already present in the environment are not overwritten.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a line is malformed.
pub fn ingest_path(path: &Path) -> Result<(), SourceError> {
    dotenvy::from_path(path)?;
    tracing::debug!(
        "Loaded env file '{}' into the process environment",
        path.display()
    );
    Ok(())
}
