//! Configuration sources: file-format decoding and env file ingestion.
//!
//! This module provides:
//! - Format detection and decoding ([`Format`])
//! - Dotenv-style env file ingestion ([`dotenv`])
//!
//! File-sourced values populate the target object first; the binding
//! engine's resolution pass runs afterwards, so environment variables
//! always override file-sourced values.

pub mod dotenv;
mod error;
mod format;


pub use error::SourceError;
pub use format::Format;
