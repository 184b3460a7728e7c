//! Parsing utilities for message export documents.
//!
//! This module contains the raw deserialization types and the timestamp
//! parser used by the [`loader`](crate::loader).

pub mod export;

pub use export::{RawMessage, RawUser, convert_raw_message, parse_timestamp};
