//! Report export functionality
//!
//! This module turns decoded signal-information records into formats other
//! tools can consume. Currently supports a JSON report per record.

pub mod json_report;

pub use json_report::{hex_string, NamedValue, SigInfoReport};
