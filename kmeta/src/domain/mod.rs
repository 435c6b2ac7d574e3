//! Domain model for kmeta
//!
//! This module contains the error types shared by the translator, the
//! exporter and the CLI, plus re-exports of the ABI vocabulary from
//! `kmeta-common` so callers only need one import path.

pub mod errors;

// Re-export common types for convenience
pub use kmeta_common::{ArchProfile, FieldKind, FieldSlot, SigField, SupportedArch};

pub use errors::{ExportError, InputError, SigInfoError};
