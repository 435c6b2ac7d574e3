//! Signal-information translation
//!
//! - `category`: which `_sifields` arm a record uses and which fields it holds
//! - `record`: the architecture-tagged `siginfo_t` buffer and typed view
//! - `convert`: profile-to-profile and native translation

pub mod category;
pub mod convert;
pub mod record;

pub use category::{discriminant, Category, Discriminant};
pub use convert::{
    convert_raw_to_native_siginfo, convert_to_native_siginfo, translate, translate_record,
};
pub use record::{SigFields, SigInfo};
