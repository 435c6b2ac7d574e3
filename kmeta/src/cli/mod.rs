//! Command-line surface: argument definitions and input parsing

pub mod args;
pub mod input;

pub use args::{ArchArg, Args, Command, NameKind};
pub use input::{parse_hex, parse_number};
