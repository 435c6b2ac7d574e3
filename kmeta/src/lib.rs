//! # kmeta - Kernel Metadata Translation for Process Tracers
//!
//! A tracer that records and replays processes of several architectures sees
//! kernel structures in whatever layout the traced process used. This crate
//! normalizes the one that varies most, `siginfo_t`, and turns the raw
//! numbers found in ptrace stops into readable names.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  raw siginfo bytes   │      │  syscall / signal /  │
//! │  + arch tag          │      │  errno / ptrace nums │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            ▼                             ▼
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │      siginfo         │      │        names         │
//! │  layout translation  │─────▶│  total resolvers     │
//! └──────────┬───────────┘      └──────────────────────┘
//!            ▼
//! ┌──────────────────────┐
//! │       export         │
//! │    (JSON report)     │
//! └──────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - [`siginfo`]: discriminant and category selection, the per-field
//!   copy between architecture profiles, `convert_to_native_siginfo`
//! - [`names`]: diagnostic name resolvers; never fail, fall back to `kind(<n>)`
//! - [`export`]: serializable report of a decoded record
//! - [`domain`]: error types and re-exported layout types from `kmeta-common`
//! - [`cli`]: command-line argument definitions and input parsing
//!
//! ## Typical Usage
//!
//! ```bash
//! # Convert a siginfo captured from a 32-bit tracee
//! kmeta convert --arch x86 --input siginfo.bin
//!
//! # Name a syscall number
//! kmeta name syscall 59 --arch x86_64
//! ```

pub mod cli;
pub mod domain;
pub mod export;
pub mod names;
pub mod siginfo;
