//! Diagnostic name resolution
//!
//! Turns the numbers that show up in ptrace stops and `siginfo_t` records
//! into the names a person would grep for. Every function here is total:
//! a value without a symbolic name comes back as a `kind(<n>)` string so
//! a log line or assertion message is never lost to an unmapped constant.
//!
//! - `signals`: signal numbers, `si_code`, core-dumping signals
//! - `errno`: errno values
//! - `ptrace`: ptrace requests and `PTRACE_EVENT_*` stops
//! - `syscalls`: per-architecture syscall numbers, sigreturn detection
//! - `flags`: `mmap` protection, `shmat` flags, XSAVE components

pub mod errno;
pub mod flags;
pub mod ptrace;
pub mod signals;
pub mod syscalls;

use std::borrow::Cow;

use kmeta_common::SupportedArch;

pub use errno::{errno_name, errno_name_str};
pub use flags::{prot_flags_string, shm_flags_to_mmap_prot, xsave_feature_string};
pub use ptrace::{ptrace_event_name, ptrace_req_name};
pub use signals::{is_coredumping_signal, sicode_name, signal_name};
pub use syscalls::{is_sigreturn, syscall_name, syscall_name_str, syscall_number};

/// Name of a raw architecture tag
#[must_use]
pub fn arch_name(arch: i32) -> Cow<'static, str> {
    match SupportedArch::try_from(arch) {
        Ok(arch) => Cow::Borrowed(arch.name()),
        Err(raw) => Cow::Owned(format!("Unknown architecture {raw}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_names() {
        assert_eq!(arch_name(0), "x86");
        assert_eq!(arch_name(1), "x86_64");
        assert_eq!(arch_name(2), "aarch64");
        assert_eq!(arch_name(3), "Unknown architecture 3");
    }
}
