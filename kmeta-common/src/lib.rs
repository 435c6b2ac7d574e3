//! # Shared Kernel ABI Definitions (tracee ↔ tracer)
//!
//! Defines the architecture tags, `siginfo_t` layout profiles and signal
//! constants shared by everything that has to interpret a signal-information
//! record captured from a traced process. The tracee may run under a
//! different ABI than the tracer (a 32-bit x86 program traced from an
//! x86-64 host, for example), so no type here assumes the host layout.
//!
//! ## Layout Model
//!
//! Every supported profile follows the generic Linux
//! `include/uapi/asm-generic/siginfo.h` shape:
//!
//! ```text
//! 0        4        8        12       16
//! ┌────────┬────────┬────────┬────────┬──────────────────────────────┐
//! │ signo  │ errno  │ code   │ (pad)  │ _sifields union ...          │  64-bit
//! └────────┴────────┴────────┴────────┴──────────────────────────────┘
//! ┌────────┬────────┬────────┬───────────────────────────────────────┐
//! │ signo  │ errno  │ code   │ _sifields union ...                   │  32-bit
//! └────────┴────────┴────────┴───────────────────────────────────────┘
//! ```
//!
//! The union starts at the first word-aligned offset after the header. Its
//! members differ only in which fields are pointer/`long` sized, so a
//! profile is fully described by its word size and total record size.
//!
//! ## Key Types
//!
//! - [`SupportedArch`] - Architecture tag of a traced process
//! - [`ArchProfile`] - Record size and word size for one architecture
//! - [`SigField`] - Logical `_sifields` member, located through [`ArchProfile::slot`]
//! - [`FieldSlot`] - Absolute offset, width and extension rule of one field

#![no_std]

use core::fmt;

// ============================================================================
// Signal Numbers
// ============================================================================
//
// Identical on x86, x86-64 and aarch64.

pub const SIGHUP: i32 = 1;
pub const SIGINT: i32 = 2;
pub const SIGQUIT: i32 = 3;
pub const SIGILL: i32 = 4;
pub const SIGTRAP: i32 = 5;
pub const SIGABRT: i32 = 6;
pub const SIGBUS: i32 = 7;
pub const SIGFPE: i32 = 8;
pub const SIGKILL: i32 = 9;
pub const SIGUSR1: i32 = 10;
pub const SIGSEGV: i32 = 11;
pub const SIGUSR2: i32 = 12;
pub const SIGPIPE: i32 = 13;
pub const SIGALRM: i32 = 14;
pub const SIGTERM: i32 = 15;
pub const SIGSTKFLT: i32 = 16;
pub const SIGCHLD: i32 = 17;
pub const SIGCONT: i32 = 18;
pub const SIGSTOP: i32 = 19;
pub const SIGTSTP: i32 = 20;
pub const SIGTTIN: i32 = 21;
pub const SIGTTOU: i32 = 22;
pub const SIGURG: i32 = 23;
pub const SIGXCPU: i32 = 24;
pub const SIGXFSZ: i32 = 25;
pub const SIGVTALRM: i32 = 26;
pub const SIGPROF: i32 = 27;
pub const SIGWINCH: i32 = 28;
pub const SIGIO: i32 = 29;
pub const SIGPOLL: i32 = SIGIO;
pub const SIGPWR: i32 = 30;
pub const SIGSYS: i32 = 31;

/// First and last realtime signal as the kernel numbers them (signal(7)),
/// not the libc-adjusted `SIGRTMIN`/`SIGRTMAX`.
pub const SIGRTMIN: i32 = 32;
pub const SIGRTMAX: i32 = 64;

// ============================================================================
// si_code Values
// ============================================================================

/// Sent by `kill`, `sigsend`, `raise`
pub const SI_USER: i32 = 0;
/// Sent by the kernel from somewhere
pub const SI_KERNEL: i32 = 0x80;
/// Sent by `sigqueue`
pub const SI_QUEUE: i32 = -1;
/// Sent by timer expiration
pub const SI_TIMER: i32 = -2;
/// Sent by real time message queue state change
pub const SI_MESGQ: i32 = -3;
/// Sent by AIO completion
pub const SI_ASYNCIO: i32 = -4;
/// Sent by queued SIGIO
pub const SI_SIGIO: i32 = -5;
/// Sent by `tkill` / `tgkill`
pub const SI_TKILL: i32 = -6;
/// Sent by `execve` killing subsidiary threads
pub const SI_DETHREAD: i32 = -7;
/// Sent by glibc async name lookup completion
pub const SI_ASYNCNL: i32 = -60;

pub const ILL_ILLOPC: i32 = 1;
pub const ILL_ILLOPN: i32 = 2;
pub const ILL_ILLADR: i32 = 3;
pub const ILL_ILLTRP: i32 = 4;
pub const ILL_PRVOPC: i32 = 5;
pub const ILL_PRVREG: i32 = 6;
pub const ILL_COPROC: i32 = 7;
pub const ILL_BADSTK: i32 = 8;

pub const FPE_INTDIV: i32 = 1;
pub const FPE_INTOVF: i32 = 2;
pub const FPE_FLTDIV: i32 = 3;
pub const FPE_FLTOVF: i32 = 4;
pub const FPE_FLTUND: i32 = 5;
pub const FPE_FLTRES: i32 = 6;
pub const FPE_FLTINV: i32 = 7;
pub const FPE_FLTSUB: i32 = 8;

pub const SEGV_MAPERR: i32 = 1;
pub const SEGV_ACCERR: i32 = 2;
/// Failed address bound checks (MPX); `_addr_bnd` is valid
pub const SEGV_BNDERR: i32 = 3;
/// Protection key violation; `_pkey` overlays the lower bound
pub const SEGV_PKUERR: i32 = 4;

pub const BUS_ADRALN: i32 = 1;
pub const BUS_ADRERR: i32 = 2;
pub const BUS_OBJERR: i32 = 3;
pub const BUS_MCEERR_AR: i32 = 4;
pub const BUS_MCEERR_AO: i32 = 5;

pub const TRAP_BRKPT: i32 = 1;
pub const TRAP_TRACE: i32 = 2;
pub const TRAP_BRANCH: i32 = 3;
pub const TRAP_HWBKPT: i32 = 4;

pub const CLD_EXITED: i32 = 1;
pub const CLD_KILLED: i32 = 2;
pub const CLD_DUMPED: i32 = 3;
pub const CLD_TRAPPED: i32 = 4;
pub const CLD_STOPPED: i32 = 5;
pub const CLD_CONTINUED: i32 = 6;

pub const POLL_IN: i32 = 1;
pub const POLL_OUT: i32 = 2;
pub const POLL_MSG: i32 = 3;
pub const POLL_ERR: i32 = 4;
pub const POLL_PRI: i32 = 5;
pub const POLL_HUP: i32 = 6;

pub const SYS_SECCOMP: i32 = 1;

// ============================================================================
// Architecture Tags
// ============================================================================

/// Machine/ABI a traced process runs under
///
/// The discriminants are stable and match the numbering used in recorded
/// traces, so a raw tag read from disk can be turned back into a variant
/// with `SupportedArch::try_from`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SupportedArch {
    /// 32-bit x86 (i386 ABI)
    #[cfg_attr(feature = "serde", serde(rename = "x86"))]
    X86 = 0,
    /// x86-64 (LP64)
    #[cfg_attr(feature = "serde", serde(rename = "x86_64"))]
    X86_64 = 1,
    /// AArch64 (LP64)
    #[cfg_attr(feature = "serde", serde(rename = "aarch64"))]
    Aarch64 = 2,
}

impl SupportedArch {
    /// Every tag, in discriminant order
    pub const ALL: [SupportedArch; 3] =
        [SupportedArch::X86, SupportedArch::X86_64, SupportedArch::Aarch64];

    /// Architecture of the process this code is compiled into
    #[cfg(target_arch = "x86")]
    pub const NATIVE: SupportedArch = SupportedArch::X86;
    #[cfg(target_arch = "x86_64")]
    pub const NATIVE: SupportedArch = SupportedArch::X86_64;
    #[cfg(target_arch = "aarch64")]
    pub const NATIVE: SupportedArch = SupportedArch::Aarch64;

    /// Canonical lowercase name (`x86`, `x86_64`, `aarch64`)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SupportedArch::X86 => "x86",
            SupportedArch::X86_64 => "x86_64",
            SupportedArch::Aarch64 => "aarch64",
        }
    }

    /// Layout profile for this architecture
    #[must_use]
    pub const fn profile(self) -> &'static ArchProfile {
        match self {
            SupportedArch::X86 => &X86_PROFILE,
            SupportedArch::X86_64 => &X86_64_PROFILE,
            SupportedArch::Aarch64 => &AARCH64_PROFILE,
        }
    }
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!("kmeta-common only supports x86, x86_64 and aarch64 hosts");

impl TryFrom<i32> for SupportedArch {
    type Error = i32;

    fn try_from(raw: i32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(SupportedArch::X86),
            1 => Ok(SupportedArch::X86_64),
            2 => Ok(SupportedArch::Aarch64),
            other => Err(other),
        }
    }
}

impl fmt::Display for SupportedArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// siginfo_t Layout
// ============================================================================

/// `SI_MAX_SIZE`: every supported ABI pads `siginfo_t` to 128 bytes
pub const SI_MAX_SIZE: usize = 128;

/// `si_signo`, `si_errno` and `si_code`, three `int`s on every ABI
pub const SI_HEADER_SIZE: usize = 12;

pub const SI_SIGNO_OFFSET: usize = 0;
pub const SI_ERRNO_OFFSET: usize = 4;
pub const SI_CODE_OFFSET: usize = 8;

/// How a field's value is widened when the destination slot is larger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `short`
    I16,
    /// `int` / `pid_t`
    I32,
    /// `unsigned int` / `uid_t`
    U32,
    /// `void *` / `sigval_t`: zero-extended
    Ptr,
    /// `long` / `clock_t`: sign-extended
    Long,
}

impl FieldKind {
    /// Width in bytes under an ABI with the given word size
    #[must_use]
    pub const fn width(self, word_size: usize) -> usize {
        match self {
            FieldKind::I16 => 2,
            FieldKind::I32 | FieldKind::U32 => 4,
            FieldKind::Ptr | FieldKind::Long => word_size,
        }
    }

    /// Whether widening this kind replicates the top bit
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, FieldKind::I16 | FieldKind::I32 | FieldKind::Long)
    }
}

/// Logical member of the `_sifields` union
///
/// Members shared between union arms (`_kill`, `_rt` and `_sigchld` all
/// begin with pid/uid) are a single variant since they live at the same
/// offset with the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigField {
    /// `si_pid`
    Pid,
    /// `si_uid`
    Uid,
    /// `_timer.si_tid`
    TimerId,
    /// `_timer.si_overrun`
    Overrun,
    /// `si_value` (`_rt` and `_timer`)
    Sigval,
    /// `_sigchld.si_status`
    Status,
    /// `_sigchld.si_utime`
    Utime,
    /// `_sigchld.si_stime`
    Stime,
    /// `_sigfault.si_addr`
    Addr,
    /// `_sigfault.si_addr_lsb`
    AddrLsb,
    /// `_sigfault._addr_bnd._lower`
    LowerBound,
    /// `_sigfault._addr_bnd._upper`
    UpperBound,
    /// `_sigpoll.si_band`
    Band,
    /// `_sigpoll.si_fd`
    Fd,
    /// `_sigsys._call_addr`
    CallAddr,
    /// `_sigsys._syscall`
    Syscall,
    /// `_sigsys._arch` (an `AUDIT_ARCH_*` value)
    AuditArch,
}

impl SigField {
    /// Member name as written in C
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SigField::Pid => "si_pid",
            SigField::Uid => "si_uid",
            SigField::TimerId => "si_tid",
            SigField::Overrun => "si_overrun",
            SigField::Sigval => "si_value",
            SigField::Status => "si_status",
            SigField::Utime => "si_utime",
            SigField::Stime => "si_stime",
            SigField::Addr => "si_addr",
            SigField::AddrLsb => "si_addr_lsb",
            SigField::LowerBound => "si_lower",
            SigField::UpperBound => "si_upper",
            SigField::Band => "si_band",
            SigField::Fd => "si_fd",
            SigField::CallAddr => "si_call_addr",
            SigField::Syscall => "si_syscall",
            SigField::AuditArch => "si_arch",
        }
    }
}

/// Where a field lives inside one architecture's record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    /// Byte offset from the start of `siginfo_t`
    pub offset: usize,
    /// Width in bytes
    pub width: usize,
    pub kind: FieldKind,
}

impl FieldSlot {
    /// One past the last byte of the slot
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.width
    }
}

/// Size and shape of `siginfo_t` under one architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    pub arch: SupportedArch,
    /// `sizeof(siginfo_t)`
    pub siginfo_size: usize,
    /// `sizeof(void *)` == `sizeof(long)`
    pub word_size: usize,
}

pub const X86_PROFILE: ArchProfile =
    ArchProfile { arch: SupportedArch::X86, siginfo_size: SI_MAX_SIZE, word_size: 4 };

pub const X86_64_PROFILE: ArchProfile =
    ArchProfile { arch: SupportedArch::X86_64, siginfo_size: SI_MAX_SIZE, word_size: 8 };

pub const AARCH64_PROFILE: ArchProfile =
    ArchProfile { arch: SupportedArch::Aarch64, siginfo_size: SI_MAX_SIZE, word_size: 8 };

const fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) / align * align
}

impl ArchProfile {
    /// Offset of the `_sifields` union
    #[must_use]
    pub const fn payload_offset(&self) -> usize {
        align_up(SI_HEADER_SIZE, self.word_size)
    }

    /// Locate a `_sifields` member
    ///
    /// Offsets are relative to the union and then rebased onto the record:
    ///
    /// | member                     | offset          |
    /// |----------------------------|-----------------|
    /// | pid, tid, addr, band, call | 0               |
    /// | uid, overrun               | 4               |
    /// | sigval, status             | 8               |
    /// | utime                      | align(12, word) |
    /// | stime                      | utime + word    |
    /// | addr_lsb, fd, syscall      | word            |
    /// | lower                      | 2 * word        |
    /// | upper                      | 3 * word        |
    /// | audit arch                 | word + 4        |
    ///
    /// `_addr_bnd` is preceded by `__ADDR_BND_PKEY_PAD`, which equals the word
    /// size on every supported ABI, hence the `2 * word` for the lower bound.
    #[must_use]
    pub const fn slot(&self, field: SigField) -> FieldSlot {
        let word = self.word_size;
        let (rel, kind) = match field {
            SigField::Pid | SigField::TimerId => (0, FieldKind::I32),
            SigField::Uid => (4, FieldKind::U32),
            SigField::Overrun => (4, FieldKind::I32),
            SigField::Sigval => (8, FieldKind::Ptr),
            SigField::Status => (8, FieldKind::I32),
            SigField::Utime => (align_up(12, word), FieldKind::Long),
            SigField::Stime => (align_up(12, word) + word, FieldKind::Long),
            SigField::Addr | SigField::CallAddr => (0, FieldKind::Ptr),
            SigField::AddrLsb => (word, FieldKind::I16),
            SigField::LowerBound => (2 * word, FieldKind::Ptr),
            SigField::UpperBound => (3 * word, FieldKind::Ptr),
            SigField::Band => (0, FieldKind::Long),
            SigField::Fd | SigField::Syscall => (word, FieldKind::I32),
            SigField::AuditArch => (word + 4, FieldKind::U32),
        };
        FieldSlot { offset: self.payload_offset() + rel, width: kind.width(word), kind }
    }
}

/// Profile of the architecture this code runs on
pub const NATIVE_PROFILE: &ArchProfile = SupportedArch::NATIVE.profile();
