//! Union-member selection for `_sifields`
//!
//! Which arm of the union the kernel filled in is not stored anywhere in
//! the record. It follows from `si_code` and `si_signo`:
//!
//! - `si_code <= 0`: the code says who sent the signal (`SI_USER`,
//!   `SI_QUEUE`, ...) and picks the arm.
//! - `si_code > 0`: the kernel generated the signal and the arm depends on
//!   the signal number.

use kmeta_common::{
    SigField, SIGBUS, SIGCHLD, SIGFPE, SIGILL, SIGPOLL, SIGSEGV, SIGSYS, SIGTRAP, SI_MESGQ,
    SI_QUEUE, SI_TIMER, SI_USER,
};
use serde::Serialize;

/// Selector for the active `_sifields` arm
///
/// The two sources are kept apart so a code of 0 (`SI_USER`) can never be
/// mistaken for a signal number of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Discriminant {
    /// `si_code <= 0`
    Code(i32),
    /// `si_code > 0`, keyed by `si_signo`
    Signal(i32),
}

/// Compute the discriminant from the two header fields that define it
#[must_use]
pub const fn discriminant(code: i32, signo: i32) -> Discriminant {
    if code <= 0 {
        Discriminant::Code(code)
    } else {
        Discriminant::Signal(signo)
    }
}

/// One arm of the `_sifields` union
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// `_kill`: `SI_USER`
    Kill,
    /// `_rt`: `SI_QUEUE`, `SI_MESGQ`
    Rt,
    /// `_timer`: `SI_TIMER`
    Timer,
    /// `_sigchld`
    Child,
    /// `_sigfault`: SIGILL, SIGFPE, SIGSEGV, SIGBUS, SIGTRAP
    Fault,
    /// `_sigpoll`
    Poll,
    /// `_sigsys`
    Sys,
}

impl Category {
    /// Arm selected by a discriminant, `None` when no arm is defined for it
    #[must_use]
    pub const fn from_discriminant(discriminant: Discriminant) -> Option<Category> {
        match discriminant {
            Discriminant::Code(SI_USER) => Some(Category::Kill),
            Discriminant::Code(SI_QUEUE | SI_MESGQ) => Some(Category::Rt),
            Discriminant::Code(SI_TIMER) => Some(Category::Timer),
            Discriminant::Signal(SIGCHLD) => Some(Category::Child),
            Discriminant::Signal(SIGILL | SIGFPE | SIGSEGV | SIGBUS | SIGTRAP) => {
                Some(Category::Fault)
            }
            Discriminant::Signal(SIGPOLL) => Some(Category::Poll),
            Discriminant::Signal(SIGSYS) => Some(Category::Sys),
            Discriminant::Code(_) | Discriminant::Signal(_) => None,
        }
    }

    /// Shorthand for `from_discriminant(discriminant(code, signo))`
    #[must_use]
    pub const fn select(code: i32, signo: i32) -> Option<Category> {
        Category::from_discriminant(discriminant(code, signo))
    }

    /// Fields that are meaningful for this arm, in copy order
    ///
    /// This is the only place that decides what survives a translation.
    /// Everything not listed here is left zero in the destination.
    #[must_use]
    pub const fn fields(self) -> &'static [SigField] {
        match self {
            Category::Kill => &[SigField::Pid, SigField::Uid],
            Category::Rt => &[SigField::Pid, SigField::Uid, SigField::Sigval],
            Category::Timer => &[SigField::TimerId, SigField::Overrun, SigField::Sigval],
            Category::Child => &[
                SigField::Pid,
                SigField::Uid,
                SigField::Status,
                SigField::Utime,
                SigField::Stime,
            ],
            Category::Fault => &[
                SigField::Addr,
                SigField::AddrLsb,
                SigField::LowerBound,
                SigField::UpperBound,
            ],
            Category::Poll => &[SigField::Band, SigField::Fd],
            Category::Sys => &[SigField::CallAddr, SigField::Syscall, SigField::AuditArch],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Kill => "kill",
            Category::Rt => "rt",
            Category::Timer => "timer",
            Category::Child => "child",
            Category::Fault => "fault",
            Category::Poll => "poll",
            Category::Sys => "sys",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmeta_common::{SEGV_MAPERR, SIGKILL, SIGUSR1, SI_KERNEL, SI_TKILL, TRAP_BRKPT};

    #[test]
    fn test_non_positive_code_selects_by_code() {
        assert_eq!(Category::select(SI_USER, SIGUSR1), Some(Category::Kill));
        assert_eq!(Category::select(SI_QUEUE, SIGUSR1), Some(Category::Rt));
        assert_eq!(Category::select(SI_MESGQ, SIGUSR1), Some(Category::Rt));
        assert_eq!(Category::select(SI_TIMER, SIGUSR1), Some(Category::Timer));
        // The signal number is irrelevant once code <= 0
        assert_eq!(Category::select(SI_USER, SIGSEGV), Some(Category::Kill));
        assert_eq!(Category::select(SI_TKILL, SIGSEGV), None);
    }

    #[test]
    fn test_positive_code_selects_by_signal() {
        assert_eq!(Category::select(SEGV_MAPERR, SIGSEGV), Some(Category::Fault));
        assert_eq!(Category::select(TRAP_BRKPT, SIGTRAP), Some(Category::Fault));
        assert_eq!(Category::select(SI_KERNEL, SIGBUS), Some(Category::Fault));
        assert_eq!(Category::select(1, SIGCHLD), Some(Category::Child));
        assert_eq!(Category::select(1, SIGPOLL), Some(Category::Poll));
        assert_eq!(Category::select(1, SIGSYS), Some(Category::Sys));
        assert_eq!(Category::select(SI_KERNEL, SIGKILL), None);
    }

    #[test]
    fn test_signal_zero_is_not_si_user() {
        assert_eq!(discriminant(1, 0), Discriminant::Signal(0));
        assert_eq!(Category::select(1, 0), None);
    }

    #[test]
    fn test_field_tables_have_no_duplicates() {
        for category in [
            Category::Kill,
            Category::Rt,
            Category::Timer,
            Category::Child,
            Category::Fault,
            Category::Poll,
            Category::Sys,
        ] {
            let fields = category.fields();
            for (i, a) in fields.iter().enumerate() {
                assert!(!fields[i + 1..].contains(a), "{} lists {a:?} twice", category.name());
            }
        }
    }
}
