//! Signal numbers and `si_code` values

use std::borrow::Cow;

#[allow(clippy::wildcard_imports)]
use kmeta_common::*;

/// Symbolic name of a signal number
///
/// Realtime signals come out as `SIGRT<n>` with the raw signal number.
#[must_use]
pub fn signal_name(sig: i32) -> Cow<'static, str> {
    if (SIGRTMIN..=SIGRTMAX).contains(&sig) {
        return Cow::Owned(format!("SIGRT{sig}"));
    }
    let name = match sig {
        SIGHUP => "SIGHUP",
        SIGINT => "SIGINT",
        SIGQUIT => "SIGQUIT",
        SIGILL => "SIGILL",
        SIGTRAP => "SIGTRAP",
        SIGABRT => "SIGABRT",
        SIGBUS => "SIGBUS",
        SIGFPE => "SIGFPE",
        SIGKILL => "SIGKILL",
        SIGUSR1 => "SIGUSR1",
        SIGSEGV => "SIGSEGV",
        SIGUSR2 => "SIGUSR2",
        SIGPIPE => "SIGPIPE",
        SIGALRM => "SIGALRM",
        SIGTERM => "SIGTERM",
        SIGSTKFLT => "SIGSTKFLT",
        SIGCHLD => "SIGCHLD",
        SIGCONT => "SIGCONT",
        SIGSTOP => "SIGSTOP",
        SIGTSTP => "SIGTSTP",
        SIGTTIN => "SIGTTIN",
        SIGTTOU => "SIGTTOU",
        SIGURG => "SIGURG",
        SIGXCPU => "SIGXCPU",
        SIGXFSZ => "SIGXFSZ",
        SIGVTALRM => "SIGVTALRM",
        SIGPROF => "SIGPROF",
        SIGWINCH => "SIGWINCH",
        SIGIO => "SIGIO",
        SIGPWR => "SIGPWR",
        SIGSYS => "SIGSYS",
        // Common in assertions on "no pending signal"
        0 => "signal(0)",
        _ => return Cow::Owned(format!("signal({sig})")),
    };
    Cow::Borrowed(name)
}

/// Symbolic name of an `si_code`
///
/// Positive codes are only meaningful together with the signal they were
/// delivered with, so `sig` disambiguates e.g. `SEGV_MAPERR` from
/// `TRAP_BRKPT` (both 1).
#[must_use]
pub fn sicode_name(code: i32, sig: i32) -> Cow<'static, str> {
    let generic = match code {
        SI_USER => Some("SI_USER"),
        SI_KERNEL => Some("SI_KERNEL"),
        SI_QUEUE => Some("SI_QUEUE"),
        SI_TIMER => Some("SI_TIMER"),
        SI_MESGQ => Some("SI_MESGQ"),
        SI_ASYNCIO => Some("SI_ASYNCIO"),
        SI_SIGIO => Some("SI_SIGIO"),
        SI_TKILL => Some("SI_TKILL"),
        SI_DETHREAD => Some("SI_DETHREAD"),
        SI_ASYNCNL => Some("SI_ASYNCNL"),
        _ => None,
    };
    match generic.or_else(|| signal_specific_code(code, sig)) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("sicode({code})")),
    }
}

fn signal_specific_code(code: i32, sig: i32) -> Option<&'static str> {
    let name = match (sig, code) {
        (SIGSEGV, SEGV_MAPERR) => "SEGV_MAPERR",
        (SIGSEGV, SEGV_ACCERR) => "SEGV_ACCERR",
        (SIGSEGV, SEGV_BNDERR) => "SEGV_BNDERR",
        (SIGSEGV, SEGV_PKUERR) => "SEGV_PKUERR",

        (SIGTRAP, TRAP_BRKPT) => "TRAP_BRKPT",
        (SIGTRAP, TRAP_TRACE) => "TRAP_TRACE",
        (SIGTRAP, TRAP_BRANCH) => "TRAP_BRANCH",
        (SIGTRAP, TRAP_HWBKPT) => "TRAP_HWBKPT",

        (SIGILL, ILL_ILLOPC) => "ILL_ILLOPC",
        (SIGILL, ILL_ILLOPN) => "ILL_ILLOPN",
        (SIGILL, ILL_ILLADR) => "ILL_ILLADR",
        (SIGILL, ILL_ILLTRP) => "ILL_ILLTRP",
        (SIGILL, ILL_PRVOPC) => "ILL_PRVOPC",
        (SIGILL, ILL_PRVREG) => "ILL_PRVREG",
        (SIGILL, ILL_COPROC) => "ILL_COPROC",
        (SIGILL, ILL_BADSTK) => "ILL_BADSTK",

        (SIGFPE, FPE_INTDIV) => "FPE_INTDIV",
        (SIGFPE, FPE_INTOVF) => "FPE_INTOVF",
        (SIGFPE, FPE_FLTDIV) => "FPE_FLTDIV",
        (SIGFPE, FPE_FLTOVF) => "FPE_FLTOVF",
        (SIGFPE, FPE_FLTUND) => "FPE_FLTUND",
        (SIGFPE, FPE_FLTRES) => "FPE_FLTRES",
        (SIGFPE, FPE_FLTINV) => "FPE_FLTINV",
        (SIGFPE, FPE_FLTSUB) => "FPE_FLTSUB",

        (SIGBUS, BUS_ADRALN) => "BUS_ADRALN",
        (SIGBUS, BUS_ADRERR) => "BUS_ADRERR",
        (SIGBUS, BUS_OBJERR) => "BUS_OBJERR",
        (SIGBUS, BUS_MCEERR_AR) => "BUS_MCEERR_AR",
        (SIGBUS, BUS_MCEERR_AO) => "BUS_MCEERR_AO",

        (SIGCHLD, CLD_EXITED) => "CLD_EXITED",
        (SIGCHLD, CLD_KILLED) => "CLD_KILLED",
        (SIGCHLD, CLD_DUMPED) => "CLD_DUMPED",
        (SIGCHLD, CLD_TRAPPED) => "CLD_TRAPPED",
        (SIGCHLD, CLD_STOPPED) => "CLD_STOPPED",
        (SIGCHLD, CLD_CONTINUED) => "CLD_CONTINUED",

        (SIGPOLL, POLL_IN) => "POLL_IN",
        (SIGPOLL, POLL_OUT) => "POLL_OUT",
        (SIGPOLL, POLL_MSG) => "POLL_MSG",
        (SIGPOLL, POLL_ERR) => "POLL_ERR",
        (SIGPOLL, POLL_PRI) => "POLL_PRI",
        (SIGPOLL, POLL_HUP) => "POLL_HUP",

        (SIGSYS, SYS_SECCOMP) => "SYS_SECCOMP",
        _ => return None,
    };
    Some(name)
}

/// Whether the default action for `signo` dumps core
#[must_use]
pub fn is_coredumping_signal(signo: i32) -> bool {
    matches!(
        signo,
        SIGQUIT | SIGILL | SIGTRAP | SIGABRT | SIGFPE | SIGSEGV | SIGBUS | SIGSYS | SIGXCPU | SIGXFSZ
    )
}
