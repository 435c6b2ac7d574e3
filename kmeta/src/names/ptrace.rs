//! ptrace requests and stop events

use std::borrow::Cow;

use kmeta_common::SupportedArch;

pub const PTRACE_EVENT_FORK: i32 = 1;
pub const PTRACE_EVENT_VFORK: i32 = 2;
pub const PTRACE_EVENT_CLONE: i32 = 3;
pub const PTRACE_EVENT_EXEC: i32 = 4;
pub const PTRACE_EVENT_VFORK_DONE: i32 = 5;
pub const PTRACE_EVENT_EXIT: i32 = 6;
pub const PTRACE_EVENT_SECCOMP: i32 = 7;
/// Value of `PTRACE_EVENT_SECCOMP` on kernels before 3.5
pub const PTRACE_EVENT_SECCOMP_OBSOLETE: i32 = 8;
pub const PTRACE_EVENT_STOP: i32 = 128;

/// Symbolic name of the event in a `PTRACE_EVENT` stop status
#[must_use]
pub fn ptrace_event_name(event: i32) -> Cow<'static, str> {
    let name = match event {
        PTRACE_EVENT_FORK => "PTRACE_EVENT_FORK",
        PTRACE_EVENT_VFORK => "PTRACE_EVENT_VFORK",
        PTRACE_EVENT_CLONE => "PTRACE_EVENT_CLONE",
        PTRACE_EVENT_EXEC => "PTRACE_EVENT_EXEC",
        PTRACE_EVENT_VFORK_DONE => "PTRACE_EVENT_VFORK_DONE",
        PTRACE_EVENT_EXIT => "PTRACE_EVENT_EXIT",
        PTRACE_EVENT_SECCOMP => "PTRACE_EVENT_SECCOMP",
        PTRACE_EVENT_SECCOMP_OBSOLETE => "PTRACE_EVENT_SECCOMP_OBSOLETE",
        PTRACE_EVENT_STOP => "PTRACE_EVENT_STOP",
        // "no event" is what most assertions print
        0 => "PTRACE_EVENT(0)",
        _ => return Cow::Owned(format!("PTRACE_EVENT({event})")),
    };
    Cow::Borrowed(name)
}

/// Requests available on every architecture
const COMMON_REQUESTS: &[(i32, &str)] = &[
    (0, "PTRACE_TRACEME"),
    (1, "PTRACE_PEEKTEXT"),
    (2, "PTRACE_PEEKDATA"),
    (3, "PTRACE_PEEKUSR"),
    (4, "PTRACE_POKETEXT"),
    (5, "PTRACE_POKEDATA"),
    (6, "PTRACE_POKEUSR"),
    (7, "PTRACE_CONT"),
    (8, "PTRACE_KILL"),
    (9, "PTRACE_SINGLESTEP"),
    (16, "PTRACE_ATTACH"),
    (17, "PTRACE_DETACH"),
    (24, "PTRACE_SYSCALL"),
    (31, "PTRACE_SYSEMU"),
    (32, "PTRACE_SYSEMU_SINGLESTEP"),
    (0x4200, "PTRACE_SETOPTIONS"),
    (0x4201, "PTRACE_GETEVENTMSG"),
    (0x4202, "PTRACE_GETSIGINFO"),
    (0x4203, "PTRACE_SETSIGINFO"),
    (0x4204, "PTRACE_GETREGSET"),
    (0x4205, "PTRACE_SETREGSET"),
    (0x4206, "PTRACE_SEIZE"),
    (0x4207, "PTRACE_INTERRUPT"),
    (0x4208, "PTRACE_LISTEN"),
    (0x4209, "PTRACE_PEEKSIGINFO"),
    (0x420a, "PTRACE_GETSIGMASK"),
    (0x420b, "PTRACE_SETSIGMASK"),
    (0x420e, "PTRACE_GET_SYSCALL_INFO"),
];

/// Legacy register requests; aarch64 only has the regset interface
const X86_REQUESTS: &[(i32, &str)] = &[
    (12, "PTRACE_GETREGS"),
    (13, "PTRACE_SETREGS"),
    (14, "PTRACE_GETFPREGS"),
    (15, "PTRACE_SETFPREGS"),
    (18, "PTRACE_GETFPXREGS"),
    (19, "PTRACE_SETFPXREGS"),
];

fn lookup(table: &[(i32, &'static str)], value: i32) -> Option<&'static str> {
    table.iter().find(|&&(v, _)| v == value).map(|&(_, name)| name)
}

/// Symbolic name of a ptrace request as understood by `arch`
///
/// Negative values never name a request.
#[must_use]
pub fn ptrace_req_name(arch: SupportedArch, request: i32) -> Cow<'static, str> {
    let name = if request < 0 {
        None
    } else {
        lookup(COMMON_REQUESTS, request).or_else(|| match arch {
            SupportedArch::X86 | SupportedArch::X86_64 => lookup(X86_REQUESTS, request),
            SupportedArch::Aarch64 => None,
        })
    };
    match name {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("PTRACE_REQUEST({request})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(ptrace_event_name(PTRACE_EVENT_EXEC), "PTRACE_EVENT_EXEC");
        assert_eq!(ptrace_event_name(PTRACE_EVENT_STOP), "PTRACE_EVENT_STOP");
        assert_eq!(ptrace_event_name(0), "PTRACE_EVENT(0)");
        assert_eq!(ptrace_event_name(99), "PTRACE_EVENT(99)");
    }

    #[test]
    fn test_request_names_match_libc() {
        let arch = SupportedArch::X86_64;
        assert_eq!(ptrace_req_name(arch, libc::PTRACE_TRACEME as i32), "PTRACE_TRACEME");
        assert_eq!(ptrace_req_name(arch, libc::PTRACE_SEIZE as i32), "PTRACE_SEIZE");
        assert_eq!(ptrace_req_name(arch, libc::PTRACE_GETSIGINFO as i32), "PTRACE_GETSIGINFO");
    }

    #[test]
    fn test_legacy_regs_are_x86_only() {
        assert_eq!(ptrace_req_name(SupportedArch::X86, 12), "PTRACE_GETREGS");
        assert_eq!(ptrace_req_name(SupportedArch::X86_64, 18), "PTRACE_GETFPXREGS");
        assert_eq!(ptrace_req_name(SupportedArch::Aarch64, 12), "PTRACE_REQUEST(12)");
        assert_eq!(ptrace_req_name(SupportedArch::Aarch64, 0x4204), "PTRACE_GETREGSET");
    }

    #[test]
    fn test_negative_request_falls_back() {
        assert_eq!(ptrace_req_name(SupportedArch::X86, -1), "PTRACE_REQUEST(-1)");
        assert_eq!(ptrace_req_name(SupportedArch::X86, 0), "PTRACE_TRACEME");
    }
}
