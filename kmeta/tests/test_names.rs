use kmeta::domain::SupportedArch;
use kmeta::names::{
    arch_name, errno_name, is_sigreturn, ptrace_event_name, ptrace_req_name, sicode_name,
    signal_name, syscall_name, syscall_number,
};

const PROBES: [i32; 10] = [i32::MIN, -4096, -1, 0, 1, 17, 64, 463, 4096, i32::MAX];

#[test]
fn test_resolvers_never_return_empty() {
    for arch in SupportedArch::ALL {
        for value in PROBES {
            assert!(!syscall_name(arch, value).is_empty(), "syscall {value} on {arch}");
            assert!(!ptrace_req_name(arch, value).is_empty(), "ptrace request {value} on {arch}");
        }
    }
    for value in PROBES {
        assert!(!signal_name(value).is_empty());
        assert!(!errno_name(value).is_empty());
        assert!(!sicode_name(value, 11).is_empty());
        assert!(!ptrace_event_name(value).is_empty());
        assert!(!arch_name(value).is_empty());
    }
}

#[test]
fn test_zero_labels() {
    assert_eq!(signal_name(0), "signal(0)");
    assert_eq!(errno_name(0), "SUCCESS");
    assert_eq!(ptrace_event_name(0), "PTRACE_EVENT(0)");
    assert_eq!(sicode_name(0, 11), "SI_USER");
    assert_eq!(arch_name(0), "x86");
    assert_eq!(ptrace_req_name(SupportedArch::Aarch64, 0), "PTRACE_TRACEME");
    assert_eq!(syscall_name(SupportedArch::X86, 0), "restart_syscall");
    assert_eq!(syscall_name(SupportedArch::X86_64, 0), "read");
    assert_eq!(syscall_name(SupportedArch::Aarch64, 0), "io_setup");
}

#[test]
fn test_fallbacks_embed_the_value() {
    assert_eq!(signal_name(-3), "signal(-3)");
    assert_eq!(errno_name(4096), "errno(4096)");
    assert_eq!(sicode_name(77, 11), "sicode(77)");
    assert_eq!(ptrace_req_name(SupportedArch::X86, 0x9999), "PTRACE_REQUEST(39321)");
    assert_eq!(syscall_name(SupportedArch::X86_64, -1), "syscall(-1)");
    assert_eq!(arch_name(-1), "Unknown architecture -1");
}

#[test]
fn test_sicode_depends_on_signal() {
    assert_eq!(sicode_name(1, 11), "SEGV_MAPERR");
    assert_eq!(sicode_name(1, 7), "BUS_ADRALN");
    assert_eq!(sicode_name(1, 17), "CLD_EXITED");
    assert_eq!(sicode_name(-6, 10), "SI_TKILL");
}

#[test]
fn test_syscall_number_inverts_name() {
    for arch in SupportedArch::ALL {
        let openat = syscall_number(arch, "openat").expect("openat exists everywhere");
        assert_eq!(syscall_name(arch, openat), "openat");
        assert_eq!(syscall_number(arch, "pidfd_open"), Some(434));
    }
    assert_eq!(syscall_number(SupportedArch::Aarch64, "fork"), None);
}

#[test]
fn test_sigreturn_detection() {
    assert!(is_sigreturn(15, SupportedArch::X86_64));
    assert!(is_sigreturn(119, SupportedArch::X86));
    assert!(is_sigreturn(173, SupportedArch::X86));
    assert!(is_sigreturn(139, SupportedArch::Aarch64));
    assert!(!is_sigreturn(0, SupportedArch::X86_64));
}
