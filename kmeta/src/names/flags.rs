//! Flag-word formatting helpers

use libc::{c_int, PROT_EXEC, PROT_READ, PROT_WRITE};

/// `shmat` flags (`linux/shm.h`)
pub const SHM_RDONLY: c_int = 0o10000;
pub const SHM_EXEC: c_int = 0o100000;

/// XSAVE state components and their display names, by bit position
const XSAVE_FEATURES: &[(u32, &str)] = &[
    (0, "x87"),
    (1, "SSE"),
    (2, "AVX"),
    (3, "MPX-BNDREGS"),
    (4, "MPX-BNDCSR"),
    (5, "AVX512-opmask"),
    (6, "AVX512-ZMM_Hi256"),
    (7, "AVX512-Hi16_ZMM"),
    (8, "PT"),
    (9, "PKRU"),
    (13, "HDC"),
];

/// `mmap` protection as an `ls`-style `rwx` triple
///
/// Bits other than read/write/exec are appended in hex, e.g. `r-- (0x1000001)`.
#[must_use]
pub fn prot_flags_string(prot: c_int) -> String {
    let mut out = String::with_capacity(3);
    out.push(if prot & PROT_READ != 0 { 'r' } else { '-' });
    out.push(if prot & PROT_WRITE != 0 { 'w' } else { '-' });
    out.push(if prot & PROT_EXEC != 0 { 'x' } else { '-' });
    if prot & !(PROT_READ | PROT_WRITE | PROT_EXEC) != 0 {
        out.push_str(&format!(" ({prot:#x})"));
    }
    out
}

/// Protection an `shmat` mapping gets for the given `shmflg`
#[must_use]
pub fn shm_flags_to_mmap_prot(flags: c_int) -> c_int {
    let write = if flags & SHM_RDONLY != 0 { 0 } else { PROT_WRITE };
    let exec = if flags & SHM_EXEC != 0 { PROT_EXEC } else { 0 };
    PROT_READ | write | exec
}

/// Space-separated names of the XSAVE components set in `features`
///
/// Unknown bits are ignored; an empty mask gives an empty string.
#[must_use]
pub fn xsave_feature_string(features: u64) -> String {
    XSAVE_FEATURES
        .iter()
        .filter(|&&(bit, _)| features & (1 << bit) != 0)
        .map(|&(_, name)| name)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prot_flags() {
        assert_eq!(prot_flags_string(PROT_READ | PROT_WRITE | PROT_EXEC), "rwx");
        assert_eq!(prot_flags_string(PROT_READ), "r--");
        assert_eq!(prot_flags_string(0), "---");
        assert_eq!(prot_flags_string(PROT_READ | libc::PROT_GROWSDOWN), "r-- (0x1000001)");
    }

    #[test]
    fn test_shm_flags() {
        assert_eq!(shm_flags_to_mmap_prot(0), PROT_READ | PROT_WRITE);
        assert_eq!(shm_flags_to_mmap_prot(SHM_RDONLY), PROT_READ);
        assert_eq!(shm_flags_to_mmap_prot(SHM_RDONLY | SHM_EXEC), PROT_READ | PROT_EXEC);
    }

    #[test]
    fn test_xsave_features() {
        assert_eq!(xsave_feature_string(0), "");
        assert_eq!(xsave_feature_string(0x7), "x87 SSE AVX");
        assert_eq!(xsave_feature_string(0x2e7), "x87 SSE AVX AVX512-opmask AVX512-ZMM_Hi256 AVX512-Hi16_ZMM PKRU");
        assert_eq!(xsave_feature_string(0x2000 | 0x400), "HDC");
    }
}
