//! Cross-architecture `siginfo_t` translation
//!
//! A tracer running on x86-64 that records a 32-bit tracee gets `siginfo_t`
//! bytes in the tracee's layout. Before they can be replayed or handed to
//! native signal handling code they have to be rewritten into the native
//! layout. Pointer and `long` fields change width between ABIs and the
//! union starts at a different offset, so the record is rebuilt field by
//! field instead of being copied wholesale.

use kmeta_common::{ArchProfile, SigField, SupportedArch, NATIVE_PROFILE};
use log::{debug, trace};

use super::category::Category;
use super::record::SigInfo;
use crate::domain::SigInfoError;

/// Translate raw bytes captured under `arch` into the native layout
///
/// # Errors
/// Returns [`SigInfoError::SizeMismatch`] when `bytes` is not exactly the
/// size of `arch`'s `siginfo_t`. The bytes are not interpreted at all in
/// that case; the capture is either truncated or tagged with the wrong
/// architecture.
pub fn convert_to_native_siginfo(arch: SupportedArch, bytes: &[u8]) -> Result<SigInfo, SigInfoError> {
    translate(arch.profile(), NATIVE_PROFILE, bytes)
}

/// Like [`convert_to_native_siginfo`] for an architecture tag read as a raw
/// integer (e.g. from a trace header)
///
/// # Errors
/// [`SigInfoError::UnknownArch`] for a tag outside [`SupportedArch`], otherwise
/// as [`convert_to_native_siginfo`].
pub fn convert_raw_to_native_siginfo(arch: i32, bytes: &[u8]) -> Result<SigInfo, SigInfoError> {
    let arch = SupportedArch::try_from(arch).map_err(SigInfoError::UnknownArch)?;
    convert_to_native_siginfo(arch, bytes)
}

/// Translate raw bytes laid out per `src` into a record laid out per `dst`
///
/// # Errors
/// [`SigInfoError::SizeMismatch`] when `bytes` does not match `src`.
pub fn translate(
    src: &'static ArchProfile,
    dst: &'static ArchProfile,
    bytes: &[u8],
) -> Result<SigInfo, SigInfoError> {
    let source = SigInfo::from_bytes(src, bytes)?;
    Ok(translate_record(&source, dst))
}

/// Rebuild `source` in the layout of `dst`
///
/// Only the header and the fields of the active union arm are carried over;
/// every other destination byte is zero. When both sides share a layout the
/// record is copied verbatim.
#[must_use]
pub fn translate_record(source: &SigInfo, dst: &'static ArchProfile) -> SigInfo {
    if source.profile() == dst {
        return *source;
    }

    let (signo, errno, code) = (source.signo(), source.errno(), source.code());
    let mut result = SigInfo::new(dst, signo, errno, code);

    let category = source.category();
    debug!(
        "translating siginfo {} -> {}: signo={signo} code={code} arm={}",
        source.arch(),
        dst.arch,
        category.map_or("none", Category::name),
    );

    if let Some(category) = category {
        for &field in category.fields() {
            copy_field(source, &mut result, field);
        }
    }

    result
}

/// Move one field between layouts
///
/// The value is read at the source width and extended to 64 bits (sign- or
/// zero-extension per field kind), then written at the destination width,
/// which keeps only the low-order bytes when the destination is narrower.
fn copy_field(source: &SigInfo, dest: &mut SigInfo, field: SigField) {
    let from = source.profile().slot(field);
    let to = dest.profile().slot(field);
    let value = source.load(from);
    trace!(
        "  {field:?}: {}@{:#x} -> {}@{:#x} value={value:#x}",
        from.width,
        from.offset,
        to.width,
        to.offset
    );
    dest.store(to, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::siginfo::SigFields;
    use kmeta_common::{
        AARCH64_PROFILE, SEGV_MAPERR, SIGSEGV, SIGUSR1, SI_MAX_SIZE, SI_QUEUE, SI_TKILL,
        X86_64_PROFILE, X86_PROFILE,
    };

    #[test]
    fn test_same_layout_is_verbatim_copy() {
        // Codes: SI_USER, SI_QUEUE, SI_TIMER, then signal-selected arms and SI_TKILL
        let headers = [(10, 0), (10, -1), (10, -2), (17, 1), (11, 1), (7, 2), (29, 1), (31, 1), (12, -6)];
        for (signo, code) in headers {
            let mut bytes: Vec<u8> = (0..SI_MAX_SIZE as u8).collect();
            bytes[0..4].copy_from_slice(&i32::to_le_bytes(signo));
            bytes[8..12].copy_from_slice(&i32::to_le_bytes(code));
            let out = translate(&X86_64_PROFILE, &X86_64_PROFILE, &bytes).unwrap();
            assert_eq!(out.as_bytes(), bytes.as_slice(), "signo={signo} code={code}");
        }
    }

    #[test]
    fn test_queued_signal_64_to_32_keeps_low_bits() {
        let mut src = SigInfo::new(&X86_64_PROFILE, SIGUSR1, 0, SI_QUEUE);
        src.set_field(SigField::Pid, 42);
        src.set_field(SigField::Uid, 1000);
        src.set_field(SigField::Sigval, 0x1122_3344_5566_7788);

        let out = translate(&X86_64_PROFILE, &X86_PROFILE, src.as_bytes()).unwrap();
        assert_eq!(out.fields(), SigFields::Rt { pid: 42, uid: 1000, sigval: 0x5566_7788 });
        assert_eq!(&out.as_bytes()[20..24], &[0x88, 0x77, 0x66, 0x55]);
        assert!(out.as_bytes()[24..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fault_32_to_64_zero_extends() {
        let mut src = SigInfo::new(&X86_PROFILE, SIGSEGV, 0, SEGV_MAPERR);
        src.set_field(SigField::Addr, 0xffff_f000);

        let out = translate(&X86_PROFILE, &AARCH64_PROFILE, src.as_bytes()).unwrap();
        assert_eq!(out.read_field(SigField::Addr), 0xffff_f000);
        assert_eq!(&out.as_bytes()[16..24], &[0x00, 0xf0, 0xff, 0xff, 0, 0, 0, 0]);
    }

    #[test]
    fn test_unknown_arm_leaves_payload_zero() {
        let mut bytes = [0xaau8; SI_MAX_SIZE];
        bytes[..12].copy_from_slice(&[10, 0, 0, 0, 0, 0, 0, 0, 0xfa, 0xff, 0xff, 0xff]);
        assert_eq!(i32::from_le_bytes([0xfa, 0xff, 0xff, 0xff]), SI_TKILL);

        let out = translate(&X86_PROFILE, &X86_64_PROFILE, &bytes).unwrap();
        assert_eq!((out.signo(), out.errno(), out.code()), (SIGUSR1, 0, SI_TKILL));
        assert!(out.as_bytes()[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_raw_arch_tag() {
        assert_eq!(
            convert_raw_to_native_siginfo(9, &[0u8; SI_MAX_SIZE]).unwrap_err(),
            SigInfoError::UnknownArch(9)
        );
        let out = convert_raw_to_native_siginfo(0, &[0u8; SI_MAX_SIZE]).unwrap();
        assert_eq!(out.arch(), SupportedArch::NATIVE);
    }
}
