//! Architecture-tagged `siginfo_t` buffer
//!
//! A [`SigInfo`] owns the raw bytes of one record together with the profile
//! that says how to read them. Field access always goes through the profile,
//! so the same logical field can be read from an x86 record and an x86-64
//! record without caring where it lives.

// Field values are carried as u64 bit patterns and narrowed on purpose
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use std::fmt;

use kmeta_common::{
    ArchProfile, FieldSlot, SigField, SupportedArch, SI_CODE_OFFSET, SI_ERRNO_OFFSET, SI_MAX_SIZE,
    SI_SIGNO_OFFSET,
};
use serde::Serialize;

use super::category::{discriminant, Category, Discriminant};
use crate::domain::SigInfoError;

/// Decoded view of the active `_sifields` arm
///
/// Pointer-sized values are reported as `u64` whatever the source width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SigFields {
    Kill { pid: i32, uid: u32 },
    Rt { pid: i32, uid: u32, sigval: u64 },
    Timer { tid: i32, overrun: i32, sigval: u64 },
    Child { pid: i32, uid: u32, status: i32, utime: i64, stime: i64 },
    Fault { addr: u64, addr_lsb: i16, lower: u64, upper: u64 },
    Poll { band: i64, fd: i32 },
    Sys { call_addr: u64, syscall: i32, arch: u32 },
    /// No arm is defined for this `(code, signo)` pair
    None,
}

/// One `siginfo_t` laid out according to `profile`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SigInfo {
    profile: &'static ArchProfile,
    raw: [u8; SI_MAX_SIZE],
}

impl SigInfo {
    /// All-zero record for `profile`
    #[must_use]
    pub fn zeroed(profile: &'static ArchProfile) -> Self {
        Self { profile, raw: [0; SI_MAX_SIZE] }
    }

    /// Record with the given header and an empty payload
    #[must_use]
    pub fn new(profile: &'static ArchProfile, signo: i32, errno: i32, code: i32) -> Self {
        let mut info = Self::zeroed(profile);
        info.set_header(signo, errno, code);
        info
    }

    /// Wrap bytes captured from a process running under `profile`
    ///
    /// # Errors
    /// Returns [`SigInfoError::SizeMismatch`] unless `bytes` is exactly
    /// `profile.siginfo_size` long. Nothing is read in that case.
    pub fn from_bytes(profile: &'static ArchProfile, bytes: &[u8]) -> Result<Self, SigInfoError> {
        let expected = profile.siginfo_size;
        if bytes.len() != expected || expected > SI_MAX_SIZE {
            return Err(SigInfoError::SizeMismatch {
                arch: profile.arch,
                expected,
                actual: bytes.len(),
            });
        }
        let mut info = Self::zeroed(profile);
        info.raw[..expected].copy_from_slice(bytes);
        Ok(info)
    }

    #[must_use]
    pub fn arch(&self) -> SupportedArch {
        self.profile.arch
    }

    #[must_use]
    pub fn profile(&self) -> &'static ArchProfile {
        self.profile
    }

    /// The record exactly as the kernel of `arch()` would lay it out
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw[..self.profile.siginfo_size]
    }

    #[must_use]
    pub fn signo(&self) -> i32 {
        self.read_i32(SI_SIGNO_OFFSET)
    }

    #[must_use]
    pub fn errno(&self) -> i32 {
        self.read_i32(SI_ERRNO_OFFSET)
    }

    #[must_use]
    pub fn code(&self) -> i32 {
        self.read_i32(SI_CODE_OFFSET)
    }

    pub fn set_header(&mut self, signo: i32, errno: i32, code: i32) {
        self.write_i32(SI_SIGNO_OFFSET, signo);
        self.write_i32(SI_ERRNO_OFFSET, errno);
        self.write_i32(SI_CODE_OFFSET, code);
    }

    #[must_use]
    pub fn discriminant(&self) -> Discriminant {
        discriminant(self.code(), self.signo())
    }

    /// Active `_sifields` arm, if the header selects one
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        Category::from_discriminant(self.discriminant())
    }

    /// Read a field, extended to 64 bits according to its kind
    ///
    /// Signed kinds are sign-extended and pointers zero-extended, so the
    /// result does not depend on the width of the slot it came from.
    #[must_use]
    pub fn read_field(&self, field: SigField) -> u64 {
        self.load(self.profile.slot(field))
    }

    /// Store the low-order bytes of `value` into a field
    pub fn set_field(&mut self, field: SigField, value: u64) {
        self.store(self.profile.slot(field), value);
    }

    pub(crate) fn load(&self, slot: FieldSlot) -> u64 {
        let mut buf = [0u8; 8];
        buf[..slot.width].copy_from_slice(&self.raw[slot.offset..slot.end()]);
        let value = u64::from_le_bytes(buf);
        if slot.kind.is_signed() && slot.width < 8 {
            let shift = 64 - 8 * slot.width as u32;
            (((value << shift) as i64) >> shift) as u64
        } else {
            value
        }
    }

    pub(crate) fn store(&mut self, slot: FieldSlot, value: u64) {
        self.raw[slot.offset..slot.end()].copy_from_slice(&value.to_le_bytes()[..slot.width]);
    }

    /// Decode the active arm into a typed value
    #[must_use]
    pub fn fields(&self) -> SigFields {
        let f = |field| self.read_field(field);
        match self.category() {
            Some(Category::Kill) => {
                SigFields::Kill { pid: f(SigField::Pid) as i32, uid: f(SigField::Uid) as u32 }
            }
            Some(Category::Rt) => SigFields::Rt {
                pid: f(SigField::Pid) as i32,
                uid: f(SigField::Uid) as u32,
                sigval: f(SigField::Sigval),
            },
            Some(Category::Timer) => SigFields::Timer {
                tid: f(SigField::TimerId) as i32,
                overrun: f(SigField::Overrun) as i32,
                sigval: f(SigField::Sigval),
            },
            Some(Category::Child) => SigFields::Child {
                pid: f(SigField::Pid) as i32,
                uid: f(SigField::Uid) as u32,
                status: f(SigField::Status) as i32,
                utime: f(SigField::Utime) as i64,
                stime: f(SigField::Stime) as i64,
            },
            Some(Category::Fault) => SigFields::Fault {
                addr: f(SigField::Addr),
                addr_lsb: f(SigField::AddrLsb) as i16,
                lower: f(SigField::LowerBound),
                upper: f(SigField::UpperBound),
            },
            Some(Category::Poll) => {
                SigFields::Poll { band: f(SigField::Band) as i64, fd: f(SigField::Fd) as i32 }
            }
            Some(Category::Sys) => SigFields::Sys {
                call_addr: f(SigField::CallAddr),
                syscall: f(SigField::Syscall) as i32,
                arch: f(SigField::AuditArch) as u32,
            },
            None => SigFields::None,
        }
    }

    /// Reinterpret a native record as the C library's `siginfo_t`
    ///
    /// Returns `None` when the record is laid out for another architecture.
    #[cfg(target_os = "linux")]
    #[must_use]
    pub fn to_libc(&self) -> Option<libc::siginfo_t> {
        if self.arch() != SupportedArch::NATIVE {
            return None;
        }
        // SAFETY: libc::siginfo_t is plain old data of SI_MAX_SIZE bytes
        // (checked below) and every bit pattern is a valid value.
        #[allow(unsafe_code)]
        let info = unsafe { std::ptr::read_unaligned(self.raw.as_ptr().cast::<libc::siginfo_t>()) };
        Some(info)
    }

    fn read_i32(&self, offset: usize) -> i32 {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(&self.raw[offset..offset + 4]);
        i32::from_le_bytes(buf)
    }

    fn write_i32(&mut self, offset: usize, value: i32) {
        self.raw[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

#[cfg(target_os = "linux")]
const _: () = assert!(std::mem::size_of::<libc::siginfo_t>() == SI_MAX_SIZE);

impl fmt::Debug for SigInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigInfo")
            .field("arch", &self.arch())
            .field("signo", &self.signo())
            .field("errno", &self.errno())
            .field("code", &self.code())
            .field("fields", &self.fields())
            .finish()
    }
}
