use serde::Serialize;
use std::io::Write;

use crate::domain::{ExportError, SupportedArch};
use crate::names::{errno_name, sicode_name, signal_name};
use crate::siginfo::{Category, SigFields, SigInfo};

/// Header value with its symbolic name
#[derive(Debug, Clone, Serialize)]
pub struct NamedValue {
    pub value: i32,
    pub name: String,
}

/// Self-describing JSON view of one `siginfo_t`
#[derive(Debug, Clone, Serialize)]
pub struct SigInfoReport {
    /// Layout the record is in
    pub arch: SupportedArch,
    pub signo: NamedValue,
    pub errno: NamedValue,
    pub code: NamedValue,
    /// Active union arm, absent when the header selects none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub fields: SigFields,
    /// Raw record bytes, hex encoded
    pub raw: String,
}

impl SigInfoReport {
    #[must_use]
    pub fn new(info: &SigInfo) -> Self {
        let (signo, errno, code) = (info.signo(), info.errno(), info.code());
        Self {
            arch: info.arch(),
            signo: NamedValue { value: signo, name: signal_name(signo).into_owned() },
            errno: NamedValue { value: errno, name: errno_name(errno).into_owned() },
            code: NamedValue { value: code, name: sicode_name(code, signo).into_owned() },
            category: info.category(),
            fields: info.fields(),
            raw: hex_string(info.as_bytes()),
        }
    }

    /// Write the report as pretty-printed JSON
    ///
    /// # Errors
    /// Returns an error if serialization or the underlying write fails.
    pub fn export<W: Write>(&self, mut writer: W) -> Result<(), ExportError> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Lowercase hex without separators
#[must_use]
pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmeta_common::{SigField, SEGV_MAPERR, SIGSEGV, X86_64_PROFILE};

    #[test]
    fn test_report_names_header_fields() {
        let mut info = SigInfo::new(&X86_64_PROFILE, SIGSEGV, 0, SEGV_MAPERR);
        info.set_field(SigField::Addr, 0x1000);
        let report = SigInfoReport::new(&info);

        assert_eq!(report.signo.name, "SIGSEGV");
        assert_eq!(report.errno.name, "SUCCESS");
        assert_eq!(report.code.name, "SEGV_MAPERR");
        assert_eq!(report.category, Some(Category::Fault));
        assert_eq!(report.raw.len(), 256);
    }

    #[test]
    fn test_export_writes_tagged_fields() {
        let mut info = SigInfo::new(&X86_64_PROFILE, SIGSEGV, 0, SEGV_MAPERR);
        info.set_field(SigField::Addr, 0x1000);

        let mut buffer = Vec::new();
        SigInfoReport::new(&info).export(&mut buffer).expect("Failed to export report");

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).expect("Invalid JSON");
        assert_eq!(parsed["arch"], "x86_64");
        assert_eq!(parsed["category"], "fault");
        assert_eq!(parsed["fields"]["kind"], "fault");
        assert_eq!(parsed["fields"]["addr"], 0x1000);
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(hex_string(&[0x00, 0xab, 0x10]), "00ab10");
        assert_eq!(hex_string(&[]), "");
    }
}
