//! CLI argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::SupportedArch;

#[derive(Parser)]
#[command(
    name = "kmeta",
    about = "Translate siginfo records between architectures and name kernel constants",
    after_help = "\
EXAMPLES:
    kmeta convert --arch x86 --input siginfo.bin        Convert a 32-bit capture to native
    kmeta convert --arch x86_64 --hex 0b000000... --json Decode a hex dump as JSON
    kmeta name syscall 59 --arch x86_64                 Name a syscall number
    kmeta name sicode 1 --sig 11                        Name an si_code for SIGSEGV"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a raw siginfo record to the native layout
    Convert {
        /// Architecture the raw bytes were captured from
        #[arg(short, long, value_enum)]
        arch: ArchArg,

        /// File holding the raw record
        #[arg(short, long, value_name = "FILE", conflicts_with = "hex", required_unless_present = "hex")]
        input: Option<PathBuf>,

        /// Raw record as hex (whitespace ignored)
        #[arg(long, value_name = "HEX")]
        hex: Option<String>,

        /// Print the decoded record as JSON
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,

        /// Print the native bytes as hex
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },

    /// Print the symbolic name of a kernel constant
    Name {
        /// What kind of value to name
        #[arg(value_enum)]
        kind: NameKind,

        /// Decimal, negative decimal, or 0x-prefixed hex
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Signal the si_code belongs to (sicode only)
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        sig: Option<i32>,

        /// Architecture for syscall and ptrace-request lookups
        #[arg(long, value_enum, default_value_t = ArchArg::native())]
        arch: ArchArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Syscall,
    Signal,
    Errno,
    Sicode,
    PtraceEvent,
    PtraceRequest,
    Arch,
    Prot,
    Xsave,
    ShmProt,
}

/// `SupportedArch` as a command-line value
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchArg {
    X86,
    #[value(name = "x86_64", alias = "x86-64")]
    X86_64,
    Aarch64,
}

impl ArchArg {
    #[must_use]
    pub const fn native() -> Self {
        match SupportedArch::NATIVE {
            SupportedArch::X86 => ArchArg::X86,
            SupportedArch::X86_64 => ArchArg::X86_64,
            SupportedArch::Aarch64 => ArchArg::Aarch64,
        }
    }
}

impl From<ArchArg> for SupportedArch {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::X86 => SupportedArch::X86,
            ArchArg::X86_64 => SupportedArch::X86_64,
            ArchArg::Aarch64 => SupportedArch::Aarch64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let args = Args::try_parse_from(["kmeta", "convert", "--arch", "x86", "--hex", "00", "--json"])
            .expect("convert should parse");
        match args.command {
            Command::Convert { arch, hex, json, input, .. } => {
                assert_eq!(SupportedArch::from(arch), SupportedArch::X86);
                assert_eq!(hex.as_deref(), Some("00"));
                assert!(json);
                assert!(input.is_none());
            }
            Command::Name { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_requires_a_source() {
        assert!(Args::try_parse_from(["kmeta", "convert", "--arch", "x86"]).is_err());
        assert!(Args::try_parse_from([
            "kmeta", "convert", "--arch", "x86", "--hex", "00", "--input", "f.bin"
        ])
        .is_err());
    }

    #[test]
    fn test_parse_name_with_negative_value() {
        let args = Args::try_parse_from(["kmeta", "name", "sicode", "-6", "--sig", "10"])
            .expect("name should parse");
        match args.command {
            Command::Name { kind, value, sig, arch } => {
                assert_eq!(kind, NameKind::Sicode);
                assert_eq!(value, "-6");
                assert_eq!(sig, Some(10));
                assert_eq!(arch, ArchArg::native());
            }
            Command::Convert { .. } => panic!("expected name"),
        }
    }

    #[test]
    fn test_arch_names_match() {
        for arch in SupportedArch::ALL {
            let parsed = ArchArg::from_str(arch.name(), false).expect("arch name should parse");
            assert_eq!(SupportedArch::from(parsed), arch);
        }
    }
}
