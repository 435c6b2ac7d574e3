//! # kmeta - Main Entry Point
//!
//! Two subcommands:
//! - **convert** (`--arch <A> --input FILE` or `--hex HEX`): translate a raw
//!   siginfo record to the native layout and print, export, or dump it
//! - **name** (`<KIND> <VALUE>`): print the symbolic name of a kernel constant

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};

use kmeta::cli::{parse_hex, parse_number, Args, Command, NameKind};
use kmeta::domain::{InputError, SigInfoError, SupportedArch};
use kmeta::export::{hex_string, SigInfoReport};
use kmeta::names::{
    arch_name, errno_name, prot_flags_string, ptrace_event_name, ptrace_req_name,
    shm_flags_to_mmap_prot, sicode_name, signal_name, syscall_name, syscall_number,
    xsave_feature_string,
};
use kmeta::siginfo::{convert_to_native_siginfo, SigInfo};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;

fn main() {
    env_logger::init();
    std::process::exit(match run() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            let code = exit_code_for(&e);
            eprintln!("error: {e:#}");
            code
        }
    });
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<InputError>().is_some() {
        EXIT_USAGE
    } else {
        EXIT_ERROR
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Convert { arch, input, hex, json, export, raw } => {
            let arch = SupportedArch::from(arch);
            let bytes = match (input, hex) {
                (Some(path), _) => std::fs::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                (None, Some(text)) => parse_hex(&text)?,
                (None, None) => return Err(InputError::Empty.into()),
            };

            let info = convert_to_native_siginfo(arch, &bytes).inspect_err(|e| {
                if let SigInfoError::SizeMismatch { .. } = e {
                    error!("refusing to interpret siginfo: {e}");
                }
            })?;
            info!("converted {} siginfo to {}", arch, info.arch());

            if let Some(path) = export {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                SigInfoReport::new(&info).export(BufWriter::new(file))?;
                info!("wrote report to {}", path.display());
            }

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                SigInfoReport::new(&info).export(&mut out)?;
            } else if raw {
                writeln!(out, "{}", hex_string(info.as_bytes()))?;
            } else {
                print_summary(&mut out, arch, &info)?;
            }
        }
        Command::Name { kind, value, sig, arch } => {
            let arch = SupportedArch::from(arch);
            println!("{}", resolve_name(kind, &value, sig, arch)?);
        }
    }

    Ok(())
}

/// Human-readable rendering of a converted record
fn print_summary<W: Write>(out: &mut W, source: SupportedArch, info: &SigInfo) -> io::Result<()> {
    let (signo, errno, code) = (info.signo(), info.errno(), info.code());
    writeln!(out, "arch:     {} (from {source})", info.arch())?;
    writeln!(out, "signo:    {signo} ({})", signal_name(signo))?;
    writeln!(out, "errno:    {errno} ({})", errno_name(errno))?;
    writeln!(out, "code:     {code} ({})", sicode_name(code, signo))?;

    match info.category() {
        Some(category) => {
            writeln!(out, "category: {}", category.name())?;
            for &field in category.fields() {
                writeln!(out, "  {:<14}{:#x}", field.name(), info.read_field(field))?;
            }
        }
        None => writeln!(out, "category: none")?,
    }
    Ok(())
}

fn resolve_name(kind: NameKind, value: &str, sig: Option<i32>, arch: SupportedArch) -> Result<String> {
    // Syscalls can be looked up in either direction
    if kind == NameKind::Syscall && parse_number(value).is_err() {
        return syscall_number(arch, value)
            .map(|n| n.to_string())
            .with_context(|| format!("no syscall named {value:?} on {arch}"));
    }

    let number = parse_number(value)?;
    let invalid = || InputError::InvalidNumber(value.to_string());
    let n = || i32::try_from(number).map_err(|_| invalid());
    let name = match kind {
        NameKind::Syscall => syscall_name(arch, n()?).into_owned(),
        NameKind::Signal => signal_name(n()?).into_owned(),
        NameKind::Errno => errno_name(n()?).into_owned(),
        NameKind::Sicode => sicode_name(n()?, sig.unwrap_or(0)).into_owned(),
        NameKind::PtraceEvent => ptrace_event_name(n()?).into_owned(),
        NameKind::PtraceRequest => ptrace_req_name(arch, n()?).into_owned(),
        NameKind::Arch => arch_name(n()?).into_owned(),
        NameKind::Prot => prot_flags_string(n()?),
        NameKind::ShmProt => prot_flags_string(shm_flags_to_mmap_prot(n()?)),
        NameKind::Xsave => xsave_feature_string(u64::try_from(number).map_err(|_| invalid())?),
    };
    Ok(name)
}
