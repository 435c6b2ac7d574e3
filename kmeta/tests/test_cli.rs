use std::io::Write;
use std::process::{Command, Output};

fn kmeta(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kmeta"))
        .args(args)
        .output()
        .expect("Failed to run kmeta")
}

/// x86 SIGSEGV/SEGV_MAPERR at 0x1000 as a hex dump
fn x86_fault_hex() -> String {
    let mut bytes = vec![0u8; 128];
    bytes[0..4].copy_from_slice(&11i32.to_le_bytes());
    bytes[8..12].copy_from_slice(&1i32.to_le_bytes());
    bytes[12..16].copy_from_slice(&0x1000u32.to_le_bytes());
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn test_convert_json_from_hex() {
    let hex = x86_fault_hex();
    let output = kmeta(&["convert", "--arch", "x86", "--hex", &hex, "--json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json_str = String::from_utf8(output.stdout).expect("Invalid UTF-8");
    let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("Invalid JSON");
    assert_eq!(parsed["signo"]["name"], "SIGSEGV");
    assert_eq!(parsed["code"]["name"], "SEGV_MAPERR");
    assert_eq!(parsed["category"], "fault");
    assert_eq!(parsed["fields"]["addr"], 0x1000);
}

#[test]
fn test_convert_from_file_with_export() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("siginfo.bin");
    let report = dir.path().join("report.json");

    let mut bytes = vec![0u8; 128];
    bytes[0..4].copy_from_slice(&10i32.to_le_bytes());
    bytes[12..16].copy_from_slice(&4321i32.to_le_bytes());
    std::fs::File::create(&input)
        .and_then(|mut f| f.write_all(&bytes))
        .expect("Failed to write input");

    let output = kmeta(&[
        "convert",
        "--arch",
        "x86",
        "--input",
        input.to_str().expect("utf-8 path"),
        "--export",
        report.to_str().expect("utf-8 path"),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let summary = String::from_utf8_lossy(&output.stdout);
    assert!(summary.contains("SIGUSR1"));
    assert!(summary.contains("category: kill"));

    let exported = std::fs::read_to_string(&report).expect("Report not written");
    let parsed: serde_json::Value = serde_json::from_str(&exported).expect("Invalid JSON");
    assert_eq!(parsed["fields"]["kind"], "kill");
    assert_eq!(parsed["fields"]["pid"], 4321);
}

#[test]
fn test_convert_rejects_truncated_record() {
    let output = kmeta(&["convert", "--arch", "x86_64", "--hex", "0b000000"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must be 128 bytes, got 4"));
}

#[test]
fn test_convert_rejects_bad_hex() {
    let output = kmeta(&["convert", "--arch", "x86", "--hex", "zz"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_name_lookups() {
    let cases: &[(&[&str], &str)] = &[
        (&["name", "syscall", "59", "--arch", "x86_64"], "execve"),
        (&["name", "syscall", "execve", "--arch", "x86"], "11"),
        (&["name", "signal", "0"], "signal(0)"),
        (&["name", "errno", "0"], "SUCCESS"),
        (&["name", "sicode", "-6", "--sig", "10"], "SI_TKILL"),
        (&["name", "ptrace-request", "0x4206"], "PTRACE_SEIZE"),
        (&["name", "arch", "5"], "Unknown architecture 5"),
        (&["name", "prot", "7"], "rwx"),
        (&["name", "xsave", "0x7"], "x87 SSE AVX"),
    ];
    for (args, expected) in cases {
        let output = kmeta(args);
        assert!(output.status.success(), "{args:?}: {}", String::from_utf8_lossy(&output.stderr));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), *expected, "{args:?}");
    }
}

#[test]
fn test_name_rejects_non_numeric_value() {
    let output = kmeta(&["name", "signal", "SIGSEGV"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    let output = kmeta(&[]);
    assert_eq!(output.status.code(), Some(2));
}
