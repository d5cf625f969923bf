//! Command-line behavior that does not need a terminal.

use std::process::Command;

fn kiln() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kiln"))
}

#[test]
fn version_flag() {
    let out = kiln().arg("--version").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("kiln "), "{stdout}");
}

#[test]
fn unreadable_config_exits_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let out = kiln()
        .current_dir(dir.path())
        .args(["--config", "missing.toml"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.starts_with("kiln: cannot read config file missing.toml"),
        "{stderr}"
    );
    assert!(dir.path().join("kiln.log").exists());
}

#[test]
fn invalid_config_exits_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[editor]\ntab_stop = \"x\"\n").unwrap();
    let out = kiln()
        .current_dir(dir.path())
        .args(["--config", "bad.toml"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid config file bad.toml"));
}
