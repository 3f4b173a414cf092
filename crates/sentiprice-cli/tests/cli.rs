//! Runs the built `sentiprice` binary to check argument handling against
//! the environment.

use std::process::Command;

fn sentiprice() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sentiprice"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_works_with_invalid_config() {
    let output = sentiprice()
        .arg("--help")
        .env("SENTIPRICE_THROTTLE_SECS", "5")
        .output()
        .expect("spawn sentiprice");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run"), "stdout: {stdout}");
}

#[test]
fn run_rejects_invalid_config() {
    let output = sentiprice()
        .args(["run", "--ticker", "ABC", "--dry-run"])
        .env("SENTIPRICE_THROTTLE_SECS", "5")
        .output()
        .expect("spawn sentiprice");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("SENTIPRICE_THROTTLE_SECS"), "stderr: {stderr}");
}
