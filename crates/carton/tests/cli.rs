use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn carton() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_carton"));
    command.env_remove("RUST_LOG").env_remove("CARTON_LOG_FILE");
    command
}

#[test]
fn compress_then_extract() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("a")).unwrap();
    fs::write(dir.path().join("a/b.txt"), "hi").unwrap();

    let status = carton()
        .current_dir(dir.path())
        .args(["compress", "a", "--output", "t.tar.gz"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = carton()
        .current_dir(dir.path())
        .args(["identify", "t.tar.gz"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("tar.gz"));

    let status = carton()
        .current_dir(dir.path())
        .args(["extract", "t.tar.gz", "out"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("out/a/b.txt")).unwrap(),
        "hi"
    );
}

#[test]
fn unsupported_output_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();

    let output = carton()
        .current_dir(dir.path())
        .args(["compress", "a.txt", "-o", "out.rar"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains(".rar"));
    assert!(!dir.path().join("out.rar").exists());
}

#[test]
fn log_file_receives_entries() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    let log = dir.path().join("carton.log");

    let status = carton()
        .current_dir(dir.path())
        .args(["compress", "a.txt", "-o", "a.zip", "--log-level", "debug"])
        .arg("--log-file")
        .arg(&log)
        .status()
        .unwrap();

    assert!(status.success());
    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("a.txt"));
    assert!(contents.contains("completed"));
}

#[test]
fn supported_reports_each_name() {
    let output = carton()
        .args(["supported", "x.tgz", "y.txt"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("x.tgz: supported (.tgz)"));
    assert!(stdout.contains("y.txt: unsupported (.txt)"));
}
