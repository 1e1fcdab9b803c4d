use std::path::Path;
use std::process::{Command, Output};

/// Runs the binary with its config directory redirected to `home`.
fn autolaunch(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_autolaunch"))
        .args(args)
        .env("AUTOLAUNCH_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute autolaunch")
}

/// JSON string literal for a path, escaping Windows separators.
fn json_path(path: &Path) -> String {
    format!("\"{}\"", path.display().to_string().replace('\\', "\\\\"))
}

fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("programs.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn help_exits_successfully() {
    // Arrange
    let home = tempfile::tempdir().unwrap();

    // Act
    let output = autolaunch(home.path(), &["--help"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("when your session starts"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let home = tempfile::tempdir().unwrap();

    // Act
    let output = autolaunch(home.path(), &["--version"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("autolaunch"));
}

#[test]
fn run_with_missing_config_fails() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.json");

    // Act
    let output = autolaunch(home.path(), &["run", "--config", missing.to_str().unwrap()]);

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"));
}

#[test]
fn run_with_malformed_config_fails() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let config = write_config(home.path(), "[{\"Name\": ");

    // Act
    let output = autolaunch(home.path(), &["run", "--config", config.to_str().unwrap()]);

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed JSON"));
}

#[test]
fn run_continues_after_failed_entry_and_exits_zero() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("missing-program");
    let good = Path::new(env!("CARGO_BIN_EXE_autolaunch"));
    let json = format!(
        r#"[
            {{"Name": "Bad", "Path": {}}},
            {{"Name": "Good", "Path": {}, "Args": ["--version"]}}
        ]"#,
        json_path(&missing),
        json_path(good)
    );
    let config = write_config(home.path(), &json);

    // Act
    let output = autolaunch(home.path(), &["run", "--config", config.to_str().unwrap()]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to start 'Bad'"));
    assert!(stdout.contains("Started 'Good'"));
    assert!(stdout.contains("1 started, 1 failed, 0 skipped"));
}

#[test]
fn run_skips_disabled_entries() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let config = write_config(
        home.path(),
        r#"{"Delay": 30, "Programs": [{"Name": "Off", "Path": "/nowhere", "Enabled": false}]}"#,
    );

    // Act
    let output = autolaunch(home.path(), &["run", "--config", config.to_str().unwrap()]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("'Off' is disabled, skipping"));
    assert!(stdout.contains("0 started, 0 failed, 1 skipped"));
}

#[test]
fn run_uses_config_from_home_by_default() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.json"), "[]").unwrap();

    // Act
    let output = autolaunch(home.path(), &["run"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No programs configured"));
}

#[test]
fn invalid_delay_is_reported_by_check() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let config = write_config(
        home.path(),
        r#"[{"Name": "A", "Path": "/bin/a", "Delay": -5}]"#,
    );

    // Act
    let output = autolaunch(home.path(), &["check", "--config", config.to_str().unwrap()]);

    // Assert
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("invalid delay"));
}

#[test]
fn check_lists_entries_and_warns_about_duplicates() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let config = write_config(
        home.path(),
        r#"[
            {"Name": "Same", "Path": "relative-tool"},
            {"Name": "Same", "Path": "relative-tool", "Enabled": false}
        ]"#,
    );

    // Act
    let output = autolaunch(home.path(), &["check", "--config", config.to_str().unwrap()]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("is valid (2 program(s))"));
    assert!(stdout.contains("name 'Same' is used more than once"));
}

#[test]
fn init_creates_starter_files_once() {
    // Arrange
    let home = tempfile::tempdir().unwrap();

    // Act
    let first = autolaunch(home.path(), &["init"]);
    let second = autolaunch(home.path(), &["init"]);

    // Assert
    assert!(first.status.success());
    assert!(home.path().join("config.json").is_file());
    assert!(home.path().join("settings.toml").is_file());
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("Already exists"));
}

#[cfg(target_os = "linux")]
#[test]
fn register_status_and_uninstall_round_trip() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_autolaunch"))
            .args(args)
            .env("AUTOLAUNCH_HOME", home.path())
            .env("XDG_CONFIG_HOME", xdg.path())
            .output()
            .expect("failed to execute autolaunch")
    };

    // Act
    let register = run(&["register"]);
    let status = run(&["status"]);
    let uninstall = run(&["uninstall"]);
    let uninstall_again = run(&["uninstall"]);
    let status_after = run(&["status"]);

    // Assert
    assert!(register.status.success());
    assert!(String::from_utf8_lossy(&status.stdout).contains("Autostart is registered."));
    assert!(uninstall.status.success());
    assert!(uninstall_again.status.success());
    assert!(String::from_utf8_lossy(&uninstall_again.stdout).contains("Nothing to remove"));
    assert!(String::from_utf8_lossy(&status_after.stdout).contains("not registered"));
    assert!(!xdg.path().join("autostart/autolaunch.desktop").exists());
}

#[cfg(target_os = "linux")]
#[test]
fn register_records_program_list_from_relocated_home() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.json"), "[]").unwrap();
    let run = |args: &[&str]| {
        Command::new(env!("CARGO_BIN_EXE_autolaunch"))
            .args(args)
            .env("AUTOLAUNCH_HOME", home.path())
            .env("XDG_CONFIG_HOME", xdg.path())
            .output()
            .expect("failed to execute autolaunch")
    };

    // Act
    let register = run(&["register"]);
    let status = run(&["status"]);

    // Assert
    assert!(register.status.success());
    let expected = format!(
        "--config \"{}\"",
        home.path().join("config.json").display()
    );
    let stdout = String::from_utf8_lossy(&status.stdout);
    assert!(stdout.contains(&expected), "status output: {stdout}");
}

#[cfg(target_os = "linux")]
#[test]
fn register_fails_when_autostart_store_cannot_be_written() {
    // Arrange
    let home = tempfile::tempdir().unwrap();
    let not_a_dir = home.path().join("xdg-file");
    std::fs::write(&not_a_dir, "").unwrap();

    // Act
    let output = Command::new(env!("CARGO_BIN_EXE_autolaunch"))
        .arg("register")
        .env("AUTOLAUNCH_HOME", home.path())
        .env("XDG_CONFIG_HOME", &not_a_dir)
        .output()
        .expect("failed to execute autolaunch");

    // Assert
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
}
