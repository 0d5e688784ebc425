use serde_json::json;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn write_config(document: &serde_json::Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp config");
    file.write_all(document.to_string().as_bytes())
        .expect("write config");
    file
}

fn vlab(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_vlab"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run vlab")
}

#[test]
fn missing_config_fails_with_one_diagnostic() {
    let output = vlab(&["check", "/nonexistent/vlab-config.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("[VLAB][ERROR]").count(), 1);
    assert!(stderr.contains("vlab-config.json"));
}

#[test]
fn check_lists_registered_widgets() {
    let config = write_config(&json!({
        "widgets": [{ "type": "button", "text": "Go", "row": 0, "column": 0 }]
    }));
    let output = vlab(&["check", config.path().to_str().expect("utf-8 path")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("button (button)"));
}

#[test]
fn check_reports_skipped_entries_without_failing() {
    let config = write_config(&json!({
        "widgets": [
            { "type": "hologram" },
            { "type": "checkbox", "text": "Enable" }
        ]
    }));
    let output = vlab(&["check", config.path().to_str().expect("utf-8 path")]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("checkbox (checkbox)"));
    assert!(stdout.contains("widgets[0]"));
}

#[test]
fn missing_widgets_key_is_fatal() {
    let config = write_config(&json!({ "figure": { "figsize": [4, 3], "dpi": 100 } }));
    let output = vlab(&["check", config.path().to_str().expect("utf-8 path")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'widgets' key is missing"));
}

#[test]
fn headless_run_ticks_the_chart() {
    let config = write_config(&json!({
        "widgets": [],
        "figure": { "figsize": [4, 3], "dpi": 100 },
        "axes": { "xlim": [0, 10], "ylim": [-1, 1] }
    }));
    let output = vlab(&[
        "run",
        config.path().to_str().expect("utf-8 path"),
        "--no-gui",
        "--ticks",
        "2",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 chart ticks, 0 failed"));
}

#[test]
fn headless_run_without_chart_succeeds() {
    let config = write_config(&json!({ "widgets": [] }));
    let output = vlab(&[
        "run",
        config.path().to_str().expect("utf-8 path"),
        "--no-gui",
    ]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No chart configured"));
}
