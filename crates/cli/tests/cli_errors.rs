//! Failures the CLI reports before (or instead of) driving a browser.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

fn run(config: &Path, args: &[&str]) -> (i32, Value, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_cafe"))
		.arg("--config")
		.arg(config)
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to execute cafe");

	let stdout = String::from_utf8_lossy(&output.stdout).to_string();
	let stderr = String::from_utf8_lossy(&output.stderr).to_string();
	let parsed = serde_json::from_str::<Value>(&stdout).unwrap_or_else(|_| serde_json::json!({ "raw": stdout }));
	(output.status.code().unwrap_or(-1), parsed, stderr)
}

fn empty_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
	let path = dir.path().join("config.json");
	std::fs::write(&path, "{}").unwrap();
	path
}

#[test]
fn blank_target_is_rejected_before_launch() {
	let dir = tempfile::tempdir().unwrap();
	let (code, json, stderr) = run(&empty_config(&dir), &["send", "--to", "   ", "--text", "hola"]);

	assert_eq!(code, 1);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "send");
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(stderr.contains("invalid delivery target"), "stderr: {stderr}");
}

#[test]
fn page_commands_need_a_url() {
	let dir = tempfile::tempdir().unwrap();
	let (code, json, _) = run(&empty_config(&dir), &["menu"]);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	let msg = json["error"]["message"].as_str().unwrap_or_default();
	assert!(msg.contains("--url"), "got: {msg}");
}

#[test]
fn unreadable_config_is_reported() {
	let dir = tempfile::tempdir().unwrap();
	let missing = dir.path().join("missing.json");
	let (code, json, _) = run(&missing, &["menu", "--url", "http://localhost:8080"]);

	assert_eq!(code, 1);
	let msg = json["error"]["message"].as_str().unwrap_or_default();
	assert!(msg.contains("failed to read config"), "got: {msg}");
}

#[test]
fn mail_needs_a_sender() {
	let dir = tempfile::tempdir().unwrap();
	let (code, json, _) = run(&empty_config(&dir), &["mail", "--to", "ana@example.com", "--body", "hola"]);

	assert_eq!(code, 1);
	assert_eq!(json["command"], "mail");
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
}

#[test]
fn unreachable_webdriver_is_a_launch_failure() {
	let dir = tempfile::tempdir().unwrap();
	let (code, json, _) = run(
		&empty_config(&dir),
		&["order", "--url", "http://localhost:8080", "--webdriver", "http://127.0.0.1:9", "--index", "0"],
	);

	assert_eq!(code, 1);
	assert_eq!(json["error"]["code"], "BROWSER_LAUNCH_FAILED");
}

#[test]
fn text_format_prints_only_to_stderr() {
	let dir = tempfile::tempdir().unwrap();
	let (code, json, stderr) = run(&empty_config(&dir), &["-f", "text", "menu"]);

	assert_eq!(code, 1);
	assert_eq!(json["raw"], "");
	assert!(stderr.contains("Error [INVALID_INPUT]"));
}
