#![allow(missing_docs)]

use std::io::Write;
use std::process::{Command, Output};

use mbclog_testkit::{LogBuilder, XrtBuilder, sample, sample_header, typedef};
use serde_json::Value;
use tempfile::NamedTempFile;

fn write_log(bytes: &[u8]) -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("temp file");
	file.write_all(bytes).expect("fixture written");
	file
}

fn time_series_log() -> NamedTempFile {
	write_log(&time_series_bytes(-1))
}

fn time_series_bytes(count: i32) -> Vec<u8> {
	let xrt = XrtBuilder::new(0x80).var("position", 0, 0).nbytes(4).build();
	sample_header()
		.u8(1)
		.u32(250)
		.u32(10)
		.raw(&xrt)
		.i32(count)
		.raw(&LogBuilder::new().i32(-3).i32(4).build())
		.build()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_mbclog")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"mbclog failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

#[test]
fn dump_json_contains_header_and_time_series() {
	let file = time_series_log();
	let path = file.path().display().to_string();
	let json = run_json(&["dump", &path]);

	assert_eq!(json["header"]["mbc_id"], sample::MBC_ID);
	assert_eq!(json["header"]["fault_counter"], sample::FAULT_COUNTER);

	let pack = &json["packs"][0];
	assert_eq!(pack["type"], 1);
	assert_eq!(pack["sampling_rate"], 250);
	assert_eq!(pack["data"][0]["position"], -3);
	assert_eq!(pack["data"][1]["position"], 4);
	assert_eq!(pack["data"].as_array().map(Vec::len), Some(2));
}

#[test]
fn header_json_skips_packs() {
	let file = time_series_log();
	let path = file.path().display().to_string();
	let json = run_json(&["header", &path, "--json"]);

	assert_eq!(json["serial_number"], sample::SERIAL);
	assert!(json.get("packs").is_none());
}

#[test]
fn info_lists_pack_summary() {
	let file = time_series_log();
	let path = file.path().display().to_string();
	let output = run(&["info", &path]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("pack_count: 1"), "stdout: {stdout}");
	assert!(stdout.contains("0: time_series keys=4 records=2"), "stdout: {stdout}");
	assert!(stdout.contains("timestamp: 2024-05-17 13:45:09"), "stdout: {stdout}");
}

#[test]
fn decode_failure_exits_with_error() {
	let file = write_log(&sample_header().u8(42).build());
	let path = file.path().display().to_string();

	let output = run(&["dump", &path]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("unknown pack type 42"));
}

#[test]
fn missing_argument_is_usage_error() {
	let output = run(&["dump"]);
	assert_eq!(output.status.code(), Some(2));
}

#[test]
fn header_text_lists_value_kinds() {
	let file = time_series_log();
	let path = file.path().display().to_string();
	let output = run(&["header", &path]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains(&format!("mbc_id (string): {}", sample::MBC_ID)), "stdout: {stdout}");
	assert!(stdout.contains("fault_counter (int32): -2"), "stdout: {stdout}");
	assert!(stdout.contains("supervision_state (uint8[]): [1, 0, 2]"), "stdout: {stdout}");
}

#[test]
fn max_records_flag_limits_time_series() {
	let file = time_series_log();
	let path = file.path().display().to_string();
	let output = run(&["dump", &path, "--max-records", "1"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("too many records: count=2, max=1"));
}

#[test]
fn strict_flag_rejects_large_arrays() {
	let xrt = XrtBuilder::new(0x80)
		.type_def(6, 100, &typedef::array(3, &[], 5000))
		.var("samples", 100, 0)
		.nbytes(5000)
		.build();
	let file = write_log(&sample_header().u8(0).raw(&xrt).raw(&[0; 5000]).build());
	let path = file.path().display().to_string();

	let json = run_json(&["dump", &path]);
	assert_eq!(json["packs"][0]["samples[4999]"], 0);

	let output = run(&["dump", &path, "--strict"]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("decode array too large: count=5000, max=4096"));
}

#[test]
fn verbosity_flags_control_log_output() {
	let file = write_log(&time_series_bytes(3));
	let path = file.path().display().to_string();

	let output = run(&["dump", &path]);
	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("[WARN"), "stderr: {stderr}");
	assert!(!stderr.contains("[DEBUG"), "stderr: {stderr}");

	let output = run(&["-vv", "dump", &path]);
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("pack 1 (time_series)"), "stderr: {stderr}");

	let output = run(&["--quiet", "dump", &path]);
	assert!(output.status.success());
	assert!(output.stderr.is_empty(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}
