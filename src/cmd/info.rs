use std::path::PathBuf;

use mbclog::mbc::{LogFile, Node, PackKind, Result, Value};

use crate::cmd::util::{LimitArgs, render_value};

const HEADER_KEYS: [&str; 5] = ["text", "mbc_id", "serial_number", "server_version", "format_version"];

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub limits: LimitArgs,
}

/// Print header banner fields and a per-pack summary.
pub fn run(args: Args) -> Result<()> {
	let Args { path, limits } = args;

	let log = LogFile::open(&path)?;
	let (header, packs) = log.read_file(&limits.decode_options())?;

	println!("path: {}", path.display());
	println!("bytes: {}", log.bytes().len());
	for key in HEADER_KEYS {
		if let Some(value) = header.get(key) {
			println!("{key}: {}", render_value(value));
		}
	}
	if let Some(timestamp) = timestamp_label(&header) {
		println!("timestamp: {timestamp}");
	}

	println!("pack_count: {}", packs.len());
	for (idx, pack) in packs.iter().enumerate() {
		println!("  {idx}: {}", pack_label(pack));
	}

	Ok(())
}

fn pack_label(pack: &Node) -> String {
	let kind = match pack.get("type") {
		Some(Value::U8(tag)) => PackKind::from_tag(*tag).map_or("unknown", PackKind::as_str),
		_ => "unknown",
	};
	match pack.get("data").and_then(Value::as_nodes) {
		Some(records) => format!("{kind} keys={} records={}", pack.len(), records.len()),
		None => format!("{kind} keys={}", pack.len()),
	}
}

fn timestamp_label(header: &Node) -> Option<String> {
	let part = |key: &str| match header.get(key)? {
		Value::U8(v) => Some(u16::from(*v)),
		Value::U16(v) => Some(*v),
		_ => None,
	};
	Some(format!(
		"{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
		part("timestamp_year")?,
		part("timestamp_month")?,
		part("timestamp_day")?,
		part("timestamp_hour")?,
		part("timestamp_minute")?,
		part("timestamp_second")?
	))
}
