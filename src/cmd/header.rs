use std::path::PathBuf;

use mbclog::mbc::{LogFile, Result};

use crate::cmd::util::{emit_json, render_value};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Decode and print only the file header.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let log = LogFile::open(&path)?;
	let header = log.read_header();

	if json {
		emit_json(&header, false);
		return Ok(());
	}

	println!("path: {}", path.display());
	for (key, value) in header.iter() {
		println!("{key} ({}): {}", value.kind(), render_value(value));
	}
	Ok(())
}
