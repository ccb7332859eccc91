use std::path::PathBuf;

use mbclog::mbc::{LogFile, Node, Result};

use crate::cmd::util::{LimitArgs, emit_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub pretty: bool,
	#[command(flatten)]
	pub limits: LimitArgs,
}

#[derive(serde::Serialize)]
struct DumpJson<'a> {
	path: String,
	header: &'a Node,
	packs: &'a [Node],
}

/// Decode the whole file and print it as JSON.
pub fn run(args: Args) -> Result<()> {
	let Args { path, pretty, limits } = args;

	let log = LogFile::open(&path)?;
	let (header, packs) = log.read_file(&limits.decode_options())?;

	let payload = DumpJson {
		path: path.display().to_string(),
		header: &header,
		packs: &packs,
	};
	emit_json(&payload, pretty);
	Ok(())
}
