#![allow(missing_docs)]

use std::io::Write;

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "mbclog", version, about = "MBC motion-controller log decoder")]
struct Cli {
	/// Verbosity level (repeat for more: -v, -vv, -vvv).
	#[arg(short, long, global = true, action = ArgAction::Count)]
	verbose: u8,
	/// Only log errors.
	#[arg(short, long, global = true)]
	quiet: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the file header.
	Header(cmd::header::Args),
	/// Decode the whole file as JSON.
	Dump(cmd::dump::Args),
	/// Summarise header and packs.
	Info(cmd::info::Args),
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> mbclog::mbc::Result<()> {
	match command {
		Commands::Header(args) => cmd::header::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Info(args) => cmd::info::run(args),
	}
}

fn init_logging(verbose: u8, quiet: bool) {
	let level = if quiet {
		LevelFilter::Error
	} else {
		match verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	};

	env_logger::Builder::new()
		.filter_level(level)
		.format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()))
		.init();
}
