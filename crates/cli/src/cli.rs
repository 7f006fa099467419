use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "encinfo")]
#[command(about = "Report the declared and detected encoding of files")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Files to inspect
	#[arg(required = true, value_name = "FILES")]
	pub files: Vec<PathBuf>,

	/// Declare this encoding for every file before reporting
	#[arg(long, short = 'e', value_name = "NAME")]
	pub encoding: Option<String>,

	/// Print snapshots as JSON
	#[arg(long)]
	pub json: bool,

	/// Print the encoding menu under each label
	#[arg(long)]
	pub candidates: bool,

	/// Config file (defaults to <config dir>/encinfo/config.toml)
	#[arg(long, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long)]
	pub verbose: bool,
}
