//! `encinfo`: report the declared and detected encoding of files.
//!
//! Each file is opened as the active document of a throwaway host, so the
//! numbers printed here are exactly what an editor status bar would show.

mod cli;
mod config;
mod host;
mod report;

use clap::Parser;
use cli::Cli;
use encinfo_status::StatusOptions;
use report::{ReportOptions, inspect, render_text, validate_encoding};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = config::load(cli.config.as_deref())?;
	if let Some(encoding) = &cli.encoding {
		validate_encoding(encoding)?;
	}
	let options = ReportOptions {
		default_encoding: config.default_encoding,
		encoding: cli.encoding,
		status: StatusOptions {
			warn_confidence: config.warn_confidence,
		},
		show_candidates: cli.candidates || config.show_candidates,
	};

	let reports = cli
		.files
		.iter()
		.zip(1..)
		.map(|(path, id)| inspect(id, path, &options))
		.collect::<anyhow::Result<Vec<_>>>()?;

	if cli.json {
		println!("{}", serde_json::to_string_pretty(&reports)?);
	} else {
		for report in &reports {
			println!("{}", render_text(report));
		}
	}
	Ok(())
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = if verbose {
		EnvFilter::new("encinfo=debug,encinfo_agent=debug,encinfo_charset=debug,warn")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}
