#![forbid(unsafe_code)]
//! # cs_shared CLI
//!
//! Command-line front end for the `cs_shared` crate.
//!
//! ## Example
//! ```bash
//! cargo run --release -- report data/reddit_corpus.json --name "Reddit Corpus"
//! cargo run --release -- switching data/ --export-format csv --out results
//! ```
//!
//! See `--help` for all available options.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::error;

use cs_shared::{ExportFormat, SweepOptions, collect_files, report_file, switching_file};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the corpus summary report (counts, switches, shared tokens, languages)
    Report {
        /// Corpus JSON file or directory of corpus files
        path: String,

        /// Corpus name used in the report title (default: "<File> Corpus")
        #[arg(long)]
        name: Option<String>,

        /// Output directory (default: current directory)
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Test how shared tokens relate to nearby switches and plot relative rates
    Switching {
        /// Corpus JSON file or directory of corpus files
        path: String,

        /// Corpus name used in plot titles (default: capitalized file name)
        #[arg(long)]
        name: Option<String>,

        /// Output directory (default: current directory)
        #[arg(long, default_value = ".")]
        out: PathBuf,

        /// Output format for the results table (txt, csv, tsv, json)
        #[arg(long, default_value = "txt")]
        export_format: ExportFormat,

        /// Largest distance (in tokens) to test
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u64).range(1..))]
        max_gap: u64,

        /// Skip the SVG charts
        #[arg(long, default_value_t = false)]
        no_plots: bool,
    },
}

fn corpus_files(path: &str) -> Vec<PathBuf> {
    let path = Path::new(path);
    if !path.exists() {
        error!("Path not found: {}", path.display());
        process::exit(1);
    }
    let files = collect_files(path);
    if files.is_empty() {
        error!("No corpus files under {}", path.display());
        process::exit(1);
    }
    files
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut any_errors = false;
    match cli.command {
        Command::Report { path, name, out } => {
            for file in corpus_files(&path) {
                match report_file(&file, name.as_deref(), &out) {
                    Ok(written) => println!("{}", written.display()),
                    Err(e) => {
                        error!("Error analyzing {}: {}", file.display(), e);
                        any_errors = true;
                    }
                }
            }
        }
        Command::Switching {
            path,
            name,
            out,
            export_format,
            max_gap,
            no_plots,
        } => {
            let options = SweepOptions {
                max_gap: max_gap as usize,
                export_format,
                plots: !no_plots,
            };
            for file in corpus_files(&path) {
                match switching_file(&file, name.as_deref(), &out, &options) {
                    Ok(output) => {
                        println!("{}", output.table.display());
                        for plot in &output.plots {
                            println!("{}", plot.display());
                        }
                    }
                    Err(e) => {
                        error!("Error analyzing {}: {}", file.display(), e);
                        any_errors = true;
                    }
                }
            }
        }
    }
    if any_errors {
        process::exit(1);
    }
}
