//! # Mason CLI
//!
//! Interactive terminal front-end for the masonry estimation engine.
//! The whole session runs on one thread: prompts block until the operator
//! answers, and any unexpected failure surfaces as a single message at this
//! boundary.

mod prompt;
mod session;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mason_core::catalog::JsonCatalogStore;
use mason_core::lookup::{GostApiLookup, DEFAULT_API_URL};

use prompt::Prompter;
use session::Session;

#[derive(Parser)]
#[command(name = "mason")]
#[command(about = "Masonry material and mortar estimation for walls.")]
struct CommandLine {
    /// Material catalog file
    #[arg(long, default_value = "materials.json")]
    catalog: PathBuf,

    /// Calculation report file
    #[arg(long, default_value = "calculation_results.txt")]
    report: PathBuf,

    /// Reference-code search endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,
}

fn main() {
    let args = CommandLine::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let store = JsonCatalogStore::new(&args.catalog);
    let lookup = GostApiLookup::new(&args.api_url);

    let stdin = io::stdin();
    let prompter = Prompter::new(stdin.lock(), io::stdout());
    let mut session = Session::new(prompter, &store, &lookup, &args.report);

    if let Err(e) = session.run() {
        eprintln!("\nAn error occurred: {}", e);
        std::process::exit(1);
    }
}
