//! xapkit - XAPK container packer
//!
//! Packs a directory holding a base APK, OBB expansion files and
//! split-config APKs into a single installable XAPK archive with an
//! embedded JSON manifest.

use clap::Parser;

mod archive;
mod bundle;
mod cli;
mod commands;
mod error;
mod inspect;
mod resolver;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(args, cli.verbose),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error ({}): {}", e.stage(), e);
        std::process::exit(1);
    }
}
