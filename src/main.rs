//! # viewtree CLI
//!
//! Binary entry point for the `viewtree` command-line tool. It parses the
//! command line with `clap`, sets up logging and dispatches to one of the
//! commands. All view and render logic lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
