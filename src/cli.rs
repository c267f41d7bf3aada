//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::commands;
use viewtree::defaults::DEFAULT_CONFIG_FILENAME;
use viewtree::output::OutputConfig;

/// viewtree - compose and render views from a view tree
#[derive(Parser, Debug)]
#[command(name = "viewtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Path to the settings file
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        env = "VIEWTREE_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    config: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the view a URL path resolves to
    Render(commands::render::RenderArgs),

    /// List views
    Ls(commands::ls::LsArgs),

    /// Display the view tree
    Tree(commands::tree::TreeArgs),

    /// Validate every view as a save would
    Check(commands::check::CheckArgs),

    /// Move a view and its subtree
    Mv(commands::mv::MvArgs),

    /// Delete a view
    Rm(commands::rm::RmArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // RUST_LOG takes precedence over --log-level
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(self.log_level.as_str()))
            .format_timestamp(None)
            .try_init();

        let context = commands::Context {
            config: self.config,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Render(args) => commands::render::execute(args, &context),
            Commands::Ls(args) => commands::ls::execute(args, &context),
            Commands::Tree(args) => commands::tree::execute(args, &context),
            Commands::Check(args) => commands::check::execute(args, &context),
            Commands::Mv(args) => commands::mv::execute(args, &context),
            Commands::Rm(args) => commands::rm::execute(args, &context),
        }
    }
}
