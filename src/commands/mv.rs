//! # Mv Command Implementation
//!
//! Moves a view, with everything beneath it, to a new path. The
//! configuration file, the template and the directory are renamed in turn;
//! an interrupted move can leave the tree half moved.

use anyhow::Result;
use clap::Args;

use super::{not_found_hint, Context};

/// Move a view and its subtree
#[derive(Args, Debug)]
pub struct MvArgs {
    /// Current view path, e.g. blog/tags
    pub from: String,

    /// New view path, e.g. topics
    pub to: String,
}

/// Execute the `mv` command.
pub fn execute(args: MvArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let mut views = context.views(&settings);
    let mut view = views
        .load_from_path(&args.from, None)
        .map_err(|e| not_found_hint(e, &args.from, &settings))?;

    let from = view.path().to_string();
    views.move_view(&mut view, &args.to)?;
    println!(
        "{}",
        context
            .output
            .success(&format!("moved {} to {}", from, view.path()))
    );
    Ok(())
}
