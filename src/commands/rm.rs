//! # Rm Command Implementation
//!
//! Deletes a view. Its children move up one level unless `--cascade` is
//! given, in which case they are deleted too.

use anyhow::Result;
use clap::Args;

use super::{not_found_hint, Context};

/// Delete a view
#[derive(Args, Debug)]
pub struct RmArgs {
    /// View path, e.g. blog/tags
    pub path: String,

    /// Delete the view's children as well
    #[arg(long)]
    pub cascade: bool,
}

/// Execute the `rm` command.
pub fn execute(args: RmArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let mut views = context.views(&settings);
    views
        .delete(&args.path, args.cascade)
        .map_err(|e| not_found_hint(e, &args.path, &settings))?;

    let message = if args.cascade {
        format!("deleted {} and its children", args.path)
    } else {
        format!("deleted {}", args.path)
    };
    println!("{}", context.output.success(&message));
    Ok(())
}
