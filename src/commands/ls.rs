//! # Ls Command Implementation
//!
//! Lists the views in the tree, parents before children.
//!
//! - `--type TAG` keeps views carrying a type tag
//! - `--pattern GLOB` keeps views whose path matches
//! - `--long` adds the title, types and guid of each view
//!
//! This command is read-only.

use anyhow::Result;
use clap::Args;

use super::Context;
use viewtree::suggestions;
use viewtree::view::View;

/// List views
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Only views carrying this type tag
    #[arg(short = 't', long = "type", value_name = "TAG")]
    pub tag: Option<String>,

    /// Filter view paths by glob pattern (e.g. "blog/*")
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Show title, types and guid
    #[arg(short, long)]
    pub long: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let views = context.views(&settings);
    let mut found = views.all()?;

    if let Some(tag) = &args.tag {
        found.retain(|view| view.has_type(tag));
    }
    if let Some(pattern) = &args.pattern {
        let glob_pattern =
            glob::Pattern::new(pattern).map_err(|e| suggestions::invalid_glob(pattern, &e))?;
        found.retain(|view| glob_pattern.matches(view.path()));
    }

    if found.is_empty() {
        println!("No views found.");
        return Ok(());
    }
    for view in &found {
        println!("{}", format_line(view, args.long, context));
    }
    Ok(())
}

fn format_line(view: &View, long: bool, context: &Context) -> String {
    if !long {
        return view.path().to_string();
    }
    let types = if view.types.is_empty() {
        String::new()
    } else {
        format!(" [{}]", view.types.join(", "))
    };
    format!(
        "{}  {}{}  {}",
        view.path(),
        view.title,
        types,
        context.output.dim(view.guid().unwrap_or("-"))
    )
}
