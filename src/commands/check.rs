//! # Check Command Implementation
//!
//! Validates every view in the tree exactly as saving it would, without
//! writing anything. Definitions that fail to parse are reported too.
//! Exits with an error when any view has problems.

use anyhow::Result;
use clap::Args;

use super::Context;
use viewtree::error::Error;
use viewtree::path;
use viewtree::store::DefinitionStore;
use viewtree::view::{Messages, Views};

/// Validate every view as a save would
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only report views with problems
    #[arg(short, long)]
    pub quiet: bool,
}

/// Outcome of checking one view
#[derive(Debug, PartialEq, Eq)]
pub enum Finding {
    Valid(String),
    Invalid(String, Vec<String>),
}

/// Execute the `check` command.
pub fn execute(args: CheckArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let mut views = context.views(&settings);
    let findings = check_all(&mut views)?;

    let mut failures = 0;
    for finding in &findings {
        match finding {
            Finding::Valid(view_path) => {
                if !args.quiet {
                    println!("{}", context.output.success(view_path));
                }
            }
            Finding::Invalid(view_path, problems) => {
                failures += 1;
                println!("{}", context.output.failure(view_path));
                for problem in problems {
                    println!("    {}", problem);
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} view(s) failed validation", failures, findings.len());
    }
    println!("{} view(s) checked", findings.len());
    Ok(())
}

/// Check every view below the root, parents first
pub fn check_all<S: DefinitionStore>(views: &mut Views<S>) -> Result<Vec<Finding>> {
    let mut paths = Vec::new();
    collect_paths(views, "", &mut paths)?;

    let mut findings = Vec::new();
    for view_path in paths {
        let mut view = match views.load_from_path(&view_path, None) {
            Ok(view) => view,
            Err(e) => {
                findings.push(Finding::Invalid(view_path, vec![e.to_string()]));
                continue;
            }
        };
        let mut messages = Messages::new();
        match views.save(&mut view, &mut messages, true) {
            Ok(_) => findings.push(Finding::Valid(view_path)),
            Err(Error::ValidationFailed { .. }) => {
                let problems = messages
                    .iter()
                    .map(|m| format!("{}: {}", m.field, m.message))
                    .collect();
                findings.push(Finding::Invalid(view_path, problems));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(findings)
}

fn collect_paths<S: DefinitionStore>(
    views: &Views<S>,
    parent: &str,
    paths: &mut Vec<String>,
) -> Result<()> {
    for handle in views.store().child_handles(parent)? {
        let child = path::join(parent, &handle);
        paths.push(child.clone());
        collect_paths(views, &child, paths)?;
    }
    Ok(())
}
