//! # Render Command Implementation
//!
//! Resolves a URL path to a view and renders it with the producers declared
//! in the settings file and the bundled token engine.
//!
//! - `-p key=value` adds a render parameter. Repeating a key builds a list.
//! - `-r key=value` adds a request field, which events use to decide
//!   whether they trigger.
//! - `--document` prints the composite document instead of the rendered
//!   output.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use log::{debug, info};

use super::{not_found_hint, parse_pairs, Context};
use viewtree::params::ParamValue;
use viewtree::phases::Renderer;
use viewtree::producer::{ProducerRegistry, RequestData};
use viewtree::template::TokenEngine;

/// Render the view a URL path resolves to
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// URL path, e.g. /blog/articles/2024/
    pub url: String,

    /// Render parameter as key=value (repeatable)
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Request field as key=value (repeatable)
    #[arg(short = 'r', long = "request", value_name = "KEY=VALUE")]
    pub request: Vec<String>,

    /// Print the composite document instead of the rendered output
    #[arg(long)]
    pub document: bool,
}

/// Execute the `render` command.
pub fn execute(args: RenderArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let views = context.views(&settings);
    let mut view = views
        .load_from_url(&args.url)
        .map_err(|e| not_found_hint(e, &args.url, &settings))?;

    let mut params = view.parameters().clone();
    for (key, values) in group_values(parse_pairs(&args.params)?) {
        params.set(key, values);
    }
    let request: RequestData = parse_pairs(&args.request)?.into_iter().collect();

    let registry = ProducerRegistry::from_settings(&settings);
    let mut engine = TokenEngine::new()?;
    let mut renderer = Renderer::new(&registry, &mut engine).with_request(request);
    if settings.workspace.is_dir() {
        renderer = renderer.with_workspace(&settings.workspace);
    } else {
        debug!(
            "workspace {} does not exist, transforming in place",
            settings.workspace.display()
        );
    }

    let mut stdout = std::io::stdout();
    if args.document {
        let document = renderer.compose(&view, &mut params)?;
        writeln!(stdout, "{}", document.to_xml()?)?;
        return Ok(());
    }

    let rendered = renderer.render(&mut view, &mut params, None)?;
    info!(
        "rendered {} ({}, {} bytes)",
        view.path(),
        rendered.content_type,
        rendered.body.len()
    );
    stdout.write_all(&rendered.body)?;
    writeln!(stdout)?;
    Ok(())
}

/// Collapse repeated keys into one value, keeping first-seen key order
fn group_values(pairs: Vec<(String, String)>) -> Vec<(String, ParamValue)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in pairs {
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key, vec![value])),
        }
    }
    grouped
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                ParamValue::Scalar(values.remove(0))
            } else {
                ParamValue::Sequence(values)
            };
            (key, value)
        })
        .collect()
}
