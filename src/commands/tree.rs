//! # Tree Command Implementation
//!
//! Displays the view tree with `ptree`, one line per view showing its
//! handle and title. `--depth` limits how many levels are shown.

use std::borrow::Cow;

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use super::Context;
use viewtree::store::DefinitionStore;
use viewtree::view::{View, Views};

/// Display the view tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Maximum depth to display. 0 shows only the top-level views.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, context: &Context) -> Result<()> {
    let settings = context.settings()?;
    let views = context.views(&settings);
    let max_depth = args.depth.unwrap_or(usize::MAX);

    let mut root = TreeNode {
        label: settings.views.display().to_string(),
        children: Vec::new(),
    };
    for view in views.roots()? {
        root.children.push(build_tree_node(&views, view?, max_depth, 0)?);
    }
    print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

fn build_tree_node<S: DefinitionStore>(
    views: &Views<S>,
    view: View,
    max_depth: usize,
    depth: usize,
) -> Result<TreeNode> {
    let mut node = TreeNode {
        label: format!("{} ({})", view.handle(), view.title),
        children: Vec::new(),
    };
    if depth < max_depth {
        for child in views.children(&view)? {
            node.children
                .push(build_tree_node(views, child?, max_depth, depth + 1)?);
        }
    }
    Ok(node)
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
