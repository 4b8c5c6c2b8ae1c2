//! Depth-aligned ASCII diagram of a tree.
//!
//! Each output line is one depth level. A parent label is centered over the
//! combined width of its child blocks, and shallower sibling blocks are
//! padded with filler lines so all blocks merge level by level.
//!
//! ```text
//! _A_
//! B C
//! D _
//! ```

use std::collections::{HashMap, VecDeque};
use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::arena::Tree;
use crate::value::NodeValue;

pub const DEFAULT_FILL: char = '_';

/// Separator between horizontally adjacent child blocks.
const SIBLING_GAP: &str = " ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Padding glyph used for centering labels and for filler lines
    pub fill: char,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self { fill: DEFAULT_FILL }
    }
}

/// Renders `tree` with the default style, lines joined by `\n`.
///
/// An empty tree renders as the empty string.
pub fn render<T: NodeValue>(tree: &Tree<T>) -> String {
    render_with(tree, &RenderStyle::default())
}

pub fn render_with<T: NodeValue>(tree: &Tree<T>, style: &RenderStyle) -> String {
    render_lines(tree, style).join("\n")
}

/// One line per depth level, top to bottom.
///
/// Blocks are composed bottom-up in post-order, so deep trees need no call
/// stack proportional to their depth.
#[instrument(level = "debug", skip(tree))]
pub fn render_lines<T: NodeValue>(tree: &Tree<T>, style: &RenderStyle) -> Vec<String> {
    let mut blocks: HashMap<Index, VecDeque<String>> = HashMap::new();
    for (idx, node) in tree.iter_postorder() {
        let children: Vec<VecDeque<String>> = node
            .children
            .iter()
            .filter_map(|child| blocks.remove(child))
            .collect();
        blocks.insert(idx, compose(node.value.to_string(), children, style));
    }

    tree.root()
        .and_then(|root| blocks.remove(&root))
        .map(Vec::from)
        .unwrap_or_default()
}

/// Puts `label` centered on top of the merged child blocks.
fn compose(
    label: String,
    mut children: Vec<VecDeque<String>>,
    style: &RenderStyle,
) -> VecDeque<String> {
    if children.is_empty() {
        return VecDeque::from([label]);
    }

    let total_width = children.iter().map(first_width).sum::<usize>() + children.len() - 1;
    let pad = fill(style.fill, total_width.saturating_sub(width(&label)) / 2);
    let top = format!("{pad}{label}{pad}");

    let mut lines = if children.len() == 1 {
        children.pop().unwrap_or_default()
    } else {
        let max_depth = children.iter().map(VecDeque::len).max().unwrap_or(0);
        for block in &mut children {
            let filler = fill(style.fill, first_width(block));
            block.resize(max_depth, filler);
        }
        (0..max_depth)
            .map(|level| {
                children
                    .iter()
                    .map(|block| block[level].as_str())
                    .join(SIBLING_GAP)
            })
            .collect()
    };
    lines.push_front(top);
    lines
}

fn width(line: &str) -> usize {
    line.chars().count()
}

fn first_width(block: &VecDeque<String>) -> usize {
    block.front().map(|line| width(line)).unwrap_or(0)
}

fn fill(glyph: char, count: usize) -> String {
    std::iter::repeat(glyph).take(count).collect()
}

/// Writes every rendered line followed by a newline.
impl<T: NodeValue> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in render_lines(self, &RenderStyle::default()) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
