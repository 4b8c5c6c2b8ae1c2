//! Path-per-line text format.
//!
//! One line per node in breadth-first order. Each line is the space separated
//! path of values from the root down to the node itself:
//!
//! ```text
//! A
//! A B
//! A C
//! A B D
//! ```
//!
//! Structure is recovered purely from path prefixes and line order, so every
//! line's ancestors must appear on earlier lines.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use generational_arena::Index;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::Tree;
use crate::errors::{CodecError, CodecResult};
use crate::value::NodeValue;

const TOKEN_SEPARATOR: &str = " ";

/// Writes `tree` to the file at `path`, creating or truncating it.
///
/// All values are checked before the file is touched, so an unencodable tree
/// leaves no file behind.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn serialize<T: NodeValue>(tree: &Tree<T>, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    let lines = encode_lines(tree)?;

    let file = File::create(path)
        .map_err(|e| CodecError::io(format!("create {}", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    write_lines(&lines, &mut writer)?;
    writer
        .flush()
        .map_err(|e| CodecError::io(format!("flush {}", path.display()), e))?;

    debug!(lines = lines.len(), "tree serialized");
    Ok(())
}

/// Reads a tree from the file at `path`.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn deserialize<T: NodeValue>(path: impl AsRef<Path>) -> CodecResult<Tree<T>> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| CodecError::io(format!("open {}", path.display()), e))?;
    let tree = read_from(BufReader::new(file))?;
    debug!(nodes = tree.len(), "tree deserialized");
    Ok(tree)
}

pub fn write_to<T: NodeValue, W: Write>(tree: &Tree<T>, mut writer: W) -> CodecResult<()> {
    let lines = encode_lines(tree)?;
    write_lines(&lines, &mut writer)
}

/// The serialized form as a string, every line newline-terminated.
pub fn to_text<T: NodeValue>(tree: &Tree<T>) -> CodecResult<String> {
    Ok(encode_lines(tree)?
        .into_iter()
        .map(|line| line + "\n")
        .collect())
}

pub fn from_text<T: NodeValue>(text: &str) -> CodecResult<Tree<T>> {
    read_from(text.as_bytes())
}

/// Rebuilds a tree line by line.
///
/// A single-token line starts a new root and discards whatever was read
/// before it. The tree is only returned once every line resolved.
pub fn read_from<T: NodeValue, R: BufRead>(reader: R) -> CodecResult<Tree<T>> {
    let mut tree = Tree::new();
    for (n, line) in reader.lines().enumerate() {
        let line_no = n + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => CodecError::EmptyOrMalformedLine {
                line: line_no,
                reason: "invalid UTF-8".to_string(),
            },
            _ => CodecError::io(format!("read line {line_no}"), e),
        })?;

        let mut tokens = parse_tokens::<T>(&line, line_no)?;
        let Some(value) = tokens.pop() else {
            return Err(CodecError::EmptyOrMalformedLine {
                line: line_no,
                reason: "empty line".to_string(),
            });
        };

        if tokens.is_empty() {
            tree.clear();
            tree.insert_node(value, None);
            continue;
        }

        let parent = resolve_path(&tree, &tokens).ok_or_else(|| CodecError::OrphanLine {
            line: line_no,
            text: line.clone(),
        })?;
        tree.insert_node(value, Some(parent));
    }
    Ok(tree)
}

fn encode_lines<T: NodeValue>(tree: &Tree<T>) -> CodecResult<Vec<String>> {
    for (_, node) in tree.iter() {
        let text = node.value.to_string();
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return Err(CodecError::UnencodableValue { value: text });
        }
    }
    Ok(tree
        .iter_breadth_first()
        .map(|(idx, _)| tree.path_to(idx).iter().join(TOKEN_SEPARATOR))
        .collect())
}

fn write_lines<W: Write>(lines: &[String], writer: &mut W) -> CodecResult<()> {
    for (n, line) in lines.iter().enumerate() {
        writeln!(writer, "{line}")
            .map_err(|e| CodecError::io(format!("write line {}", n + 1), e))?;
    }
    Ok(())
}

fn parse_tokens<T: NodeValue>(line: &str, line_no: usize) -> CodecResult<Vec<T>> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse::<T>()
                .map_err(|_| CodecError::EmptyOrMalformedLine {
                    line: line_no,
                    reason: format!("cannot parse token '{token}'"),
                })
        })
        .collect()
}

/// Follows `path` from the root, taking the leftmost child whose value
/// matches at each step.
fn resolve_path<T: NodeValue>(tree: &Tree<T>, path: &[T]) -> Option<Index> {
    let (first, rest) = path.split_first()?;
    let mut current = tree.root().filter(|&root| tree.value(root) == Some(first))?;
    for token in rest {
        current = tree
            .children(current)
            .iter()
            .copied()
            .find(|&child| tree.value(child) == Some(token))?;
    }
    Some(current)
}
