use std::collections::BTreeMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::Tree;
use crate::errors::{TreeError, TreeResult};
use crate::value::NodeValue;

/// Parent index marking the root element.
pub const ROOT_PARENT: i64 = -1;

/// Builds a [`Tree`] from a flattened parent-index encoding.
///
/// `parents[i]` is either [`ROOT_PARENT`] or the position of element `i`'s
/// parent. Parents must precede their children; a forward reference is
/// rejected as [`TreeError::DanglingParent`].
pub struct TreeBuilder<T> {
    value_index: BTreeMap<T, Index>,
}

impl<T: NodeValue> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeValue> TreeBuilder<T> {
    pub fn new() -> Self {
        Self {
            value_index: BTreeMap::new(),
        }
    }

    #[instrument(level = "debug", skip_all, fields(len = values.len()))]
    pub fn build(&mut self, values: Vec<T>, parents: &[i64]) -> TreeResult<Tree<T>> {
        if values.len() != parents.len() {
            return Err(TreeError::ShapeMismatch {
                values: values.len(),
                parents: parents.len(),
            });
        }
        Self::check_single_root(parents)?;
        Self::check_distinct(&values)?;

        self.value_index.clear();
        let mut tree = Tree::new();
        for (i, (value, &parent)) in values.iter().zip(parents).enumerate() {
            let parent_idx = if parent == ROOT_PARENT {
                None
            } else {
                let j = Self::resolve_position(i, parent)?;
                // values[j] was inserted on an earlier iteration
                let parent_idx = self.value_index.get(&values[j]).copied().ok_or(
                    TreeError::DanglingParent { index: i, parent },
                )?;
                Some(parent_idx)
            };
            let node_idx = tree.insert_node(value.clone(), parent_idx);
            self.value_index.insert(value.clone(), node_idx);
        }
        self.value_index.clear();

        debug!(nodes = tree.len(), "tree built");
        Ok(tree)
    }

    fn check_single_root(parents: &[i64]) -> TreeResult<()> {
        let mut roots = parents
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p == ROOT_PARENT)
            .map(|(i, _)| i);
        match (roots.next(), roots.next()) {
            (Some(_), None) => Ok(()),
            (Some(first), Some(second)) => Err(TreeError::MultipleRoots { first, second }),
            (None, _) if parents.is_empty() => Ok(()),
            (None, _) => Err(TreeError::MissingRoot),
        }
    }

    fn check_distinct(values: &[T]) -> TreeResult<()> {
        let mut seen: BTreeMap<&T, usize> = BTreeMap::new();
        for (i, value) in values.iter().enumerate() {
            if let Some(&first) = seen.get(value) {
                return Err(TreeError::DuplicateValue {
                    value: value.to_string(),
                    first,
                    second: i,
                });
            }
            seen.insert(value, i);
        }
        Ok(())
    }

    /// Parent position for element `index`; must name an earlier element.
    fn resolve_position(index: usize, parent: i64) -> TreeResult<usize> {
        usize::try_from(parent)
            .ok()
            .filter(|&j| j < index)
            .ok_or(TreeError::DanglingParent { index, parent })
    }
}

impl<T: NodeValue> Tree<T> {
    /// Shorthand for [`TreeBuilder::build`].
    pub fn from_parent_indices(values: Vec<T>, parents: &[i64]) -> TreeResult<Self> {
        TreeBuilder::new().build(values, parents)
    }
}
