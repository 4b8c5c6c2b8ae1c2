use generational_arena::Index;
use tracing::instrument;

use crate::arena::Tree;
use crate::value::NodeValue;

/// Structural equality: same root value, same child count, and positionally
/// equal child subtrees all the way down. Two empty trees are equal.
///
/// Walks both trees in lockstep with an explicit stack, so depth is bounded
/// only by memory.
#[instrument(level = "debug", skip_all)]
pub fn trees_equal<T: NodeValue>(lhs: &Tree<T>, rhs: &Tree<T>) -> bool {
    let mut stack: Vec<(Index, Index)> = match (lhs.root(), rhs.root()) {
        (None, None) => return true,
        (Some(l), Some(r)) => vec![(l, r)],
        _ => return false,
    };

    while let Some((l, r)) = stack.pop() {
        let (Some(ln), Some(rn)) = (lhs.get_node(l), rhs.get_node(r)) else {
            return false;
        };
        if ln.value != rn.value || ln.children.len() != rn.children.len() {
            return false;
        }
        stack.extend(ln.children.iter().copied().zip(rn.children.iter().copied()));
    }
    true
}

impl<T: NodeValue> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        trees_equal(self, other)
    }
}

impl<T: NodeValue> Eq for Tree<T> {}
