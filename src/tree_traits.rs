use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree as TermTree;
use tracing::instrument;

use crate::arena::Tree;
use crate::value::NodeValue;

/// Conversion into a `termtree` outline (`├──` / `└──` connectors).
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<T: NodeValue> TreeNodeConvert for Tree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> TermTree<String> {
        let Some(root_idx) = self.root() else {
            return TermTree::new("Empty tree".to_string());
        };

        // Children are finished before their parent in post-order.
        let mut built: HashMap<Index, TermTree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(idx, TermTree::new(node.value.to_string()).with_leaves(leaves));
        }

        built
            .remove(&root_idx)
            .unwrap_or_else(|| TermTree::new(String::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_tree_when_outlined_then_children_are_indented_in_order() {
        let values = ["A", "B", "C", "D"].map(String::from).to_vec();
        let tree = Tree::from_parent_indices(values, &[-1, 0, 0, 1]).unwrap();
        let outline = tree.to_tree_string().to_string();
        let lines: Vec<&str> = outline.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "A");
        assert!(lines[1].ends_with("B"));
        assert!(lines[2].ends_with("D"));
        assert!(lines[3].ends_with("C"));
    }

    #[test]
    fn given_deep_chain_when_outlined_then_every_level_is_listed() {
        let depth = 2_000u32;
        let parents: Vec<i64> = (-1..i64::from(depth) - 1).collect();
        let tree = Tree::from_parent_indices((0..depth).collect(), &parents).unwrap();

        let outline = tree.to_tree_string().to_string();

        assert_eq!(outline.lines().count(), 2_000);
        assert_eq!(outline.lines().next(), Some("0"));
        assert!(outline.lines().last().unwrap().ends_with("1999"));
    }

    #[test]
    fn given_empty_tree_when_outlined_then_placeholder() {
        let tree: Tree<String> = Tree::new();
        assert_eq!(tree.to_tree_string().to_string().trim_end(), "Empty tree");
    }
}
