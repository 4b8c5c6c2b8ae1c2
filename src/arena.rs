use std::collections::VecDeque;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::value::NodeValue;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// Value carried by this node
    pub value: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Ordered N-ary tree backed by a generational arena.
///
/// The arena owns every node; parent links are plain indices, so dropping the
/// tree drops the whole node graph and no node is owned twice.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }
}

impl<T: NodeValue> Tree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node as the last child of `parent`, or makes it the root
    /// when `parent` is None.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, value: T, parent: Option<Index>) -> Index {
        let node = TreeNode {
            value,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Drops every node.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn value(&self, idx: Index) -> Option<&T> {
        self.get_node(idx).map(|node| &node.value)
    }

    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|node| node.parent)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_value(&self) -> Option<&T> {
        self.root.and_then(|idx| self.value(idx))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter_breadth_first(&self) -> BreadthFirstIterator<'_, T> {
        BreadthFirstIterator::new(self)
    }

    /// Number of levels, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut queue = VecDeque::new();
        if let Some(root) = self.root {
            queue.push_back((root, 1)); // (node, depth)
        }

        while let Some((node_idx, depth)) = queue.pop_front() {
            max_depth = max_depth.max(depth);
            queue.extend(self.children(node_idx).iter().map(|&child| (child, depth + 1)));
        }

        max_depth
    }

    /// Collects the values of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_values(&self) -> Vec<&T> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.value)
            .collect()
    }

    /// Values from the root down to and including `idx`, following parent links.
    #[instrument(level = "trace", skip(self))]
    pub fn path_to(&self, idx: Index) -> Vec<&T> {
        let mut path = Vec::new();
        let mut current = Some(idx);
        while let Some(node) = current.and_then(|i| self.get_node(i)) {
            path.push(&node.value);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

/// Pre-order, left-to-right traversal.
pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

/// Level-order traversal: every node at depth `d` before any node at `d + 1`.
pub struct BreadthFirstIterator<'a, T> {
    tree: &'a Tree<T>,
    queue: VecDeque<Index>,
}

impl<'a, T> BreadthFirstIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = tree.root {
            queue.push_back(root);
        }
        Self { tree, queue }
    }
}

impl<'a, T> Iterator for BreadthFirstIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.queue.pop_front() {
            if let Some(node) = self.tree.arena.get(current_idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}
