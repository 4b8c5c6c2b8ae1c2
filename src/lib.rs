//! Ordered N-ary trees.
//!
//! A [`Tree`] is built in one shot from a parent-index encoding
//! ([`TreeBuilder`]), rendered as a depth-aligned ASCII diagram
//! ([`render`](render::render)), compared structurally
//! ([`trees_equal`](compare::trees_equal), `==`), and written to or read from
//! a path-per-line text file ([`serialize`](codec::serialize),
//! [`deserialize`](codec::deserialize)).
//!
//! ```
//! use ntree::Tree;
//!
//! let values = vec!["A".to_string(), "B".to_string(), "C".to_string()];
//! let tree = Tree::from_parent_indices(values, &[-1, 0, 0]).unwrap();
//! assert_eq!(ntree::render::render(&tree), "_A_\nB C");
//! assert_eq!(ntree::codec::to_text(&tree).unwrap(), "A\nA B\nA C\n");
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod compare;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod render;
pub mod tree_traits;
pub mod util;
pub mod value;

pub use arena::{Tree, TreeNode};
pub use builder::{TreeBuilder, ROOT_PARENT};
pub use errors::{CodecError, CodecResult, TreeError, TreeResult};
pub use value::NodeValue;
