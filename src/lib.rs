mod avl;
mod bst;
mod depth;
mod error;
mod node;
mod rb;
mod unbalanced;
mod walker;

pub use crate::bst::{Bst, Iter, Stats, Strategy, Traversal};
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::node::Node;

#[cfg(test)]
mod rb_test;
