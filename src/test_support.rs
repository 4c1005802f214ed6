//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::channels::Channels;
use crate::core::coordinator::{CoordinatorTree, NodeId};
use crate::core::target::FlowTarget;

/// A link target carrying just a static id, for tests that only care about
/// position bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLink(pub &'static str);

impl FlowTarget for TestLink {
    fn path_id(&self) -> String {
        self.0.to_string()
    }
}

/// Sheet payload for presentation tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSheet(pub &'static str);

/// Cover payload for presentation tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCover(pub &'static str);

pub type TestTree = CoordinatorTree<TestSheet, TestLink, TestCover>;

/// Creates a single-node tree with every channel active.
pub fn test_tree() -> (TestTree, NodeId) {
    let mut tree = TestTree::new();
    let root = tree.add_root(Channels::all());
    (tree, root)
}
