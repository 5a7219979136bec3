//! Arena-backed rooted tree with relationship queries.
//!
//! Each node stores its value, an optional parent link, and a [`DynArray`]
//! of child keys. The parent link and the child list are maintained
//! independently: [`Tree::push_child`] sets both, while [`Tree::add_child`]
//! and [`Tree::set_parent`] each touch one side only.
//!
//! Relationship queries walk child lists, so they see exactly the edges
//! added through `push_child`/`add_child`. `add_child` refuses edges that
//! would make a node reachable from itself, which keeps every walk finite.
//!
//! # Example
//!
//! ```
//! use nexus_structs::{NodeType, Tree};
//!
//! let mut tree = Tree::new();
//! let root = tree.insert("root");
//! let left = tree.push_child(root, "left").unwrap();
//! let right = tree.push_child(root, "right").unwrap();
//! let leaf = tree.push_child(left, "leaf").unwrap();
//!
//! assert!(tree.is_ancestor_of(root, leaf).unwrap());
//! assert!(tree.is_sibling_of(left, right).unwrap());
//! assert_eq!(tree.ancestors(leaf).unwrap(), vec![left, root]);
//! assert_eq!(tree.node_type(left).unwrap(), NodeType::Branch);
//! ```

use std::fmt;
use std::mem;

use slab::Slab;

use crate::array::DynArray;
use crate::{Error, Key, Result};

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// No parent.
    Root,
    /// Has a parent, no children.
    Leaf,
    /// Has a parent and at least one child.
    Branch,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Root => "root",
            NodeType::Leaf => "leaf",
            NodeType::Branch => "branch",
        };
        f.write_str(name)
    }
}

/// A tree node: value, parent link, and child keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    value: T,
    parent: usize,
    children: DynArray<usize>,
}

impl<T> TreeNode<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            parent: usize::NONE,
            children: DynArray::new(),
        }
    }

    /// Returns the node's value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the parent key, if one is set.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent.into_option()
    }

    /// Returns the child keys in insertion order.
    #[inline]
    pub fn children(&self) -> &[usize] {
        self.children.as_slice()
    }
}

/// Arena of [`TreeNode`]s addressed by `usize` keys.
///
/// A single arena may hold several disjoint trees.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Slab<TreeNode<T>>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self { nodes: Slab::new() }
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a detached node and returns its key.
    pub fn insert(&mut self, value: T) -> usize {
        self.nodes.insert(TreeNode::new(value))
    }

    /// Adds a node under `parent`, linking both directions.
    pub fn push_child(&mut self, parent: usize, value: T) -> Result<usize> {
        self.node(parent)?;
        let mut node = TreeNode::new(value);
        node.parent = parent;
        let key = self.nodes.insert(node);
        self.nodes[parent].children.add(key);
        Ok(key)
    }

    /// Appends `child` to `parent`'s child list. The child's parent link is
    /// left alone.
    ///
    /// Fails with [`Error::Cycle`] if `child` is `parent` or already reaches
    /// `parent` through its own children.
    pub fn add_child(&mut self, parent: usize, child: usize) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.reaches(child, parent) {
            return Err(Error::Cycle { parent, child });
        }
        self.nodes[parent].children.add(child);
        Ok(())
    }

    /// Sets or clears `child`'s parent link. Child lists are left alone.
    pub fn set_parent(&mut self, child: usize, parent: Option<usize>) -> Result<()> {
        if let Some(parent) = parent {
            self.node(parent)?;
        }
        self.node_mut(child)?.parent = usize::from_option(parent);
        Ok(())
    }

    // ========================================================================
    // Node access
    // ========================================================================

    /// Returns the node with the given key.
    #[inline]
    pub fn node(&self, key: usize) -> Result<&TreeNode<T>> {
        self.nodes.get(key).ok_or(Error::InvalidKey(key))
    }

    #[inline]
    fn node_mut(&mut self, key: usize) -> Result<&mut TreeNode<T>> {
        self.nodes.get_mut(key).ok_or(Error::InvalidKey(key))
    }

    /// Returns a node's value.
    #[inline]
    pub fn value(&self, key: usize) -> Result<&T> {
        self.node(key).map(TreeNode::value)
    }

    /// Returns a mutable reference to a node's value.
    #[inline]
    pub fn value_mut(&mut self, key: usize) -> Result<&mut T> {
        self.node_mut(key).map(|node| &mut node.value)
    }

    /// Replaces a node's value, returning the old one.
    pub fn set_value(&mut self, key: usize, value: T) -> Result<T> {
        Ok(mem::replace(self.value_mut(key)?, value))
    }

    /// Returns a node's parent key.
    #[inline]
    pub fn parent(&self, key: usize) -> Result<Option<usize>> {
        self.node(key).map(TreeNode::parent)
    }

    /// Returns a node's child keys.
    #[inline]
    pub fn children(&self, key: usize) -> Result<&[usize]> {
        self.node(key).map(TreeNode::children)
    }

    // ========================================================================
    // Relationships
    // ========================================================================

    /// Returns `true` if `node` is reachable from `tree` through child
    /// lists. A node does not contain itself.
    pub fn contains(&self, tree: usize, node: usize) -> Result<bool> {
        self.node(tree)?;
        self.node(node)?;
        Ok(self.reaches(tree, node))
    }

    /// Returns `true` if `descendant` lies somewhere below `ancestor`.
    pub fn is_ancestor_of(&self, ancestor: usize, descendant: usize) -> Result<bool> {
        self.contains(ancestor, descendant)
    }

    /// Returns `true` if `descendant` lies somewhere below `ancestor`.
    pub fn is_descendant_of(&self, descendant: usize, ancestor: usize) -> Result<bool> {
        self.contains(ancestor, descendant)
    }

    /// Returns `true` if both nodes have the same parent link. Two
    /// parentless nodes count as siblings.
    pub fn is_sibling_of(&self, a: usize, b: usize) -> Result<bool> {
        Ok(self.parent(a)? == self.parent(b)?)
    }

    /// Returns the parent's other children. A parentless node has none.
    pub fn siblings(&self, key: usize) -> Result<DynArray<usize>> {
        let Some(parent) = self.parent(key)? else {
            return Ok(DynArray::new());
        };
        let mut siblings = self.nodes[parent].children.clone();
        siblings.remove_all(&key);
        Ok(siblings)
    }

    /// Returns the parent chain, nearest first, ending at a root.
    pub fn ancestors(&self, key: usize) -> Result<Vec<usize>> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(key)?;
        while let Some(parent) = current {
            if ancestors.len() >= self.nodes.len() {
                tracing::warn!(key, "parent links form a loop");
                break;
            }
            ancestors.push(parent);
            current = self.nodes[parent].parent();
        }
        Ok(ancestors)
    }

    /// Classifies a node by its parent link and child list.
    pub fn node_type(&self, key: usize) -> Result<NodeType> {
        let node = self.node(key)?;
        Ok(if node.parent.is_none() {
            NodeType::Root
        } else if node.children.is_empty() {
            NodeType::Leaf
        } else {
            NodeType::Branch
        })
    }

    /// Depth-first search through child lists. Each node is expanded at
    /// most once, even when it sits in several child lists.
    fn reaches(&self, from: usize, target: usize) -> bool {
        let mut visited = vec![false; self.nodes.capacity()];
        let mut stack: Vec<usize> = self.nodes[from].children().to_vec();
        while let Some(key) = stack.pop() {
            if key == target {
                return true;
            }
            if mem::replace(&mut visited[key], true) {
                continue;
            }
            stack.extend_from_slice(self.nodes[key].children());
        }
        false
    }
}
