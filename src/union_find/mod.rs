//! # Disjoint sets
//!
//! [`DisjointSet`] partitions a growing collection of items into groups. Items
//! live in a contiguous arena and are addressed by [`ElementIndex`] handles;
//! parent links are indices into the same arena, so there is no per-element
//! allocation and no reference cycle to worry about.
//!
//! Unions attach the shallower tree under the deeper one (union by depth) and
//! every lookup compresses the path it walks, so `find` is amortised
//! near-constant.

use std::cell::Cell;
use std::ops::{Index, IndexMut};

use crate::{define_indexed_vec, GraphError};

define_indexed_vec!(
    /// Handle to one element of a [`DisjointSet`].
    pub struct ElementIndex;

    pub struct ElementVec;
);

/// The enum representing a node in the union–find tree.
///
/// - `Root { depth, size }` means this node is a root. `depth` is the
///   union–by–depth bound on the height of its tree and `size` the number of
///   elements in its group.
/// - `Child(parent)` means this node is not a root; it points to its parent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UFNode {
    Root { depth: usize, size: usize },
    Child(ElementIndex),
}

/// A partition of items into disjoint groups.
///
/// Internally:
/// - The items are kept contiguous in `elements`, in insertion order.
/// - The parent–pointer tree is stored as an `ElementVec<Cell<UFNode>>` so that
///   `find` (with path compression) can update parent pointers through a shared
///   reference. This makes the structure `!Sync`; share it across threads only
///   behind a lock.
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    elements: ElementVec<T>,
    nodes: ElementVec<Cell<UFNode>>,
    groups: usize,
}

impl<T> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DisjointSet<T> {
    pub fn new() -> Self {
        DisjointSet {
            elements: ElementVec::new(),
            nodes: ElementVec::new(),
            groups: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        DisjointSet {
            elements: ElementVec::with_capacity(capacity),
            nodes: ElementVec::with_capacity(capacity),
            groups: 0,
        }
    }

    /// Adds a single item as a new singleton group.
    pub fn add_one(&mut self, item: T) -> ElementIndex {
        let idx = self.elements.push(item);
        self.nodes.push(Cell::new(UFNode::Root { depth: 0, size: 1 }));
        self.groups += 1;
        idx
    }

    /// Adds every item as its own singleton group and returns their handles, in
    /// the order the items were given.
    pub fn add<I: IntoIterator<Item = T>>(&mut self, items: I) -> Vec<ElementIndex> {
        items.into_iter().map(|item| self.add_one(item)).collect()
    }

    pub fn elements_count(&self) -> usize {
        self.elements.len()
    }

    pub fn groups_count(&self) -> usize {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn check(&self, arg: &'static str, x: ElementIndex) -> Result<(), GraphError> {
        if self.nodes.contains_index(x) {
            Ok(())
        } else {
            Err(GraphError::out_of_range(arg, x.0, self.nodes.len()))
        }
    }

    /// Walks to the root of `x` and relinks every element on the way directly to
    /// it. `x` must be a valid handle.
    fn find_root(&self, x: ElementIndex) -> ElementIndex {
        match self.nodes[x].get() {
            UFNode::Root { .. } => x,
            UFNode::Child(parent) => {
                let root = self.find_root(parent);
                // Path compression: update x's pointer to point directly to the root.
                self.nodes[x].set(UFNode::Child(root));
                root
            }
        }
    }

    fn root_node(&self, root: ElementIndex) -> Result<(usize, usize), GraphError> {
        match self.nodes[root].get() {
            UFNode::Root { depth, size } => Ok((depth, size)),
            UFNode::Child(_) => Err(GraphError::inconsistent(format!(
                "element {root} was reported as a root but has a parent"
            ))),
        }
    }

    /// Finds the representative (root) of the group containing `x`, performing
    /// path compression.
    pub fn find(&self, x: ElementIndex) -> Result<ElementIndex, GraphError> {
        self.check("x", x)?;
        Ok(self.find_root(x))
    }

    /// Whether `a` and `b` belong to the same group.
    pub fn same_group(&self, a: ElementIndex, b: ElementIndex) -> Result<bool, GraphError> {
        self.check("a", a)?;
        self.check("b", b)?;
        Ok(self.find_root(a) == self.find_root(b))
    }

    /// Merges the groups containing `a` and `b` and returns the root of the
    /// merged group.
    ///
    /// The root of smaller depth is attached under the other. When both depths
    /// are equal, `b`'s group goes under `a`'s and the depth of `a`'s root grows
    /// by one. Merging a group with itself changes nothing.
    pub fn union(&mut self, a: ElementIndex, b: ElementIndex) -> Result<ElementIndex, GraphError> {
        self.check("a", a)?;
        self.check("b", b)?;

        let root_a = self.find_root(a);
        let root_b = self.find_root(b);
        if root_a == root_b {
            return Ok(root_a);
        }

        let (depth_a, size_a) = self.root_node(root_a)?;
        let (depth_b, size_b) = self.root_node(root_b)?;

        let (winner, loser, depth) = if depth_a < depth_b {
            (root_b, root_a, depth_b)
        } else if depth_a == depth_b {
            (root_a, root_b, depth_a + 1)
        } else {
            (root_a, root_b, depth_a)
        };

        self.nodes[loser].set(UFNode::Child(winner));
        self.nodes[winner].set(UFNode::Root {
            depth,
            size: size_a + size_b,
        });
        self.groups -= 1;

        Ok(winner)
    }

    /// Number of elements in the group containing `x`.
    pub fn group_size(&self, x: ElementIndex) -> Result<usize, GraphError> {
        let root = self.find(x)?;
        Ok(self.root_node(root)?.1)
    }

    /// Upper bound on the height of the tree holding `x`'s group.
    pub fn depth_of(&self, x: ElementIndex) -> Result<usize, GraphError> {
        let root = self.find(x)?;
        Ok(self.root_node(root)?.0)
    }

    /// The group containing `x`.
    pub fn group(&self, x: ElementIndex) -> Result<Group<'_, T>, GraphError> {
        let root = self.find(x)?;
        let (_, size) = self.root_node(root)?;
        Ok(Group {
            set: self,
            root,
            size,
        })
    }

    /// Every group, in the order of their roots.
    pub fn groups(&self) -> impl Iterator<Item = Group<'_, T>> + '_ {
        self.nodes.iter().filter_map(move |(i, n)| match n.get() {
            UFNode::Root { size, .. } => Some(Group {
                set: self,
                root: i,
                size,
            }),
            UFNode::Child(_) => None,
        })
    }

    pub fn items(&self) -> impl Iterator<Item = (ElementIndex, &T)> {
        self.elements.iter()
    }

    pub fn get(&self, x: ElementIndex) -> Option<&T> {
        self.elements.get(x)
    }
}

/// A view of one group of a [`DisjointSet`], identified by its root.
#[derive(Debug)]
pub struct Group<'a, T> {
    set: &'a DisjointSet<T>,
    root: ElementIndex,
    size: usize,
}

impl<T> Clone for Group<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Group<'_, T> {}

impl<'a, T> Group<'a, T> {
    pub fn root(&self) -> ElementIndex {
        self.root
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn contains(&self, x: ElementIndex) -> bool {
        self.set.nodes.contains_index(x) && self.set.find_root(x) == self.root
    }

    /// Handles of the group's members in insertion order.
    pub fn members(&self) -> impl Iterator<Item = ElementIndex> + 'a {
        let set = self.set;
        let root = self.root;
        set.nodes.indices().filter(move |&i| set.find_root(i) == root)
    }

    /// The group's items in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &'a T> + 'a {
        let set = self.set;
        self.members().map(move |i| &set.elements[i])
    }
}

impl<T> PartialEq for Group<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set) && self.root == other.root
    }
}

impl<T> Eq for Group<'_, T> {}

impl<T> Index<ElementIndex> for DisjointSet<T> {
    type Output = T;
    fn index(&self, index: ElementIndex) -> &Self::Output {
        &self.elements[index]
    }
}

impl<T> IndexMut<ElementIndex> for DisjointSet<T> {
    fn index_mut(&mut self, index: ElementIndex) -> &mut Self::Output {
        &mut self.elements[index]
    }
}

impl<T> FromIterator<T> for DisjointSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = DisjointSet::new();
        set.add(iter);
        set
    }
}
