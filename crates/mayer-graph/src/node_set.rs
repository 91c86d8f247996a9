use std::fmt;

use mayer_core::MAX_NODE_COUNT;

/// Set of node ids below [`MAX_NODE_COUNT`], stored as a `u128` mask.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NodeSet(u128);

impl NodeSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set `{0, .., node_count - 1}`.
    pub fn full(node_count: usize) -> Self {
        debug_assert!(node_count <= MAX_NODE_COUNT);
        if node_count >= 128 {
            Self(u128::MAX)
        } else {
            Self((1u128 << node_count) - 1)
        }
    }

    /// Returns the raw mask.
    pub fn bits(&self) -> u128 {
        self.0
    }

    /// Returns whether `node` is a member.
    pub fn contains(&self, node: usize) -> bool {
        node < 128 && (self.0 >> node) & 1 == 1
    }

    /// Adds `node`; returns whether it was newly inserted.
    pub fn insert(&mut self, node: usize) -> bool {
        debug_assert!(node < MAX_NODE_COUNT);
        let fresh = !self.contains(node);
        self.0 |= 1u128 << node;
        fresh
    }

    /// Removes `node`.
    pub fn remove(&mut self, node: usize) {
        if node < 128 {
            self.0 &= !(1u128 << node);
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Smallest member.
    pub fn first(&self) -> Option<usize> {
        (self.0 != 0).then(|| self.0.trailing_zeros() as usize)
    }

    /// Smallest member not below `from`.
    pub fn first_from(&self, from: usize) -> Option<usize> {
        if from >= 128 {
            return None;
        }
        let rest = self.0 & (u128::MAX << from);
        (rest != 0).then(|| rest.trailing_zeros() as usize)
    }

    /// Members of `self` or `other`.
    pub fn union(&self, other: &NodeSet) -> NodeSet {
        NodeSet(self.0 | other.0)
    }

    /// Members of both `self` and `other`.
    pub fn intersection(&self, other: &NodeSet) -> NodeSet {
        NodeSet(self.0 & other.0)
    }

    /// Members of `self` missing from `other`.
    pub fn difference(&self, other: &NodeSet) -> NodeSet {
        NodeSet(self.0 & !other.0)
    }

    /// Iterates over members in increasing order.
    pub fn iter(&self) -> NodeSetIter {
        NodeSetIter(self.0)
    }
}

impl FromIterator<usize> for NodeSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = NodeSet::empty();
        for node in iter {
            set.insert(node);
        }
        set
    }
}

impl IntoIterator for NodeSet {
    type Item = usize;
    type IntoIter = NodeSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the members of a [`NodeSet`].
#[derive(Debug, Clone)]
pub struct NodeSetIter(u128);

impl Iterator for NodeSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let node = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for NodeSetIter {}
