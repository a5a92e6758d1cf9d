//! Union-find over node slots, used to split a graph into connected
//! components. Union by size with path halving.

use super::NodeId;

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// One singleton set per slot in `0..slots`.
    pub(super) fn new(slots: usize) -> Self {
        Self {
            parent: (0..slots).collect(),
            size: vec![1; slots],
        }
    }

    /// Representative slot of the set holding `node`.
    pub(super) fn root(&mut self, node: NodeId) -> usize {
        let mut slot = node.index();
        while self.parent[slot] != slot {
            let grandparent = self.parent[self.parent[slot]];
            self.parent[slot] = grandparent;
            slot = grandparent;
        }
        slot
    }

    /// Joins the sets of `left` and `right`; returns `false` when they were
    /// already joined.
    pub(super) fn join(&mut self, left: NodeId, right: NodeId) -> bool {
        let (a, b) = (self.root(left), self.root(right));
        if a == b {
            return false;
        }
        let (big, small) = if self.size[a] >= self.size[b] { (a, b) } else { (b, a) };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}
