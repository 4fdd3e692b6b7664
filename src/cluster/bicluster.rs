//! Merge-tree node produced by hierarchical clustering.

use core::fmt;

/// A node in the merge tree.
///
/// Leaves hold an original row and its index (`id >= 0`). Internal nodes own
/// exactly two children, hold the mean of their vectors, and carry a negative
/// id assigned in merge order (-1 for the first merge, -2 for the next, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Bicluster {
    vector: Vec<f64>,
    children: Option<Box<(Bicluster, Bicluster)>>,
    distance: f64,
    id: i64,
}

impl Bicluster {
    /// Create a leaf for row `index`.
    pub fn leaf(index: usize, vector: Vec<f64>) -> Self {
        Self {
            vector,
            children: None,
            distance: 0.0,
            id: index as i64,
        }
    }

    /// Merge two nodes under a new parent.
    ///
    /// The parent's vector is the elementwise mean of the children's.
    pub fn merge(left: Bicluster, right: Bicluster, distance: f64, id: i64) -> Self {
        let vector = left
            .vector
            .iter()
            .zip(&right.vector)
            .map(|(a, b)| (a + b) / 2.0)
            .collect();
        Self {
            vector,
            children: Some(Box::new((left, right))),
            distance,
            id,
        }
    }

    /// Representative vector.
    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    /// Distance at which the children were merged (0 for leaves).
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Row index for leaves, negative merge id for internal nodes.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Check if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.id >= 0
    }

    /// Both children, if this is an internal node.
    pub fn children(&self) -> Option<(&Bicluster, &Bicluster)> {
        self.children.as_deref().map(|(l, r)| (l, r))
    }

    /// Left child.
    pub fn left(&self) -> Option<&Bicluster> {
        self.children().map(|(l, _)| l)
    }

    /// Right child.
    pub fn right(&self) -> Option<&Bicluster> {
        self.children().map(|(_, r)| r)
    }

    /// Pre-order iterator over every node, left subtree before right.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Row indices of all leaves under this node, left to right.
    pub fn leaf_ids(&self) -> Vec<usize> {
        self.iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.id as usize)
            .collect()
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|n| n.is_leaf()).count()
    }

    /// Longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, d)) = stack.pop() {
            max = max.max(d);
            if let Some((l, r)) = node.children() {
                stack.push((r, d + 1));
                stack.push((l, d + 1));
            }
        }
        max
    }
}

/// Pre-order traversal of a [`Bicluster`] tree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Bicluster>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Bicluster;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((l, r)) = node.children() {
            self.stack.push(r);
            self.stack.push(l);
        }
        Some(node)
    }
}

impl<'a> IntoIterator for &'a Bicluster {
    type Item = &'a Bicluster;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Bicluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf() {
        let leaf = Bicluster::leaf(3, vec![1.0, 2.0]);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.id(), 3);
        assert_eq!(leaf.distance(), 0.0);
        assert!(leaf.children().is_none());
        assert_eq!(leaf.leaf_ids(), vec![3]);
        assert_eq!(leaf.depth(), 0);
    }

    #[test]
    fn test_merge_averages_vectors() {
        let a = Bicluster::leaf(0, vec![0.0, 4.0]);
        let b = Bicluster::leaf(1, vec![2.0, 8.0]);
        let parent = Bicluster::merge(a, b, 0.25, -1);

        assert!(!parent.is_leaf());
        assert_eq!(parent.vector(), &[1.0, 6.0]);
        assert_eq!(parent.distance(), 0.25);
        assert_eq!(parent.left().map(Bicluster::id), Some(0));
        assert_eq!(parent.right().map(Bicluster::id), Some(1));
    }

    #[test]
    fn test_iter_is_preorder() {
        let ab = Bicluster::merge(Bicluster::leaf(0, vec![0.0]), Bicluster::leaf(1, vec![1.0]), 1.0, -1);
        let root = Bicluster::merge(Bicluster::leaf(2, vec![2.0]), ab, 2.0, -2);

        let ids: Vec<i64> = root.iter().map(Bicluster::id).collect();
        assert_eq!(ids, vec![-2, 2, -1, 0, 1]);
        assert_eq!(root.leaf_ids(), vec![2, 0, 1]);
        assert_eq!(root.leaf_count(), 3);
        assert_eq!(root.depth(), 2);
    }
}
