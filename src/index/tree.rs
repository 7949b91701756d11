//! Ordered Index implementation
//!
//! Unbalanced binary search tree with single-owner child links.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::sequence::Sequence;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree node: key, value and owned subtrees
///
/// Every key in `left` orders before `key`, every key in `right` after it.
pub struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Ordered map backed by a plain binary search tree
///
/// Keys are placed by their [`Ord`] implementation; duplicate inserts
/// overwrite the stored value in place.
pub struct OrderedIndex<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K, V> OrderedIndex<K, V> {
    /// Create an empty index
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Root node (for external traversal and diagnostics)
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Longest root-to-leaf path, counted in nodes (0 when empty)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }

        deepest
    }

    /// Node with the smallest key
    pub fn first(&self) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_deref()?;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        Some(cur)
    }

    /// Node with the largest key
    pub fn last(&self) -> Option<&Node<K, V>> {
        let mut cur = self.root.as_deref()?;
        while let Some(right) = cur.right.as_deref() {
            cur = right;
        }
        Some(cur)
    }

    /// Search with a caller-supplied three-way comparison
    ///
    /// `compare(key, node_key)` steers the descent, so it must agree with the
    /// ordering the tree was built with or the result is meaningless. The
    /// first node on the descent path that compares `Equal` is returned.
    pub fn search_by<F>(&self, key: &K, mut compare: F) -> Option<&Node<K, V>>
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        let mut cur = self.root.as_deref();

        while let Some(node) = cur {
            cur = match compare(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }

        None
    }

    /// In-order listing of every node whose key satisfies `predicate`
    ///
    /// Always a full traversal; the result is sorted ascending by key.
    pub fn list<F>(&self, mut predicate: F) -> Sequence<&Node<K, V>>
    where
        F: FnMut(&K) -> bool,
    {
        let mut out = Sequence::new();
        for node in self.nodes() {
            if predicate(&node.key) {
                out.push_back(node);
            }
        }
        out
    }

    /// In-order listing of keys with `from <= key <= to` under `compare`
    ///
    /// Subtrees wholly outside the bounds are skipped, which is only sound
    /// when `compare(key, bound)` is monotone in the tree's ordering. Use
    /// [`list`](Self::list) otherwise.
    pub fn list_range<F>(&self, from: &K, to: &K, mut compare: F) -> Sequence<&Node<K, V>>
    where
        F: FnMut(&K, &K) -> Ordering,
    {
        let mut out = Sequence::new();
        let mut stack = Vec::new();
        let mut cur = self.root.as_deref();

        loop {
            while let Some(node) = cur {
                if compare(&node.key, from) == Ordering::Less {
                    // node and its left subtree sit below the range
                    cur = node.right.as_deref();
                } else {
                    stack.push(node);
                    cur = node.left.as_deref();
                }
            }

            let Some(node) = stack.pop() else {
                break;
            };
            if compare(&node.key, to) == Ordering::Greater {
                break;
            }
            out.push_back(node);
            cur = node.right.as_deref();
        }

        out
    }

    /// Rebuild into a height-balanced tree with the same in-order contents
    pub fn rebalance(&mut self) {
        let mut nodes: Vec<Option<Box<Node<K, V>>>> = drain_in_order(self.root.take(), self.len)
            .into_iter()
            .map(Some)
            .collect();
        self.root = build_balanced(&mut nodes);
    }

    /// Release every node
    pub fn clear(&mut self) {
        teardown(self.root.take());
        self.len = 0;
    }

    /// In-order iterator over nodes
    pub fn nodes(&self) -> Nodes<'_, K, V> {
        let mut nodes = Nodes {
            stack: Vec::new(),
            remaining: self.len,
        };
        nodes.push_left_spine(self.root.as_deref());
        nodes
    }

    /// In-order iterator over `(key, value)` pairs
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { nodes: self.nodes() }
    }
}

impl<K: Ord, V> OrderedIndex<K, V> {
    /// Insert a key, or overwrite the value of an existing key
    ///
    /// Returns the node now holding `key`.
    pub fn insert(&mut self, key: K, value: V) -> &mut Node<K, V> {
        let mut cur = &mut self.root;

        loop {
            let ord = match cur.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => break,
            };
            if ord == Ordering::Equal {
                break;
            }
            cur = match cur {
                Some(node) => {
                    if ord == Ordering::Less {
                        &mut node.left
                    } else {
                        &mut node.right
                    }
                }
                None => break,
            };
        }

        match cur {
            Some(node) => {
                node.value = value;
                &mut **node
            }
            None => {
                self.len += 1;
                &mut **cur.insert(Box::new(Node::leaf(key, value)))
            }
        }
    }

    /// Exact search using the key's own ordering
    pub fn search(&self, key: &K) -> Option<&Node<K, V>> {
        self.search_by(key, |a, b| a.cmp(b))
    }

    /// Value stored under `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(Node::value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Remove `key`, returning its entry; absent keys are a no-op
    ///
    /// A node with two children takes over its in-order successor's entry,
    /// and the successor is spliced out of the right subtree.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let mut cur = &mut self.root;

        loop {
            let ord = match cur.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return None,
            };
            match ord {
                Ordering::Less => cur = &mut cur.as_mut()?.left,
                Ordering::Greater => cur = &mut cur.as_mut()?.right,
                Ordering::Equal => break,
            }
        }

        let target = cur.as_mut()?;
        let entry = if target.left.is_some() && target.right.is_some() {
            let successor = take_min(&mut target.right)?;
            let Node { key, value, .. } = *successor;
            (
                mem::replace(&mut target.key, key),
                mem::replace(&mut target.value, value),
            )
        } else {
            let mut removed = cur.take()?;
            *cur = removed.left.take().or_else(|| removed.right.take());
            (removed.key, removed.value)
        };

        self.len -= 1;
        Some(entry)
    }
}

impl<K, V> Default for OrderedIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedIndex<K, V> {
    fn drop(&mut self) {
        teardown(self.root.take());
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedIndex<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedIndex<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut index = OrderedIndex::new();
        for (key, value) in iter {
            index.insert(key, value);
        }
        index
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedIndex<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// In-order node iterator (explicit stack, no recursion)
pub struct Nodes<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Nodes<'a, K, V> {
    fn push_left_spine(&mut self, mut cur: Option<&'a Node<K, V>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// In-order `(key, value)` iterator
pub struct Iter<'a, K, V> {
    nodes: Nodes<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Detach the leftmost node of a subtree, splicing its right child upward
fn take_min<K, V>(link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let mut cur = link;

    while cur.as_ref().is_some_and(|node| node.left.is_some()) {
        cur = &mut cur.as_mut()?.left;
    }

    let mut min = cur.take()?;
    *cur = min.right.take();
    Some(min)
}

/// Unlink every node of a subtree into a vector, in key order
fn drain_in_order<K, V>(root: Link<K, V>, len: usize) -> Vec<Box<Node<K, V>>> {
    let mut out = Vec::with_capacity(len);
    let mut stack = Vec::new();
    let mut cur = root;

    loop {
        while let Some(mut node) = cur {
            cur = node.left.take();
            stack.push(node);
        }
        match stack.pop() {
            Some(mut node) => {
                cur = node.right.take();
                out.push(node);
            }
            None => break,
        }
    }

    out
}

/// Median-first rebuild; recursion depth is log2(n)
fn build_balanced<K, V>(nodes: &mut [Option<Box<Node<K, V>>>]) -> Link<K, V> {
    if nodes.is_empty() {
        return None;
    }

    let mid = nodes.len() / 2;
    let (left, rest) = nodes.split_at_mut(mid);
    let (middle, right) = rest.split_first_mut()?;

    let mut node = middle.take()?;
    node.left = build_balanced(left);
    node.right = build_balanced(right);
    Some(node)
}

/// Iterative teardown so a fully skewed tree cannot exhaust the stack
fn teardown<K, V>(root: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = root.into_iter().collect();

    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
