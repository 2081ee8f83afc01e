//! Order-Statistics Treap
//!
//! A randomized binary search tree where every node also tracks the size of its
//! subtree. The heap property on random priorities keeps the expected depth at
//! O(log n); the size counters turn "position of key" and "key at position"
//! into single root-to-leaf walks.
//!
//! ## Complexity (expected)
//! - `insert` / `remove`: O(log n)
//! - `rank_of` / `get`: O(log n)
//! - `iter().take(k)`: O(k + log n)

use std::cmp::Ordering;

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    priority: u64,
    /// Number of keys in the subtree rooted here, this node included.
    size: usize,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            priority: rand::random::<u64>(),
            size: 1,
            left: None,
            right: None,
        })
    }

    fn update(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }
}

fn size<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Splits a subtree into `(keys < pivot, keys >= pivot)`.
fn split<K: Ord>(link: Link<K>, pivot: &K) -> (Link<K>, Link<K>) {
    match link {
        None => (None, None),
        Some(mut node) => {
            if node.key < *pivot {
                let (less, rest) = split(node.right.take(), pivot);
                node.right = less;
                node.update();
                (Some(node), rest)
            } else {
                let (less, rest) = split(node.left.take(), pivot);
                node.left = rest;
                node.update();
                (less, Some(node))
            }
        }
    }
}

/// Joins two subtrees where every key of `left` orders before every key of `right`.
fn merge<K>(left: Link<K>, right: Link<K>) -> Link<K> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut l), Some(mut r)) => {
            if l.priority > r.priority {
                l.right = merge(l.right.take(), Some(r));
                l.update();
                Some(l)
            } else {
                r.left = merge(Some(l), r.left.take());
                r.update();
                Some(r)
            }
        }
    }
}

fn remove<K: Ord>(link: &mut Link<K>, key: &K) -> bool {
    let ordering = match link.as_ref() {
        None => return false,
        Some(node) => key.cmp(&node.key),
    };

    if ordering == Ordering::Equal {
        if let Some(mut node) = link.take() {
            *link = merge(node.left.take(), node.right.take());
        }
        return true;
    }

    let Some(node) = link.as_mut() else {
        return false;
    };
    let removed = match ordering {
        Ordering::Less => remove(&mut node.left, key),
        _ => remove(&mut node.right, key),
    };
    if removed {
        node.size -= 1;
    }
    removed
}

/// Ordered set of unique keys with positional queries.
pub struct OrderStatTree<K> {
    root: Link<K>,
}

impl<K: Ord> OrderStatTree<K> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn len(&self) -> usize {
        size(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `key` and returns its zero-based position.
    ///
    /// Returns `None` without modifying the tree when an equal key is already present.
    pub fn insert(&mut self, key: K) -> Option<usize> {
        if self.rank_of(&key).is_some() {
            return None;
        }
        let (less, rest) = split(self.root.take(), &key);
        let position = size(&less);
        self.root = merge(merge(less, Some(Node::new(key))), rest);
        Some(position)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        remove(&mut self.root, key)
    }

    /// Number of keys ordering strictly before `key`, if `key` is present.
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.rank_by(|node| key.cmp(node))
    }

    /// Like `rank_of`, but the target is described by `locate`, which returns
    /// how the target orders against a stored key. Lets callers search with a
    /// borrowed form of `K`.
    pub fn rank_by(&self, locate: impl Fn(&K) -> Ordering) -> Option<usize> {
        let mut rank = 0;
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            match locate(&node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => {
                    rank += size(&node.left) + 1;
                    current = node.right.as_deref();
                }
                Ordering::Equal => return Some(rank + size(&node.left)),
            }
        }

        None
    }

    /// Key at zero-based `position`.
    pub fn get(&self, position: usize) -> Option<&K> {
        let mut position = position;
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            let left = size(&node.left);
            match position.cmp(&left) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    position -= left + 1;
                    current = node.right.as_deref();
                }
            }
        }

        None
    }

    pub fn first(&self) -> Option<&K> {
        self.get(0)
    }

    pub fn clear(&mut self) {
        self.root = None;
    }

    /// In-order iterator. Taking `k` items costs O(k + log n).
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl<K: Ord> Default for OrderStatTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}
