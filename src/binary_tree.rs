use crate::error::TreeError;
use crate::tree::TreeOps;
use std::cmp::Ordering;
use std::fmt;

const INDENT: usize = 5;

/// Unbalanced binary search tree. Each node owns its children, keys are unique.
pub struct Tree<T: Ord> {
    root: Link<T>,
    len: usize,
    verbose: bool,
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

type Link<T> = Option<Box<Node<T>>>;

/// A single decision taken while descending to the insertion slot.
#[derive(Debug, PartialEq, Eq)]
pub enum TraceEvent<'a, T> {
    WentLeft(&'a T),
    WentRight(&'a T),
    Placed(&'a T),
    AlreadyPresent(&'a T),
}

pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

/// Right subtree, node, left subtree, each paired with its depth.
pub struct Rows<'a, T> {
    stack: Vec<(&'a Node<T>, usize)>,
}

impl<T: Ord> Tree<T> {
    pub fn new() -> Self {
        Tree {
            root: None,
            len: 0,
            verbose: true,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Inserts `value`, reporting every comparison and the final placement to `on_event`.
    /// Returns false when the key was already stored.
    pub fn insert_traced<F>(&mut self, value: T, mut on_event: F) -> bool
    where
        F: FnMut(TraceEvent<'_, T>),
    {
        let inserted = Self::insert_at(&mut self.root, value, &mut on_event);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn remove(&mut self, value: &T) -> bool {
        let removed = Self::remove_at(&mut self.root, value);
        if removed {
            self.len -= 1;
        }
        if removed {
            log::debug!("removed a key, {} left", self.len);
        } else {
            log::debug!("key not present, nothing removed");
        }
        removed
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match value.cmp(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn find_maximum(&self) -> Result<&T, TreeError> {
        let mut cur = self.root.as_deref().ok_or(TreeError::Empty)?;
        while let Some(right) = cur.right.as_deref() {
            cur = right;
        }
        Ok(&cur.value)
    }

    pub fn find_minimum(&self) -> Result<&T, TreeError> {
        let mut cur = self.root.as_deref().ok_or(TreeError::Empty)?;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        Ok(&cur.value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|node| (node, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    pub fn clear(&mut self) {
        let released = release(self.root.take());
        self.len = 0;
        log::debug!("released {released} nodes");
    }

    pub fn rows(&self) -> Rows<'_, T> {
        let mut rows = Rows { stack: Vec::new() };
        rows.push_right_spine(self.root.as_deref(), 0);
        rows
    }

    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    fn insert_at<F>(mut link: &mut Link<T>, value: T, on_event: &mut F) -> bool
    where
        F: FnMut(TraceEvent<'_, T>),
    {
        while let Some(node) = link {
            match value.cmp(&node.value) {
                Ordering::Less => {
                    on_event(TraceEvent::WentLeft(&node.value));
                    link = &mut node.left;
                }
                Ordering::Greater => {
                    on_event(TraceEvent::WentRight(&node.value));
                    link = &mut node.right;
                }
                Ordering::Equal => {
                    on_event(TraceEvent::AlreadyPresent(&node.value));
                    return false;
                }
            }
        }
        let node = link.insert(Box::new(Node {
            value,
            left: None,
            right: None,
        }));
        on_event(TraceEvent::Placed(&node.value));
        true
    }

    fn remove_at(mut link: &mut Link<T>, value: &T) -> bool {
        loop {
            let ord = match link.as_deref() {
                None => return false,
                Some(node) => value.cmp(&node.value),
            };
            if ord == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return false;
            };
            link = if ord == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let Some(node) = link.as_mut() else {
            return false;
        };
        if node.left.is_some() && node.right.is_some() {
            // two children: the in-order successor takes this node's place
            if let Some(successor) = Self::take_min(&mut node.right) {
                node.value = successor;
            }
        } else {
            let child = node.left.take().or_else(|| node.right.take());
            *link = child;
        }
        true
    }

    // Unlinks the leftmost node of the subtree, splicing in its right child.
    fn take_min(mut link: &mut Link<T>) -> Option<T> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        let node = link.take()?;
        let Node { value, right, .. } = *node;
        *link = right;
        Some(value)
    }
}

impl<T: Ord + fmt::Debug> Tree<T> {
    /// Inserts `value`, logging the descent at info level while the tree is verbose.
    pub fn add(&mut self, value: T) -> bool {
        if self.verbose {
            self.insert_traced(value, |event| log::info!("{event}"))
        } else {
            self.insert_traced(value, |_| {})
        }
    }
}

impl<T: Ord + fmt::Debug> TreeOps<T> for Tree<T> {
    fn add(&mut self, value: T) -> bool {
        Tree::add(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        Tree::contains(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        Tree::remove(self, value)
    }

    fn find_maximum(&self) -> Result<&T, TreeError> {
        Tree::find_maximum(self)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<T: Ord> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

impl<T: Ord> Drop for Tree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_traced(value, |_| {});
        }
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left_spine(self.root.take());
        iter
    }
}

impl<'a, T: Ord> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIter<T> {
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        let right = node.right.take();
        self.push_left_spine(right);
        Some(node.value)
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a, T> Rows<'a, T> {
    fn push_right_spine(&mut self, mut link: Option<&'a Node<T>>, mut depth: usize) {
        while let Some(node) = link {
            self.stack.push((node, depth));
            link = node.right.as_deref();
            depth += 1;
        }
    }
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = (usize, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        self.push_right_spine(node.left.as_deref(), depth + 1);
        Some((depth, &node.value))
    }
}

// Iterative so that a degenerate chain cannot blow the stack on teardown.
fn release<T>(link: Link<T>) -> usize {
    let mut released = 0;
    let mut stack: Vec<Box<Node<T>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
        released += 1;
    }
    released
}

impl<T: fmt::Debug> fmt::Display for TraceEvent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::WentLeft(value) => write!(f, "Go left from {value:?}"),
            TraceEvent::WentRight(value) => write!(f, "Go right from {value:?}"),
            TraceEvent::Placed(value) => write!(f, "Insert {value:?} here."),
            TraceEvent::AlreadyPresent(value) => write!(f, "{value:?} is already present."),
        }
    }
}

impl<T: Ord + fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, value) in self.rows() {
            let width = INDENT * (depth + 1);
            writeln!(f, "{:>width$}", value.to_string())?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug + Ord> fmt::Debug for Tree<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Tree")
            .field("len", &self.len)
            .field("verbose", &self.verbose)
            .field("root", &self.root)
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::seq::SliceRandom;

    fn sample() -> Tree<i32> {
        let mut tree = Tree::new();
        tree.set_verbose(false);
        for i in [5, 3, 8, 1, 4] {
            tree.add(i);
        }
        tree
    }

    fn rows(tree: &Tree<i32>) -> Vec<(usize, i32)> {
        tree.rows().map(|(depth, value)| (depth, *value)).collect()
    }

    fn is_ordered(tree: &Tree<i32>) -> bool {
        let values: Vec<i32> = tree.iter().copied().collect();
        values.windows(2).all(|w| w[0] < w[1]) && values.len() == tree.len()
    }

    #[test]
    fn empty_after_creation() {
        let tree = Tree::<i32>::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.is_verbose());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn add_and_contains() {
        let mut tree = Tree::<i32>::new();
        for i in 0..10 {
            assert_eq!(tree.len(), i as usize);
            assert!(tree.add(i));
            assert!(tree.contains(&i));
        }
        for i in 0..10 {
            assert!(tree.contains(&i));
        }
        assert!(!tree.contains(&100));
    }

    #[test]
    fn duplicate_add_is_noop() {
        let mut tree = sample();
        let before = rows(&tree);
        assert!(!tree.add(3));
        assert_eq!(tree.len(), 5);
        assert_eq!(rows(&tree), before);
    }

    #[test]
    fn trace_follows_search_path() {
        let mut tree = sample();
        let mut events = Vec::new();
        assert!(tree.insert_traced(6, |event| events.push(event.to_string())));
        assert_eq!(
            events,
            vec!["Go right from 5", "Go left from 8", "Insert 6 here."]
        );

        events.clear();
        assert!(!tree.insert_traced(1, |event| events.push(event.to_string())));
        assert_eq!(
            events,
            vec!["Go left from 5", "Go left from 3", "1 is already present."]
        );
    }

    #[test]
    fn trace_event_carries_key() {
        let mut tree = Tree::new();
        let mut placed = None;
        tree.insert_traced(7, |event| {
            if let TraceEvent::Placed(value) = event {
                placed = Some(*value);
            }
        });
        assert_eq!(placed, Some(7));
    }

    #[test]
    fn sample_ascending_and_maximum() {
        let tree = sample();
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
        assert_eq!(tree.find_maximum(), Ok(&8));
        assert_eq!(tree.find_minimum(), Ok(&1));
    }

    #[test]
    fn remove_two_children_uses_successor() {
        let mut tree = sample();
        assert!(tree.remove(&3));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 4, 5, 8]);
        assert_eq!(rows(&tree), vec![(1, 8), (0, 5), (1, 4), (2, 1)]);
    }

    #[test]
    fn remove_successor_with_right_child() {
        let mut tree = Tree::new();
        tree.set_verbose(false);
        for i in [10, 5, 20, 15, 30, 17] {
            tree.add(i);
        }
        assert!(tree.remove(&10));
        assert_eq!(rows(&tree), vec![(2, 30), (1, 20), (2, 17), (0, 15), (1, 5)]);
        assert!(is_ordered(&tree));
    }

    #[test]
    fn remove_one_child_splices() {
        let mut tree = Tree::new();
        tree.set_verbose(false);
        for i in [5, 3, 1] {
            tree.add(i);
        }
        assert!(tree.remove(&3));
        assert_eq!(rows(&tree), vec![(0, 5), (1, 1)]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut tree = sample();
        let before = rows(&tree);
        assert!(!tree.remove(&42));
        assert_eq!(rows(&tree), before);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn remove_only_node_empties_tree() {
        let mut tree = Tree::new();
        tree.add(10);
        assert!(tree.remove(&10));
        assert!(tree.is_empty());
        assert_eq!(tree.find_maximum(), Err(TreeError::Empty));
    }

    #[test]
    fn remove_shuffled_keeps_order() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut numbers: Vec<i32> = (0..200).collect();
        numbers.shuffle(&mut rng);
        let mut tree: Tree<i32> = numbers.iter().copied().collect();

        numbers.shuffle(&mut rng);
        for (removed, number) in numbers.iter().enumerate() {
            assert!(tree.remove(number));
            assert!(!tree.contains(number));
            assert_eq!(tree.len(), 199 - removed);
            assert!(is_ordered(&tree));
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn ascending_insert_degenerates() {
        let tree: Tree<i32> = (1..=50).collect();
        assert_eq!(tree.height(), 50);
        let depths: Vec<usize> = tree.rows().map(|(depth, _)| depth).collect();
        assert_eq!(depths, (0..50).rev().collect::<Vec<_>>());
    }

    #[test]
    fn teardown_of_long_chain() {
        let mut tree: Tree<i32> = (0..10_000).collect();
        assert_eq!(tree.len(), 10_000);
        assert_eq!(tree.height(), 10_000);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);

        let chain: Tree<i32> = (0..10_000).rev().collect();
        drop(chain);
    }

    #[test]
    fn remove_deep_in_long_chain() {
        let mut tree: Tree<i32> = (0..10_000).collect();
        assert!(tree.remove(&9_999));
        assert!(tree.remove(&5_000));
        assert!(!tree.remove(&5_000));
        assert_eq!(tree.len(), 9_998);
        assert_eq!(tree.height(), 9_998);
        assert_eq!(tree.find_maximum(), Ok(&9_998));
        assert!(is_ordered(&tree));

        let mut chain: Tree<i32> = (0..10_000).rev().collect();
        for i in (0..10_000).rev() {
            assert!(chain.remove(&i));
        }
        assert!(chain.is_empty());
    }

    #[test]
    fn into_iter_asc() {
        let tree: Tree<i32> = (0..10).rev().collect();
        let mut iter = tree.into_iter();
        for i in 0..10 {
            assert_eq!(iter.next(), Some(i));
        }
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn partially_consumed_into_iter() {
        let tree: Tree<String> = ["b", "a", "c"].into_iter().map(String::from).collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.next().as_deref(), Some("a"));
    }

    #[test]
    fn display_is_rotated() {
        let tree = sample();
        assert_eq!(
            tree.to_string(),
            "         8\n    5\n              4\n         3\n              1\n"
        );
    }

    #[test]
    fn display_right_aligns_wide_keys() {
        let tree: Tree<i32> = [100, -7, 2500].into_iter().collect();
        assert_eq!(tree.to_string(), "      2500\n  100\n        -7\n");
    }
}
