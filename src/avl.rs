use std::cmp::{Ordering, max};
use std::fmt;

use crate::error::Error;

/// Owning reference to a subtree. `None` is the empty subtree.
pub type Link<T> = Option<Box<Node<T>>>;

/// Node in the AVL tree.
///
/// Every node owns its two subtrees outright, so a tree is always a tree:
/// restructuring moves subtrees between links and never aliases them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    height: i32,
    left: Link<T>,
    right: Link<T>,
}

/// A tree held by its root link.
///
/// This is only an owner for the root: it keeps no size or other aggregate
/// state, and every operation forwards to the free functions of this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvlTree<T> {
    root: Link<T>,
}

/// Height of a possibly empty subtree. The empty subtree has height -1.
fn height_of<T>(node: &Link<T>) -> i32 {
    node.as_ref().map_or(-1, |n| n.height)
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Cached height of the subtree rooted here; a leaf has height 0.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Positive when left-heavy, negative when right-heavy.
    pub fn balance_factor(&self) -> i32 {
        height_of(&self.left) - height_of(&self.right)
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height_of(&self.left), height_of(&self.right));
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut new_root) = node.right.take() else {
        return node;
    };
    node.right = new_root.left.take();
    node.update_height();
    new_root.left = Some(node);
    new_root.update_height();
    new_root
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut new_root) = node.left.take() else {
        return node;
    };
    node.left = new_root.right.take();
    node.update_height();
    new_root.right = Some(node);
    new_root.update_height();
    new_root
}

/// Refreshes the height of `node` and rotates it back into balance.
///
/// Must be called on every node whose children changed, bottom-up. Returns
/// the root of the subtree, which may be a different node.
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();

    // Left heavy
    if balance > 1 {
        if node.left.as_ref().is_some_and(|l| l.balance_factor() <= -1) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    // Right heavy
    if balance < -1 {
        if node.right.as_ref().is_some_and(|r| r.balance_factor() >= 1) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

/// Builds a tree by inserting `values` one after the other.
pub fn create<T: Ord, I: IntoIterator<Item = T>>(values: I) -> Link<T> {
    values.into_iter().fold(None, insert)
}

/// Inserts `value` and returns the new root, which the caller must keep in
/// place of `tree`.
///
/// Values equal to a node go to its left subtree, so duplicates are stored
/// as separate nodes.
pub fn insert<T: Ord>(tree: Link<T>, value: T) -> Link<T> {
    Some(insert_node(tree, value))
}

fn insert_node<T: Ord>(tree: Link<T>, value: T) -> Box<Node<T>> {
    let Some(mut node) = tree else {
        return Box::new(Node::new(value));
    };

    if value <= node.value {
        node.left = Some(insert_node(node.left.take(), value));
    } else {
        node.right = Some(insert_node(node.right.take(), value));
    }

    rebalance(node)
}

/// Returns the node holding `value`.
pub fn find<T: Ord>(tree: &Link<T>, value: T) -> Result<&Node<T>, Error<T>> {
    let mut current = tree;
    while let Some(node) = current {
        match value.cmp(&node.value) {
            Ordering::Less => current = &node.left,
            Ordering::Greater => current = &node.right,
            Ordering::Equal => return Ok(&**node),
        }
    }
    Err(Error::NotFound(value))
}

/// Removes one node holding `value`.
///
/// The new root is returned whether or not the value was found and always
/// replaces `tree` at the call site. On success the removed value is handed
/// back.
pub fn remove_with<T: Ord>(tree: Link<T>, value: T) -> (Link<T>, Result<T, Error<T>>) {
    let Some(mut node) = tree else {
        return (None, Err(Error::NotFound(value)));
    };

    match value.cmp(&node.value) {
        Ordering::Less => {
            let (left, removed) = remove_with(node.left.take(), value);
            node.left = left;
            (Some(rebalance(node)), removed)
        }
        Ordering::Greater => {
            let (right, removed) = remove_with(node.right.take(), value);
            node.right = right;
            (Some(rebalance(node)), removed)
        }
        Ordering::Equal => {
            let (replacement, removed) = detach(node);
            (replacement, Ok(removed))
        }
    }
}

/// Unlinks `node` from its subtree and returns the subtree that takes its
/// place, together with the node's value.
///
/// The replacement is taken from the taller side: the largest value on the
/// left or the smallest value on the right. A balanced node prefers the left.
fn detach<T>(node: Box<Node<T>>) -> (Link<T>, T) {
    let balance = node.balance_factor();
    let Node { value, left, right, .. } = *node;

    let (left, right, donor) = if balance > 0 || (balance == 0 && left.is_some()) {
        match left {
            Some(subtree) => {
                let (rest, biggest) = pop_biggest(subtree);
                (rest, right, Some(biggest))
            }
            None => (None, right, None),
        }
    } else {
        match right {
            Some(subtree) => {
                let (rest, smallest) = pop_smallest(subtree);
                (left, rest, Some(smallest))
            }
            None => (left, None, None),
        }
    };

    // No donor means `node` was a leaf and both sides are empty.
    let replacement = donor.map(|mut donor| {
        donor.left = left;
        donor.right = right;
        rebalance(donor)
    });

    (replacement, value)
}

/// Detaches the rightmost node of `node`'s subtree.
///
/// Returns the remaining subtree and the detached node, which has no
/// children left.
fn pop_biggest<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.right.take() {
        None => {
            let rest = node.left.take();
            node.height = 0;
            (rest, node)
        }
        Some(right) => {
            let (rest, biggest) = pop_biggest(right);
            node.right = rest;
            (Some(rebalance(node)), biggest)
        }
    }
}

/// Mirror of [`pop_biggest`] for the leftmost node.
fn pop_smallest<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            node.height = 0;
            (rest, node)
        }
        Some(left) => {
            let (rest, smallest) = pop_smallest(left);
            node.left = rest;
            (Some(rebalance(node)), smallest)
        }
    }
}

fn in_order_rec<'a, T>(node: &'a Link<T>, result: &mut Vec<&'a T>) {
    if let Some(n) = node {
        in_order_rec(&n.left, result);
        result.push(&n.value);
        in_order_rec(&n.right, result);
    }
}

fn pre_order_rec<'a, T>(node: &'a Link<T>, result: &mut Vec<&'a Node<T>>) {
    if let Some(n) = node {
        result.push(n);
        pre_order_rec(&n.left, result);
        pre_order_rec(&n.right, result);
    }
}

fn count<T>(node: &Link<T>) -> usize {
    node.as_ref().map_or(0, |n| 1 + count(&n.left) + count(&n.right))
}

/// Fully parenthesized infix form: `(L v R)`, `(L v)`, `(v R)` or `(v)`.
impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.left, &self.right) {
            (Some(left), Some(right)) => write!(f, "({left} {} {right})", self.value),
            (Some(left), None) => write!(f, "({left} {})", self.value),
            (None, Some(right)) => write!(f, "({} {right})", self.value),
            (None, None) => write!(f, "({})", self.value),
        }
    }
}

impl<T> AvlTree<T> {
    pub const fn new() -> Self {
        AvlTree { root: None }
    }

    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub fn into_root(self) -> Link<T> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of stored values, duplicates included. Walks the whole tree.
    pub fn len(&self) -> usize {
        count(&self.root)
    }

    /// Height of the root, or -1 for the empty tree.
    pub fn height(&self) -> i32 {
        height_of(&self.root)
    }

    /// Values in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        let mut result = Vec::new();
        in_order_rec(&self.root, &mut result);
        result
    }

    /// Traverse the tree in pre-order.
    pub fn pre_order(&self) -> Vec<&Node<T>> {
        let mut result = Vec::new();
        pre_order_rec(&self.root, &mut result);
        result
    }
}

impl<T: Ord> AvlTree<T> {
    pub fn insert(&mut self, value: T) {
        self.root = insert(self.root.take(), value);
    }

    pub fn find(&self, value: T) -> Result<&Node<T>, Error<T>> {
        find(&self.root, value)
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut current = &self.root;
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Less => current = &node.left,
                Ordering::Greater => current = &node.right,
                Ordering::Equal => return true,
            }
        }
        false
    }

    /// Removes one occurrence of `value` and returns it.
    pub fn remove(&mut self, value: T) -> Result<T, Error<T>> {
        let (root, removed) = remove_with(self.root.take(), value);
        self.root = root;
        removed
    }
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Link<T>> for AvlTree<T> {
    fn from(root: Link<T>) -> Self {
        AvlTree { root }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        AvlTree { root: create(iter) }
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.root = iter.into_iter().fold(self.root.take(), insert);
    }
}

/// Renders the root, or `()` for the empty tree.
impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => fmt::Display::fmt(root, f),
            None => f.write_str("()"),
        }
    }
}
