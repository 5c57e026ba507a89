use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::bst::Stats;
use crate::error::Error;
use crate::node::Node;

// Plain binary-search-tree splicing. This flavor carries no height
// guarantee, so every walk here follows child links iteratively.

pub(crate) fn insert<K, V>(root: &mut Option<Box<Node<K, V>>>, key: K, value: V) -> Option<V>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut link = root;
    while let Some(node) = link {
        link = match key.cmp(&node.key) {
            Ordering::Less => &mut node.left,
            Ordering::Greater => &mut node.right,
            Ordering::Equal => return Some(node.set_value(value)),
        };
    }
    *link = Some(Node::new(key, value));
    None
}

pub(crate) fn remove<K, V, Q>(root: &mut Option<Box<Node<K, V>>>, key: &Q) -> Option<V>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut link = root;
    loop {
        let ord = match link.as_ref() {
            None => return None,
            Some(node) => key.cmp(node.key.borrow()),
        };
        match ord {
            Ordering::Less => link = &mut link.as_mut().unwrap().left,
            Ordering::Greater => link = &mut link.as_mut().unwrap().right,
            Ordering::Equal => break,
        }
    }

    let mut node = link.take().unwrap();
    if node.left.is_some() && node.right.is_some() {
        // two children: the in-order successor's pair moves up here
        let (succ_key, succ_value) = remove_min(&mut node.right);
        node.key = succ_key;
        let old_value = node.set_value(succ_value);
        *link = Some(node);
        Some(old_value)
    } else {
        *link = node.left.take().or_else(|| node.right.take());
        let node = *node;
        Some(node.value)
    }
}

// Unlink the smallest node below `link` and return its entry. `link`
// must hold a node.
fn remove_min<K, V>(link: &mut Option<Box<Node<K, V>>>) -> (K, V)
where
    K: Clone + Ord,
    V: Clone,
{
    let mut link = link;
    while link.as_ref().map_or(false, |node| node.left.is_some()) {
        link = &mut link.as_mut().unwrap().left;
    }
    let mut node = link.take().unwrap();
    *link = node.right.take();
    let node = *node;
    (node.key, node.value)
}

// Sort order is the only invariant this flavor has; checked with an
// explicit stack since the tree may be arbitrarily deep.
pub(crate) fn validate_tree<K, V>(
    root: Option<&Node<K, V>>,
    stats: &mut Stats,
) -> Result<(), Error<K>>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut remaining = vec![(root, 0_usize)];
    while let Some((node, depth)) = remaining.pop() {
        let node = match node {
            None => {
                stats.sample_depth(depth);
                continue;
            }
            Some(node) => node,
        };
        node.check_sorted()?;
        remaining.push((node.left_deref(), depth + 1));
        remaining.push((node.right_deref(), depth + 1));
    }
    Ok(())
}
