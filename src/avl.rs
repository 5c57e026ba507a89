use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::bst::Stats;
use crate::error::Error;
use crate::node::Node;

// Balance factor convention: height(left) - height(right), kept within
// {-1, 0, 1}. The insert and remove walks carry a grew/shrunk flag back
// up and stop as soon as an ancestor's subtree height is known to be
// unchanged. An insert rotation always restores the prior height, so it
// ends the walk; a remove rotation can still shrink ancestors, so the
// walk keeps going.

pub(crate) fn insert<K, V>(root: &mut Option<Box<Node<K, V>>>, key: K, value: V) -> Option<V>
where
    K: Clone + Ord,
    V: Clone,
{
    let (node, old_value, _) = insert_r(root.take(), key, value);
    *root = Some(node);
    old_value
}

pub(crate) fn remove<K, V, Q>(root: &mut Option<Box<Node<K, V>>>, key: &Q) -> Option<V>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let (node, old_value, _) = remove_r(root.take(), key);
    *root = node;
    old_value
}

type Insert<K, V> = (Box<Node<K, V>>, Option<V>, bool);
type Remove<K, V> = (Option<Box<Node<K, V>>>, Option<V>, bool);
type Popmin<K, V> = (Option<Box<Node<K, V>>>, (K, V), bool);

fn insert_r<K, V>(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Insert<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut node = match node {
        None => return (Node::new(key, value), None, true),
        Some(node) => node,
    };

    match key.cmp(&node.key) {
        Ordering::Equal => {
            let old_value = node.set_value(value);
            (node, Some(old_value), false)
        }
        Ordering::Less => {
            let (left, old_value, grew) = insert_r(node.left.take(), key, value);
            node.left = Some(left);
            if !grew {
                return (node, old_value, false);
            }
            node.balance += 1;
            match node.balance {
                0 => (node, old_value, false),
                1 => (node, old_value, true),
                _ => (rebalance_left(node), old_value, false),
            }
        }
        Ordering::Greater => {
            let (right, old_value, grew) = insert_r(node.right.take(), key, value);
            node.right = Some(right);
            if !grew {
                return (node, old_value, false);
            }
            node.balance -= 1;
            match node.balance {
                0 => (node, old_value, false),
                -1 => (node, old_value, true),
                _ => (rebalance_right(node), old_value, false),
            }
        }
    }
}

fn remove_r<K, V, Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Remove<K, V>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut node = match node {
        None => return (None, None, false),
        Some(node) => node,
    };

    match key.cmp(node.key.borrow()) {
        Ordering::Less => {
            let (left, old_value, shrunk) = remove_r(node.left.take(), key);
            node.left = left;
            if !shrunk {
                return (Some(node), old_value, false);
            }
            let (node, shrunk) = shrink_left(node);
            (Some(node), old_value, shrunk)
        }
        Ordering::Greater => {
            let (right, old_value, shrunk) = remove_r(node.right.take(), key);
            node.right = right;
            if !shrunk {
                return (Some(node), old_value, false);
            }
            let (node, shrunk) = shrink_right(node);
            (Some(node), old_value, shrunk)
        }
        Ordering::Equal => {
            if node.left.is_some() && node.right.is_some() {
                // two children: the in-order successor's pair moves up
                // here and removal continues down the right spine
                let (right, (succ_key, succ_value), shrunk) =
                    remove_min(node.right.take().unwrap());
                node.right = right;
                node.key = succ_key;
                let old_value = node.set_value(succ_value);
                if !shrunk {
                    return (Some(node), Some(old_value), false);
                }
                let (node, shrunk) = shrink_right(node);
                (Some(node), Some(old_value), shrunk)
            } else {
                let child = node.left.take().or_else(|| node.right.take());
                let node = *node;
                (child, Some(node.value), true)
            }
        }
    }
}

fn remove_min<K, V>(mut node: Box<Node<K, V>>) -> Popmin<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    match node.left.take() {
        None => {
            let right = node.right.take();
            let node = *node;
            (right, (node.key, node.value), true)
        }
        Some(left) => {
            let (left, item, shrunk) = remove_min(left);
            node.left = left;
            if !shrunk {
                return (Some(node), item, false);
            }
            let (node, shrunk) = shrink_left(node);
            (Some(node), item, shrunk)
        }
    }
}

// The left subtree lost one level of height.
fn shrink_left<K, V>(mut node: Box<Node<K, V>>) -> (Box<Node<K, V>>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    node.balance -= 1;
    match node.balance {
        0 => (node, true),
        -1 => (node, false),
        _ => {
            let node = rebalance_right(node);
            let shrunk = node.balance == 0;
            (node, shrunk)
        }
    }
}

// The right subtree lost one level of height.
fn shrink_right<K, V>(mut node: Box<Node<K, V>>) -> (Box<Node<K, V>>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    node.balance += 1;
    match node.balance {
        0 => (node, true),
        1 => (node, false),
        _ => {
            let node = rebalance_left(node);
            let shrunk = node.balance == 0;
            (node, shrunk)
        }
    }
}

//--------- rotation routines for the height rule ----------------

// node.balance is +2, the left subtree is two levels taller. A left
// child leaning right needs the double rotation.
fn rebalance_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    if node.left.as_ref().unwrap().balance < 0 {
        let left = rotate_left(node.left.take().unwrap());
        node.left = Some(left);
    }
    rotate_right(node)
}

// node.balance is -2, the right subtree is two levels taller.
fn rebalance_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    if node.right.as_ref().unwrap().balance > 0 {
        let right = rotate_right(node.right.take().unwrap());
        node.right = Some(right);
    }
    rotate_left(node)
}

//              node                pivot
//              /  \                /  \
//          pivot   c      =>     a    node
//           /  \                      /  \
//          a    b                    b    c
//
// Factor updates below are the closed forms valid for any starting
// skew, so the same rotation serves the insert and remove walks.
fn rotate_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut pivot = node.left.take().unwrap();
    node.left = pivot.right.take();
    node.balance = node.balance - 1 - pivot.balance.max(0);
    pivot.balance = pivot.balance - 1 + node.balance.min(0);
    pivot.right = Some(node);
    pivot
}

//              node                     pivot
//              /  \                     /  \
//             a   pivot     =>      node    c
//                 /  \              /  \
//                b    c            a    b
//
fn rotate_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut pivot = node.right.take().unwrap();
    node.right = pivot.left.take();
    node.balance = node.balance + 1 - pivot.balance.min(0);
    pivot.balance = pivot.balance + 1 + node.balance.max(0);
    pivot.left = Some(node);
    pivot
}

// Measure heights bottom-up, checking the height rule and that every
// stored balance factor matches the measured difference. Returns the
// subtree height.
pub(crate) fn validate_tree<K, V>(
    node: Option<&Node<K, V>>,
    depth: usize,
    stats: &mut Stats,
) -> Result<usize, Error<K>>
where
    K: Clone + Ord,
    V: Clone,
{
    let node = match node {
        None => {
            stats.sample_depth(depth);
            return Ok(0);
        }
        Some(node) => node,
    };

    node.check_sorted()?;
    let lheight = validate_tree(node.left_deref(), depth + 1, stats)?;
    let rheight = validate_tree(node.right_deref(), depth + 1, stats)?;
    let diff = lheight as isize - rheight as isize;
    if diff < -1 || diff > 1 {
        let err = format!("left: {} right: {}", lheight, rheight);
        return Err(Error::UnbalancedHeights(err));
    }
    if node.balance as isize != diff {
        let err = format!("stored: {} actual: {}", node.balance, diff);
        return Err(Error::UnbalancedHeights(err));
    }
    Ok(1 + lheight.max(rheight))
}
