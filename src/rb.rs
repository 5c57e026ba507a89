use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::bst::Stats;
use crate::error::Error;
use crate::node::{Dir, Node};

// Fresh nodes enter red. The insert walk fixes red-red pairs on the way
// back up and stops once the parent link is black; the remove walk
// carries a "black deficiency resolved" flag. Symmetric cases share one
// code path through Dir.

pub(crate) fn insert<K, V>(root: &mut Option<Box<Node<K, V>>>, key: K, value: V) -> Option<V>
where
    K: Clone + Ord,
    V: Clone,
{
    let (mut node, old_value) = insert_r(root.take(), key, value);
    node.set_black();
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
    if let Some(node) = root.as_mut() {
        node.set_black();
    }
    old_value
}

type Insert<K, V> = (Box<Node<K, V>>, Option<V>);
type Remove<K, V> = (Option<Box<Node<K, V>>>, Option<V>, bool);
type Popmin<K, V> = (Option<Box<Node<K, V>>>, (K, V), bool);

fn insert_r<K, V>(node: Option<Box<Node<K, V>>>, key: K, value: V) -> Insert<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut node = match node {
        None => return (Node::new(key, value), None),
        Some(node) => node,
    };

    let dir = match key.cmp(&node.key) {
        Ordering::Equal => {
            let old_value = node.set_value(value);
            return (node, Some(old_value));
        }
        Ordering::Less => Dir::Left,
        Ordering::Greater => Dir::Right,
    };
    let (child, old_value) = insert_r(node.take_link(dir), key, value);
    node.put_link(dir, Some(child));
    (insert_balance(node, dir), old_value)
}

// `node` sits two levels above a possibly reddened position under
// `dir`: red uncle means recolor, black uncle means one or two
// rotations depending on straight or zig-zag shape.
fn insert_balance<K, V>(mut node: Box<Node<K, V>>, dir: Dir) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    if !is_red(node.link(dir)) {
        return node;
    }
    if is_red(node.link(dir.flip())) {
        let violation = {
            let child = node.link(dir).unwrap();
            is_red(child.link(Dir::Left)) || is_red(child.link(Dir::Right))
        };
        if violation {
            // red uncle: pull the black down from this level
            node.set_red();
            node.left.as_mut().unwrap().set_black();
            node.right.as_mut().unwrap().set_black();
        }
        node
    } else if is_red(node.link(dir).unwrap().link(dir)) {
        rotate(node, dir.flip())
    } else if is_red(node.link(dir).unwrap().link(dir.flip())) {
        rotate_double(node, dir.flip())
    } else {
        node
    }
}

fn remove_r<K, V, Q>(node: Option<Box<Node<K, V>>>, key: &Q) -> Remove<K, V>
where
    K: Clone + Ord + Borrow<Q>,
    V: Clone,
    Q: Ord + ?Sized,
{
    let mut node = match node {
        None => return (None, None, true),
        Some(node) => node,
    };

    let dir = match key.cmp(node.key.borrow()) {
        Ordering::Equal => {
            if node.left.is_some() && node.right.is_some() {
                // two children: the in-order successor's pair moves up
                // here and removal continues down the right spine
                let (right, (succ_key, succ_value), done) =
                    remove_min(node.right.take().unwrap());
                node.right = right;
                node.key = succ_key;
                let old_value = node.set_value(succ_value);
                if done {
                    return (Some(node), Some(old_value), true);
                }
                let (node, done) = remove_balance(node, Dir::Right);
                return (Some(node), Some(old_value), done);
            }
            let (child, node, done) = unlink(node);
            return (child, Some(node.value), done);
        }
        Ordering::Less => Dir::Left,
        Ordering::Greater => Dir::Right,
    };
    let (child, old_value, done) = remove_r(node.take_link(dir), key);
    node.put_link(dir, child);
    if done {
        return (Some(node), old_value, true);
    }
    let (node, done) = remove_balance(node, dir);
    (Some(node), old_value, done)
}

fn remove_min<K, V>(mut node: Box<Node<K, V>>) -> Popmin<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    match node.left.take() {
        None => {
            let (child, node, done) = unlink(node);
            (child, (node.key, node.value), done)
        }
        Some(left) => {
            let (left, item, done) = remove_min(left);
            node.left = left;
            if done {
                return (Some(node), item, true);
            }
            let (node, done) = remove_balance(node, Dir::Left);
            (Some(node), item, done)
        }
    }
}

// Splice out a node with at most one child. A red node leaves no
// deficiency; a black node with a red child recolors it; a black node
// with a black (or no) child hands the deficiency to the caller.
fn unlink<K, V>(mut node: Box<Node<K, V>>) -> (Option<Box<Node<K, V>>>, Node<K, V>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    let mut child = node.left.take().or_else(|| node.right.take());
    let mut done = !node.is_black();
    if let Some(child) = child.as_mut() {
        if !done && !child.is_black() {
            child.set_black();
            done = true;
        }
    }
    (child, *node, done)
}

// The subtree under `dir` is one black short; `node` is its parent.
fn remove_balance<K, V>(node: Box<Node<K, V>>, dir: Dir) -> (Box<Node<K, V>>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    if is_red(node.link(dir.flip())) {
        // red sibling: lift it, the deficient side gains a red parent
        // and a black sibling one level down
        let mut node = rotate(node, dir);
        let (child, done) = balance_black_sibling(node.take_link(dir).unwrap(), dir);
        node.put_link(dir, Some(child));
        (node, done)
    } else {
        balance_black_sibling(node, dir)
    }
}

// Sibling of the deficient side is black here. A red nephew resolves
// the shortage with rotations; two black nephews push it to the parent,
// where a red parent absorbs it.
fn balance_black_sibling<K, V>(mut node: Box<Node<K, V>>, dir: Dir) -> (Box<Node<K, V>>, bool)
where
    K: Clone + Ord,
    V: Clone,
{
    let (near_red, far_red) = match node.link(dir.flip()) {
        None => return (node, false),
        Some(sibling) => (is_red(sibling.link(dir)), is_red(sibling.link(dir.flip()))),
    };
    if !near_red && !far_red {
        let done = !node.is_black();
        node.set_black();
        node.link_mut(dir.flip()).as_mut().unwrap().set_red();
        (node, done)
    } else {
        let was_black = node.is_black();
        let mut node = if far_red {
            rotate(node, dir)
        } else {
            rotate_double(node, dir)
        };
        if was_black {
            node.set_black();
        } else {
            node.set_red();
        }
        node.left.as_mut().unwrap().set_black();
        node.right.as_mut().unwrap().set_black();
        (node, true)
    }
}

//--------- rotation routines for the color rules ----------------

//            node                pivot
//            /  \                /  \
//           a   pivot    =>   node   c        (dir == Left)
//               /  \          /  \
//              b    c        a    b
//
// The lifted pivot takes the top slot black and leaves the old top red;
// callers needing other colors repaint afterwards.
fn rotate<K, V>(mut node: Box<Node<K, V>>, dir: Dir) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    let mut pivot = node.take_link(dir.flip()).unwrap();
    node.put_link(dir.flip(), pivot.take_link(dir));
    node.set_red();
    pivot.set_black();
    pivot.put_link(dir, Some(node));
    pivot
}

fn rotate_double<K, V>(mut node: Box<Node<K, V>>, dir: Dir) -> Box<Node<K, V>>
where
    K: Clone + Ord,
    V: Clone,
{
    let child = rotate(node.take_link(dir.flip()).unwrap(), dir.flip());
    node.put_link(dir.flip(), Some(child));
    rotate(node, dir)
}

fn is_red<K, V>(node: Option<&Node<K, V>>) -> bool
where
    K: Clone + Ord,
    V: Clone,
{
    node.map_or(false, |node| !node.is_black())
}

// Check the color rules top-down, counting blacks per path. `fromred`
// seeds with the root's own color, so a red root trips the consecutive
// check. Returns the black count from this position to the leaves.
pub(crate) fn validate_tree<K, V>(
    node: Option<&Node<K, V>>,
    fromred: bool,
    mut nblacks: usize,
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
            return Ok(nblacks);
        }
        Some(node) => node,
    };

    let red = !node.is_black();
    if fromred && red {
        return Err(Error::ConsecutiveReds);
    }
    node.check_sorted()?;
    if !red {
        nblacks += 1;
    }
    let lblacks = validate_tree(node.left_deref(), red, nblacks, depth + 1, stats)?;
    let rblacks = validate_tree(node.right_deref(), red, nblacks, depth + 1, stats)?;
    if lblacks != rblacks {
        let err = format!("left: {} right: {}", lblacks, rblacks);
        return Err(Error::UnbalancedBlacks(err));
    }
    Ok(lblacks)
}
