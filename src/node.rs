use std::ops::Deref;

use crate::error::Error;

/// Child slot addressing, left is 0 and right is 1.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    #[inline]
    pub(crate) fn flip(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Node corresponds to a single entry in a tree instance.
///
/// One layout serves every balancing strategy: the AVL walk keeps
/// `balance`, the red-black walk keeps `black`, the unbalanced walk
/// ignores both. Fresh nodes carry balance 0 and enter red.
#[derive(Clone)]
pub struct Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) balance: i8, // store: height(left) - height(right)
    pub(crate) black: bool, // store: black or red
    pub(crate) left: Option<Box<Node<K, V>>>,  // store: left child
    pub(crate) right: Option<Box<Node<K, V>>>, // store: right child
}

// Primary operations on a single node.
impl<K, V> Node<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    // CREATE operation
    pub(crate) fn new(key: K, value: V) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            balance: 0,
            black: false,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node<K, V>> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node<K, V>> {
        self.right.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn link(&self, dir: Dir) -> Option<&Node<K, V>> {
        match dir {
            Dir::Left => self.left_deref(),
            Dir::Right => self.right_deref(),
        }
    }

    #[inline]
    pub(crate) fn link_mut(&mut self, dir: Dir) -> &mut Option<Box<Node<K, V>>> {
        match dir {
            Dir::Left => &mut self.left,
            Dir::Right => &mut self.right,
        }
    }

    #[inline]
    pub(crate) fn take_link(&mut self, dir: Dir) -> Option<Box<Node<K, V>>> {
        self.link_mut(dir).take()
    }

    #[inline]
    pub(crate) fn put_link(&mut self, dir: Dir, link: Option<Box<Node<K, V>>>) {
        *self.link_mut(dir) = link;
    }

    // prepend operation, equivalent to SET / INSERT / UPDATE
    #[inline]
    pub(crate) fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.black = false
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.black
    }

    // every validator starts with the sort rule
    pub(crate) fn check_sorted(&self) -> Result<(), Error<K>> {
        if let Some(left) = self.left_deref() {
            if left.key.ge(&self.key) {
                return Err(Error::SortError(left.key.clone(), self.key.clone()));
            }
        }
        if let Some(right) = self.right_deref() {
            if right.key.le(&self.key) {
                return Err(Error::SortError(right.key.clone(), self.key.clone()));
            }
        }
        Ok(())
    }
}
