use crate::error::Result;
use crate::options::Options;
use log::trace;
use rand::{rngs::StdRng, Rng};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::ptr::NonNull;

type Link<K> = Option<NonNull<SkipNode<K>>>;

struct SkipNode<K> {
    key: K,
    // sized to the node's height at creation, never resized
    next: Box<[Link<K>]>,
}

impl<K> SkipNode<K> {
    fn new_with_key(key: K, level: usize) -> Self {
        Self {
            key,
            next: vec![None; level].into_boxed_slice(),
        }
    }

    fn height(&self) -> usize {
        self.next.len()
    }
}

/// An ordered set of unique keys kept in a probabilistically balanced
/// multi-level linked list.
///
/// Every node is linked at levels `0..height` where the height is drawn by
/// coin flips at insertion, so each level holds about half the nodes of the
/// level below it and lookups take expected `O(log n)` steps.
pub struct SkipList<K> {
    max_level: usize,
    // number of levels holding at least one node
    height: usize,
    len: usize,
    // keyless sentinel, `max_level` slots
    head: Box<[Link<K>]>,
    rng: StdRng,
    _marker: PhantomData<Box<SkipNode<K>>>,
}

impl<K> SkipList<K>
where
    K: Ord,
{
    /// Creates a list with the default max height of 32, seeded from entropy.
    pub fn new() -> Self {
        Self::build(&Options::default())
    }

    pub fn with_max_height(max_height: usize) -> Result<Self> {
        Self::with_options(Options::default().max_height(max_height))
    }

    pub fn with_options(opts: Options) -> Result<Self> {
        opts.validate()?;
        Ok(Self::build(&opts))
    }

    fn build(opts: &Options) -> Self {
        Self {
            max_level: opts.max_height,
            height: 0,
            len: 0,
            head: vec![None; opts.max_height].into_boxed_slice(),
            rng: opts.rng(),
            _marker: PhantomData,
        }
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < self.max_level && self.rng.gen::<bool>() {
            level += 1;
        }
        level // [1, max_level]
    }

    /// For every level below the current height, the rightmost node whose
    /// key is less than `key`. `None` stands for the head, which is also what
    /// the levels at and above the current height hold.
    fn get_prevs(&self, key: &K) -> Vec<Link<K>> {
        let mut prevs = vec![None; self.max_level];
        let mut prev: Link<K> = None;
        for l in (0..self.height).rev() {
            let mut curr = self.next_at(prev, l);
            while let Some(node) = curr {
                let node = unsafe { node.as_ref() };
                if node.key >= *key {
                    break;
                }
                prev = curr;
                curr = node.next[l];
            }
            prevs[l] = prev;
        }
        prevs
    }

    /// The node right after `prev` at level 0, if it holds `key`.
    fn find_at(&self, prev: Link<K>, key: &K) -> Link<K> {
        self.next_at(prev, 0)
            .filter(|node| unsafe { node.as_ref().key == *key })
    }

    /// Inserts `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        let prevs = self.get_prevs(&key);
        if self.find_at(prevs[0], &key).is_some() {
            return false;
        }
        let level = self.random_level();
        if level > self.height {
            trace!("skiplist height grows {} -> {}", self.height, level);
            self.height = level;
        }
        let node = NonNull::from(Box::leak(Box::new(SkipNode::new_with_key(key, level))));
        for l in 0..level {
            let next = self.next_at(prevs[l], l);
            unsafe { (*node.as_ptr()).next[l] = next };
            self.set_next(prevs[l], l, Some(node));
        }
        self.len += 1;
        true
    }

    pub fn contain(&self, key: &K) -> bool {
        self.contain_with_steps(key).0
    }

    /// Like `contain`, also returning how many nodes were compared against
    /// `key` on the way down.
    pub fn contain_with_steps(&self, key: &K) -> (bool, usize) {
        let mut steps = 0;
        let mut prev: Link<K> = None;
        for l in (0..self.height).rev() {
            let mut curr = self.next_at(prev, l);
            while let Some(node) = curr {
                let node = unsafe { node.as_ref() };
                steps += 1;
                match node.key.cmp(key) {
                    Ordering::Less => {
                        prev = curr;
                        curr = node.next[l];
                    }
                    Ordering::Equal => return (true, steps),
                    Ordering::Greater => break,
                }
            }
        }
        (false, steps)
    }

    /// Removes `key`, returning `false` if it was not present.
    pub fn remove(&mut self, key: &K) -> bool {
        let prevs = self.get_prevs(key);
        let node = match self.find_at(prevs[0], key) {
            Some(node) => unsafe { Box::from_raw(node.as_ptr()) },
            None => return false,
        };
        for l in 0..node.height() {
            self.set_next(prevs[l], l, node.next[l]);
        }
        drop(node);
        self.len -= 1;

        let old_height = self.height;
        while self.height > 0 && self.head[self.height - 1].is_none() {
            self.height -= 1;
        }
        if self.height < old_height {
            trace!("skiplist height shrinks {} -> {}", old_height, self.height);
        }
        true
    }
}

impl<K> SkipList<K> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels currently holding at least one key.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_height(&self) -> usize {
        self.max_level
    }

    /// Drops every key. The list stays usable.
    pub fn clear(&mut self) {
        // unlink everything before freeing any node
        let mut curr = self.head[0];
        for link in self.head.iter_mut() {
            *link = None;
        }
        self.height = 0;
        self.len = 0;
        while let Some(node) = curr {
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            curr = node.next[0];
        }
    }

    fn next_at(&self, prev: Link<K>, level: usize) -> Link<K> {
        match prev {
            None => self.head[level],
            Some(node) => unsafe { node.as_ref().next[level] },
        }
    }

    fn set_next(&mut self, prev: Link<K>, level: usize, next: Link<K>) {
        match prev {
            None => self.head[level] = next,
            Some(node) => unsafe { (*node.as_ptr()).next[level] = next },
        }
    }

    fn fmt_levels<F>(&self, f: &mut fmt::Formatter, mut write_key: F) -> fmt::Result
    where
        F: FnMut(&mut fmt::Formatter, &K) -> fmt::Result,
    {
        for l in (0..self.height).rev() {
            write!(f, "Level {}:", l + 1)?;
            let mut curr = self.head[l];
            while let Some(node) = curr {
                let node = unsafe { node.as_ref() };
                write_key(f, &node.key)?;
                curr = node.next[l];
            }
            writeln!(f)?;
        }
        Ok(())
    }

    /// Keys linked at `level` with the height of their node.
    #[cfg(test)]
    fn level_nodes(&self, level: usize) -> Vec<(&K, usize)> {
        let mut nodes = vec![];
        let mut curr = self.head[level];
        while let Some(node) = curr {
            let node = unsafe { &*node.as_ptr() };
            nodes.push((&node.key, node.height()));
            curr = node.next[level];
        }
        nodes
    }
}

impl<K: Ord> Default for SkipList<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for SkipList<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Display> Display for SkipList<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_levels(f, |f, key| write!(f, " {}", key))
    }
}

impl<K: Debug> Debug for SkipList<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_levels(f, |f, key| write!(f, " {:?}", key))
    }
}
