//! Circular doubly linked sequence with a sentinel node.
//!
//! # Layout
//!
//! Nodes live in a `Vec` arena and link to each other by index, so a
//! [`Slot`] stays valid across unrelated inserts and erases.  Index 0 is the
//! sentinel ("end"); an empty sequence is one whose sentinel links to itself:
//!
//! ```text
//!   end ⇄ a ⇄ b ⇄ c ⇄ end
//! ```
//!
//! Insert, erase, and moving-to-front/back are O(1).  `splice_before` moves a
//! whole sequence in O(moved) and `reverse` swaps every node's links in O(n).
//! Erased nodes go on a free list and are reused by later inserts.

use std::fmt;

/// Index of the sentinel in every arena.
const END: u32 = 0;

/// Stable handle of one node of a [`Sequence`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Slot(u32);

struct Node<T> {
    value: Option<T>,
    prev:  u32,
    next:  u32,
}

/// Ordered container with O(1) positional insert and erase.
pub struct Sequence<T> {
    nodes: Vec<Node<T>>,
    free:  Vec<u32>,
    len:   usize,
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node { value: None, prev: END, next: END }],
            free:  Vec::new(),
            len:   0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ── Positions ─────────────────────────────────────────────────────────

    /// The sentinel.  Inserting before it appends.
    #[inline]
    pub fn end(&self) -> Slot {
        Slot(END)
    }

    /// First node, or [`end`](Self::end) when empty.
    #[inline]
    pub fn begin(&self) -> Slot {
        Slot(self.nodes[END as usize].next)
    }

    /// Last node, or [`end`](Self::end) when empty.
    #[inline]
    pub fn last(&self) -> Slot {
        Slot(self.nodes[END as usize].prev)
    }

    #[inline]
    pub fn next(&self, slot: Slot) -> Slot {
        Slot(self.nodes[slot.0 as usize].next)
    }

    #[inline]
    pub fn prev(&self, slot: Slot) -> Slot {
        Slot(self.nodes[slot.0 as usize].prev)
    }

    /// `true` if `slot` names a live element (never the sentinel).
    pub fn contains_slot(&self, slot: Slot) -> bool {
        slot.0 != END
            && self
                .nodes
                .get(slot.0 as usize)
                .is_some_and(|n| n.value.is_some())
    }

    // ── Element access ────────────────────────────────────────────────────

    pub fn get(&self, slot: Slot) -> Option<&T> {
        self.nodes.get(slot.0 as usize)?.value.as_ref()
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.nodes.get_mut(slot.0 as usize)?.value.as_mut()
    }

    pub fn front(&self) -> Option<&T> {
        self.get(self.begin())
    }

    pub fn back(&self) -> Option<&T> {
        self.get(self.last())
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `value` immediately before `pos` and return its slot.
    pub fn insert_before(&mut self, pos: Slot, value: T) -> Slot {
        debug_assert!(pos.0 == END || self.contains_slot(pos));
        let prev = self.nodes[pos.0 as usize].prev;
        let node = Node { value: Some(value), prev, next: pos.0 };
        let idx = match self.free.pop() {
            Some(i) => {
                self.nodes[i as usize] = node;
                i
            }
            None => {
                self.nodes.push(node);
                (self.nodes.len() - 1) as u32
            }
        };
        self.nodes[prev as usize].next = idx;
        self.nodes[pos.0 as usize].prev = idx;
        self.len += 1;
        Slot(idx)
    }

    pub fn push_back(&mut self, value: T) -> Slot {
        self.insert_before(self.end(), value)
    }

    pub fn push_front(&mut self, value: T) -> Slot {
        self.insert_before(self.begin(), value)
    }

    /// Unlink `slot` and return its value together with its successor.
    ///
    /// Returns `None` for the sentinel or a slot that is no longer live.
    pub fn remove(&mut self, slot: Slot) -> Option<(T, Slot)> {
        if !self.contains_slot(slot) {
            return None;
        }
        let i = slot.0 as usize;
        let (prev, next) = (self.nodes[i].prev, self.nodes[i].next);
        self.nodes[prev as usize].next = next;
        self.nodes[next as usize].prev = prev;
        let value = self.nodes[i].value.take()?;
        self.free.push(slot.0);
        self.len -= 1;
        Some((value, Slot(next)))
    }

    /// Unlink `slot`, dropping its value; returns the successor.
    pub fn erase(&mut self, slot: Slot) -> Option<Slot> {
        self.remove(slot).map(|(_, next)| next)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(self.begin()).map(|(v, _)| v)
    }

    pub fn pop_back(&mut self) -> Option<T> {
        self.remove(self.last()).map(|(v, _)| v)
    }

    /// Move every element of `source`, in order, before `pos`.
    ///
    /// `source` is left empty.  Returns the slots the moved elements now
    /// occupy in `self`, in order, so the caller can undo the splice.
    pub fn splice_before(&mut self, pos: Slot, source: &mut Sequence<T>) -> Vec<Slot> {
        let mut moved = Vec::with_capacity(source.len());
        while let Some(value) = source.pop_front() {
            moved.push(self.insert_before(pos, value));
        }
        moved
    }

    /// Reverse the order of all elements in place.
    pub fn reverse(&mut self) {
        for node in &mut self.nodes {
            std::mem::swap(&mut node.prev, &mut node.next);
        }
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { seq: self, cur: self.begin().0, remaining: self.len }
    }

    /// Like [`iter`](Self::iter) but also yields each element's slot.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, &T)> + '_ {
        let mut cur = self.begin();
        std::iter::from_fn(move || {
            let value = self.get(cur)?;
            let slot = cur;
            cur = self.next(cur);
            Some((slot, value))
        })
    }

    /// Slot of the first element matching `pred`.
    pub fn find_slot<P: FnMut(&T) -> bool>(&self, mut pred: P) -> Option<Slot> {
        self.slots().find(|(_, v)| pred(v)).map(|(s, _)| s)
    }
}

impl<T: PartialEq> Sequence<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<T: Clone> Clone for Sequence<T> {
    /// Clones compact the arena; slots of the original are not valid in the
    /// copy.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// ── Iter ──────────────────────────────────────────────────────────────────────

pub struct Iter<'a, T> {
    seq:       &'a Sequence<T>,
    cur:       u32,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let value = self.seq.get(Slot(self.cur))?;
        self.cur = self.seq.nodes[self.cur as usize].next;
        self.remaining -= 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
