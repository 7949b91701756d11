//! Sequence implementation
//!
//! Arena-backed singly-linked list with head/tail indices and a running length.

use std::fmt;

/// Stable reference to a node returned by [`Sequence::push_back`]
///
/// Resolves through [`Sequence::node`] until that node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    slot: usize,
    generation: u64,
}

/// Arena slot; `value` is `None` while the slot sits on the free list
struct Slot<T> {
    value: Option<T>,
    next: Option<usize>,
    generation: u64,
}

/// Ordered singly-linked sequence
///
/// Not `Clone`: the sequence exclusively owns its nodes. Moving it transfers
/// ownership of the whole chain.
pub struct Sequence<T> {
    /// Node storage, linked through `Slot::next`
    slots: Vec<Slot<T>>,
    /// Recycled slot indices
    free: Vec<usize>,
    /// First node in order
    head: Option<usize>,
    /// Last node reachable from `head` (None iff empty)
    tail: Option<usize>,
    /// Number of linked nodes
    len: usize,
}

impl<T> Sequence<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Append a value after the current tail
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let slot = self.allocate(value);

        match self.tail {
            Some(tail) => self.slots[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;

        NodeHandle {
            slot,
            generation: self.slots[slot].generation,
        }
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove and return the first element
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.unlink(None, head)
    }

    /// Remove the first element equal to `value`
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let (prev, target) = self.locate(|v| v == value)?;
        self.unlink(prev, target)
    }

    /// Remove the first element matching `predicate`
    pub fn remove_by<F>(&mut self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let (prev, target) = self.locate(predicate)?;
        self.unlink(prev, target)
    }

    /// Remove the element at `index` (0-based)
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        let mut prev = None;
        let mut cursor = self.head?;
        for _ in 0..index {
            prev = Some(cursor);
            cursor = self.slots[cursor].next?;
        }

        self.unlink(prev, cursor)
    }

    /// Release every node and reset to empty
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation += 1;
                slot.next = None;
                self.free.push(index);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// First element equal to `value`
    pub fn search(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter().find(|v| *v == value)
    }

    /// First element matching `predicate`
    pub fn search_by<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|v| predicate(*v))
    }

    /// Element at `index` (0-based), walking from the head
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.iter().nth(index)
    }

    /// Resolve a handle returned by `push_back`
    pub fn node(&self, handle: NodeHandle) -> Option<&T> {
        self.slots
            .get(handle.slot)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn first(&self) -> Option<&T> {
        self.head.and_then(|slot| self.slots[slot].value.as_ref())
    }

    pub fn last(&self) -> Option<&T> {
        self.tail.and_then(|slot| self.slots[slot].value.as_ref())
    }

    /// New sequence borrowing every matching element, in order
    pub fn filter<F>(&self, mut predicate: F) -> Sequence<&T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut out = Sequence::new();
        for value in self.iter() {
            if predicate(value) {
                out.push_back(value);
            }
        }
        out
    }

    /// Iterate front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn allocate(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.value = Some(value);
                slot.next = None;
                index
            }
            None => {
                self.slots.push(Slot {
                    value: Some(value),
                    next: None,
                    generation: 0,
                });
                self.slots.len() - 1
            }
        }
    }

    /// Find `(predecessor, node)` of the first element matching `predicate`
    fn locate<F>(&self, mut predicate: F) -> Option<(Option<usize>, usize)>
    where
        F: FnMut(&T) -> bool,
    {
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let slot = &self.slots[index];
            if slot.value.as_ref().is_some_and(&mut predicate) {
                return Some((prev, index));
            }
            prev = Some(index);
            cursor = slot.next;
        }

        None
    }

    /// Splice `target` out of the chain; `prev` must be its predecessor
    fn unlink(&mut self, prev: Option<usize>, target: usize) -> Option<T> {
        let next = self.slots[target].next.take();

        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.head = next,
        }
        if self.tail == Some(target) {
            self.tail = prev;
        }
        self.len -= 1;

        let slot = &mut self.slots[target];
        slot.generation += 1;
        let value = slot.value.take();
        self.free.push(target);
        value
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Borrowing iterator over a [`Sequence`]
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let slots = self.slots;
        let slot = &slots[self.cursor?];
        self.cursor = slot.next;
        self.remaining = self.remaining.saturating_sub(1);
        slot.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// Owning iterator over a [`Sequence`]
pub struct IntoIter<T> {
    sequence: Sequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.sequence.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.sequence.len(), Some(self.sequence.len()))
    }
}
