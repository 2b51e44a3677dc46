use crate::flight::ScheduleSlot;
use std::fmt;
use std::iter::FusedIterator;

/// Index of a slot inside a [`SlotPool`]. Only the pool hands these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(usize);

impl SlotHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    Free,
    Active,
}

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Sequence {
    head: Option<usize>,
    len: usize,
}

/// Head-to-tail walk over one of the pool's sequences.
#[derive(Debug, Clone)]
pub struct SlotIter<'a> {
    links: &'a [Links],
    cursor: Option<usize>,
    remaining: usize,
}

impl Iterator for SlotIter<'_> {
    type Item = SlotHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        self.cursor = self.links[current].next;
        self.remaining -= 1;
        Some(SlotHandle(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SlotIter<'_> {}

impl FusedIterator for SlotIter<'_> {}

/// Fixed set of schedule slots split into a free and an active sequence.
///
/// Both sequences are doubly linked through `links`, so moving a slot from
/// one to the other is O(1) regardless of its position. Every slot is a
/// member of exactly one sequence.
#[derive(Debug, Clone)]
pub struct SlotPool {
    slots: Vec<ScheduleSlot>,
    links: Vec<Links>,
    membership: Vec<Membership>,
    free: Sequence,
    active: Sequence,
}

impl SlotPool {
    pub fn new(capacity: usize) -> SlotPool {
        let links = (0..capacity)
            .map(|i| Links {
                prev: i.checked_sub(1),
                next: (i + 1 < capacity).then_some(i + 1),
            })
            .collect();

        let pool = SlotPool {
            slots: vec![ScheduleSlot::default(); capacity],
            links,
            membership: vec![Membership::Free; capacity],
            free: Sequence {
                head: (capacity > 0).then_some(0),
                len: capacity,
            },
            active: Sequence::default(),
        };
        pool.assert_invariants();
        pool
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len
    }

    pub fn active_len(&self) -> usize {
        self.active.len
    }

    pub fn is_active(&self, handle: SlotHandle) -> bool {
        self.membership.get(handle.0) == Some(&Membership::Active)
    }

    /// Moves the head of the free sequence to the head of the active one.
    pub fn allocate(&mut self) -> Option<SlotHandle> {
        let index = self.free.head?;
        self.unlink(index);
        self.push_front(Membership::Active, index);
        self.assert_invariants();
        Some(SlotHandle(index))
    }

    /// Returns an active slot to the head of the free sequence, reset to its
    /// empty template.
    pub fn release(&mut self, handle: SlotHandle) {
        debug_assert!(self.is_active(handle), "released slot {handle} is not active");
        if !self.is_active(handle) {
            return;
        }
        self.unlink(handle.0);
        self.slots[handle.0].reset();
        self.push_front(Membership::Free, handle.0);
        self.assert_invariants();
    }

    pub fn get(&self, handle: SlotHandle) -> &ScheduleSlot {
        &self.slots[handle.0]
    }

    pub fn get_mut(&mut self, handle: SlotHandle) -> &mut ScheduleSlot {
        &mut self.slots[handle.0]
    }

    pub fn active_iter(&self) -> SlotIter<'_> {
        self.iter(self.active)
    }

    pub fn free_iter(&self) -> SlotIter<'_> {
        self.iter(self.free)
    }

    fn iter(&self, sequence: Sequence) -> SlotIter<'_> {
        SlotIter {
            links: &self.links,
            cursor: sequence.head,
            remaining: sequence.len,
        }
    }

    fn sequence_mut(&mut self, membership: Membership) -> &mut Sequence {
        match membership {
            Membership::Free => &mut self.free,
            Membership::Active => &mut self.active,
        }
    }

    fn push_front(&mut self, membership: Membership, index: usize) {
        let sequence = self.sequence_mut(membership);
        let old_head = sequence.head.replace(index);
        sequence.len += 1;

        self.links[index] = Links {
            prev: None,
            next: old_head,
        };
        if let Some(next) = old_head {
            self.links[next].prev = Some(index);
        }
        self.membership[index] = membership;
    }

    fn unlink(&mut self, index: usize) {
        let Links { prev, next } = std::mem::take(&mut self.links[index]);
        let membership = self.membership[index];
        let sequence = self.sequence_mut(membership);
        sequence.len -= 1;
        if prev.is_none() {
            sequence.head = next;
        }

        if let Some(prev) = prev {
            self.links[prev].next = next;
        }
        if let Some(next) = next {
            self.links[next].prev = prev;
        }
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        debug_assert_eq!(
            self.free.len + self.active.len,
            self.capacity(),
            "Slot conservation violated"
        );

        let mut seen = vec![false; self.capacity()];
        for (membership, sequence) in [
            (Membership::Free, self.free),
            (Membership::Active, self.active),
        ] {
            let mut prev = None;
            for handle in self.iter(sequence) {
                debug_assert!(!seen[handle.0], "Slot {handle} linked twice");
                seen[handle.0] = true;
                debug_assert_eq!(self.membership[handle.0], membership);
                debug_assert_eq!(self.links[handle.0].prev, prev, "Back link broken");
                prev = Some(handle.0);
            }
        }
        debug_assert!(seen.iter().all(|s| *s), "Slot missing from both sequences");
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}
