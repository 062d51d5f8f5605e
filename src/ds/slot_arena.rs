//! Node storage for [`RecencyList`](crate::ds::RecencyList).
//!
//! Nodes are addressed by [`SlotId`] so relinking a node never moves it.
//! Vacated slots form an intrusive free chain: each vacant slot stores the
//! index of the next vacant one, and `insert` pops from the head of that
//! chain before growing the vector.

/// Handle to an occupied slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value` in the most recently vacated slot, or a new one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        let Some(idx) = self.free_head else {
            self.slots.push(Slot::Occupied(value));
            return SlotId(self.slots.len() - 1);
        };
        if let Slot::Vacant { next_free } = self.slots[idx] {
            self.free_head = next_free;
        }
        self.slots[idx] = Slot::Occupied(value);
        SlotId(idx)
    }

    /// Vacates `id`; `None` if it was already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(value) = std::mem::replace(slot, vacant) else {
            return None;
        };
        self.free_head = Some(id.0);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node, keeping the allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}
