//! Keyed recency list: picks eviction victims for
//! [`ConversionCache`](crate::cache::ConversionCache).
//!
//! A doubly linked list of keys whose nodes live in a [`SlotArena`] and link
//! by [`SlotId`], plus an `FxHashMap` from key to node so a key can be moved
//! to the front in O(1).
//!
//! ## Architecture
//!
//! ```text
//!   index (FxHashMap<K, SlotId>)        nodes (SlotArena<Node<K>>)
//!   ┌───────────┬────────┐             ┌────────┬──────────────────────────┐
//!   │ 2024/CE   │ id_0   │ ──────────► │ id_0   │ { key, prev: -, next: 1 }│
//!   │ 2024/BE   │ id_1   │ ──────────► │ id_1   │ { key, prev: 0, next: 2 }│
//!   │ 1999/CE   │ id_2   │ ──────────► │ id_2   │ { key, prev: 1, next: - }│
//!   └───────────┴────────┘             └────────┴──────────────────────────┘
//!
//!   head ─► [id_0] ◄──► [id_1] ◄──► [id_2] ◄── tail
//!           (MRU)                    (LRU)
//! ```
//!
//! ## Operations
//!
//! | Method        | Complexity | Description                               |
//! |---------------|------------|-------------------------------------------|
//! | `push_front`  | O(1)       | Track a key as MRU (moves it if tracked)  |
//! | `touch`       | O(1)       | Move a tracked key to MRU                 |
//! | `pop_back`    | O(1)       | Remove and return the LRU key             |
//! | `remove`      | O(1)       | Stop tracking a key                       |
//! | `iter`        | O(n)       | Keys from MRU to LRU                      |
//!
//! `pop_back` returns `Option<K>`: an empty list is `None`, never a
//! sentinel key, so every key value (including year 0) can be evicted.
//!
//! Not thread-safe; `ConversionCache` guards it with a `parking_lot::Mutex`.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Recency-ordered set of keys. Head is most recently used.
#[derive(Debug)]
pub struct RecencyList<K> {
    nodes: SlotArena<Node<K>>,
    index: FxHashMap<K, SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K> RecencyList<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
        }
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Most recently used key.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|id| self.nodes.get(id)).map(|n| &n.key)
    }

    /// Least recently used key (the next eviction victim).
    pub fn back(&self) -> Option<&K> {
        self.tail.and_then(|id| self.nodes.get(id)).map(|n| &n.key)
    }

    /// Tracks `key` as most recently used.
    ///
    /// Returns `true` if the key was newly tracked, `false` if it was already
    /// present (in which case it is moved to the front).
    pub fn push_front(&mut self, key: K) -> bool {
        if self.touch(&key) {
            return false;
        }
        let id = self.nodes.insert(Node {
            key,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        self.index.insert(key, id);
        true
    }

    /// Moves a tracked key to the front. Returns `false` if not tracked.
    pub fn touch(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        if self.head != Some(id) {
            self.detach(id);
            self.attach_front(id);
        }
        true
    }

    /// Removes and returns the least recently used key.
    pub fn pop_back(&mut self) -> Option<K> {
        let id = self.tail?;
        self.detach(id);
        let node = self.nodes.remove(id)?;
        self.index.remove(&node.key);
        Some(node.key)
    }

    /// Stops tracking `key`. Returns `true` if it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        let Some(id) = self.index.remove(key) else {
            return false;
        };
        self.detach(id);
        self.nodes.remove(id);
        true
    }

    /// Forgets every key.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Walks the list and checks links, length and index agreement.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() != self.tail.is_none() {
            return Err(InvariantError::new("head and tail disagree on emptiness"));
        }
        if self.index.len() != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                self.nodes.len()
            )));
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .nodes
                .get(id)
                .ok_or_else(|| InvariantError::new("link points at a vacant slot"))?;
            if node.prev != prev {
                return Err(InvariantError::new("prev link does not match traversal"));
            }
            if self.index.get(&node.key) != Some(&id) {
                return Err(InvariantError::new("index does not point back at node"));
            }
            count += 1;
            if count > self.nodes.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            prev = Some(id);
            current = node.next;
        }
        if prev != self.tail {
            return Err(InvariantError::new("traversal did not end at tail"));
        }
        if count != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "traversal reached {count} nodes, arena holds {}",
                self.nodes.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) {
        let Some((prev, next)) = self.nodes.get(id).map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.next = next;
                }
            },
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes.get_mut(n) {
                    node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        if let Some(node) = self.nodes.get_mut(id) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.nodes.get_mut(h) {
                    node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }
}

impl<K> Default for RecencyList<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over keys from MRU to LRU.
pub struct Iter<'a, K> {
    list: &'a RecencyList<K>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.nodes.get(self.current?)?;
        self.current = node.next;
        Some(&node.key)
    }
}
