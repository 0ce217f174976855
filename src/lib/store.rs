//! Ordered storage with stable handles.
//!
//! [`LineStore`] is a doubly-linked sequence whose nodes live in an arena.
//! Each slot carries a generation counter which is bumped when the slot is
//! freed, so a [`Handle`] kept by a caller either resolves to the node it was
//! issued for or to nothing at all. Insertions and removals elsewhere in the
//! sequence never invalidate a handle.

/// Opaque reference to an entry of a [`LineStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
  slot: usize,
  generation: u32,
}

#[derive(Debug, Clone)]
struct Node<T> {
  value: T,
  prev: Option<usize>,
  next: Option<usize>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
  generation: u32,
  node: Option<Node<T>>,
}

#[derive(Debug, Clone)]
pub struct LineStore<T> {
  slots: Vec<Slot<T>>,
  free: Vec<usize>,
  head: Option<usize>,
  tail: Option<usize>,
  len: usize,
}

impl<T> Default for LineStore<T> {
  fn default() -> Self {
    Self {
      slots: Vec::new(),
      free: Vec::new(),
      head: None,
      tail: None,
      len: 0,
    }
  }
}

impl<T> LineStore<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Appends `value` at the end of the sequence.
  pub fn push_back(&mut self, value: T) -> Handle {
    let prev = self.tail;
    let slot = self.alloc(Node {
      value,
      prev,
      next: None,
    });

    match prev {
      Some(prev) => self.node_mut(prev).next = Some(slot),
      None => self.head = Some(slot),
    }
    self.tail = Some(slot);

    self.handle(slot)
  }

  /// Inserts `value` immediately before the entry referenced by `at`.
  ///
  /// Returns `None` without inserting if `at` is stale.
  pub fn insert_before(&mut self, at: Handle, value: T) -> Option<Handle> {
    self.get(at)?;

    let prev = self.node(at.slot).prev;
    let slot = self.alloc(Node {
      value,
      prev,
      next: Some(at.slot),
    });

    self.node_mut(at.slot).prev = Some(slot);
    match prev {
      Some(prev) => self.node_mut(prev).next = Some(slot),
      None => self.head = Some(slot),
    }

    Some(self.handle(slot))
  }

  /// Unlinks the entry referenced by `handle` and returns its value.
  pub fn remove(&mut self, handle: Handle) -> Option<T> {
    self.get(handle)?;

    let entry = &mut self.slots[handle.slot];
    let node = entry.node.take()?;
    entry.generation = entry.generation.wrapping_add(1);
    self.free.push(handle.slot);
    self.len -= 1;

    match node.prev {
      Some(prev) => self.node_mut(prev).next = node.next,
      None => self.head = node.next,
    }
    match node.next {
      Some(next) => self.node_mut(next).prev = node.prev,
      None => self.tail = node.prev,
    }

    Some(node.value)
  }

  pub fn get(&self, handle: Handle) -> Option<&T> {
    let entry = self.slots.get(handle.slot)?;
    if entry.generation != handle.generation {
      return None;
    }
    entry.node.as_ref().map(|node| &node.value)
  }

  pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
    let entry = self.slots.get_mut(handle.slot)?;
    if entry.generation != handle.generation {
      return None;
    }
    entry.node.as_mut().map(|node| &mut node.value)
  }

  pub fn contains(&self, handle: Handle) -> bool {
    self.get(handle).is_some()
  }

  pub fn front(&self) -> Option<Handle> {
    self.head.map(|slot| self.handle(slot))
  }

  pub fn back(&self) -> Option<Handle> {
    self.tail.map(|slot| self.handle(slot))
  }

  /// Handle of the entry preceding `handle`, if any.
  pub fn prev(&self, handle: Handle) -> Option<Handle> {
    self.get(handle)?;
    self.node(handle.slot).prev.map(|slot| self.handle(slot))
  }

  /// Handle of the entry following `handle`, if any.
  pub fn next(&self, handle: Handle) -> Option<Handle> {
    self.get(handle)?;
    self.node(handle.slot).next.map(|slot| self.handle(slot))
  }

  pub fn iter(&self) -> Iter<'_, T> {
    Iter {
      store: self,
      cursor: self.head,
      remaining: self.len,
    }
  }

  fn alloc(&mut self, node: Node<T>) -> usize {
    self.len += 1;
    match self.free.pop() {
      Some(slot) => {
        self.slots[slot].node = Some(node);
        slot
      }
      None => {
        self.slots.push(Slot {
          generation: 0,
          node: Some(node),
        });
        self.slots.len() - 1
      }
    }
  }

  fn handle(&self, slot: usize) -> Handle {
    Handle {
      slot,
      generation: self.slots[slot].generation,
    }
  }

  // Linked slots are always occupied; an empty one means the links are corrupt.
  fn node(&self, slot: usize) -> &Node<T> {
    match &self.slots[slot].node {
      Some(node) => node,
      None => unreachable!("linked slot {} is vacant", slot),
    }
  }

  fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
    match &mut self.slots[slot].node {
      Some(node) => node,
      None => unreachable!("linked slot {} is vacant", slot),
    }
  }
}

/// In-order iterator over a [`LineStore`].
pub struct Iter<'a, T> {
  store: &'a LineStore<T>,
  cursor: Option<usize>,
  remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  fn next(&mut self) -> Option<Self::Item> {
    let slot = self.cursor?;
    let node = self.store.node(slot);
    self.cursor = node.next;
    self.remaining -= 1;
    Some(&node.value)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.remaining, Some(self.remaining))
  }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LineStore<T> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn collect(store: &LineStore<&'static str>) -> Vec<&'static str> {
    store.iter().copied().collect()
  }

  #[test]
  fn test_push_back_keeps_order() {
    let mut store = LineStore::new();
    store.push_back("a");
    store.push_back("b");
    store.push_back("c");

    assert_eq!(collect(&store), vec!["a", "b", "c"]);
    assert_eq!(store.len(), 3);
  }

  #[test]
  fn test_insert_before() {
    let mut store = LineStore::new();
    let a = store.push_back("a");
    let c = store.push_back("c");

    store.insert_before(c, "b").unwrap();
    store.insert_before(a, "start").unwrap();

    assert_eq!(collect(&store), vec!["start", "a", "b", "c"]);
    assert_eq!(store.get(store.front().unwrap()), Some(&"start"));
    assert_eq!(store.get(store.back().unwrap()), Some(&"c"));
  }

  #[test]
  fn test_remove_relinks_neighbours() {
    let mut store = LineStore::new();
    let a = store.push_back("a");
    let b = store.push_back("b");
    let c = store.push_back("c");

    assert_eq!(store.remove(b), Some("b"));
    assert_eq!(collect(&store), vec!["a", "c"]);
    assert_eq!(store.next(a), Some(c));
    assert_eq!(store.prev(c), Some(a));

    assert_eq!(store.remove(a), Some("a"));
    assert_eq!(store.remove(c), Some("c"));
    assert!(store.is_empty());
    assert_eq!(store.front(), None);
    assert_eq!(store.back(), None);
  }

  #[test]
  fn test_stale_handle_after_slot_reuse() {
    let mut store = LineStore::new();
    let a = store.push_back("a");
    store.remove(a);

    let b = store.push_back("b");
    assert_eq!(store.get(a), None);
    assert_eq!(store.get(b), Some(&"b"));
    assert_eq!(store.remove(a), None);
    assert_eq!(store.insert_before(a, "x"), None);
    assert_eq!(collect(&store), vec!["b"]);
  }

  #[test]
  fn test_handles_survive_unrelated_edits() {
    let mut store = LineStore::new();
    let a = store.push_back("a");
    let b = store.push_back("b");
    store.insert_before(b, "x");
    store.remove(a);

    *store.get_mut(b).unwrap() = "B";
    assert_eq!(collect(&store), vec!["x", "B"]);
  }
}
