// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory ordering state for previews and image sequences: a cursor that is
// clamped at both ends, and a permutation mutated only by adjacent swaps.

/// A cursor into a fixed-length collection, clamped to `[0, len - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    index: usize,
    len: usize,
}

impl PageCursor {
    /// Create a cursor at position 0. An empty collection pins the cursor at 0
    /// and makes every movement a no-op.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the cursor is on the first element.
    pub fn at_start(&self) -> bool {
        self.index == 0
    }

    /// Whether the cursor is on the last element.
    pub fn at_end(&self) -> bool {
        self.len == 0 || self.index == self.len - 1
    }

    /// Move one position back. No-op at the start; returns whether it moved.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Move one position forward. No-op at the end; returns whether it moved.
    pub fn next(&mut self) -> bool {
        if self.len > 0 && self.index < self.len - 1 {
            self.index += 1;
            true
        } else {
            false
        }
    }
}

/// Display order for a loaded image sequence.
///
/// Holds a permutation mapping display position to underlying image index,
/// plus a cursor marking the currently previewed position. The permutation is
/// mutated only by [`ImageOrder::move_up`] and [`ImageOrder::move_down`],
/// which swap the cursor's element with its neighbour and carry the cursor
/// along so the same image stays selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOrder {
    order: Vec<usize>,
    cursor: PageCursor,
}

impl ImageOrder {
    /// Identity permutation over `len` images, cursor at the first slot.
    pub fn new(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            cursor: PageCursor::new(len),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Underlying image index at the cursor's display position.
    pub fn current(&self) -> Option<usize> {
        self.order.get(self.cursor.index()).copied()
    }

    /// The permutation as a slice: `as_slice()[pos]` is the underlying index
    /// shown at display position `pos`.
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Swap the cursor's element with the one before it and follow it up.
    /// No-op when the cursor is on the first slot; returns whether it moved.
    pub fn move_up(&mut self) -> bool {
        let pos = self.cursor.index();
        if pos == 0 {
            return false;
        }
        self.order.swap(pos, pos - 1);
        self.cursor.prev();
        true
    }

    /// Swap the cursor's element with the one after it and follow it down.
    /// No-op when the cursor is on the last slot; returns whether it moved.
    pub fn move_down(&mut self) -> bool {
        let pos = self.cursor.index();
        if pos + 1 >= self.order.len() {
            return false;
        }
        self.order.swap(pos, pos + 1);
        self.cursor.next();
        true
    }

    /// Move the preview cursor without touching the permutation.
    pub fn prev(&mut self) -> bool {
        self.cursor.prev()
    }

    /// Move the preview cursor without touching the permutation.
    pub fn next(&mut self) -> bool {
        self.cursor.next()
    }

    /// Borrow `items` in display order.
    ///
    /// The permutation always indexes the collection it was created for, so
    /// `items.len()` must equal `self.len()`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        debug_assert_eq!(items.len(), self.order.len());
        self.order.iter().map(|&i| &items[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_order_on_creation() {
        let order = ImageOrder::new(4);
        assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
        assert_eq!(order.current(), Some(0));
    }

    #[test]
    fn move_up_at_start_is_noop() {
        let mut order = ImageOrder::new(3);
        assert!(!order.move_up());
        assert_eq!(order.as_slice(), &[0, 1, 2]);
        assert_eq!(order.cursor().index(), 0);
    }

    #[test]
    fn move_down_at_end_is_noop() {
        let mut order = ImageOrder::new(3);
        order.next();
        order.next();
        assert!(order.cursor().at_end());
        assert!(!order.move_down());
        assert_eq!(order.as_slice(), &[0, 1, 2]);
        assert_eq!(order.cursor().index(), 2);
    }

    #[test]
    fn move_down_swaps_and_follows() {
        let mut order = ImageOrder::new(3);
        assert!(order.move_down());
        assert_eq!(order.as_slice(), &[1, 0, 2]);
        // Cursor followed image 0 to position 1.
        assert_eq!(order.current(), Some(0));
    }

    #[test]
    fn up_down_pair_restores_original_order() {
        for n in 2..6 {
            let mut order = ImageOrder::new(n);
            // Walk the cursor somewhere in the middle first.
            order.next();
            let before = order.clone();
            assert!(order.move_up());
            assert!(order.move_down());
            assert_eq!(order, before);
        }
    }

    #[test]
    fn repeated_pairs_round_trip() {
        let mut order = ImageOrder::new(5);
        order.next();
        order.next();
        let before = order.clone();
        for _ in 0..7 {
            assert!(order.move_up());
            assert!(order.move_down());
        }
        assert_eq!(order, before);
    }

    #[test]
    fn apply_returns_items_in_display_order() {
        let mut order = ImageOrder::new(3);
        order.move_down(); // [1, 0, 2]
        let items = ["a", "b", "c"];
        let shown: Vec<&&str> = order.apply(&items);
        assert_eq!(shown, vec![&"b", &"a", &"c"]);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let mut cursor = PageCursor::new(2);
        assert!(!cursor.prev());
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.index(), 1);
    }

    #[test]
    fn empty_cursor_never_moves() {
        let mut cursor = PageCursor::new(0);
        assert!(!cursor.next());
        assert!(!cursor.prev());
        assert!(cursor.at_end());
    }
}
