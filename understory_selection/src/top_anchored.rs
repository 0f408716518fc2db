// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A selection that always forms a prefix of the list.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::{
    ChangeCallback, ChangeSignal, KeyedItem, Selection, SelectionMode, SelectionModel,
    SelectionOptions,
};

/// A [`SelectionModel`] permanently anchored to the top of the list.
///
/// Selecting an item also selects every item before it, so the selected items
/// are always `0..n` for some `n`. This is the checkbox behavior of "process
/// the first N rows" style lists.
///
/// Only [`toggle_index_selected`](SelectionModel::toggle_index_selected) and
/// [`toggle_range_selected`](SelectionModel::toggle_range_selected) maintain
/// the prefix shape. Every other method forwards to an inner [`Selection`]
/// unchanged; callers that use them to select arbitrary items are responsible
/// for keeping the selection a prefix.
///
/// ```rust
/// use understory_selection::{SelectionModel, TopAnchoredRangeSelection};
///
/// let mut selection = TopAnchoredRangeSelection::new();
/// selection.set_items(vec!["a", "b", "c", "d", "e"], true);
///
/// selection.toggle_index_selected(2);
/// assert_eq!(selection.selected_indices(), [0, 1, 2]);
///
/// // Toggling the last selected item shrinks the prefix by one.
/// selection.toggle_index_selected(2);
/// assert_eq!(selection.selected_indices(), [0, 1]);
///
/// // A group header toggles a range; selecting it extends the prefix over it.
/// selection.toggle_range_selected(2, 2);
/// assert_eq!(selection.selected_indices(), [0, 1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct TopAnchoredRangeSelection<T> {
    selection: Selection<T>,
    signal: ChangeSignal,
}

impl<T: KeyedItem> Default for TopAnchoredRangeSelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyedItem> TopAnchoredRangeSelection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::with_callback(None)
    }

    /// Creates an empty selection that calls `callback` after every change.
    ///
    /// The callback runs after this selection's
    /// [`change_signal`](SelectionModel::change_signal) listeners.
    #[must_use]
    pub fn with_on_selection_changed(callback: impl FnMut() + 'static) -> Self {
        Self::with_callback(Some(Box::new(callback)))
    }

    fn with_callback(mut callback: Option<ChangeCallback>) -> Self {
        let signal = ChangeSignal::new();
        let outer = signal.clone();
        let selection = Selection::with_options(SelectionOptions::new().with_on_selection_changed(
            move || {
                outer.raise();
                if let Some(callback) = callback.as_mut() {
                    callback();
                }
            },
        ));
        Self { selection, signal }
    }

    fn is_index_last_in_selected_range(&self, index: usize) -> bool {
        self.selection.selected_count().checked_sub(1) == Some(index)
    }

    /// Makes `0..=to_index` the selection.
    fn set_prefix_selected(&mut self, to_index: usize) {
        self.selection.set_change_events(false, false);
        self.selection.set_index_selected(0, true, true);
        self.selection.select_to_index(to_index, true);
        self.selection.set_change_events(true, false);
    }
}

impl<T: KeyedItem> SelectionModel<T> for TopAnchoredRangeSelection<T> {
    fn mode(&self) -> SelectionMode {
        SelectionMode::Multiple
    }

    fn count(&self) -> usize {
        self.selection.count()
    }

    fn change_signal(&self) -> &ChangeSignal {
        &self.signal
    }

    fn can_select_item(&self, item: &T) -> bool {
        self.selection.can_select_item(item)
    }

    fn set_change_events(&mut self, enabled: bool, suppress_change: bool) {
        self.selection.set_change_events(enabled, suppress_change);
    }

    fn set_items(&mut self, items: Vec<T>, should_clear: bool) {
        self.selection.set_items(items, should_clear);
    }

    fn items(&self) -> &[T] {
        self.selection.items()
    }

    fn selection(&self) -> Vec<&T> {
        self.selection.selection()
    }

    fn selected_indices(&self) -> Vec<usize> {
        self.selection.selected_indices()
    }

    fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    fn is_range_selected(&self, from_index: usize, count: usize) -> bool {
        self.selection.is_range_selected(from_index, count)
    }

    fn is_all_selected(&self) -> bool {
        self.selection.is_all_selected()
    }

    fn is_key_selected(&self, key: &str) -> bool {
        self.selection.is_key_selected(key)
    }

    fn is_index_selected(&self, index: usize) -> bool {
        self.selection.is_index_selected(index)
    }

    fn set_all_selected(&mut self, is_all_selected: bool) {
        self.selection.set_all_selected(is_all_selected);
    }

    fn set_key_selected(&mut self, key: &str, is_selected: bool, should_anchor: bool) {
        self.selection.set_key_selected(key, is_selected, should_anchor);
    }

    fn set_index_selected(&mut self, index: usize, is_selected: bool, should_anchor: bool) {
        self.selection.set_index_selected(index, is_selected, should_anchor);
    }

    fn select_to_key(&mut self, key: &str, clear_selection: bool) {
        self.selection.select_to_key(key, clear_selection);
    }

    fn select_to_index(&mut self, index: usize, clear_selection: bool) {
        self.selection.select_to_index(index, clear_selection);
    }

    fn toggle_all_selected(&mut self) {
        self.selection.toggle_all_selected();
    }

    fn toggle_key_selected(&mut self, key: &str) {
        self.selection.toggle_key_selected(key);
    }

    /// Moves the end of the selected prefix to `index`.
    ///
    /// If `index` is already the last selected item, it is deselected and the
    /// prefix shrinks by one. Otherwise `0..=index` becomes the selection.
    fn toggle_index_selected(&mut self, index: usize) {
        if self.is_index_last_in_selected_range(index) {
            self.selection.set_index_selected(index, false, false);
        } else {
            self.set_prefix_selected(index);
        }
    }

    /// Toggles a range such as a group of rows under a header.
    ///
    /// - If part of the range is unselected, the prefix grows to cover it.
    /// - If the range is selected and starts at index 0, everything is
    ///   deselected.
    /// - Otherwise the prefix is cut back to end just before the range.
    ///
    /// An empty range is ignored.
    fn toggle_range_selected(&mut self, from_index: usize, count: usize) {
        if count == 0 {
            return;
        }
        if !self.is_range_selected(from_index, count) {
            self.toggle_index_selected(from_index.saturating_add(count) - 1);
            return;
        }
        if from_index == 0 {
            self.set_all_selected(false);
            return;
        }
        self.toggle_index_selected(from_index - 1);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::TopAnchoredRangeSelection;
    use crate::{SelectionMode, SelectionModel};

    const ITEMS: [&str; 5] = ["a", "b", "c", "d", "e"];

    fn five_items() -> TopAnchoredRangeSelection<&'static str> {
        let mut selection = TopAnchoredRangeSelection::new();
        selection.set_items(ITEMS.to_vec(), true);
        selection
    }

    fn first_three_selected() -> TopAnchoredRangeSelection<&'static str> {
        let mut selection = five_items();
        selection.toggle_index_selected(2);
        selection
    }

    fn assert_prefix(selection: &TopAnchoredRangeSelection<&'static str>) {
        let indices = selection.selected_indices();
        let expected: Vec<usize> = (0..indices.len()).collect();
        assert_eq!(indices, expected, "selection must be a prefix");
    }

    #[test]
    fn toggle_index_grows_prefix() {
        let selection = first_three_selected();
        assert_eq!(selection.selected_indices(), [0, 1, 2]);
        assert_eq!(selection.selected_count(), 3);
    }

    #[test]
    fn toggle_last_selected_index_shrinks_by_one() {
        let mut selection = first_three_selected();
        selection.toggle_index_selected(2);
        assert_eq!(selection.selected_indices(), [0, 1]);
    }

    #[test]
    fn toggle_earlier_index_moves_the_boundary() {
        let mut selection = first_three_selected();
        selection.toggle_index_selected(0);
        assert_eq!(selection.selected_indices(), [0]);
        selection.toggle_index_selected(4);
        assert_eq!(selection.selected_indices(), [0, 1, 2, 3, 4]);
    }

    #[test]
    fn toggle_first_index() {
        let mut selection = five_items();
        selection.toggle_index_selected(0);
        assert_eq!(selection.selected_indices(), [0]);
        selection.toggle_index_selected(0);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn toggle_selected_range_after_start_shrinks_before_it() {
        let mut selection = first_three_selected();
        selection.toggle_range_selected(1, 2);
        assert_eq!(selection.selected_indices(), [0]);
    }

    #[test]
    fn toggle_selected_range_at_start_clears() {
        let mut selection = first_three_selected();
        selection.toggle_range_selected(0, 3);
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn toggle_unselected_range_extends_prefix() {
        let mut selection = five_items();
        selection.toggle_range_selected(2, 2);
        assert_eq!(selection.selected_indices(), [0, 1, 2, 3]);
    }

    #[test]
    fn toggle_partially_selected_range_extends_prefix() {
        let mut selection = first_three_selected();
        selection.toggle_range_selected(2, 3);
        assert!(selection.is_all_selected());
    }

    #[test]
    fn empty_range_is_ignored() {
        let mut selection = first_three_selected();
        selection.toggle_range_selected(0, 0);
        selection.toggle_range_selected(3, 0);
        assert_eq!(selection.selected_indices(), [0, 1, 2]);
    }

    #[test]
    fn toggle_index_past_the_end_selects_everything() {
        let mut selection = TopAnchoredRangeSelection::new();
        selection.set_items(ITEMS[..3].to_vec(), true);
        selection.toggle_index_selected(usize::MAX);
        assert_eq!(selection.selected_indices(), [0, 1, 2]);
    }

    #[test]
    fn is_multiple_selection() {
        assert_eq!(five_items().mode(), SelectionMode::Multiple);
    }

    #[test]
    fn prefix_holds_across_toggle_sequences() {
        let mut selection = five_items();
        // Small linear congruential generator so the sequence is reproducible.
        let mut state: u32 = 0x2545_f491;
        let mut next = move |bound: u32| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            ((state >> 16) % bound) as usize
        };
        for _ in 0..500 {
            if next(2) == 0 {
                selection.toggle_index_selected(next(5));
            } else {
                let from = next(5);
                let count = 1 + next(5 - from as u32);
                selection.toggle_range_selected(from, count);
            }
            assert_prefix(&selection);
        }
    }

    #[test]
    fn each_toggle_notifies_once() {
        let signal_hits = Rc::new(Cell::new(0));
        let callback_hits = Rc::new(Cell::new(0));

        let c = callback_hits.clone();
        let mut selection =
            TopAnchoredRangeSelection::with_on_selection_changed(move || c.set(c.get() + 1));
        selection.set_items(ITEMS.to_vec(), true);
        let s = signal_hits.clone();
        selection
            .change_signal()
            .subscribe(move || s.set(s.get() + 1));

        selection.toggle_index_selected(3);
        assert_eq!((signal_hits.get(), callback_hits.get()), (1, 1));

        selection.toggle_index_selected(3);
        assert_eq!((signal_hits.get(), callback_hits.get()), (2, 2));

        selection.toggle_range_selected(0, 3);
        assert_eq!((signal_hits.get(), callback_hits.get()), (3, 3));
    }

    #[test]
    fn delegated_mutations_reach_the_outer_signal() {
        let mut selection = five_items();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        selection
            .change_signal()
            .subscribe(move || h.set(h.get() + 1));

        selection.set_all_selected(true);
        assert_eq!(hits.get(), 1);
        selection.toggle_all_selected();
        assert_eq!(hits.get(), 2);
        assert_eq!(selection.count(), 0);
    }
}
