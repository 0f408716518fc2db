// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A multiple-selection store reserved for anchored-range behavior.

use alloc::vec::Vec;

use crate::{ChangeSignal, KeyedItem, Selection, SelectionMode, SelectionModel};

/// A [`SelectionModel`] that forwards every call to an owned [`Selection`].
///
/// It is always in [`SelectionMode::Multiple`] and currently behaves exactly
/// like a plain `Selection`. Hosts can depend on this type where
/// anchored-range semantics are wanted without tying themselves to the base
/// store. Change notifications come from the inner selection's signal.
#[derive(Debug)]
pub struct AnchoredRangeSelection<T> {
    selection: Selection<T>,
}

impl<T: KeyedItem> Default for AnchoredRangeSelection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyedItem> AnchoredRangeSelection<T> {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: Selection::new(),
        }
    }
}

impl<T: KeyedItem> SelectionModel<T> for AnchoredRangeSelection<T> {
    fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    fn count(&self) -> usize {
        self.selection.count()
    }

    fn change_signal(&self) -> &ChangeSignal {
        self.selection.change_signal()
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

    fn toggle_index_selected(&mut self, index: usize) {
        self.selection.toggle_index_selected(index);
    }

    fn toggle_range_selected(&mut self, from_index: usize, count: usize) {
        self.selection.toggle_range_selected(from_index, count);
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::AnchoredRangeSelection;
    use crate::{Selection, SelectionMode, SelectionModel};

    type Op = fn(&mut dyn SelectionModel<&'static str>);

    const ITEMS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

    fn snapshot(model: &dyn SelectionModel<&'static str>) -> (Vec<usize>, usize, bool) {
        (
            model.selected_indices(),
            model.count(),
            model.is_all_selected(),
        )
    }

    #[test]
    fn behaves_like_a_plain_selection() {
        let ops: [Op; 12] = [
            |s| s.set_index_selected(2, true, true),
            |s| s.select_to_index(4, false),
            |s| s.toggle_index_selected(3),
            |s| s.toggle_range_selected(0, 2),
            |s| s.set_key_selected("f", true, false),
            |s| s.select_to_key("a", true),
            |s| s.toggle_key_selected("b"),
            |s| s.toggle_all_selected(),
            |s| s.set_index_selected(9, false, false),
            |s| s.set_all_selected(false),
            |s| s.set_items(ITEMS.iter().rev().copied().collect(), false),
            |s| s.set_items(ITEMS[..3].to_vec(), true),
        ];

        let mut anchored = AnchoredRangeSelection::new();
        let mut plain = Selection::new();
        anchored.set_items(ITEMS.to_vec(), true);
        plain.set_items(ITEMS.to_vec(), true);

        for op in ops {
            op(&mut anchored);
            op(&mut plain);
            assert_eq!(snapshot(&anchored), snapshot(&plain));
            assert_eq!(anchored.items(), plain.items());
            assert_eq!(anchored.selection(), plain.selection());
            for (index, key) in ITEMS.iter().enumerate() {
                assert_eq!(anchored.is_index_selected(index), plain.is_index_selected(index));
                assert_eq!(anchored.is_key_selected(key), plain.is_key_selected(key));
            }
            assert_eq!(
                anchored.is_range_selected(0, 3),
                plain.is_range_selected(0, 3)
            );
        }
    }

    #[test]
    fn is_multiple_selection() {
        let anchored: AnchoredRangeSelection<&str> = AnchoredRangeSelection::new();
        assert_eq!(anchored.mode(), SelectionMode::Multiple);
        assert!(anchored.can_select_item(&"a"));
    }

    #[test]
    fn forwards_change_notifications() {
        let mut anchored = AnchoredRangeSelection::new();
        anchored.set_items(ITEMS.to_vec(), true);
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        anchored
            .change_signal()
            .subscribe(move || h.set(h.get() + 1));

        anchored.set_change_events(false, false);
        anchored.set_index_selected(0, true, true);
        anchored.select_to_index(3, false);
        anchored.set_change_events(true, false);
        assert_eq!(hits.get(), 1);
        assert_eq!(anchored.selected_count(), 4);
    }
}
