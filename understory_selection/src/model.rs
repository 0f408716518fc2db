// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection interface shared by every selection type.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ChangeSignal;

/// How many items a selection may hold at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Nothing can be selected; every mutation is ignored.
    None,
    /// At most one item is selected; selecting an item deselects the previous one.
    Single,
    /// Any number of items may be selected.
    #[default]
    Multiple,
}

/// An item that can be tracked by key.
///
/// Keys identify an item across calls to [`SelectionModel::set_items`], so
/// selection follows an item when the list is reordered. Items without a key
/// are tracked by index only.
pub trait KeyedItem {
    /// The item's unique key, if it has one.
    fn key(&self) -> Option<&str>;
}

impl KeyedItem for String {
    fn key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl KeyedItem for &str {
    fn key(&self) -> Option<&str> {
        Some(*self)
    }
}

/// Selection state over an ordered list of items.
///
/// Indices refer to positions in [`items`](Self::items). Mutating methods that
/// receive an out-of-range index either clamp it or do nothing; they never
/// panic. Every mutation raises [`change_signal`](Self::change_signal) at most
/// once per call when the selected set actually changed.
pub trait SelectionModel<T> {
    /// The selection mode.
    fn mode(&self) -> SelectionMode;

    /// Number of selected items as of the last completed mutation.
    fn count(&self) -> usize;

    /// Signal raised whenever the selection changes.
    fn change_signal(&self) -> &ChangeSignal;

    /// Whether `item` may be selected at all.
    fn can_select_item(&self, item: &T) -> bool;

    /// Suspends (`enabled == false`) or resumes change notifications.
    ///
    /// Calls nest. When the outermost suspension ends and something changed in
    /// between, a single change is raised, unless `suppress_change` is set.
    fn set_change_events(&mut self, enabled: bool, suppress_change: bool);

    /// Replaces the item list.
    ///
    /// With `should_clear`, the selection is emptied. Otherwise selected items
    /// stay selected, tracked by key.
    fn set_items(&mut self, items: Vec<T>, should_clear: bool);

    /// The current items.
    fn items(&self) -> &[T];

    /// The selected items, in list order.
    fn selection(&self) -> Vec<&T>;

    /// Indices of the selected items, ascending.
    fn selected_indices(&self) -> Vec<usize>;

    /// Number of selected items.
    fn selected_count(&self) -> usize;

    /// Whether every index in `from_index..from_index + count` is selected.
    ///
    /// An empty range is never selected.
    fn is_range_selected(&self, from_index: usize, count: usize) -> bool;

    /// Whether every selectable item is selected.
    fn is_all_selected(&self) -> bool;

    /// Whether the item with `key` is selected.
    fn is_key_selected(&self, key: &str) -> bool;

    /// Whether the item at `index` is selected.
    fn is_index_selected(&self, index: usize) -> bool;

    /// Selects or deselects every selectable item.
    fn set_all_selected(&mut self, is_all_selected: bool);

    /// Selects or deselects the item with `key`; unknown keys are ignored.
    fn set_key_selected(&mut self, key: &str, is_selected: bool, should_anchor: bool);

    /// Selects or deselects the item at `index`, optionally moving the anchor there.
    fn set_index_selected(&mut self, index: usize, is_selected: bool, should_anchor: bool);

    /// Selects from the anchor to the item with `key`.
    fn select_to_key(&mut self, key: &str, clear_selection: bool);

    /// Selects every index between the anchor and `index`, inclusive.
    fn select_to_index(&mut self, index: usize, clear_selection: bool);

    /// Selects everything unless everything is already selected, in which
    /// case deselects everything.
    fn toggle_all_selected(&mut self);

    /// Flips the selection state of the item with `key` and anchors on it.
    fn toggle_key_selected(&mut self, key: &str);

    /// Flips the selection state of the item at `index`.
    fn toggle_index_selected(&mut self, index: usize);

    /// Toggles the range `from_index..from_index + count`.
    fn toggle_range_selected(&mut self, from_index: usize, count: usize);
}
