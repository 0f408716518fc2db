// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The base selection store.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::{ChangeSignal, KeyedItem, SelectionMode, SelectionModel};

/// Computes an item's key from the item and its index.
pub type GetKeyFn<T> = Box<dyn Fn(&T, usize) -> Option<String>>;

/// Decides whether an item may be selected.
pub type CanSelectItemFn<T> = Box<dyn Fn(&T) -> bool>;

/// Called after every change, following delivery on the [`ChangeSignal`].
pub type ChangeCallback = Box<dyn FnMut()>;

/// Construction options for [`Selection`].
///
/// ```rust
/// use understory_selection::{Selection, SelectionMode, SelectionModel, SelectionOptions};
///
/// let selection = Selection::with_options(
///     SelectionOptions::new()
///         .with_mode(SelectionMode::Single)
///         .with_items(vec!["a", "b", "c"])
///         .with_can_select_item(|item: &&str| *item != "b"),
/// );
/// assert_eq!(selection.mode(), SelectionMode::Single);
/// assert!(!selection.can_select_item(&"b"));
/// ```
pub struct SelectionOptions<T> {
    /// Selection mode. Defaults to [`SelectionMode::Multiple`].
    pub mode: SelectionMode,
    /// Initial items.
    pub items: Vec<T>,
    /// Overrides [`KeyedItem::key`].
    pub get_key: Option<GetKeyFn<T>>,
    /// Marks items as unselectable. Every item is selectable when unset.
    pub can_select_item: Option<CanSelectItemFn<T>>,
    /// Invoked on every change.
    pub on_selection_changed: Option<ChangeCallback>,
}

impl<T> Default for SelectionOptions<T> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            items: Vec::new(),
            get_key: None,
            can_select_item: None,
            on_selection_changed: None,
        }
    }
}

impl<T> SelectionOptions<T> {
    /// Default options: multiple selection, no items, no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selection mode.
    #[must_use]
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Sets the key function.
    #[must_use]
    pub fn with_get_key(
        mut self,
        get_key: impl Fn(&T, usize) -> Option<String> + 'static,
    ) -> Self {
        self.get_key = Some(Box::new(get_key));
        self
    }

    /// Sets the selectability predicate.
    #[must_use]
    pub fn with_can_select_item(mut self, can_select: impl Fn(&T) -> bool + 'static) -> Self {
        self.can_select_item = Some(Box::new(can_select));
        self
    }

    /// Sets the change callback.
    #[must_use]
    pub fn with_on_selection_changed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_selection_changed = Some(Box::new(callback));
        self
    }
}

impl<T> fmt::Debug for SelectionOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionOptions")
            .field("mode", &self.mode)
            .field("items", &self.items.len())
            .field("get_key", &self.get_key.is_some())
            .field("can_select_item", &self.can_select_item.is_some())
            .field("on_selection_changed", &self.on_selection_changed.is_some())
            .finish()
    }
}

/// Keyed, index-addressable selection state.
///
/// Internally the selection is stored as an "all selected" flag plus a set of
/// *exempted* indices whose state is the opposite of that flag. Selecting or
/// clearing everything is therefore O(1) regardless of list length.
///
/// ```rust
/// use understory_selection::{Selection, SelectionModel};
///
/// let mut selection = Selection::new();
/// selection.set_items(vec!["a", "b", "c", "d"], true);
///
/// selection.set_index_selected(1, true, true);
/// selection.select_to_index(3, false);
/// assert_eq!(selection.selected_indices(), [1, 2, 3]);
///
/// selection.toggle_key_selected("c");
/// assert_eq!(selection.selection(), [&"b", &"d"]);
/// ```
pub struct Selection<T> {
    mode: SelectionMode,
    items: Vec<T>,
    keys: Vec<Option<String>>,
    key_to_index: HashMap<String, usize>,
    unselectable: HashSet<usize>,

    is_all_selected: bool,
    exempted: HashSet<usize>,
    anchored_index: usize,
    count: usize,
    is_modal: bool,

    suppression_count: usize,
    has_changed: bool,

    get_key: Option<GetKeyFn<T>>,
    can_select: Option<CanSelectItemFn<T>>,
    on_selection_changed: Option<ChangeCallback>,
    signal: ChangeSignal,
}

impl<T: KeyedItem> Default for Selection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: KeyedItem> Selection<T> {
    /// Creates an empty, multiple-selection store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(SelectionOptions::default())
    }

    /// Creates a store from `options`.
    #[must_use]
    pub fn with_options(options: SelectionOptions<T>) -> Self {
        let SelectionOptions {
            mode,
            items,
            get_key,
            can_select_item,
            on_selection_changed,
        } = options;
        let mut selection = Self {
            mode,
            items: Vec::new(),
            keys: Vec::new(),
            key_to_index: HashMap::new(),
            unselectable: HashSet::new(),
            is_all_selected: false,
            exempted: HashSet::new(),
            anchored_index: 0,
            count: 0,
            is_modal: false,
            suppression_count: 0,
            has_changed: false,
            get_key,
            can_select: can_select_item,
            on_selection_changed,
            signal: ChangeSignal::new(),
        };
        selection.set_items(items, true);
        selection
    }

    /// Key of `item` at `index`, honoring the `get_key` override.
    #[must_use]
    pub fn key_of(&self, item: &T, index: usize) -> Option<String> {
        let key = match &self.get_key {
            Some(get_key) => get_key(item, index),
            None => item.key().map(ToString::to_string),
        };
        key.filter(|key| !key.is_empty())
    }

    /// Index of the item with `key`.
    #[must_use]
    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.key_to_index.get(key).copied()
    }

    /// Index the next range operation extends from.
    #[must_use]
    pub const fn anchored_index(&self) -> usize {
        self.anchored_index
    }

    /// Whether the selection is in modal (checkbox) state.
    #[must_use]
    pub const fn is_modal(&self) -> bool {
        self.is_modal
    }

    /// Enters or leaves modal state. Leaving it clears the selection.
    pub fn set_modal(&mut self, is_modal: bool) {
        if self.is_modal == is_modal {
            return;
        }
        self.suspend();
        self.is_modal = is_modal;
        if !is_modal {
            self.set_all_selected(false);
        }
        self.change();
        self.resume();
    }

    /// Selects or deselects `count` items starting at `from_index`.
    ///
    /// The range is clamped to the list. With `should_anchor`, the anchor
    /// moves to the end of the range facing away from the current anchor.
    pub fn set_range_selected(
        &mut self,
        from_index: usize,
        count: usize,
        is_selected: bool,
        should_anchor: bool,
    ) {
        if self.mode == SelectionMode::None || self.items.is_empty() || count == 0 {
            return;
        }
        let from_index = from_index.min(self.items.len() - 1);
        let count = count.min(self.items.len() - from_index);
        let end_index = from_index + count - 1;
        let new_anchor = if self.anchored_index >= end_index {
            from_index
        } else {
            end_index
        };

        self.suspend();
        for index in from_index..=end_index {
            self.set_index_selected(index, is_selected, should_anchor && index == new_anchor);
        }
        self.resume();
    }

    /// Selects the span between the anchor and the range
    /// `from_index..from_index + count`, inclusive of both.
    pub fn select_to_range(&mut self, from_index: usize, count: usize, clear_selection: bool) {
        match self.mode {
            SelectionMode::None => return,
            SelectionMode::Single => {
                if count == 1 {
                    self.set_range_selected(from_index, count, true, true);
                }
                return;
            }
            SelectionMode::Multiple => {}
        }
        if count == 0 {
            return;
        }
        let start = from_index.min(self.anchored_index);
        let end = from_index.saturating_add(count - 1).max(self.anchored_index);
        self.select_span(start, end, clear_selection);
    }

    fn select_span(&mut self, start: usize, end: usize, clear_selection: bool) {
        self.suspend();
        if clear_selection {
            self.set_all_selected_inner(false, true);
        }
        if let Some(last) = self.items.len().checked_sub(1) {
            for index in start.min(last)..=end.min(last) {
                self.set_index_selected(index, true, false);
            }
        }
        self.resume();
    }

    fn is_selectable_index(&self, index: usize) -> bool {
        index < self.items.len() && !self.unselectable.contains(&index)
    }

    fn selectable_count(&self) -> usize {
        self.items.len() - self.unselectable.len()
    }

    fn suspend(&mut self) {
        self.set_change_events(false, false);
    }

    fn resume(&mut self) {
        self.set_change_events(true, false);
    }

    fn change(&mut self) {
        if self.suppression_count > 0 {
            self.has_changed = true;
            return;
        }
        log::trace!("selection changed: {} selected", self.count);
        self.signal.raise();
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback();
        }
    }

    fn update_count(&mut self, preserve_modal_state: bool) {
        let count = self.selected_count();
        if count != self.count {
            self.count = count;
            self.change();
        }
        if self.count == 0 && !preserve_modal_state {
            self.set_modal(false);
        }
    }

    fn set_all_selected_inner(&mut self, is_all_selected: bool, preserve_modal_state: bool) {
        if is_all_selected && self.mode != SelectionMode::Multiple {
            return;
        }
        self.suspend();
        if self.selectable_count() > 0
            && (!self.exempted.is_empty() || is_all_selected != self.is_all_selected)
        {
            self.exempted.clear();
            self.is_all_selected = is_all_selected;
            self.change();
            self.update_count(preserve_modal_state);
        }
        self.resume();
    }
}

impl<T: KeyedItem> SelectionModel<T> for Selection<T> {
    fn mode(&self) -> SelectionMode {
        self.mode
    }

    fn count(&self) -> usize {
        self.count
    }

    fn change_signal(&self) -> &ChangeSignal {
        &self.signal
    }

    fn can_select_item(&self, item: &T) -> bool {
        self.can_select.as_ref().is_none_or(|can_select| can_select(item))
    }

    fn set_change_events(&mut self, enabled: bool, suppress_change: bool) {
        if enabled {
            if self.suppression_count == 0 {
                log::warn!("set_change_events(true) without a matching set_change_events(false)");
                return;
            }
            self.suppression_count -= 1;
        } else {
            self.suppression_count += 1;
        }

        if self.suppression_count == 0 && self.has_changed {
            self.has_changed = false;
            if !suppress_change {
                self.change();
            }
        }
    }

    fn set_items(&mut self, items: Vec<T>, should_clear: bool) {
        self.suspend();

        let keys: Vec<Option<String>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.key_of(item, index))
            .collect();
        let mut key_to_index = HashMap::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            if let Some(key) = key {
                key_to_index.insert(key.clone(), index);
            }
        }
        let unselectable: HashSet<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| !self.can_select_item(item))
            .map(|(index, _)| index)
            .collect();

        if should_clear || items.is_empty() {
            self.set_all_selected_inner(false, true);
        }

        // Carry exemptions over to the new list, following items by key.
        let mut has_selection_changed = false;
        let mut dropped = 0_usize;
        let mut exempted = HashSet::with_capacity(self.exempted.len());
        for &index in &self.exempted {
            let new_index = match self.keys.get(index).and_then(Option::as_ref) {
                Some(key) => key_to_index.get(key).copied(),
                None => Some(index),
            };
            match new_index {
                Some(new_index)
                    if new_index < items.len() && !unselectable.contains(&new_index) =>
                {
                    exempted.insert(new_index);
                    has_selection_changed |= new_index != index;
                }
                _ => {
                    dropped += 1;
                    has_selection_changed = true;
                }
            }
        }
        if dropped > 0 {
            log::debug!("set_items dropped {dropped} exempted item(s) no longer in the list");
        }
        if self.exempted.is_empty() && self.is_all_selected && items.len() != self.items.len() {
            has_selection_changed = true;
        }

        self.exempted = exempted;
        self.key_to_index = key_to_index;
        self.keys = keys;
        self.unselectable = unselectable;
        self.items = items;

        self.update_count(false);
        if has_selection_changed {
            self.change();
        }
        self.resume();
    }

    fn items(&self) -> &[T] {
        &self.items
    }

    fn selection(&self) -> Vec<&T> {
        self.items
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_index_selected(*index))
            .map(|(_, item)| item)
            .collect()
    }

    fn selected_indices(&self) -> Vec<usize> {
        (0..self.items.len())
            .filter(|&index| self.is_index_selected(index))
            .collect()
    }

    fn selected_count(&self) -> usize {
        if self.is_all_selected {
            debug_assert!(
                self.exempted.is_disjoint(&self.unselectable),
                "unselectable items are never exempted"
            );
            self.selectable_count() - self.exempted.len()
        } else {
            self.exempted.len()
        }
    }

    fn is_range_selected(&self, from_index: usize, count: usize) -> bool {
        count > 0
            && (from_index..from_index.saturating_add(count))
                .all(|index| self.is_index_selected(index))
    }

    fn is_all_selected(&self) -> bool {
        let mut selectable_count = self.selectable_count();
        if self.mode == SelectionMode::Single {
            selectable_count = selectable_count.min(1);
        }
        (self.count > 0 && self.is_all_selected && self.exempted.is_empty())
            || (!self.is_all_selected
                && self.exempted.len() == selectable_count
                && selectable_count > 0)
    }

    fn is_key_selected(&self, key: &str) -> bool {
        self.index_of_key(key)
            .is_some_and(|index| self.is_index_selected(index))
    }

    fn is_index_selected(&self, index: usize) -> bool {
        if self.is_all_selected {
            self.is_selectable_index(index) && !self.exempted.contains(&index)
        } else {
            self.exempted.contains(&index)
        }
    }

    fn set_all_selected(&mut self, is_all_selected: bool) {
        self.set_all_selected_inner(is_all_selected, false);
    }

    fn set_key_selected(&mut self, key: &str, is_selected: bool, should_anchor: bool) {
        if let Some(index) = self.index_of_key(key) {
            self.set_index_selected(index, is_selected, should_anchor);
        }
    }

    fn set_index_selected(&mut self, index: usize, is_selected: bool, should_anchor: bool) {
        if self.mode == SelectionMode::None {
            return;
        }
        let Some(last) = self.items.len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);

        self.suspend();
        if !self.unselectable.contains(&index) {
            if is_selected && self.mode == SelectionMode::Single {
                self.set_all_selected_inner(false, true);
            }
            if is_selected == self.is_all_selected {
                self.exempted.remove(&index);
            } else {
                self.exempted.insert(index);
            }
            if should_anchor {
                self.anchored_index = index;
            }
        }
        self.update_count(false);
        self.resume();
    }

    fn select_to_key(&mut self, key: &str, clear_selection: bool) {
        if let Some(index) = self.index_of_key(key) {
            self.select_to_index(index, clear_selection);
        }
    }

    fn select_to_index(&mut self, index: usize, clear_selection: bool) {
        match self.mode {
            SelectionMode::None => {}
            SelectionMode::Single => self.set_index_selected(index, true, true),
            SelectionMode::Multiple => {
                let start = index.min(self.anchored_index);
                let end = index.max(self.anchored_index);
                self.select_span(start, end, clear_selection);
            }
        }
    }

    fn toggle_all_selected(&mut self) {
        let is_all_selected = self.is_all_selected();
        self.set_all_selected(!is_all_selected);
    }

    fn toggle_key_selected(&mut self, key: &str) {
        let is_selected = self.is_key_selected(key);
        self.set_key_selected(key, !is_selected, true);
    }

    fn toggle_index_selected(&mut self, index: usize) {
        let is_selected = self.is_index_selected(index);
        self.set_index_selected(index, !is_selected, true);
    }

    fn toggle_range_selected(&mut self, from_index: usize, count: usize) {
        if self.mode == SelectionMode::None || count == 0 {
            return;
        }
        if self.mode == SelectionMode::Single && count > 1 {
            return;
        }
        let is_range_selected = self.is_range_selected(from_index, count);
        let end_index = from_index.saturating_add(count).min(self.items.len());

        self.suspend();
        for index in from_index..end_index {
            self.set_index_selected(index, !is_range_selected, false);
        }
        self.resume();
    }
}

impl<T: fmt::Debug> fmt::Debug for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("mode", &self.mode)
            .field("items", &self.items)
            .field("is_all_selected", &self.is_all_selected)
            .field("exempted", &self.exempted)
            .field("anchored_index", &self.anchored_index)
            .field("count", &self.count)
            .field("is_modal", &self.is_modal)
            .finish_non_exhaustive()
    }
}
