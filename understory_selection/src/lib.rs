// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: selection state for list and grid views.
//!
//! This crate tracks which rows of a list are selected and exposes the range
//! and toggle operations a list, table, or data grid needs. It does not render
//! anything, dispatch input, or virtualize rows; hosts call into it from their
//! own event handlers and re-render when it reports a change.
//!
//! The pieces are:
//!
//! - [`SelectionModel`]: the selection interface, implemented by every type below.
//! - [`Selection`]: the base store. Items are tracked by index and, through
//!   [`KeyedItem`], by key, so selection survives reordering via
//!   [`SelectionModel::set_items`].
//! - [`AnchoredRangeSelection`]: a multiple-selection store that forwards to
//!   an owned [`Selection`].
//! - [`TopAnchoredRangeSelection`]: a store whose selection is always a prefix
//!   of the list. Toggling an item selects everything up to it.
//! - [`ChangeSignal`]: the synchronous notification raised after each change.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_selection::{Selection, SelectionModel};
//!
//! let mut selection = Selection::new();
//! selection.set_items(vec!["inbox", "drafts", "sent", "archive"], true);
//!
//! // Click on "drafts", then shift+click on "archive".
//! selection.set_index_selected(1, true, true);
//! selection.select_to_index(3, true);
//! assert_eq!(selection.selection(), [&"drafts", &"sent", &"archive"]);
//! ```
//!
//! ## Change notification
//!
//! Every mutation raises [`SelectionModel::change_signal`] at most once, after
//! the state is consistent. Hosts can batch several calls into one
//! notification with [`SelectionModel::set_change_events`]:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_selection::{SelectionModel, TopAnchoredRangeSelection};
//!
//! let mut selection = TopAnchoredRangeSelection::new();
//! selection.set_items(vec!["a", "b", "c", "d"], true);
//!
//! let redraws = Rc::new(Cell::new(0));
//! let counter = redraws.clone();
//! selection
//!     .change_signal()
//!     .subscribe(move || counter.set(counter.get() + 1));
//!
//! selection.set_change_events(false, false);
//! selection.toggle_index_selected(1);
//! selection.toggle_index_selected(3);
//! selection.set_change_events(true, false);
//!
//! assert_eq!(redraws.get(), 1);
//! assert_eq!(selection.selected_indices(), [0, 1, 2, 3]);
//! ```
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade; the crate
//! never installs a logger.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod anchored;
mod model;
mod selection;
mod signal;
mod top_anchored;

pub use anchored::AnchoredRangeSelection;
pub use model::{KeyedItem, SelectionMode, SelectionModel};
pub use selection::{CanSelectItemFn, ChangeCallback, GetKeyFn, Selection, SelectionOptions};
pub use signal::{ChangeSignal, ListenerId};
pub use top_anchored::TopAnchoredRangeSelection;
