//! Navigation state machine.
//!
//! Owns the item list, current index, and load status. Navigation intents
//! become `LoadRequest`s handed to the media loader by the caller; load
//! completions come back through `finish_load`, guarded against stale
//! results. Exactly one load is in flight at a time: `Loading` gates all
//! new navigation, and the status field is the only lock needed.

#![allow(dead_code)]

use tracing::{debug, warn};

use crate::loader::{LoadError, ResolvedMedia};
use crate::media::MediaItem;
use crate::presenter::Presenter;

/// Load status of the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// No list installed yet, or nothing to show.
    Idle,
    /// A resolution for the current item is in flight.
    Loading,
    /// The current item is displayed.
    Ready,
    /// The current item failed to resolve; retry is available.
    Error,
}

/// Navigation direction through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A load the application must hand to the `MediaLoader`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Identifies the most recently issued load; completions carrying any
    /// other token are stale and must be dropped.
    pub token: u64,
    pub item: MediaItem,
}

/// Completion of a previously issued `LoadRequest`.
#[derive(Debug)]
pub struct LoadOutcome {
    pub token: u64,
    pub item: MediaItem,
    pub result: Result<ResolvedMedia, LoadError>,
}

/// The navigation controller: current index, list, and status.
///
/// Callers hold an explicit handle to this instance; there is no global
/// viewer singleton.
pub struct NavigationState {
    items: Vec<MediaItem>,
    index: usize,
    status: LoadStatus,
    current_token: u64,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: 0,
            status: LoadStatus::Idle,
            current_token: 0,
        }
    }

    /// Install the session's item list and issue the initial load.
    ///
    /// An empty list leaves the controller in its permanent boundary state
    /// where every navigation is a no-op.
    pub fn start(
        &mut self,
        items: Vec<MediaItem>,
        presenter: &mut dyn Presenter,
    ) -> Option<LoadRequest> {
        self.items = items;
        self.index = 0;
        self.status = LoadStatus::Idle;
        if self.items.is_empty() {
            warn!("Media list is empty, navigation disabled");
            presenter.update_counter("0 / 0");
            return None;
        }
        Some(self.begin_load(presenter))
    }

    /// Move to the neighboring item with wraparound. Dropped while a load is
    /// in flight; permanent no-op on an empty list.
    pub fn advance(
        &mut self,
        direction: Direction,
        presenter: &mut dyn Presenter,
    ) -> Option<LoadRequest> {
        if self.status == LoadStatus::Loading || self.items.is_empty() {
            return None;
        }

        let n = self.items.len();
        self.index = match direction {
            Direction::Forward => (self.index + 1) % n,
            Direction::Backward => {
                if self.index == 0 {
                    n - 1
                } else {
                    self.index - 1
                }
            }
        };
        presenter.animate_transition(direction);
        Some(self.begin_load(presenter))
    }

    /// Re-attempt the current item after a failure. Only valid from `Error`;
    /// the index never changes.
    pub fn retry(&mut self, presenter: &mut dyn Presenter) -> Option<LoadRequest> {
        if self.status != LoadStatus::Error {
            return None;
        }
        Some(self.begin_load(presenter))
    }

    /// Apply a load completion. Outcomes whose token does not match the most
    /// recently issued load are stale and discarded without touching state.
    pub fn finish_load(&mut self, outcome: LoadOutcome, presenter: &mut dyn Presenter) {
        if self.status != LoadStatus::Loading || outcome.token != self.current_token {
            debug!("Discarding stale load result for '{}'", outcome.item.id);
            return;
        }

        match outcome.result {
            Ok(media) => {
                self.status = LoadStatus::Ready;
                presenter.show_media(&outcome.item, media);
            }
            Err(err) => {
                warn!("Failed to load '{}': {}", outcome.item.id, err);
                self.status = LoadStatus::Error;
                presenter.show_error();
            }
        }
    }

    fn begin_load(&mut self, presenter: &mut dyn Presenter) -> LoadRequest {
        self.status = LoadStatus::Loading;
        self.current_token += 1;
        presenter.show_loading();
        presenter.update_counter(&format!("{} / {}", self.index + 1, self.items.len()));
        presenter.update_kind_label(self.items[self.index].kind.label());
        LoadRequest {
            token: self.current_token,
            item: self.items[self.index].clone(),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.items.get(self.index)
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
