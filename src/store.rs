//! Per-section load state with a stale-response guard.
//!
//! Each content section fetches once and needs the renderer to distinguish
//! "still loading" from "loaded, but empty" — they get different user-visible
//! messages. [`LoadPhase`] carries that distinction explicitly instead of
//! inferring it from the item list.
//!
//! The second job of this module is the stale-response guard. A fetch is
//! started with [`SectionStore::begin_fetch`], which hands back a ticket tied
//! to the store's current epoch. Resolving with an old ticket — a slow
//! response landing after the section was refetched or torn down — is
//! discarded instead of clobbering newer state.

use crate::cms::FetchError;

/// Where a section is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Fetch started, no response yet. Renders the loading message.
    #[default]
    Loading,
    /// Fetch succeeded with at least one record.
    Ready,
    /// Fetch finished with no records, or failed. Renders the no-items
    /// message. Failure and genuinely-empty results are deliberately
    /// indistinguishable here — the error was already logged at the fetch
    /// boundary.
    Empty,
}

/// Opaque handle tying a fetch to the store state it was started against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Load state for one content section.
#[derive(Debug, Clone, Default)]
pub struct SectionStore<T> {
    phase: LoadPhase,
    items: Vec<T>,
    epoch: u64,
}

impl<T> SectionStore<T> {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            items: Vec::new(),
            epoch: 0,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Take the items out, leaving the store empty. Used once per build to
    /// hand the fetched records to the snapshot.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Start (or restart) a fetch. Bumps the epoch, invalidating any ticket
    /// from an earlier fetch, clears the items and re-enters `Loading`.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.epoch += 1;
        self.phase = LoadPhase::Loading;
        self.items.clear();
        FetchTicket(self.epoch)
    }

    /// Apply a fetch outcome. Returns `false` without touching state when the
    /// ticket is stale (a newer `begin_fetch` happened since it was issued).
    ///
    /// A failure is logged by the caller at the fetch boundary; here it just
    /// resolves to the empty state, same as a successful response with no
    /// records.
    pub fn resolve(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<T>, FetchError>,
    ) -> bool {
        if ticket.0 != self.epoch {
            tracing::debug!(
                stale = ticket.0,
                current = self.epoch,
                "discarding stale fetch response"
            );
            return false;
        }
        match outcome {
            Ok(items) if !items.is_empty() => {
                self.items = items;
                self.phase = LoadPhase::Ready;
            }
            Ok(_) | Err(_) => {
                self.items.clear();
                self.phase = LoadPhase::Empty;
            }
        }
        true
    }
}
