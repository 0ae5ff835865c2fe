//! Driving async lookups back into their dropdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::coordinator::{DropdownId, WeakCoordinator};
use crate::search::{IssuedLookup, LookupResult, LookupTicket};
use crate::wakeup::WakeupHandle;

use super::state::DropdownInner;

/// What happened to a lookup's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The response became the dropdown's results.
    Applied,
    /// A newer search had been issued; the response was dropped.
    Stale,
    /// The dropdown no longer exists.
    Detached,
}

/// Non-owning handle used by lookups and coordinator callbacks.
pub(crate) struct WeakDropdown<T> {
    pub(crate) id: DropdownId,
    pub(crate) inner: Weak<RwLock<DropdownInner<T>>>,
    pub(crate) dirty: Arc<AtomicBool>,
    pub(crate) wakeup: WakeupHandle,
    pub(crate) coordinator: WeakCoordinator,
}

impl<T: Clone + Send + 'static> WeakDropdown<T> {
    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        self.wakeup.notify();
    }

    /// Force-close the dropdown if it is still alive.
    pub(crate) fn close(&self) -> bool {
        let Some(inner) = self.inner.upgrade() else {
            return false;
        };
        let closed = inner
            .write()
            .map(|mut guard| guard.close())
            .unwrap_or(false);
        if closed {
            if let Some(coordinator) = self.coordinator.upgrade() {
                coordinator.release(self.id);
            }
            self.mark_dirty();
            log::debug!("Dropdown {} closed by coordinator", self.id);
        }
        closed
    }

    fn apply(&self, ticket: &LookupTicket, result: LookupResult<T>) -> LookupOutcome {
        let Some(inner) = self.inner.upgrade() else {
            return LookupOutcome::Detached;
        };
        let applied = inner
            .write()
            .map(|mut guard| guard.apply_lookup(self.id, ticket, result))
            .unwrap_or(false);
        if applied {
            self.mark_dirty();
            LookupOutcome::Applied
        } else {
            LookupOutcome::Stale
        }
    }
}

/// An issued lookup waiting to be awaited.
///
/// Running it awaits the lookup function's response and applies it to the
/// dropdown, unless a newer search has been issued in the meantime. The
/// dropdown is held weakly, so an outstanding lookup never keeps it alive.
#[must_use = "lookups do nothing unless run"]
pub struct PendingLookup<T> {
    issued: IssuedLookup<T>,
    target: WeakDropdown<T>,
}

impl<T: Clone + Send + 'static> PendingLookup<T> {
    pub(crate) fn new(issued: IssuedLookup<T>, target: WeakDropdown<T>) -> Self {
        Self { issued, target }
    }

    /// Identity of the lookup.
    pub fn ticket(&self) -> &LookupTicket {
        &self.issued.ticket
    }

    /// Await the response and apply it.
    pub async fn run(self) -> LookupOutcome {
        let IssuedLookup { ticket, future } = self.issued;
        let result = future.await;
        self.target.apply(&ticket, result)
    }
}

impl<T> std::fmt::Debug for PendingLookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLookup")
            .field("dropdown", &self.target.id)
            .field("ticket", &self.issued.ticket)
            .finish()
    }
}
