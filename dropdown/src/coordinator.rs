//! Exclusivity coordinator shared by every dropdown under one application root.
//!
//! The coordinator records which dropdown, if any, has its menu open, and keeps
//! a registry of close callbacks contributed by live dropdowns. Claiming the
//! open slot closes every other registered dropdown first.
//!
//! The coordinator never owns a dropdown. Callbacks capture weak references,
//! and a [`Registration`] removes its entry when the last handle to the
//! dropdown is dropped.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

/// Unique identifier for a dropdown instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DropdownId(usize);

impl DropdownId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for DropdownId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__dropdown_{}", self.0)
    }
}

/// Callback that force-closes one dropdown.
pub type CloseCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct CoordinatorInner {
    /// Dropdown currently holding the open slot
    open: Option<DropdownId>,
    /// Close callbacks of live dropdowns
    registry: BTreeMap<DropdownId, CloseCallback>,
}

/// Tracks the single open dropdown across all instances.
///
/// Construct one per application root and hand clones to each dropdown. Clones
/// share state.
///
/// # Example
///
/// ```ignore
/// let coordinator = Coordinator::new();
/// let city = Dropdown::new(city_config, &coordinator);
/// let country = Dropdown::new(country_config, &coordinator);
///
/// city.open();
/// country.open(); // closes `city`
/// assert!(!city.is_open());
/// ```
#[derive(Clone, Default)]
pub struct Coordinator {
    inner: Arc<RwLock<CoordinatorInner>>,
}

impl Coordinator {
    /// Create an empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dropdown's close callback to the broadcast registry.
    ///
    /// The returned guard unregisters the dropdown when dropped. Registering
    /// the same id twice replaces the earlier callback.
    pub fn register(
        &self,
        id: DropdownId,
        close: impl Fn() + Send + Sync + 'static,
    ) -> Registration {
        if let Ok(mut guard) = self.inner.write() {
            guard.registry.insert(id, Arc::new(close));
        }
        log::debug!("Coordinator: registered {}", id);
        Registration {
            id,
            coordinator: self.downgrade(),
        }
    }

    /// Remove a dropdown from the registry.
    ///
    /// Also vacates the open slot if the dropdown holds it, so no id outlives
    /// its dropdown.
    fn unregister(&self, id: DropdownId) {
        if let Ok(mut guard) = self.inner.write() {
            guard.registry.remove(&id);
            if guard.open == Some(id) {
                guard.open = None;
            }
        }
        log::debug!("Coordinator: unregistered {}", id);
    }

    /// Make `id` the single open dropdown.
    ///
    /// If another dropdown holds the slot, every registered close callback
    /// except the claimant's own runs first. Callbacks run without the
    /// coordinator lock held so they may call [`Coordinator::release`].
    pub fn claim(&self, id: DropdownId) {
        let others: Vec<CloseCallback> = match self.inner.read() {
            Ok(guard) => match guard.open {
                Some(holder) if holder != id => guard
                    .registry
                    .iter()
                    .filter(|(other, _)| **other != id)
                    .map(|(_, close)| Arc::clone(close))
                    .collect(),
                _ => Vec::new(),
            },
            Err(_) => Vec::new(),
        };

        if !others.is_empty() {
            log::debug!("Coordinator: {} claims, closing {} other(s)", id, others.len());
        }
        for close in others {
            close();
        }

        if let Ok(mut guard) = self.inner.write() {
            guard.open = Some(id);
        }
    }

    /// Vacate the open slot if `id` holds it.
    ///
    /// A release from a dropdown that no longer holds the slot is a no-op, so
    /// a late release cannot clobber a newer claim.
    pub fn release(&self, id: DropdownId) {
        if let Ok(mut guard) = self.inner.write()
            && guard.open == Some(id)
        {
            guard.open = None;
            log::debug!("Coordinator: {} released", id);
        }
    }

    /// The dropdown currently holding the open slot.
    pub fn open_instance(&self) -> Option<DropdownId> {
        self.inner.read().map(|guard| guard.open).unwrap_or(None)
    }

    /// Check whether a dropdown is registered.
    pub fn is_registered(&self, id: DropdownId) -> bool {
        self.inner
            .read()
            .map(|guard| guard.registry.contains_key(&id))
            .unwrap_or(false)
    }

    /// Number of registered dropdowns.
    pub fn registered_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.registry.len())
            .unwrap_or(0)
    }

    pub(crate) fn downgrade(&self) -> WeakCoordinator {
        WeakCoordinator {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("open", &self.open_instance())
            .field("registered", &self.registered_count())
            .finish()
    }
}

/// Non-owning handle to a coordinator.
#[derive(Clone, Debug)]
pub(crate) struct WeakCoordinator {
    inner: Weak<RwLock<CoordinatorInner>>,
}

impl WeakCoordinator {
    pub(crate) fn upgrade(&self) -> Option<Coordinator> {
        self.inner.upgrade().map(|inner| Coordinator { inner })
    }
}

/// Scoped registration of a dropdown with a coordinator.
///
/// Dropping the guard unregisters the dropdown, whatever path the owner leaves
/// by.
#[derive(Debug)]
pub struct Registration {
    id: DropdownId,
    coordinator: WeakCoordinator,
}

impl Registration {
    /// The registered dropdown.
    pub fn id(&self) -> DropdownId {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(coordinator) = self.coordinator.upgrade() {
            coordinator.unregister(self.id);
        }
    }
}
