//! Dropdown widget state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::coordinator::{Coordinator, DropdownId, Registration};
use crate::search::{
    LookupRequest, LookupResult, LookupTicket, SearchOutcome, SearchPipeline, SearchSource,
};
use crate::wakeup::{WakeupHandle, WakeupSender};

use super::config::{DropdownConfig, DropdownOptions};
use super::lookup::{PendingLookup, WeakDropdown};
use super::navigation::{next_index, prev_index, valid_index};
use super::viewport::ListViewport;

/// Internal state for a Dropdown widget.
///
/// Invariant: `focused` is `None` or a valid index into `results`, and it is
/// reset to `None` whenever `results` is replaced.
#[derive(Debug)]
pub(crate) struct DropdownInner<T> {
    // Menu state
    /// Whether the menu is open
    pub(crate) is_open: bool,
    /// Current search query
    pub(crate) query: String,
    /// Cursor position in the query (byte offset)
    pub(crate) text_cursor: usize,

    // Results
    /// Current result list
    pub(crate) results: Vec<T>,
    /// Whether the latest lookup is still outstanding
    pub(crate) loading: bool,
    /// Whether the latest applied lookup failed
    pub(crate) lookup_failed: bool,
    /// Keyboard-focused row
    pub(crate) focused: Option<usize>,
    /// Scroll position of the result list
    pub(crate) viewport: ListViewport,

    /// Current selection
    pub(crate) selected: Option<T>,

    pipeline: SearchPipeline<T>,
}

impl<T: Clone + Send + 'static> DropdownInner<T> {
    fn set_results(&mut self, results: Vec<T>) {
        self.results = results;
        self.focused = None;
        self.viewport.reset();
    }

    /// Run the pipeline for the current query.
    ///
    /// Returns the lookup to issue when results arrive asynchronously. The
    /// caller issues it after releasing the lock.
    fn run_search(&mut self) -> Option<LookupRequest<T>> {
        match self.pipeline.search(&self.query) {
            SearchOutcome::Ready(results) => {
                self.loading = false;
                self.lookup_failed = false;
                self.set_results(results);
                None
            }
            SearchOutcome::Pending(request) => {
                self.loading = true;
                self.lookup_failed = false;
                self.focused = None;
                Some(request)
            }
        }
    }

    /// Bring results back to the empty-query state of a closed menu.
    ///
    /// Async sources are not queried; outstanding lookups become stale.
    fn reset_search(&mut self) {
        if self.pipeline.is_async() {
            self.pipeline.invalidate();
            self.loading = false;
            self.lookup_failed = false;
            self.set_results(Vec::new());
        } else {
            // Static searches resolve immediately
            let _ = self.run_search();
        }
    }

    /// Open -> Closed. Returns false if already closed.
    pub(crate) fn close(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        self.is_open = false;
        self.query.clear();
        self.text_cursor = 0;
        self.reset_search();
        true
    }

    /// Apply a lookup response if it is still the latest.
    pub(crate) fn apply_lookup(
        &mut self,
        id: DropdownId,
        ticket: &LookupTicket,
        result: LookupResult<T>,
    ) -> bool {
        if !self.pipeline.is_latest(ticket) {
            return false;
        }
        match result {
            Ok(results) => {
                log::debug!(
                    "Dropdown {} lookup {:?} returned {} result(s)",
                    id,
                    ticket.query(),
                    results.len()
                );
                self.lookup_failed = false;
                self.set_results(results);
            }
            Err(err) => {
                log::warn!("Dropdown {} search error for {:?}: {}", id, ticket.query(), err);
                self.lookup_failed = true;
                self.set_results(Vec::new());
            }
        }
        self.loading = false;
        true
    }

    fn move_focus(&mut self, focused: Option<usize>) -> bool {
        if focused == self.focused {
            return false;
        }
        self.focused = focused;
        if let Some(index) = focused {
            self.viewport.scroll_to_item(index);
        }
        true
    }

    pub(crate) fn is_below_minimum(&self) -> bool {
        self.pipeline.is_below_minimum(&self.query)
    }

    pub(crate) fn min_query_length(&self) -> usize {
        self.pipeline.min_query_length()
    }

    pub(crate) fn is_async(&self) -> bool {
        self.pipeline.is_async()
    }
}

/// Configuration shared by all handles of one dropdown.
pub(crate) struct Shared<T> {
    pub(crate) config: DropdownConfig<T>,
    /// Unregisters from the coordinator when the last handle drops
    _registration: Registration,
}

/// A searchable single-select dropdown.
///
/// `Dropdown` is a cheap-to-clone handle; clones share state. It owns its open
/// state, query, results and keyboard focus, and cooperates with the other
/// dropdowns of the same [`Coordinator`] so at most one menu is open.
///
/// Async lookups issued by query changes are queued on the dropdown. The host
/// either calls [`Dropdown::spawn_lookups`] after each interaction, or drains
/// them with [`Dropdown::take_lookups`] and awaits them itself.
///
/// # Example
///
/// ```ignore
/// let coordinator = Coordinator::new();
/// let countries = Dropdown::new(
///     DropdownConfig::for_items(|country: &'static str| println!("{country}"))
///         .items(["Ukraine", "Poland", "Germany", "France"])
///         .placeholder("Choose a country"),
///     &coordinator,
/// );
///
/// countries.open();
/// countries.set_query("an");
/// assert_eq!(countries.results(), vec!["Poland", "Germany", "France"]);
/// ```
pub struct Dropdown<T> {
    /// Unique identifier for this dropdown instance
    id: DropdownId,
    /// Internal state
    inner: Arc<RwLock<DropdownInner<T>>>,
    /// Callbacks, settings and coordinator registration
    shared: Arc<Shared<T>>,
    coordinator: Coordinator,
    /// Lookups issued but not yet handed to the host
    lookups: Arc<Mutex<Vec<PendingLookup<T>>>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    /// Search field focus request (checked by the host after render)
    focus_requested: Arc<AtomicBool>,
    wakeup: WakeupHandle,
}

impl<T: Clone + Send + Sync + 'static> Dropdown<T> {
    /// Create a dropdown and register it with `coordinator`.
    pub fn new(mut config: DropdownConfig<T>, coordinator: &Coordinator) -> Self {
        let id = DropdownId::new();
        let options = &config.options;

        let source = match config.search_function.clone() {
            Some(lookup) => SearchSource::Async(lookup),
            None => SearchSource::Static(std::mem::take(&mut config.items)),
        };
        let pipeline = SearchPipeline::new(source, Arc::clone(&config.label_of))
            .with_filter_mode(options.filter_mode)
            .with_min_query_length(options.min_search_length)
            .with_timeout(options.lookup_timeout());

        let mut inner = DropdownInner {
            is_open: false,
            query: String::new(),
            text_cursor: 0,
            results: Vec::new(),
            loading: false,
            lookup_failed: false,
            focused: None,
            viewport: ListViewport::new(options.visible_rows),
            selected: config.selected_item.take(),
            pipeline,
        };
        inner.reset_search();

        let inner = Arc::new(RwLock::new(inner));
        let dirty = Arc::new(AtomicBool::new(false));
        let wakeup = WakeupHandle::default();

        let target = WeakDropdown {
            id,
            inner: Arc::downgrade(&inner),
            dirty: Arc::clone(&dirty),
            wakeup: wakeup.clone(),
            coordinator: coordinator.downgrade(),
        };
        let registration = coordinator.register(id, move || {
            target.close();
        });

        log::debug!(
            "Dropdown {} created (async={}, disabled={})",
            id,
            config.search_function.is_some(),
            config.options.disabled
        );

        Self {
            id,
            inner,
            shared: Arc::new(Shared {
                config,
                _registration: registration,
            }),
            coordinator: coordinator.clone(),
            lookups: Arc::new(Mutex::new(Vec::new())),
            dirty,
            focus_requested: Arc::new(AtomicBool::new(false)),
            wakeup,
        }
    }

    /// Get the unique ID for this dropdown.
    pub fn id(&self) -> DropdownId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// The plain-data settings this dropdown was created with.
    pub fn options(&self) -> &DropdownOptions {
        &self.shared.config.options
    }

    /// Whether the dropdown ignores every open trigger.
    pub fn is_disabled(&self) -> bool {
        self.shared.config.options.disabled
    }

    /// Disabled dropdowns are skipped by keyboard focus traversal.
    pub fn is_focusable(&self) -> bool {
        !self.is_disabled()
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    /// Check if the menu is open.
    pub fn is_open(&self) -> bool {
        self.inner.read().map(|guard| guard.is_open).unwrap_or(false)
    }

    /// Closed -> Open.
    ///
    /// Claims the coordinator (closing any other open dropdown), starts with an
    /// empty query and requests focus for the search field. Returns false if
    /// the dropdown is disabled or already open.
    pub fn open(&self) -> bool {
        if self.is_disabled() || self.is_open() {
            return false;
        }

        self.coordinator.claim(self.id);

        let request = match self.inner.write() {
            Ok(mut guard) => {
                guard.is_open = true;
                guard.query.clear();
                guard.text_cursor = 0;
                guard.run_search()
            }
            Err(_) => return false,
        };
        self.enqueue(request);

        // The search field exists only once the open menu is rendered
        self.focus_requested.store(true, Ordering::SeqCst);
        self.mark_dirty();
        log::debug!("Dropdown {} opened", self.id);
        true
    }

    /// Open -> Closed.
    ///
    /// Releases the coordinator, clears the query and keyboard focus. Closing a
    /// closed dropdown changes nothing and returns false.
    pub fn close(&self) -> bool {
        let closed = self
            .inner
            .write()
            .map(|mut guard| guard.close())
            .unwrap_or(false);
        if closed {
            self.coordinator.release(self.id);
            self.mark_dirty();
            log::debug!("Dropdown {} closed", self.id);
        }
        closed
    }

    /// Toggle the menu open/closed.
    pub fn toggle(&self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    // -------------------------------------------------------------------------
    // Query
    // -------------------------------------------------------------------------

    /// Get the current query.
    pub fn query(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.query.clone())
            .unwrap_or_default()
    }

    /// Get the query cursor position (byte offset).
    pub fn text_cursor(&self) -> usize {
        self.inner.read().map(|guard| guard.text_cursor).unwrap_or(0)
    }

    /// Replace the query and re-run the search.
    ///
    /// Only an open dropdown has a search field; returns false when closed.
    pub fn set_query(&self, query: impl Into<String>) -> bool {
        let query = query.into();
        self.edit_query(|text, cursor| {
            *text = query;
            *cursor = text.len();
        })
    }

    /// Insert a character at the query cursor.
    pub fn insert_char(&self, c: char) -> bool {
        self.edit_query(|text, cursor| {
            text.insert(*cursor, c);
            *cursor += c.len_utf8();
        })
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&self) -> bool {
        self.edit_query(|text, cursor| {
            if *cursor > 0 {
                let prev = text[..*cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                text.remove(prev);
                *cursor = prev;
            }
        })
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&self) -> bool {
        self.edit_query(|text, cursor| {
            if *cursor < text.len() {
                text.remove(*cursor);
            }
        })
    }

    /// Move the query cursor one character left.
    pub fn text_cursor_left(&self) -> bool {
        self.move_text_cursor(|text, cursor| {
            text[..cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0)
        })
    }

    /// Move the query cursor one character right.
    pub fn text_cursor_right(&self) -> bool {
        self.move_text_cursor(|text, cursor| {
            text[cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| cursor + i)
                .unwrap_or(text.len())
        })
    }

    /// Move the query cursor to the start.
    pub fn text_cursor_home(&self) -> bool {
        self.move_text_cursor(|_, _| 0)
    }

    /// Move the query cursor to the end.
    pub fn text_cursor_end(&self) -> bool {
        self.move_text_cursor(|text, _| text.len())
    }

    /// Apply an edit to the query; re-runs the search if the query changed.
    fn edit_query(&self, edit: impl FnOnce(&mut String, &mut usize)) -> bool {
        let request = match self.inner.write() {
            Ok(mut guard) => {
                if !guard.is_open {
                    return false;
                }
                let inner = &mut *guard;
                let before = inner.query.clone();
                edit(&mut inner.query, &mut inner.text_cursor);
                if inner.query == before {
                    return false;
                }
                inner.run_search()
            }
            Err(_) => return false,
        };
        self.enqueue(request);
        self.mark_dirty();
        true
    }

    fn move_text_cursor(&self, target: impl FnOnce(&str, usize) -> usize) -> bool {
        let moved = match self.inner.write() {
            Ok(mut guard) => {
                if !guard.is_open {
                    return false;
                }
                let next = target(&guard.query, guard.text_cursor);
                let moved = next != guard.text_cursor;
                guard.text_cursor = next;
                moved
            }
            Err(_) => false,
        };
        if moved {
            self.mark_dirty();
        }
        moved
    }

    // -------------------------------------------------------------------------
    // Results
    // -------------------------------------------------------------------------

    /// Get a copy of the current results.
    pub fn results(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|guard| guard.results.clone())
            .unwrap_or_default()
    }

    /// Get the number of results.
    pub fn result_count(&self) -> usize {
        self.inner.read().map(|guard| guard.results.len()).unwrap_or(0)
    }

    /// Whether the latest lookup is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.inner.read().map(|guard| guard.loading).unwrap_or(false)
    }

    /// Whether the latest applied lookup failed.
    pub fn lookup_failed(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.lookup_failed)
            .unwrap_or(false)
    }

    /// Replace the static items, re-filtering with the current query.
    ///
    /// Returns false for dropdowns backed by a search function.
    pub fn set_items(&self, items: Vec<T>) -> bool {
        let replaced = match self.inner.write() {
            Ok(mut guard) => {
                if !guard.pipeline.set_items(items) {
                    return false;
                }
                // Static searches resolve immediately
                let _ = guard.run_search();
                true
            }
            Err(_) => false,
        };
        if replaced {
            self.mark_dirty();
        }
        replaced
    }

    // -------------------------------------------------------------------------
    // Keyboard focus
    // -------------------------------------------------------------------------

    /// Get the focused row.
    pub fn focused_index(&self) -> Option<usize> {
        self.inner.read().map(|guard| guard.focused).unwrap_or(None)
    }

    /// Move focus one row down, stopping at the last row.
    ///
    /// Focus moves are ignored while the menu is closed or loading.
    pub fn focus_next(&self) -> bool {
        self.update_focus(next_index)
    }

    /// Move focus one row up, stopping at the first row.
    pub fn focus_prev(&self) -> bool {
        self.update_focus(prev_index)
    }

    /// Focus a row by index. Out-of-range indices are ignored.
    pub fn set_focused(&self, index: usize) -> bool {
        self.update_focus(|current, len| valid_index(index, len).or(current))
    }

    fn update_focus(&self, f: impl FnOnce(Option<usize>, usize) -> Option<usize>) -> bool {
        let changed = match self.inner.write() {
            Ok(mut guard) => {
                // Rows are hidden while a lookup is outstanding
                if !guard.is_open || guard.loading {
                    return false;
                }
                let next = f(guard.focused, guard.results.len());
                guard.move_focus(next)
            }
            Err(_) => false,
        };
        if changed {
            self.mark_dirty();
        }
        changed
    }

    /// First visible row of the result list.
    pub fn scroll_offset(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.viewport.offset())
            .unwrap_or(0)
    }

    /// Change the result list viewport height, keeping the focused row visible.
    pub fn set_visible_rows(&self, rows: usize) {
        if let Ok(mut guard) = self.inner.write() {
            let focused = guard.focused;
            guard.viewport.set_height(rows, focused);
            self.mark_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Get the current selection.
    pub fn selected(&self) -> Option<T> {
        self.inner
            .read()
            .map(|guard| guard.selected.clone())
            .unwrap_or(None)
    }

    /// Override the current selection without notifying `on_select`.
    pub fn set_selected(&self, item: Option<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.selected = item;
            self.mark_dirty();
        }
    }

    /// Select the result at `index`.
    ///
    /// Returns false if the menu is closed, a lookup is outstanding, or the
    /// index is out of range.
    pub fn select_index(&self, index: usize) -> bool {
        let item = match self.inner.read() {
            Ok(guard) if guard.is_open && !guard.loading => guard.results.get(index).cloned(),
            _ => None,
        };
        match item {
            Some(item) => {
                self.commit(item);
                true
            }
            None => false,
        }
    }

    /// Select the focused result. Returns false if no row is focused.
    pub fn select_focused(&self) -> bool {
        match self.focused_index() {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    /// Notify `on_select`, then record the selection and close in one step.
    fn commit(&self, item: T) {
        (self.shared.config.on_select)(item.clone());

        let closed = match self.inner.write() {
            Ok(mut guard) => {
                guard.selected = Some(item);
                guard.close()
            }
            Err(_) => false,
        };
        if closed {
            self.coordinator.release(self.id);
        }
        self.mark_dirty();
        log::debug!("Dropdown {} selection committed", self.id);
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Call the lookup function and queue its response.
    ///
    /// Must run without the state lock held: lookup functions may read the
    /// dropdown.
    fn enqueue(&self, request: Option<LookupRequest<T>>) {
        let Some(request) = request else {
            return;
        };
        let issued = request.issue();
        log::debug!(
            "Dropdown {} issued lookup #{} for {:?}",
            self.id,
            issued.ticket.seq(),
            issued.ticket.query()
        );
        let pending = PendingLookup::new(issued, self.downgrade());
        if let Ok(mut guard) = self.lookups.lock() {
            guard.push(pending);
        }
    }

    /// Take the lookups issued since the last call, oldest first.
    pub fn take_lookups(&self) -> Vec<PendingLookup<T>> {
        self.lookups
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }

    /// Hand every queued lookup to the tokio runtime.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_lookups(&self) {
        for lookup in self.take_lookups() {
            tokio::spawn(lookup.run());
        }
    }

    /// Number of lookups waiting to be taken.
    pub fn queued_lookups(&self) -> usize {
        self.lookups.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub(crate) fn downgrade(&self) -> WeakDropdown<T> {
        WeakDropdown {
            id: self.id,
            inner: Arc::downgrade(&self.inner),
            dirty: Arc::clone(&self.dirty),
            wakeup: self.wakeup.clone(),
            coordinator: self.coordinator.downgrade(),
        }
    }

    // -------------------------------------------------------------------------
    // Focus control
    // -------------------------------------------------------------------------

    /// Check and clear the search field focus request (called by the host
    /// after the open menu is rendered).
    pub fn take_focus_request(&self) -> bool {
        self.focus_requested.swap(false, Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the dropdown state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Signal `sender` whenever this dropdown's state changes.
    pub fn install_wakeup(&self, sender: WakeupSender) {
        self.wakeup.install(sender);
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        self.wakeup.notify();
    }

    pub(crate) fn with_inner<R>(&self, f: impl FnOnce(&DropdownInner<T>) -> R) -> Option<R> {
        self.inner.read().ok().map(|guard| f(&guard))
    }

    pub(crate) fn shared(&self) -> &Shared<T> {
        &self.shared
    }
}

impl<T> Clone for Dropdown<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            shared: Arc::clone(&self.shared),
            coordinator: self.coordinator.clone(),
            lookups: Arc::clone(&self.lookups),
            dirty: Arc::clone(&self.dirty),
            focus_requested: Arc::clone(&self.focus_requested),
            wakeup: self.wakeup.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Dropdown<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.id)
            .field("options", &self.shared.config.options)
            .finish_non_exhaustive()
    }
}
