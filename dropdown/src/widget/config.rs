//! Dropdown configuration.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::search::{FilterMode, LabelFn, LookupFn, LookupResult};

use super::DropdownItem;

/// Key extractor. Keys identify the selected row.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Render callback for a row or for the selected value.
pub type RenderFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Selection callback.
pub type SelectFn<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Plain-data dropdown settings.
///
/// Every field has a default, so hosts can load partial settings from their own
/// configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownOptions {
    /// Trigger text shown while nothing is selected.
    pub placeholder: String,
    /// Placeholder of the search field.
    pub search_placeholder: String,
    /// Shortest query an async lookup is issued for.
    pub min_search_length: usize,
    /// Disabled dropdowns never open.
    pub disabled: bool,
    /// How static items are matched against the query.
    pub filter_mode: FilterMode,
    /// Height of the result list viewport, in rows.
    pub visible_rows: usize,
    /// Async lookups running longer than this fail with a timeout.
    pub lookup_timeout_ms: Option<u64>,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            placeholder: "Select an option".into(),
            search_placeholder: "Search...".into(),
            min_search_length: 0,
            disabled: false,
            filter_mode: FilterMode::Substring,
            visible_rows: 8,
            lookup_timeout_ms: None,
        }
    }
}

impl DropdownOptions {
    /// Lookup timeout as a duration.
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}

/// Full dropdown configuration: settings plus collaborators.
///
/// The selection callback and the key and label extractors are required, so
/// they are constructor arguments; everything else has a builder method.
///
/// # Example
///
/// ```ignore
/// let config = DropdownConfig::new(
///     |city: &City| city.id.to_string(),
///     |city: &City| city.name.clone(),
///     move |city| selected.set(Some(city)),
/// )
/// .placeholder("Choose your city")
/// .items(cities)
/// .render_item(|city| format!("{} ({})", city.name, city.population));
/// ```
pub struct DropdownConfig<T> {
    pub(crate) options: DropdownOptions,
    pub(crate) items: Vec<T>,
    pub(crate) selected_item: Option<T>,
    pub(crate) on_select: SelectFn<T>,
    pub(crate) key_of: KeyFn<T>,
    pub(crate) label_of: LabelFn<T>,
    pub(crate) render_item: Option<RenderFn<T>>,
    pub(crate) render_selected: Option<RenderFn<T>>,
    pub(crate) search_function: Option<LookupFn<T>>,
}

impl<T> std::fmt::Debug for DropdownConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DropdownConfig")
            .field("options", &self.options)
            .field("items", &self.items.len())
            .field("selected_item", &self.selected_item.is_some())
            .field("render_item", &self.render_item.is_some())
            .field("render_selected", &self.render_selected.is_some())
            .field("search_function", &self.search_function.is_some())
            .finish()
    }
}

impl<T> DropdownConfig<T> {
    /// Create a configuration from the required collaborators.
    pub fn new(
        key_of: impl Fn(&T) -> String + Send + Sync + 'static,
        label_of: impl Fn(&T) -> String + Send + Sync + 'static,
        on_select: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            options: DropdownOptions::default(),
            items: Vec::new(),
            selected_item: None,
            on_select: Arc::new(on_select),
            key_of: Arc::new(key_of),
            label_of: Arc::new(label_of),
            render_item: None,
            render_selected: None,
            search_function: None,
        }
    }

    /// Replace all plain-data settings at once.
    pub fn options(mut self, options: DropdownOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the trigger text shown while nothing is selected.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.placeholder = placeholder.into();
        self
    }

    /// Set the search field placeholder.
    pub fn search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.search_placeholder = placeholder.into();
        self
    }

    /// Set the shortest query an async lookup is issued for.
    pub fn min_search_length(mut self, len: usize) -> Self {
        self.options.min_search_length = len;
        self
    }

    /// Enable or disable the dropdown.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.options.disabled = disabled;
        self
    }

    /// Set how static items are matched against the query.
    pub fn filter_mode(mut self, mode: FilterMode) -> Self {
        self.options.filter_mode = mode;
        self
    }

    /// Set the result list viewport height in rows.
    pub fn visible_rows(mut self, rows: usize) -> Self {
        self.options.visible_rows = rows;
        self
    }

    /// Fail async lookups that run longer than `timeout`.
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.options.lookup_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set the static items. Ignored when a search function is set.
    pub fn items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items = items.into_iter().collect();
        self
    }

    /// Set the initially selected item.
    pub fn selected_item(mut self, item: Option<T>) -> Self {
        self.selected_item = item;
        self
    }

    /// Render result rows with a custom callback instead of the label.
    pub fn render_item(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render_item = Some(Arc::new(render));
        self
    }

    /// Render the selected value with a custom callback instead of the label.
    pub fn render_selected(
        mut self,
        render: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render_selected = Some(Arc::new(render));
        self
    }

    /// Fetch results asynchronously instead of filtering static items.
    pub fn search_function<F, Fut>(mut self, search: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = LookupResult<T>> + Send + 'static,
    {
        let lookup: LookupFn<T> = Arc::new(move |query: String| search(query).boxed());
        self.search_function = Some(lookup);
        self
    }

    /// The plain-data settings.
    pub fn settings(&self) -> &DropdownOptions {
        &self.options
    }
}

impl<T: DropdownItem + 'static> DropdownConfig<T> {
    /// Create a configuration for items that carry their own key and label.
    pub fn for_items(on_select: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(T::dropdown_key, T::dropdown_label, on_select)
    }
}
