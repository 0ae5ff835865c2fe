//! View model for rendering a Dropdown.
//!
//! The dropdown does not draw anything itself. [`Dropdown::view`] describes
//! what should be on screen and the host turns that into its own elements.

use super::Dropdown;

/// Everything a host needs to draw one dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    /// The always-visible trigger.
    pub trigger: TriggerView,
    /// The menu, present only while open.
    pub menu: Option<MenuView>,
}

/// The trigger showing the current value or the placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    /// Rendered selection, or the placeholder.
    pub text: String,
    /// Whether `text` shows a selection.
    pub has_selection: bool,
    /// Whether the menu is open (arrow direction).
    pub open: bool,
    /// Whether the dropdown is disabled.
    pub disabled: bool,
}

/// The open menu: search field plus result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    /// Search field placeholder.
    pub search_placeholder: String,
    /// Current query.
    pub query: String,
    /// Cursor position in the query (byte offset).
    pub text_cursor: usize,
    /// Rows inside the list viewport.
    pub rows: Vec<RowView>,
    /// Index of the first row in `rows`.
    pub scroll_offset: usize,
    /// Total number of results, visible or not.
    pub total_rows: usize,
    /// Message shown instead of rows.
    pub status: Option<MenuStatus>,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index into the results.
    pub index: usize,
    /// Item key.
    pub key: String,
    /// Rendered row content.
    pub content: String,
    /// Row holds the current selection.
    pub selected: bool,
    /// Row has keyboard focus.
    pub focused: bool,
}

/// Message shown in place of result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStatus {
    /// An async lookup is outstanding.
    Loading,
    /// The query is shorter than the async lookup minimum.
    QueryTooShort {
        /// Minimum query length.
        min: usize,
    },
    /// The latest lookup failed.
    LookupFailed,
    /// Nothing matches the query.
    NoResults,
}

impl std::fmt::Display for MenuStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MenuStatus::Loading => write!(f, "Loading..."),
            MenuStatus::QueryTooShort { min } => write!(f, "Type at least {} characters", min),
            MenuStatus::LookupFailed => write!(f, "Search failed"),
            MenuStatus::NoResults => write!(f, "Nothing found"),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Dropdown<T> {
    /// Text for the trigger: the rendered selection, or the placeholder.
    pub fn selected_text(&self) -> String {
        let config = &self.shared().config;
        match self.selected() {
            Some(item) => match &config.render_selected {
                Some(render) => render(&item),
                None => (config.label_of)(&item),
            },
            None => config.options.placeholder.clone(),
        }
    }

    /// Content of a result row.
    pub fn row_content(&self, item: &T) -> String {
        let config = &self.shared().config;
        match &config.render_item {
            Some(render) => render(item),
            None => (config.label_of)(item),
        }
    }

    /// Describe the dropdown for rendering.
    pub fn view(&self) -> DropdownView {
        let config = &self.shared().config;
        let trigger = TriggerView {
            text: self.selected_text(),
            has_selection: self.selected().is_some(),
            open: self.is_open(),
            disabled: config.options.disabled,
        };

        let menu = self
            .with_inner(|inner| {
                if !inner.is_open {
                    return None;
                }

                let selected_key = inner.selected.as_ref().map(|item| (config.key_of)(item));
                let status = if inner.loading {
                    Some(MenuStatus::Loading)
                } else if !inner.results.is_empty() {
                    None
                } else if inner.is_async() && inner.is_below_minimum() {
                    Some(MenuStatus::QueryTooShort {
                        min: inner.min_query_length(),
                    })
                } else if inner.lookup_failed {
                    Some(MenuStatus::LookupFailed)
                } else {
                    Some(MenuStatus::NoResults)
                };

                // Focus and selection are frozen until the lookup lands
                let rows = if inner.loading {
                    Vec::new()
                } else {
                    inner
                        .viewport
                        .visible_range(inner.results.len())
                        .map(|index| {
                            let item = &inner.results[index];
                            let key = (config.key_of)(item);
                            RowView {
                                index,
                                selected: selected_key.as_deref() == Some(key.as_str()),
                                focused: inner.focused == Some(index),
                                content: self.row_content(item),
                                key,
                            }
                        })
                        .collect()
                };

                Some(MenuView {
                    search_placeholder: config.options.search_placeholder.clone(),
                    query: inner.query.clone(),
                    text_cursor: inner.text_cursor,
                    rows,
                    scroll_offset: inner.viewport.offset(),
                    total_rows: inner.results.len(),
                    status,
                })
            })
            .flatten();

        DropdownView { trigger, menu }
    }
}
