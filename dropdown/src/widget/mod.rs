//! Dropdown widget - a searchable single-select menu.

mod config;
mod events;
mod item;
mod lookup;
mod navigation;
mod render;
mod state;
mod viewport;

pub use config::{DropdownConfig, DropdownOptions, KeyFn, RenderFn, SelectFn};
pub use events::{EventResult, WidgetEvents};
pub use item::DropdownItem;
pub use lookup::{LookupOutcome, PendingLookup};
pub use navigation::{next_index, prev_index};
pub use render::{DropdownView, MenuStatus, MenuView, RowView, TriggerView};
pub use state::Dropdown;
pub use viewport::ListViewport;
