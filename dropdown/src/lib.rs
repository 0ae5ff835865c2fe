//! Searchable single-select dropdown.
//!
//! A headless combobox: [`Dropdown`] owns the interaction state machine
//! (open/close, query, results, keyboard focus), the [`search`] pipeline
//! filters static items or runs async lookups with stale-response
//! suppression, and a shared [`Coordinator`] keeps at most one menu open.
//! Rendering is left to the host through [`Dropdown::view`].

pub mod coordinator;
pub mod input;
pub mod search;
pub mod wakeup;
pub mod widget;

pub use coordinator::{Coordinator, DropdownId, Registration};
pub use widget::{Dropdown, DropdownConfig, DropdownItem, DropdownOptions};

pub mod prelude {
    pub use crate::coordinator::{Coordinator, DropdownId};
    pub use crate::input::{Key, KeyCombo, Modifiers};
    pub use crate::search::{FilterMode, LookupError, LookupResult};
    pub use crate::wakeup::{WakeupReceiver, WakeupSender};
    pub use crate::widget::{
        Dropdown, DropdownConfig, DropdownItem, DropdownOptions, DropdownView, EventResult,
        LookupOutcome, MenuStatus, PendingLookup, WidgetEvents,
    };
}
