//! Event handling for the Dropdown widget.
//!
//! Hosts translate their input into these calls. Pointer handlers take no
//! coordinates: hit testing against the trigger, the rows and the widget's
//! bounds belongs to the host.

use crate::input::{Key, KeyCombo};

use super::Dropdown;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

/// Trait for widgets that handle keyboard and pointer events.
///
/// All methods default to `EventResult::Ignored`, so widgets only implement
/// the events they care about.
pub trait WidgetEvents {
    /// Handle a key press while the widget has keyboard focus.
    fn on_key(&self, _key: &KeyCombo) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a click on the trigger.
    fn on_trigger_click(&self) -> EventResult {
        EventResult::Ignored
    }

    /// Handle the pointer entering the trigger.
    fn on_trigger_enter(&self) -> EventResult {
        EventResult::Ignored
    }

    /// Handle the pointer leaving the widget (trigger and menu) entirely.
    fn on_pointer_leave(&self) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a pointer press outside the widget's bounds.
    fn on_click_outside(&self) -> EventResult {
        EventResult::Ignored
    }

    /// Handle the pointer entering a result row.
    fn on_row_hover(&self, _index: usize) -> EventResult {
        EventResult::Ignored
    }

    /// Handle a click on a result row.
    fn on_row_click(&self, _index: usize) -> EventResult {
        EventResult::Ignored
    }
}

impl<T: Clone + Send + Sync + 'static> WidgetEvents for Dropdown<T> {
    fn on_key(&self, key: &KeyCombo) -> EventResult {
        log::trace!("Dropdown {} key {:?} (open={})", self.id(), key, self.is_open());

        // Leave ctrl/alt shortcuts to the host
        if key.modifiers.is_command() {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            // Closed state: only activation keys
            return match key.key {
                Key::Enter | Key::Space if !self.is_disabled() => {
                    self.open();
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        // Open state: navigation is intercepted, everything else edits the query
        match key.key {
            Key::Escape => {
                self.close();
                EventResult::Consumed
            }
            Key::Down => {
                self.focus_next();
                EventResult::Consumed
            }
            Key::Up => {
                self.focus_prev();
                EventResult::Consumed
            }
            Key::Enter => {
                // No focused row: nothing to commit
                self.select_focused();
                EventResult::Consumed
            }
            Key::Backspace => {
                self.delete_char_before();
                EventResult::Consumed
            }
            Key::Delete => {
                self.delete_char_at();
                EventResult::Consumed
            }
            Key::Left => {
                self.text_cursor_left();
                EventResult::Consumed
            }
            Key::Right => {
                self.text_cursor_right();
                EventResult::Consumed
            }
            Key::Home => {
                self.text_cursor_home();
                EventResult::Consumed
            }
            Key::End => {
                self.text_cursor_end();
                EventResult::Consumed
            }
            other => match other.typed_char() {
                Some(c) => {
                    self.insert_char(c);
                    EventResult::Consumed
                }
                None => EventResult::Ignored,
            },
        }
    }

    fn on_trigger_click(&self) -> EventResult {
        if self.is_disabled() {
            return EventResult::Ignored;
        }
        self.toggle();
        EventResult::Consumed
    }

    fn on_trigger_enter(&self) -> EventResult {
        if self.is_disabled() || self.is_open() {
            return EventResult::Ignored;
        }
        self.open().into()
    }

    fn on_pointer_leave(&self) -> EventResult {
        self.close().into()
    }

    fn on_click_outside(&self) -> EventResult {
        // Outside clicks still reach whatever was clicked
        self.close();
        EventResult::Ignored
    }

    fn on_row_hover(&self, index: usize) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        self.set_focused(index);
        EventResult::Consumed
    }

    fn on_row_click(&self, index: usize) -> EventResult {
        self.select_index(index).into()
    }
}
