//! Demo form: several dropdowns under one coordinator, drawn with crossterm.

use std::io::{self, Write};

use crossterm::event::KeyEvent;
use crossterm::{cursor, queue, style, terminal};
use dropdown::prelude::*;

use crate::data::{self, Selections};

/// Object-safe view of a dropdown, whatever its item type.
pub trait Field: WidgetEvents {
    fn view(&self) -> DropdownView;
    fn spawn_lookups(&self);
    fn is_focusable(&self) -> bool;
    fn take_focus_request(&self) -> bool;
    fn install_wakeup(&self, sender: WakeupSender);
}

impl<T: Clone + Send + Sync + 'static> Field for Dropdown<T> {
    fn view(&self) -> DropdownView {
        Dropdown::view(self)
    }

    fn spawn_lookups(&self) {
        Dropdown::spawn_lookups(self)
    }

    fn is_focusable(&self) -> bool {
        Dropdown::is_focusable(self)
    }

    fn take_focus_request(&self) -> bool {
        Dropdown::take_focus_request(self)
    }

    fn install_wakeup(&self, sender: WakeupSender) {
        Dropdown::install_wakeup(self, sender)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    fields: Vec<(&'static str, Box<dyn Field>)>,
    focus: usize,
    selections: Selections,
    _coordinator: Coordinator,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let coordinator = Coordinator::new();
        let selections = Selections::default();

        let fields: Vec<(&'static str, Box<dyn Field>)> = vec![
            (
                "City",
                Box::new(Dropdown::new(data::city_config(selections.clone()), &coordinator)),
            ),
            (
                "Country",
                Box::new(Dropdown::new(data::country_config(selections.clone()), &coordinator)),
            ),
            (
                "User",
                Box::new(Dropdown::new(data::user_config(selections.clone()), &coordinator)),
            ),
            (
                "Archive",
                Box::new(Dropdown::new(data::archived_config(), &coordinator)),
            ),
        ];

        Self {
            fields,
            focus: 0,
            selections,
            _coordinator: coordinator,
        }
    }

    pub fn install_wakeup(&self, sender: WakeupSender) {
        for (_, field) in &self.fields {
            field.install_wakeup(sender.clone());
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> Flow {
        let Some(combo) = KeyCombo::from_crossterm(event) else {
            return Flow::Continue;
        };
        if combo == KeyCombo::key(Key::Char('c')).ctrl() {
            return Flow::Quit;
        }

        let (_, field) = &self.fields[self.focus];
        let result = field.on_key(&combo);
        field.spawn_lookups();
        if result.is_handled() {
            return Flow::Continue;
        }

        match combo.key {
            Key::Tab if combo.modifiers.shift => self.cycle_focus(false),
            Key::Tab => self.cycle_focus(true),
            Key::Char('q') => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }

    /// Move keyboard focus to the next focusable field, wrapping around.
    fn cycle_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        let mut next = self.focus;
        for _ in 0..len {
            next = if forward { (next + 1) % len } else { (next + len - 1) % len };
            if self.fields[next].1.is_focusable() {
                break;
            }
        }
        if next != self.focus {
            self.focus = next;
            log::debug!("Focus moved to {}", self.fields[next].0);
        }
    }

    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        let mut lines = vec![
            "Dropdown demo".to_string(),
            "Tab/Shift+Tab: move  Enter/Space: open  Esc: close  q or Ctrl+C: quit".to_string(),
            String::new(),
        ];
        let mut search_cursor = None;

        for (index, (name, field)) in self.fields.iter().enumerate() {
            let view = field.view();
            let marker = if index == self.focus { ">" } else { " " };
            let arrow = if view.trigger.open { "^" } else { "v" };
            lines.push(format!("{marker} {name:<8} [ {} {arrow} ]", view.trigger.text));

            if let Some(menu) = view.menu {
                let search = if menu.query.is_empty() {
                    menu.search_placeholder.clone()
                } else {
                    menu.query.clone()
                };
                let prefix = "    / ";
                let column = prefix.len() + menu.query[..menu.text_cursor].chars().count();
                search_cursor = Some((column, lines.len()));
                lines.push(format!("{prefix}{search}"));

                for row in &menu.rows {
                    let focus = if row.focused { ">" } else { " " };
                    let check = if row.selected { " (selected)" } else { "" };
                    lines.push(format!("    {focus} {}{check}", row.content));
                }
                if let Some(status) = menu.status {
                    lines.push(format!("      {status}"));
                }
                if menu.total_rows > menu.rows.len() {
                    lines.push(format!(
                        "      rows {}-{} of {}",
                        menu.scroll_offset + 1,
                        menu.scroll_offset + menu.rows.len(),
                        menu.total_rows
                    ));
                }
            }

            if field.take_focus_request() {
                log::debug!("{} search field focused", name);
            }
        }

        lines.push(String::new());
        lines.push("Selections:".to_string());
        if let Ok(selections) = self.selections.lock() {
            for selection in selections.iter().rev().take(5) {
                lines.push(format!("  {selection}"));
            }
        }

        queue!(out, terminal::Clear(terminal::ClearType::All), cursor::Hide)?;
        for (row, line) in lines.iter().enumerate() {
            queue!(out, cursor::MoveTo(0, row as u16), style::Print(line))?;
        }
        if let Some((column, row)) = search_cursor {
            queue!(out, cursor::MoveTo(column as u16, row as u16), cursor::Show)?;
        }
        out.flush()
    }
}
