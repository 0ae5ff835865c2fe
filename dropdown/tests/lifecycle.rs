use std::sync::{Arc, Mutex};
use std::time::Duration;

use dropdown::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct City {
    id: u32,
    name: &'static str,
}

impl DropdownItem for City {
    fn dropdown_key(&self) -> String {
        self.id.to_string()
    }

    fn dropdown_label(&self) -> String {
        self.name.to_string()
    }
}

fn cities() -> Vec<City> {
    vec![
        City { id: 1, name: "Київ" },
        City { id: 2, name: "Харків" },
        City { id: 3, name: "Одеса" },
    ]
}

fn city_dropdown(coordinator: &Coordinator) -> (Dropdown<City>, Arc<Mutex<Vec<City>>>) {
    let selections = Arc::new(Mutex::new(Vec::new()));
    let sink = selections.clone();
    let dropdown = Dropdown::new(
        DropdownConfig::for_items(move |city: City| sink.lock().unwrap().push(city))
            .items(cities()),
        coordinator,
    );
    (dropdown, selections)
}

#[test]
fn test_starts_closed_and_empty() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    assert!(!dropdown.is_open());
    assert_eq!(dropdown.query(), "");
    assert_eq!(dropdown.selected(), None);
    assert_eq!(dropdown.focused_index(), None);
}

#[test]
fn test_open_and_close() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    assert!(dropdown.open());
    assert!(dropdown.is_open());
    assert!(!dropdown.open());

    assert!(dropdown.close());
    assert!(!dropdown.is_open());
}

#[test]
fn test_close_is_idempotent() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);
    dropdown.open();
    dropdown.set_query("од");

    assert!(dropdown.close());
    assert!(!dropdown.close());

    assert!(!dropdown.is_open());
    assert_eq!(dropdown.query(), "");
    assert_eq!(dropdown.result_count(), 3);
    assert!(selections.lock().unwrap().is_empty());
}

#[test]
fn test_reopen_starts_with_empty_query() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);
    dropdown.open();
    dropdown.set_query("од");
    dropdown.on_key(&KeyCombo::key(Key::Down));
    dropdown.close();

    dropdown.open();

    assert_eq!(dropdown.query(), "");
    assert_eq!(dropdown.focused_index(), None);
    assert_eq!(dropdown.result_count(), 3);
}

#[test]
fn test_selection_resets_state_and_notifies_once() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);
    dropdown.open();
    dropdown.set_query("ха");
    dropdown.on_key(&KeyCombo::key(Key::Down));

    dropdown.on_key(&KeyCombo::key(Key::Enter));

    let kharkiv = City { id: 2, name: "Харків" };
    assert_eq!(*selections.lock().unwrap(), vec![kharkiv.clone()]);
    assert_eq!(dropdown.selected(), Some(kharkiv));
    assert!(!dropdown.is_open());
    assert_eq!(dropdown.query(), "");
    assert_eq!(dropdown.focused_index(), None);
    assert_eq!(coordinator.open_instance(), None);
}

#[test]
fn test_row_click_selects() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);
    dropdown.open();

    assert_eq!(dropdown.on_row_click(2), EventResult::Consumed);

    assert_eq!(dropdown.selected().map(|city| city.id), Some(3));
    assert_eq!(selections.lock().unwrap().len(), 1);
    assert!(!dropdown.is_open());
}

#[test]
fn test_row_click_out_of_range() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);
    dropdown.open();

    assert_eq!(dropdown.on_row_click(7), EventResult::Ignored);

    assert!(dropdown.is_open());
    assert!(selections.lock().unwrap().is_empty());
}

#[test]
fn test_selection_requires_open_menu() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);

    assert!(!dropdown.select_index(0));
    assert!(selections.lock().unwrap().is_empty());
}

#[test]
fn test_set_selected_does_not_notify() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);

    dropdown.set_selected(Some(City { id: 1, name: "Київ" }));

    assert_eq!(dropdown.selected().map(|city| city.id), Some(1));
    assert!(selections.lock().unwrap().is_empty());
}

#[test]
fn test_initial_selection() {
    let coordinator = Coordinator::new();
    let dropdown = Dropdown::new(
        DropdownConfig::for_items(|_: City| {})
            .items(cities())
            .selected_item(Some(City { id: 3, name: "Одеса" })),
        &coordinator,
    );

    assert_eq!(dropdown.selected().map(|city| city.id), Some(3));
}

#[test]
fn test_on_select_can_read_the_dropdown() {
    let coordinator = Coordinator::new();
    let seen = Arc::new(Mutex::new(None));
    let slot: Arc<Mutex<Option<Dropdown<City>>>> = Arc::default();
    let (sink, handle) = (seen.clone(), slot.clone());
    let dropdown = Dropdown::new(
        DropdownConfig::for_items(move |_: City| {
            if let Some(dropdown) = handle.lock().unwrap().as_ref() {
                *sink.lock().unwrap() = Some(dropdown.is_open());
            }
        })
        .items(cities()),
        &coordinator,
    );
    *slot.lock().unwrap() = Some(dropdown.clone());
    dropdown.open();

    dropdown.select_index(0);

    // Runs before the menu closes
    assert_eq!(*seen.lock().unwrap(), Some(true));
    assert!(!dropdown.is_open());
    slot.lock().unwrap().take();
}

#[test]
fn test_keyboard_opens_closed_dropdown() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    assert_eq!(
        dropdown.on_key(&KeyCombo::key(Key::Space)),
        EventResult::Consumed
    );
    assert!(dropdown.is_open());

    dropdown.close();
    dropdown.on_key(&KeyCombo::key(Key::Enter));
    assert!(dropdown.is_open());
}

#[test]
fn test_space_types_while_open() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);
    dropdown.open();

    dropdown.on_key(&KeyCombo::key(Key::Char('a')));
    dropdown.on_key(&KeyCombo::key(Key::Space));

    assert_eq!(dropdown.query(), "a ");
    assert!(dropdown.is_open());
}

#[test]
fn test_escape_closes() {
    let coordinator = Coordinator::new();
    let (dropdown, selections) = city_dropdown(&coordinator);
    dropdown.open();

    assert_eq!(
        dropdown.on_key(&KeyCombo::key(Key::Escape)),
        EventResult::Consumed
    );

    assert!(!dropdown.is_open());
    assert!(selections.lock().unwrap().is_empty());
}

#[test]
fn test_other_keys_ignored_while_closed() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    assert_eq!(
        dropdown.on_key(&KeyCombo::key(Key::Char('x'))),
        EventResult::Ignored
    );
    assert!(!dropdown.is_open());
}

#[test]
fn test_disabled_never_opens() {
    let coordinator = Coordinator::new();
    let dropdown = Dropdown::new(
        DropdownConfig::for_items(|_: City| {})
            .items(cities())
            .disabled(true),
        &coordinator,
    );

    assert!(!dropdown.open());
    assert_eq!(dropdown.on_trigger_click(), EventResult::Ignored);
    assert_eq!(dropdown.on_trigger_enter(), EventResult::Ignored);
    assert_eq!(
        dropdown.on_key(&KeyCombo::key(Key::Enter)),
        EventResult::Ignored
    );
    assert!(!dropdown.toggle());

    assert!(!dropdown.is_open());
    assert!(!dropdown.is_focusable());
    assert_eq!(coordinator.open_instance(), None);
}

#[test]
fn test_trigger_click_toggles() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    dropdown.on_trigger_click();
    assert!(dropdown.is_open());

    dropdown.on_trigger_click();
    assert!(!dropdown.is_open());
}

#[test]
fn test_hover_opens_and_leave_closes() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);

    assert_eq!(dropdown.on_trigger_enter(), EventResult::Consumed);
    assert!(dropdown.is_open());
    assert_eq!(dropdown.on_trigger_enter(), EventResult::Ignored);

    assert_eq!(dropdown.on_pointer_leave(), EventResult::Consumed);
    assert!(!dropdown.is_open());
    assert_eq!(dropdown.on_pointer_leave(), EventResult::Ignored);
}

#[test]
fn test_click_outside_closes_without_consuming() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);
    dropdown.open();

    assert_eq!(dropdown.on_click_outside(), EventResult::Ignored);
    assert!(!dropdown.is_open());
}

#[test]
fn test_hover_on_second_dropdown_closes_first() {
    let coordinator = Coordinator::new();
    let (city, _) = city_dropdown(&coordinator);
    let (other, _) = city_dropdown(&coordinator);
    city.open();
    city.set_query("ки");

    other.on_trigger_enter();

    assert!(!city.is_open());
    assert_eq!(city.query(), "");
    assert!(other.is_open());
}

#[test]
fn test_focus_requested_on_open() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);
    assert!(!dropdown.take_focus_request());

    dropdown.open();

    assert!(dropdown.take_focus_request());
    assert!(!dropdown.take_focus_request());
}

#[test]
fn test_dirty_tracking() {
    let coordinator = Coordinator::new();
    let (dropdown, _) = city_dropdown(&coordinator);
    dropdown.clear_dirty();

    dropdown.open();
    assert!(dropdown.is_dirty());
    dropdown.clear_dirty();

    dropdown.on_key(&KeyCombo::key(Key::Down));
    assert!(dropdown.is_dirty());
    dropdown.clear_dirty();

    // Nothing changes at the clamp
    dropdown.on_key(&KeyCombo::key(Key::Up));
    assert!(!dropdown.is_dirty());
}

#[tokio::test]
async fn test_forced_close_wakes_host() {
    let coordinator = Coordinator::new();
    let (city, _) = city_dropdown(&coordinator);
    let (other, _) = city_dropdown(&coordinator);
    let (tx, mut rx) = dropdown::wakeup::channel();
    city.install_wakeup(tx);
    city.open();
    rx.take_pending();
    city.clear_dirty();

    other.open();

    let woken = tokio::time::timeout(Duration::from_secs(1), rx.wait()).await;
    assert_eq!(woken, Ok(true));
    assert!(city.is_dirty());
}

#[test]
fn test_ids_are_distinct() {
    let coordinator = Coordinator::new();
    let (a, _) = city_dropdown(&coordinator);
    let (b, _) = city_dropdown(&coordinator);

    assert_ne!(a.id(), b.id());
    assert_ne!(a.id_string(), b.id_string());
    assert_eq!(a.clone().id(), a.id());
}
