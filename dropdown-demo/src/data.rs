//! Sample data and dropdown configurations.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dropdown::prelude::*;

#[derive(Debug, Clone)]
pub struct City {
    pub id: u32,
    pub name: &'static str,
    pub population: &'static str,
}

pub fn cities() -> Vec<City> {
    vec![
        City { id: 1, name: "Київ", population: "2.8M" },
        City { id: 2, name: "Харків", population: "1.4M" },
        City { id: 3, name: "Одеса", population: "1.0M" },
        City { id: 4, name: "Дніпро", population: "980K" },
        City { id: 5, name: "Львів", population: "720K" },
    ]
}

/// (ISO code, name) pairs.
pub const COUNTRIES: [(&str, &str); 4] = [
    ("UA", "Україна"),
    ("PL", "Польща"),
    ("DE", "Німеччина"),
    ("FR", "Франція"),
];

#[derive(Debug, Clone)]
pub struct User {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
}

impl DropdownItem for User {
    fn dropdown_key(&self) -> String {
        self.id.to_string()
    }

    fn dropdown_label(&self) -> String {
        self.name.to_string()
    }
}

fn users() -> Vec<User> {
    vec![
        User { id: 1, name: "Олександр Петренко", email: "alex@example.com" },
        User { id: 2, name: "Марія Іваненко", email: "maria@example.com" },
        User { id: 3, name: "Дмитро Коваленко", email: "dmitro@example.com" },
        User { id: 4, name: "Анна Сидоренко", email: "anna@example.com" },
    ]
}

/// Simulated remote user directory.
pub async fn search_users(query: String) -> LookupResult<User> {
    tokio::time::sleep(Duration::from_millis(300)).await;
    let needle = query.to_lowercase();
    Ok(users()
        .into_iter()
        .filter(|user| {
            user.name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .collect())
}

/// Log of committed selections, newest last.
pub type Selections = Arc<Mutex<Vec<String>>>;

fn record(selections: &Selections, field: &'static str, value: String) {
    log::info!("{} selected: {}", field, value);
    if let Ok(mut guard) = selections.lock() {
        guard.push(format!("{field}: {value}"));
    }
}

pub fn city_config(selections: Selections) -> DropdownConfig<City> {
    DropdownConfig::new(
        |city: &City| city.id.to_string(),
        |city: &City| city.name.to_string(),
        move |city: City| record(&selections, "City", city.name.to_string()),
    )
    .placeholder("Оберіть ваше місто")
    .search_placeholder("Пошук міста...")
    .visible_rows(4)
    .items(cities())
    .render_item(|city| format!("{:<12} {:>5}", city.name, city.population))
    .render_selected(|city| format!("{} ({})", city.name, city.population))
}

pub fn country_config(selections: Selections) -> DropdownConfig<(&'static str, &'static str)> {
    DropdownConfig::for_items(move |(code, name): (&'static str, &'static str)| {
        record(&selections, "Country", format!("{name} ({code})"))
    })
    .placeholder("Оберіть країну")
    .search_placeholder("Пошук країни...")
    .filter_mode(FilterMode::Fuzzy)
    .items(COUNTRIES)
}

pub fn user_config(selections: Selections) -> DropdownConfig<User> {
    DropdownConfig::for_items(move |user: User| {
        record(&selections, "User", format!("{} <{}>", user.name, user.email))
    })
    .placeholder("Знайти користувача")
    .search_placeholder("Введіть ім'я або email...")
    .min_search_length(2)
    .lookup_timeout(Duration::from_secs(2))
    .search_function(search_users)
    .render_item(|user| format!("{} <{}>", user.name, user.email))
}

pub fn archived_config() -> DropdownConfig<&'static str> {
    DropdownConfig::for_items(|_: &'static str| {})
        .placeholder("Архів (недоступно)")
        .items(["Порожньо"])
        .disabled(true)
}
