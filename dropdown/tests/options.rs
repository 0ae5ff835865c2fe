use std::time::Duration;

use dropdown::prelude::*;

#[test]
fn test_defaults() {
    let options = DropdownOptions::default();

    assert_eq!(options.placeholder, "Select an option");
    assert_eq!(options.search_placeholder, "Search...");
    assert_eq!(options.min_search_length, 0);
    assert!(!options.disabled);
    assert_eq!(options.filter_mode, FilterMode::Substring);
    assert_eq!(options.lookup_timeout(), None);
}

#[test]
fn test_partial_options_from_json() {
    let options: DropdownOptions = serde_json::from_str(
        r#"{
            "placeholder": "Choose your city",
            "min_search_length": 2,
            "filter_mode": "fuzzy",
            "lookup_timeout_ms": 1500
        }"#,
    )
    .unwrap();

    assert_eq!(options.placeholder, "Choose your city");
    assert_eq!(options.search_placeholder, "Search...");
    assert_eq!(options.min_search_length, 2);
    assert_eq!(options.filter_mode, FilterMode::Fuzzy);
    assert_eq!(options.lookup_timeout(), Some(Duration::from_millis(1500)));
}

#[test]
fn test_unknown_filter_mode_rejected() {
    let result = serde_json::from_str::<DropdownOptions>(r#"{"filter_mode": "regex"}"#);
    assert!(result.is_err());
}

#[test]
fn test_options_flow_into_dropdown() {
    let options = DropdownOptions {
        placeholder: "Pick one".into(),
        disabled: true,
        ..Default::default()
    };
    let coordinator = Coordinator::new();
    let dropdown = Dropdown::new(
        DropdownConfig::for_items(|_: String| {})
            .options(options.clone())
            .items(vec!["a".to_string()]),
        &coordinator,
    );

    assert_eq!(dropdown.options(), &options);
    assert!(dropdown.is_disabled());
    assert_eq!(dropdown.view().trigger.text, "Pick one");
}

#[test]
fn test_builder_overrides_settings() {
    let config = DropdownConfig::for_items(|_: String| {})
        .placeholder("Choose a country")
        .min_search_length(3)
        .lookup_timeout(Duration::from_secs(2));

    assert_eq!(config.settings().placeholder, "Choose a country");
    assert_eq!(config.settings().min_search_length, 3);
    assert_eq!(config.settings().lookup_timeout_ms, Some(2000));
}

#[test]
fn test_lookup_error_messages() {
    assert_eq!(
        LookupError::failed("offline").to_string(),
        "Lookup failed: offline"
    );
    assert_eq!(
        LookupError::Timeout(Duration::from_millis(250)).to_string(),
        "Lookup timed out after 250ms"
    );
    let err: LookupError = std::io::Error::other("connection reset").into();
    assert_eq!(err, LookupError::Failed("connection reset".into()));
}
