//! DropdownItem trait for items with a natural key and label.

/// Trait for items that can be displayed in a Dropdown.
///
/// Implementing it lets [`DropdownConfig::for_items`](super::DropdownConfig::for_items)
/// fill in the key and label extractors.
///
/// # Example
///
/// ```ignore
/// struct City {
///     id: u32,
///     name: String,
/// }
///
/// impl DropdownItem for City {
///     fn dropdown_key(&self) -> String {
///         self.id.to_string()
///     }
///
///     fn dropdown_label(&self) -> String {
///         self.name.clone()
///     }
/// }
/// ```
pub trait DropdownItem {
    /// Unique identifier for this item.
    ///
    /// Used to mark the selected row.
    fn dropdown_key(&self) -> String;

    /// Display text for this item.
    ///
    /// Shown when no render callback is configured, and matched against the
    /// query in static mode.
    fn dropdown_label(&self) -> String;
}

impl DropdownItem for String {
    fn dropdown_key(&self) -> String {
        self.clone()
    }

    fn dropdown_label(&self) -> String {
        self.clone()
    }
}

impl DropdownItem for &str {
    fn dropdown_key(&self) -> String {
        (*self).to_string()
    }

    fn dropdown_label(&self) -> String {
        (*self).to_string()
    }
}

// (key, label) pairs
impl<S1, S2> DropdownItem for (S1, S2)
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    fn dropdown_key(&self) -> String {
        self.0.as_ref().to_string()
    }

    fn dropdown_label(&self) -> String {
        self.1.as_ref().to_string()
    }
}
