//! Grocery checklist state.
//!
//! The checklist remembers which grocery items have been ticked off. It is a
//! client-local, best-effort cache kept in a [`PreferenceStore`] under one key
//! and shared by every week's grocery list.

mod prefs;

use std::collections::BTreeMap;

pub use prefs::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};

/// Preference key holding the serialized checklist.
pub const CHECKLIST_KEY: &str = "checkedGroceryItems";

/// Item -> checked flag, keyed by the exact item string.
pub struct GroceryChecklist<P> {
    prefs: P,
    items: BTreeMap<String, bool>,
}

impl<P: PreferenceStore> GroceryChecklist<P> {
    /// Restores the checklist from `prefs`.
    ///
    /// A stored value that is not a JSON object of booleans, or a preferences
    /// file that cannot be parsed, is logged and treated as an empty checklist.
    pub fn load(prefs: P) -> Result<Self, PreferenceError> {
        let items = match prefs.get(CHECKLIST_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring corrupt grocery checklist: {}", e);
                BTreeMap::new()
            }),
            None => BTreeMap::new(),
        };
        Ok(Self { prefs, items })
    }

    pub fn is_checked(&self, item: &str) -> bool {
        self.items.get(item).copied().unwrap_or(false)
    }

    /// Records `checked` for `item` and persists the whole mapping.
    pub fn set(&mut self, item: &str, checked: bool) -> Result<(), PreferenceError> {
        self.items.insert(item.to_string(), checked);
        self.persist()
    }

    /// Unchecks everything.
    pub fn clear(&mut self) -> Result<(), PreferenceError> {
        self.items.clear();
        self.prefs.remove(CHECKLIST_KEY)
    }

    /// Every recorded item with its flag, including unchecked ones.
    pub fn items(&self) -> &BTreeMap<String, bool> {
        &self.items
    }

    /// Number of items currently checked.
    pub fn checked_count(&self) -> usize {
        self.items.values().filter(|&&checked| checked).count()
    }

    fn persist(&self) -> Result<(), PreferenceError> {
        let raw = serde_json::to_string(&self.items)?;
        self.prefs.set(CHECKLIST_KEY, &raw)
    }
}
