use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::meal_slot::{Day, MealSlot};

pub type DayPlan = BTreeMap<MealSlot, Vec<String>>;

/// A week of planned dishes: day -> meal slot -> recipe ids.
///
/// Recipe ids are references resolved at display time. An id whose recipe
/// no longer exists is kept in the plan and simply skipped by readers.
///
/// Iteration follows the planner grid: days Monday to Sunday, then slots in
/// their fixed order, then ids in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealPlan {
    days: BTreeMap<Day, DayPlan>,
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a stored plan document.
    ///
    /// Unknown day or slot names are skipped. A slot stored as a single id
    /// (the older one-dish-per-slot shape) is read as a one-element list and a
    /// null slot as empty.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let mut plan = Self::new();

        for (day_name, slots) in fields {
            let Ok(day) = Day::from_str(day_name) else {
                tracing::warn!("Skipping unknown day '{}' in meal plan", day_name);
                continue;
            };
            let Some(slots) = slots.as_object() else {
                tracing::warn!("Skipping malformed entry for {} in meal plan", day);
                continue;
            };

            let day_plan = plan.days.entry(day).or_default();
            for (slot_name, value) in slots {
                let Ok(slot) = MealSlot::from_str(slot_name) else {
                    tracing::warn!("Skipping unknown slot '{}' on {}", slot_name, day);
                    continue;
                };

                let ids: Vec<String> = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect(),
                    Value::String(id) => vec![id.clone()],
                    _ => Vec::new(),
                };
                if !ids.is_empty() {
                    day_plan.entry(slot).or_default().extend(ids);
                }
            }
        }

        plan
    }

    /// Serializes the plan as a document body.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        for (day, slots) in &self.days {
            let slots: Map<String, Value> = slots
                .iter()
                .map(|(slot, ids)| {
                    let ids = ids.iter().cloned().map(Value::String).collect();
                    (slot.to_string(), Value::Array(ids))
                })
                .collect();
            fields.insert(day.to_string(), Value::Object(slots));
        }
        fields
    }

    /// Appends a recipe to a slot, creating the day and slot as needed.
    pub fn add_dish(&mut self, day: Day, slot: MealSlot, recipe_id: impl Into<String>) {
        self.days
            .entry(day)
            .or_default()
            .entry(slot)
            .or_default()
            .push(recipe_id.into());
    }

    /// Removes the first occurrence of a recipe from a slot.
    ///
    /// A slot left empty is removed from its day. Returns true if an entry was
    /// removed.
    pub fn remove_dish(&mut self, day: Day, slot: MealSlot, recipe_id: &str) -> bool {
        let Some(day_plan) = self.days.get_mut(&day) else {
            return false;
        };
        let Some(ids) = day_plan.get_mut(&slot) else {
            return false;
        };
        let Some(pos) = ids.iter().position(|id| id == recipe_id) else {
            return false;
        };

        ids.remove(pos);
        if ids.is_empty() {
            day_plan.remove(&slot);
        }
        true
    }

    /// Replaces a slot with exactly one recipe, or clears it with `None`.
    pub fn set_dish(&mut self, day: Day, slot: MealSlot, recipe_id: Option<String>) {
        match recipe_id {
            Some(id) => {
                self.days.entry(day).or_default().insert(slot, vec![id]);
            }
            None => {
                if let Some(day_plan) = self.days.get_mut(&day) {
                    day_plan.remove(&slot);
                }
            }
        }
    }

    pub fn dishes(&self, day: Day, slot: MealSlot) -> &[String] {
        self.days
            .get(&day)
            .and_then(|slots| slots.get(&slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the slot key is present for the day.
    pub fn has_slot(&self, day: Day, slot: MealSlot) -> bool {
        self.days
            .get(&day)
            .is_some_and(|slots| slots.contains_key(&slot))
    }

    pub fn day(&self, day: Day) -> Option<&DayPlan> {
        self.days.get(&day)
    }

    /// All referenced recipe ids in grid order, duplicates included.
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.days
            .values()
            .flat_map(|slots| slots.values())
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(|slots| slots.is_empty())
    }
}
