//! Typed records exchanged with the SmartShopr API.
//!
//! Every field the service may omit carries an explicit default here, so the
//! rest of the crate never deals with missing keys. A `null` is treated the
//! same as an absent key.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_quantity() -> u32 {
    1
}

fn quantity_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(default_quantity))
}

/// A shopping list. `items` is attached by the coordinator; the lists
/// endpoint never includes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shared: bool,
    #[serde(default, skip_deserializing)]
    pub items: Vec<ListItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity", deserialize_with = "quantity_or_default")]
    pub quantity_value: u32,
    #[serde(default)]
    pub quantity_unit: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
}

impl ListItem {
    /// The unit, if one is set and not blank.
    pub fn unit(&self) -> Option<&str> {
        self.quantity_unit.as_deref().filter(|unit| !unit.is_empty())
    }
}

/// A spending budget. `remaining` is taken from the server as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_amount: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spent: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expense_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub shared: bool,
    #[serde(default)]
    pub remaining: Option<Decimal>,
}

/// Expenses for the current month, totalled per currency code.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expense_count: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub totals: BTreeMap<String, Decimal>,
}

/// Everything fetched by one successful refresh cycle.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot {
    pub lists: Vec<ShoppingList>,
    pub budgets: Vec<Budget>,
    pub expenses: ExpenseSummary,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn list(&self, list_id: &str) -> Option<&ShoppingList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn budget(&self, budget_id: &str) -> Option<&Budget> {
        self.budgets.iter().find(|budget| budget.id == budget_id)
    }

    pub fn item_count(&self) -> usize {
        self.lists.iter().map(|list| list.items.len()).sum()
    }
}

/// Body of `POST lists/{id}/items`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewItem {
    pub name: String,
    pub quantity_value: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_unit: Option<String>,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity_value: u32) -> Self {
        Self {
            name: name.into(),
            quantity_value,
            quantity_unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        let unit = unit.into();
        self.quantity_unit = if unit.is_empty() { None } else { Some(unit) };
        self
    }
}

/// Body of `PATCH items/{id}`. Only the fields that are set are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_value: Option<u32>,
}

impl ItemUpdate {
    pub fn completed(is_completed: bool) -> Self {
        Self {
            is_completed: Some(is_completed),
            ..Default::default()
        }
    }
}

// Response envelopes

#[derive(Deserialize)]
pub(crate) struct ListsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: Vec<ShoppingList>,
}

#[derive(Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ListItem>,
}

#[derive(Deserialize)]
pub(crate) struct ItemEnvelope {
    #[serde(default)]
    pub item: Option<ListItem>,
}

#[derive(Deserialize)]
pub(crate) struct SuccessEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
}

#[derive(Deserialize)]
pub(crate) struct BudgetsEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub budgets: Vec<Budget>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_item_defaults() {
        let item: ListItem = serde_json::from_value(json!({"id": "1", "name": "Milk"})).unwrap();
        assert_eq!(item.quantity_value, 1);
        assert!(item.quantity_unit.is_none());
        assert!(!item.is_completed);

        let item: ListItem =
            serde_json::from_value(json!({"id": "1", "name": "Milk", "quantity_value": null, "quantity_unit": ""}))
                .unwrap();
        assert_eq!(item.quantity_value, 1);
        assert_eq!(item.unit(), None);
    }

    #[test]
    fn list_ignores_items_from_payload() {
        let list: ShoppingList = serde_json::from_value(json!({
            "id": "l1",
            "name": "Weekly",
            "items": [{"id": "x", "name": "y"}]
        }))
        .unwrap();
        assert!(list.items.is_empty());
        assert!(!list.shared);
    }

    #[test]
    fn budget_keeps_server_remaining() {
        let budget: Budget = serde_json::from_value(json!({
            "id": "b1",
            "name": "Food",
            "target_amount": 100,
            "spent": 150.5,
            "remaining": 12.25
        }))
        .unwrap();
        assert_eq!(budget.remaining, Some(Decimal::new(1225, 2)));
        assert_eq!(budget.expense_count, 0);

        let budget: Budget = serde_json::from_value(json!({"id": "b2", "name": "Fuel"})).unwrap();
        assert_eq!(budget.remaining, None);
        assert_eq!(budget.spent, Decimal::ZERO);
    }

    #[test]
    fn item_update_sends_only_set_fields() {
        let body = serde_json::to_value(ItemUpdate::completed(true)).unwrap();
        assert_eq!(body, json!({"is_completed": true}));

        let body = serde_json::to_value(NewItem::new("Milk", 2)).unwrap();
        assert_eq!(body, json!({"name": "Milk", "quantity_value": 2}));
    }
}
