//! Item and blog records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// A persisted inventory item.
///
/// Beyond the structured counters, an item carries whatever attributes
/// the caller supplied at insert (name, price, ...) as an opaque map
/// flattened into the top level of the wire representation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, never caller-supplied.
    pub id: String,
    /// Concrete caller identifier, or `"*"` for shared items.
    pub owner: String,
    /// Units in stock. Never driven negative by a sell.
    pub quantity: i64,
    /// Units sold so far.
    pub sold: i64,
    /// Unix timestamp stamped at insert; listings order by insertion.
    pub created_at: u64,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Item {
    /// Materialize a draft into a stored record for `owner`.
    pub(crate) fn materialize(draft: NewItem, owner: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            quantity: draft.quantity,
            sold: 0,
            created_at: unix_now(),
            attrs: draft.attrs,
        }
    }
}

/// Caller-supplied draft for a new item.
///
/// The store assigns the id and owner; `sold` always starts at zero.
#[derive(Clone, Debug, Default)]
pub struct NewItem {
    pub quantity: i64,
    pub attrs: Map<String, Value>,
}

impl NewItem {
    /// Build a draft from a caller-supplied JSON object.
    ///
    /// Reserved fields (`id`, `owner`, `sold`, `created_at`) are stripped
    /// rather than trusted. `quantity` must be a non-negative integer
    /// when present and defaults to zero.
    pub fn from_payload(mut payload: Map<String, Value>) -> StoreResult<Self> {
        payload.remove("id");
        payload.remove("owner");
        payload.remove("sold");
        payload.remove("created_at");

        let quantity = match payload.remove("quantity") {
            Some(value) => value
                .as_i64()
                .filter(|q| *q >= 0)
                .ok_or_else(|| StoreError::InvalidQuantity(value.to_string()))?,
            None => 0,
        };

        Ok(Self {
            quantity,
            attrs: payload,
        })
    }
}

/// A blog post: opaque attributes, read-only, no ownership.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    #[serde(flatten)]
    pub attrs: Map<String, Value>,
}

impl Blog {
    pub(crate) fn materialize(attrs: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            attrs,
        }
    }
}

pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_draft_strips_reserved_fields() {
        let draft = NewItem::from_payload(payload(json!({
            "name": "Widget",
            "quantity": 3,
            "owner": "someone-else",
            "id": "forged",
            "sold": 99,
        })))
        .unwrap();

        assert_eq!(draft.quantity, 3);
        assert_eq!(draft.attrs.get("name"), Some(&json!("Widget")));
        assert!(!draft.attrs.contains_key("owner"));
        assert!(!draft.attrs.contains_key("id"));
        assert!(!draft.attrs.contains_key("sold"));
    }

    #[test]
    fn test_draft_quantity_defaults_to_zero() {
        let draft = NewItem::from_payload(payload(json!({ "name": "Widget" }))).unwrap();
        assert_eq!(draft.quantity, 0);
    }

    #[test]
    fn test_draft_rejects_bad_quantity() {
        for bad in [json!({ "quantity": -1 }), json!({ "quantity": "many" })] {
            let result = NewItem::from_payload(payload(bad));
            assert!(matches!(result, Err(StoreError::InvalidQuantity(_))));
        }
    }

    #[test]
    fn test_item_wire_shape_is_flat() {
        let mut attrs = Map::new();
        attrs.insert("name".into(), json!("Widget"));
        let item = Item::materialize(NewItem { quantity: 3, attrs }, "u1");

        let wire = serde_json::to_value(&item).unwrap();
        assert_eq!(wire["owner"], "u1");
        assert_eq!(wire["quantity"], 3);
        assert_eq!(wire["sold"], 0);
        assert_eq!(wire["name"], "Widget");
    }
}
