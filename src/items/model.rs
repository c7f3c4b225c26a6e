//! Item data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A catalog record held by the item store.
///
/// `id` and `created_at` are always assigned by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// Raw create-item payload as it arrives on the wire.
///
/// Fields are kept as untyped JSON so that a missing or wrong-typed field is
/// reported by validation alongside any other violation instead of as a parse
/// failure. `None` means the key was absent; an explicit `null` is
/// `Some(Value::Null)`. Server-side fields (`id`, `created_at`) are not part
/// of the shape and are dropped if a client sends them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItem {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Item fields that passed validation but have not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) price: f64,
}

impl ValidItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Assign the server-side identity and creation time.
    pub fn into_item(self) -> Item {
        Item {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            price: self.price,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_item_assigns_identity() {
        let valid = ValidItem {
            name: "Widget".into(),
            description: None,
            price: 1.5,
        };

        let a = valid.clone().into_item();
        let b = valid.into_item();
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
        assert!(a.created_at <= Utc::now());
    }

    #[test]
    fn test_new_item_ignores_server_fields() {
        let raw: NewItem = serde_json::from_str(
            r#"{"id":"client-id","created_at":"2020-01-01T00:00:00Z","name":"x","price":2}"#,
        )
        .unwrap();
        assert_eq!(raw.name, Some(Value::from("x")));
        assert_eq!(raw.price, Some(Value::from(2)));
    }

    #[test]
    fn test_new_item_distinguishes_null_from_absent() {
        let raw: NewItem = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(raw.name, Some(Value::Null));
        assert_eq!(raw.description, None);
        assert_eq!(raw.price, None);
    }

    #[test]
    fn test_new_item_keeps_wrong_types() {
        let raw: NewItem = serde_json::from_str(r#"{"name":7,"price":"cheap"}"#).unwrap();
        assert_eq!(raw.name, Some(Value::from(7)));
        assert_eq!(raw.price, Some(Value::from("cheap")));
    }

    #[test]
    fn test_item_serializes_missing_description_as_null() {
        let item = ValidItem {
            name: "Widget".into(),
            description: None,
            price: 3.0,
        }
        .into_item();

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("description").unwrap().is_null());
        assert_eq!(json["price"], 3.0);
        assert!(json["created_at"].is_string());
    }
}
