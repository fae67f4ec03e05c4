use crudstore_types::EntityId;
use serde::{Deserialize, Serialize};

/// Attribute name → value mapping carried by an entity.
///
/// Supplied by the caller on create and replaced wholesale on update.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A record held by the resource store.
///
/// Entities handed out by the store are independent copies; mutating one
/// never affects the stored state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub fields: Fields,
}

impl Entity {
    pub fn new(id: EntityId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Extract a string attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_str())
    }

    /// Extract a boolean attribute.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(|v| v.as_bool())
    }

    /// Extract a numeric attribute.
    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(|v| v.as_f64())
    }
}
