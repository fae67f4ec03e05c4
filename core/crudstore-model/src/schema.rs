use crate::{FieldValidator, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative validation policy for one resource type.
///
/// Loadable from JSON so a server can be pointed at a schema file:
///
/// ```json
/// {
///   "name": "product",
///   "fields": [
///     {"name": "name", "field_type": "text", "required": true},
///     {"name": "price", "field_type": "number", "required": true, "min": 0}
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
    /// Reject attributes that no rule names.
    #[serde(default)]
    pub deny_unknown: bool,
}

impl ResourceSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            deny_unknown: false,
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn with_field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Rejects attributes not covered by any rule.
    #[must_use]
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown = true;
        self
    }

    /// Parses a schema from its JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Looks up the rule for an attribute.
    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|r| r.name == name)
    }
}

impl FieldValidator for ResourceSchema {
    fn validate(&self, fields: &Fields) -> Result<(), String> {
        for rule in &self.fields {
            rule.check(fields.get(&rule.name))?;
        }
        if self.deny_unknown {
            if let Some(unknown) = fields.keys().find(|k| self.rule(k).is_none()) {
                return Err(format!("unknown field: {unknown}"));
            }
        }
        Ok(())
    }
}

/// Constraint on a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub name: String,
    pub field_type: FieldType,
    /// A required attribute must be present and non-null.
    #[serde(default)]
    pub required: bool,
    /// Exclusive lower bound. Only meaningful for numeric types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl FieldRule {
    fn simple(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            min: None,
        }
    }

    /// Shorthand for a string attribute.
    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldType::Text)
    }

    /// Shorthand for a numeric attribute.
    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number)
    }

    /// Shorthand for an integral attribute.
    pub fn integer(name: &str) -> Self {
        Self::simple(name, FieldType::Integer)
    }

    /// Shorthand for a boolean attribute.
    pub fn bool(name: &str) -> Self {
        Self::simple(name, FieldType::Bool)
    }

    /// Shorthand for an array attribute.
    pub fn array(name: &str) -> Self {
        Self::simple(name, FieldType::Array)
    }

    /// Shorthand for a nested object attribute.
    pub fn object(name: &str) -> Self {
        Self::simple(name, FieldType::Object)
    }

    /// Shorthand for an attribute of any type.
    pub fn any(name: &str) -> Self {
        Self::simple(name, FieldType::Any)
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Requires numeric values to be strictly greater than `min`.
    #[must_use]
    pub fn greater_than(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let value = match value {
            None | Some(Value::Null) if self.required => {
                return Err(format!("{} is required", self.name));
            }
            None | Some(Value::Null) => return Ok(()),
            Some(v) => v,
        };

        if !self.field_type.matches(value) {
            return Err(format!("{} must be {}", self.name, self.field_type.describe()));
        }

        if let (Some(min), Some(n)) = (self.min, value.as_f64()) {
            if n <= min {
                return Err(format!("{} must be greater than {}", self.name, min));
            }
        }

        Ok(())
    }
}

/// JSON type an attribute must have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Integer,
    Bool,
    Array,
    Object,
    Any,
}

impl FieldType {
    /// Returns true if `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Text => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Bool => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Text => "a string",
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Bool => "a boolean",
            Self::Array => "an array",
            Self::Object => "an object",
            Self::Any => "any value",
        }
    }
}
