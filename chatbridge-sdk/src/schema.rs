use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// Closed set of value types a configuration field can declare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "values")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    /// String constrained to one of the listed values.
    Enum(Vec<String>),
    /// String that must never be echoed back by display surfaces.
    Secret,
}

impl FieldType {
    /// Short label used in validation messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Enum(_) => "enum",
            Self::Secret => "secret",
        }
    }

    /// Whether `value` is of the JSON shape this type declares.
    ///
    /// Enum membership is checked separately by the validator; here an enum
    /// field only requires a string value.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Secret | Self::Enum(_) => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

// ---------------------------------------------------------------------------
// Declared fields and derived descriptors
// ---------------------------------------------------------------------------

/// One field as declared by a plugin's schema.
///
/// `required` is tri-state on purpose: a field declared without an explicit
/// flag resolves to required during introspection, and that fill-in must stay
/// observable rather than being baked in at declaration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub field_type: FieldType,
    pub required: Option<bool>,
    pub default: Option<Value>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: None,
            default: None,
        }
    }

    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    #[must_use]
    pub fn secret(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Secret)
    }

    #[must_use]
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldType::Enum(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Mark the field as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = Some(false);
        self
    }

    /// Mark the field as explicitly required (same effect as leaving the
    /// flag unset, but visible in the declaration).
    #[must_use]
    pub const fn mandatory(mut self) -> Self {
        self.required = Some(true);
        self
    }

    /// Attach a default value. The value must match `field_type`; mismatched
    /// defaults are a plugin bug surfaced at introspection time.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// One introspected field of a schema, with requiredness resolved.
///
/// Derived, never stored: recomputed from the declared `FieldSpec` list on
/// each introspection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<Value>,
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// A module's declared configuration contract: an ordered field list.
///
/// Field order is declaration order and is preserved through introspection;
/// rendering surfaces depend on it being stable across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigSchema {
    fields: Vec<FieldSpec>,
}

impl ConfigSchema {
    #[must_use]
    pub fn builder() -> ConfigSchemaBuilder {
        ConfigSchemaBuilder { fields: Vec::new() }
    }

    /// Declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`ConfigSchema`]. Re-declaring a field name replaces the
/// earlier declaration in place, keeping its original position.
pub struct ConfigSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl ConfigSchemaBuilder {
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == spec.name) {
            *existing = spec;
        } else {
            self.fields.push(spec);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> ConfigSchema {
        ConfigSchema {
            fields: self.fields,
        }
    }
}
