use uuid::Uuid;

// ---------------------------------------------------------------------------
// Validation violations
// ---------------------------------------------------------------------------

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is absent or null.
    MissingRequired,
    /// The value's JSON shape does not match the declared field type
    /// (reported only under typed validation).
    TypeMismatch { expected: &'static str },
    /// A string value is not a member of the declared enum
    /// (reported only under typed validation).
    NotInEnum { allowed: Vec<String> },
}

/// One field's validation failure. Failures accumulate; validation never
/// stops at the first violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl FieldViolation {
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind: ViolationKind::MissingRequired,
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => write!(f, "{}: missing required field", self.field),
            ViolationKind::TypeMismatch { expected } => {
                write!(f, "{}: expected {expected} value", self.field)
            }
            ViolationKind::NotInEnum { allowed } => {
                write!(f, "{}: not one of [{}]", self.field, allowed.join(", "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Subsystem errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the configuration lifecycle subsystem.
///
/// `Storage` and `SchemaIntrospection` are operational failures that
/// propagate to the caller unchanged; the remaining variants are
/// user-correctable and carried as structured values.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("module '{module}' is not registered")]
    ModuleNotFound { module: String },

    #[error("schema for module '{module}' is malformed: {detail}")]
    SchemaIntrospection { module: String, detail: String },

    #[error("configuration does not match schema: [{}]",
        violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    SchemaMismatch { violations: Vec<FieldViolation> },

    #[error("instance '{instance}' of module '{module}' already exists")]
    DuplicateInstance { module: String, instance: String },

    #[error("no instance with id {id}")]
    InstanceNotFound { id: Uuid },

    #[error("storage unavailable: {detail}")]
    Storage { detail: String },
}

impl BridgeError {
    /// Names of required fields missing from a `SchemaMismatch`, in schema
    /// order. Empty for every other variant.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&str> {
        match self {
            Self::SchemaMismatch { violations } => violations
                .iter()
                .filter(|v| v.kind == ViolationKind::MissingRequired)
                .map(|v| v.field.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True for variants a caller can fix by changing the request.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ModuleNotFound { .. }
                | Self::SchemaMismatch { .. }
                | Self::DuplicateInstance { .. }
                | Self::InstanceNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_lists_all_fields() {
        let err = BridgeError::SchemaMismatch {
            violations: vec![FieldViolation::missing("b"), FieldViolation::missing("c")],
        };
        assert_eq!(err.missing_fields(), ["b", "c"]);
        let msg = err.to_string();
        assert!(msg.contains("b: missing required field"));
        assert!(msg.contains("c: missing required field"));
    }

    #[test]
    fn user_error_classification() {
        assert!(
            BridgeError::ModuleNotFound {
                module: "x".into()
            }
            .is_user_error()
        );
        assert!(
            !BridgeError::Storage {
                detail: "disk full".into()
            }
            .is_user_error()
        );
    }
}
