use chatbridge_sdk::error::{FieldViolation, ViolationKind};
use chatbridge_sdk::models::ConfigMap;
use chatbridge_sdk::schema::{FieldDescriptor, FieldType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How strictly submitted configuration is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Required fields must be present and non-null; values are not
    /// type-checked. Compatibility baseline.
    #[default]
    Presence,
    /// Presence checking plus value-shape checks against each descriptor's
    /// declared type, including enum membership.
    Typed,
}

/// Check a candidate configuration against a schema's field descriptors.
///
/// Not short-circuiting: every violation is accumulated so the caller gets
/// the full list in one pass. Fields present in the candidate but not
/// declared in the schema are ignored on purpose.
///
/// # Errors
/// Returns the accumulated violations when any descriptor is unsatisfied.
pub fn validate(
    descriptors: &[FieldDescriptor],
    candidate: &ConfigMap,
    mode: ValidationMode,
) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    for descriptor in descriptors {
        match candidate.get(&descriptor.name) {
            None | Some(Value::Null) => {
                if descriptor.required {
                    violations.push(FieldViolation::missing(&descriptor.name));
                }
            }
            Some(value) => {
                if mode == ValidationMode::Typed {
                    check_type(descriptor, value, &mut violations);
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_type(descriptor: &FieldDescriptor, value: &Value, violations: &mut Vec<FieldViolation>) {
    if !descriptor.field_type.matches(value) {
        violations.push(FieldViolation {
            field: descriptor.name.clone(),
            kind: ViolationKind::TypeMismatch {
                expected: descriptor.field_type.label(),
            },
        });
        return;
    }

    // Shape already checked; enum membership is the remaining constraint.
    if let (FieldType::Enum(allowed), Some(s)) = (&descriptor.field_type, value.as_str()) {
        if !allowed.iter().any(|a| a == s) {
            violations.push(FieldViolation {
                field: descriptor.name.clone(),
                kind: ViolationKind::NotInEnum {
                    allowed: allowed.clone(),
                },
            });
        }
    }
}
