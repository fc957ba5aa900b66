use chatbridge_sdk::error::BridgeError;
use chatbridge_sdk::schema::{ConfigSchema, FieldDescriptor};
use tracing::warn;

/// Derive the ordered field descriptor list from a declared schema.
///
/// Descriptors come back in declaration order, stable across calls. A field
/// with no explicit required flag resolves to `required = true`; dropping
/// that fill-in would silently loosen validation, so it is load-bearing. A
/// default value that does not match its field's declared type is discarded
/// with a warning rather than surfaced to consumers.
///
/// # Errors
/// Returns `BridgeError::SchemaIntrospection` if the schema declares no
/// fields at all (a malformed module).
pub fn describe_fields(
    module: &str,
    schema: &ConfigSchema,
) -> Result<Vec<FieldDescriptor>, BridgeError> {
    if schema.is_empty() {
        return Err(BridgeError::SchemaIntrospection {
            module: module.to_owned(),
            detail: "schema declares no fields".to_owned(),
        });
    }

    let descriptors = schema
        .fields()
        .iter()
        .map(|spec| {
            let default = spec.default.clone().filter(|value| {
                let ok = spec.field_type.matches(value);
                if !ok {
                    warn!(
                        module,
                        field = spec.name,
                        expected = spec.field_type.label(),
                        "discarding default value of mismatched type"
                    );
                }
                ok
            });
            FieldDescriptor {
                name: spec.name.clone(),
                field_type: spec.field_type.clone(),
                required: spec.required.unwrap_or(true),
                default,
            }
        })
        .collect();

    Ok(descriptors)
}
