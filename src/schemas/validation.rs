use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    schemas::{RecordSchema, SchemaHandle},
};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a raw JSON payload against a record schema
pub fn validate_record(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            PlannerError::Config(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        debug!(
            target: "tripplanner::schema",
            schema = schema.schema_name(),
            error = %detail_str,
            payload = %payload
        );

        return Err(PlannerError::InputShape(format!(
            "`{}` does not match the expected shape: {}",
            schema.schema_name(),
            detail_str
        )));
    }

    Ok(())
}

/// Validate a payload against `T`'s schema, then deserialize it, reporting the failing path
pub fn decode_record<T: RecordSchema>(payload: Value) -> Result<T> {
    let schema = T::schema();
    validate_record(schema, &payload)?;

    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::InputShape(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })
}
