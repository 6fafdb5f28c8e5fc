use std::fs;
use std::path::Path;

use crate::error::GenError;
use crate::schema::{Entity, Schema};

/// Read a schema model document produced by the extraction step.
pub fn load_schema(path: &Path) -> Result<Schema, GenError> {
    tracing::debug!("Reading schema model from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_schema(&text)
}

pub fn parse_schema(text: &str) -> Result<Schema, GenError> {
    let schema: Schema = serde_json::from_str(text)?;
    tracing::debug!("Found {} entities", schema.entities.len());
    Ok(schema)
}

/// Select entities by class name, keeping schema order. An empty filter selects all.
pub fn select_entities<'a>(schema: &'a Schema, filter: &[String]) -> Vec<&'a Entity> {
    if filter.is_empty() {
        return schema.entities.iter().collect();
    }
    for name in filter {
        if schema.entity(name).is_none() {
            tracing::warn!("Entity not found in schema: {}", name);
        }
    }
    schema
        .entities
        .iter()
        .filter(|e| filter.contains(&e.entity_class))
        .collect()
}
