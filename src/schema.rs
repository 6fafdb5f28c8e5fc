use serde::{Deserialize, Serialize};

use crate::typemap::{self, ValueType};

/// An extracted database schema: every table and view the generator maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Schema {
    /// Look up an entity by its class name.
    pub fn entity(&self, class_name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.entity_class == class_name)
    }
}

/// Metadata for a single table or view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub entity_class: String,
    #[serde(default)]
    pub entity_namespace: String,
    pub mapping_class: String,
    #[serde(default)]
    pub mapping_namespace: String,
    pub table_name: String,
    #[serde(default)]
    pub table_schema: Option<String>,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub unique_constraints: Vec<UniqueConstraint>,
}

impl Entity {
    /// Find a property by its (unresolved) property name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.property_name == name)
    }

    /// Find the property backing a column, falling back to a property name match.
    pub fn property_for_column(&self, column: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.column_name == column)
            .or_else(|| self.property(column))
    }
}

/// Metadata for a single column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub property_name: String,
    pub column_name: String,
    /// Resolved from the CLR type name when the document is read.
    #[serde(
        rename = "system_type",
        default,
        deserialize_with = "typemap::deserialize_value_type"
    )]
    pub value_type: ValueType,
    #[serde(default)]
    pub store_type: Option<String>,
    #[serde(default)]
    pub is_nullable: bool,
    #[serde(default)]
    pub size: Option<i32>,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub computed_sql: Option<String>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_row_version: bool,
    #[serde(default)]
    pub is_hierarchy_id: bool,
    #[serde(default)]
    pub value_generated: ValueGenerated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueGenerated {
    #[default]
    None,
    OnAdd,
    OnAddOrUpdate,
    OnUpdate,
}

/// Multiplicity of one side of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    One,
    Many,
}

/// A foreign key, seen from the dependent entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// Navigation property on the dependent entity.
    pub property_name: String,
    /// Class name of the principal entity.
    pub primary_entity: String,
    /// Navigation property on the principal entity.
    pub primary_property_name: String,
    pub primary_cardinality: Cardinality,
    #[serde(default)]
    pub is_one_to_one: bool,
    /// Foreign-key property names on the dependent entity, in key column order.
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default = "mapped_by_default")]
    pub is_mapped: bool,
}

fn mapped_by_default() -> bool {
    true
}

/// Metadata for a database index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    /// Column names, not property names.
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default)]
    pub filter: Option<String>,
}

/// An alternate key backed by a unique constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueConstraint {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
}
