use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::codegen::predict;
use crate::codegen::statement::{Directive, MappingPlan, Statement, TableConstants};
use crate::codegen::strip_outer_parens;
use crate::error::GenError;
use crate::naming::NamingPolicy;
use crate::schema::{
    Cardinality, Entity, Index, Property, Relationship, Schema, UniqueConstraint, ValueGenerated,
};
use crate::typemap::{classify_store_type, StoreTypeClass};

/// Native type forced onto row-version properties.
const ROW_VERSION_STORE_TYPE: &str = "rowversion";

/// Order of the statement groups after the table and key bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatementOrdering {
    /// table, key, properties, relationships, indexes, alternate keys
    #[default]
    PropertiesFirst,
    /// table, key, indexes, alternate keys, properties, relationships
    IndexesFirst,
}

impl FromStr for StatementOrdering {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "properties-first" => Ok(StatementOrdering::PropertiesFirst),
            "indexes-first" => Ok(StatementOrdering::IndexesFirst),
            other => Err(GenError::PolicyMisconfiguration(format!(
                "unknown statement ordering '{other}' (expected 'properties-first' or 'indexes-first')"
            ))),
        }
    }
}

impl fmt::Display for StatementOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementOrdering::PropertiesFirst => f.write_str("properties-first"),
            StatementOrdering::IndexesFirst => f.write_str("indexes-first"),
        }
    }
}

/// Turns one entity's metadata into an ordered statement sequence.
///
/// The emitter holds no mutable state: each call to [`MappingEmitter::emit`]
/// depends only on the entity, the (read-only) schema it is looked up in, and
/// the naming policy.
pub struct MappingEmitter<'a> {
    schema: &'a Schema,
    naming: &'a dyn NamingPolicy,
    ordering: StatementOrdering,
    include_constants: bool,
}

impl<'a> MappingEmitter<'a> {
    pub fn new(schema: &'a Schema, naming: &'a dyn NamingPolicy) -> Self {
        Self {
            schema,
            naming,
            ordering: StatementOrdering::default(),
            include_constants: false,
        }
    }

    pub fn with_ordering(mut self, ordering: StatementOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_constants(mut self, include_constants: bool) -> Self {
        self.include_constants = include_constants;
        self
    }

    /// Build the mapping plan for one entity. Malformed metadata fails the whole
    /// entity; no partial plan is returned.
    pub fn emit(&self, entity: &Entity) -> Result<MappingPlan, GenError> {
        tracing::debug!("Emitting mapping for {}", entity.entity_class);
        check_unique_properties(entity)?;

        let properties: Vec<Statement> = entity
            .properties
            .iter()
            .filter_map(|p| self.property_binding(p))
            .collect();
        let relationships = entity
            .relationships
            .iter()
            .filter(|r| r.is_mapped)
            .map(|r| self.relationship_binding(entity, r))
            .collect::<Result<Vec<_>, _>>()?;
        let indexes = entity
            .indexes
            .iter()
            .map(|i| self.index_binding(entity, i))
            .collect::<Result<Vec<_>, _>>()?;
        let alternate_keys = entity
            .unique_constraints
            .iter()
            .map(|uc| self.alternate_key_binding(entity, uc))
            .collect::<Result<Vec<_>, _>>()?;

        let mut statements = vec![table_binding(entity), self.key_binding(entity)];
        match self.ordering {
            StatementOrdering::PropertiesFirst => {
                statements.extend(properties);
                statements.extend(relationships);
                statements.extend(indexes);
                statements.extend(alternate_keys);
            }
            StatementOrdering::IndexesFirst => {
                statements.extend(indexes);
                statements.extend(alternate_keys);
                statements.extend(properties);
                statements.extend(relationships);
            }
        }

        let constants = self.include_constants.then(|| self.constants(entity));

        tracing::debug!(
            "{}: {} statements",
            entity.entity_class,
            statements.len()
        );

        Ok(MappingPlan {
            entity_class: entity.entity_class.clone(),
            entity_namespace: entity.entity_namespace.clone(),
            mapping_class: entity.mapping_class.clone(),
            mapping_namespace: entity.mapping_namespace.clone(),
            statements,
            constants,
        })
    }

    fn key_binding(&self, entity: &Entity) -> Statement {
        let columns: Vec<String> = entity
            .properties
            .iter()
            .filter(|p| p.is_primary_key)
            .map(|p| self.naming.property(&p.property_name))
            .collect();

        if columns.is_empty() {
            Statement::NoKey
        } else {
            Statement::Key { columns }
        }
    }

    /// `None` when the property needs no configuration at all.
    fn property_binding(&self, property: &Property) -> Option<Statement> {
        let directives = self.property_directives(property);
        if directives.is_empty() {
            return None;
        }
        Some(Statement::Property {
            property: self.naming.property(&property.property_name),
            directives,
        })
    }

    fn property_directives(&self, property: &Property) -> Vec<Directive> {
        let mut directives = Vec::new();
        let store_type = property.store_type.as_deref().filter(|s| !s.is_empty());
        let store_class = store_type.map_or(StoreTypeClass::Other, classify_store_type);

        if property.is_row_version {
            directives.push(Directive::RowVersion);
            directives.push(Directive::Required(true));
            directives.push(Directive::NumberToBytesConversion);
            directives.push(Directive::ColumnType(ROW_VERSION_STORE_TYPE.to_string()));
        }

        if self.naming.property(&property.property_name) != property.column_name {
            directives.push(Directive::ColumnName(property.column_name.clone()));
        }

        if let Some(store_type) = store_type {
            if store_class.needs_column_type() || property.is_hierarchy_id {
                directives.push(Directive::ColumnType(store_type.to_string()));
            }
        }

        if property.value_type.is_text() && store_class == StoreTypeClass::AnsiText {
            directives.push(Directive::Unicode(false));
            directives.push(Directive::Required(!property.is_nullable));
        }

        if property.value_type.is_sized() && !property.is_row_version && !property.is_hierarchy_id {
            if let Some(size) = property.size.filter(|&s| s > 0) {
                directives.push(Directive::MaxLength(size));
            }
        }

        if let Some(default) = property.default.as_deref().filter(|d| !d.trim().is_empty()) {
            directives.push(Directive::DefaultValueSql(
                strip_outer_parens(default).to_string(),
            ));
        }

        if !property.is_row_version {
            let generated = match property.value_generated {
                ValueGenerated::None => None,
                ValueGenerated::OnAdd => Some(Directive::ValueGeneratedOnAdd),
                ValueGenerated::OnAddOrUpdate => Some(Directive::ValueGeneratedOnAddOrUpdate),
                ValueGenerated::OnUpdate => Some(Directive::ValueGeneratedOnUpdate),
            };
            if let Some(generated) = generated {
                if let Some(sql) = property.computed_sql.as_deref().filter(|s| !s.is_empty()) {
                    directives.push(Directive::ComputedColumnSql(sql.to_string()));
                }
                directives.push(generated);
            }
        }

        directives
    }

    fn relationship_binding(
        &self,
        entity: &Entity,
        relationship: &Relationship,
    ) -> Result<Statement, GenError> {
        let label = relationship_label(relationship);
        if relationship.properties.is_empty() {
            return Err(GenError::invalid(
                &entity.entity_class,
                format!("relationship {label} has no foreign key properties"),
            ));
        }

        let principal = self
            .schema
            .entity(&relationship.primary_entity)
            .ok_or_else(|| {
                GenError::invalid(
                    &entity.entity_class,
                    format!(
                        "relationship {label} references unknown entity '{}'",
                        relationship.primary_entity
                    ),
                )
            })?;

        let foreign_key = relationship
            .properties
            .iter()
            .map(|name| match entity.property(name) {
                Some(p) => Ok(self.naming.foreign_key(&p.property_name)),
                None => Err(GenError::invalid(
                    &entity.entity_class,
                    format!("relationship {label} references unknown property '{name}'"),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let predicted = predict::foreign_key_name(
            entity.table_schema.as_deref(),
            &entity.table_name,
            &principal.table_name,
        );
        let constraint_name = relationship
            .relationship_name
            .as_deref()
            .filter(|name| predict::needs_override(name, predicted.as_deref()))
            .map(str::to_string);

        Ok(Statement::Relationship {
            navigation: self
                .naming
                .navigation(&relationship.property_name, Cardinality::One),
            cardinality: relationship.primary_cardinality,
            principal_navigation: self.naming.navigation(
                &relationship.primary_property_name,
                relationship.primary_cardinality,
            ),
            foreign_key,
            one_to_one: relationship.is_one_to_one,
            constraint_name,
        })
    }

    fn index_binding(&self, entity: &Entity, index: &Index) -> Result<Statement, GenError> {
        let columns = self.resolve_columns(entity, "index", &index.name, &index.columns)?;
        let predicted = predict::index_name(&entity.table_name, &index.columns);
        let name = predict::needs_override(&index.name, predicted.as_deref())
            .then(|| index.name.clone());

        Ok(Statement::Index {
            columns,
            name,
            filter: index.filter.clone().filter(|f| !f.trim().is_empty()),
            unique: index.is_unique,
        })
    }

    fn alternate_key_binding(
        &self,
        entity: &Entity,
        constraint: &UniqueConstraint,
    ) -> Result<Statement, GenError> {
        let columns =
            self.resolve_columns(entity, "unique constraint", &constraint.name, &constraint.columns)?;
        Ok(Statement::AlternateKey {
            columns,
            name: constraint.name.clone(),
        })
    }

    /// Map index column names to property identifiers, preserving order.
    fn resolve_columns(
        &self,
        entity: &Entity,
        kind: &str,
        name: &str,
        columns: &[String],
    ) -> Result<Vec<String>, GenError> {
        if columns.is_empty() {
            return Err(GenError::invalid(
                &entity.entity_class,
                format!("{kind} '{name}' has no columns"),
            ));
        }
        columns
            .iter()
            .map(|column| match entity.property_for_column(column) {
                Some(p) => Ok(self.naming.property(&p.property_name)),
                None => Err(GenError::invalid(
                    &entity.entity_class,
                    format!("{kind} '{name}' references unknown column '{column}'"),
                )),
            })
            .collect()
    }

    fn constants(&self, entity: &Entity) -> TableConstants {
        TableConstants {
            schema: entity.table_schema.clone().filter(|s| !s.is_empty()),
            name: entity.table_name.clone(),
            columns: entity
                .properties
                .iter()
                .map(|p| (self.naming.property(&p.property_name), p.column_name.clone()))
                .collect(),
        }
    }
}

fn table_binding(entity: &Entity) -> Statement {
    let name = entity.table_name.clone();
    let schema = entity.table_schema.clone().filter(|s| !s.is_empty());
    if entity.is_view {
        Statement::View { name, schema }
    } else {
        Statement::Table { name, schema }
    }
}

fn check_unique_properties(entity: &Entity) -> Result<(), GenError> {
    let mut seen = BTreeSet::new();
    for property in &entity.properties {
        if !seen.insert(property.property_name.as_str()) {
            return Err(GenError::invalid(
                &entity.entity_class,
                format!("duplicate property '{}'", property.property_name),
            ));
        }
    }
    Ok(())
}

fn relationship_label(relationship: &Relationship) -> String {
    match relationship.relationship_name.as_deref() {
        Some(name) if !name.is_empty() => format!("'{name}'"),
        _ => format!(
            "'{}' -> {}",
            relationship.property_name, relationship.primary_entity
        ),
    }
}
