use serde::Serialize;

use crate::schema::Cardinality;

/// One renderer-independent unit of mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Table {
        name: String,
        schema: Option<String>,
    },
    View {
        name: String,
        schema: Option<String>,
    },
    NoKey,
    Key {
        columns: Vec<String>,
    },
    Property {
        property: String,
        directives: Vec<Directive>,
    },
    Relationship {
        navigation: String,
        cardinality: Cardinality,
        principal_navigation: String,
        foreign_key: Vec<String>,
        one_to_one: bool,
        constraint_name: Option<String>,
    },
    Index {
        columns: Vec<String>,
        name: Option<String>,
        filter: Option<String>,
        unique: bool,
    },
    AlternateKey {
        columns: Vec<String>,
        name: String,
    },
}

/// A single constraint applied to a property binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Directive {
    RowVersion,
    Required(bool),
    /// `ulong` to `byte[]` conversion used for row-version columns.
    NumberToBytesConversion,
    ColumnType(String),
    ColumnName(String),
    Unicode(bool),
    MaxLength(i32),
    DefaultValueSql(String),
    ComputedColumnSql(String),
    ValueGeneratedOnAdd,
    ValueGeneratedOnAddOrUpdate,
    ValueGeneratedOnUpdate,
}

impl Statement {
    /// Section comment the renderer groups this statement under.
    pub fn section(&self) -> &'static str {
        match self {
            Statement::Table { .. } | Statement::View { .. } => "table",
            Statement::NoKey | Statement::Key { .. } => "key",
            Statement::Property { .. } => "properties",
            Statement::Relationship { .. } => "relationships",
            Statement::Index { .. } => "indexes",
            Statement::AlternateKey { .. } => "alternate keys",
        }
    }
}

/// Nested `Table` / `Columns` constant structs for a mapping class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableConstants {
    pub schema: Option<String>,
    pub name: String,
    /// (property identifier, column name) in declaration order.
    pub columns: Vec<(String, String)>,
}

/// Everything needed to render one entity's mapping class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingPlan {
    pub entity_class: String,
    pub entity_namespace: String,
    pub mapping_class: String,
    pub mapping_namespace: String,
    pub statements: Vec<Statement>,
    pub constants: Option<TableConstants>,
}

impl MappingPlan {
    pub fn has_row_version(&self) -> bool {
        self.statements.iter().any(|s| match s {
            Statement::Property { directives, .. } => {
                directives.contains(&Directive::NumberToBytesConversion)
            }
            _ => false,
        })
    }
}
