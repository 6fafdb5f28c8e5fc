use serde::{Deserialize, Deserializer, Serialize};

/// Semantic category of a property's CLR type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ValueType {
    Text,
    Binary,
    Numeric,
    #[default]
    Other,
}

impl ValueType {
    pub fn is_text(self) -> bool {
        self == ValueType::Text
    }

    /// Text or binary: the types a max length applies to.
    pub fn is_sized(self) -> bool {
        matches!(self, ValueType::Text | ValueType::Binary)
    }
}

/// Resolve a CLR type name (e.g. `System.String`, `byte[]`, `int?`) to its category.
///
/// Category names (`text`, `binary`, `numeric`, `other`) are accepted as well so a
/// serialized schema reads back unchanged.
pub fn value_type_for_clr(name: &str) -> ValueType {
    let trimmed = name.trim();
    let bare = trimmed.strip_prefix("System.").unwrap_or(trimmed);
    let bare = bare.strip_suffix('?').unwrap_or(bare);

    match bare.to_ascii_lowercase().as_str() {
        "string" | "text" => ValueType::Text,
        "byte[]" | "binary" => ValueType::Binary,
        "byte" | "sbyte" | "short" | "int16" | "ushort" | "uint16" | "int" | "int32" | "uint"
        | "uint32" | "long" | "int64" | "ulong" | "uint64" | "float" | "single" | "double"
        | "decimal" | "numeric" => ValueType::Numeric,
        _ => ValueType::Other,
    }
}

pub fn deserialize_value_type<'de, D>(deserializer: D) -> Result<ValueType, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(value_type_for_clr(&name))
}

/// How a native store type affects the mapping directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreTypeClass {
    Decimal,
    DateTime,
    HierarchyId,
    /// Non-Unicode character types (`varchar`, `char`, `text`).
    AnsiText,
    Other,
}

impl StoreTypeClass {
    /// Store types that must be spelled out with `HasColumnType`.
    pub fn needs_column_type(self) -> bool {
        matches!(
            self,
            StoreTypeClass::Decimal | StoreTypeClass::DateTime | StoreTypeClass::HierarchyId
        )
    }
}

/// Classify a native store type such as `decimal(18, 2)` or `varchar(50)`.
pub fn classify_store_type(store_type: &str) -> StoreTypeClass {
    let lowered = store_type.trim().to_ascii_lowercase();
    let base = lowered
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or("");

    match base {
        "decimal" | "numeric" | "money" | "smallmoney" => StoreTypeClass::Decimal,
        "date" | "datetime" | "datetime2" | "datetimeoffset" | "smalldatetime" | "time" => {
            StoreTypeClass::DateTime
        }
        "hierarchyid" => StoreTypeClass::HierarchyId,
        "varchar" | "char" | "text" => StoreTypeClass::AnsiText,
        _ => StoreTypeClass::Other,
    }
}
