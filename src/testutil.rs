use crate::schema::{Cardinality, Entity, Property, Relationship, Schema, ValueGenerated};
use crate::typemap::ValueType;

/// Create a Property with sensible defaults for testing.
/// Returns a non-nullable int column whose column name equals the property name.
pub fn test_property(name: &str) -> Property {
    Property {
        property_name: name.to_string(),
        column_name: name.to_string(),
        value_type: ValueType::Numeric,
        store_type: Some("int".to_string()),
        is_nullable: false,
        size: None,
        default: None,
        computed_sql: None,
        is_primary_key: false,
        is_row_version: false,
        is_hierarchy_id: false,
        value_generated: ValueGenerated::None,
    }
}

/// A nullable `nvarchar` text property of the given size.
pub fn test_text_property(name: &str, size: i32) -> Property {
    Property {
        value_type: ValueType::Text,
        store_type: Some(format!("nvarchar({size})")),
        is_nullable: true,
        size: Some(size),
        ..test_property(name)
    }
}

/// Create an empty table entity in schema `dbo` with a `{class}Map` mapping class.
pub fn test_entity(class: &str, table: &str) -> Entity {
    Entity {
        entity_class: class.to_string(),
        entity_namespace: "Tracker.Data.Entities".to_string(),
        mapping_class: format!("{class}Map"),
        mapping_namespace: "Tracker.Data.Mapping".to_string(),
        table_name: table.to_string(),
        table_schema: Some("dbo".to_string()),
        is_view: false,
        properties: vec![],
        relationships: vec![],
        indexes: vec![],
        unique_constraints: vec![],
    }
}

pub fn test_relationship(
    navigation: &str,
    principal: &str,
    principal_navigation: &str,
    cardinality: Cardinality,
    keys: &[&str],
) -> Relationship {
    Relationship {
        property_name: navigation.to_string(),
        primary_entity: principal.to_string(),
        primary_property_name: principal_navigation.to_string(),
        primary_cardinality: cardinality,
        is_one_to_one: false,
        properties: keys.iter().map(|k| k.to_string()).collect(),
        relationship_name: None,
        is_mapped: true,
    }
}

/// `Customer` (table `Customers`) and `Order` (table `Orders`), with `Order`
/// depending on `Customer` through `CustomerId`.
pub fn order_schema() -> Schema {
    let customer = Entity {
        properties: vec![
            Property {
                is_primary_key: true,
                value_generated: ValueGenerated::OnAdd,
                ..test_property("CustomerId")
            },
            test_text_property("Name", 100),
        ],
        ..test_entity("Customer", "Customers")
    };

    let order = Entity {
        properties: vec![
            Property {
                is_primary_key: true,
                value_generated: ValueGenerated::OnAdd,
                ..test_property("OrderId")
            },
            test_property("CustomerId"),
        ],
        relationships: vec![Relationship {
            relationship_name: Some("FK_dbo_Orders_Customer".to_string()),
            ..test_relationship("Customer", "Customer", "Orders", Cardinality::One, &["CustomerId"])
        }],
        ..test_entity("Order", "Orders")
    };

    Schema {
        entities: vec![customer, order],
    }
}
