//! Default constraint and index names, used to decide whether a schema-supplied
//! name needs an explicit override.
//!
//! A `None` result means the default cannot be determined from the inputs. Callers
//! must then keep the explicit name.

use crate::naming::singularize;

/// `FK_{schema}_{table}_{singular principal table}`.
pub fn foreign_key_name(
    schema: Option<&str>,
    table: &str,
    principal_table: &str,
) -> Option<String> {
    let schema = schema.filter(|s| !s.is_empty())?;
    if table.is_empty() || principal_table.is_empty() {
        return None;
    }
    Some(format!(
        "FK_{schema}_{table}_{}",
        singularize(principal_table)
    ))
}

/// `IX_{table}_{col1}_{col2}...` over column names in index order.
pub fn index_name<S: AsRef<str>>(table: &str, columns: &[S]) -> Option<String> {
    if table.is_empty() || columns.is_empty() {
        return None;
    }
    let mut name = format!("IX_{table}");
    for column in columns {
        name.push('_');
        name.push_str(column.as_ref());
    }
    Some(name)
}

/// Whether `actual` must be emitted as an explicit name.
///
/// Empty names never need one; an undeterminable default always does.
pub fn needs_override(actual: &str, predicted: Option<&str>) -> bool {
    if actual.is_empty() {
        return false;
    }
    match predicted {
        Some(predicted) => predicted != actual,
        None => {
            tracing::debug!("No default name to compare against '{actual}', keeping it explicit");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_key_name() {
        assert_eq!(
            foreign_key_name(Some("dbo"), "Orders", "Customers").as_deref(),
            Some("FK_dbo_Orders_Customer")
        );
        assert_eq!(
            foreign_key_name(Some("dbo"), "Orders", "Customer").as_deref(),
            Some("FK_dbo_Orders_Customer")
        );
    }

    #[test]
    fn test_foreign_key_name_ambiguous() {
        assert_eq!(foreign_key_name(None, "Orders", "Customers"), None);
        assert_eq!(foreign_key_name(Some(""), "Orders", "Customers"), None);
        assert_eq!(foreign_key_name(Some("dbo"), "", "Customers"), None);
    }

    #[test]
    fn test_index_name() {
        assert_eq!(
            index_name("Orders", &["CustomerId"]).as_deref(),
            Some("IX_Orders_CustomerId")
        );
        assert_eq!(
            index_name("Orders", &["CustomerId", "OrderDate"]).as_deref(),
            Some("IX_Orders_CustomerId_OrderDate")
        );
        assert_eq!(index_name::<&str>("Orders", &[]), None);
    }

    #[test]
    fn test_needs_override() {
        assert!(!needs_override("IX_Orders_CustomerId", Some("IX_Orders_CustomerId")));
        assert!(needs_override("IX_Customer", Some("IX_Orders_CustomerId")));
        assert!(needs_override("FK_Orders", None));
        assert!(!needs_override("", None));
    }
}
