use std::fmt;
use std::str::FromStr;

use crate::error::GenError;
use crate::schema::Cardinality;

/// Character that marks an identifier as already formatted by the caller.
const WORD_SEPARATOR: char = '_';

/// How navigation and foreign-key identifiers are derived from raw names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelationshipNaming {
    /// Strip the entity suffix; separator-delimited names keep their case.
    Suffix,
    /// Strip the entity suffix and always PascalCase.
    #[default]
    Plural,
}

impl FromStr for RelationshipNaming {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" => Ok(RelationshipNaming::Suffix),
            "plural" => Ok(RelationshipNaming::Plural),
            other => Err(GenError::PolicyMisconfiguration(format!(
                "unknown relationship naming mode '{other}' (expected 'suffix' or 'plural')"
            ))),
        }
    }
}

impl fmt::Display for RelationshipNaming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipNaming::Suffix => f.write_str("suffix"),
            RelationshipNaming::Plural => f.write_str("plural"),
        }
    }
}

/// Naming options shared by every entity in a run.
#[derive(Debug, Clone, Default)]
pub struct NamingConfig {
    /// Entity type suffix stripped from navigation and foreign-key names (e.g. "Entity").
    pub suffix: String,
    pub relationship_naming: RelationshipNaming,
}

impl NamingConfig {
    pub fn validate(&self) -> Result<(), GenError> {
        if self.relationship_naming == RelationshipNaming::Suffix && self.suffix.trim().is_empty() {
            return Err(GenError::PolicyMisconfiguration(
                "relationship naming mode 'suffix' requires a non-empty suffix".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate the configuration and build the matching policy.
    pub fn policy(&self) -> Result<Box<dyn NamingPolicy>, GenError> {
        self.validate()?;
        let suffix = self.suffix.trim().to_string();
        Ok(match self.relationship_naming {
            RelationshipNaming::Suffix => Box::new(SuffixNaming { suffix }),
            RelationshipNaming::Plural => Box::new(PluralNaming { suffix }),
        })
    }
}

/// Maps raw metadata names to the identifiers used in generated expressions.
///
/// The entity class generator must use the same policy, otherwise the lambdas in
/// the mapping class will not compile against the generated properties.
pub trait NamingPolicy: fmt::Debug {
    /// Scalar property reference (keys, property bindings, index columns).
    fn property(&self, raw: &str) -> String;

    /// Property reference inside a `HasForeignKey` expression.
    fn foreign_key(&self, raw: &str) -> String;

    /// Navigation property, inflected for the cardinality of its own side.
    fn navigation(&self, raw: &str, cardinality: Cardinality) -> String;
}

#[derive(Debug, Clone)]
pub struct SuffixNaming {
    suffix: String,
}

impl NamingPolicy for SuffixNaming {
    fn property(&self, raw: &str) -> String {
        preserve_or_pascalize(raw)
    }

    fn foreign_key(&self, raw: &str) -> String {
        resolve_identifier(raw, &self.suffix)
    }

    fn navigation(&self, raw: &str, cardinality: Cardinality) -> String {
        preserve_or_pascalize(&inflect(strip_suffix(raw, &self.suffix), cardinality))
    }
}

#[derive(Debug, Clone)]
pub struct PluralNaming {
    suffix: String,
}

impl NamingPolicy for PluralNaming {
    fn property(&self, raw: &str) -> String {
        to_safe_name(&pascalize(raw))
    }

    fn foreign_key(&self, raw: &str) -> String {
        to_safe_name(&pascalize(strip_suffix(raw, &self.suffix)))
    }

    fn navigation(&self, raw: &str, cardinality: Cardinality) -> String {
        to_safe_name(&pascalize(&inflect(
            strip_suffix(raw, &self.suffix),
            cardinality,
        )))
    }
}

/// Strip an entity suffix, then case-normalize unless the name is separator-delimited.
pub fn resolve_identifier(raw: &str, suffix: &str) -> String {
    preserve_or_pascalize(strip_suffix(raw, suffix))
}

/// Remove a trailing suffix (its plural form first). Never strips down to nothing.
pub fn strip_suffix<'a>(raw: &'a str, suffix: &str) -> &'a str {
    if suffix.is_empty() {
        return raw;
    }
    let plural = pluralize(suffix);
    let stripped = raw
        .strip_suffix(plural.as_str())
        .or_else(|| raw.strip_suffix(suffix))
        .unwrap_or(raw);

    if stripped.is_empty() {
        raw
    } else {
        stripped
    }
}

fn preserve_or_pascalize(name: &str) -> String {
    if name.contains(WORD_SEPARATOR) {
        to_safe_name(name)
    } else {
        to_safe_name(&pascalize(name))
    }
}

/// Many-side navigations are pluralized; one-side names are taken as given.
fn inflect(name: &str, cardinality: Cardinality) -> String {
    match cardinality {
        Cardinality::One => name.to_string(),
        Cardinality::Many => pluralize(name),
    }
}

/// Make a string usable as a C# identifier.
///
/// Invalid characters become `_`, and a leading digit gets a `_` prefix.
pub fn to_safe_name(name: &str) -> String {
    let mut safe: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == WORD_SEPARATOR {
                c
            } else {
                WORD_SEPARATOR
            }
        })
        .collect();

    if safe.is_empty() || safe.starts_with(|c: char| c.is_ascii_digit()) {
        safe.insert(0, WORD_SEPARATOR);
    }
    safe
}

/// Uppercase the first letter of each `_` or whitespace delimited segment and join them.
/// The rest of each segment keeps its case, so `CustomerID` stays `CustomerID`.
pub fn pascalize(name: &str) -> String {
    name.split(|c: char| c == WORD_SEPARATOR || c.is_whitespace())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn pluralize(word: &str) -> String {
    pluralizer::pluralize(word, 2, false)
}

pub fn singularize(word: &str) -> String {
    pluralizer::pluralize(word, 1, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix_policy(suffix: &str) -> Box<dyn NamingPolicy> {
        NamingConfig {
            suffix: suffix.to_string(),
            relationship_naming: RelationshipNaming::Suffix,
        }
        .policy()
        .unwrap()
    }

    fn plural_policy(suffix: &str) -> Box<dyn NamingPolicy> {
        NamingConfig {
            suffix: suffix.to_string(),
            relationship_naming: RelationshipNaming::Plural,
        }
        .policy()
        .unwrap()
    }

    #[test]
    fn test_strip_suffix() {
        assert_eq!(strip_suffix("CustomerEntity", "Entity"), "Customer");
        assert_eq!(strip_suffix("OrderEntities", "Entity"), "Order");
        assert_eq!(strip_suffix("Customer", "Entity"), "Customer");
        assert_eq!(strip_suffix("Entity", "Entity"), "Entity");
        assert_eq!(strip_suffix("CustomerEntity", ""), "CustomerEntity");
    }

    #[test]
    fn test_resolve_identifier() {
        assert_eq!(resolve_identifier("CustomerEntity", "Entity"), "Customer");
        assert_eq!(resolve_identifier("customer", ""), "Customer");
        assert_eq!(resolve_identifier("ship_to", ""), "ship_to");
        assert_eq!(resolve_identifier("order date", ""), "OrderDate");
    }

    #[test]
    fn test_to_safe_name() {
        assert_eq!(to_safe_name("Order Date"), "Order_Date");
        assert_eq!(to_safe_name("1stPlace"), "_1stPlace");
        assert_eq!(to_safe_name("OrderId"), "OrderId");
        assert_eq!(to_safe_name(""), "_");
    }

    #[test]
    fn test_pascalize_keeps_inner_case() {
        assert_eq!(pascalize("CustomerID"), "CustomerID");
        assert_eq!(pascalize("XMLData"), "XMLData");
        assert_eq!(pascalize("customerId"), "CustomerId");
        assert_eq!(pascalize("order_line_ID"), "OrderLineID");
        assert_eq!(pascalize("order  date"), "OrderDate");
        assert_eq!(pascalize(""), "");
    }

    #[test]
    fn test_policies_keep_acronyms() {
        let plural = plural_policy("");
        assert_eq!(plural.property("CustomerID"), "CustomerID");
        assert_eq!(plural.foreign_key("CustomerID"), "CustomerID");
        assert_eq!(plural.navigation("OrderXML", Cardinality::One), "OrderXML");

        let suffix = suffix_policy("Entity");
        assert_eq!(suffix.property("CustomerID"), "CustomerID");
        assert_eq!(suffix.foreign_key("CustomerEntityID"), "CustomerEntityID");
    }

    #[test]
    fn test_inflection() {
        assert_eq!(pluralize("Order"), "Orders");
        assert_eq!(pluralize("Entity"), "Entities");
        assert_eq!(singularize("Customers"), "Customer");
        assert_eq!(singularize("Customer"), "Customer");
    }

    #[test]
    fn test_relationship_naming_from_str() {
        assert_eq!(
            "suffix".parse::<RelationshipNaming>().unwrap(),
            RelationshipNaming::Suffix
        );
        assert_eq!(
            " Plural ".parse::<RelationshipNaming>().unwrap(),
            RelationshipNaming::Plural
        );
        let err = "snake".parse::<RelationshipNaming>().unwrap_err();
        assert!(matches!(err, GenError::PolicyMisconfiguration(_)));
    }

    #[test]
    fn test_suffix_mode_requires_suffix() {
        let config = NamingConfig {
            suffix: "  ".to_string(),
            relationship_naming: RelationshipNaming::Suffix,
        };
        assert!(matches!(
            config.validate(),
            Err(GenError::PolicyMisconfiguration(_))
        ));

        let plural = NamingConfig::default();
        assert!(plural.validate().is_ok());
    }

    #[test]
    fn test_suffix_policy_keeps_separated_names() {
        let policy = suffix_policy("Entity");
        assert_eq!(policy.property("customer_id"), "customer_id");
        assert_eq!(policy.property("customerId"), "CustomerId");
        assert_eq!(policy.foreign_key("CustomerEntity"), "Customer");
        assert_eq!(policy.navigation("order_lines", Cardinality::Many), "order_lines");
        assert_eq!(policy.navigation("CustomerEntity", Cardinality::One), "Customer");
        assert_eq!(policy.navigation("OrderEntity", Cardinality::Many), "Orders");
    }

    #[test]
    fn test_plural_policy_always_pascalizes() {
        let policy = plural_policy("Entity");
        assert_eq!(policy.property("customer_id"), "CustomerId");
        assert_eq!(policy.foreign_key("customer_id"), "CustomerId");
        assert_eq!(policy.navigation("order_line", Cardinality::Many), "OrderLines");
        assert_eq!(policy.navigation("billing_address", Cardinality::One), "BillingAddress");
        assert_eq!(policy.navigation("Orders", Cardinality::One), "Orders");
        assert_eq!(policy.navigation("Orders", Cardinality::Many), "Orders");
    }
}
