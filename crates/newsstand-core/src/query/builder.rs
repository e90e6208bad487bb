//! Condition builder.
//!
//! Turns a [`MappingSet`] and a bag of [`RequestParams`] into a parameterized
//! statement. Values never reach the query text; each condition carries
//! exactly one `?` placeholder group and contributes exactly one parameter.

use super::mapping::{FieldMapping, MappingSet};
use super::normalize::normalize;
use super::params::RequestParams;
use crate::error::MappingError;
use crate::value::Value;

/// One generated `WHERE` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Clause text, e.g. `house IN(?)`.
    pub clause: String,
    /// Normalized parameter consumed by the clause placeholder.
    pub value: Value,
}

impl Condition {
    /// Build the condition for one mapped field.
    pub fn new(mapping: &FieldMapping, value: &Value) -> Self {
        Self {
            clause: mapping.clause(),
            value: normalize(value, mapping),
        }
    }
}

/// A statement with positional parameters.
///
/// `params[i]` binds the `i`-th placeholder group of `sql`. A membership
/// condition binds a single [`Value::List`] to its `IN(?)` group.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    /// Statement text with `?` placeholders.
    pub sql: String,
    /// Parameters in placeholder order.
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Create a query with no conditions.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Expand list parameters into one placeholder per element.
    ///
    /// `house IN(?)` bound to `[1, 2, 3]` becomes `house IN(?, ?, ?)` bound to
    /// `1, 2, 3`. An empty list becomes `IN(NULL)`, which matches no row.
    pub fn expand(&self) -> BuiltQuery {
        let mut sql = String::with_capacity(self.sql.len());
        let mut params = Vec::with_capacity(self.params.len());
        let mut values = self.params.iter();

        for ch in self.sql.chars() {
            if ch != '?' {
                sql.push(ch);
                continue;
            }

            match values.next() {
                Some(Value::List(items)) if items.is_empty() => sql.push_str("NULL"),
                Some(Value::List(items)) => {
                    sql.push_str(&vec!["?"; items.len()].join(", "));
                    params.extend(items.iter().cloned());
                }
                Some(value) => {
                    sql.push('?');
                    params.push(value.clone());
                }
                None => sql.push('?'),
            }
        }

        BuiltQuery { sql, params }
    }
}

/// Append the conditions for `params` to the `base` statement.
///
/// Conditions follow the insertion order of `params` and are joined with
/// `AND`. With no parameters the base statement is returned unchanged. A
/// parameter without a mapping fails the whole build.
pub fn build(
    base: &str,
    mappings: &MappingSet,
    params: &RequestParams,
) -> Result<BuiltQuery, MappingError> {
    let conditions = params
        .iter()
        .map(|(name, value)| {
            mappings
                .get(name)
                .map(|mapping| Condition::new(mapping, value))
                .ok_or_else(|| MappingError::UnknownField(name.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if conditions.is_empty() {
        return Ok(BuiltQuery::new(base));
    }

    let clauses: Vec<&str> = conditions.iter().map(|c| c.clause.as_str()).collect();
    let sql = format!("{} WHERE {}", base, clauses.join(" AND "));
    let params = conditions.into_iter().map(|c| c.value).collect();

    Ok(BuiltQuery { sql, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_summary_mappings() -> MappingSet {
        MappingSet::new()
            .field("house", FieldMapping::membership("house"))
            .field("id", "item")
    }

    fn realm_mappings() -> MappingSet {
        MappingSet::new()
            .field("realmId", "blizzId")
            .field("region", "region")
            .field("realm", "slug")
            .field("house", "house")
    }

    #[test]
    fn test_price_summary_scenario() {
        let params = RequestParams::new()
            .with("house", vec![101, 205, 101])
            .with("id", "775");

        let query =
            build("SELECT * FROM tblItemSummary", &item_summary_mappings(), &params).unwrap();

        assert_eq!(query.sql, "SELECT * FROM tblItemSummary WHERE house IN(?) AND item = ?");
        assert_eq!(query.params, vec![Value::from(vec![101, 205]), Value::from("775")]);
    }

    #[test]
    fn test_empty_params_leave_base_unchanged() {
        let query =
            build("SELECT house FROM tblRealm", &realm_mappings(), &RequestParams::new()).unwrap();

        assert_eq!(query.sql, "SELECT house FROM tblRealm");
        assert!(query.params.is_empty());
    }

    #[test]
    fn test_conditions_follow_param_order() {
        let params = RequestParams::new()
            .with("realm", "silvermoon")
            .with("region", "eu");
        let query = build("SELECT house FROM tblRealm", &realm_mappings(), &params).unwrap();

        assert_eq!(query.sql, "SELECT house FROM tblRealm WHERE slug = ? AND region = ?");
        assert_eq!(query.params, vec![Value::from("silvermoon"), Value::from("eu")]);
    }

    #[test]
    fn test_param_count_matches_placeholders() {
        let params = RequestParams::new()
            .with("realmId", 3391)
            .with("region", "eu")
            .with("realm", "silvermoon")
            .with("house", 7);
        let query = build("SELECT house FROM tblRealm", &realm_mappings(), &params).unwrap();

        assert_eq!(query.params.len(), params.len());
        assert_eq!(query.sql.matches('?').count(), params.len());
        assert_eq!(query.params[0], Value::Int(3391));
        assert_eq!(query.params[3], Value::Int(7));
    }

    #[test]
    fn test_unknown_field_fails_fast() {
        let params = RequestParams::new().with("region", "eu").with("faction", "horde");
        let err = build("SELECT house FROM tblRealm", &realm_mappings(), &params).unwrap_err();

        assert_eq!(err, MappingError::UnknownField("faction".into()));
    }

    #[test]
    fn test_expand_membership_list() {
        let query = BuiltQuery {
            sql: "SELECT * FROM tblItemSummary WHERE house IN(?) AND item = ?".into(),
            params: vec![Value::from(vec![1, 2, 3]), Value::from("775")],
        };
        let expanded = query.expand();

        assert_eq!(
            expanded.sql,
            "SELECT * FROM tblItemSummary WHERE house IN(?, ?, ?) AND item = ?"
        );
        assert_eq!(
            expanded.params,
            vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::from("775")]
        );
    }

    #[test]
    fn test_expand_empty_membership() {
        let query = BuiltQuery {
            sql: "SELECT * FROM tblItemSummary WHERE house IN(?)".into(),
            params: vec![Value::List(vec![])],
        };
        let expanded = query.expand();

        assert_eq!(expanded.sql, "SELECT * FROM tblItemSummary WHERE house IN(NULL)");
        assert!(expanded.params.is_empty());
    }
}
