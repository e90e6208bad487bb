//! Parameter normalization per match kind.

use super::mapping::{FieldMapping, MatchKind};
use crate::value::Value;

/// Coerce a request value into the parameter shape its mapping binds.
///
/// Equality and pattern conditions bind the value unchanged. Membership
/// conditions bind a list: nulls are dropped and duplicates collapse onto
/// their first occurrence. A scalar is treated as a one-element list. An
/// empty list is legal and matches nothing.
pub fn normalize(value: &Value, mapping: &FieldMapping) -> Value {
    match mapping.kind() {
        MatchKind::Equals | MatchKind::Pattern => value.clone(),
        MatchKind::Membership => {
            let items = match value {
                Value::List(items) => items.as_slice(),
                other => std::slice::from_ref(other),
            };

            let mut unique: Vec<Value> = Vec::with_capacity(items.len());
            for item in items.iter().filter(|v| !v.is_null()) {
                if !unique.contains(item) {
                    unique.push(item.clone());
                }
            }
            Value::List(unique)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[Option<i64>]) -> Value {
        Value::List(values.iter().map(|v| Value::from(*v)).collect())
    }

    #[test]
    fn test_membership_drops_nulls_and_duplicates() {
        let mapping = FieldMapping::membership("house");
        let value = ints(&[Some(3), None, Some(3), Some(5), None]);

        assert_eq!(normalize(&value, &mapping), Value::from(vec![3, 5]));
    }

    #[test]
    fn test_membership_is_idempotent() {
        let mapping = FieldMapping::membership("house");
        let once = normalize(&ints(&[Some(9), Some(1), Some(9), None, Some(4)]), &mapping);
        let twice = normalize(&once, &mapping);

        assert_eq!(once, Value::from(vec![9, 1, 4]));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_membership_keeps_first_occurrence_order() {
        let mapping = FieldMapping::membership("house");
        let value = Value::from(vec!["b", "a", "b", "c", "a"]);

        assert_eq!(normalize(&value, &mapping), Value::from(vec!["b", "a", "c"]));
    }

    #[test]
    fn test_membership_empty_after_filtering() {
        let mapping = FieldMapping::membership("house");
        assert_eq!(normalize(&ints(&[None, None]), &mapping), Value::List(vec![]));
    }

    #[test]
    fn test_membership_wraps_scalar() {
        let mapping = FieldMapping::membership("house");
        assert_eq!(normalize(&Value::Int(12), &mapping), Value::from(vec![12]));
        assert_eq!(normalize(&Value::Null, &mapping), Value::List(vec![]));
    }

    #[test]
    fn test_equality_and_pattern_pass_through() {
        let value = Value::from(vec![1, 1]);
        assert_eq!(normalize(&value, &FieldMapping::from("house")), value);
        assert_eq!(
            normalize(&Value::from("%ore%"), &FieldMapping::pattern("name")),
            Value::from("%ore%")
        );
        assert_eq!(normalize(&Value::Null, &FieldMapping::equals("house")), Value::Null);
    }
}
