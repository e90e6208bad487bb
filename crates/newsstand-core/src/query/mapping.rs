//! Declarative field-to-column mappings.
//!
//! A [`MappingSet`] describes how each logical request field of one queryable
//! entity turns into a `WHERE` condition. Sets are fixed and trusted; the
//! request parameters fed through them are not.

use std::collections::HashMap;

use crate::error::MappingError;

/// Comparison used by a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// `column = ?`
    Equals,
    /// `column IN(?)`, bound to a list.
    Membership,
    /// `column LIKE ?`
    Pattern,
}

impl MatchKind {
    /// Parse the descriptor name of a match kind.
    ///
    /// Unrecognized names yield `None`; callers fall back to [`MatchKind::Equals`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "equals" => Some(MatchKind::Equals),
            "in" => Some(MatchKind::Membership),
            "like" => Some(MatchKind::Pattern),
            _ => None,
        }
    }
}

/// How one logical field maps to a query condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMapping {
    /// Bare column name, compared with `=`.
    Shorthand(String),
    /// Column with an explicit match kind.
    Typed {
        /// Target column.
        column: String,
        /// Comparison to render.
        kind: MatchKind,
    },
}

impl FieldMapping {
    /// Equality on `column`.
    pub fn equals(column: impl Into<String>) -> Self {
        FieldMapping::Typed {
            column: column.into(),
            kind: MatchKind::Equals,
        }
    }

    /// Membership (`IN`) on `column`.
    pub fn membership(column: impl Into<String>) -> Self {
        FieldMapping::Typed {
            column: column.into(),
            kind: MatchKind::Membership,
        }
    }

    /// Pattern match (`LIKE`) on `column`.
    pub fn pattern(column: impl Into<String>) -> Self {
        FieldMapping::Typed {
            column: column.into(),
            kind: MatchKind::Pattern,
        }
    }

    /// Target column.
    pub fn column(&self) -> &str {
        match self {
            FieldMapping::Shorthand(column) | FieldMapping::Typed { column, .. } => column,
        }
    }

    /// Effective match kind. Shorthand mappings compare with `=`.
    pub fn kind(&self) -> MatchKind {
        match self {
            FieldMapping::Shorthand(_) => MatchKind::Equals,
            FieldMapping::Typed { kind, .. } => *kind,
        }
    }

    /// Render the condition clause for this mapping.
    pub fn clause(&self) -> String {
        let column = self.column();
        match self.kind() {
            MatchKind::Equals => format!("{} = ?", column),
            MatchKind::Membership => format!("{} IN(?)", column),
            MatchKind::Pattern => format!("{} LIKE ?", column),
        }
    }

    /// Parse a JSON descriptor: either a column string or
    /// `{"type": "equals" | "in" | "like", "name": "<column>"}`.
    pub fn from_descriptor(
        field: &str,
        descriptor: &serde_json::Value,
    ) -> Result<Self, MappingError> {
        match descriptor {
            serde_json::Value::String(column) => Ok(FieldMapping::Shorthand(column.clone())),
            serde_json::Value::Object(object) => {
                let column = object
                    .get("name")
                    .and_then(serde_json::Value::as_str)
                    .ok_or_else(|| MappingError::malformed(field, "missing column `name`"))?;
                let kind = object
                    .get("type")
                    .and_then(serde_json::Value::as_str)
                    .and_then(MatchKind::from_name)
                    .unwrap_or(MatchKind::Equals);

                Ok(FieldMapping::Typed {
                    column: column.to_string(),
                    kind,
                })
            }
            other => Err(MappingError::malformed(
                field,
                format!("expected a column name or an object, got {}", other),
            )),
        }
    }
}

impl From<&str> for FieldMapping {
    fn from(column: &str) -> Self {
        FieldMapping::Shorthand(column.to_string())
    }
}

impl From<String> for FieldMapping {
    fn from(column: String) -> Self {
        FieldMapping::Shorthand(column)
    }
}

/// Field mappings for one queryable entity, keyed by logical field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    fields: HashMap<String, FieldMapping>,
}

impl MappingSet {
    /// Create an empty mapping set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field mapping.
    pub fn field(mut self, name: impl Into<String>, mapping: impl Into<FieldMapping>) -> Self {
        self.fields.insert(name.into(), mapping.into());
        self
    }

    /// Parse a mapping set from a JSON object of descriptors.
    pub fn from_json(descriptors: &serde_json::Value) -> Result<Self, MappingError> {
        let object = descriptors
            .as_object()
            .ok_or_else(|| MappingError::malformed("<root>", "expected an object of descriptors"))?;

        let mut set = MappingSet::new();
        for (name, descriptor) in object {
            let mapping = FieldMapping::from_descriptor(name, descriptor)?;
            set.fields.insert(name.clone(), mapping);
        }
        Ok(set)
    }

    /// Look up the mapping of a logical field.
    pub fn get(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.get(name)
    }

    /// Number of mapped fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the set maps no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shorthand_matches_explicit_equals() {
        let shorthand = FieldMapping::from("slug");
        let explicit = FieldMapping::equals("slug");

        assert_eq!(shorthand.clause(), "slug = ?");
        assert_eq!(shorthand.clause(), explicit.clause());
    }

    #[test]
    fn test_clause_rendering() {
        assert_eq!(FieldMapping::membership("house").clause(), "house IN(?)");
        assert_eq!(FieldMapping::pattern("name_enus").clause(), "name_enus LIKE ?");
    }

    #[test]
    fn test_from_json_descriptors() {
        let set = MappingSet::from_json(&json!({
            "house": { "type": "in", "name": "house" },
            "id": "item",
            "name": { "type": "like", "name": "name_enus" },
        }))
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.get("house"), Some(&FieldMapping::membership("house")));
        assert_eq!(set.get("id"), Some(&FieldMapping::Shorthand("item".into())));
        assert_eq!(set.get("name").unwrap().kind(), MatchKind::Pattern);
    }

    #[test]
    fn test_unknown_type_falls_back_to_equals() {
        let mapping =
            FieldMapping::from_descriptor("realm", &json!({ "type": "between", "name": "slug" }))
                .unwrap();
        assert_eq!(mapping.clause(), "slug = ?");

        let untyped = FieldMapping::from_descriptor("realm", &json!({ "name": "slug" })).unwrap();
        assert_eq!(untyped.kind(), MatchKind::Equals);
    }

    #[test]
    fn test_malformed_descriptors_rejected() {
        let err = FieldMapping::from_descriptor("realm", &json!(42)).unwrap_err();
        assert!(matches!(
            err,
            MappingError::MalformedDescriptor { ref field, .. } if field == "realm"
        ));

        let err = FieldMapping::from_descriptor("realm", &json!({ "type": "in" })).unwrap_err();
        assert!(matches!(err, MappingError::MalformedDescriptor { .. }));

        assert!(MappingSet::from_json(&json!(["house"])).is_err());
    }
}
