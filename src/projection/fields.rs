//! Top-level field projection.
//!
//! A comma-separated `fields` parameter restricts which top-level attributes
//! of a view survive. It is a plain projection list, not a query language:
//! unknown names are ignored and nesting is not supported.

use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection(Option<Vec<String>>);

impl FieldSelection {
    /// No restriction; the full view is returned.
    pub fn all() -> Self {
        Self(None)
    }

    pub fn from_param(param: Option<&str>) -> Self {
        let fields: Option<Vec<String>> = param.map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect()
        });
        match fields {
            Some(list) if list.is_empty() => Self(None),
            other => Self(other),
        }
    }

    pub fn apply(&self, view: Value) -> Value {
        let Some(fields) = &self.0 else {
            return view;
        };
        let Value::Object(map) = view else {
            return view;
        };
        Value::Object(
            map.into_iter()
                .filter(|(key, _)| fields.iter().any(|f| f == key))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn no_selection_returns_the_full_view() {
        let view = json!({"id": 1, "status": "pending"});
        assert_eq!(FieldSelection::all().apply(view.clone()), view);
        assert_eq!(FieldSelection::from_param(None).apply(view.clone()), view);
    }

    #[test]
    fn selection_keeps_only_named_top_level_keys() {
        let view = json!({"id": 1, "status": "pending", "note": "hi"});
        let projected = FieldSelection::from_param(Some("id,status")).apply(view);
        assert_eq!(projected, json!({"id": 1, "status": "pending"}));
    }

    #[test]
    fn unknown_field_names_are_ignored() {
        let view = json!({"id": 1});
        let projected = FieldSelection::from_param(Some("id,nope")).apply(view);
        assert_eq!(projected, json!({"id": 1}));
    }

    #[test]
    fn blank_param_means_no_restriction() {
        let view = json!({"id": 1});
        assert_eq!(
            FieldSelection::from_param(Some(" , ")).apply(view.clone()),
            view
        );
    }

    #[test]
    fn non_object_values_pass_through() {
        let value = json!(["a", "b"]);
        assert_eq!(
            FieldSelection::from_param(Some("id")).apply(value.clone()),
            value
        );
    }
}
