//! Equality filters with optional single-field ordering.

use std::cmp::Ordering;

use serde_json::Value;

use super::StoredDocument;

/// Sort direction of an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A collection query.
///
/// # Examples
/// ```
/// use platesnap_admin::outbound::store::{Query, SortDirection};
/// use serde_json::json;
///
/// let query = Query::all()
///     .where_eq("blockId", json!("b-1"))
///     .order_by("floor", SortDirection::Ascending);
/// assert_eq!(query.filters().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, Value)>,
    order: Option<(String, SortDirection)>,
}

impl Query {
    /// Every document of the collection, in insertion order.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep documents whose `field` equals `value`.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filters.push((field.into(), value));
        self
    }

    /// Order by `field`; documents with equal values keep insertion order.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order = Some((field.into(), direction));
        self
    }

    pub fn filters(&self) -> &[(String, Value)] {
        &self.filters
    }

    pub(crate) fn matches(&self, document: &StoredDocument) -> bool {
        self.filters
            .iter()
            .all(|(field, expected)| document.fields.get(field) == Some(expected))
    }

    /// Filter and order documents given in insertion order.
    pub(crate) fn apply<'a, I>(&self, documents: I) -> Vec<StoredDocument>
    where
        I: IntoIterator<Item = &'a StoredDocument>,
    {
        let mut selected: Vec<StoredDocument> = documents
            .into_iter()
            .filter(|document| self.matches(document))
            .cloned()
            .collect();
        if let Some((field, direction)) = &self.order {
            selected.sort_by(|left, right| {
                let ordering = compare_values(left.fields.get(field), right.fields.get(field));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        selected
    }
}

/// Total order over optional JSON values: absent and null first, then
/// booleans, numbers, strings and finally anything else.
fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.total_cmp(&b)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (a, b) => rank(a).cmp(&rank(b)),
    }
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_) | Value::Object(_)) => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn document(id: &str, fields: Value) -> StoredDocument {
        let Value::Object(fields) = fields else {
            panic!("test documents are objects");
        };
        StoredDocument {
            id: id.to_owned(),
            fields,
        }
    }

    fn ids(documents: &[StoredDocument]) -> Vec<&str> {
        documents.iter().map(|document| document.id.as_str()).collect()
    }

    #[rstest]
    fn filters_require_every_field_to_match() {
        let documents = [
            document("1", json!({"blockId": "b-1", "isActive": true})),
            document("2", json!({"blockId": "b-1", "isActive": false})),
            document("3", json!({"blockId": "b-2", "isActive": true})),
        ];
        let query = Query::all()
            .where_eq("blockId", json!("b-1"))
            .where_eq("isActive", json!(true));

        assert_eq!(ids(&query.apply(&documents)), ["1"]);
    }

    #[rstest]
    #[case(SortDirection::Ascending, vec!["c", "a", "b", "d"])]
    #[case(SortDirection::Descending, vec!["d", "a", "b", "c"])]
    fn ordering_is_stable(#[case] direction: SortDirection, #[case] expected: Vec<&str>) {
        let documents = [
            document("a", json!({"floor": 2})),
            document("b", json!({"floor": 2})),
            document("c", json!({"floor": 1})),
            document("d", json!({"floor": 10})),
        ];
        let query = Query::all().order_by("floor", direction);

        assert_eq!(ids(&query.apply(&documents)), expected);
    }

    #[rstest]
    fn missing_fields_sort_first() {
        let documents = [
            document("named", json!({"code": "A"})),
            document("unnamed", json!({})),
        ];
        let query = Query::all().order_by("code", SortDirection::Ascending);

        assert_eq!(ids(&query.apply(&documents)), ["unnamed", "named"]);
    }
}
