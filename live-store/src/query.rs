use serde_json::{Map, Value};

/// A declarative query against one entity collection.
///
/// Serialized to the backend's wire shape:
/// `{"reactions": {"$": {"where": {"imageId": "abc"}}}}`. A query without
/// filters selects the full collection (`{"feed": {}}`).
#[derive(Debug, Clone, PartialEq)]
pub struct LiveQuery {
    entity: String,
    filters: Vec<(String, Value)>,
}

impl LiveQuery {
    /// Query the full collection of one entity kind
    pub fn entity(name: impl Into<String>) -> Self {
        Self {
            entity: name.into(),
            filters: Vec::new(),
        }
    }

    /// Add an equality filter on a record field
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn entity_name(&self) -> &str {
        &self.entity
    }

    /// Build the backend wire representation of this query
    pub fn to_wire(&self) -> Value {
        let mut root = Map::new();

        if self.filters.is_empty() {
            root.insert(self.entity.clone(), Value::Object(Map::new()));
            return Value::Object(root);
        }

        let mut where_clause = Map::new();
        for (field, value) in &self.filters {
            where_clause.insert(field.clone(), value.clone());
        }

        let mut dollar = Map::new();
        dollar.insert("where".to_string(), Value::Object(where_clause));

        let mut inner = Map::new();
        inner.insert("$".to_string(), Value::Object(dollar));

        root.insert(self.entity.clone(), Value::Object(inner));
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_shape_with_filter() {
        let query = LiveQuery::entity("reactions").where_eq("imageId", "abc");
        assert_eq!(
            query.to_wire(),
            json!({"reactions": {"$": {"where": {"imageId": "abc"}}}})
        );
    }

    #[test]
    fn test_wire_shape_without_filter() {
        let query = LiveQuery::entity("feed");
        assert_eq!(query.to_wire(), json!({"feed": {}}));
    }

    #[test]
    fn test_wire_shape_multiple_filters() {
        let query = LiveQuery::entity("comments")
            .where_eq("imageId", "abc")
            .where_eq("userId", "u1");
        assert_eq!(
            query.to_wire(),
            json!({"comments": {"$": {"where": {"imageId": "abc", "userId": "u1"}}}})
        );
    }
}
