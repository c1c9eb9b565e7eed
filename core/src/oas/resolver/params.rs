#![deny(missing_docs)]

//! # Parameter Merging
//!
//! Combines path-level and operation-level parameter lists. Both lists pass
//! through the reference resolver first; the result is keyed by name with
//! operation-level entries fully replacing path-level ones. Positions follow
//! the parent list, operation-only additions append.

use crate::error::CompileResult;
use crate::oas::document::{ParameterSpec, RefOr};
use crate::oas::refs::RefResolver;
use indexmap::IndexMap;

/// Merges parent (path-level) and operation-level parameters.
pub fn merge_parameters<'doc>(
    parent: &'doc [RefOr<ParameterSpec>],
    operation: &'doc [RefOr<ParameterSpec>],
    resolver: &RefResolver<'doc>,
) -> CompileResult<Vec<&'doc ParameterSpec>> {
    let mut merged: IndexMap<&str, &ParameterSpec> = IndexMap::new();
    for node in parent.iter().chain(operation.iter()) {
        let param = resolver.deref_parameter(node)?;
        // IndexMap keeps the first-seen position on replacement, which is
        // exactly the merge order contract.
        merged.insert(param.name.as_str(), param);
    }
    Ok(merged.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::document::Document;

    fn nodes(json: serde_json::Value) -> Vec<RefOr<ParameterSpec>> {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_operation_replaces_parent_in_place() {
        let doc = Document::default();
        let resolver = RefResolver::new(&doc);

        let parent = nodes(serde_json::json!([
            {"name": "id", "in": "path", "required": true, "schema": {"type": "string"}},
            {"name": "limit", "in": "query", "schema": {"type": "integer"}}
        ]));
        let operation = nodes(serde_json::json!([
            {"name": "limit", "in": "query", "required": true, "schema": {"type": "integer"}},
            {"name": "offset", "in": "query", "schema": {"type": "integer"}}
        ]));

        let merged = merge_parameters(&parent, &operation, &resolver).unwrap();
        let names: Vec<&str> = merged.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "limit", "offset"]);
        // the operation-level definition won
        assert!(merged[1].required);
    }

    #[test]
    fn test_referenced_parameters_resolved() {
        let doc = Document::from_yaml_str(
            r#"
openapi: 3.0.0
paths: {}
components:
  parameters:
    pageParam:
      name: page
      in: query
      schema:
        type: integer
"#,
        )
        .unwrap();
        let resolver = RefResolver::new(&doc);

        let parent = nodes(serde_json::json!([
            {"$ref": "#/components/parameters/pageParam"}
        ]));
        let merged = merge_parameters(&parent, &[], &resolver).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "page");
    }

    #[test]
    fn test_dangling_parameter_reference_fails() {
        let doc = Document::default();
        let resolver = RefResolver::new(&doc);
        let parent = nodes(serde_json::json!([
            {"$ref": "#/components/parameters/missing"}
        ]));
        assert!(merge_parameters(&parent, &[], &resolver).is_err());
    }
}
