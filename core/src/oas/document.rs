#![deny(missing_docs)]

//! # Document Shims
//!
//! Generic structures acting as an Intermediate Deserialization Layer.
//! These structs map directly to OpenAPI 3 JSON/YAML objects; the compiler
//! never mutates them after decoding.
//!
//! Unsupported keywords (`allOf`, `anyOf`, `not`, `discriminator`) are
//! captured so the resolver can reject them with a typed error instead of
//! approximating.

use crate::error::{CompileError, CompileResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::models::HttpMethod;

/// A reference or an inline object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` pointer to a component defined elsewhere in the document.
    Ref(Reference),
    /// An inline object.
    Item(T),
}

/// A `$ref` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// The JSON Pointer, e.g. `#/components/schemas/Issue`.
    #[serde(rename = "$ref")]
    pub pointer: String,
}

/// The parsed API contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// OpenAPI version string (e.g. "3.0.3").
    pub openapi: Option<String>,
    /// Metadata about the API.
    pub info: Option<Info>,
    /// Path items keyed by path template, in document order.
    pub paths: IndexMap<String, PathItem>,
    /// Reusable components.
    pub components: Option<Components>,
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Info {
    /// Title of the API.
    pub title: Option<String>,
    /// Version of the API.
    pub version: Option<String>,
    /// Description of the API.
    pub description: Option<String>,
}

/// The `components` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    /// Named schemas, in document order.
    pub schemas: IndexMap<String, RefOr<SchemaObject>>,
    /// Named reusable parameters.
    pub parameters: IndexMap<String, RefOr<ParameterSpec>>,
}

/// One path item: operations keyed by HTTP method plus shared parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathItem {
    /// Summary shared by all operations on this path.
    pub summary: Option<String>,
    /// Description shared by all operations on this path.
    pub description: Option<String>,
    /// GET operation.
    pub get: Option<Operation>,
    /// POST operation.
    pub post: Option<Operation>,
    /// PUT operation.
    pub put: Option<Operation>,
    /// PATCH operation.
    pub patch: Option<Operation>,
    /// DELETE operation.
    pub delete: Option<Operation>,
    /// HEAD operation.
    pub head: Option<Operation>,
    /// OPTIONS operation.
    pub options: Option<Operation>,
    /// TRACE operation.
    pub trace: Option<Operation>,
    /// Parameters shared by every operation on this path.
    pub parameters: Vec<RefOr<ParameterSpec>>,
    /// Explicit group-name override for this path.
    #[serde(rename = "x-controller")]
    pub controller_override: Option<String>,
    /// Explicit group-namespace override for this path.
    #[serde(rename = "x-ns")]
    pub namespace_override: Option<String>,
}

impl PathItem {
    /// Iterates declared operations in the fixed method order used by the
    /// compiler: get, post, put, patch, delete, head, options, trace.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|o| (method, o)))
    }
}

/// One HTTP operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Operation {
    /// Unique operation identifier, if declared.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Verbose description.
    pub description: Option<String>,
    /// Operation-level parameters; override path-level ones by name.
    pub parameters: Vec<RefOr<ParameterSpec>>,
    /// Request body, if declared.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBodySpec>,
    /// Responses keyed by status code, in document order.
    pub responses: IndexMap<String, ResponseSpec>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
}

/// A request body declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestBodySpec {
    /// Description of the body.
    pub description: Option<String>,
    /// Whether the body is required. Defaults to false per the spec.
    pub required: bool,
    /// Media types keyed by content type.
    pub content: Option<IndexMap<String, MediaTypeSpec>>,
}

/// A response declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseSpec {
    /// Description of the response.
    pub description: Option<String>,
    /// Media types keyed by content type. Absent content means the response
    /// carries no body and is skipped by the operation compiler.
    pub content: Option<IndexMap<String, MediaTypeSpec>>,
}

/// A media type entry under `content`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaTypeSpec {
    /// The body schema.
    pub schema: Option<RefOr<SchemaObject>>,
}

/// A parameter declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSpec {
    /// Name of the parameter. Identity for merging.
    pub name: String,
    /// Location: "path", "query", "header" or "cookie".
    #[serde(rename = "in")]
    pub location: String,
    /// Whether the parameter is required.
    pub required: bool,
    /// Description of the parameter.
    pub description: Option<String>,
    /// Schema defining the parameter type.
    pub schema: Option<RefOr<SchemaObject>>,
}

/// The `additionalProperties` keyword: a boolean flag or a value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// The free-form boolean flag.
    Flag(bool),
    /// A typed value schema.
    Schema(Box<RefOr<SchemaObject>>),
}

/// A schema node, decoded permissively.
///
/// Exactly one variant of [`SchemaKind`] is active per node; `nullable` and
/// membership in a parent's `required` set are orthogonal facets, not
/// variants. The classifier is [`SchemaObject::kind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaObject {
    /// The `type` keyword.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// The `format` keyword.
    pub format: Option<String>,
    /// The `nullable` facet (OpenAPI 3.0).
    pub nullable: bool,
    /// Description of the schema.
    pub description: Option<String>,
    /// Whether the schema is deprecated.
    pub deprecated: bool,
    /// Array element schema.
    pub items: Option<Box<RefOr<SchemaObject>>>,
    /// Object properties, in document order.
    pub properties: IndexMap<String, RefOr<SchemaObject>>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// The `additionalProperties` keyword.
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Union branches.
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<RefOr<SchemaObject>>>,
    /// Enumerated values, in document order.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<JsonValue>>,
    /// Explicit enum-name override.
    #[serde(rename = "x-enum")]
    pub enum_override: Option<String>,
    /// Default value.
    pub default: Option<JsonValue>,
    /// Unsupported composition keyword, captured for rejection.
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<JsonValue>>,
    /// Unsupported composition keyword, captured for rejection.
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<JsonValue>>,
    /// Unsupported negation keyword, captured for rejection.
    pub not: Option<JsonValue>,
    /// Unsupported discriminator keyword, captured for rejection.
    pub discriminator: Option<JsonValue>,
}

/// The classified shape of a schema node. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// A scalar type (`string`, `number`, `integer`, `boolean`).
    Primitive,
    /// `type: array`.
    Array,
    /// `type: object` with a typed `additionalProperties` value.
    Map,
    /// `type: object` with named properties.
    Object,
    /// A schema carrying `enum` values.
    Enum,
    /// A `oneOf` union.
    Union,
}

impl SchemaObject {
    /// True when the node carries a composition keyword the compiler
    /// refuses to model.
    pub fn has_unsupported_composition(&self) -> bool {
        self.all_of.is_some()
            || self.any_of.is_some()
            || self.not.is_some()
            || self.discriminator.is_some()
    }

    /// Classifies the node into its single active variant.
    pub fn kind(&self) -> CompileResult<SchemaKind> {
        if self.has_unsupported_composition() {
            return Err(CompileError::UnsupportedSchema(
                "allOf/anyOf/not/discriminator composition is not supported".to_string(),
            ));
        }
        if self
            .enum_values
            .as_ref()
            .is_some_and(|values| !values.is_empty())
        {
            return Ok(SchemaKind::Enum);
        }
        if self.one_of.is_some() {
            return Ok(SchemaKind::Union);
        }
        match self.schema_type.as_deref() {
            Some("array") => Ok(SchemaKind::Array),
            Some("object") => {
                if self.additional_properties.is_some() {
                    Ok(SchemaKind::Map)
                } else {
                    Ok(SchemaKind::Object)
                }
            }
            Some("string" | "number" | "integer" | "boolean") => Ok(SchemaKind::Primitive),
            Some(other) => Err(CompileError::UnsupportedSchema(format!(
                "schema type '{}' is not supported",
                other
            ))),
            None => Err(CompileError::UnsupportedSchema(
                "schema with no recognizable shape".to_string(),
            )),
        }
    }
}

impl Document {
    /// Decodes a document from a JSON value.
    pub fn from_json_value(value: JsonValue) -> CompileResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| CompileError::Document(format!("failed to decode document: {}", e)))
    }

    /// Decodes a document from a JSON string.
    pub fn from_json_str(content: &str) -> CompileResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| CompileError::Document(format!("failed to decode document: {}", e)))
    }

    /// Decodes a document from a YAML string.
    pub fn from_yaml_str(content: &str) -> CompileResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CompileError::Document(format!("failed to decode document: {}", e)))
    }

    /// Decodes a document from content that may be either JSON or YAML.
    /// JSON is tried first; YAML is the fallback.
    pub fn from_str_any(content: &str) -> CompileResult<Self> {
        if let Ok(document) = Self::from_json_str(content) {
            return Ok(document);
        }
        Self::from_yaml_str(content)
    }

    /// Looks up a named component schema.
    pub fn schema_entry(&self, name: &str) -> Option<&RefOr<SchemaObject>> {
        self.components.as_ref()?.schemas.get(name)
    }

    /// Looks up a named component parameter.
    pub fn parameter_entry(&self, name: &str) -> Option<&RefOr<ParameterSpec>> {
        self.components.as_ref()?.parameters.get(name)
    }

    /// Iterates named component schemas in document order.
    pub fn component_schemas(&self) -> impl Iterator<Item = (&String, &RefOr<SchemaObject>)> {
        self.components.iter().flat_map(|c| c.schemas.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ref_or_prefers_reference() {
        let node: RefOr<SchemaObject> =
            serde_json::from_value(serde_json::json!({ "$ref": "#/components/schemas/Issue" }))
                .unwrap();
        assert!(matches!(node, RefOr::Ref(ref r) if r.pointer.ends_with("Issue")));

        let inline: RefOr<SchemaObject> =
            serde_json::from_value(serde_json::json!({ "type": "string" })).unwrap();
        assert!(matches!(inline, RefOr::Item(_)));
    }

    #[test]
    fn test_schema_kind_classification() {
        let primitive: SchemaObject =
            serde_json::from_value(serde_json::json!({ "type": "integer" })).unwrap();
        assert_eq!(primitive.kind().unwrap(), SchemaKind::Primitive);

        let array: SchemaObject =
            serde_json::from_value(serde_json::json!({ "type": "array", "items": {"type": "string"} }))
                .unwrap();
        assert_eq!(array.kind().unwrap(), SchemaKind::Array);

        let map: SchemaObject = serde_json::from_value(
            serde_json::json!({ "type": "object", "additionalProperties": {"type": "integer"} }),
        )
        .unwrap();
        assert_eq!(map.kind().unwrap(), SchemaKind::Map);

        let object: SchemaObject = serde_json::from_value(
            serde_json::json!({ "type": "object", "properties": { "id": {"type": "integer"} } }),
        )
        .unwrap();
        assert_eq!(object.kind().unwrap(), SchemaKind::Object);

        let en: SchemaObject =
            serde_json::from_value(serde_json::json!({ "type": "string", "enum": ["a", "b"] }))
                .unwrap();
        assert_eq!(en.kind().unwrap(), SchemaKind::Enum);
    }

    #[test]
    fn test_schema_kind_rejects_composition() {
        let schema: SchemaObject =
            serde_json::from_value(serde_json::json!({ "allOf": [{"type": "string"}] })).unwrap();
        assert!(matches!(
            schema.kind(),
            Err(crate::error::CompileError::UnsupportedSchema(_))
        ));
    }

    #[test]
    fn test_operations_fixed_order() {
        let item: PathItem = serde_json::from_value(serde_json::json!({
            "delete": { "operationId": "remove" },
            "get": { "operationId": "fetch" }
        }))
        .unwrap();
        let methods: Vec<HttpMethod> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
    }

    #[test]
    fn test_document_from_yaml() {
        let document = Document::from_yaml_str(
            r#"
openapi: 3.0.0
info:
  title: Test
  version: "1.0"
paths:
  /issue/{id}/assign:
    post:
      operationId: assignIssue
      responses: {}
"#,
        )
        .unwrap();
        assert_eq!(document.paths.len(), 1);
        let item = &document.paths["/issue/{id}/assign"];
        assert!(item.post.is_some());
    }

    #[test]
    fn test_additional_properties_flag() {
        let schema: SchemaObject = serde_json::from_value(
            serde_json::json!({ "type": "object", "additionalProperties": true }),
        )
        .unwrap();
        assert!(matches!(
            schema.additional_properties,
            Some(AdditionalProperties::Flag(true))
        ));
    }
}
