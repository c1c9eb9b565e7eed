#![deny(missing_docs)]

//! # Intermediate Model
//!
//! Definition of the Intermediate Representation (IR) structures handed to
//! the emitter. Everything here is built during a single compilation pass
//! and immutable afterwards.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// HTTP methods recognized on a path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Upper-case wire name, e.g. "POST".
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Capitalized name used as an action-name suffix, e.g. "Post".
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
            Self::Head => "Head",
            Self::Options => "Options",
            Self::Trace => "Trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar kinds recognized by the type resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrimitiveKind {
    /// `type: string`.
    String,
    /// `type: string, format: date`.
    Date,
    /// `type: string, format: date-time`.
    DateTime,
    /// `type: number` without a `double` format.
    Float,
    /// `type: number, format: double`.
    Double,
    /// `type: integer`.
    Integer,
    /// `type: boolean`.
    Boolean,
}

/// One alternative of a resolved type union.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeAlt {
    /// A reference to a named schema artifact.
    Named(String),
    /// A scalar.
    Primitive(PrimitiveKind),
    /// An ordered collection. `None` is the generic element-less list the
    /// scalar-collapse rule produces; maps with typed values fold into this
    /// variant as well.
    List(Option<Box<TypeDescriptor>>),
}

/// The resolved output type for a schema, parameter or response: a non-empty
/// ordered set of alternatives plus a nullability flag.
///
/// Alternatives are de-duplicated; `null` is carried only by the flag, never
/// as an alternative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDescriptor {
    /// Union alternatives, in resolution order.
    pub alternatives: Vec<TypeAlt>,
    /// Whether `null` is an admissible value.
    pub nullable: bool,
}

impl TypeDescriptor {
    /// A descriptor with a single alternative.
    pub fn single(alt: TypeAlt, nullable: bool) -> Self {
        Self {
            alternatives: vec![alt],
            nullable,
        }
    }

    /// The first primitive alternative, if any. Used for route placeholder
    /// pattern selection.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        self.alternatives.iter().find_map(|alt| match alt {
            TypeAlt::Primitive(kind) => Some(*kind),
            _ => None,
        })
    }
}

/// Where a generated parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// A path segment variable.
    Path,
    /// A query-string entry.
    Query,
}

/// A typed parameter of an action. Identity within a list is the name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location in the request.
    pub location: ParamLocation,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Resolved type.
    pub ty: TypeDescriptor,
}

/// Exception kinds an error response maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExceptionKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 405
    MethodNotAllowed,
    /// 406
    NotAcceptable,
    /// 409
    Conflict,
    /// 410
    Gone,
    /// 415
    UnsupportedMediaType,
    /// 416
    RangeNotSatisfiable,
    /// 422
    UnprocessableEntity,
    /// 429
    TooManyRequests,
    /// Any other 5xx code.
    ServerError,
    /// Any other unmapped code.
    Http,
}

/// One entry of an action's status-code to exception map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptionSpec {
    /// The selected exception kind.
    pub kind: ExceptionKind,
    /// Resolved type of the error body.
    pub body: TypeDescriptor,
}

/// The compiled representation of one HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDescriptor {
    /// HTTP method.
    pub method: HttpMethod,
    /// Unprefixed path template, e.g. `/issue/{id}/assign`.
    pub path: String,
    /// Action name: camel-cased seed plus method suffix, e.g. `assignPost`.
    pub name: String,
    /// Summary from the operation, if any.
    pub summary: Option<String>,
    /// Typed parameters (path and query only), in merge order.
    pub params: Vec<Parameter>,
    /// Request body type, if a body is declared.
    pub request: Option<TypeDescriptor>,
    /// Success response type, if a 2xx body is declared.
    pub response: Option<TypeDescriptor>,
    /// Error responses keyed by exact status code, in declaration order.
    pub exceptions: IndexMap<u16, ExceptionSpec>,
}

/// The stable identity of a handler group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroupKey {
    /// Dotted namespace, e.g. `app.api.plan`.
    pub namespace: String,
    /// Group name in Pascal case, e.g. `Sprint`.
    pub name: String,
}

impl GroupKey {
    /// Fully-qualified key, e.g. `app.api.plan.Sprint`.
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// A handler group: actions sharing a derived or overridden group key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerGroup {
    /// Group identity.
    pub key: GroupKey,
    /// Kebab-cased dispatch path, e.g. `plan/sprint`.
    pub uri: String,
    /// Actions in compile order.
    pub actions: Vec<ActionDescriptor>,
}

/// One member of an enum artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumMember {
    /// Normalized identifier, e.g. `IN_PROGRESS`.
    pub ident: String,
    /// The raw scalar value from the document.
    pub value: JsonValue,
}

/// A named enumeration gathered during compilation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumArtifact {
    /// Artifact name, e.g. `IssueState`.
    pub name: String,
    /// Members in first-seen value order, de-duplicated.
    pub members: Vec<EnumMember>,
}

/// A property of a schema artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,
    /// Resolved type.
    pub ty: TypeDescriptor,
    /// Description from the schema, if any.
    pub description: Option<String>,
    /// Default value from the schema, if any.
    pub default: Option<JsonValue>,
    /// Name of the enum artifact constraining this property, if any.
    pub enum_name: Option<String>,
}

/// A compiled record type from `components.schemas`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaArtifact {
    /// Schema name.
    pub name: String,
    /// Description from the schema, if any.
    pub description: Option<String>,
    /// Whether the schema is deprecated.
    pub deprecated: bool,
    /// Properties in document order.
    pub properties: Vec<PropertyDescriptor>,
}

/// The routing table: `"<METHOD> <typed-template>"` to
/// `"<group-uri>/<action-id>"`, in compile order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteTable {
    /// Identifier under which the table is handed to the emitter.
    pub ident: String,
    /// Route rows. Key uniqueness is an invariant.
    pub entries: IndexMap<String, String>,
}

/// The complete intermediate model produced by one compilation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledModel {
    /// Record types, in document order.
    pub schemas: Vec<SchemaArtifact>,
    /// Enum artifacts, in first-registration order.
    pub enums: Vec<EnumArtifact>,
    /// Handler groups, in first-seen order.
    pub groups: Vec<ControllerGroup>,
    /// The routing table.
    pub routes: RouteTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_qualified() {
        let key = GroupKey {
            namespace: "app.api.plan".into(),
            name: "Sprint".into(),
        };
        assert_eq!(key.qualified(), "app.api.plan.Sprint");

        let bare = GroupKey {
            namespace: String::new(),
            name: "Issue".into(),
        };
        assert_eq!(bare.qualified(), "Issue");
    }

    #[test]
    fn test_primitive_lookup() {
        let ty = TypeDescriptor {
            alternatives: vec![
                TypeAlt::Named("Issue".into()),
                TypeAlt::Primitive(PrimitiveKind::Integer),
            ],
            nullable: false,
        };
        assert_eq!(ty.primitive(), Some(PrimitiveKind::Integer));

        let named_only = TypeDescriptor::single(TypeAlt::Named("Issue".into()), false);
        assert_eq!(named_only.primitive(), None);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Post.suffix(), "Post");
        assert_eq!(format!("{}", HttpMethod::Delete), "DELETE");
    }
}
