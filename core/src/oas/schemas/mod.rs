#![deny(missing_docs)]

//! # Schema Compilation
//!
//! Walks `components.schemas` in document order and produces one record
//! artifact per object schema, registering every enumeration encountered
//! along the way. Top-level enum schemas become artifacts of the enum
//! namespace alone; any other top-level kind is rejected.

pub mod enums;

pub use enums::EnumCollector;

use crate::error::{CompileError, CompileResult};
use crate::oas::document::{Document, RefOr, SchemaKind};
use crate::oas::models::{PropertyDescriptor, SchemaArtifact};
use crate::oas::refs::RefResolver;
use crate::oas::resolver::resolve_type;
use heck::ToUpperCamelCase;

/// Compiles all named component schemas.
pub fn compile_schemas<'doc>(
    document: &'doc Document,
    resolver: &RefResolver<'doc>,
    enums: &mut EnumCollector,
) -> CompileResult<Vec<SchemaArtifact>> {
    let mut artifacts = Vec::new();

    for (name, entry) in document.component_schemas() {
        let schema = match entry {
            RefOr::Item(schema) => schema,
            RefOr::Ref(_) => {
                return Err(CompileError::UnsupportedSchema(format!(
                    "top-level schema '{}' must not be a reference",
                    name
                )))
            }
        };

        match schema.kind()? {
            SchemaKind::Object | SchemaKind::Map => {
                let mut properties = Vec::new();
                for (prop_name, prop) in &schema.properties {
                    let resolved = resolver.deref_schema(prop)?;

                    let enum_name = match &resolved.enum_values {
                        Some(values) if !values.is_empty() => {
                            let enum_name = resolved.enum_override.clone().unwrap_or_else(|| {
                                format!("{}{}", ucfirst(name), prop_name.to_upper_camel_case())
                            });
                            enums.register(&enum_name, values)?;
                            Some(enum_name)
                        }
                        _ => None,
                    };

                    let required = schema.required.contains(prop_name) && !resolved.nullable;
                    let ty = resolve_type(prop, required)?;

                    properties.push(PropertyDescriptor {
                        name: prop_name.clone(),
                        ty,
                        description: resolved.description.clone(),
                        default: resolved.default.clone(),
                        enum_name,
                    });
                }

                artifacts.push(SchemaArtifact {
                    name: name.clone(),
                    description: schema.description.clone(),
                    deprecated: schema.deprecated,
                    properties,
                });
            }
            SchemaKind::Enum => {
                if let Some(values) = &schema.enum_values {
                    let enum_name = schema
                        .enum_override
                        .clone()
                        .unwrap_or_else(|| ucfirst(name));
                    enums.register(&enum_name, values)?;
                }
            }
            SchemaKind::Primitive | SchemaKind::Array | SchemaKind::Union => {
                return Err(CompileError::UnsupportedSchema(format!(
                    "schema '{}' of type '{}' is not supported at top level",
                    name,
                    schema.schema_type.as_deref().unwrap_or("<none>")
                )));
            }
        }
    }

    log::debug!(
        "compiled {} schema artifacts, {} enums",
        artifacts.len(),
        enums.len()
    );
    Ok(artifacts)
}

/// Upper-cases the first character, leaving the rest untouched.
fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
