#![deny(missing_docs)]

//! # Type Resolution
//!
//! Maps schema nodes (or references to them) to structural type
//! descriptors.
//!
//! Object types are only supported via reference or as a free-form map with
//! a typed value; composition keywords are rejected. Arrays whose element
//! resolves to a lone scalar collapse to the generic list type — a
//! compatibility quirk kept on purpose, see DESIGN.md.

use crate::error::{CompileError, CompileResult};
use crate::oas::document::{AdditionalProperties, RefOr, SchemaObject};
use crate::oas::models::{PrimitiveKind, TypeAlt, TypeDescriptor};
use crate::oas::refs::schema_ref_name;

/// Resolves a schema node to a type descriptor.
///
/// # Arguments
///
/// * `node` - The schema or reference to resolve.
/// * `is_required` - Whether the owning slot is mandatory; optional slots
///   gain the `null` alternative via the nullability flag.
pub fn resolve_type(node: &RefOr<SchemaObject>, is_required: bool) -> CompileResult<TypeDescriptor> {
    match node {
        RefOr::Ref(r) => Ok(TypeDescriptor::single(
            TypeAlt::Named(schema_ref_name(&r.pointer)?),
            !is_required,
        )),
        RefOr::Item(schema) => {
            if schema.has_unsupported_composition() {
                return Err(CompileError::UnsupportedSchema(
                    "allOf/anyOf/not/discriminator composition is not supported".to_string(),
                ));
            }

            let mut alternatives = Vec::new();
            if schema.schema_type.is_some() {
                alternatives.push(single_type(schema)?);
            }
            if let Some(branches) = &schema.one_of {
                for branch in branches {
                    // Only typed inline branches contribute; everything else
                    // is skipped.
                    if let RefOr::Item(inner) = branch {
                        if inner.schema_type.is_some() {
                            alternatives.push(single_type(inner)?);
                        }
                    }
                }
            }

            if alternatives.is_empty() {
                return Err(CompileError::UnsupportedSchema(
                    "schema has neither a type nor typed oneOf branches".to_string(),
                ));
            }

            let mut seen = Vec::new();
            alternatives.retain(|alt| {
                if seen.contains(alt) {
                    false
                } else {
                    seen.push(alt.clone());
                    true
                }
            });

            Ok(TypeDescriptor {
                alternatives,
                nullable: !is_required || schema.nullable,
            })
        }
    }
}

/// Maps one concretely-typed schema to a single alternative.
fn single_type(schema: &SchemaObject) -> CompileResult<TypeAlt> {
    match schema.schema_type.as_deref() {
        Some("string") => Ok(TypeAlt::Primitive(match schema.format.as_deref() {
            Some("date") => PrimitiveKind::Date,
            Some("date-time") => PrimitiveKind::DateTime,
            _ => PrimitiveKind::String,
        })),
        Some("number") => Ok(TypeAlt::Primitive(match schema.format.as_deref() {
            Some("double") => PrimitiveKind::Double,
            _ => PrimitiveKind::Float,
        })),
        Some("integer") => Ok(TypeAlt::Primitive(PrimitiveKind::Integer)),
        Some("boolean") => Ok(TypeAlt::Primitive(PrimitiveKind::Boolean)),
        Some("array") => collection_of(schema.items.as_deref()),
        Some("object") => match &schema.additional_properties {
            Some(AdditionalProperties::Schema(values)) => collection_of(Some(values.as_ref())),
            Some(AdditionalProperties::Flag(true)) => Err(CompileError::UnsupportedSchema(
                "free-form additionalProperties is not supported".to_string(),
            )),
            Some(AdditionalProperties::Flag(false)) | None => {
                Err(CompileError::UnsupportedSchema(
                    "object schemas are only supported via reference or as a typed map"
                        .to_string(),
                ))
            }
        },
        Some(other) => Err(CompileError::UnsupportedSchema(format!(
            "unsupported property type '{}'",
            other
        ))),
        None => Err(CompileError::UnsupportedSchema(
            "schema with no recognizable shape".to_string(),
        )),
    }
}

/// The shared array / typed-map rule: a referenced element keeps its name, a
/// lone scalar element collapses to the generic list, anything else is a
/// typed list.
fn collection_of(items: Option<&RefOr<SchemaObject>>) -> CompileResult<TypeAlt> {
    match items {
        None => Ok(TypeAlt::List(None)),
        Some(RefOr::Ref(r)) => Ok(TypeAlt::List(Some(Box::new(TypeDescriptor::single(
            TypeAlt::Named(schema_ref_name(&r.pointer)?),
            false,
        ))))),
        Some(RefOr::Item(element)) => {
            let alt = single_type(element)?;
            if collapses_to_generic(&alt) {
                Ok(TypeAlt::List(None))
            } else {
                Ok(TypeAlt::List(Some(Box::new(TypeDescriptor::single(
                    alt, false,
                )))))
            }
        }
    }
}

/// The scalar set subject to the collapse rule. Date, date-time and
/// double-precision elements keep their element type.
fn collapses_to_generic(alt: &TypeAlt) -> bool {
    matches!(
        alt,
        TypeAlt::Primitive(
            PrimitiveKind::String
                | PrimitiveKind::Integer
                | PrimitiveKind::Float
                | PrimitiveKind::Boolean
        )
    )
}
