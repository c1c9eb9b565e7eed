#![deny(missing_docs)]

//! # Reference Resolution
//!
//! The explicit `$ref` resolution service. Resolution is shallow (one hop)
//! and memoized per document; references are assumed non-cyclic for this
//! domain, so a reference whose target is itself a reference is rejected
//! rather than chased.
//!
//! Only pointers into the owning document (`#/components/...`) are
//! resolvable. Remote and relative references never trigger a fetch.

use crate::error::{CompileError, CompileResult};
use crate::oas::document::{Document, ParameterSpec, RefOr, SchemaObject};
use percent_encoding::percent_decode_str;
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent escapes).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Extracts the component name from a local `#/components/{section}/{name}`
/// pointer.
///
/// Remote references (absolute URLs or relative document paths) are a typed
/// failure; a local pointer outside `components/{section}` simply has no
/// match in this document model.
pub(crate) fn component_name(pointer: &str, section: &str) -> CompileResult<String> {
    if !pointer.starts_with('#') {
        if Url::parse(pointer).is_ok() || pointer.contains('#') {
            return Err(CompileError::UnsupportedSchema(format!(
                "external reference '{}' is not supported",
                pointer
            )));
        }
        return Err(CompileError::DanglingReference(format!(
            "reference '{}' is not a document pointer",
            pointer
        )));
    }

    let fragment = pointer.trim_start_matches('#').trim_start_matches('/');
    let segments: Vec<&str> = fragment.split('/').collect();
    if segments.len() != 3 || segments[0] != "components" || segments[1] != section {
        return Err(CompileError::DanglingReference(format!(
            "pointer '{}' does not address components/{}",
            pointer, section
        )));
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        return Err(CompileError::DanglingReference(format!(
            "pointer '{}' has an empty component name",
            pointer
        )));
    }
    Ok(name)
}

/// The referenced schema name of a `$ref`, without resolving the target.
///
/// Used by the type resolver, which maps references to named alternatives
/// structurally.
pub(crate) fn schema_ref_name(pointer: &str) -> CompileResult<String> {
    component_name(pointer, "schemas")
}

/// Dereferences pointers into their concrete targets within one document.
pub struct RefResolver<'doc> {
    document: &'doc Document,
    schemas: RefCell<HashMap<String, &'doc SchemaObject>>,
    parameters: RefCell<HashMap<String, &'doc ParameterSpec>>,
}

impl<'doc> RefResolver<'doc> {
    /// Creates a resolver over `document`.
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            schemas: RefCell::new(HashMap::new()),
            parameters: RefCell::new(HashMap::new()),
        }
    }

    /// Resolves a schema pointer to its concrete target, one hop.
    pub fn resolve_schema(&self, pointer: &str) -> CompileResult<&'doc SchemaObject> {
        if let Some(schema) = self.schemas.borrow().get(pointer).copied() {
            return Ok(schema);
        }

        let name = component_name(pointer, "schemas")?;
        let schema = match self.document.schema_entry(&name) {
            Some(RefOr::Item(schema)) => schema,
            Some(RefOr::Ref(_)) => {
                return Err(CompileError::UnsupportedSchema(format!(
                    "reference chain through '{}' is not supported",
                    pointer
                )))
            }
            None => {
                return Err(CompileError::DanglingReference(format!(
                    "schema '{}' referenced by '{}' does not exist",
                    name, pointer
                )))
            }
        };

        self.schemas
            .borrow_mut()
            .insert(pointer.to_string(), schema);
        Ok(schema)
    }

    /// Resolves a parameter pointer to its concrete target, one hop.
    pub fn resolve_parameter(&self, pointer: &str) -> CompileResult<&'doc ParameterSpec> {
        if let Some(param) = self.parameters.borrow().get(pointer).copied() {
            return Ok(param);
        }

        let name = component_name(pointer, "parameters")?;
        let param = match self.document.parameter_entry(&name) {
            Some(RefOr::Item(param)) => param,
            Some(RefOr::Ref(_)) => {
                return Err(CompileError::UnsupportedSchema(format!(
                    "reference chain through '{}' is not supported",
                    pointer
                )))
            }
            None => {
                return Err(CompileError::DanglingReference(format!(
                    "parameter '{}' referenced by '{}' does not exist",
                    name, pointer
                )))
            }
        };

        self.parameters
            .borrow_mut()
            .insert(pointer.to_string(), param);
        Ok(param)
    }

    /// Dereferences a `RefOr` schema node.
    pub fn deref_schema(
        &self,
        node: &'doc RefOr<SchemaObject>,
    ) -> CompileResult<&'doc SchemaObject> {
        match node {
            RefOr::Item(schema) => Ok(schema),
            RefOr::Ref(r) => self.resolve_schema(&r.pointer),
        }
    }

    /// Dereferences a `RefOr` parameter node.
    pub fn deref_parameter(
        &self,
        node: &'doc RefOr<ParameterSpec>,
    ) -> CompileResult<&'doc ParameterSpec> {
        match node {
            RefOr::Item(param) => Ok(param),
            RefOr::Ref(r) => self.resolve_parameter(&r.pointer),
        }
    }
}
