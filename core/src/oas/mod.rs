#![deny(missing_docs)]

//! # OpenAPI Compilation Module
//!
//! - **document**: deserialization shims for the parsed contract.
//! - **models**: Intermediate Representation definitions.
//! - **refs**: reference resolution.
//! - **resolver**: type mapping and parameter merging.
//! - **routes**: path segmentation, operation compilation, route building.
//! - **schemas**: schema artifacts and enum collection.

pub mod document;
pub mod models;
pub mod refs;
pub mod resolver;
pub mod routes;
pub mod schemas;

pub use document::Document;
pub use models::{
    ActionDescriptor, CompiledModel, ControllerGroup, EnumArtifact, ExceptionKind, GroupKey,
    HttpMethod, Parameter, RouteTable, SchemaArtifact, TypeAlt, TypeDescriptor,
};
pub use refs::RefResolver;
pub use schemas::EnumCollector;

use crate::config::GeneratorConfig;
use crate::error::CompileResult;

/// Compiles a document into the intermediate model.
///
/// Single-threaded, single-pass, deterministic: schemas and enums first,
/// then groups and routes, failing fast at the first invariant violation.
/// No partial model is ever returned.
pub fn compile(document: &Document, config: &GeneratorConfig) -> CompileResult<CompiledModel> {
    let resolver = RefResolver::new(document);
    let mut enums = EnumCollector::new();

    let schemas = schemas::compile_schemas(document, &resolver, &mut enums)?;
    let (groups, routes) = routes::build_model(document, config, &resolver)?;

    log::debug!(
        "compilation finished: {} schemas, {} enums, {} groups, {} routes",
        schemas.len(),
        enums.len(),
        groups.len(),
        routes.entries.len()
    );

    Ok(CompiledModel {
        schemas,
        enums: enums.into_artifacts(),
        groups,
        routes,
    })
}
