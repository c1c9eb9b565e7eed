#![deny(missing_docs)]

//! # Apigen Core
//!
//! Compiles a parsed OpenAPI 3 document into a framework-agnostic
//! intermediate model: data schemas, enum artifacts, handler groups with
//! typed actions, and a routing table. Rendering the model into source text
//! is a separate emitter concern and lives outside this crate.

/// Shared error types.
pub mod error;

/// Generator configuration.
pub mod config;

/// OpenAPI parsing and compilation.
pub mod oas;

pub use config::GeneratorConfig;
pub use error::{CompileError, CompileResult};
pub use oas::{
    compile, ActionDescriptor, CompiledModel, ControllerGroup, Document, EnumArtifact,
    ExceptionKind, GroupKey, HttpMethod, Parameter, RouteTable, SchemaArtifact, TypeAlt,
    TypeDescriptor,
};
