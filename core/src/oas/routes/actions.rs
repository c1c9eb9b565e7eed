#![deny(missing_docs)]

//! # Operation Compilation
//!
//! Turns one HTTP operation into an action descriptor: typed parameter
//! list, optional request type, optional response type and the status-code
//! to exception map.
//!
//! Only `application/json` bodies are supported. Responses without content
//! are skipped; among success responses the last declared 2xx body wins, a
//! quirk kept for compatibility (see DESIGN.md).

use crate::error::{CompileError, CompileResult};
use crate::oas::document::{Operation, ParameterSpec, RefOr};
use crate::oas::models::{
    ActionDescriptor, ExceptionKind, ExceptionSpec, HttpMethod, ParamLocation, Parameter,
};
use crate::oas::refs::RefResolver;
use crate::oas::resolver::{merge_parameters, resolve_type};
use indexmap::IndexMap;

/// The JSON media type, the only supported body encoding.
const MEDIA_JSON: &str = "application/json";

/// Compiles one operation into an action descriptor.
///
/// # Arguments
///
/// * `path` - The unprefixed path template.
/// * `method` - The HTTP method the operation is keyed under.
/// * `operation` - The operation object.
/// * `parent_params` - Path-level parameters, merged in below operation
///   level.
/// * `name` - The action name (seed plus method suffix), supplied by the
///   route builder.
pub fn compile_operation<'doc>(
    path: &str,
    method: HttpMethod,
    operation: &'doc Operation,
    parent_params: &'doc [RefOr<ParameterSpec>],
    name: String,
    resolver: &RefResolver<'doc>,
) -> CompileResult<ActionDescriptor> {
    let merged = merge_parameters(parent_params, &operation.parameters, resolver)?;

    let mut params = Vec::new();
    for spec in merged {
        let location = match spec.location.as_str() {
            "path" => ParamLocation::Path,
            "query" => ParamLocation::Query,
            // header/cookie parameters never enter generated signatures
            _ => continue,
        };
        let schema = spec.schema.as_ref().ok_or_else(|| {
            CompileError::UnsupportedSchema(format!(
                "parameter '{}' on '{} {}' has no schema",
                spec.name, method, path
            ))
        })?;
        let schema_required =
            matches!(schema, RefOr::Item(s) if s.required.contains(&spec.name));
        let required = schema_required || spec.required;
        params.push(Parameter {
            name: spec.name.clone(),
            location,
            required,
            ty: resolve_type(schema, required)?,
        });
    }

    let request = match &operation.request_body {
        Some(body) => {
            let content = body.content.as_ref().ok_or_else(|| {
                CompileError::UnsupportedSchema(format!(
                    "request body on '{} {}' declares no content",
                    method, path
                ))
            })?;
            let media = content.get(MEDIA_JSON).ok_or_else(|| {
                CompileError::UnsupportedMediaType(format!(
                    "request body on '{} {}' must be {}",
                    method, path, MEDIA_JSON
                ))
            })?;
            let schema = media.schema.as_ref().ok_or_else(|| {
                CompileError::UnsupportedSchema(format!(
                    "request body on '{} {}' has no schema",
                    method, path
                ))
            })?;
            Some(resolve_type(schema, body.required)?)
        }
        None => None,
    };

    let mut response = None;
    let mut exceptions = IndexMap::new();
    for (code, declared) in &operation.responses {
        let Some(content) = declared.content.as_ref().filter(|c| !c.is_empty()) else {
            continue;
        };
        let media = content.get(MEDIA_JSON).ok_or_else(|| {
            CompileError::UnsupportedMediaType(format!(
                "response '{}' on '{} {}' must be {}",
                code, method, path, MEDIA_JSON
            ))
        })?;
        let schema = media.schema.as_ref().ok_or_else(|| {
            CompileError::UnsupportedSchema(format!(
                "response '{}' on '{} {}' has no schema",
                code, method, path
            ))
        })?;
        let ty = resolve_type(schema, true)?;

        if let Ok(status) = code.parse::<u16>() {
            match status / 100 {
                2 => response = Some(ty),
                4 | 5 => {
                    exceptions.insert(
                        status,
                        ExceptionSpec {
                            kind: exception_kind(status),
                            body: ty,
                        },
                    );
                }
                _ => {}
            }
        }
    }

    log::debug!(
        "compiled action {} for {} {} ({} params, {} exceptions)",
        name,
        method,
        path,
        params.len(),
        exceptions.len()
    );

    Ok(ActionDescriptor {
        method,
        path: path.to_string(),
        name,
        summary: operation.summary.clone(),
        params,
        request,
        response,
        exceptions,
    })
}

/// The fixed status-code to exception-kind table.
pub(crate) fn exception_kind(status: u16) -> ExceptionKind {
    match status {
        400 => ExceptionKind::BadRequest,
        401 => ExceptionKind::Unauthorized,
        403 => ExceptionKind::Forbidden,
        404 => ExceptionKind::NotFound,
        405 => ExceptionKind::MethodNotAllowed,
        406 => ExceptionKind::NotAcceptable,
        409 => ExceptionKind::Conflict,
        410 => ExceptionKind::Gone,
        415 => ExceptionKind::UnsupportedMediaType,
        416 => ExceptionKind::RangeNotSatisfiable,
        422 => ExceptionKind::UnprocessableEntity,
        429 => ExceptionKind::TooManyRequests,
        500..=599 => ExceptionKind::ServerError,
        _ => ExceptionKind::Http,
    }
}
