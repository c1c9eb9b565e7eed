#![deny(missing_docs)]

//! # Route Building
//!
//! Walks the document's paths in order, compiles every operation, groups
//! actions by their first-seen group key and emits the routing table with
//! typed placeholders.

use crate::config::GeneratorConfig;
use crate::error::{CompileError, CompileResult};
use crate::oas::document::Document;
use crate::oas::models::{
    ControllerGroup, GroupKey, ParamLocation, Parameter, PrimitiveKind, RouteTable,
};
use crate::oas::refs::RefResolver;
use crate::oas::routes::actions::compile_operation;
use crate::oas::routes::paths::{segment, variable_pattern, PathOverrides};
use heck::ToKebabCase;
use indexmap::IndexMap;

/// Builds handler groups and the routing table for a document.
pub fn build_model<'doc>(
    document: &'doc Document,
    config: &GeneratorConfig,
    resolver: &RefResolver<'doc>,
) -> CompileResult<(Vec<ControllerGroup>, RouteTable)> {
    let mut groups: IndexMap<String, ControllerGroup> = IndexMap::new();
    let mut entries: IndexMap<String, String> = IndexMap::new();

    for (path, item) in &document.paths {
        let prefixed = config.prefixed_path(path);
        let overrides = PathOverrides {
            controller: item.controller_override.as_deref(),
            namespace: item.namespace_override.as_deref(),
        };

        for (method, operation) in item.operations() {
            let segmented = segment(&prefixed, &overrides, config)?;
            let action_name = format!("{}{}", segmented.action_seed, method.suffix());
            let action = compile_operation(
                path,
                method,
                operation,
                &item.parameters,
                action_name,
                resolver,
            )?;

            // Route keys stay on the unprefixed template.
            let route_key = format!("{} {}", method.as_str(), typed_template(path, &action.params));
            let uri = group_uri(&segmented.group, config);
            let action_id = operation
                .operation_id
                .as_deref()
                .map(|id| id.to_kebab_case())
                .unwrap_or_else(|| action.name.to_kebab_case());
            let route_value = format!("{}/{}", uri, action_id);

            if entries.contains_key(&route_key) {
                return Err(CompileError::DuplicateRoute(format!(
                    "route '{}' is produced by more than one operation",
                    route_key
                )));
            }
            entries.insert(route_key, route_value);

            groups
                .entry(segmented.group.qualified())
                .or_insert_with(|| ControllerGroup {
                    key: segmented.group.clone(),
                    uri,
                    actions: Vec::new(),
                })
                .actions
                .push(action);
        }
    }

    log::debug!(
        "built {} routes across {} groups",
        entries.len(),
        groups.len()
    );

    Ok((
        groups.into_values().collect(),
        RouteTable {
            ident: config.route_table_ident.clone(),
            entries,
        },
    ))
}

/// Rewrites `{var}` segments into typed placeholders, choosing the pattern
/// from the variable's resolved primitive kind.
fn typed_template(path: &str, params: &[Parameter]) -> String {
    path.split('/')
        .map(|part| {
            if !variable_pattern().is_match(part) {
                return part.to_string();
            }
            let name = part.trim_matches(|c| c == '{' || c == '}');
            let pattern = params
                .iter()
                .find(|p| p.location == ParamLocation::Path && p.name == name)
                .and_then(|p| p.ty.primitive())
                .map(placeholder_pattern)
                .unwrap_or(r"\S+");
            format!("<{}:{}>", name, pattern)
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The placeholder pattern table.
fn placeholder_pattern(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Integer => r"\d+",
        PrimitiveKind::Float | PrimitiveKind::Double => r"[\d\.]+",
        PrimitiveKind::Boolean => "(true|false|1|0)",
        _ => r"\S+",
    }
}

/// The kebab-cased dispatch path of a group: namespace segments below the
/// configured root and prefix, then the group name.
fn group_uri(key: &GroupKey, config: &GeneratorConfig) -> String {
    let mut parts: Vec<&str> = key
        .namespace
        .split('.')
        .filter(|s| !s.is_empty())
        .collect();

    let root: Vec<&str> = config
        .group_namespace
        .split('.')
        .filter(|s| !s.is_empty())
        .collect();
    if parts.starts_with(&root) {
        parts.drain(..root.len());
    }

    let prefix = config.prefix_segments();
    if parts.starts_with(&prefix) {
        parts.drain(..prefix.len());
    }

    let mut segments: Vec<String> = parts.into_iter().map(|p| p.to_kebab_case()).collect();
    segments.push(key.name.to_kebab_case());
    segments.join("/")
}
