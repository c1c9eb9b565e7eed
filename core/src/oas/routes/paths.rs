#![deny(missing_docs)]

//! # Path Segmentation
//!
//! Splits a URL template into a group key and an action-name seed.
//!
//! Literal segments before the first path variable form the group portion;
//! everything from the first variable onward forms the action portion. A
//! static path with no variables donates its last literal to the action, so
//! `/codelist/developers` yields group `codelist`, action `developers`.

use crate::config::GeneratorConfig;
use crate::error::{CompileError, CompileResult};
use crate::oas::models::GroupKey;
use heck::{ToLowerCamelCase, ToUpperCamelCase};
use regex::Regex;
use std::sync::OnceLock;

/// Matches a `{variable}` path segment.
pub(crate) fn variable_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\{.*\}$").expect("static pattern"))
}

/// Explicit per-path overrides carried on the path item.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOverrides<'a> {
    /// Overrides the derived group name.
    pub controller: Option<&'a str>,
    /// Overrides the derived group namespace wholesale.
    pub namespace: Option<&'a str>,
}

/// The result of segmenting one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedPath {
    /// Group identity for this path.
    pub group: GroupKey,
    /// Camel-cased action-name seed; the HTTP method is appended by the
    /// caller to disambiguate methods sharing a route shape.
    pub action_seed: String,
}

/// Segments a prefixed path template into group and action parts.
pub fn segment(
    prefixed_path: &str,
    overrides: &PathOverrides<'_>,
    config: &GeneratorConfig,
) -> CompileResult<SegmentedPath> {
    let mut group: Vec<&str> = Vec::new();
    let mut action: Vec<&str> = Vec::new();
    let mut in_action = false;

    for part in prefixed_path.split('/').filter(|p| !p.is_empty()) {
        if variable_pattern().is_match(part) {
            in_action = true;
        } else if in_action {
            action.push(part);
        } else {
            group.push(part);
        }
    }

    if action.is_empty() && group.len() > 1 {
        action.extend(group.pop());
    }

    if group.is_empty() || action.is_empty() {
        return Err(CompileError::UnparsableRoute(format!(
            "path '{}' cannot be split into group and action parts",
            prefixed_path
        )));
    }

    let name = match overrides.controller {
        Some(name) => name.to_string(),
        None => group
            .pop()
            .expect("group has segments")
            .to_upper_camel_case(),
    };

    let namespace = match overrides.namespace {
        Some(ns) => ns.to_string(),
        None => {
            let mut parts: Vec<&str> = config
                .group_namespace
                .split('.')
                .filter(|s| !s.is_empty())
                .collect();
            parts.extend(group);
            parts.join(".")
        }
    };

    Ok(SegmentedPath {
        group: GroupKey { namespace, name },
        action_seed: action.join("-").to_lower_camel_case(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> GeneratorConfig {
        GeneratorConfig::default()
    }

    #[test]
    fn test_variable_splits_group_from_action() {
        let seg = segment("/issue/{id}/assign", &PathOverrides::default(), &config()).unwrap();
        assert_eq!(seg.group.namespace, "app");
        assert_eq!(seg.group.name, "Issue");
        assert_eq!(seg.action_seed, "assign");
    }

    #[test]
    fn test_static_path_pops_action() {
        let seg = segment("/codelist/developers", &PathOverrides::default(), &config()).unwrap();
        assert_eq!(seg.group.name, "Codelist");
        assert_eq!(seg.action_seed, "developers");
    }

    #[test]
    fn test_nested_group_namespace() {
        let seg = segment(
            "/plan/sprint/{id}/current",
            &PathOverrides::default(),
            &config(),
        )
        .unwrap();
        assert_eq!(seg.group.namespace, "app.plan");
        assert_eq!(seg.group.name, "Sprint");
        assert_eq!(seg.action_seed, "current");
    }

    #[test]
    fn test_multi_segment_action_seed() {
        let seg = segment(
            "/plan/sprint/{id}/issue/{issueid}",
            &PathOverrides::default(),
            &config(),
        )
        .unwrap();
        assert_eq!(seg.group.name, "Sprint");
        assert_eq!(seg.action_seed, "issue");

        let seg = segment(
            "/report/{id}/export/csv",
            &PathOverrides::default(),
            &config(),
        )
        .unwrap();
        assert_eq!(seg.action_seed, "exportCsv");
    }

    #[test]
    fn test_unparsable_paths() {
        for path in ["/", "/issue", "/{id}", "/{id}/assign"] {
            let err = segment(path, &PathOverrides::default(), &config()).unwrap_err();
            assert!(
                matches!(err, CompileError::UnparsableRoute(_)),
                "path {} should be unparsable",
                path
            );
        }
    }

    #[test]
    fn test_controller_override() {
        let overrides = PathOverrides {
            controller: Some("Workboard"),
            namespace: None,
        };
        let seg = segment("/issue/{id}/assign", &overrides, &config()).unwrap();
        assert_eq!(seg.group.name, "Workboard");
        // with an explicit name the derived segment stays in the namespace
        assert_eq!(seg.group.namespace, "app.issue");
    }

    #[test]
    fn test_namespace_override() {
        let overrides = PathOverrides {
            controller: None,
            namespace: Some("vendor.api"),
        };
        let seg = segment("/issue/{id}/assign", &overrides, &config()).unwrap();
        assert_eq!(seg.group.namespace, "vendor.api");
        assert_eq!(seg.group.name, "Issue");
    }

    #[test]
    fn test_prefix_contributes_to_namespace() {
        let config = GeneratorConfig {
            path_prefix: "api".into(),
            ..GeneratorConfig::default()
        };
        let prefixed = config.prefixed_path("/plan/sprint/{id}/current");
        let seg = segment(&prefixed, &PathOverrides::default(), &config).unwrap();
        assert_eq!(seg.group.namespace, "app.api.plan");
        assert_eq!(seg.group.name, "Sprint");
    }
}
