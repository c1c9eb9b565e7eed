#![deny(missing_docs)]

//! # Generator Configuration
//!
//! The knobs the host passes alongside the document. One value, threaded by
//! reference into every pass; nothing here is process-global.

use serde::{Deserialize, Serialize};

/// Settings for a single compilation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Root namespace for handler groups (dotted, e.g. "app").
    /// Derived group namespaces are appended below it.
    pub group_namespace: String,
    /// Namespace for enum artifacts (dotted, e.g. "app.enums").
    pub enum_namespace: String,
    /// URL prefix prepended to every path before group derivation
    /// (e.g. "api"). May be empty. Route-table keys stay unprefixed.
    pub path_prefix: String,
    /// Identifier under which the route table is handed to the emitter.
    pub route_table_ident: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            group_namespace: "app".to_string(),
            enum_namespace: "app.enums".to_string(),
            path_prefix: String::new(),
            route_table_ident: "routes.api".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Prefix segments derived from `path_prefix`, empty parts dropped.
    pub(crate) fn prefix_segments(&self) -> Vec<&str> {
        self.path_prefix
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Joins `path_prefix` and a path template into the prefixed form used
    /// for group derivation.
    pub(crate) fn prefixed_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.path_prefix.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
