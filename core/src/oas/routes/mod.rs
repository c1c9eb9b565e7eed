#![deny(missing_docs)]

//! # Route Compilation Module
//!
//! - **paths**: path-template segmentation into group and action parts.
//! - **actions**: per-operation compilation into action descriptors.
//! - **builder**: grouping and route-table construction.

pub mod actions;
pub mod builder;
pub mod paths;

pub use actions::compile_operation;
pub use builder::build_model;
pub use paths::{segment, PathOverrides, SegmentedPath};
