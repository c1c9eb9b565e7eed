#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `CompileError` enum used across the workspace.

use derive_more::{Display, From};

/// The compiler error enum.
///
/// Every variant is compilation-fatal: the pass aborts at the first error and
/// no partial model is returned. We use `derive_more` for boilerplate.
#[derive(Debug, Display, From)]
pub enum CompileError {
    /// A schema shape the resolver does not model (composition keywords,
    /// cyclic or remote references, unsupported top-level kinds).
    #[from(ignore)]
    #[display("Unsupported schema: {_0}")]
    UnsupportedSchema(String),

    /// A request or response body declared with content other than JSON.
    #[from(ignore)]
    #[display("Unsupported media type: {_0}")]
    UnsupportedMediaType(String),

    /// A path template that does not decompose into group and action parts.
    #[from(ignore)]
    #[display("Unparsable route: {_0}")]
    UnparsableRoute(String),

    /// A reference pointing at a schema or parameter that does not exist.
    #[from(ignore)]
    #[display("Dangling reference: {_0}")]
    DanglingReference(String),

    /// Two enum registrations under one name with differing value sets.
    #[from(ignore)]
    #[display("Enum conflict: {_0}")]
    EnumConflict(String),

    /// Two operations mapping to an identical route-table key.
    #[from(ignore)]
    #[display("Duplicate route: {_0}")]
    DuplicateRoute(String),

    /// The supplied document could not be decoded.
    /// String errors default to this variant.
    #[display("Invalid document: {_0}")]
    Document(String),

    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CompileError {}

/// Helper type alias for Result using CompileError.
pub type CompileResult<T> = Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::Other, "test");
        let err: CompileError = io_err.into();
        assert!(matches!(err, CompileError::Io(_)));
    }

    #[test]
    fn test_string_conversion() {
        // String defaults to Document, never to one of the typed variants
        let msg = String::from("missing paths object");
        let err: CompileError = msg.into();
        match err {
            CompileError::Document(s) => assert_eq!(s, "missing paths object"),
            _ => panic!("String should convert to CompileError::Document"),
        }
    }

    #[test]
    fn test_typed_variant_display() {
        let err = CompileError::DuplicateRoute("GET /pets".into());
        assert_eq!(format!("{}", err), "Duplicate route: GET /pets");
    }
}
