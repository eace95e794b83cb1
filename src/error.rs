//! Error types for treemodel
//!
//! Two families of failures exist, and they are handled differently:
//!
//! - Declaration-time and programmer errors ([`SchemaError`], misuse of the
//!   store API surfaced as [`ConstraintError`]) fail fast through `Result`.
//! - Document-content findings (missing element, choice mismatch, duplicate
//!   key, unresolved reference) are accumulated as [`ErrorRecord`]s in an
//!   ordered sink owned by the host, so one bad node never stops the walk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using the treemodel [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for treemodel operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed schema declaration
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Identity-constraint store failure
    #[error("constraint error: {0}")]
    Constraint(#[from] ConstraintError),
}

/// Errors raised while declaring content models and constraint checks.
///
/// These indicate a broken schema definition, not a broken document, and are
/// never accumulated in the error sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// `max_occurs > 0` requires `min_occurs <= max_occurs`
    #[error("element '{name}': min_occurs {min} exceeds max_occurs {max}")]
    OccursBounds {
        /// Element name
        name: String,
        /// Declared minimum
        min: u32,
        /// Declared maximum
        max: u32,
    },

    /// The same element name appears in more than one choice option
    #[error("element '{name}' appears in more than one choice option")]
    DuplicateChoiceName {
        /// Offending element name
        name: String,
    },

    /// A key name (or key-name list) was required but empty
    #[error("key names (string or list of strings) is required and can not be empty")]
    EmptyKeyName,

    /// Scope level must strip at least one path segment
    #[error("scope level must be at least 1")]
    ZeroLevel,
}

/// Errors raised by the identity-constraint stores.
///
/// During the walk these are caught at the nearest composite boundary and
/// converted into [`ErrorRecord`]s carrying that node's path; the variants
/// keep enough context to build the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// A `(key_name, scope_path)` bucket was declared twice
    #[error("key {key_name}:{scope_path} does already exist")]
    DuplicateScope {
        /// Constraint name
        key_name: String,
        /// Scope the bucket is attached to
        scope_path: String,
    },

    /// The same value was inserted twice into one bucket
    #[error("duplicate key value {value} for {key_name} at {path}")]
    DuplicateValue {
        /// Constraint name
        key_name: String,
        /// The duplicated value
        value: String,
        /// Instance path of the second occurrence
        path: String,
    },

    /// No bucket exists at the scope for any of the given key names
    #[error("could not find scope {scope_path} for key name(s) {key_names}")]
    ScopeNotDeclared {
        /// Scope that was probed
        scope_path: String,
        /// Comma-joined alias list
        key_names: String,
    },

    /// `match_ref` was asked about a key name that was never declared
    #[error("no key for {key_name} exists")]
    UnknownKeyName {
        /// Constraint name
        key_name: String,
    },

    /// No bucket under the key name contains the referenced value
    #[error("could not match ref {value} for {key_name}")]
    UnmatchedRef {
        /// Constraint name
        key_name: String,
        /// The value that could not be resolved
        value: String,
    },

    /// Key and reference values may not be empty
    #[error("value may not be empty")]
    EmptyValue,

    /// A referencing path was resolved twice
    #[error("target for ref path {ref_path} already exists")]
    DuplicateTarget {
        /// The referencing instance path
        ref_path: String,
    },
}

impl ConstraintError {
    /// Convert this failure into a sink record attributed to `path`.
    pub fn into_record(self, path: impl Into<String>, field: impl Into<String>) -> ErrorRecord {
        ErrorRecord::new(path, field, self.to_string())
    }
}

/// A single document-content finding.
///
/// Records are appended (never overwritten) to an ordered sink supplied by
/// the host for the whole validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Instance path of the node the finding is attributed to
    pub path: String,
    /// Field or slot name within that node (`"_extra"` for unmatched names)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorRecord {
    /// Create a new error record
    pub fn new(
        path: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.path, self.field, self.message)
    }
}
