//! Error taxonomy for the re-publication engine.
//!
//! Only *structural* failures are errors here: a module path that does
//! not resolve, or a dependency clause that matches no recognized shape.
//! Visibility conflicts are never errors — the declarator resolves them
//! by silent filtering (see [`crate::module::Module::declare_public`]).
//! Everything surfaces eagerly at module-definition time; there is no
//! deferred or retried failure mode.

use std::sync::Arc;
use thiserror::Error;
use vesper_core::InternedString;

/// Errors raised while re-publishing upstream symbols.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepublishError {
    /// A path segment does not name an existing module or member.
    #[error("cannot resolve module path `{path}`: `{segment}` not found")]
    UnresolvedPath {
        /// Dotted rendering of the full path being resolved.
        path: Arc<str>,
        /// The segment that failed to resolve.
        segment: InternedString,
    },

    /// A relative path used more parent markers than the module has
    /// ancestors. A refinement of the unresolved-path class: same
    /// fatality, more precise message.
    #[error("relative module path `{path}` ascends past the root module")]
    AscentPastRoot {
        /// Dotted rendering of the offending path.
        path: Arc<str>,
    },

    /// The input clause matches no recognized shape.
    #[error("malformed dependency clause: {reason}")]
    MalformedClause {
        /// Human-readable description of the shape violation.
        reason: Arc<str>,
    },
}

impl RepublishError {
    /// Construct an unresolved-path error.
    pub fn unresolved(path: impl Into<Arc<str>>, segment: InternedString) -> Self {
        RepublishError::UnresolvedPath {
            path: path.into(),
            segment,
        }
    }

    /// Construct a malformed-clause error.
    pub fn malformed(reason: impl Into<Arc<str>>) -> Self {
        RepublishError::MalformedClause {
            reason: reason.into(),
        }
    }

    /// Whether this is a path-resolution failure (either variant).
    #[inline]
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            RepublishError::UnresolvedPath { .. } | RepublishError::AscentPastRoot { .. }
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
