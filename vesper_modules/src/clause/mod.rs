//! Consumption clauses: the five shapes a dependency request can take.
//!
//! A [`Clause`] is an immutable, fully-typed description of one
//! `use`/`import` request, produced either directly by the host or by
//! lowering an opaque [`ClauseNode`] syntax fragment (see [`lower`]).
//! Clauses are transient: they exist during one definition pass and are
//! discarded once their declarations have been applied.

pub mod lower;

pub use lower::{ClauseNode, EntryNode, NodeKind, PathNode};

use crate::path::ModulePath;
use vesper_core::InternedString;

// =============================================================================
// Clause shapes
// =============================================================================

/// One dependency clause, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// A block of sub-clauses, each handled independently under the
    /// same policy.
    Block(Vec<Clause>),
    /// A nested module definition: the host defines the module as a
    /// child of the consumer, then its introduction is treated as a
    /// whole-module consumption of itself.
    ModuleDef {
        /// Name of the nested module.
        name: InternedString,
    },
    /// Whole-module consumption of one or more upstream modules.
    Modules(Vec<ModulePath>),
    /// One upstream module plus an explicit symbol list
    /// (`use A: x, y as z`).
    Names {
        /// The upstream module path.
        path: ModulePath,
        /// The requested symbols, optionally aliased.
        entries: Vec<ClauseEntry>,
    },
    /// Single-symbol imports, each entry carrying its own full dotted
    /// path (`import A.B.x as y`).
    Imports(Vec<ImportEntry>),
}

/// One entry of a symbol list: a bare name or a `name as alias` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseEntry {
    /// The name as bound upstream.
    pub name: InternedString,
    /// The local name, when renamed.
    pub alias: Option<InternedString>,
}

impl ClauseEntry {
    /// A bare entry: local name equals the upstream name.
    #[inline]
    pub fn bare(name: InternedString) -> Self {
        Self { name, alias: None }
    }

    /// An aliased entry.
    #[inline]
    pub fn aliased(name: InternedString, alias: InternedString) -> Self {
        Self {
            name,
            alias: Some(alias),
        }
    }

    /// The name this entry binds locally.
    #[inline]
    pub fn local(&self) -> InternedString {
        self.alias.unwrap_or(self.name)
    }
}

/// One entry of a dotted-import list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    /// Full path; the final segment is the symbol (or module) imported.
    pub path: ModulePath,
    /// The local name, when renamed.
    pub alias: Option<InternedString>,
}

// =============================================================================
// Alias extraction
// =============================================================================

/// Normalize a symbol list into parallel (original, local) sequences.
///
/// Order is preserved and duplicates are permitted; declaration is a
/// batch set operation downstream, so the last occurrence wins there.
/// Purely syntactic — no existence checks happen here.
pub fn split_aliases(entries: &[ClauseEntry]) -> (Vec<InternedString>, Vec<InternedString>) {
    let mut originals = Vec::with_capacity(entries.len());
    let mut locals = Vec::with_capacity(entries.len());
    for entry in entries {
        originals.push(entry.name);
        locals.push(entry.local());
    }
    (originals, locals)
}

// =============================================================================
// Tests
// =============================================================================
