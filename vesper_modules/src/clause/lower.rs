//! Lowering host syntax fragments into typed clauses.
//!
//! The host parser hands over a loosely-typed [`ClauseNode`] — a kind
//! tag plus whichever path/entry/child payloads the surface syntax
//! carried. Lowering shape-checks the fragment against the five clause
//! shapes and interns all names. Every violation surfaces as
//! [`RepublishError::MalformedClause`] here, before any module state is
//! mutated.

use super::{Clause, ClauseEntry, ImportEntry};
use crate::error::RepublishError;
use crate::path::ModulePath;
use vesper_core::intern;

// =============================================================================
// Host syntax fragments
// =============================================================================

/// Kind tag of a host clause fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `use A, B` / `use A: x, y as z`
    Using,
    /// `import A.B.x as y, C`
    Import,
    /// `module M ... end` under the re-publication macro.
    ModuleDef,
    /// A block grouping sub-clauses.
    Block,
}

/// A module path as split by the host parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathNode {
    /// Leading self/parent markers (0 = absolute).
    pub ascent: usize,
    /// Path segments.
    pub segments: Vec<String>,
}

impl PathNode {
    /// An absolute path from segments.
    pub fn absolute(segments: &[&str]) -> Self {
        Self {
            ascent: 0,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// A relative path from a marker count and segments.
    pub fn relative(ascent: usize, segments: &[&str]) -> Self {
        Self {
            ascent,
            segments: segments.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// One symbol-list or import-list entry as split by the host parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryNode {
    /// Leading self/parent markers (import entries may be relative).
    pub ascent: usize,
    /// Path segments; a plain symbol-list entry has exactly one.
    pub path: Vec<String>,
    /// Local rename, if the entry used `as`.
    pub alias: Option<String>,
}

impl EntryNode {
    /// A bare single-name entry.
    pub fn name(name: &str) -> Self {
        Self {
            ascent: 0,
            path: vec![name.to_string()],
            alias: None,
        }
    }

    /// A renamed single-name entry.
    pub fn renamed(name: &str, alias: &str) -> Self {
        Self {
            ascent: 0,
            path: vec![name.to_string()],
            alias: Some(alias.to_string()),
        }
    }

    /// A dotted import entry.
    pub fn dotted(ascent: usize, path: &[&str], alias: Option<&str>) -> Self {
        Self {
            ascent,
            path: path.iter().map(|s| s.to_string()).collect(),
            alias: alias.map(|s| s.to_string()),
        }
    }
}

/// An opaque clause fragment from the host parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseNode {
    /// Shape tag.
    pub kind: NodeKind,
    /// Module paths (whole-module and symbol-list clauses).
    pub paths: Vec<PathNode>,
    /// Symbol or import entries.
    pub entries: Vec<EntryNode>,
    /// Nested module name (module-definition clauses).
    pub name: Option<String>,
    /// Sub-clauses (block clauses).
    pub children: Vec<ClauseNode>,
}

impl ClauseNode {
    fn empty(kind: NodeKind) -> Self {
        Self {
            kind,
            paths: Vec::new(),
            entries: Vec::new(),
            name: None,
            children: Vec::new(),
        }
    }

    /// A whole-module `use` fragment.
    pub fn using(paths: Vec<PathNode>) -> Self {
        Self {
            paths,
            ..Self::empty(NodeKind::Using)
        }
    }

    /// A `use A: names...` fragment.
    pub fn using_names(path: PathNode, entries: Vec<EntryNode>) -> Self {
        Self {
            paths: vec![path],
            entries,
            ..Self::empty(NodeKind::Using)
        }
    }

    /// An `import` fragment.
    pub fn import(entries: Vec<EntryNode>) -> Self {
        Self {
            entries,
            ..Self::empty(NodeKind::Import)
        }
    }

    /// A nested module-definition fragment.
    pub fn module_def(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::empty(NodeKind::ModuleDef)
        }
    }

    /// A block fragment.
    pub fn block(children: Vec<ClauseNode>) -> Self {
        Self {
            children,
            ..Self::empty(NodeKind::Block)
        }
    }
}

// =============================================================================
// Lowering
// =============================================================================

impl Clause {
    /// Lower a host fragment into a typed clause.
    ///
    /// Fails with [`RepublishError::MalformedClause`] if the fragment
    /// matches no recognized shape. Pure; no module state is read or
    /// written.
    pub fn from_node(node: &ClauseNode) -> Result<Clause, RepublishError> {
        match node.kind {
            NodeKind::Block => lower_block(node),
            NodeKind::ModuleDef => lower_module_def(node),
            NodeKind::Using => lower_using(node),
            NodeKind::Import => lower_import(node),
        }
    }
}

fn lower_block(node: &ClauseNode) -> Result<Clause, RepublishError> {
    if !node.paths.is_empty() || !node.entries.is_empty() || node.name.is_some() {
        return Err(RepublishError::malformed(
            "block clause cannot carry paths, entries, or a module name",
        ));
    }
    let clauses = node
        .children
        .iter()
        .map(Clause::from_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::Block(clauses))
}

fn lower_module_def(node: &ClauseNode) -> Result<Clause, RepublishError> {
    if !node.paths.is_empty() || !node.entries.is_empty() || !node.children.is_empty() {
        return Err(RepublishError::malformed(
            "module-definition clause carries only the module name",
        ));
    }
    let name = match node.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(RepublishError::malformed(
                "module-definition clause is missing the module name",
            ));
        }
    };
    Ok(Clause::ModuleDef { name: intern(name) })
}

fn lower_using(node: &ClauseNode) -> Result<Clause, RepublishError> {
    if node.name.is_some() || !node.children.is_empty() {
        return Err(RepublishError::malformed(
            "use clause cannot carry a module name or sub-clauses",
        ));
    }
    if node.paths.is_empty() {
        return Err(RepublishError::malformed("use clause names no modules"));
    }

    if node.entries.is_empty() {
        let paths = node
            .paths
            .iter()
            .map(lower_path)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Clause::Modules(paths));
    }

    // Symbol list: exactly one module path, entries are plain names.
    if node.paths.len() != 1 {
        return Err(RepublishError::malformed(
            "symbol list requires exactly one module path",
        ));
    }
    let path = lower_path(&node.paths[0])?;
    let entries = node
        .entries
        .iter()
        .map(|entry| {
            if entry.ascent != 0 || entry.path.len() != 1 {
                return Err(RepublishError::malformed(
                    "symbol list mixes module-wide and symbol-specific syntax",
                ));
            }
            let name = lower_name(&entry.path[0])?;
            Ok(match entry.alias.as_deref() {
                Some(alias) => ClauseEntry::aliased(name, lower_name(alias)?),
                None => ClauseEntry::bare(name),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::Names { path, entries })
}

fn lower_import(node: &ClauseNode) -> Result<Clause, RepublishError> {
    if !node.paths.is_empty() || node.name.is_some() || !node.children.is_empty() {
        return Err(RepublishError::malformed(
            "import clause carries only its entry list",
        ));
    }
    if node.entries.is_empty() {
        return Err(RepublishError::malformed("import clause names no symbols"));
    }
    let entries = node
        .entries
        .iter()
        .map(|entry| {
            // A marker-only path (`import .`) can never name a symbol or
            // a module alias, so segmentless entries are rejected here
            // regardless of ascent — before any module state is touched.
            if entry.path.is_empty() {
                return Err(RepublishError::malformed("import entry has no path segments"));
            }
            let segments = entry
                .path
                .iter()
                .map(|s| lower_name(s))
                .collect::<Result<Vec<_>, _>>()?;
            let alias = match entry.alias.as_deref() {
                Some(alias) => Some(lower_name(alias)?),
                None => None,
            };
            Ok(ImportEntry {
                path: ModulePath::new(entry.ascent, segments),
                alias,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Clause::Imports(entries))
}

fn lower_path(path: &PathNode) -> Result<ModulePath, RepublishError> {
    if path.ascent == 0 && path.segments.is_empty() {
        return Err(RepublishError::malformed("empty module path"));
    }
    let segments = path
        .segments
        .iter()
        .map(|s| lower_name(s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModulePath::new(path.ascent, segments))
}

fn lower_name(name: &str) -> Result<vesper_core::InternedString, RepublishError> {
    if name.is_empty() {
        return Err(RepublishError::malformed("empty name segment"));
    }
    Ok(intern(name))
}

// =============================================================================
// Tests
// =============================================================================
