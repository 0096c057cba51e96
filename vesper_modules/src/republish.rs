//! The re-publication orchestrator.
//!
//! Entry point of the engine: dispatches over the shape of a dependency
//! clause and drives path resolution, visibility classification, binding
//! materialization, and conflict-safe declaration against the consuming
//! module. The policy is fixed per top-level invocation; sub-clauses of
//! a block cannot override it.
//!
//! Structural failures (unresolved paths, malformed clauses) abort the
//! clause immediately. Visibility conflicts never fail: a prior
//! declaration for a name — whether made by the consumer ahead of time
//! or by an earlier republication — is authoritative and later
//! conflicting declarations are silently dropped.

use crate::clause::{Clause, ClauseEntry, ImportEntry, split_aliases};
use crate::error::RepublishError;
use crate::module::ModuleRegistry;
use crate::visibility::classify;
use tracing::debug;
use vesper_core::{InternedString, ModuleId, Value};

// =============================================================================
// Policy
// =============================================================================

/// Re-export policy for one republication invocation.
///
/// With `reexport` unset (the default) every republished name becomes
/// public in the consumer. With it set, names exported upstream are
/// re-exported and the rest become public.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Whether upstream-exported names are re-exported rather than
    /// merely made public.
    pub reexport: bool,
}

impl Policy {
    /// The default "make everything public" policy.
    pub const PUBLIC: Policy = Policy { reexport: false };
    /// The re-exporting policy.
    pub const REEXPORT: Policy = Policy { reexport: true };
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Apply one dependency clause to the consuming module.
///
/// Resolves upstream modules, materializes any missing local bindings,
/// and emits visibility declarations per `policy`. Fails fast on the
/// first unresolved path; visibility conflicts degrade gracefully (see
/// module docs).
pub fn republish(
    registry: &mut ModuleRegistry,
    consumer: ModuleId,
    clause: &Clause,
    policy: Policy,
) -> Result<(), RepublishError> {
    match clause {
        Clause::Block(clauses) => {
            for sub in clauses {
                republish(registry, consumer, sub, policy)?;
            }
            Ok(())
        }

        Clause::ModuleDef { name } => {
            // The host has already defined the nested module as a child
            // of the consumer; its introduction counts as a whole-module
            // consumption of itself.
            let nested = registry
                .member_module(consumer, *name)
                .ok_or_else(|| RepublishError::unresolved(name.as_str(), *name))?;
            republish_module(registry, consumer, nested, policy);
            Ok(())
        }

        Clause::Modules(paths) => {
            for path in paths {
                let upstream = path.resolve(registry, consumer)?;
                republish_module(registry, consumer, upstream, policy);
            }
            Ok(())
        }

        Clause::Names { path, entries } => {
            let upstream = path.resolve(registry, consumer)?;
            republish_names(registry, consumer, upstream, entries, policy, &path.to_string())
        }

        Clause::Imports(entries) => {
            for entry in entries {
                republish_import(registry, consumer, entry, policy)?;
            }
            Ok(())
        }
    }
}

/// Whole-module republication: wildcard-import the upstream module,
/// classify its names, materialize public-only bindings, declare.
fn republish_module(
    registry: &mut ModuleRegistry,
    consumer: ModuleId,
    upstream: ModuleId,
    policy: Policy,
) {
    debug!(
        consumer = %registry.get(consumer).name(),
        upstream = %registry.get(upstream).name(),
        reexport = policy.reexport,
        "republishing whole module"
    );

    // The underlying whole-module import makes exported names (and the
    // module's own name) locally reachable.
    registry.use_module(consumer, upstream);

    let classified = classify(registry, upstream);

    // Public-only names are not touched by the wildcard import, so each
    // needs a local binding before its visibility can be declared. The
    // names came out of the upstream binding table, so the lookups here
    // cannot miss.
    let upstream_mod = registry.get(upstream);
    let materialize: Vec<(InternedString, Value)> = classified
        .public_only
        .iter()
        .filter_map(|&name| upstream_mod.binding(name).map(|value| (name, value)))
        .collect();

    let consumer_mod = registry.get_mut(consumer);
    for (name, value) in materialize {
        consumer_mod.bind_if_absent(name, value);
    }

    if policy.reexport {
        consumer_mod.declare_exported(classified.exported);
        consumer_mod.declare_public(classified.public_only);
    } else {
        consumer_mod.declare_public(
            classified
                .exported
                .into_iter()
                .chain(classified.public_only),
        );
    }
}

/// Symbol-list republication: per (original, local) pair, materialize
/// the local binding and pick the target tier.
fn republish_names(
    registry: &mut ModuleRegistry,
    consumer: ModuleId,
    upstream: ModuleId,
    entries: &[ClauseEntry],
    policy: Policy,
    upstream_path: &str,
) -> Result<(), RepublishError> {
    let (originals, locals) = split_aliases(entries);

    let mut to_export = Vec::new();
    let mut to_public = Vec::new();
    let mut materialize = Vec::with_capacity(entries.len());
    {
        let upstream_mod = registry.get(upstream);
        for (&original, &local) in originals.iter().zip(&locals) {
            let value = upstream_mod.binding(original).ok_or_else(|| {
                RepublishError::unresolved(member_path(upstream_path, original), original)
            })?;
            materialize.push((local, value));
            if policy.reexport && upstream_mod.is_exported(original) {
                to_export.push(local);
            } else {
                to_public.push(local);
            }
        }
    }

    debug!(
        consumer = %registry.get(consumer).name(),
        upstream = %upstream_path,
        symbols = entries.len(),
        "republishing symbol list"
    );

    let consumer_mod = registry.get_mut(consumer);
    for (local, value) in materialize {
        consumer_mod.bind_if_absent(local, value);
    }
    consumer_mod.declare_exported(to_export);
    consumer_mod.declare_public(to_public);
    Ok(())
}

/// Dotted-import republication: module aliases bind the module value
/// directly, anything else delegates to the per-symbol logic.
fn republish_import(
    registry: &mut ModuleRegistry,
    consumer: ModuleId,
    entry: &ImportEntry,
    policy: Policy,
) -> Result<(), RepublishError> {
    let (prefix, last) = entry.path.split_last().ok_or_else(|| {
        RepublishError::malformed("import entry names neither a symbol nor a module")
    })?;

    if prefix.ascent() == 0 && prefix.segments().is_empty() {
        // `import M [as N]`: the path denotes a module itself, so the
        // local name is declared directly as a module binding.
        let module = entry.path.resolve(registry, consumer)?;
        let local = entry.alias.unwrap_or(last);
        debug!(
            consumer = %registry.get(consumer).name(),
            module = %registry.get(module).name(),
            local = %local,
            "republishing module alias"
        );
        let consumer_mod = registry.get_mut(consumer);
        consumer_mod.bind_if_absent(local, Value::module(module));
        if policy.reexport {
            consumer_mod.declare_exported([local]);
        } else {
            consumer_mod.declare_public([local]);
        }
        return Ok(());
    }

    let owner = prefix.resolve(registry, consumer)?;
    let entry = match entry.alias {
        Some(alias) => ClauseEntry::aliased(last, alias),
        None => ClauseEntry::bare(last),
    };
    republish_names(registry, consumer, owner, &[entry], policy, &prefix.to_string())
}

/// Render `path.name` for error messages, handling marker-only paths
/// (`.` + `x` → `.x`).
fn member_path(path: &str, name: InternedString) -> String {
    let mut rendered = String::with_capacity(path.len() + name.as_str().len() + 1);
    rendered.push_str(path);
    if !rendered.ends_with('.') {
        rendered.push('.');
    }
    rendered.push_str(name.as_str());
    rendered
}

// =============================================================================
// Tests
// =============================================================================
