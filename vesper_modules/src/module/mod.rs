//! Module namespace nodes and their visibility state.
//!
//! A [`Module`] is one node of the module tree: a binding table plus two
//! monotonically-growing visibility sets, `public` and `exported`, with
//! the invariant `exported ⊆ public`. A name in neither set is private.
//! The sets are only ever widened — visibility is never revoked.
//!
//! The conflict-safe declarators ([`Module::declare_public`] and
//! [`Module::declare_exported`]) are the only writers of the visibility
//! sets. Each filters out names whose target tier would conflict with an
//! existing declaration instead of failing: the first declaration for a
//! name is authoritative, later conflicting ones are dropped silently.

pub mod registry;

pub use registry::ModuleRegistry;

use crate::visibility::Visibility;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;
use vesper_core::{InternedString, ModuleId, Value};

// =============================================================================
// Module
// =============================================================================

/// A named namespace node in the module tree.
#[derive(Debug)]
pub struct Module {
    /// The module's own (unqualified) name.
    name: InternedString,
    /// Enclosing module; `None` for roots.
    parent: Option<ModuleId>,
    /// Name → value bindings, including names materialized by imports.
    bindings: FxHashMap<InternedString, Value>,
    /// Names visible via qualified access. Superset of `exported`.
    public: FxHashSet<InternedString>,
    /// Names additionally brought into scope by a wildcard import.
    exported: FxHashSet<InternedString>,
}

impl Module {
    pub(crate) fn new(name: InternedString, parent: Option<ModuleId>) -> Self {
        Self {
            name,
            parent,
            bindings: FxHashMap::default(),
            public: FxHashSet::default(),
            exported: FxHashSet::default(),
        }
    }

    /// The module's unqualified name.
    #[inline]
    pub fn name(&self) -> InternedString {
        self.name
    }

    /// The enclosing module, if any.
    #[inline]
    pub fn parent(&self) -> Option<ModuleId> {
        self.parent
    }

    // -------------------------------------------------------------------------
    // Bindings
    // -------------------------------------------------------------------------

    /// Bind a name to a value, overwriting any existing binding.
    #[inline]
    pub fn bind(&mut self, name: InternedString, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Bind a name only if it is not already bound.
    ///
    /// This is the materialization primitive of re-publication: a
    /// pre-existing local binding is authoritative and is kept.
    #[inline]
    pub fn bind_if_absent(&mut self, name: InternedString, value: Value) {
        self.bindings.entry(name).or_insert(value);
    }

    /// Look up a binding.
    #[inline]
    pub fn binding(&self, name: InternedString) -> Option<Value> {
        self.bindings.get(&name).copied()
    }

    /// Whether a name is bound in this module.
    #[inline]
    pub fn is_bound(&self, name: InternedString) -> bool {
        self.bindings.contains_key(&name)
    }

    /// All names bound in this module, in table order.
    pub fn binding_names(&self) -> impl Iterator<Item = InternedString> + '_ {
        self.bindings.keys().copied()
    }

    /// Number of bindings.
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the module has no bindings.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    // -------------------------------------------------------------------------
    // Visibility queries
    // -------------------------------------------------------------------------

    /// The recorded visibility tier of a name.
    #[inline]
    pub fn visibility_of(&self, name: InternedString) -> Visibility {
        if self.exported.contains(&name) {
            Visibility::Exported
        } else if self.public.contains(&name) {
            Visibility::Public
        } else {
            Visibility::Private
        }
    }

    /// Whether a name is public (includes exported names).
    #[inline]
    pub fn is_public(&self, name: InternedString) -> bool {
        self.public.contains(&name)
    }

    /// Whether a name is exported.
    #[inline]
    pub fn is_exported(&self, name: InternedString) -> bool {
        self.exported.contains(&name)
    }

    /// All exported names, in set order.
    pub fn exported_names(&self) -> impl Iterator<Item = InternedString> + '_ {
        self.exported.iter().copied()
    }

    /// All public names (exported ones included), in set order.
    pub fn public_names(&self) -> impl Iterator<Item = InternedString> + '_ {
        self.public.iter().copied()
    }

    // -------------------------------------------------------------------------
    // Conflict-safe declarators
    // -------------------------------------------------------------------------

    /// Declare a batch of names public.
    ///
    /// Names already exported are dropped: public-after-export is an
    /// illegal transition, and the earlier export declaration wins.
    /// Re-declaring an already-public name is a no-op.
    pub fn declare_public(&mut self, names: impl IntoIterator<Item = InternedString>) {
        let mut declared = 0usize;
        for name in names {
            if self.exported.contains(&name) {
                trace!(module = %self.name, %name, "skipping public declaration, already exported");
                continue;
            }
            if self.public.insert(name) {
                declared += 1;
            }
        }
        if declared > 0 {
            trace!(module = %self.name, declared, "declared public names");
        }
    }

    /// Declare a batch of names exported.
    ///
    /// Names already public but not exported are dropped: export-after-
    /// public is an illegal transition, and the earlier public declaration
    /// wins. Re-declaring an already-exported name is a no-op. Every name
    /// actually exported is also inserted into the public set, preserving
    /// `exported ⊆ public`.
    pub fn declare_exported(&mut self, names: impl IntoIterator<Item = InternedString>) {
        let mut declared = 0usize;
        for name in names {
            if self.public.contains(&name) && !self.exported.contains(&name) {
                trace!(module = %self.name, %name, "skipping export declaration, already public");
                continue;
            }
            if self.exported.insert(name) {
                self.public.insert(name);
                declared += 1;
            }
        }
        if declared > 0 {
            trace!(module = %self.name, declared, "declared exported names");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
