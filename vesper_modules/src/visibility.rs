//! Three-tier visibility and upstream classification.
//!
//! Visibility is a sum over {private, public, exported} with the
//! invariant that exported implies public. A module stores the two
//! non-private tiers as monotonically-growing sets (see
//! [`crate::module::Module`]); the enum here is the derived, per-name
//! view of that state.

use crate::module::ModuleRegistry;
use tracing::debug;
use vesper_core::{InternedString, ModuleId};

/// The visibility tier a module records for one of its names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    /// Invisible outside the defining module.
    Private,
    /// Visible via qualified (module-prefixed) access only.
    Public,
    /// Visible via qualified access and brought into unqualified scope
    /// by a wildcard import. Implies public.
    Exported,
}

impl Visibility {
    /// Whether this tier makes the name reachable from outside at all.
    #[inline]
    pub fn is_visible(self) -> bool {
        self != Visibility::Private
    }

    /// Whether this tier participates in wildcard imports.
    #[inline]
    pub fn is_exported(self) -> bool {
        self == Visibility::Exported
    }
}

/// Partition of an upstream module's bound names by visibility tier.
///
/// The two sets are disjoint; implicitly-private names appear in
/// neither and are never republished.
#[derive(Debug, Default, Clone)]
pub struct Classified {
    /// Names the upstream module itself exports.
    pub exported: Vec<InternedString>,
    /// Names the upstream module marks public but does not export.
    pub public_only: Vec<InternedString>,
}

impl Classified {
    /// Total number of republishable names.
    #[inline]
    pub fn len(&self) -> usize {
        self.exported.len() + self.public_only.len()
    }

    /// Whether nothing is republishable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exported.is_empty() && self.public_only.is_empty()
    }
}

/// Classify every name bound in `upstream` by its recorded tier.
///
/// Enumerates the full binding table — names the upstream module
/// materialized through its own imports included — and reads the
/// module's own visibility sets for each. Read-only; the upstream
/// module is not touched.
pub fn classify(registry: &ModuleRegistry, upstream: ModuleId) -> Classified {
    let module = registry.get(upstream);
    let mut classified = Classified::default();

    for name in module.binding_names() {
        match module.visibility_of(name) {
            Visibility::Exported => classified.exported.push(name),
            Visibility::Public => classified.public_only.push(name),
            Visibility::Private => {}
        }
    }

    debug!(
        upstream = %module.name(),
        exported = classified.exported.len(),
        public_only = classified.public_only.len(),
        "classified upstream visibility"
    );
    classified
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;
    use vesper_core::{Value, intern};

    fn names(v: &[InternedString]) -> FxHashSet<InternedString> {
        v.iter().copied().collect()
    }

    #[test]
    fn test_visibility_ordering_and_predicates() {
        assert!(Visibility::Private < Visibility::Public);
        assert!(Visibility::Public < Visibility::Exported);
        assert!(!Visibility::Private.is_visible());
        assert!(Visibility::Public.is_visible());
        assert!(Visibility::Exported.is_exported());
        assert!(!Visibility::Public.is_exported());
    }

    #[test]
    fn test_classify_partitions_by_tier() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        let m = reg.get_mut(up);
        m.bind(intern("a"), Value::int(1));
        m.bind(intern("b"), Value::int(2));
        m.bind(intern("c"), Value::int(3));
        m.declare_exported([intern("a")]);
        m.declare_public([intern("b")]);

        let cls = classify(&reg, up);
        assert_eq!(names(&cls.exported), names(&[intern("a")]));
        assert_eq!(names(&cls.public_only), names(&[intern("b")]));
        assert_eq!(cls.len(), 2);
    }

    #[test]
    fn test_classify_skips_private_names() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        reg.get_mut(up).bind(intern("hidden"), Value::int(9));

        let cls = classify(&reg, up);
        assert!(cls.is_empty());
    }

    #[test]
    fn test_classify_skips_unbound_declarations() {
        // A tier declared ahead of any binding is not yet republishable.
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        reg.get_mut(up).declare_exported([intern("ghost")]);

        let cls = classify(&reg, up);
        assert!(cls.is_empty());
    }

    #[test]
    fn test_classify_includes_transitively_imported_names() {
        let mut reg = ModuleRegistry::new();
        let base = reg.define_root("base");
        let mid = reg.define_root("mid");

        reg.get_mut(base).bind(intern("x"), Value::int(5));
        reg.get_mut(base).declare_exported([intern("x")]);

        // mid pulls x in via a wildcard import and re-exports it.
        reg.use_module(mid, base);
        reg.get_mut(mid).declare_exported([intern("x")]);

        let cls = classify(&reg, mid);
        assert!(names(&cls.exported).contains(&intern("x")));
    }

    #[test]
    fn test_classify_is_read_only() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        reg.get_mut(up).bind(intern("a"), Value::int(1));
        reg.get_mut(up).declare_public([intern("a")]);

        let before = reg.get(up).len();
        let _ = classify(&reg, up);
        assert_eq!(reg.get(up).len(), before);
        assert_eq!(reg.get(up).visibility_of(intern("a")), Visibility::Public);
    }
}
