//! The process-wide module registry.
//!
//! One registry instance owns every loaded module and maps root names to
//! handles. The path resolver and the visibility classifier take the
//! registry by reference, so both are testable against a registry built
//! up in a test instead of ambient global state.

use super::Module;
use rustc_hash::FxHashMap;
use tracing::debug;
use vesper_core::{InternedString, ModuleId, Value, intern};

/// Owner of all loaded modules.
///
/// Handles ([`ModuleId`]) are indices into the module table and stay
/// valid for the registry's lifetime; modules are never removed.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// All modules, indexed by `ModuleId`.
    modules: Vec<Module>,
    /// Root-level module name → handle.
    roots: FxHashMap<InternedString, ModuleId>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new root-level module.
    ///
    /// Redefining an existing root name returns the existing handle.
    pub fn define_root(&mut self, name: &str) -> ModuleId {
        let name = intern(name);
        if let Some(&id) = self.roots.get(&name) {
            return id;
        }
        let id = self.push(Module::new(name, None));
        self.roots.insert(name, id);
        debug!(module = %name, id = id.index(), "defined root module");
        id
    }

    /// Define a new module nested inside `parent`.
    ///
    /// The child's name is bound in the parent (as a module value), which
    /// is what makes it addressable in path expressions. Like every plain
    /// binding, the name starts out private in the parent.
    pub fn define_child(&mut self, parent: ModuleId, name: &str) -> ModuleId {
        let name = intern(name);
        let id = self.push(Module::new(name, Some(parent)));
        self.get_mut(parent).bind(name, Value::module(id));
        debug!(module = %name, parent = parent.index(), "defined child module");
        id
    }

    /// Look up a root-level module by name.
    #[inline]
    pub fn root(&self, name: InternedString) -> Option<ModuleId> {
        self.roots.get(&name).copied()
    }

    /// Borrow a module.
    ///
    /// Ids are minted by this registry and never invalidated, so a
    /// lookup cannot fail for an id obtained from it.
    #[inline]
    pub fn get(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// Mutably borrow a module.
    #[inline]
    pub fn get_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    /// Number of modules in the registry.
    #[inline]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Whether the registry holds no modules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Look up a member of a module that can be traversed to as a module:
    /// a binding holding a module value.
    #[inline]
    pub fn member_module(&self, of: ModuleId, name: InternedString) -> Option<ModuleId> {
        self.get(of).binding(name).and_then(Value::as_module)
    }

    /// Perform the wildcard-import half of a whole-module consumption.
    ///
    /// Binds the upstream module's own name to a module value in the
    /// consumer and materializes every upstream-exported name there.
    /// All bindings are absent-only: names the consumer already binds
    /// are left untouched. Exported names with no upstream binding yet
    /// (declared ahead of definition) are skipped.
    pub fn use_module(&mut self, consumer: ModuleId, upstream: ModuleId) {
        let up = self.get(upstream);
        let up_name = up.name();
        let exported: Vec<(InternedString, Value)> = up
            .exported_names()
            .filter_map(|name| up.binding(name).map(|value| (name, value)))
            .collect();

        debug!(
            consumer = %self.get(consumer).name(),
            upstream = %up_name,
            exported = exported.len(),
            "wildcard import"
        );

        let consumer_mod = self.get_mut(consumer);
        consumer_mod.bind_if_absent(up_name, Value::module(upstream));
        for (name, value) in exported {
            consumer_mod.bind_if_absent(name, value);
        }
    }

    fn push(&mut self, module: Module) -> ModuleId {
        let id = ModuleId::from_index(self.modules.len());
        self.modules.push(module);
        id
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_root_and_lookup() {
        let mut reg = ModuleRegistry::new();
        let id = reg.define_root("mathx");
        assert_eq!(reg.root(intern("mathx")), Some(id));
        assert_eq!(reg.get(id).name(), intern("mathx"));
        assert!(reg.get(id).parent().is_none());
    }

    #[test]
    fn test_define_root_is_idempotent() {
        let mut reg = ModuleRegistry::new();
        let a = reg.define_root("m");
        let b = reg.define_root("m");
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_define_child_binds_in_parent() {
        let mut reg = ModuleRegistry::new();
        let root = reg.define_root("pkg");
        let sub = reg.define_child(root, "sub");

        assert_eq!(reg.get(sub).parent(), Some(root));
        assert_eq!(reg.member_module(root, intern("sub")), Some(sub));
        // The child's name is an ordinary private binding in the parent.
        assert!(!reg.get(root).is_public(intern("sub")));
    }

    #[test]
    fn test_member_module_ignores_non_module_bindings() {
        let mut reg = ModuleRegistry::new();
        let root = reg.define_root("pkg");
        reg.get_mut(root).bind(intern("x"), Value::int(1));
        assert_eq!(reg.member_module(root, intern("x")), None);
        assert_eq!(reg.member_module(root, intern("missing")), None);
    }

    #[test]
    fn test_use_module_binds_name_and_exports() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        let down = reg.define_root("down");

        reg.get_mut(up).bind(intern("a"), Value::int(1));
        reg.get_mut(up).bind(intern("b"), Value::int(2));
        reg.get_mut(up).declare_exported([intern("a")]);

        reg.use_module(down, up);

        let down_mod = reg.get(down);
        // Module name and exported name are bound; non-exported is not.
        assert_eq!(down_mod.binding(intern("up")), Some(Value::module(up)));
        assert_eq!(down_mod.binding(intern("a")).unwrap().as_int(), Some(1));
        assert!(down_mod.binding(intern("b")).is_none());
    }

    #[test]
    fn test_use_module_keeps_existing_bindings() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        let down = reg.define_root("down");

        reg.get_mut(up).bind(intern("a"), Value::int(1));
        reg.get_mut(up).declare_exported([intern("a")]);
        reg.get_mut(down).bind(intern("a"), Value::int(42));

        reg.use_module(down, up);

        // The consumer's own binding is authoritative.
        assert_eq!(reg.get(down).binding(intern("a")).unwrap().as_int(), Some(42));
    }

    #[test]
    fn test_use_module_skips_unbound_exports() {
        let mut reg = ModuleRegistry::new();
        let up = reg.define_root("up");
        let down = reg.define_root("down");

        // Exported ahead of definition, never bound.
        reg.get_mut(up).declare_exported([intern("ghost")]);
        reg.use_module(down, up);

        assert!(!reg.get(down).is_bound(intern("ghost")));
    }
}
