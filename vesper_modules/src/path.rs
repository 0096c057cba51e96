//! Module path expressions and their resolution.
//!
//! A path is either *absolute* — its first segment names a root-level
//! module — or *relative*, carrying one or more leading self/parent
//! markers: one marker means "the current module", each additional
//! marker ascends one enclosing module. In the dotted text rendering the
//! markers are leading dots (`.` is the current module, `..sib` is a
//! sibling inside the parent).
//!
//! Resolution walks already-loaded module structure only: each segment
//! after the anchor must be a member binding holding a module value. No
//! filesystem or network access, no side effects.
//!
//! # Performance
//!
//! - Single allocation for split components (SmallVec for ≤4 segments)
//! - Segments are interned once at parse/lowering time

use crate::error::RepublishError;
use crate::module::ModuleRegistry;
use smallvec::SmallVec;
use std::fmt;
use tracing::trace;
use vesper_core::{InternedString, ModuleId, intern};

/// A parsed module path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    /// 0 = absolute; 1 = anchored at the current module; each extra
    /// level ascends one parent before traversing `segments`.
    ascent: usize,
    /// Child-traversal segments after the anchor.
    segments: SmallVec<[InternedString; 4]>,
}

impl ModulePath {
    /// Build a path from pre-split components. No validation happens
    /// here; the clause-lowering layer rejects malformed shapes.
    pub fn new(ascent: usize, segments: impl IntoIterator<Item = InternedString>) -> Self {
        Self {
            ascent,
            segments: segments.into_iter().collect(),
        }
    }

    /// Parse a dotted path rendering.
    ///
    /// Leading dots are self/parent markers (`.` = current module,
    /// `..` = parent, ...). Returns `None` for the empty string or for
    /// empty interior segments (`a..b`, `a.`).
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let ascent = text.bytes().take_while(|&b| b == b'.').count();
        let rest = &text[ascent..];

        let mut segments = SmallVec::new();
        if !rest.is_empty() {
            for part in rest.split('.') {
                if part.is_empty() {
                    return None;
                }
                segments.push(intern(part));
            }
        }

        // An absolute path must actually name something.
        if ascent == 0 && segments.is_empty() {
            return None;
        }

        Some(Self { ascent, segments })
    }

    /// Number of self/parent markers; 0 for absolute paths.
    #[inline]
    pub fn ascent(&self) -> usize {
        self.ascent
    }

    /// Whether this path is anchored at the current module.
    #[inline]
    pub fn is_relative(&self) -> bool {
        self.ascent > 0
    }

    /// The traversal segments after the anchor.
    #[inline]
    pub fn segments(&self) -> &[InternedString] {
        &self.segments
    }

    /// The final segment, if any.
    #[inline]
    pub fn last(&self) -> Option<InternedString> {
        self.segments.last().copied()
    }

    /// Split off the final segment, yielding the owning-module prefix.
    ///
    /// Returns `None` if there are no segments to strip (a pure
    /// self/parent path denotes a module, not a member of one).
    pub fn split_last(&self) -> Option<(ModulePath, InternedString)> {
        let (&last, prefix) = self.segments.split_last()?;
        Some((
            ModulePath {
                ascent: self.ascent,
                segments: prefix.iter().copied().collect(),
            },
            last,
        ))
    }

    /// Resolve this path to a module handle.
    ///
    /// `origin` anchors relative paths; absolute paths ignore it. Pure
    /// lookup through the registry, fails fast on the first segment that
    /// does not resolve.
    pub fn resolve(
        &self,
        registry: &ModuleRegistry,
        origin: ModuleId,
    ) -> Result<ModuleId, RepublishError> {
        let mut rest: &[InternedString] = &self.segments;

        let mut current = if self.ascent == 0 {
            let first = match rest.split_first() {
                Some((&first, tail)) => {
                    rest = tail;
                    first
                }
                None => {
                    return Err(RepublishError::malformed("empty module path"));
                }
            };
            registry
                .root(first)
                .ok_or_else(|| RepublishError::unresolved(self.to_string(), first))?
        } else {
            let mut current = origin;
            for _ in 1..self.ascent {
                current = registry.get(current).parent().ok_or_else(|| {
                    RepublishError::AscentPastRoot {
                        path: self.to_string().into(),
                    }
                })?;
            }
            current
        };

        for &segment in rest {
            current = registry
                .member_module(current, segment)
                .ok_or_else(|| RepublishError::unresolved(self.to_string(), segment))?;
        }

        trace!(path = %self, resolved = %registry.get(current).name(), "resolved module path");
        Ok(current)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.ascent {
            f.write_str(".")?;
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_core::Value;

    // =========================================================================
    // Parse Tests
    // =========================================================================

    #[test]
    fn test_parse_absolute_simple() {
        let p = ModulePath::parse("mathx").unwrap();
        assert_eq!(p.ascent(), 0);
        assert!(!p.is_relative());
        assert_eq!(p.segments(), &[intern("mathx")]);
    }

    #[test]
    fn test_parse_absolute_dotted() {
        let p = ModulePath::parse("a.b.c").unwrap();
        assert_eq!(p.segments().len(), 3);
        assert_eq!(p.last(), Some(intern("c")));
    }

    #[test]
    fn test_parse_self_marker() {
        let p = ModulePath::parse(".").unwrap();
        assert_eq!(p.ascent(), 1);
        assert!(p.segments().is_empty());
    }

    #[test]
    fn test_parse_parent_with_segment() {
        let p = ModulePath::parse("..sibling").unwrap();
        assert_eq!(p.ascent(), 2);
        assert_eq!(p.segments(), &[intern("sibling")]);
    }

    #[test]
    fn test_parse_empty_is_none() {
        assert!(ModulePath::parse("").is_none());
    }

    #[test]
    fn test_parse_interior_empty_segment_is_none() {
        assert!(ModulePath::parse("a..b").is_none());
        assert!(ModulePath::parse("a.").is_none());
    }

    #[test]
    fn test_display_roundtrip() {
        for text in ["mathx", "a.b.c", ".", "..sib", "...deep.er"] {
            let p = ModulePath::parse(text).unwrap();
            assert_eq!(p.to_string(), text);
        }
    }

    #[test]
    fn test_split_last() {
        let p = ModulePath::parse("a.b.c").unwrap();
        let (prefix, last) = p.split_last().unwrap();
        assert_eq!(prefix, ModulePath::parse("a.b").unwrap());
        assert_eq!(last, intern("c"));

        assert!(ModulePath::parse(".").unwrap().split_last().is_none());
    }

    // =========================================================================
    // Resolve Tests
    // =========================================================================

    fn tree() -> (ModuleRegistry, ModuleId, ModuleId, ModuleId) {
        // root ── mid ── leaf
        let mut reg = ModuleRegistry::new();
        let root = reg.define_root("root");
        let mid = reg.define_child(root, "mid");
        let leaf = reg.define_child(mid, "leaf");
        (reg, root, mid, leaf)
    }

    #[test]
    fn test_resolve_absolute_root() {
        let (reg, root, _, _) = tree();
        let p = ModulePath::parse("root").unwrap();
        assert_eq!(p.resolve(&reg, root).unwrap(), root);
    }

    #[test]
    fn test_resolve_absolute_nested() {
        let (reg, root, _, leaf) = tree();
        let p = ModulePath::parse("root.mid.leaf").unwrap();
        assert_eq!(p.resolve(&reg, root).unwrap(), leaf);
    }

    #[test]
    fn test_resolve_self_is_origin() {
        let (reg, _, mid, _) = tree();
        let p = ModulePath::parse(".").unwrap();
        assert_eq!(p.resolve(&reg, mid).unwrap(), mid);
    }

    #[test]
    fn test_resolve_parent() {
        let (reg, root, mid, leaf) = tree();
        let p = ModulePath::parse("..").unwrap();
        assert_eq!(p.resolve(&reg, leaf).unwrap(), mid);
        assert_eq!(p.resolve(&reg, mid).unwrap(), root);
    }

    #[test]
    fn test_resolve_relative_child() {
        let (reg, _, mid, leaf) = tree();
        let p = ModulePath::parse(".leaf").unwrap();
        assert_eq!(p.resolve(&reg, mid).unwrap(), leaf);
    }

    #[test]
    fn test_resolve_ascends_past_root_fails() {
        let (reg, root, _, leaf) = tree();
        let p = ModulePath::parse("....").unwrap();
        let err = p.resolve(&reg, leaf).unwrap_err();
        assert!(matches!(err, RepublishError::AscentPastRoot { .. }));
        assert!(err.is_unresolved());

        let p = ModulePath::parse("..").unwrap();
        assert!(p.resolve(&reg, root).is_err());
    }

    #[test]
    fn test_resolve_unknown_root_fails() {
        let (reg, root, _, _) = tree();
        let p = ModulePath::parse("nope").unwrap();
        let err = p.resolve(&reg, root).unwrap_err();
        assert_eq!(err, RepublishError::unresolved("nope", intern("nope")));
    }

    #[test]
    fn test_resolve_error_names_failing_segment() {
        let (reg, root, _, _) = tree();
        let p = ModulePath::parse("root.mid.nope").unwrap();
        let err = p.resolve(&reg, root).unwrap_err();
        assert_eq!(err, RepublishError::unresolved("root.mid.nope", intern("nope")));
    }

    #[test]
    fn test_resolve_through_module_alias_binding() {
        let (mut reg, root, _, leaf) = tree();
        // root.shortcut aliases root.mid.leaf
        reg.get_mut(root).bind(intern("shortcut"), Value::module(leaf));
        let p = ModulePath::parse("root.shortcut").unwrap();
        assert_eq!(p.resolve(&reg, root).unwrap(), leaf);
    }

    #[test]
    fn test_resolve_non_module_binding_is_not_traversable() {
        let (mut reg, root, _, _) = tree();
        reg.get_mut(root).bind(intern("x"), Value::int(1));
        let p = ModulePath::parse("root.x").unwrap();
        assert!(p.resolve(&reg, root).is_err());
    }
}
