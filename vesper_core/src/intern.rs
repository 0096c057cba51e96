//! Global string interning with O(1) hashing and comparison.
//!
//! Identifier strings (names, module paths, attribute keys) are interned
//! once into a process-wide table and handled as copyable `InternedString`
//! tokens afterwards. Two interned strings compare equal iff their text is
//! equal, and hashing an `InternedString` hashes a small integer key
//! instead of the string bytes.
//!
//! # Performance
//!
//! - Interning is a single lookup in a concurrent `ThreadedRodeo`
//! - Equality and hashing never touch the string contents
//! - `as_str` resolves against the static table, so the returned slice
//!   lives for the whole process

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;
use std::fmt;

/// Process-wide interner. Never torn down; interned strings are permanent.
static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::default);

/// A token for an interned string.
///
/// Copyable, comparable, and hashable in O(1). Resolve back to text with
/// [`InternedString::as_str`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternedString(Spur);

/// Intern a string, returning its token.
///
/// Interning the same text twice returns the same token.
#[inline]
pub fn intern(s: &str) -> InternedString {
    InternedString(INTERNER.get_or_intern(s))
}

impl InternedString {
    /// Resolve the token back to its string contents.
    #[inline]
    pub fn as_str(self) -> &'static str {
        INTERNER.resolve(&self.0)
    }
}

impl AsRef<str> for InternedString {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialOrd for InternedString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InternedString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_roundtrip() {
        let a = intern("hello");
        assert_eq!(a.as_str(), "hello");
    }

    #[test]
    fn test_intern_same_text_same_token() {
        let a = intern("module_name");
        let b = intern("module_name");
        assert_eq!(a, b);
    }

    #[test]
    fn test_intern_different_text_different_token() {
        let a = intern("alpha");
        let b = intern("beta");
        assert_ne!(a, b);
    }

    #[test]
    fn test_interned_ordering_is_textual() {
        let a = intern("aaa");
        let b = intern("bbb");
        assert!(a < b);
    }

    #[test]
    fn test_interned_display() {
        let a = intern("display_me");
        assert_eq!(format!("{}", a), "display_me");
        assert_eq!(format!("{:?}", a), "\"display_me\"");
    }

    #[test]
    fn test_intern_from_multiple_threads() {
        use std::thread;

        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| intern("shared_key")))
            .collect();

        let first = intern("shared_key");
        for handle in handles {
            assert_eq!(handle.join().unwrap(), first);
        }
    }
}
