//! Compact runtime value representation.
//!
//! `Value` is the currency of module bindings: every name bound in a
//! module maps to one. It is a small `Copy` enum rather than a heap
//! object, so binding tables can store values inline and hand out copies
//! without reference counting.

use crate::intern::InternedString;
use std::fmt;

// =============================================================================
// ModuleId
// =============================================================================

/// Handle to a module in the runtime's module registry.
///
/// Core stores this opaquely inside [`Value::Module`]; only the module
/// registry mints ids and maps them back to modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Construct an id from a registry slot index.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        ModuleId(index as u32)
    }

    /// The registry slot index this id refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Value
// =============================================================================

/// A runtime value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// The unit/absent value.
    None,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Interned string.
    Str(InternedString),
    /// Reference to a module.
    Module(ModuleId),
}

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    /// Create a boolean value.
    #[inline]
    pub fn bool(v: bool) -> Self {
        Value::Bool(v)
    }

    /// Create a float value.
    #[inline]
    pub fn float(v: f64) -> Self {
        Value::Float(v)
    }

    /// Create an interned-string value.
    #[inline]
    pub fn string(s: InternedString) -> Self {
        Value::Str(s)
    }

    /// Create a module-reference value.
    #[inline]
    pub fn module(id: ModuleId) -> Self {
        Value::Module(id)
    }

    /// Extract an integer, if this is one.
    #[inline]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Extract a boolean, if this is one.
    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Extract a float, if this is one.
    #[inline]
    pub fn as_float(self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the interned string, if this is one.
    #[inline]
    pub fn as_str(self) -> Option<InternedString> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the module handle, if this is a module reference.
    #[inline]
    pub fn as_module(self) -> Option<ModuleId> {
        match self {
            Value::Module(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this value is a module reference.
    #[inline]
    pub fn is_module(self) -> bool {
        matches!(self, Value::Module(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("none"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Module(id) => write!(f, "<module #{}>", id.index()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern::intern;

    #[test]
    fn test_value_int_roundtrip() {
        let v = Value::int(42);
        assert_eq!(v.as_int(), Some(42));
        assert_eq!(v.as_bool(), None);
    }

    #[test]
    fn test_value_bool_roundtrip() {
        assert_eq!(Value::bool(true).as_bool(), Some(true));
        assert_eq!(Value::bool(false).as_bool(), Some(false));
    }

    #[test]
    fn test_value_str_equality() {
        let a = Value::string(intern("x"));
        let b = Value::string(intern("x"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_module_handle() {
        let id = ModuleId::from_index(3);
        let v = Value::module(id);
        assert!(v.is_module());
        assert_eq!(v.as_module(), Some(id));
        assert_eq!(id.index(), 3);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::int(7)), "7");
        assert_eq!(format!("{}", Value::None), "none");
        assert_eq!(format!("{}", Value::module(ModuleId::from_index(2))), "<module #2>");
    }
}
