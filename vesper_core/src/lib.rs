//! Core types shared across the Vesper runtime.
//!
//! This crate holds the foundational pieces every other runtime crate
//! builds on: the global string interner and the compact runtime `Value`
//! representation. It deliberately has no knowledge of the module system,
//! the compiler, or the interpreter — those consume these types.

pub mod intern;
pub mod value;

pub use intern::{InternedString, intern};
pub use value::{ModuleId, Value};
