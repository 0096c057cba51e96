//! Vesper's module system: the module tree, three-tier symbol visibility,
//! and the re-publication engine.
//!
//! A module binds names to values and records, for each name, one of
//! three visibility tiers: *private* (invisible outside the module),
//! *public* (reachable via qualified `Module.name` access only), and
//! *exported* (additionally brought into scope by a wildcard import;
//! every exported name is also public). Re-publication lets a consuming
//! module re-expose symbols of an upstream module under its own tiers.
//!
//! # Architecture
//!
//! ```text
//! republish(registry, consumer, clause, policy)
//!   ├── clause        (five clause shapes, lowered from host syntax)
//!   ├── path          (absolute / self-or-parent-relative resolution)
//!   ├── visibility    (classify upstream names: exported / public-only)
//!   └── module        (registry, bindings, conflict-safe declarations)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ModuleRegistry::new();
//! let upstream = registry.define_root("mathx");
//! let consumer = registry.define_root("app");
//! let clause = Clause::Modules(vec![ModulePath::parse("mathx").unwrap()]);
//! republish(&mut registry, consumer, &clause, Policy { reexport: true })?;
//! ```

pub mod clause;
pub mod error;
pub mod module;
pub mod path;
pub mod republish;
pub mod visibility;


pub use clause::{Clause, ClauseEntry, ClauseNode, EntryNode, ImportEntry, NodeKind, PathNode};
pub use error::RepublishError;
pub use module::{Module, ModuleRegistry};
pub use path::ModulePath;
pub use republish::{Policy, republish};
pub use vesper_core::{InternedString, ModuleId, Value, intern};
pub use visibility::{Classified, Visibility, classify};
