//! Layer storage for stitching.
//!
//! A layer is a tree of specs rooted at a pseudo-root. Every spec is
//! identified by its [`SpecPath`](lstitch_types::SpecPath), carries a set of
//! typed fields, and lists its children in declaration order.
//!
//! # Spec Types
//!
//! - [`SpecType::PseudoRoot`] -- the layer root; holds layer-level metadata
//! - [`SpecType::Prim`] -- a hierarchy element
//! - [`SpecType::Attribute`] / [`SpecType::Relationship`] -- properties of a prim
//!
//! # Backends
//!
//! All backends implement the [`LayerData`] trait:
//!
//! - [`MemoryLayer`] -- `HashMap`-based layer with JSON document load/save
//!
//! # Design Rules
//!
//! 1. The pseudo-root always exists.
//! 2. A spec's parent always exists and lists it among its children.
//! 3. Child order is declaration order; field order is irrelevant.
//! 4. Accessing a missing spec is an error, never silently ignored.

pub mod document;
pub mod error;
pub mod memory;
pub mod spec;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use document::to_json_string;
pub use error::{LayerError, LayerResult};
pub use memory::MemoryLayer;
pub use spec::SpecType;
pub use traits::LayerData;
