//! Foundation types for layer stitching.
//!
//! This crate provides the identity and value types shared by every other
//! `lstitch` crate: spec paths, field keys and the typed value container.
//!
//! # Key Types
//!
//! - [`SpecPath`] — Structural path of a spec (`/World/Cube.size`)
//! - [`FieldKey`] — Case-sensitive field identifier; well-known names in [`keys`]
//! - [`Value`] / [`ValueKind`] — Typed field value and its structural kind
//! - [`Dictionary`] — String-keyed, recursively valued map
//! - [`TimeSamples`] / [`TimeCode`] — Time-indexed sample map with exact time keys
//! - [`ListOp`] — Opaque list-edit operation set

pub mod error;
pub mod field;
pub mod list_op;
pub mod path;
pub mod time;
pub mod value;

pub use error::TypeError;
pub use field::{keys, FieldKey};
pub use list_op::ListOp;
pub use path::SpecPath;
pub use time::{TimeCode, TimeSamples};
pub use value::{Dictionary, Value, ValueKind};
