//! Strong-over-weak layer stitching.
//!
//! Merges a weak layer into a strong one in place. On any conflict the strong
//! layer wins and the weak layer only fills gaps, except for three kinds of
//! field that always combine: frame bounds (`min`/`max`), dictionaries
//! (key-wise join) and time-sample maps (per-time join).
//!
//! # Key Types
//!
//! - [`Stitcher`] -- recursive tree walk; [`stitch_layers`] / [`stitch_info`] shortcuts
//! - [`Reconciler`] / [`Decision`] / [`MergePolicy`] -- per-field value reconciliation
//! - [`StitchValueFn`] / [`StitchValueStatus`] / [`StitchValueContext`] -- override hook
//! - [`StitchConfig`] -- frame-bounds field names
//!
//! # Quick Start
//!
//! ```rust
//! use lstitch_layer::{LayerData, MemoryLayer};
//! use lstitch_merge::stitch_layers;
//! use lstitch_types::{keys, SpecPath, Value};
//!
//! let root = SpecPath::absolute_root();
//! let mut strong = MemoryLayer::new("strong");
//! strong.set_field(&root, keys::START_TIME_CODE, Value::Double(10.0)).unwrap();
//! let mut weak = MemoryLayer::new("weak");
//! weak.set_field(&root, keys::START_TIME_CODE, Value::Double(5.0)).unwrap();
//! weak.define_prim("/World").unwrap();
//!
//! stitch_layers(&mut strong, &weak).unwrap();
//! assert_eq!(
//!     strong.field(&root, &keys::START_TIME_CODE).unwrap(),
//!     Some(&Value::Double(5.0))
//! );
//! assert!(strong.has_spec(&SpecPath::parse("/World").unwrap()));
//! ```

pub mod config;
pub mod error;
pub mod reconcile;
pub mod stitch;
pub mod value_fn;

pub use config::{FrameBound, StitchConfig};
pub use error::{StitchError, StitchResult};
pub use reconcile::{join_dictionaries, join_time_samples, Decision, MergePolicy, Reconciler};
pub use stitch::{stitch_info, stitch_info_with, stitch_layers, stitch_layers_with, Stitcher};
pub use value_fn::{StitchValueContext, StitchValueFn, StitchValueStatus};
