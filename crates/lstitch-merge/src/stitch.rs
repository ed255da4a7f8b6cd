//! Recursive strong-over-weak stitching of two layers.
//!
//! The walk starts at the pseudo-root and visits matched specs depth-first:
//!
//! ```text
//! (pseudoroot)          (pseudoroot)            (pseudoroot)
//! |                     |                       |
//! |___(def "foo")   +   |___(def "foo")    =>   |___(def "foo")
//!     |_ {101: a}       |   |_ {102: b}             |_ {101: a, 102: b}
//!                       |___(def "bar")         |___(def "bar")
//! ```
//!
//! At each matched spec every field from either side is reconciled, then the
//! weak children are visited: a child the strong layer also has is recursed
//! into, a child it lacks is deep-copied. Strong-only children are left
//! alone. Field and child lists are snapshotted before any mutation, and the
//! strong layer is never read back as if it were the weak one.

use indexmap::IndexSet;
use tracing::{debug, trace};

use lstitch_layer::LayerData;
use lstitch_types::{FieldKey, SpecPath};

use crate::config::StitchConfig;
use crate::error::{StitchError, StitchResult};
use crate::reconcile::{Decision, Reconciler};
use crate::value_fn::StitchValueFn;

/// Counters gathered during one walk, reported through `tracing`.
#[derive(Debug, Default)]
struct StitchStats {
    specs_visited: usize,
    specs_copied: usize,
    fields_written: usize,
    fields_removed: usize,
}

/// Stitches a weak layer into a strong layer.
///
/// A `Stitcher` holds its configuration and an optional value hook for the
/// calls made through it; nothing is shared between stitchers.
pub struct Stitcher<'a> {
    config: StitchConfig,
    value_fn: Option<&'a dyn StitchValueFn>,
}

impl<'a> Stitcher<'a> {
    pub fn new(config: StitchConfig) -> Self {
        Self {
            config,
            value_fn: None,
        }
    }

    /// Customize field stitching with `value_fn`.
    pub fn with_value_fn(mut self, value_fn: &'a dyn StitchValueFn) -> Self {
        self.value_fn = Some(value_fn);
        self
    }

    /// Merge `weak` into `strong`, recursing from the pseudo-root.
    ///
    /// Layer-level metadata on the pseudo-root is reconciled like any other
    /// spec's fields. On error the walk stops and `strong` keeps whatever
    /// was merged so far.
    pub fn stitch_layers(&self, strong: &mut dyn LayerData, weak: &dyn LayerData) -> StitchResult<()> {
        self.config.validate()?;
        debug!(
            strong = strong.identifier(),
            weak = weak.identifier(),
            "stitching layers"
        );

        let reconciler = Reconciler::new(&self.config, self.value_fn);
        let mut stats = StitchStats::default();
        self.stitch_spec(&reconciler, strong, weak, &SpecPath::absolute_root(), &mut stats)?;

        debug!(
            visited = stats.specs_visited,
            copied = stats.specs_copied,
            written = stats.fields_written,
            removed = stats.fields_removed,
            "stitch complete"
        );
        Ok(())
    }

    /// Reconcile only the fields of the spec at `path`; children are not
    /// visited.
    ///
    /// Both layers must have a spec at `path`.
    pub fn stitch_info(
        &self,
        strong: &mut dyn LayerData,
        weak: &dyn LayerData,
        path: &SpecPath,
    ) -> StitchResult<()> {
        self.config.validate()?;
        for layer in [&*strong, weak] {
            if !layer.has_spec(path) {
                return Err(StitchError::SpecNotFound {
                    layer: layer.identifier().to_string(),
                    path: path.clone(),
                });
            }
        }

        let reconciler = Reconciler::new(&self.config, self.value_fn);
        let mut stats = StitchStats::default();
        self.stitch_fields(&reconciler, strong, weak, path, &mut stats)?;
        debug!(
            %path,
            written = stats.fields_written,
            removed = stats.fields_removed,
            "stitched spec info"
        );
        Ok(())
    }

    fn stitch_spec(
        &self,
        reconciler: &Reconciler<'_>,
        strong: &mut dyn LayerData,
        weak: &dyn LayerData,
        path: &SpecPath,
        stats: &mut StitchStats,
    ) -> StitchResult<()> {
        stats.specs_visited += 1;
        self.stitch_fields(reconciler, strong, weak, path, stats)?;

        for child in weak.children(path)? {
            if !strong.has_spec(&child) {
                strong.copy_spec(weak, &child)?;
                stats.specs_copied += 1;
                debug!(path = %child, "copied weak-only spec");
                continue;
            }

            let (strong_type, weak_type) = (strong.spec_type(&child)?, weak.spec_type(&child)?);
            if strong_type != weak_type {
                debug!(
                    path = %child,
                    strong = %strong_type,
                    weak = %weak_type,
                    "spec types differ; keeping strong spec"
                );
                continue;
            }
            self.stitch_spec(reconciler, strong, weak, &child, stats)?;
        }
        Ok(())
    }

    fn stitch_fields(
        &self,
        reconciler: &Reconciler<'_>,
        strong: &mut dyn LayerData,
        weak: &dyn LayerData,
        path: &SpecPath,
        stats: &mut StitchStats,
    ) -> StitchResult<()> {
        let mut fields: IndexSet<FieldKey> = strong.list_fields(path)?.into_iter().collect();
        fields.extend(weak.list_fields(path)?);

        for field in fields {
            match reconciler.reconcile(&field, path, &*strong, weak)? {
                Decision::NoValue => {}
                Decision::Write(value) => {
                    trace!(%path, %field, kind = %value.kind(), "writing field");
                    strong.set_field(path, field, value)?;
                    stats.fields_written += 1;
                }
                Decision::Remove => {
                    trace!(%path, %field, "removing field");
                    strong.erase_field(path, &field)?;
                    stats.fields_removed += 1;
                }
            }
        }
        Ok(())
    }
}

impl Default for Stitcher<'_> {
    fn default() -> Self {
        Self::new(StitchConfig::default())
    }
}

/// Merge `weak` into `strong` with the default policy.
pub fn stitch_layers(strong: &mut dyn LayerData, weak: &dyn LayerData) -> StitchResult<()> {
    Stitcher::default().stitch_layers(strong, weak)
}

/// Merge `weak` into `strong`, consulting `value_fn` for every field.
pub fn stitch_layers_with(
    strong: &mut dyn LayerData,
    weak: &dyn LayerData,
    value_fn: &dyn StitchValueFn,
) -> StitchResult<()> {
    Stitcher::default().with_value_fn(value_fn).stitch_layers(strong, weak)
}

/// Reconcile the fields of the spec at `path` with the default policy.
pub fn stitch_info(
    strong: &mut dyn LayerData,
    weak: &dyn LayerData,
    path: &SpecPath,
) -> StitchResult<()> {
    Stitcher::default().stitch_info(strong, weak, path)
}

/// Reconcile the fields of the spec at `path`, consulting `value_fn`.
pub fn stitch_info_with(
    strong: &mut dyn LayerData,
    weak: &dyn LayerData,
    path: &SpecPath,
    value_fn: &dyn StitchValueFn,
) -> StitchResult<()> {
    Stitcher::default().with_value_fn(value_fn).stitch_info(strong, weak, path)
}
