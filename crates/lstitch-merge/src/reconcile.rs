//! Field-level value reconciliation between a strong and a weak spec.
//!
//! The default policy is "strong wins, weak fills gaps", with three
//! structural exceptions selected by [`MergePolicy`]:
//!
//! - frame-bounds fields reduce with `min`/`max`,
//! - dictionaries join key-wise (recursively, strong keys win),
//! - time-sample maps join per exact time code (strong samples win).
//!
//! Everything else, list-edit operations included, is an opaque unit.

use std::cmp::Ordering;

use tracing::warn;

use lstitch_layer::LayerData;
use lstitch_types::{Dictionary, FieldKey, SpecPath, TimeSamples, Value, ValueKind};

use crate::config::{FrameBound, StitchConfig};
use crate::error::StitchResult;
use crate::value_fn::{StitchValueContext, StitchValueFn, StitchValueStatus};

/// What the stitcher should do with one field of the strong spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// Leave the field untouched.
    NoValue,
    /// Set the field to this value.
    Write(Value),
    /// Remove the field.
    Remove,
}

/// Merge rule chosen for a field defined on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergePolicy {
    /// Reduce a numeric frame bound.
    Reduce(FrameBound),
    /// Key-wise dictionary join.
    JoinDictionary,
    /// Per-time sample join.
    JoinTimeSamples,
    /// Keep the strong value.
    StrongWins,
}

impl MergePolicy {
    /// Select the policy for `field` whose declared kind is `kind`.
    pub fn select(config: &StitchConfig, field: &FieldKey, kind: ValueKind) -> Self {
        if let Some(bound) = config.frame_bound(field) {
            return Self::Reduce(bound);
        }
        match kind {
            ValueKind::Dictionary => Self::JoinDictionary,
            ValueKind::TimeSamples => Self::JoinTimeSamples,
            ValueKind::Scalar | ValueKind::ListOp => Self::StrongWins,
        }
    }
}

/// Decides, field by field, how a weak spec's values combine into the
/// strong spec.
pub struct Reconciler<'a> {
    config: &'a StitchConfig,
    value_fn: Option<&'a dyn StitchValueFn>,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a StitchConfig, value_fn: Option<&'a dyn StitchValueFn>) -> Self {
        Self { config, value_fn }
    }

    /// Reconcile `field` of the spec at `path` in both layers.
    ///
    /// The override hook, when present, runs first; the default policy
    /// applies when there is no hook, when it returns
    /// [`StitchValueStatus::UseDefaultValue`], or when it supplies a value
    /// of the wrong kind.
    pub fn reconcile(
        &self,
        field: &FieldKey,
        path: &SpecPath,
        strong: &dyn LayerData,
        weak: &dyn LayerData,
    ) -> StitchResult<Decision> {
        let strong_value = strong.field(path, field)?;
        let weak_value = weak.field(path, field)?;

        if let Some(value_fn) = self.value_fn {
            let ctx = StitchValueContext {
                field,
                path,
                strong_layer: strong,
                field_in_strong: strong_value.is_some(),
                weak_layer: weak,
                field_in_weak: weak_value.is_some(),
            };
            let mut stitched = None;
            match value_fn.stitch_value(&ctx, &mut stitched) {
                StitchValueStatus::NoStitchedValue => return Ok(Decision::NoValue),
                StitchValueStatus::UseDefaultValue => {}
                StitchValueStatus::UseSuppliedValue => match stitched {
                    None if strong_value.is_some() => return Ok(Decision::Remove),
                    None => return Ok(Decision::NoValue),
                    Some(value) => {
                        let declared = strong_value.or(weak_value).map(Value::kind);
                        match declared {
                            Some(kind) if kind != value.kind() => {
                                warn!(
                                    %field,
                                    %path,
                                    expected = %kind,
                                    supplied = %value.kind(),
                                    "supplied value has the wrong kind; using default policy"
                                );
                            }
                            _ => return Ok(Decision::Write(value)),
                        }
                    }
                },
            }
        }

        Ok(self.default_decision(field, strong_value, weak_value))
    }

    /// Apply the default policy to a pair of (possibly absent) values.
    pub fn default_decision(
        &self,
        field: &FieldKey,
        strong: Option<&Value>,
        weak: Option<&Value>,
    ) -> Decision {
        let (strong, weak) = match (strong, weak) {
            (_, None) => return Decision::NoValue,
            (None, Some(weak)) => return Decision::Write(weak.clone()),
            (Some(strong), Some(weak)) => (strong, weak),
        };

        let merged = match MergePolicy::select(self.config, field, strong.kind()) {
            MergePolicy::Reduce(bound) => reduce_bound(bound, strong, weak),
            MergePolicy::JoinDictionary => match (strong, weak) {
                (Value::Dictionary(s), Value::Dictionary(w)) => {
                    Some(Value::Dictionary(join_dictionaries(s, w)))
                }
                _ => None,
            },
            MergePolicy::JoinTimeSamples => match (strong, weak) {
                (Value::TimeSamples(s), Value::TimeSamples(w)) => {
                    Some(Value::TimeSamples(join_time_samples(s, w)))
                }
                _ => None,
            },
            MergePolicy::StrongWins => None,
        };

        match merged {
            Some(value) if value != *strong => Decision::Write(value),
            _ => Decision::NoValue,
        }
    }
}

/// Join two dictionaries key-wise.
///
/// Keys present in `strong` keep strong's value, recursing where both sides
/// hold a nested dictionary. Keys only in `weak` are copied in.
pub fn join_dictionaries(strong: &Dictionary, weak: &Dictionary) -> Dictionary {
    let mut joined = strong.clone();
    for (key, weak_value) in weak {
        match joined.get_mut(key) {
            Some(Value::Dictionary(strong_dict)) => {
                if let Value::Dictionary(weak_dict) = weak_value {
                    *strong_dict = join_dictionaries(strong_dict, weak_dict);
                }
            }
            Some(_) => {}
            None => {
                joined.insert(key.clone(), weak_value.clone());
            }
        }
    }
    joined
}

/// Join two sample maps by exact time code; strong samples win.
pub fn join_time_samples(strong: &TimeSamples, weak: &TimeSamples) -> TimeSamples {
    let mut joined = strong.clone();
    for (time, value) in weak {
        joined.insert_if_absent(*time, value);
    }
    joined
}

/// Reduce a frame bound over both sides.
///
/// Returns `None` when either side is not numeric (or NaN), leaving strong's
/// value. The winning value keeps its own representation (`Int` or `Double`).
fn reduce_bound(bound: FrameBound, strong: &Value, weak: &Value) -> Option<Value> {
    // Two ints compare exactly; widening to f64 is lossy above 2^53.
    let order = match (weak, strong) {
        (Value::Int(w), Value::Int(s)) => w.cmp(s),
        _ => weak.as_f64()?.partial_cmp(&strong.as_f64()?)?,
    };
    let weak_wins = match bound {
        FrameBound::Start => order == Ordering::Less,
        FrameBound::End => order == Ordering::Greater,
    };
    Some(if weak_wins { weak.clone() } else { strong.clone() })
}
