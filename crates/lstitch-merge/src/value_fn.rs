use lstitch_layer::LayerData;
use lstitch_types::{FieldKey, SpecPath, Value};

// ---------------------------------------------------------------------------
// StitchValueStatus
// ---------------------------------------------------------------------------

/// What a [`StitchValueFn`] wants done with one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StitchValueStatus {
    /// Leave the field exactly as it is in the strong layer. This also skips
    /// frame-bounds reduction.
    NoStitchedValue,
    /// Apply the default stitching policy.
    UseDefaultValue,
    /// Use the value written to the output slot. An empty slot removes the
    /// field from the strong layer.
    UseSuppliedValue,
}

// ---------------------------------------------------------------------------
// StitchValueContext
// ---------------------------------------------------------------------------

/// Everything a [`StitchValueFn`] sees about the field being stitched.
///
/// Both layers are borrowed immutably for the duration of the call; the
/// hook can read them but never change their structure.
pub struct StitchValueContext<'a> {
    /// The field being stitched.
    pub field: &'a FieldKey,
    /// Path of the matched spec in both layers.
    pub path: &'a SpecPath,
    /// The strong (destination) layer.
    pub strong_layer: &'a dyn LayerData,
    /// Whether the strong spec defines `field`.
    pub field_in_strong: bool,
    /// The weak (source) layer.
    pub weak_layer: &'a dyn LayerData,
    /// Whether the weak spec defines `field`.
    pub field_in_weak: bool,
}

impl StitchValueContext<'_> {
    /// The strong layer's value for the field, if defined.
    pub fn strong_value(&self) -> Option<&Value> {
        self.strong_layer.field(self.path, self.field).ok().flatten()
    }

    /// The weak layer's value for the field, if defined.
    pub fn weak_value(&self) -> Option<&Value> {
        self.weak_layer.field(self.path, self.field).ok().flatten()
    }
}

// ---------------------------------------------------------------------------
// StitchValueFn trait
// ---------------------------------------------------------------------------

/// Hook for customizing how individual field values are stitched.
///
/// Called once per field of every matched spec pair, before the default
/// policy runs. Write a value into `stitched` and return
/// [`StitchValueStatus::UseSuppliedValue`] to override the result.
///
/// Any `Fn(&StitchValueContext, &mut Option<Value>) -> StitchValueStatus`
/// closure implements this trait.
pub trait StitchValueFn {
    fn stitch_value(
        &self,
        ctx: &StitchValueContext<'_>,
        stitched: &mut Option<Value>,
    ) -> StitchValueStatus;
}

impl<F> StitchValueFn for F
where
    F: Fn(&StitchValueContext<'_>, &mut Option<Value>) -> StitchValueStatus,
{
    fn stitch_value(
        &self,
        ctx: &StitchValueContext<'_>,
        stitched: &mut Option<Value>,
    ) -> StitchValueStatus {
        self(ctx, stitched)
    }
}
