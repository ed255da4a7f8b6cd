use lstitch_types::{FieldKey, SpecPath, Value};

use crate::error::LayerResult;
use crate::spec::SpecType;

/// Read/write access to the specs of one layer.
///
/// This is the whole surface the stitcher needs from a layer. All
/// implementations must satisfy these invariants:
/// - The pseudo-root (`/`) always exists.
/// - Every other spec's parent exists, and the spec is listed among the
///   parent's children.
/// - Field order is irrelevant; child order is declaration order and is
///   preserved by [`copy_spec`](LayerData::copy_spec).
/// - Accessing a spec that does not exist is an error, never a silent no-op.
///
/// The trait is object-safe so two layers of different backends can be
/// stitched through `&mut dyn LayerData` / `&dyn LayerData`.
pub trait LayerData {
    /// Human-readable identifier of the layer (file name, tag, ...).
    fn identifier(&self) -> &str;

    /// Check whether a spec exists at `path`.
    fn has_spec(&self, path: &SpecPath) -> bool;

    /// The type of the spec at `path`.
    fn spec_type(&self, path: &SpecPath) -> LayerResult<SpecType>;

    /// Fields defined directly on the spec at `path`.
    fn list_fields(&self, path: &SpecPath) -> LayerResult<Vec<FieldKey>>;

    /// The value of `field` on the spec at `path`.
    ///
    /// Returns `Ok(None)` if the spec exists but does not define the field.
    fn field(&self, path: &SpecPath, field: &FieldKey) -> LayerResult<Option<&Value>>;

    /// Set `field` on the spec at `path`, replacing any previous value.
    fn set_field(&mut self, path: &SpecPath, field: FieldKey, value: Value) -> LayerResult<()>;

    /// Remove `field` from the spec at `path`, returning the removed value.
    fn erase_field(&mut self, path: &SpecPath, field: &FieldKey) -> LayerResult<Option<Value>>;

    /// Paths of the direct children of the spec at `path`, in declaration order.
    fn children(&self, path: &SpecPath) -> LayerResult<Vec<SpecPath>>;

    /// Create an empty spec at `path` and append it to its parent's children.
    fn create_spec(&mut self, path: &SpecPath, spec_type: SpecType) -> LayerResult<()>;

    /// Check whether the spec at `path` defines `field`.
    fn has_field(&self, path: &SpecPath, field: &FieldKey) -> LayerResult<bool> {
        Ok(self.field(path, field)?.is_some())
    }

    /// Deep-copy the subtree rooted at `path` in `src` into this layer.
    ///
    /// The destination parent must already exist and `path` must not. Fields
    /// are copied verbatim and children are created in `src`'s declaration
    /// order. Backends may override this for a cheaper bulk copy.
    fn copy_spec(&mut self, src: &dyn LayerData, path: &SpecPath) -> LayerResult<()> {
        self.create_spec(path, src.spec_type(path)?)?;
        for field in src.list_fields(path)? {
            if let Some(value) = src.field(path, &field)? {
                self.set_field(path, field, value.clone())?;
            }
        }
        for child in src.children(path)? {
            self.copy_spec(src, &child)?;
        }
        Ok(())
    }
}
