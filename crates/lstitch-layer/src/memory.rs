use std::collections::HashMap;

use lstitch_types::{FieldKey, SpecPath, Value};

use crate::error::{LayerError, LayerResult};
use crate::spec::{SpecData, SpecType};
use crate::traits::LayerData;

/// In-memory, HashMap-based layer.
///
/// Specs are keyed by path; each spec keeps its children in declaration
/// order and its fields in insertion order. Equality compares content only
/// (spec types, fields, child order), not the identifier.
#[derive(Clone)]
pub struct MemoryLayer {
    identifier: String,
    specs: HashMap<SpecPath, SpecData>,
}

impl MemoryLayer {
    /// Create an empty layer holding only the pseudo-root.
    pub fn new(identifier: impl Into<String>) -> Self {
        let mut specs = HashMap::new();
        specs.insert(SpecPath::absolute_root(), SpecData::new(SpecType::PseudoRoot));
        Self {
            identifier: identifier.into(),
            specs,
        }
    }

    /// Rename the layer.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
    }

    /// Number of specs, including the pseudo-root.
    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Every spec path in the layer, sorted.
    pub fn all_paths(&self) -> Vec<SpecPath> {
        let mut paths: Vec<SpecPath> = self.specs.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Define a prim at `path`, creating missing ancestor prims.
    ///
    /// Defining an existing prim is a no-op.
    pub fn define_prim(&mut self, path: &str) -> LayerResult<SpecPath> {
        self.define(path, SpecType::Prim)
    }

    /// Define an attribute at `path`, creating missing ancestor prims.
    pub fn define_attribute(&mut self, path: &str) -> LayerResult<SpecPath> {
        self.define(path, SpecType::Attribute)
    }

    /// Define a relationship at `path`, creating missing ancestor prims.
    pub fn define_relationship(&mut self, path: &str) -> LayerResult<SpecPath> {
        self.define(path, SpecType::Relationship)
    }

    fn define(&mut self, path: &str, spec_type: SpecType) -> LayerResult<SpecPath> {
        let path = SpecPath::parse(path)?;

        let mut ancestors = Vec::new();
        let mut cursor = path.parent();
        while let Some(ancestor) = cursor {
            if self.specs.contains_key(&ancestor) {
                break;
            }
            cursor = ancestor.parent();
            ancestors.push(ancestor);
        }
        for ancestor in ancestors.iter().rev() {
            self.create_spec(ancestor, SpecType::Prim)?;
        }

        match self.specs.get(&path) {
            Some(existing) if existing.spec_type == spec_type => {}
            Some(_) => return Err(LayerError::SpecExists(path)),
            None => self.create_spec(&path, spec_type)?,
        }
        Ok(path)
    }

    fn spec(&self, path: &SpecPath) -> LayerResult<&SpecData> {
        self.specs
            .get(path)
            .ok_or_else(|| LayerError::SpecNotFound(path.clone()))
    }

    fn spec_mut(&mut self, path: &SpecPath) -> LayerResult<&mut SpecData> {
        self.specs
            .get_mut(path)
            .ok_or_else(|| LayerError::SpecNotFound(path.clone()))
    }
}

impl LayerData for MemoryLayer {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn has_spec(&self, path: &SpecPath) -> bool {
        self.specs.contains_key(path)
    }

    fn spec_type(&self, path: &SpecPath) -> LayerResult<SpecType> {
        Ok(self.spec(path)?.spec_type)
    }

    fn list_fields(&self, path: &SpecPath) -> LayerResult<Vec<FieldKey>> {
        Ok(self.spec(path)?.fields.keys().cloned().collect())
    }

    fn field(&self, path: &SpecPath, field: &FieldKey) -> LayerResult<Option<&Value>> {
        Ok(self.spec(path)?.fields.get(field))
    }

    fn set_field(&mut self, path: &SpecPath, field: FieldKey, value: Value) -> LayerResult<()> {
        self.spec_mut(path)?.fields.insert(field, value);
        Ok(())
    }

    fn erase_field(&mut self, path: &SpecPath, field: &FieldKey) -> LayerResult<Option<Value>> {
        Ok(self.spec_mut(path)?.fields.shift_remove(field))
    }

    fn children(&self, path: &SpecPath) -> LayerResult<Vec<SpecPath>> {
        Ok(self.spec(path)?.children.clone())
    }

    fn create_spec(&mut self, path: &SpecPath, spec_type: SpecType) -> LayerResult<()> {
        if !spec_type.fits_path(path) {
            return Err(LayerError::InvalidChild {
                path: path.clone(),
                spec_type: spec_type.to_string(),
            });
        }
        if self.specs.contains_key(path) {
            return Err(LayerError::SpecExists(path.clone()));
        }
        let parent = path
            .parent()
            .ok_or_else(|| LayerError::SpecExists(path.clone()))?;
        let parent_spec = self
            .specs
            .get_mut(&parent)
            .ok_or_else(|| LayerError::MissingParent { path: path.clone() })?;

        parent_spec.children.push(path.clone());
        self.specs.insert(path.clone(), SpecData::new(spec_type));
        Ok(())
    }
}

impl PartialEq for MemoryLayer {
    fn eq(&self, other: &Self) -> bool {
        self.specs == other.specs
    }
}

impl std::fmt::Debug for MemoryLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryLayer")
            .field("identifier", &self.identifier)
            .field("spec_count", &self.specs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lstitch_types::keys;

    fn path(s: &str) -> SpecPath {
        SpecPath::parse(s).unwrap()
    }

    #[test]
    fn new_layer_has_only_pseudo_root() {
        let layer = MemoryLayer::new("empty");
        assert_eq!(layer.spec_count(), 1);
        assert!(layer.has_spec(&SpecPath::absolute_root()));
        assert_eq!(
            layer.spec_type(&SpecPath::absolute_root()).unwrap(),
            SpecType::PseudoRoot
        );
        assert!(layer.children(&SpecPath::absolute_root()).unwrap().is_empty());
    }

    #[test]
    fn define_creates_missing_ancestors() {
        let mut layer = MemoryLayer::new("shot");
        layer.define_attribute("/World/Set/Cube.size").unwrap();

        assert_eq!(layer.spec_count(), 5);
        assert_eq!(layer.spec_type(&path("/World/Set")).unwrap(), SpecType::Prim);
        assert_eq!(
            layer.children(&path("/World/Set/Cube")).unwrap(),
            vec![path("/World/Set/Cube.size")]
        );
    }

    #[test]
    fn define_is_idempotent_for_same_type() {
        let mut layer = MemoryLayer::new("shot");
        layer.define_prim("/World").unwrap();
        layer.define_prim("/World").unwrap();
        assert_eq!(layer.children(&SpecPath::absolute_root()).unwrap().len(), 1);

        layer.define_attribute("/World.size").unwrap();
        let err = layer.define_relationship("/World.size").unwrap_err();
        assert!(matches!(err, LayerError::SpecExists(_)));
    }

    #[test]
    fn children_keep_declaration_order() {
        let mut layer = MemoryLayer::new("shot");
        for name in ["/Zeta", "/Alpha", "/Mid"] {
            layer.define_prim(name).unwrap();
        }
        assert_eq!(
            layer.children(&SpecPath::absolute_root()).unwrap(),
            vec![path("/Zeta"), path("/Alpha"), path("/Mid")]
        );
    }

    #[test]
    fn create_spec_enforces_structure() {
        let mut layer = MemoryLayer::new("shot");
        let err = layer.create_spec(&path("/A/B"), SpecType::Prim).unwrap_err();
        assert!(matches!(err, LayerError::MissingParent { .. }));

        let err = layer.create_spec(&path("/A.size"), SpecType::Prim).unwrap_err();
        assert!(matches!(err, LayerError::InvalidChild { .. }));

        let err = layer
            .create_spec(&SpecPath::absolute_root(), SpecType::PseudoRoot)
            .unwrap_err();
        assert!(matches!(err, LayerError::SpecExists(_)));
    }

    #[test]
    fn field_set_get_erase() {
        let mut layer = MemoryLayer::new("shot");
        let root = SpecPath::absolute_root();

        layer.set_field(&root, keys::FRAMES_PER_SECOND, Value::Double(24.0)).unwrap();
        assert!(layer.has_field(&root, &keys::FRAMES_PER_SECOND).unwrap());
        assert_eq!(
            layer.field(&root, &keys::FRAMES_PER_SECOND).unwrap(),
            Some(&Value::Double(24.0))
        );

        let removed = layer.erase_field(&root, &keys::FRAMES_PER_SECOND).unwrap();
        assert_eq!(removed, Some(Value::Double(24.0)));
        assert!(!layer.has_field(&root, &keys::FRAMES_PER_SECOND).unwrap());
        assert_eq!(layer.erase_field(&root, &keys::FRAMES_PER_SECOND).unwrap(), None);
    }

    #[test]
    fn missing_spec_is_an_error() {
        let mut layer = MemoryLayer::new("shot");
        let missing = path("/Nope");
        assert!(matches!(layer.list_fields(&missing), Err(LayerError::SpecNotFound(_))));
        assert!(matches!(
            layer.set_field(&missing, keys::KIND, Value::Token("group".into())),
            Err(LayerError::SpecNotFound(_))
        ));
    }

    #[test]
    fn copy_spec_clones_subtree_in_order() {
        let mut src = MemoryLayer::new("src");
        src.define_prim("/World/Cube").unwrap();
        src.define_attribute("/World/Cube.size").unwrap();
        src.define_prim("/World/Sphere").unwrap();
        src.set_field(&path("/World/Cube.size"), keys::DEFAULT, Value::Double(2.0))
            .unwrap();
        src.set_field(&path("/World"), keys::KIND, Value::Token("assembly".into()))
            .unwrap();

        let mut dst = MemoryLayer::new("dst");
        dst.copy_spec(&src, &path("/World")).unwrap();

        assert_eq!(dst, src);
        assert_eq!(
            dst.children(&path("/World")).unwrap(),
            vec![path("/World/Cube"), path("/World/Sphere")]
        );
    }

    #[test]
    fn copy_spec_requires_destination_parent() {
        let mut src = MemoryLayer::new("src");
        src.define_prim("/World/Cube").unwrap();

        let mut dst = MemoryLayer::new("dst");
        let err = dst.copy_spec(&src, &path("/World/Cube")).unwrap_err();
        assert!(matches!(err, LayerError::MissingParent { .. }));
    }

    #[test]
    fn equality_ignores_identifier() {
        let mut a = MemoryLayer::new("a");
        let mut b = MemoryLayer::new("b");
        a.define_prim("/World").unwrap();
        b.define_prim("/World").unwrap();
        assert_eq!(a, b);

        b.set_field(&path("/World"), keys::ACTIVE, Value::Bool(false)).unwrap();
        assert_ne!(a, b);
    }
}
