use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lstitch_types::{FieldKey, SpecPath, Value};

/// The structural type of a spec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecType {
    /// The layer's root; holds layer-level metadata and root prims.
    PseudoRoot,
    Prim,
    Attribute,
    Relationship,
}

impl SpecType {
    /// Returns `true` for attribute and relationship specs.
    pub fn is_property(&self) -> bool {
        matches!(self, Self::Attribute | Self::Relationship)
    }

    /// Whether a spec of this type may live at `path`.
    pub fn fits_path(&self, path: &SpecPath) -> bool {
        match self {
            Self::PseudoRoot => path.is_absolute_root(),
            Self::Prim => !path.is_absolute_root() && !path.is_property_path(),
            Self::Attribute | Self::Relationship => path.is_property_path(),
        }
    }
}

impl std::fmt::Display for SpecType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PseudoRoot => write!(f, "pseudoRoot"),
            Self::Prim => write!(f, "prim"),
            Self::Attribute => write!(f, "attribute"),
            Self::Relationship => write!(f, "relationship"),
        }
    }
}

/// Storage for one spec: its type, fields, and ordered child paths.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SpecData {
    pub spec_type: SpecType,
    pub fields: IndexMap<FieldKey, Value>,
    pub children: Vec<SpecPath>,
}

impl SpecData {
    pub fn new(spec_type: SpecType) -> Self {
        Self {
            spec_type,
            fields: IndexMap::new(),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> SpecPath {
        SpecPath::parse(s).unwrap()
    }

    #[test]
    fn spec_types_fit_their_paths() {
        assert!(SpecType::PseudoRoot.fits_path(&SpecPath::absolute_root()));
        assert!(SpecType::Prim.fits_path(&path("/World")));
        assert!(!SpecType::Prim.fits_path(&path("/World.size")));
        assert!(SpecType::Attribute.fits_path(&path("/World.size")));
        assert!(SpecType::Relationship.fits_path(&path("/World.material")));
        assert!(!SpecType::Attribute.fits_path(&path("/World")));
        assert!(!SpecType::Prim.fits_path(&SpecPath::absolute_root()));
    }

    #[test]
    fn property_types() {
        assert!(SpecType::Attribute.is_property());
        assert!(SpecType::Relationship.is_property());
        assert!(!SpecType::Prim.is_property());
        assert!(!SpecType::PseudoRoot.is_property());
    }
}
