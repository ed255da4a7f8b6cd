//! JSON layer documents.
//!
//! A document nests specs under their parents. Child keys are the child's
//! name; property children are prefixed with `.`:
//!
//! ```json
//! {
//!   "identifier": "shot.json",
//!   "root": {
//!     "type": "pseudoRoot",
//!     "fields": { "startTimeCode": { "double": 1.0 } },
//!     "children": {
//!       "World": {
//!         "type": "prim",
//!         "children": { ".size": { "type": "attribute" } }
//!       }
//!     }
//!   }
//! }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lstitch_types::{FieldKey, SpecPath, Value};

use crate::error::{LayerError, LayerResult};
use crate::memory::MemoryLayer;
use crate::spec::SpecType;
use crate::traits::LayerData;

const PROPERTY_PREFIX: char = '.';

#[derive(Debug, Serialize, Deserialize)]
struct LayerDocument {
    #[serde(default)]
    identifier: String,
    root: SpecDocument,
}

#[derive(Debug, Serialize, Deserialize)]
struct SpecDocument {
    #[serde(rename = "type")]
    spec_type: SpecType,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    fields: IndexMap<FieldKey, Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    children: IndexMap<String, SpecDocument>,
}

impl MemoryLayer {
    /// Decode a layer from a JSON document.
    pub fn from_json_str(json: &str) -> LayerResult<Self> {
        let document: LayerDocument =
            serde_json::from_str(json).map_err(|e| LayerError::Serialization(e.to_string()))?;

        if document.root.spec_type != SpecType::PseudoRoot {
            return Err(LayerError::Serialization(format!(
                "document root must be a pseudoRoot spec, found {}",
                document.root.spec_type
            )));
        }

        let mut layer = MemoryLayer::new(document.identifier);
        let root = SpecPath::absolute_root();
        load_spec(&mut layer, &root, document.root)?;
        Ok(layer)
    }

    /// Encode this layer as a pretty-printed JSON document.
    pub fn to_json_string(&self) -> LayerResult<String> {
        to_json_string(self)
    }

    /// Load a layer document from disk.
    ///
    /// A document without an identifier takes the file path as identifier.
    pub fn open(path: impl AsRef<Path>) -> LayerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut layer = Self::from_json_str(&json)?;
        if layer.identifier().is_empty() {
            layer.set_identifier(path.display().to_string());
        }
        tracing::debug!(path = %path.display(), specs = layer.spec_count(), "opened layer");
        Ok(layer)
    }

    /// Write this layer to disk as a JSON document.
    pub fn save(&self, path: impl AsRef<Path>) -> LayerResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_string()?)?;
        tracing::debug!(path = %path.display(), specs = self.spec_count(), "saved layer");
        Ok(())
    }
}

/// Encode any layer as a pretty-printed JSON document.
pub fn to_json_string(layer: &dyn LayerData) -> LayerResult<String> {
    let document = LayerDocument {
        identifier: layer.identifier().to_string(),
        root: dump_spec(layer, &SpecPath::absolute_root())?,
    };
    serde_json::to_string_pretty(&document).map_err(|e| LayerError::Serialization(e.to_string()))
}

fn load_spec(layer: &mut MemoryLayer, path: &SpecPath, spec: SpecDocument) -> LayerResult<()> {
    for (field, value) in spec.fields {
        layer.set_field(path, field, value)?;
    }
    for (key, child) in spec.children {
        let child_path = match key.strip_prefix(PROPERTY_PREFIX) {
            Some(property) => path.append_property(property)?,
            None => path.append_child(&key)?,
        };
        layer.create_spec(&child_path, child.spec_type)?;
        load_spec(layer, &child_path, child)?;
    }
    Ok(())
}

fn dump_spec(layer: &dyn LayerData, path: &SpecPath) -> LayerResult<SpecDocument> {
    let mut fields = IndexMap::new();
    for field in layer.list_fields(path)? {
        if let Some(value) = layer.field(path, &field)? {
            fields.insert(field, value.clone());
        }
    }

    let mut children = IndexMap::new();
    for child in layer.children(path)? {
        let key = if child.is_property_path() {
            format!("{PROPERTY_PREFIX}{}", child.name())
        } else {
            child.name().to_string()
        };
        children.insert(key, dump_spec(layer, &child)?);
    }

    Ok(SpecDocument {
        spec_type: layer.spec_type(path)?,
        fields,
        children,
    })
}
