use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const ROOT: &str = "/";

/// Structural path of a spec within a layer.
///
/// `/` names the pseudo-root. Prim segments are joined with `/` and a
/// trailing property segment with `.`:
///
/// ```text
/// /                       pseudo-root
/// /World/Cube             prim
/// /World/Cube.size        property
/// /World/Cube.xformOp:translate
/// ```
///
/// A path is unique within its layer and is the identity key used to match
/// specs between two layers.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpecPath(String);

impl SpecPath {
    /// The pseudo-root path, `/`.
    pub fn absolute_root() -> Self {
        Self(ROOT.to_string())
    }

    /// Parse and validate an absolute path.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s == ROOT {
            return Ok(Self::absolute_root());
        }
        let Some(body) = s.strip_prefix('/') else {
            return Err(TypeError::invalid_path(s, "path must be absolute"));
        };

        let segments: Vec<&str> = body.split('/').collect();
        let (last, prims) = match segments.split_last() {
            Some(split) => split,
            None => return Err(TypeError::invalid_path(s, "empty path")),
        };

        for segment in prims {
            validate_prim_name(segment).map_err(|e| TypeError::invalid_path(s, e.to_string()))?;
        }
        match last.split_once('.') {
            Some((prim, property)) => {
                validate_prim_name(prim).map_err(|e| TypeError::invalid_path(s, e.to_string()))?;
                validate_property_name(property)
                    .map_err(|e| TypeError::invalid_path(s, e.to_string()))?;
            }
            None => {
                validate_prim_name(last).map_err(|e| TypeError::invalid_path(s, e.to_string()))?;
            }
        }

        Ok(Self(s.to_string()))
    }

    /// Returns `true` for the pseudo-root.
    pub fn is_absolute_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Returns `true` if the final segment names a property.
    pub fn is_property_path(&self) -> bool {
        self.0.contains('.')
    }

    /// Path of the prim child `name` beneath this path.
    pub fn append_child(&self, name: &str) -> Result<Self, TypeError> {
        if self.is_property_path() {
            return Err(TypeError::invalid_path(
                self.0.clone(),
                "properties cannot have prim children",
            ));
        }
        validate_prim_name(name)?;
        if self.is_absolute_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{name}", self.0)))
        }
    }

    /// Path of the property `name` on this prim path.
    pub fn append_property(&self, name: &str) -> Result<Self, TypeError> {
        if self.is_absolute_root() || self.is_property_path() {
            return Err(TypeError::invalid_path(
                self.0.clone(),
                "properties can only be appended to prim paths",
            ));
        }
        validate_property_name(name)?;
        Ok(Self(format!("{}.{name}", self.0)))
    }

    /// The parent path, or `None` for the pseudo-root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_absolute_root() {
            return None;
        }
        if let Some((prim, _)) = self.0.rsplit_once('.') {
            return Some(Self(prim.to_string()));
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::absolute_root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// The final segment's name (empty for the pseudo-root).
    pub fn name(&self) -> &str {
        if let Some((_, property)) = self.0.rsplit_once('.') {
            return property;
        }
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => "",
        }
    }

    /// Number of segments below the pseudo-root.
    pub fn depth(&self) -> usize {
        if self.is_absolute_root() {
            return 0;
        }
        self.0.matches('/').count() + usize::from(self.is_property_path())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_prim_name(name: &str) -> Result<(), TypeError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TypeError::InvalidName {
            kind: "prim",
            name: name.to_string(),
        })
    }
}

fn validate_property_name(name: &str) -> Result<(), TypeError> {
    let valid = !name.is_empty()
        && name.split(':').all(|part| validate_prim_name(part).is_ok());
    if valid {
        Ok(())
    } else {
        Err(TypeError::InvalidName {
            kind: "property",
            name: name.to_string(),
        })
    }
}

impl TryFrom<String> for SpecPath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SpecPath> for String {
    fn from(path: SpecPath) -> Self {
        path.0
    }
}

impl fmt::Debug for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpecPath({})", self.0)
    }
}

impl fmt::Display for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> SpecPath {
        SpecPath::parse(s).unwrap()
    }

    #[test]
    fn root_is_its_own_kind() {
        let root = SpecPath::absolute_root();
        assert!(root.is_absolute_root());
        assert!(root.parent().is_none());
        assert_eq!(root.name(), "");
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn parse_prim_and_property_paths() {
        let prim = path("/World/Cube");
        assert!(!prim.is_property_path());
        assert_eq!(prim.name(), "Cube");
        assert_eq!(prim.depth(), 2);

        let prop = path("/World/Cube.xformOp:translate");
        assert!(prop.is_property_path());
        assert_eq!(prop.name(), "xformOp:translate");
        assert_eq!(prop.parent(), Some(path("/World/Cube")));
        assert_eq!(prop.depth(), 3);
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        assert!(SpecPath::parse("World").is_err());
        assert!(SpecPath::parse("").is_err());
        assert!(SpecPath::parse("/World/").is_err());
        assert!(SpecPath::parse("//World").is_err());
        assert!(SpecPath::parse("/World.size/Cube").is_err());
        assert!(SpecPath::parse("/1abc").is_err());
        assert!(SpecPath::parse("/World.a::b").is_err());
    }

    #[test]
    fn append_builds_expected_paths() {
        let root = SpecPath::absolute_root();
        let world = root.append_child("World").unwrap();
        assert_eq!(world.as_str(), "/World");
        let cube = world.append_child("Cube").unwrap();
        assert_eq!(cube.as_str(), "/World/Cube");
        let size = cube.append_property("size").unwrap();
        assert_eq!(size.as_str(), "/World/Cube.size");
    }

    #[test]
    fn append_rejects_invalid_targets() {
        let root = SpecPath::absolute_root();
        assert!(root.append_property("size").is_err());
        let prop = path("/World.size");
        assert!(prop.append_child("Cube").is_err());
        assert!(prop.append_property("other").is_err());
        assert!(root.append_child("has space").is_err());
    }

    #[test]
    fn parent_walks_up_to_root() {
        let cube = path("/World/Cube");
        let world = cube.parent().unwrap();
        assert_eq!(world, path("/World"));
        assert_eq!(world.parent(), Some(SpecPath::absolute_root()));
    }

    #[test]
    fn serde_roundtrip_and_validation() {
        let p = path("/World/Cube.size");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"/World/Cube.size\"");
        let parsed: SpecPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, p);
        assert!(serde_json::from_str::<SpecPath>("\"no-slash\"").is_err());
    }
}
