use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-sensitive identifier of a field on a spec.
///
/// Well-known keys are `const` and borrow a `'static` string; keys read from
/// documents own their text. Equality, ordering and hashing only look at the
/// text, so both forms compare interchangeably.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(Cow<'static, str>);

impl FieldKey {
    /// A key over a `'static` name.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// A key over an owned name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for FieldKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for FieldKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldKey({})", self.0)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Well-known field keys.
pub mod keys {
    use super::FieldKey;

    pub const START_TIME_CODE: FieldKey = FieldKey::from_static("startTimeCode");
    pub const END_TIME_CODE: FieldKey = FieldKey::from_static("endTimeCode");
    pub const FRAMES_PER_SECOND: FieldKey = FieldKey::from_static("framesPerSecond");
    pub const TIME_CODES_PER_SECOND: FieldKey = FieldKey::from_static("timeCodesPerSecond");
    pub const DOCUMENTATION: FieldKey = FieldKey::from_static("documentation");
    pub const COMMENT: FieldKey = FieldKey::from_static("comment");

    pub const TIME_SAMPLES: FieldKey = FieldKey::from_static("timeSamples");
    pub const DEFAULT: FieldKey = FieldKey::from_static("default");
    pub const CUSTOM_DATA: FieldKey = FieldKey::from_static("customData");
    pub const ASSET_INFO: FieldKey = FieldKey::from_static("assetInfo");

    pub const REFERENCES: FieldKey = FieldKey::from_static("references");
    pub const INHERITS: FieldKey = FieldKey::from_static("inherits");
    pub const SPECIALIZES: FieldKey = FieldKey::from_static("specializes");
    pub const PAYLOAD: FieldKey = FieldKey::from_static("payload");
    pub const TARGET_PATHS: FieldKey = FieldKey::from_static("targetPaths");
    pub const CONNECTION_PATHS: FieldKey = FieldKey::from_static("connectionPaths");

    pub const TYPE_NAME: FieldKey = FieldKey::from_static("typeName");
    pub const SPECIFIER: FieldKey = FieldKey::from_static("specifier");
    pub const KIND: FieldKey = FieldKey::from_static("kind");
    pub const ACTIVE: FieldKey = FieldKey::from_static("active");
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn static_and_owned_keys_compare_equal() {
        let owned = FieldKey::new("startTimeCode");
        assert_eq!(owned, keys::START_TIME_CODE);

        let mut set = HashSet::new();
        set.insert(keys::START_TIME_CODE);
        assert!(set.contains(&owned));
        assert!(set.contains("startTimeCode"));
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_ne!(FieldKey::new("StartTimeCode"), keys::START_TIME_CODE);
    }

    #[test]
    fn serde_is_a_plain_string() {
        let json = serde_json::to_string(&keys::CUSTOM_DATA).unwrap();
        assert_eq!(json, "\"customData\"");
        let parsed: FieldKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, keys::CUSTOM_DATA);
    }
}
