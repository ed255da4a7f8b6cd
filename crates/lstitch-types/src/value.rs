use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::list_op::ListOp;
use crate::path::SpecPath;
use crate::time::TimeSamples;

/// String-keyed, recursively valued dictionary.
pub type Dictionary = BTreeMap<String, Value>;

/// Structural kind of a [`Value`].
///
/// This is the closed tag the stitcher dispatches on: only dictionaries and
/// time-sample maps are joined structurally; every other kind is an opaque
/// unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Strings, numbers, booleans, tokens, asset paths, paths and arrays.
    Scalar,
    Dictionary,
    TimeSamples,
    ListOp,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Dictionary => write!(f, "dictionary"),
            Self::TimeSamples => write!(f, "timeSamples"),
            Self::ListOp => write!(f, "listOp"),
        }
    }
}

/// A typed field value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Token(String),
    Asset(String),
    Path(SpecPath),
    Array(Vec<Value>),
    Dictionary(Dictionary),
    TimeSamples(TimeSamples),
    ListOp(ListOp),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Dictionary(_) => ValueKind::Dictionary,
            Self::TimeSamples(_) => ValueKind::TimeSamples,
            Self::ListOp(_) => ValueKind::ListOp,
            Self::Bool(_)
            | Self::Int(_)
            | Self::Double(_)
            | Self::String(_)
            | Self::Token(_)
            | Self::Asset(_)
            | Self::Path(_)
            | Self::Array(_) => ValueKind::Scalar,
        }
    }

    /// Name of the concrete value type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Token(_) => "token",
            Self::Asset(_) => "asset",
            Self::Path(_) => "path",
            Self::Array(_) => "array",
            Self::Dictionary(_) => "dictionary",
            Self::TimeSamples(_) => "timeSamples",
            Self::ListOp(_) => "listOp",
        }
    }

    /// Numeric scalars as `f64`; `None` for everything else.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Self::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_list_op(&self) -> Option<&ListOp> {
        match self {
            Self::ListOp(op) => Some(op),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Dictionary> for Value {
    fn from(v: Dictionary) -> Self {
        Self::Dictionary(v)
    }
}

impl From<TimeSamples> for Value {
    fn from(v: TimeSamples) -> Self {
        Self::TimeSamples(v)
    }
}

impl From<ListOp> for Value {
    fn from(v: ListOp) -> Self {
        Self::ListOp(v)
    }
}
