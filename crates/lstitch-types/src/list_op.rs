use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A list-edit operation set (references, inherits, relationship targets).
///
/// Either an explicit list that replaces whatever weaker opinions say, or a
/// set of prepend/append/delete edits applied on top of them. Stitching
/// treats the whole operation set as one opaque value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListOp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prepended: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub appended: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Value>,
}

impl ListOp {
    /// An explicit list.
    pub fn explicit(items: Vec<Value>) -> Self {
        Self {
            explicit: Some(items),
            ..Default::default()
        }
    }

    /// A prepend-only edit.
    pub fn prepend(items: Vec<Value>) -> Self {
        Self {
            prepended: items,
            ..Default::default()
        }
    }

    /// An append-only edit.
    pub fn append(items: Vec<Value>) -> Self {
        Self {
            appended: items,
            ..Default::default()
        }
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit.is_some()
    }

    /// Returns `true` if the operation set carries no edits at all.
    pub fn is_empty(&self) -> bool {
        self.explicit.is_none()
            && self.prepended.is_empty()
            && self.appended.is_empty()
            && self.deleted.is_empty()
    }

    /// Apply the edits to `items`, producing the resulting list.
    ///
    /// An explicit list wins outright. Otherwise deletions are removed
    /// first, then prepended items are moved to the front and appended
    /// items to the back, each appearing once.
    pub fn apply_to(&self, items: &[Value]) -> Vec<Value> {
        if let Some(explicit) = &self.explicit {
            return explicit.clone();
        }

        let mut result: Vec<Value> = items
            .iter()
            .filter(|item| !self.deleted.contains(item))
            .filter(|item| !self.prepended.contains(item) && !self.appended.contains(item))
            .cloned()
            .collect();

        let mut front = Vec::with_capacity(self.prepended.len() + result.len());
        for item in &self.prepended {
            if !front.contains(item) {
                front.push(item.clone());
            }
        }
        front.append(&mut result);
        for item in &self.appended {
            if !front.contains(item) {
                front.push(item.clone());
            }
        }
        front
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(s: &str) -> Value {
        Value::Asset(s.into())
    }

    #[test]
    fn explicit_replaces_input() {
        let op = ListOp::explicit(vec![asset("a.usd")]);
        assert!(op.is_explicit());
        assert_eq!(op.apply_to(&[asset("b.usd")]), vec![asset("a.usd")]);
    }

    #[test]
    fn edits_apply_in_order() {
        let op = ListOp {
            prepended: vec![asset("first.usd")],
            appended: vec![asset("last.usd")],
            deleted: vec![asset("gone.usd")],
            ..Default::default()
        };
        let result = op.apply_to(&[asset("gone.usd"), asset("mid.usd"), asset("last.usd")]);
        assert_eq!(result, vec![asset("first.usd"), asset("mid.usd"), asset("last.usd")]);
    }

    #[test]
    fn default_is_empty() {
        assert!(ListOp::default().is_empty());
        assert!(!ListOp::append(vec![asset("x.usd")]).is_empty());
    }

    #[test]
    fn serde_skips_unused_lists() {
        let op = ListOp::prepend(vec![asset("a.usd")]);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json, serde_json::json!({"prepended": [{"asset": "a.usd"}]}));
        let parsed: ListOp = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, op);
    }
}
