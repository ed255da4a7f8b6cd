use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A time coordinate keying a sample.
///
/// Time codes compare exactly: there is no tolerance, so `101.000001` and
/// `101.000002` are distinct samples. `-0.0` is stored as `0.0` so the two
/// IEEE zeros address the same slot. Ordering is total (`f64::total_cmp`).
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct TimeCode(f64);

impl TimeCode {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else {
            Self(value)
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for TimeCode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeCode {}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for TimeCode {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<TimeCode> for f64 {
    fn from(time: TimeCode) -> Self {
        time.0
    }
}

impl fmt::Debug for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeCode({})", self.0)
    }
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time-indexed sample map, ordered by time.
///
/// Serialised as a list of `[time, value]` pairs since JSON object keys
/// cannot carry floating-point numbers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(TimeCode, Value)>", into = "Vec<(TimeCode, Value)>")]
pub struct TimeSamples(BTreeMap<TimeCode, Value>);

impl TimeSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample, returning the value it replaced at that time.
    pub fn insert(&mut self, time: impl Into<TimeCode>, value: Value) -> Option<Value> {
        self.0.insert(time.into(), value)
    }

    pub fn get(&self, time: impl Into<TimeCode>) -> Option<&Value> {
        self.0.get(&time.into())
    }

    pub fn contains(&self, time: impl Into<TimeCode>) -> bool {
        self.0.contains_key(&time.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, TimeCode, Value> {
        self.0.iter()
    }

    /// Sample times in ascending order.
    pub fn times(&self) -> impl Iterator<Item = TimeCode> + '_ {
        self.0.keys().copied()
    }

    /// Insert `value` at `time` only if no sample exists there yet.
    /// Returns `true` if the sample was inserted.
    pub fn insert_if_absent(&mut self, time: TimeCode, value: &Value) -> bool {
        match self.0.entry(time) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value.clone());
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }
}

impl FromIterator<(TimeCode, Value)> for TimeSamples {
    fn from_iter<I: IntoIterator<Item = (TimeCode, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<(TimeCode, Value)>> for TimeSamples {
    fn from(pairs: Vec<(TimeCode, Value)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<TimeSamples> for Vec<(TimeCode, Value)> {
    fn from(samples: TimeSamples) -> Self {
        samples.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a TimeSamples {
    type Item = (&'a TimeCode, &'a Value);
    type IntoIter = btree_map::Iter<'a, TimeCode, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_shares_the_zero_slot() {
        let mut samples = TimeSamples::new();
        samples.insert(0.0, Value::Int(1));
        let replaced = samples.insert(-0.0, Value::Int(2));
        assert_eq!(replaced, Some(Value::Int(1)));
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn near_times_are_distinct() {
        let mut samples = TimeSamples::new();
        samples.insert(101.000001, Value::Int(1));
        samples.insert(101.000002, Value::Int(2));
        assert_eq!(samples.len(), 2);
        assert!(samples.contains(101.000001));
        assert!(!samples.contains(101.0));
    }

    #[test]
    fn times_are_ascending() {
        let samples: TimeSamples = vec![
            (TimeCode::new(3.0), Value::Int(3)),
            (TimeCode::new(-1.0), Value::Int(-1)),
            (TimeCode::new(2.5), Value::Int(2)),
        ]
        .into();
        let times: Vec<f64> = samples.times().map(TimeCode::value).collect();
        assert_eq!(times, vec![-1.0, 2.5, 3.0]);
    }

    #[test]
    fn insert_if_absent_keeps_existing_sample() {
        let mut samples = TimeSamples::new();
        samples.insert(101.0, Value::String("strong".into()));
        assert!(!samples.insert_if_absent(TimeCode::new(101.0), &Value::String("weak".into())));
        assert!(samples.insert_if_absent(TimeCode::new(102.0), &Value::String("weak".into())));
        assert_eq!(samples.get(101.0), Some(&Value::String("strong".into())));
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn serde_uses_pair_list() {
        let mut samples = TimeSamples::new();
        samples.insert(1.0, Value::Double(0.5));
        let json = serde_json::to_value(&samples).unwrap();
        assert_eq!(json, serde_json::json!([[1.0, {"double": 0.5}]]));
        let parsed: TimeSamples = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, samples);
    }
}
