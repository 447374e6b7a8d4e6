//! Serializable rule and reaction parameters.
//!
//! Parameters are a flat, ordered `name → value` map so every codec can
//! represent them and so a serialized table diffs cleanly.  Rules read their
//! own keys and ignore the rest; the reaction a rule owns reads its keys from
//! the same map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use em_core::Tag;

use crate::{ReactionError, RuleResult};

/// One parameter value.
///
/// Untagged, so files read naturally: `"radius": 15.0`, `"tag": "gangster"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    fn kind(&self) -> &'static str {
        match self {
            ParamValue::Bool(_)  => "bool",
            ParamValue::Int(_)   => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_)   => "string",
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(f64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

/// Ordered parameter map attached to each rule-table entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleParams(BTreeMap<String, ParamValue>);

impl RuleParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) {
        self.0.insert(key.to_owned(), value.into());
    }

    /// Copy every entry of `other` into `self`, overwriting equal keys.
    pub fn extend(&mut self, other: RuleParams) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ── Typed getters ─────────────────────────────────────────────────────

    /// Float parameter; integers are accepted and widened.
    pub fn get_f64_or(&self, key: &str, default: f64) -> RuleResult<f64> {
        match self.0.get(key) {
            None => Ok(default),
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            Some(other) => Err(wrong_type(key, "number", other)),
        }
    }

    pub fn get_f32_or(&self, key: &str, default: f32) -> RuleResult<f32> {
        self.get_f64_or(key, f64::from(default)).map(|v| v as f32)
    }

    pub fn get_bool_or(&self, key: &str, default: bool) -> RuleResult<bool> {
        match self.0.get(key) {
            None => Ok(default),
            Some(ParamValue::Bool(v)) => Ok(*v),
            Some(other) => Err(wrong_type(key, "bool", other)),
        }
    }

    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> RuleResult<&'a str> {
        match self.0.get(key) {
            None => Ok(default),
            Some(ParamValue::Str(v)) => Ok(v.as_str()),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    pub fn get_tag_or(&self, key: &str, default: &str) -> RuleResult<Tag> {
        let name = self.get_str_or(key, default)?;
        if name.is_empty() {
            return Err(ReactionError::InvalidParameter {
                key:    key.to_owned(),
                reason: "tag must not be empty".into(),
            });
        }
        Ok(Tag::new(name))
    }
}

fn wrong_type(key: &str, expected: &str, got: &ParamValue) -> ReactionError {
    ReactionError::InvalidParameter {
        key:    key.to_owned(),
        reason: format!("expected {expected}, got {}", got.kind()),
    }
}

/// Reject distances that are negative, zero (when `allow_zero` is false),
/// or not finite.
pub(crate) fn check_distance(key: &str, value: f32, allow_zero: bool) -> RuleResult<f32> {
    let ok = value.is_finite() && if allow_zero { value >= 0.0 } else { value > 0.0 };
    if ok {
        Ok(value)
    } else {
        Err(ReactionError::InvalidParameter {
            key:    key.to_owned(),
            reason: format!("{value} is not a valid distance"),
        })
    }
}
