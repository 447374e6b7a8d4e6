//! On-disk rule-table format and the codecs that read and write it.
//!
//! # Schema
//!
//! Both codecs carry the same structure.  JSON:
//!
//! ```json
//! {
//!   "rules": [
//!     { "type": "FireDangerRule", "priority": 1,
//!       "parameters": { "reaction": "flee", "flee_distance": 25.0 } },
//!     { "type": "CuriosityRule", "priority": 5,
//!       "parameters": { "chance": 0.25 } }
//!   ]
//! }
//! ```
//!
//! RON:
//!
//! ```ron
//! (
//!     rules: [
//!         (type: "FireDangerRule", priority: 1, parameters: {"reaction": "flee"}),
//!     ],
//! )
//! ```
//!
//! `parameters` may be omitted; the rule's defaults then apply.
//!
//! Decoding is two-step.  A codec only checks the outer shape and yields each
//! entry of `rules` as an untyped [`serde_json::Value`]; every entry is then
//! converted on its own with [`RuleEntry::from_value`], so one malformed row
//! cannot sink the rest of the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ReactionError, ReactionRulesTable, RuleParams, RuleResult};

/// A decoded rule-table file whose entries have not been typed yet.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawRuleTable {
    pub rules: Vec<serde_json::Value>,
}

/// A whole rule-table file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleTableFile {
    pub rules: Vec<RuleEntry>,
}

/// One rule-table row as written to disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    #[serde(rename = "type")]
    pub rule_type: String,
    pub priority:  i32,
    #[serde(default)]
    pub parameters: RuleParams,
}

impl RuleEntry {
    /// Type one raw entry.  Fails on a missing or non-integer `priority`, a
    /// missing `type`, or a parameter value that is not a scalar.
    pub fn from_value(value: serde_json::Value) -> RuleResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Best-effort `type` of a raw entry, for diagnostics.
    pub fn type_of(value: &serde_json::Value) -> &str {
        value.get("type").and_then(serde_json::Value::as_str).unwrap_or("<untyped>")
    }
}

impl RuleTableFile {
    /// Snapshot `table` in evaluation order.
    pub fn from_table(table: &ReactionRulesTable) -> Self {
        Self {
            rules: table
                .iter()
                .map(|e| RuleEntry {
                    rule_type:  e.rule_type().to_owned(),
                    priority:   e.priority,
                    parameters: e.rule.parameters(),
                })
                .collect(),
        }
    }
}

/// A text format for [`RuleTableFile`].
pub trait RuleTableCodec: Sync {
    /// Short format name, used in log lines.
    fn name(&self) -> &'static str;

    /// Parse the outer structure; entries stay untyped.
    fn decode(&self, text: &str) -> RuleResult<RawRuleTable>;

    fn encode(&self, file: &RuleTableFile) -> RuleResult<String>;
}

// ── JSON ──────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct JsonCodec;

impl RuleTableCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, text: &str) -> RuleResult<RawRuleTable> {
        Ok(serde_json::from_str(text)?)
    }

    fn encode(&self, file: &RuleTableFile) -> RuleResult<String> {
        Ok(serde_json::to_string_pretty(file)?)
    }
}

// ── RON ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct RonCodec;

impl RuleTableCodec for RonCodec {
    fn name(&self) -> &'static str {
        "ron"
    }

    fn decode(&self, text: &str) -> RuleResult<RawRuleTable> {
        // RON structs arrive as JSON objects keyed by field name.
        Ok(ron::from_str(text)?)
    }

    fn encode(&self, file: &RuleTableFile) -> RuleResult<String> {
        Ok(ron::ser::to_string_pretty(file, ron::ser::PrettyConfig::default())?)
    }
}

/// Pick the codec for `path` from its extension (case-insensitive).
pub fn codec_for_path(path: &Path) -> RuleResult<&'static dyn RuleTableCodec> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Ok(&JsonCodec),
        "ron"  => Ok(&RonCodec),
        _ => Err(ReactionError::UnsupportedFormat(path.display().to_string())),
    }
}
