//! Loading and saving [`ReactionRulesTable`]s.
//!
//! Loading is forgiving per entry and strict per file: an entry with an
//! unknown type, a malformed shape or bad parameters is skipped with a
//! warning and the rest of the file still loads, while an unreadable or malformed file fails as a
//! whole and leaves the target table untouched.

use std::path::Path;

use log::{error, info, warn};

use crate::codec::{codec_for_path, RuleEntry, RuleTableCodec, RuleTableFile};
use crate::{ReactionError, ReactionRegistry, ReactionRulesTable, RuleResult};

/// An entry that could not be turned into a rule.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRule {
    /// Zero-based position in the file's `rules` list.
    pub index:     usize,
    pub rule_type: String,
    pub reason:    String,
}

/// Outcome of a successful load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded:  usize,
    pub skipped: Vec<SkippedRule>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Load the rule table at `path` into `table`.
///
/// The codec is chosen from the file extension.  With `clear_before_load`
/// the table is emptied first; otherwise loaded rules are merged in by
/// priority.  Requires an installed registry.
pub fn deserialize(
    table:             &mut ReactionRulesTable,
    path:              &Path,
    clear_before_load: bool,
    registry:          &ReactionRegistry,
) -> RuleResult<LoadReport> {
    if !registry.is_installed() {
        return Err(ReactionError::RegistryNotInstalled);
    }
    let codec = codec_for_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let report = deserialize_str(table, &text, codec, clear_before_load, registry)?;
    info!(
        "loaded {} reaction rules from {} ({} skipped)",
        report.loaded,
        path.display(),
        report.skipped.len(),
    );
    Ok(report)
}

/// Like [`deserialize`] but reads from a string in the given format.
pub fn deserialize_str(
    table:             &mut ReactionRulesTable,
    text:              &str,
    codec:             &dyn RuleTableCodec,
    clear_before_load: bool,
    registry:          &ReactionRegistry,
) -> RuleResult<LoadReport> {
    if !registry.is_installed() {
        return Err(ReactionError::RegistryNotInstalled);
    }

    // Decode everything before touching the table.
    let file = codec.decode(text)?;

    if clear_before_load {
        table.clear();
    }

    let mut report = LoadReport::default();
    for (index, raw) in file.rules.into_iter().enumerate() {
        let rule_type = RuleEntry::type_of(&raw).to_owned();
        let created = RuleEntry::from_value(raw).and_then(|entry| {
            let rule = registry.create_rule(&entry.rule_type, &entry.parameters)?;
            Ok((entry.priority, rule))
        });
        match created {
            Ok((priority, rule)) => {
                table.insert(priority, rule);
                report.loaded += 1;
            }
            Err(e) => {
                warn!("skipping reaction rule #{index} ({rule_type:?}, {} format): {e}", codec.name());
                report.skipped.push(SkippedRule {
                    index,
                    rule_type,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}

/// Write `table` to `path`, choosing the codec from the extension.
pub fn serialize(table: &ReactionRulesTable, path: &Path) -> RuleResult<()> {
    let codec = codec_for_path(path)?;
    let text = serialize_to_string(table, codec)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Encode `table` in evaluation order with each rule's priority and
/// parameters.
pub fn serialize_to_string(table: &ReactionRulesTable, codec: &dyn RuleTableCodec) -> RuleResult<String> {
    codec.encode(&RuleTableFile::from_table(table))
}

/// Load `path` into a fresh table, falling back to an empty table (and an
/// `error!` log line) if the file cannot be loaded at all.
pub fn load_table_or_empty(path: &Path, registry: &ReactionRegistry) -> ReactionRulesTable {
    let mut table = ReactionRulesTable::new();
    match deserialize(&mut table, path, true, registry) {
        Ok(_) => table,
        Err(e) => {
            error!("failed to load reaction rules from {}: {e}; using an empty table", path.display());
            ReactionRulesTable::new()
        }
    }
}
