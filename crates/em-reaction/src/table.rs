//! `ReactionRulesTable`: priority-ordered reaction rules.

use std::fmt;

use crate::ReactionRule;

/// One table row.
#[derive(Clone)]
pub struct TableEntry {
    pub priority: i32,
    pub rule:     Box<dyn ReactionRule>,
}

impl TableEntry {
    #[inline]
    pub fn rule_type(&self) -> &'static str {
        self.rule.type_name()
    }
}

impl fmt::Debug for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableEntry")
            .field("priority", &self.priority)
            .field("rule", &self.rule)
            .finish()
    }
}

/// An entity's reaction rules in evaluation order.
///
/// Entries are kept sorted by ascending priority number, so priority `1` is
/// evaluated before priority `5`.  Entries with equal priority stay in the
/// order they were inserted.
///
/// Cloning deep-copies every rule, which is how each entity gets a private
/// table from a shared template.
#[derive(Clone, Debug, Default)]
pub struct ReactionRulesTable {
    entries: Vec<TableEntry>,
}

impl ReactionRulesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `rule` at `priority`, after any entries with the same priority.
    pub fn insert(&mut self, priority: i32, rule: Box<dyn ReactionRule>) {
        let at = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(at, TableEntry { priority, rule });
    }

    /// Builder-style [`insert`][Self::insert].
    pub fn with(mut self, priority: i32, rule: impl ReactionRule) -> Self {
        self.insert(priority, Box::new(rule));
        self
    }

    /// Remove every entry whose rule has type `name`.  Returns how many were
    /// removed.
    pub fn remove_type(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.rule_type() != name);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &TableEntry> {
        self.entries.iter()
    }

    /// Priorities in evaluation order.
    pub fn priorities(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.priority).collect()
    }

    /// Rule type names in evaluation order.
    pub fn rule_types(&self) -> Vec<&'static str> {
        self.entries.iter().map(TableEntry::rule_type).collect()
    }
}

/// Tables are equal when they hold the same rule types, priorities and
/// parameters in the same order.
impl PartialEq for ReactionRulesTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(a, b)| {
                a.priority == b.priority
                    && a.rule_type() == b.rule_type()
                    && a.rule.parameters() == b.rule.parameters()
            })
    }
}

impl<'a> IntoIterator for &'a ReactionRulesTable {
    type Item = &'a TableEntry;
    type IntoIter = std::slice::Iter<'a, TableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
