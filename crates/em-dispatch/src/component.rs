//! Per-entity reaction state.

use em_reaction::ReactionRulesTable;

/// An entity's private reaction rules.
///
/// Each entity owns its table outright, usually cloned from a shared
/// template, so rules never share mutable state across entities.
#[derive(Clone, Debug, Default)]
pub struct ReactionComponent {
    pub table:   ReactionRulesTable,
    /// Disabled components are skipped by the reaction phase.
    pub enabled: bool,
}

impl ReactionComponent {
    pub fn new(table: ReactionRulesTable) -> Self {
        Self { table, enabled: true }
    }

    /// An enabled component holding a deep copy of `template`.
    pub fn from_template(template: &ReactionRulesTable) -> Self {
        Self::new(template.clone())
    }

    /// A component that never reacts.
    pub fn disabled() -> Self {
        Self { table: ReactionRulesTable::new(), enabled: false }
    }

    /// `true` if the reaction phase should evaluate this component.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && !self.table.is_empty()
    }
}
