//! First-handled-wins evaluation of one entity's rule table.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::warn;

use em_core::{EntityId, EntityRng};
use em_reaction::{Directive, EvaluationParameters, ReactionRulesTable};

/// The reaction selected for one entity this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Dispatched {
    pub entity:    EntityId,
    /// Type name of the rule that handled.
    pub rule_type: &'static str,
    pub priority:  i32,
    pub directive: Directive,
}

/// A rule that returned an error or panicked during evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleFault {
    pub entity:    EntityId,
    pub rule_type: &'static str,
    pub priority:  i32,
    pub reason:    String,
}

/// Walk `table` in evaluation order and return the first handled reaction.
///
/// A faulting rule (an `Err` or a panic) is treated as not handled: the
/// fault is logged, appended to `faults`, and evaluation continues with the
/// next rule.  `None` means no rule handled, which is not an error.
pub fn dispatch(
    table:  &ReactionRulesTable,
    params: &EvaluationParameters<'_>,
    rng:    &mut EntityRng,
    faults: &mut Vec<RuleFault>,
) -> Option<Dispatched> {
    for entry in table {
        let rule_type = entry.rule_type();
        let outcome = catch_unwind(AssertUnwindSafe(|| entry.rule.evaluate(params, rng)));

        let reason = match outcome {
            Ok(Ok(Some(directive))) => {
                return Some(Dispatched {
                    entity: params.entity,
                    rule_type,
                    priority: entry.priority,
                    directive,
                });
            }
            Ok(Ok(None)) => continue,
            Ok(Err(e)) => e.to_string(),
            Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
        };

        warn!(
            "{} {}: rule {rule_type} (priority {}) faulted: {reason}",
            params.tick, params.entity, entry.priority,
        );
        faults.push(RuleFault {
            entity:   params.entity,
            rule_type,
            priority: entry.priority,
            reason,
        });
    }
    None
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
