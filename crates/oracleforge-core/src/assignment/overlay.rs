//! Overlay view: one fact decided on top of another view.

use crate::fact::Fact;
use crate::truth::TruthValue;

use super::AssignmentView;

/// A view that overrides the value of a single fact.
///
/// Used to probe how an oracle reacts when one Undefined fact is decided
/// without copying the underlying assignment.
pub struct OverlayView<'a> {
    base: &'a dyn AssignmentView,
    fact: Fact,
    value: TruthValue,
}

impl<'a> OverlayView<'a> {
    pub fn new(base: &'a dyn AssignmentView, fact: Fact, value: TruthValue) -> Self {
        Self { base, fact, value }
    }

    pub fn fact(&self) -> &Fact {
        &self.fact
    }
}

impl AssignmentView for OverlayView<'_> {
    fn value_of(&self, fact: &Fact) -> TruthValue {
        if *fact == self.fact {
            self.value
        } else {
            self.base.value_of(fact)
        }
    }

    fn known_facts(&self, predicate: &str) -> Vec<(&Fact, TruthValue)> {
        let mut facts = self.base.known_facts(predicate);
        let mut seen = false;
        for (fact, value) in facts.iter_mut() {
            if **fact == self.fact {
                *value = self.value;
                seen = true;
            }
        }
        if !seen && self.fact.predicate() == predicate {
            facts.push((&self.fact, self.value));
        }
        facts
    }

    fn is_closed(&self, predicate: &str) -> bool {
        self.base.is_closed(predicate)
    }
}
