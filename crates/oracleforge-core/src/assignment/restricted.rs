//! Restricted view: only the declared input predicates are visible.

use crate::fact::Fact;
use crate::truth::TruthValue;

use super::AssignmentView;

/// A view limited to the predicate inputs of one oracle call.
///
/// # Panics
///
/// Every accessor panics when asked about a predicate outside the allowed
/// set. Such a query means the oracle body and its registered signature
/// disagree, which is a wiring defect rather than a runtime condition.
pub struct RestrictedView<'a> {
    base: &'a dyn AssignmentView,
    oracle: &'a str,
    allowed: Vec<&'a str>,
}

impl<'a> RestrictedView<'a> {
    pub fn new(base: &'a dyn AssignmentView, oracle: &'a str, allowed: Vec<&'a str>) -> Self {
        Self {
            base,
            oracle,
            allowed,
        }
    }

    fn check(&self, predicate: &str) {
        if !self.allowed.iter().any(|allowed| *allowed == predicate) {
            panic!(
                "oracle `{}` read predicate `{}` outside its declared inputs {:?}",
                self.oracle, predicate, self.allowed
            );
        }
    }
}

impl AssignmentView for RestrictedView<'_> {
    fn value_of(&self, fact: &Fact) -> TruthValue {
        self.check(fact.predicate());
        self.base.value_of(fact)
    }

    fn known_facts(&self, predicate: &str) -> Vec<(&Fact, TruthValue)> {
        self.check(predicate);
        self.base.known_facts(predicate)
    }

    fn is_closed(&self, predicate: &str) -> bool {
        self.check(predicate);
        self.base.is_closed(predicate)
    }
}
