//! Tests for assignments and views.

use super::*;
use crate::truth::TruthValue::{False, True, Undefined};

fn fact(s: &str) -> Fact {
    s.parse().unwrap()
}

#[test]
fn test_known_facts_keep_observation_order() {
    let assignment = Assignment::from_facts([
        (fact("p(3)"), True),
        (fact("q(1)"), False),
        (fact("p(1)"), Undefined),
        (fact("p(2)"), False),
    ])
    .unwrap();

    let known: Vec<String> = assignment
        .known_facts("p")
        .into_iter()
        .map(|(f, v)| format!("{f}={v}"))
        .collect();
    assert_eq!(known, ["p(3)=true", "p(1)=undefined", "p(2)=false"]);
    assert!(assignment.known_facts("r").is_empty());
}

#[test]
fn test_refinement_keeps_position() {
    let mut assignment = Assignment::new();
    assignment.set_undefined(fact("p(1)")).unwrap();
    assignment.set_true(fact("p(2)")).unwrap();
    assignment.set_true(fact("p(1)")).unwrap();

    let order: Vec<_> = assignment.known_facts("p").into_iter().map(|(f, _)| f.clone()).collect();
    assert_eq!(order, vec![fact("p(1)"), fact("p(2)")]);
    assert!(assignment.is_total());
}

#[test]
fn test_no_backward_transition() {
    let mut assignment = Assignment::new();
    assignment.set_false(fact("p(1)")).unwrap();

    let err = assignment.set_undefined(fact("p(1)")).unwrap_err();
    assert_eq!(
        err,
        AssignmentError::Conflict {
            fact: fact("p(1)"),
            current: False,
            requested: Undefined,
        }
    );
    assert!(assignment.set_true(fact("p(1)")).is_err());
    assert!(assignment.set_false(fact("p(1)")).is_ok());
}

#[test]
fn test_closed_predicate_defaults_false() {
    let mut assignment = Assignment::new();
    assert_eq!(assignment.value_of(&fact("q(9)")), Undefined);
    assignment.close("q");
    assert!(assignment.is_closed("q"));
    assert_eq!(assignment.value_of(&fact("q(9)")), False);
    assert_eq!(assignment.value_of(&fact("r(9)")), Undefined);
}

#[test]
fn test_undefined_facts() {
    let assignment = Assignment::from_facts([
        (fact("a"), True),
        (fact("b"), Undefined),
        (fact("c"), Undefined),
    ])
    .unwrap();
    assert_eq!(assignment.undefined_facts(), vec![&fact("b"), &fact("c")]);
    assert!(!assignment.is_total());
}

#[test]
fn test_overlay_overrides_and_appends() {
    let assignment =
        Assignment::from_facts([(fact("p(1)"), Undefined), (fact("p(2)"), True)]).unwrap();

    let overlay = OverlayView::new(&assignment, fact("p(1)"), True);
    assert_eq!(overlay.value_of(&fact("p(1)")), True);
    assert_eq!(
        overlay.known_facts("p").iter().map(|(_, v)| *v).collect::<Vec<_>>(),
        vec![True, True]
    );

    let appended = OverlayView::new(&assignment, fact("p(3)"), False);
    assert_eq!(appended.known_facts("p").len(), 3);
    assert_eq!(appended.known_facts("q").len(), 0);
}

#[test]
fn test_restricted_view_allows_declared() {
    let assignment = Assignment::from_facts([(fact("p(1)"), True)]).unwrap();
    let view = RestrictedView::new(&assignment, "id", vec!["p"]);
    assert_eq!(view.value_of(&fact("p(1)")), True);
    assert_eq!(view.known_facts("p").len(), 1);
}

#[test]
#[should_panic(expected = "outside its declared inputs")]
fn test_restricted_view_panics_on_undeclared() {
    let assignment = Assignment::new();
    let view = RestrictedView::new(&assignment, "id", vec!["p"]);
    view.known_facts("q");
}
