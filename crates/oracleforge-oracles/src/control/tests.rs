//! Tests for the control oracles.

use super::*;
use crate::oracle::Oracle;
use crate::test_utils::*;
use oracleforge_core::TruthValue::*;
use oracleforge_core::{Answer, Assignment, Verdict};

fn c(name: &str) -> Vec<Value> {
    vec![Value::constant(name)]
}

fn pair(a: &str, b: &str) -> Vec<Value> {
    vec![Value::constant(a), Value::constant(b)]
}

fn majority(view: &Assignment) -> Answer {
    run(&ControlsMajority, &[p("strat"), p("owns")], view).unwrap()
}

#[test]
fn test_tally() {
    let tally = [
        (30, TruthValue::True),
        (20, TruthValue::Undefined),
        (-5, TruthValue::Undefined),
        (100, TruthValue::False),
    ]
    .into_iter()
    .try_fold(Tally::default(), |tally, (shares, value)| {
        tally.checked_add(shares, value)
    })
    .unwrap();
    assert_eq!(tally.pessimistic(), 25);
    assert_eq!(tally.optimistic(), 50);
}

#[test]
fn test_tally_rejects_overflow() {
    let full = Tally::default()
        .checked_add(i64::MAX, TruthValue::True)
        .unwrap();
    assert_eq!(full.checked_add(1, TruthValue::True), None);
    assert_eq!(full.checked_add(1, TruthValue::Undefined), None);
    assert!(full.checked_add(1, TruthValue::False).is_some());

    let low = Tally::default()
        .checked_add(i64::MIN, TruthValue::True)
        .unwrap();
    assert_eq!(low.checked_add(-1, TruthValue::Undefined), None);
}

#[test]
fn test_overflowing_shares_are_invalid_facts() {
    let huge = format!("owns(a,t,{})", i64::MAX);
    let view = assignment(&[(huge.as_str(), True), ("owns(a,t,1)", True)]);

    let err = run(&Controls, &[p("owns")], &view).unwrap_err();
    match err {
        OracleError::InvalidFact { fact, .. } => assert_eq!(fact.to_string(), "owns(a,t,1)"),
        other => panic!("unexpected error {other}"),
    }

    let mut view = view;
    view.assign(fact("strat(a)"), True).unwrap();
    let err = run(&ControlsMajority, &[p("strat"), p("owns")], &view).unwrap_err();
    assert!(matches!(err, OracleError::InvalidFact { .. }));
}

#[test]
fn test_pooled_control_beyond_i64() {
    let half = i64::MAX / 2 + 1;
    let entries = [
        format!("owns(a,b,{})", i64::MAX),
        format!("owns(a,c,{})", i64::MAX),
        format!("owns(b,d,{half})"),
        format!("owns(c,d,{half})"),
    ];
    let entries: Vec<(&str, TruthValue)> =
        entries.iter().map(|text| (text.as_str(), True)).collect();
    let view = assignment(&entries);

    let config = quick_config().with_majority_threshold(i64::MAX - 1);
    let answer = run_with(&Controls, &[p("owns")], &view, &config).unwrap();
    assert_eq!(answer.verdict(&pair("a", "b")), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&pair("a", "d")), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&pair("b", "d")), None);
}

#[test]
fn test_direct_majority_is_definite() {
    let view = assignment(&[("owns(a,t,60)", True)]);
    let answer = run(&Controls, &[p("owns")], &view).unwrap();
    assert_eq!(answer.verdict(&pair("a", "t")), Some(Verdict::Definite));
    assert_eq!(answer.len(), 1);
}

#[test]
fn test_controls_pools_shares_of_controlled_companies() {
    let view = assignment(&[
        ("owns(a,b,51)", True),
        ("owns(a,c,20)", True),
        ("owns(b,c,31)", Undefined),
        ("owns(b,d,10)", False),
    ]);
    let answer = run(&Controls, &[p("owns")], &view).unwrap();
    assert_eq!(answer.verdict(&pair("a", "b")), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&pair("a", "c")), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&pair("b", "c")), None);
    assert_eq!(answer.verdict(&pair("a", "d")), None);
    check_soundness(&view, |a| run(&Controls, &[p("owns")], a)).unwrap();
}

#[test]
fn test_controls_threshold_from_config() {
    let view = assignment(&[("owns(a,b,40)", True)]);
    let config = quick_config().with_majority_threshold(30);
    let answer = run_with(&Controls, &[p("owns")], &view, &config).unwrap();
    assert_eq!(answer.verdict(&pair("a", "b")), Some(Verdict::Definite));
}

#[test]
fn test_controls_rejects_negative_shares() {
    let view = assignment(&[("owns(a,b,-1)", True)]);
    assert!(matches!(
        run(&Controls, &[p("owns")], &view),
        Err(OracleError::InvalidFact { .. })
    ));
}

#[test]
fn test_strategic() {
    let view = assignment(&[
        ("strat(a)", True),
        ("strat(b)", Undefined),
        ("strat(d)", False),
        ("controlledBy(x,a)", True),
        ("controlledBy(y,a,b)", True),
        ("controlledBy(z,d)", True),
        ("controlledBy(z,a)", Undefined),
        ("controlledBy(w,a)", False),
    ]);
    let inputs = [p("strat"), p("controlledBy")];
    let answer = run(&Strategic, &inputs, &view).unwrap();
    assert_eq!(answer.verdict(&c("x")), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&c("y")), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&c("z")), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&c("w")), None);
    check_soundness(&view, |a| run(&Strategic, &inputs, a)).unwrap();
}

#[test]
fn test_strategic_needs_a_controller() {
    let view = assignment(&[("controlledBy(x)", True)]);
    let err = run(&Strategic, &[p("strat"), p("controlledBy")], &view).unwrap_err();
    assert!(matches!(err, OracleError::InvalidFact { .. }));
}

#[test]
fn test_controls_majority() {
    let view = assignment(&[
        ("strat(a)", True),
        ("strat(b)", Undefined),
        ("strat(c)", False),
        ("owns(a,t,60)", True),
        ("owns(a,u,30)", True),
        ("owns(b,u,30)", True),
        ("owns(c,v,90)", True),
        ("owns(a,v,20)", Undefined),
    ]);
    let answer = majority(&view);
    assert_eq!(answer.verdict(&c("t")), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&c("u")), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&c("v")), None);
    check_soundness(&view, |a| Ok::<_, OracleError>(majority(a))).unwrap();
}

#[test]
fn test_controls_majority_with_max() {
    let view = assignment(&[
        ("strat(a)", True),
        ("strat(b)", Undefined),
        ("owns(a,t,4000000)", True),
        ("owns(b,t,3000000)", True),
    ]);
    let inputs = |max| [p("strat"), p("owns"), int(max)];

    let answer = run(&ControlsMajorityWithMax, &inputs(10_000_000), &view).unwrap();
    assert_eq!(answer.verdict(&c("t")), Some(Verdict::Possible));

    let capped = run(&ControlsMajorityWithMax, &inputs(5_000_000), &view).unwrap();
    assert_eq!(capped.verdict(&c("t")), None);

    let err = run(&ControlsMajorityWithMax, &inputs(1_000_000), &view).unwrap_err();
    assert!(matches!(err, OracleError::LogicDefect { .. }));
}

#[test]
fn test_controls_majority_nonmonotonic() {
    let view = assignment(&[
        ("strat(a)", True),
        ("strat(b)", Undefined),
        ("owns(a,t,70)", True),
        ("owns(b,t,-30)", True),
        ("owns(a,u,40)", True),
        ("owns(b,u,20)", True),
    ]);
    let inputs = [p("strat"), p("owns")];
    let answer = run(&ControlsMajorityNonmonotonic, &inputs, &view).unwrap();
    assert_eq!(answer.verdict(&c("t")), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&c("u")), Some(Verdict::Possible));
    check_soundness(&view, |a| run(&ControlsMajorityNonmonotonic, &inputs, a)).unwrap();

    assert!(ControlsMajorityNonmonotonic
        .descriptor()
        .properties
        .monotonicity
        .is_nonmonotonic());
    assert!(run(&ControlsMajority, &inputs, &view).is_err());
}
