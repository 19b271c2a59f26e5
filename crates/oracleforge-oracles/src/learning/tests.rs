//! Tests for the learning oracles.

use super::*;
use crate::test_utils::*;
use oracleforge_core::TruthValue::*;
use oracleforge_core::{Value, Verdict};

fn rendered(nogoods: &[Nogood]) -> Vec<String> {
    nogoods.iter().map(ToString::to_string).collect()
}

#[test]
fn test_id_copies_input() {
    let view = assignment(&[("p(1)", True), ("p(2)", Undefined), ("p(3)", False)]);
    let answer = run(&Id, &[p("p")], &view).unwrap();
    assert_eq!(answer.verdict(&[Value::Int(1)]), Some(Verdict::Definite));
    assert_eq!(answer.verdict(&[Value::Int(2)]), Some(Verdict::Possible));
    assert_eq!(answer.verdict(&[Value::Int(3)]), None);
    check_soundness(&view, |a| run(&Id, &[p("p")], a)).unwrap();
}

#[test]
fn test_id_learns_both_directions() {
    let view = assignment(&[("p(1)", Undefined)]);
    let nogoods = learn(&Id, &[p("p")], &view).unwrap();
    assert_eq!(
        rendered(&nogoods),
        ["{p(1), -&id[p](1)}", "{-p(1), &id[p](1)}"]
    );
}

#[test]
fn test_id_rejects_wrong_arity() {
    let view = assignment(&[("p(1,2)", True)]);
    let err = run(&Id, &[p("p")], &view).unwrap_err();
    assert!(matches!(err, OracleError::InvalidFact { .. }));
}

#[test]
fn test_neg() {
    let inputs = [int(1), p("p")];
    let answer = run(&Neg, &inputs, &assignment(&[("p(1)", False)])).unwrap();
    assert_eq!(answer.verdict(&[Value::Int(1)]), Some(Verdict::Definite));

    let answer = run(&Neg, &inputs, &assignment(&[("p(1)", True)])).unwrap();
    assert!(answer.is_empty());

    let answer = run(&Neg, &inputs, &assignment(&[("p(2)", True)])).unwrap();
    assert_eq!(answer.verdict(&[Value::Int(1)]), Some(Verdict::Possible));

    let mut closed = assignment(&[("p(2)", True)]);
    closed.close("p");
    let answer = run(&Neg, &inputs, &closed).unwrap();
    assert_eq!(answer.verdict(&[Value::Int(1)]), Some(Verdict::Definite));
}

#[test]
fn test_neg_learning() {
    let nogoods = learn(&Neg, &[int(1), p("p")], &assignment(&[])).unwrap();
    assert_eq!(
        rendered(&nogoods),
        ["{p(1), &neg[1,p](1)}", "{-p(1), -&neg[1,p](1)}"]
    );
}

#[test]
fn test_disj() {
    let inputs = [p("i"), p("pos"), p("neg")];
    let value = |entries: &[(&str, TruthValue)]| {
        run(&Disj, &inputs, &assignment(entries))
            .unwrap()
            .truth_of(&[])
    };

    assert_eq!(value(&[("pos(1)", True), ("i(1)", True)]), True);
    assert_eq!(value(&[("neg(0)", True), ("i(0)", False)]), True);
    assert_eq!(
        value(&[("pos(1)", True), ("i(1)", False), ("neg(0)", True), ("i(0)", True)]),
        False
    );
    assert_eq!(value(&[("pos(1)", True), ("i(1)", Undefined)]), Undefined);
    assert_eq!(value(&[]), False);

    let view = assignment(&[
        ("pos(1)", Undefined),
        ("i(1)", Undefined),
        ("neg(2)", True),
        ("i(2)", Undefined),
    ]);
    check_soundness(&view, |a| run(&Disj, &inputs, a)).unwrap();
}

#[test]
fn test_disj_learns_one_nogood_per_member() {
    let view = assignment(&[("pos(1)", True), ("pos(2)", Undefined), ("neg(0)", True)]);
    let nogoods = learn(&Disj, &[p("i"), p("pos"), p("neg")], &view).unwrap();
    assert_eq!(
        rendered(&nogoods),
        [
            "{pos(1), i(1), -&disj[i,pos,neg]()}",
            "{pos(2), i(2), -&disj[i,pos,neg]()}",
            "{neg(0), -i(0), -&disj[i,pos,neg]()}",
        ]
    );
}

#[test]
fn test_parity_evaluation() {
    let value = |entries: &[(&str, TruthValue)]| {
        run(&Parity, &[p("p")], &assignment(entries))
            .unwrap()
            .truth_of(&[])
    };
    assert_eq!(value(&[]), True);
    assert_eq!(value(&[("p(1)", True), ("p(2)", True), ("p(3)", False)]), True);
    assert_eq!(value(&[("p(1)", True), ("p(2)", False)]), False);
    assert_eq!(value(&[("p(1)", True), ("p(2)", Undefined)]), Undefined);
}

#[test]
fn test_parity_learns_one_nogood_per_sign_combination() {
    let view = assignment(&[("p(1)", Undefined), ("p(2)", Undefined), ("p(3)", Undefined)]);
    let nogoods = learn(&Parity, &[p("p")], &view).unwrap();
    assert_eq!(
        rendered(&nogoods),
        [
            "{-p(1), -p(2), -p(3), -&parity[p]()}",
            "{p(1), -p(2), p(3), -&parity[p]()}",
            "{-p(1), p(2), p(3), -&parity[p]()}",
            "{p(1), p(2), -p(3), -&parity[p]()}",
        ]
    );
}

#[test]
fn test_parity_nogoods_hold_on_every_completion() {
    let view = assignment(&[("p(1)", Undefined), ("p(2)", Undefined), ("p(3)", Undefined)]);
    let nogoods = learn(&Parity, &[p("p")], &view).unwrap();
    assert_eq!(nogoods.len(), 4);
    for completion in oracleforge_test::completions(&view) {
        let answer = run(&Parity, &[p("p")], &completion).unwrap();
        for nogood in &nogoods {
            assert!(!nogood.evaluate(&completion, &answer).is_true());
        }
    }
}

#[test]
fn test_parity_without_facts_learns_nothing() {
    assert!(learn(&Parity, &[p("p")], &assignment(&[])).unwrap().is_empty());
}
