//! Formula checking against CNF and pseudo-Boolean files.
//!
//! Variable `i` of the file is the fact `p(i)` of the predicate input; a
//! negative literal `-i` stands for its negation. An unobserved variable is
//! Undefined unless `p` is closed.

use oracleforge_core::{
    Answer, InputKind, OracleDescriptor, OracleError, Result, TruthValue, Value,
};
use tracing::debug;

use crate::format::{Cnf, PbFormula};
use crate::oracle::{Oracle, Query};

fn literal_value(query: &Query<'_>, literal: i64) -> Result<TruthValue> {
    let index = literal.checked_abs().ok_or_else(|| {
        OracleError::defect(query.oracle(), format!("literal {literal} has no variable"))
    })?;
    let variable = query.value_at(0, vec![Value::Int(index)])?;
    Ok(if literal < 0 { !variable } else { variable })
}

fn file_checker(name: &'static str) -> OracleDescriptor {
    OracleDescriptor::new(name, 0)
        .with_input(InputKind::Predicate)
        .with_input(InputKind::Constant)
        .with_partial_answer()
}

/// `&sat[p, "file.cnf"]()`: Kleene value of the CNF under `p`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sat;

impl Oracle for Sat {
    fn descriptor(&self) -> OracleDescriptor {
        file_checker("sat")
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let cnf = query.load::<Cnf>(1)?;
        let mut value = TruthValue::True;
        for clause in cnf.clauses() {
            let mut clause_value = TruthValue::False;
            for &literal in clause.literals() {
                clause_value = clause_value | literal_value(query, literal)?;
            }
            value = value & clause_value;
            if value.is_false() {
                break;
            }
        }
        debug!(event = "formula_checked", oracle = query.oracle(), clauses = cnf.clauses().len(), value = %value);
        Ok(Answer::nullary(value))
    }
}

/// Parsed constraints bound every partial sum, so this marks a parser bug.
fn overflow(query: &Query<'_>) -> OracleError {
    OracleError::defect(query.oracle(), "constraint left-hand side overflows i64")
}

/// `&pb[p, "file.pb"]()`: conjunction of pseudo-Boolean constraints.
///
/// Each constraint bounds its left-hand side by an interval: True literals
/// contribute their coefficient, Undefined literals contribute anywhere
/// between zero and the coefficient. A constraint is True when the whole
/// interval satisfies it and False when none of it does.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoBoolean;

impl Oracle for PseudoBoolean {
    fn descriptor(&self) -> OracleDescriptor {
        file_checker("pb")
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let formula = query.load::<PbFormula>(1)?;
        let mut value = TruthValue::True;
        for constraint in formula.constraints() {
            let (mut low, mut high) = (0i64, 0i64);
            for term in &constraint.terms {
                let (to_low, to_high) = match literal_value(query, term.literal)? {
                    TruthValue::True => (term.coefficient, term.coefficient),
                    TruthValue::Undefined => (term.coefficient.min(0), term.coefficient.max(0)),
                    TruthValue::False => continue,
                };
                low = low.checked_add(to_low).ok_or_else(|| overflow(query))?;
                high = high.checked_add(to_high).ok_or_else(|| overflow(query))?;
            }
            let constraint_value = match constraint.decide(low, high) {
                Some(holds) => TruthValue::from_bool(holds),
                None => TruthValue::Undefined,
            };
            value = value & constraint_value;
            if value.is_false() {
                break;
            }
        }
        debug!(event = "formula_checked", oracle = query.oracle(), constraints = formula.constraints().len(), value = %value);
        Ok(Answer::nullary(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use oracleforge_core::OracleError;
    use oracleforge_core::TruthValue::*;
    use oracleforge_test::files::{path_str, temp_file};

    fn sat(cnf: &str, view: &oracleforge_core::Assignment) -> Result<Answer> {
        let file = temp_file(cnf);
        run(&Sat, &[p("x"), text(&path_str(&file))], view)
    }

    #[test]
    fn test_sat_kleene_value() {
        let cnf = "p cnf 3 2\n1 -2 0\n2 3 0\n";
        let view = assignment(&[("x(1)", True), ("x(2)", Undefined), ("x(3)", Undefined)]);
        assert_eq!(sat(cnf, &view).unwrap().truth_of(&[]), Undefined);

        let view = assignment(&[("x(1)", True), ("x(2)", Undefined), ("x(3)", True)]);
        assert_eq!(sat(cnf, &view).unwrap().truth_of(&[]), True);

        let view = assignment(&[("x(1)", False), ("x(2)", True), ("x(3)", Undefined)]);
        assert_eq!(sat(cnf, &view).unwrap().truth_of(&[]), False);
    }

    #[test]
    fn test_sat_closed_predicate() {
        let mut view = assignment(&[("x(1)", True)]);
        view.close("x");
        assert_eq!(sat("-2 0\n1 0\n", &view).unwrap().truth_of(&[]), True);
    }

    #[test]
    fn test_sat_is_sound() {
        let file = temp_file("1 -2 0\n-1 3 0\n2 -3 0\n");
        let inputs = [p("x"), text(&path_str(&file))];
        let view = assignment(&[("x(1)", Undefined), ("x(2)", Undefined), ("x(3)", True)]);
        check_soundness(&view, |a| run(&Sat, &inputs, a)).unwrap();
    }

    #[test]
    fn test_malformed_cnf_emits_no_verdict() {
        let view = assignment(&[("x(1)", True)]);
        let err = sat("1 0\n0\n", &view).unwrap_err();
        assert!(matches!(err, OracleError::MalformedFile { ref oracle, .. } if oracle == "sat"));
    }

    #[test]
    fn test_out_of_range_files_are_malformed() {
        let view = assignment(&[("x(1)", True)]);
        let err = sat(&format!("{} 0\n", i64::MIN), &view).unwrap_err();
        assert!(matches!(err, OracleError::MalformedFile { .. }), "{err}");

        let file = temp_file(&format!("{max}*1 {max}*2 >= 1\n", max = i64::MAX));
        let err = run(&PseudoBoolean, &[p("x"), text(&path_str(&file))], &view).unwrap_err();
        assert!(matches!(err, OracleError::MalformedFile { .. }), "{err}");
    }

    #[test]
    fn test_pb_extreme_coefficients() {
        let file = temp_file(&format!("{max}*1 -1*2 >= {max}\n", max = i64::MAX));
        let inputs = [p("x"), text(&path_str(&file))];
        let value = |entries: &[(&str, TruthValue)]| {
            run(&PseudoBoolean, &inputs, &assignment(entries))
                .unwrap()
                .truth_of(&[])
        };
        assert_eq!(value(&[("x(1)", True), ("x(2)", False)]), True);
        assert_eq!(value(&[("x(1)", True), ("x(2)", Undefined)]), Undefined);
        assert_eq!(value(&[("x(1)", Undefined), ("x(2)", True)]), False);
    }

    #[test]
    fn test_missing_file() {
        let view = assignment(&[]);
        let err = run(&Sat, &[p("x"), text("/nonexistent/f.cnf")], &view).unwrap_err();
        assert!(matches!(err, OracleError::FileAccess { .. }));
    }

    #[test]
    fn test_pb_intervals() {
        let file = temp_file("* two constraints\n2*1 + 3*-2 >= 3;\n1*1 1*3 <= 1\n");
        let inputs = [p("x"), text(&path_str(&file))];
        let value = |entries: &[(&str, TruthValue)]| {
            run(&PseudoBoolean, &inputs, &assignment(entries))
                .unwrap()
                .truth_of(&[])
        };

        assert_eq!(value(&[("x(1)", True), ("x(2)", False), ("x(3)", False)]), True);
        assert_eq!(value(&[("x(1)", True), ("x(2)", True), ("x(3)", False)]), False);
        assert_eq!(value(&[("x(1)", True), ("x(2)", Undefined), ("x(3)", False)]), Undefined);
        assert_eq!(value(&[("x(1)", True), ("x(2)", False), ("x(3)", True)]), False);

        let view = assignment(&[("x(1)", Undefined), ("x(2)", Undefined), ("x(3)", Undefined)]);
        check_soundness(&view, |a| run(&PseudoBoolean, &inputs, a)).unwrap();
    }

    #[test]
    fn test_pb_equality_with_negative_coefficients() {
        let file = temp_file("-1*1 2*2 = 1\n");
        let inputs = [p("x"), text(&path_str(&file))];
        let view = assignment(&[("x(1)", Undefined), ("x(2)", True)]);
        assert_eq!(
            run(&PseudoBoolean, &inputs, &view).unwrap().truth_of(&[]),
            Undefined
        );
        check_soundness(&view, |a| run(&PseudoBoolean, &inputs, a)).unwrap();
    }
}
