//! Graph extraction: induced subgraphs and reachability.

use std::collections::{BTreeSet, HashMap, VecDeque};

use oracleforge_core::{
    Answer, InputKind, MonotonicitySpec, OracleDescriptor, OracleError, Result, TruthValue, Tuple,
    Value,
};

use crate::format::AdjacencyList;
use crate::oracle::{Oracle, Query};

/// `&subgraph[v, e](X, Y)`: edges `e(X, Y)` whose endpoints are both in `v`.
///
/// An edge is Definite when the edge and both endpoints are True, and
/// Possible when none of the three is False.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subgraph;

impl Oracle for Subgraph {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("subgraph", 2)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Predicate)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0).monotonic(1))
            .with_partial_answer()
            .with_finite_output_domain(0)
            .with_finite_output_domain(1)
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let mut answer = Answer::new();
        for (edge, in_e) in query.facts_of_arity(1, 2)? {
            if in_e.is_false() {
                continue;
            }
            let (from, to) = (edge.args()[0].clone(), edge.args()[1].clone());
            let value = in_e
                & query.value_at(0, vec![from.clone()])?
                & query.value_at(0, vec![to.clone()])?;
            answer.insert(vec![from, to], value);
        }
        Ok(answer)
    }
}

/// `&subgraphFile[v, "graph.txt"](X, Y)`: as [`Subgraph`] with the edges
/// read from an adjacency file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubgraphFile;

impl Oracle for SubgraphFile {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("subgraphFile", 2)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Constant)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0))
            .with_partial_answer()
            .with_finite_output_domain(0)
            .with_finite_output_domain(1)
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let graph = query.load::<AdjacencyList>(1)?;
        let vertex =
            |name: &str| name.parse::<Value>().unwrap_or_else(|_| Value::constant(name));

        let mut answer = Answer::new();
        for (from, to) in graph.edges() {
            let (from, to) = (vertex(from), vertex(to));
            let value = query.value_at(0, vec![from.clone()])? & query.value_at(0, vec![to.clone()])?;
            answer.insert(vec![from, to], value);
        }
        Ok(answer)
    }
}

/// `&reachable[e, s1, ..., sn](X)`: vertices reachable from any start
/// vertex along `e`.
///
/// Definite reachability follows True edges only; Possible follows every
/// edge that is not False. Start vertices reach themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reachable;

fn closure(starts: &[Value], adjacency: &HashMap<&Value, Vec<&Value>>) -> BTreeSet<Tuple> {
    let mut seen: BTreeSet<Tuple> = BTreeSet::new();
    let mut queue: VecDeque<&Value> = VecDeque::new();
    for start in starts {
        if seen.insert(vec![start.clone()]) {
            queue.push_back(start);
        }
    }
    while let Some(vertex) = queue.pop_front() {
        for &next in adjacency.get(vertex).into_iter().flatten() {
            if seen.insert(vec![next.clone()]) {
                queue.push_back(next);
            }
        }
    }
    seen
}

impl Oracle for Reachable {
    fn descriptor(&self) -> OracleDescriptor {
        OracleDescriptor::new("reachable", 1)
            .with_input(InputKind::Predicate)
            .with_input(InputKind::Tuple)
            .with_monotonicity(MonotonicitySpec::new().monotonic(0))
            .with_partial_answer()
            .with_finite_output_domain(0)
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Answer> {
        let starts = query.tuple(1)?;
        let edges = query.facts_of_arity(0, 2)?;

        let mut definite: HashMap<&Value, Vec<&Value>> = HashMap::new();
        let mut possible: HashMap<&Value, Vec<&Value>> = HashMap::new();
        for (edge, value) in &edges {
            let (from, to) = (&edge.args()[0], &edge.args()[1]);
            if *value == TruthValue::True {
                definite.entry(from).or_default().push(to);
            }
            if !value.is_false() {
                possible.entry(from).or_default().push(to);
            }
        }

        Answer::from_bounds(closure(starts, &definite), closure(starts, &possible))
            .map_err(|err| OracleError::defect(query.oracle(), err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use oracleforge_core::TruthValue::*;
    use oracleforge_core::{Input, Verdict};
    use oracleforge_test::files::{path_str, temp_file};

    fn edge(a: i64, b: i64) -> Vec<Value> {
        vec![Value::Int(a), Value::Int(b)]
    }

    #[test]
    fn test_subgraph_classification() {
        let view = assignment(&[
            ("v(1)", True),
            ("v(2)", True),
            ("v(3)", Undefined),
            ("v(4)", False),
            ("e(1,2)", True),
            ("e(2,3)", True),
            ("e(1,4)", True),
            ("e(2,1)", Undefined),
            ("e(3,1)", False),
        ]);
        let answer = run(&Subgraph, &[p("v"), p("e")], &view).unwrap();
        assert_eq!(answer.verdict(&edge(1, 2)), Some(Verdict::Definite));
        assert_eq!(answer.verdict(&edge(2, 3)), Some(Verdict::Possible));
        assert_eq!(answer.verdict(&edge(1, 4)), None);
        assert_eq!(answer.verdict(&edge(2, 1)), Some(Verdict::Possible));
        assert_eq!(answer.verdict(&edge(3, 1)), None);
    }

    #[test]
    fn test_subgraph_soundness() {
        let view = assignment(&[
            ("v(1)", Undefined),
            ("v(2)", True),
            ("e(1,2)", Undefined),
            ("e(2,2)", True),
            ("e(2,1)", Undefined),
        ]);
        check_soundness(&view, |a| run(&Subgraph, &[p("v"), p("e")], a)).unwrap();
    }

    #[test]
    fn test_subgraph_file() {
        let file = temp_file("% edges\n1 2\n2 3\n3 1\n");
        let inputs = [p("v"), text(&path_str(&file))];
        let view = assignment(&[("v(1)", True), ("v(2)", True), ("v(3)", Undefined)]);
        let answer = run(&SubgraphFile, &inputs, &view).unwrap();
        assert_eq!(answer.definite().len(), 1);
        assert_eq!(answer.possible().len(), 2);
        assert_eq!(answer.verdict(&edge(1, 2)), Some(Verdict::Definite));
        check_soundness(&view, |a| run(&SubgraphFile, &inputs, a)).unwrap();
    }

    #[test]
    fn test_subgraph_file_odd_tokens() {
        let file = temp_file("1 2 3\n");
        let view = assignment(&[]);
        let err = run(&SubgraphFile, &[p("v"), text(&path_str(&file))], &view).unwrap_err();
        assert!(matches!(err, OracleError::MalformedFile { .. }));
    }

    #[test]
    fn test_reachable() {
        let view = assignment(&[
            ("e(a,b)", True),
            ("e(b,c)", Undefined),
            ("e(c,d)", True),
            ("e(d,e)", False),
        ]);
        let inputs = [p("e"), Input::Tuple(vec![Value::constant("a")])];
        let answer = run(&Reachable, &inputs, &view).unwrap();
        let c = |s: &str| vec![Value::constant(s)];
        assert_eq!(answer.verdict(&c("a")), Some(Verdict::Definite));
        assert_eq!(answer.verdict(&c("b")), Some(Verdict::Definite));
        assert_eq!(answer.verdict(&c("c")), Some(Verdict::Possible));
        assert_eq!(answer.verdict(&c("d")), Some(Verdict::Possible));
        assert_eq!(answer.verdict(&c("e")), None);
        check_soundness(&view, |a| run(&Reachable, &inputs, a)).unwrap();
    }

    #[test]
    fn test_reachable_wrong_arity() {
        let view = assignment(&[("e(a)", True)]);
        let inputs = [p("e"), Input::Tuple(vec![Value::constant("a")])];
        assert!(matches!(
            run(&Reachable, &inputs, &view),
            Err(OracleError::InvalidFact { .. })
        ));
    }
}
