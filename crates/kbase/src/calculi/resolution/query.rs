use std::collections::HashSet;

use log::{debug, info};

use crate::{
    clause::Clause,
    consts::ANSWER_PREDICATE,
    logic::{
        fo::{Atom, FOTerm},
        unify::Substitution,
        LogicNode,
    },
    Symbol,
};

use super::saturation::{ProofOutcome, Saturation, SearchEvent};

/// Splits `∃x1 ... ∃xn: F` into the variables `x1 .. xn` and `F`.
pub(crate) fn peel_existentials(goal: &LogicNode) -> (Vec<Symbol>, &LogicNode) {
    let mut vars = Vec::new();
    let mut node = goal;
    while let LogicNode::Ex(v, body) = node {
        vars.push(*v);
        node = body;
    }
    (vars, node)
}

/// `∀x1 ... ∀xn: (¬F ∨ $answer(x1, .., xn))`, the refutation target of a
/// query.
pub(crate) fn negated_with_answer(vars: &[Symbol], body: &LogicNode) -> LogicNode {
    let answer = LogicNode::Rel(
        Symbol::intern(ANSWER_PREDICATE),
        vars.iter().map(|v| FOTerm::Var(*v)).collect(),
    );
    let mut node = LogicNode::Or(Box::new(body.clone().negate()), Box::new(answer));
    for v in vars.iter().rev() {
        node = LogicNode::All(*v, Box::new(node));
    }
    node
}

/// Lazily enumerates the bindings of a query's leading existential
/// variables.
///
/// Every call to `next` resumes the saturation where the last answer was
/// found. Each binding is yielded once. Dropping the query cancels the
/// search.
pub struct Query {
    saturation: Option<Saturation>,
    vars: Vec<Symbol>,
    answers: HashSet<Vec<FOTerm>>,
    disjunctive: bool,
    outcome: Option<ProofOutcome>,
}

impl Query {
    pub(crate) fn new(saturation: Saturation, vars: Vec<Symbol>) -> Self {
        Self {
            saturation: Some(saturation),
            vars,
            answers: HashSet::new(),
            disjunctive: false,
            outcome: None,
        }
    }

    /// The variables the yielded substitutions bind.
    pub fn vars(&self) -> &[Symbol] {
        &self.vars
    }

    /// How the search ended, or `None` while it can still produce answers.
    /// A query that found at least one answer, disjunctive answers included,
    /// is `Entailed`.
    pub fn outcome(&self) -> Option<ProofOutcome> {
        self.outcome
    }

    fn finish(&mut self, outcome: ProofOutcome) {
        let outcome = match outcome {
            ProofOutcome::NotEntailed | ProofOutcome::Inconclusive
                if self.disjunctive || !self.answers.is_empty() =>
            {
                ProofOutcome::Entailed
            }
            o => o,
        };
        if let Some(sat) = &self.saturation {
            info!(
                "query finished as {} after {} iterations with {} answers",
                outcome,
                sat.iterations(),
                self.answers.len()
            );
        }
        self.outcome = Some(outcome);
        self.saturation = None;
    }

    fn binding(&self, answer: &Clause) -> Option<Vec<FOTerm>> {
        let [literal] = answer.literals() else {
            return None;
        };
        match literal.atom() {
            Atom::Rel(r) if r.args.len() == self.vars.len() => Some(r.args.clone()),
            _ => None,
        }
    }
}

impl Iterator for Query {
    type Item = Substitution;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.saturation.as_mut()?.next_event();
            match event {
                SearchEvent::Contradiction => {
                    // The base refutes the goal without binding anything.
                    self.finish(ProofOutcome::Entailed);
                    return Some(Substitution::new());
                }
                SearchEvent::Answer(c) => {
                    let Some(args) = self.binding(&c) else {
                        debug!("disjunctive answer {}", c);
                        self.disjunctive = true;
                        continue;
                    };
                    if !self.answers.insert(args.clone()) {
                        debug!("repeated answer {}", c);
                        continue;
                    }
                    debug!("answer {}", c);
                    return Some(self.vars.iter().copied().zip(args).collect());
                }
                SearchEvent::Saturated => {
                    self.finish(ProofOutcome::NotEntailed);
                    return None;
                }
                SearchEvent::Exhausted => {
                    self.finish(ProofOutcome::Inconclusive);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::parse_fo_formula, session};

    #[test]
    fn peels_leading_existentials() {
        session(|| {
            let f = parse_fo_formula("\\ex x, y: (loyal(x, y) & \\ex z: p(z))").unwrap();
            let (vars, body) = peel_existentials(&f);
            assert_eq!(vec![Symbol::intern("x"), Symbol::intern("y")], vars);
            assert_eq!("(loyal(x, y) ∧ (∃z: p(z)))", body.to_string());

            let f = parse_fo_formula("person(Marcus)").unwrap();
            assert!(peel_existentials(&f).0.is_empty());
        })
    }

    #[test]
    fn answer_target_is_closed() {
        session(|| {
            let f = parse_fo_formula("\\ex x: hate(x, Caesar)").unwrap();
            let (vars, body) = peel_existentials(&f);
            let target = negated_with_answer(&vars, body);
            assert!(target.is_closed());
            assert_eq!("(∀x: (¬hate(x, Caesar) ∨ $answer(x)))", target.to_string());
        })
    }
}
