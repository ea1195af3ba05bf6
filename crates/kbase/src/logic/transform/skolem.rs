use std::collections::HashMap;

use crate::{
    consts::SKOLEM_PREFIX,
    logic::{fo::FOTerm, LogicNode},
    Symbol,
};

use super::{
    term_manipulator::VariableReplacer,
    transformer::{MutFOTermTransformer, MutLogicNodeTransformer},
};

/// Replaces existentially quantified variables by Skolem terms over the
/// universally quantified variables in scope. Expects a formula in negation
/// normal form whose quantifiers bind pairwise distinct names.
///
/// Generated symbols are named `$sk<n>`, with `n` drawn from `counter` and
/// skipped forward past every name the session already knows.
pub fn skolemize(n: LogicNode, counter: &mut u32) -> LogicNode {
    Skolemization::new(counter).visit(n)
}

struct Skolemization<'c> {
    counter: &'c mut u32,
    quantified_vars: Vec<Symbol>,
    replacement_map: HashMap<Symbol, FOTerm>,
}

impl<'c> Skolemization<'c> {
    fn new(counter: &'c mut u32) -> Self {
        Self {
            counter,
            quantified_vars: Vec::new(),
            replacement_map: HashMap::new(),
        }
    }

    fn get_skolem_term(&mut self) -> FOTerm {
        let name = Symbol::fresh(SKOLEM_PREFIX, self.counter);

        if self.quantified_vars.is_empty() {
            FOTerm::Const(name)
        } else {
            let args = self.quantified_vars.iter().map(|v| FOTerm::Var(*v)).collect();
            FOTerm::Function(name, args)
        }
    }

    fn replace(&self, t: FOTerm) -> FOTerm {
        VariableReplacer(&self.replacement_map).visit(t)
    }
}

impl<'c> MutLogicNodeTransformer for Skolemization<'c> {
    fn visit_rel(&mut self, spelling: Symbol, args: Vec<FOTerm>) -> LogicNode {
        LogicNode::Rel(spelling, args.into_iter().map(|a| self.replace(a)).collect())
    }

    fn visit_eq(&mut self, left: FOTerm, right: FOTerm) -> LogicNode {
        LogicNode::Eq(self.replace(left), self.replace(right))
    }

    fn visit_all(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        self.quantified_vars.push(var);
        let child = self.visit(child);
        self.quantified_vars.pop();

        LogicNode::All(var, Box::new(child))
    }

    fn visit_ex(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        let term = self.get_skolem_term();

        let old = self.replacement_map.insert(var, term);

        let ret = self.visit(child);

        match old {
            Some(v) => self.replacement_map.insert(var, v),
            None => self.replacement_map.remove(&var),
        };

        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logic::transform::negation_normal::negation_normal_form, parse::fo::parse_fo_formula,
        session,
    };

    #[test]
    fn valid() {
        let formulas = [
            ("\\ex x: p(x)", "p($sk1)"),
            ("\\all x: \\ex y: loyal(x, y)", "(∀x: loyal(x, $sk1(x)))"),
            (
                "\\all x: \\all y: \\ex z: add(x, y) = z",
                "(∀x: (∀y: add(x, y) = $sk1(x, y)))",
            ),
            (
                "(\\ex x: p(x)) & \\all y: \\ex z: q(y, z)",
                "(p($sk1) ∧ (∀y: q(y, $sk2(y))))",
            ),
            (
                "!\\all x: \\ex y: r(x, y)",
                "(∀y: ¬r($sk1, y))",
            ),
        ];

        for (f, e) in formulas {
            session(|| {
                let parsed = parse_fo_formula(f).unwrap();
                let mut counter = 0;
                let sk = skolemize(negation_normal_form(parsed), &mut counter);
                assert_eq!(e, sk.to_string());
            })
        }
    }

    #[test]
    fn fresh_across_runs() {
        session(|| {
            let f = parse_fo_formula("\\ex x: p(x)").unwrap();
            let mut c1 = 0;
            let mut c2 = 0;
            let first = skolemize(f.clone(), &mut c1);
            let second = skolemize(f, &mut c2);
            assert_eq!("p($sk1)", first.to_string());
            assert_eq!("p($sk2)", second.to_string());
        })
    }
}
