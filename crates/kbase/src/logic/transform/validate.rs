use std::fmt;

use crate::{
    logic::{fo::FOTerm, LogicNode},
    Symbol,
};

use super::visitor::{MutFOTermVisitor, MutLogicNodeVisitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedFormulaErr {
    FreeVariable(Symbol),
    Shadowed(Symbol),
}

impl fmt::Display for MalformedFormulaErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedFormulaErr::FreeVariable(v) => {
                write!(f, "Variable '{v}' is not bound by any quantifier")
            }
            MalformedFormulaErr::Shadowed(v) => write!(
                f,
                "Variable '{v}' is bound again inside the scope of a quantifier binding it"
            ),
        }
    }
}

/// Checks that the formula is closed and that no quantifier rebinds a
/// variable already bound by an enclosing quantifier.
pub fn validate(formula: &LogicNode) -> Result<(), MalformedFormulaErr> {
    ScopeChecker::default().visit(formula)
}

#[derive(Default)]
struct ScopeChecker {
    scope: Vec<Symbol>,
}

impl ScopeChecker {
    fn check_terms<'t>(
        &self,
        terms: impl IntoIterator<Item = &'t FOTerm>,
    ) -> Result<(), MalformedFormulaErr> {
        let mut checker = BoundVarChecker(&self.scope);
        for t in terms {
            checker.visit(t)?;
        }
        Ok(())
    }

    fn bind(&mut self, var: Symbol, child: &LogicNode) -> Result<(), MalformedFormulaErr> {
        if self.scope.contains(&var) {
            return Err(MalformedFormulaErr::Shadowed(var));
        }
        self.scope.push(var);
        let res = self.visit(child);
        self.scope.pop();
        res
    }
}

impl MutLogicNodeVisitor for ScopeChecker {
    type Ret = Result<(), MalformedFormulaErr>;

    fn visit_rel(&mut self, _: Symbol, args: &[FOTerm]) -> Self::Ret {
        self.check_terms(args)
    }

    fn visit_eq(&mut self, left: &FOTerm, right: &FOTerm) -> Self::Ret {
        self.check_terms([left, right])
    }

    fn visit_not(&mut self, child: &LogicNode) -> Self::Ret {
        self.visit(child)
    }

    fn visit_and(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        self.visit(left)?;
        self.visit(right)
    }

    fn visit_or(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        self.visit(left)?;
        self.visit(right)
    }

    fn visit_impl(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        self.visit(left)?;
        self.visit(right)
    }

    fn visit_equiv(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        self.visit(left)?;
        self.visit(right)
    }

    fn visit_all(&mut self, var: Symbol, child: &LogicNode) -> Self::Ret {
        self.bind(var, child)
    }

    fn visit_ex(&mut self, var: Symbol, child: &LogicNode) -> Self::Ret {
        self.bind(var, child)
    }
}

struct BoundVarChecker<'a>(&'a [Symbol]);

impl<'a> MutFOTermVisitor for BoundVarChecker<'a> {
    type Ret = Result<(), MalformedFormulaErr>;

    fn visit_var(&mut self, s: Symbol) -> Self::Ret {
        if self.0.contains(&s) {
            Ok(())
        } else {
            Err(MalformedFormulaErr::FreeVariable(s))
        }
    }

    fn visit_const(&mut self, _: Symbol) -> Self::Ret {
        Ok(())
    }

    fn visit_fn(&mut self, _: Symbol, args: &[FOTerm]) -> Self::Ret {
        for a in args {
            self.visit(a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::fo::parse_fo_formula, session};

    #[test]
    fn closed_formulas() {
        session(|| {
            for f in [
                "man(Marcus)",
                "\\all x: (man(x) -> person(x))",
                "(\\all x: p(x)) & (\\all x: q(x))",
                "\\all x, y: (f(x) = f(y) -> x = y)",
            ] {
                let parsed = parse_fo_formula(f).unwrap();
                assert_eq!(Ok(()), validate(&parsed), "{}", f);
            }
        })
    }

    #[test]
    fn free_variable() {
        session(|| {
            let x = Symbol::intern("x");
            let n = LogicNode::Rel(Symbol::intern("p"), vec![FOTerm::Var(x)]);
            assert_eq!(Err(MalformedFormulaErr::FreeVariable(x)), validate(&n));

            let y = Symbol::intern("y");
            let n = LogicNode::All(
                y,
                Box::new(LogicNode::Eq(
                    FOTerm::Var(y),
                    FOTerm::Function(Symbol::intern("f"), vec![FOTerm::Var(x)]),
                )),
            );
            assert_eq!(Err(MalformedFormulaErr::FreeVariable(x)), validate(&n));
        })
    }

    #[test]
    fn shadowing() {
        session(|| {
            let parsed = parse_fo_formula("\\all x: \\ex x: p(x)").unwrap();
            assert_eq!(
                Err(MalformedFormulaErr::Shadowed(Symbol::intern("x"))),
                validate(&parsed)
            );
        })
    }
}
