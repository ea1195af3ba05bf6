use crate::logic::LogicNode;

use super::transformer::MutLogicNodeTransformer;

/// Pushes every negation down to the atoms. Implications and equivalences
/// are rewritten on the way.
pub fn negation_normal_form(formula: LogicNode) -> LogicNode {
    NegationNormalForm.visit(formula)
}

struct NegationNormalForm;

impl MutLogicNodeTransformer for NegationNormalForm {
    fn visit_not(&mut self, child: LogicNode) -> LogicNode {
        match child {
            LogicNode::Rel(..) | LogicNode::Eq(..) => child.negate(),
            LogicNode::Not(c) => self.visit(*c),
            LogicNode::And(l, r) => LogicNode::Or(
                self.visit_not(*l).into(),
                self.visit_not(*r).into(),
            ),
            LogicNode::Or(l, r) => LogicNode::And(
                self.visit_not(*l).into(),
                self.visit_not(*r).into(),
            ),
            LogicNode::Impl(l, r) => {
                LogicNode::And(self.visit(*l).into(), self.visit_not(*r).into())
            }
            LogicNode::Equiv(l, r) => {
                let basic = LogicNode::Equiv(l, r).to_basic_ops();
                self.visit_not(basic)
            }
            LogicNode::All(var, c) => LogicNode::Ex(var, self.visit_not(*c).into()),
            LogicNode::Ex(var, c) => LogicNode::All(var, self.visit_not(*c).into()),
        }
    }

    fn visit_impl(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::Or(self.visit_not(left).into(), self.visit(right).into())
    }

    fn visit_equiv(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        let basic = LogicNode::Equiv(left.into(), right.into()).to_basic_ops();
        self.visit(basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::fo::parse_fo_formula, session};

    macro_rules! test_map {
        ($func:ident, $( $f:expr, $e:expr );*) => {{
            $(
                session(|| {
                    let parsed = parse_fo_formula($f).expect($f);
                    assert_eq!($e, $func(parsed).to_string());
                });
            )*
        }};
    }

    #[test]
    fn valid() {
        test_map!(
            negation_normal_form,
            "!a", "¬a";
            "!!a", "a";
            "!(a & b)", "(¬a ∨ ¬b)";
            "!(a | !b)", "(¬a ∧ b)";
            "!(a -> b)", "(a ∧ ¬b)";
            "a -> b", "(¬a ∨ b)";
            "!(a <-> b)", "((a ∧ ¬b) ∨ (b ∧ ¬a))";
            "!\\all x: p(x)", "(∃x: ¬p(x))";
            "!\\ex x: !p(x)", "(∀x: p(x))";
            "!\\all x: \\ex y: (p(x) -> q(y))", "(∃x: (∀y: (p(x) ∧ ¬q(y))))";
            "!\\ex x: x = c", "(∀x: x ≠ c)"
        );
    }
}
