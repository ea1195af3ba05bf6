use super::super::LogicNode;
use super::transformer::MutLogicNodeTransformer;

/// Rewrites implications and equivalences in terms of `¬`, `∧` and `∨`.
pub struct ToBasicOps;

impl MutLogicNodeTransformer for ToBasicOps {
    fn visit_impl(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        let left = self.visit(left);
        let right = self.visit(right);
        LogicNode::Or(left.negate().into(), right.into())
    }

    fn visit_equiv(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        let left = self.visit(left);
        let right = self.visit(right);
        let not_left = left.clone().negate().into();
        let not_right = right.clone().negate().into();

        let forward = LogicNode::Or(not_left, right.into()).into();
        let backward = LogicNode::Or(not_right, left.into()).into();

        LogicNode::And(forward, backward)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse::fo::parse_fo_formula, session};

    #[test]
    fn valid() {
        session(|| {
            let formulas = [
                ("a -> b", "(¬a ∨ b)"),
                ("a <-> b", "((¬a ∨ b) ∧ (¬b ∨ a))"),
                ("!(a => b) & c", "(¬(¬a ∨ b) ∧ c)"),
                (
                    "\\all x: (man(x) -> person(x))",
                    "(∀x: (¬man(x) ∨ person(x)))",
                ),
                ("(a -> b) <=> c", "((¬(¬a ∨ b) ∨ c) ∧ (¬c ∨ (¬a ∨ b)))"),
            ];

            for (f, e) in formulas {
                let parsed = parse_fo_formula(f).unwrap();
                assert_eq!(e, parsed.to_basic_ops().to_string());
            }
        })
    }
}
