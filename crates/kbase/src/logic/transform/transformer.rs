use super::super::{fo::FOTerm, LogicNode};
use crate::symbol::Symbol;

/// Consumes a formula and rebuilds it. Every method defaults to rebuilding
/// the node unchanged, so implementors only override what they rewrite.
pub trait MutLogicNodeTransformer {
    fn visit(&mut self, node: LogicNode) -> LogicNode {
        match node {
            LogicNode::Rel(s, args) => self.visit_rel(s, args),
            LogicNode::Eq(l, r) => self.visit_eq(l, r),
            LogicNode::Not(c) => self.visit_not(*c),
            LogicNode::And(left, right) => self.visit_and(*left, *right),
            LogicNode::Or(left, right) => self.visit_or(*left, *right),
            LogicNode::Impl(left, right) => self.visit_impl(*left, *right),
            LogicNode::Equiv(left, right) => self.visit_equiv(*left, *right),
            LogicNode::All(var, child) => self.visit_all(var, *child),
            LogicNode::Ex(var, child) => self.visit_ex(var, *child),
        }
    }

    fn visit_rel(&mut self, spelling: Symbol, args: Vec<FOTerm>) -> LogicNode {
        LogicNode::Rel(spelling, args)
    }

    fn visit_eq(&mut self, left: FOTerm, right: FOTerm) -> LogicNode {
        LogicNode::Eq(left, right)
    }

    fn visit_not(&mut self, child: LogicNode) -> LogicNode {
        LogicNode::Not(Box::new(self.visit(child)))
    }

    fn visit_and(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::And(Box::new(self.visit(left)), Box::new(self.visit(right)))
    }

    fn visit_or(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::Or(Box::new(self.visit(left)), Box::new(self.visit(right)))
    }

    fn visit_impl(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::Impl(Box::new(self.visit(left)), Box::new(self.visit(right)))
    }

    fn visit_equiv(&mut self, left: LogicNode, right: LogicNode) -> LogicNode {
        LogicNode::Equiv(Box::new(self.visit(left)), Box::new(self.visit(right)))
    }

    fn visit_all(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        LogicNode::All(var, Box::new(self.visit(child)))
    }

    fn visit_ex(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        LogicNode::Ex(var, Box::new(self.visit(child)))
    }
}

pub trait MutFOTermTransformer {
    fn visit(&mut self, term: FOTerm) -> FOTerm {
        match term {
            FOTerm::Var(s) => self.visit_var(s),
            FOTerm::Const(s) => self.visit_const(s),
            FOTerm::Function(name, args) => self.visit_fn(name, args),
        }
    }

    fn visit_var(&mut self, s: Symbol) -> FOTerm {
        FOTerm::Var(s)
    }

    fn visit_const(&mut self, s: Symbol) -> FOTerm {
        FOTerm::Const(s)
    }

    fn visit_fn(&mut self, name: Symbol, args: Vec<FOTerm>) -> FOTerm {
        FOTerm::Function(name, args.into_iter().map(|a| self.visit(a)).collect())
    }
}
