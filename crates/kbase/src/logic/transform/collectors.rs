use crate::{
    logic::{fo::FOTerm, LogicNode},
    Symbol,
};

use super::visitor::{MutFOTermVisitor, MutLogicNodeVisitor};

/// Free variables of a formula in order of first occurrence.
pub fn collect_free_vars(n: &LogicNode) -> Vec<Symbol> {
    let mut c = FreeVarCollector::default();
    c.visit(n);
    c.free
}

/// Variables of the given terms in order of first occurrence.
pub fn collect_vars<'t>(terms: impl IntoIterator<Item = &'t FOTerm>) -> Vec<Symbol> {
    let mut c = VarCollector::default();
    for t in terms {
        c.visit(t);
    }
    c.0
}

#[derive(Default)]
struct FreeVarCollector {
    bound: Vec<Symbol>,
    free: Vec<Symbol>,
}

impl FreeVarCollector {
    fn add_terms(&mut self, terms: &[&FOTerm]) {
        for v in collect_vars(terms.iter().copied()) {
            if !self.bound.contains(&v) && !self.free.contains(&v) {
                self.free.push(v);
            }
        }
    }
}

impl MutLogicNodeVisitor for FreeVarCollector {
    type Ret = ();

    fn visit_rel(&mut self, _: Symbol, args: &[FOTerm]) {
        self.add_terms(&args.iter().collect::<Vec<_>>())
    }

    fn visit_eq(&mut self, left: &FOTerm, right: &FOTerm) {
        self.add_terms(&[left, right])
    }

    fn visit_not(&mut self, child: &LogicNode) {
        self.visit(child)
    }

    fn visit_and(&mut self, left: &LogicNode, right: &LogicNode) {
        self.visit(left);
        self.visit(right)
    }

    fn visit_or(&mut self, left: &LogicNode, right: &LogicNode) {
        self.visit(left);
        self.visit(right)
    }

    fn visit_impl(&mut self, left: &LogicNode, right: &LogicNode) {
        self.visit(left);
        self.visit(right)
    }

    fn visit_equiv(&mut self, left: &LogicNode, right: &LogicNode) {
        self.visit(left);
        self.visit(right)
    }

    fn visit_all(&mut self, var: Symbol, child: &LogicNode) {
        self.bound.push(var);
        self.visit(child);
        self.bound.pop();
    }

    fn visit_ex(&mut self, var: Symbol, child: &LogicNode) {
        self.bound.push(var);
        self.visit(child);
        self.bound.pop();
    }
}

#[derive(Default)]
struct VarCollector(Vec<Symbol>);

impl MutFOTermVisitor for VarCollector {
    type Ret = ();

    fn visit_var(&mut self, s: Symbol) {
        if !self.0.contains(&s) {
            self.0.push(s);
        }
    }

    fn visit_const(&mut self, _: Symbol) {}

    fn visit_fn(&mut self, _: Symbol, args: &[FOTerm]) {
        for a in args {
            self.visit(a);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session;

    #[test]
    fn vars_in_order() {
        session(|| {
            let (x, y) = (Symbol::intern("x"), Symbol::intern("y"));
            let f = Symbol::intern("f");
            let t1 = FOTerm::Function(f, vec![FOTerm::Var(y), FOTerm::Var(x)]);
            let t2 = FOTerm::Function(f, vec![FOTerm::Var(x), FOTerm::Const(f)]);
            assert_eq!(vec![y, x], collect_vars([&t1, &t2]));
        })
    }
}
