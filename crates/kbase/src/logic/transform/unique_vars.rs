use std::collections::{HashMap, HashSet};

use crate::{
    logic::{fo::FOTerm, LogicNode},
    Symbol,
};

use super::{
    term_manipulator::{var_base_name, VariableRenamer},
    transformer::{MutFOTermTransformer, MutLogicNodeTransformer},
};

/// Renames bound variables so that no two quantifiers in the formula bind the
/// same name. The first binding of a name keeps it; later ones get
/// `<name>_<n>` with `n` drawn from `counter`.
pub fn unique_vars(n: LogicNode, counter: &mut u32) -> LogicNode {
    UniqueVars::new(counter).visit(n)
}

struct UniqueVars<'c> {
    counter: &'c mut u32,
    seen_vars: HashSet<Symbol>,
    replacements: HashMap<Symbol, Symbol>,
}

impl<'c> UniqueVars<'c> {
    fn new(counter: &'c mut u32) -> Self {
        Self {
            counter,
            seen_vars: HashSet::new(),
            replacements: HashMap::new(),
        }
    }

    fn handle_var_binding(&mut self, name: Symbol) -> Symbol {
        // Fresh names are never interned yet, so they cannot clash with a
        // variable bound further on in the formula.
        let new_name = if self.seen_vars.contains(&name) {
            Symbol::fresh(&format!("{}_", var_base_name(name)), self.counter)
        } else {
            name
        };

        self.seen_vars.insert(new_name);

        new_name
    }

    fn bind(&mut self, var: Symbol, child: LogicNode) -> (Symbol, LogicNode) {
        let disamb = self.handle_var_binding(var);
        let old = self.replacements.insert(var, disamb);

        let child = self.visit(child);

        match old {
            Some(o) => self.replacements.insert(var, o),
            None => self.replacements.remove(&var),
        };

        (disamb, child)
    }

    fn rename(&self, t: FOTerm) -> FOTerm {
        VariableRenamer(&self.replacements).visit(t)
    }
}

impl<'c> MutLogicNodeTransformer for UniqueVars<'c> {
    fn visit_rel(&mut self, spelling: Symbol, args: Vec<FOTerm>) -> LogicNode {
        LogicNode::Rel(spelling, args.into_iter().map(|a| self.rename(a)).collect())
    }

    fn visit_eq(&mut self, left: FOTerm, right: FOTerm) -> LogicNode {
        LogicNode::Eq(self.rename(left), self.rename(right))
    }

    fn visit_all(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        let (var, child) = self.bind(var, child);
        LogicNode::All(var, Box::new(child))
    }

    fn visit_ex(&mut self, var: Symbol, child: LogicNode) -> LogicNode {
        let (var, child) = self.bind(var, child);
        LogicNode::Ex(var, Box::new(child))
    }
}
