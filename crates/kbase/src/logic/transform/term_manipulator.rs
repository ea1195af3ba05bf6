use std::collections::HashMap;

use super::{transformer::MutFOTermTransformer, visitor::FOTermVisitor};

use crate::{
    logic::{fo::FOTerm, unify::Substitution},
    symbol::Symbol,
};

pub struct VariableInstantiator<'a>(pub &'a Substitution);

impl<'a> FOTermVisitor for VariableInstantiator<'a> {
    type Ret = FOTerm;

    fn visit_var(&self, s: Symbol) -> Self::Ret {
        match self.0.get(s) {
            Some(t) => t.clone(),
            None => FOTerm::Var(s),
        }
    }

    fn visit_const(&self, s: Symbol) -> Self::Ret {
        FOTerm::Const(s)
    }

    fn visit_fn(&self, name: Symbol, args: &[FOTerm]) -> Self::Ret {
        let args = args.iter().map(|a| self.visit(a)).collect();

        FOTerm::Function(name, args)
    }
}

impl FOTerm {
    pub fn instantiate(&self, unifier: &Substitution) -> FOTerm {
        let instantiator = VariableInstantiator(unifier);
        instantiator.visit(self)
    }

    pub fn rename_vars(self, replacements: &HashMap<Symbol, Symbol>) -> FOTerm {
        VariableRenamer(replacements).visit(self)
    }
}

/// Renames variables according to the map and leaves unmapped ones alone.
pub struct VariableRenamer<'a>(pub &'a HashMap<Symbol, Symbol>);

impl<'a> MutFOTermTransformer for VariableRenamer<'a> {
    fn visit_var(&mut self, s: Symbol) -> FOTerm {
        FOTerm::Var(*self.0.get(&s).unwrap_or(&s))
    }
}

/// Replaces variables by terms without applying the replacement again to the
/// inserted terms.
pub struct VariableReplacer<'a>(pub &'a HashMap<Symbol, FOTerm>);

impl<'a> MutFOTermTransformer for VariableReplacer<'a> {
    fn visit_var(&mut self, s: Symbol) -> FOTerm {
        match self.0.get(&s) {
            Some(t) => t.clone(),
            None => FOTerm::Var(s),
        }
    }
}

/// Strips a renaming suffix of the form `_<digits>` from a variable name.
pub fn var_base_name(s: Symbol) -> String {
    let name = s.as_str();
    match name.rfind('_') {
        Some(i)
            if i > 0
                && i + 1 < name.len()
                && name[i + 1..].chars().all(|c| c.is_ascii_digit()) =>
        {
            name[..i].to_string()
        }
        _ => name.to_string(),
    }
}
