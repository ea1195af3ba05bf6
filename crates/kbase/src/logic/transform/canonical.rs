use std::collections::HashMap;

use crate::{
    clause::{Clause, Literal},
    logic::fo::FOTerm,
    Symbol,
};

use super::transformer::MutFOTermTransformer;

/// Renames the variables of a clause to `$v1`, `$v2`, ... in order of first
/// occurrence. Literals are ordered by their shape with variables erased
/// first, so the numbering does not depend on the original names.
pub fn canonical_clause(c: &Clause) -> Clause {
    let mut lits: Vec<&Literal> = c.literals().iter().collect();
    lits.sort_by_cached_key(|l| {
        let mut eraser = VarEraser(Symbol::intern("$v"));
        l.map_terms(|t| eraser.visit(t.clone()))
    });

    let mut canon = VarCanonicizer::default();
    Clause::new(
        lits.into_iter()
            .map(|l| l.map_terms(|t| canon.visit(t.clone())))
            .collect(),
    )
}

struct VarEraser(Symbol);

impl MutFOTermTransformer for VarEraser {
    fn visit_var(&mut self, _: Symbol) -> FOTerm {
        FOTerm::Var(self.0)
    }
}

#[derive(Default)]
struct VarCanonicizer {
    counter: u32,
    replacements: HashMap<Symbol, Symbol>,
}

impl MutFOTermTransformer for VarCanonicizer {
    fn visit_var(&mut self, s: Symbol) -> FOTerm {
        let spell = match self.replacements.get(&s) {
            Some(s) => *s,
            None => {
                self.counter += 1;
                let spell = Symbol::intern(&format!("$v{}", self.counter));
                self.replacements.insert(s, spell);
                spell
            }
        };
        FOTerm::Var(spell)
    }
}
