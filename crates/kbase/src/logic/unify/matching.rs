//! One-way matching, used for subsumption.

use std::collections::HashMap;

use crate::{
    logic::fo::{Atom, FOTerm},
    Symbol,
};

/// Bindings of pattern variables found by matching. Unlike a
/// [`super::Substitution`] a variable may be bound to itself, since the
/// variables of the target are rigid.
pub type Bindings = HashMap<Symbol, FOTerm>;

/// Extends `subst` so that `pattern` instantiated by it equals `term`. Only
/// variables of the pattern are bound; variables of `term` are treated as
/// constants.
pub fn match_terms(pattern: &FOTerm, term: &FOTerm, subst: &mut Bindings) -> bool {
    match (pattern, term) {
        (FOTerm::Var(v), t) => match subst.get(v) {
            Some(bound) => bound == t,
            None => {
                subst.insert(*v, t.clone());
                true
            }
        },
        (FOTerm::Const(c1), FOTerm::Const(c2)) => c1 == c2,
        (FOTerm::Function(f1, args1), FOTerm::Function(f2, args2)) => {
            f1 == f2
                && args1.len() == args2.len()
                && args1
                    .iter()
                    .zip(args2)
                    .all(|(a1, a2)| match_terms(a1, a2, subst))
        }
        _ => false,
    }
}

/// Matches two atoms. Equations may match in either orientation.
pub fn match_atoms(pattern: &Atom, atom: &Atom, subst: &Bindings) -> Option<Bindings> {
    match (pattern, atom) {
        (Atom::Rel(r1), Atom::Rel(r2)) => {
            if r1.spelling != r2.spelling || r1.args.len() != r2.args.len() {
                return None;
            }
            let mut s = subst.clone();
            r1.args
                .iter()
                .zip(&r2.args)
                .all(|(p, t)| match_terms(p, t, &mut s))
                .then_some(s)
        }
        (Atom::Eq(l1, r1), Atom::Eq(l2, r2)) => {
            let mut s = subst.clone();
            if match_terms(l1, l2, &mut s) && match_terms(r1, r2, &mut s) {
                return Some(s);
            }
            let mut s = subst.clone();
            (match_terms(l1, r2, &mut s) && match_terms(r1, l2, &mut s)).then_some(s)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::fo::parse_fo_term, session};

    #[test]
    fn one_way() {
        session(|| {
            let x = FOTerm::Var(Symbol::intern("x"));
            let y = FOTerm::Var(Symbol::intern("y"));
            let a = parse_fo_term("a").unwrap();
            let g = Symbol::intern("g");
            let pattern = FOTerm::Function(g, vec![x.clone(), x.clone()]);

            let mut s = Bindings::new();
            assert!(match_terms(&pattern, &parse_fo_term("g(a, a)").unwrap(), &mut s));
            assert_eq!(Some(&a), s.get(&Symbol::intern("x")));
            assert_eq!(1, s.len());

            let mut s = Bindings::new();
            assert!(!match_terms(&pattern, &parse_fo_term("g(a, b)").unwrap(), &mut s));

            // variables of the target are rigid
            let mut s = Bindings::new();
            assert!(!match_terms(&a, &y, &mut s));
            let mut s = Bindings::new();
            assert!(match_terms(&x, &y, &mut s));
        })
    }

    #[test]
    fn binding_to_itself_stays_rigid() {
        session(|| {
            let x = FOTerm::Var(Symbol::intern("x"));
            let a = parse_fo_term("a").unwrap();
            let p = Symbol::intern("p");
            let pattern = Atom::rel(p, vec![x.clone(), x.clone()]);

            let same = Atom::rel(p, vec![x.clone(), x.clone()]);
            let s = match_atoms(&pattern, &same, &Bindings::new()).unwrap();
            assert_eq!(Some(&x), s.get(&Symbol::intern("x")));

            let mixed = Atom::rel(p, vec![x.clone(), a]);
            assert!(match_atoms(&pattern, &mixed, &Bindings::new()).is_none());
        })
    }

    #[test]
    fn equations_match_both_ways() {
        session(|| {
            let x = FOTerm::Var(Symbol::intern("x"));
            let a = parse_fo_term("a").unwrap();
            let fb = parse_fo_term("f(b)").unwrap();
            let pattern = Atom::Eq(x, fb.clone());
            let target = Atom::Eq(fb, a.clone());
            let s = match_atoms(&pattern, &target, &Bindings::new()).unwrap();
            assert_eq!(Some(&a), s.get(&Symbol::intern("x")));
        })
    }
}
