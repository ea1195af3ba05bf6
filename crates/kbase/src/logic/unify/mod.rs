pub mod matching;

use std::{collections::HashMap, fmt};

use crate::Symbol;

use super::fo::{Atom, FOTerm, Relation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnificationErr {
    DifferentRels(Relation, Relation),
    DifferentNum(Relation, Relation),
    EqWithRel(Atom, Atom),
    Occurs(Symbol, FOTerm),
    CannotBeUnified(FOTerm, FOTerm),
}

impl fmt::Display for UnificationErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnificationErr::DifferentRels(r1, r2) => {
                write!(f, "Relations '{r1}' and '{r2}' have different names")
            }
            UnificationErr::DifferentNum(r1, r2) => write!(
                f,
                "Relations '{r1}' and '{r2}' have different numbers of arguments"
            ),
            UnificationErr::EqWithRel(a1, a2) => {
                write!(f, "Cannot unify equation and relation '{a1}' and '{a2}'")
            }
            UnificationErr::Occurs(v, t) => write!(f, "Variable '{v}' occurs in '{t}'"),
            UnificationErr::CannotBeUnified(t1, t2) => {
                write!(f, "Cannot unify '{t1}' and '{t2}'")
            }
        }
    }
}

/// A finite mapping from variables to terms.
///
/// Bindings are kept fully applied: no variable in the domain occurs in any
/// bound term, so instantiating once resolves every chain of bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(HashMap<Symbol, FOTerm>);

impl Substitution {
    pub fn new() -> Self {
        Substitution(HashMap::new())
    }

    pub fn from_value(s: Symbol, t: FOTerm) -> Self {
        let mut u = Self::new();
        u.add(s, t);
        u
    }

    pub fn contains(&self, s: Symbol) -> bool {
        self.0.contains_key(&s)
    }

    pub fn get(&self, s: Symbol) -> Option<&FOTerm> {
        self.0.get(&s)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &FOTerm)> {
        self.0.iter()
    }

    /// Binds `s` to `t` and applies the new binding to the range of all
    /// existing ones. A binding of a variable to itself is ignored.
    pub fn add(&mut self, s: Symbol, t: FOTerm) {
        if t == FOTerm::Var(s) {
            return;
        }
        let u = Substitution(HashMap::from([(s, t.clone())]));
        for term in self.0.values_mut() {
            if term.contains_var(s) {
                *term = term.instantiate(&u);
            }
        }
        self.0.insert(s, t);
    }

    /// Fully dereferences `t` through the substitution.
    pub fn resolve(&self, t: &FOTerm) -> FOTerm {
        let mut cur = t.instantiate(self);
        loop {
            let next = cur.instantiate(self);
            if next == cur {
                return cur;
            }
            cur = next;
        }
    }

    /// The substitution restricted to `vars`, with every bound term resolved.
    pub fn restrict(&self, vars: &[Symbol]) -> Substitution {
        Substitution(
            vars.iter()
                .filter_map(|v| self.get(*v).map(|t| (*v, self.resolve(t))))
                .collect(),
        )
    }

    /// Bindings sorted by variable name.
    pub fn sorted(&self) -> Vec<(Symbol, &FOTerm)> {
        let mut pairs: Vec<_> = self.0.iter().map(|(k, v)| (*k, v)).collect();
        pairs.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
        pairs
    }
}

impl FromIterator<(Symbol, FOTerm)> for Substitution {
    fn from_iter<I: IntoIterator<Item = (Symbol, FOTerm)>>(iter: I) -> Self {
        let mut u = Substitution::new();
        for (s, t) in iter {
            u.add(s, t);
        }
        u
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();

        for (i, (k, v)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                s.push_str(", ");
            }
            s.push_str(&format!("{k} = {v}"));
        }

        write!(f, "{{{}}}", s)
    }
}

/// Computes the most general unifier of `t1` and `t2` that extends `mgu`.
pub fn unify_terms(
    t1: &FOTerm,
    t2: &FOTerm,
    mut mgu: Substitution,
) -> Result<Substitution, UnificationErr> {
    unify_into(t1, t2, &mut mgu)?;
    Ok(mgu)
}

pub fn unify(t1: &FOTerm, t2: &FOTerm) -> Result<Substitution, UnificationErr> {
    unify_terms(t1, t2, Substitution::new())
}

/// Unifies two atoms. Relations need equal names and arities; equations
/// are unified side by side.
pub fn unify_atoms(
    a1: &Atom,
    a2: &Atom,
    mut mgu: Substitution,
) -> Result<Substitution, UnificationErr> {
    match (a1, a2) {
        (Atom::Rel(r1), Atom::Rel(r2)) => {
            if r1.spelling != r2.spelling {
                return Err(UnificationErr::DifferentRels(r1.clone(), r2.clone()));
            }
            if r1.args.len() != r2.args.len() {
                return Err(UnificationErr::DifferentNum(r1.clone(), r2.clone()));
            }
            for (t1, t2) in r1.args.iter().zip(&r2.args) {
                unify_into(t1, t2, &mut mgu)?;
            }
            Ok(mgu)
        }
        (Atom::Eq(l1, r1), Atom::Eq(l2, r2)) => {
            unify_into(l1, l2, &mut mgu)?;
            unify_into(r1, r2, &mut mgu)?;
            Ok(mgu)
        }
        _ => Err(UnificationErr::EqWithRel(a1.clone(), a2.clone())),
    }
}

fn unify_into(t1: &FOTerm, t2: &FOTerm, mgu: &mut Substitution) -> Result<(), UnificationErr> {
    match (t1, t2) {
        (FOTerm::Var(a), FOTerm::Var(b)) if a == b => Ok(()),
        (FOTerm::Var(a), _) if mgu.contains(*a) => {
            let bound = mgu.0[a].clone();
            unify_into(&bound, t2, mgu)
        }
        (_, FOTerm::Var(b)) if mgu.contains(*b) => {
            let bound = mgu.0[b].clone();
            unify_into(t1, &bound, mgu)
        }
        (FOTerm::Var(a), _) => bind(*a, t2, mgu),
        (_, FOTerm::Var(b)) => bind(*b, t1, mgu),
        (FOTerm::Const(c1), FOTerm::Const(c2)) if c1 == c2 => Ok(()),
        (FOTerm::Function(n1, args1), FOTerm::Function(n2, args2))
            if n1 == n2 && args1.len() == args2.len() =>
        {
            for (a1, a2) in args1.iter().zip(args2) {
                unify_into(a1, a2, mgu)?;
            }
            Ok(())
        }
        _ => Err(UnificationErr::CannotBeUnified(
            mgu.resolve(t1),
            mgu.resolve(t2),
        )),
    }
}

fn bind(v: Symbol, t: &FOTerm, mgu: &mut Substitution) -> Result<(), UnificationErr> {
    let t = mgu.resolve(t);
    if t == FOTerm::Var(v) {
        return Ok(());
    }
    if t.contains_var(v) {
        return Err(UnificationErr::Occurs(v, t));
    }
    mgu.add(v, t);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse::fo::parse_fo_term, session};

    fn var(name: &str) -> FOTerm {
        FOTerm::Var(Symbol::intern(name))
    }

    fn f(name: &str, args: Vec<FOTerm>) -> FOTerm {
        FOTerm::Function(Symbol::intern(name), args)
    }

    fn c(name: &str) -> FOTerm {
        parse_fo_term(name).unwrap()
    }

    #[test]
    fn binds_variable() {
        session(|| {
            let u = unify(&var("x"), &c("Marcus")).unwrap();
            assert_eq!("{x = Marcus}", u.to_string());
        })
    }

    #[test]
    fn composes_bindings() {
        session(|| {
            // f(x, g(y), y) = f(g(z), x, a)
            let t1 = f("f", vec![var("x"), f("g", vec![var("y")]), var("y")]);
            let t2 = f("f", vec![f("g", vec![var("z")]), var("x"), c("a")]);
            let u = unify(&t1, &t2).unwrap();
            assert_eq!("{x = g(a), y = a, z = a}", u.to_string());
            assert_eq!(t1.instantiate(&u), t2.instantiate(&u));
        })
    }

    #[test]
    fn var_var_binds_left_to_right() {
        session(|| {
            let u = unify(&var("x"), &var("y")).unwrap();
            assert_eq!("{x = y}", u.to_string());
            assert!(unify(&var("x"), &var("x")).unwrap().is_empty());
        })
    }

    #[test]
    fn occurs_check() {
        session(|| {
            let x = var("x");
            let res = unify(&x, &f("f", vec![x.clone()]));
            assert!(matches!(res, Err(UnificationErr::Occurs(..))));

            // x = y, y = f(x)
            let t1 = f("p", vec![var("x"), var("y")]);
            let t2 = f("p", vec![var("y"), f("f", vec![var("x")])]);
            assert!(matches!(unify(&t1, &t2), Err(UnificationErr::Occurs(..))));
        })
    }

    #[test]
    fn clashes() {
        session(|| {
            assert!(unify(&c("a"), &c("b")).is_err());
            assert!(unify(&c("f(a)"), &c("g(a)")).is_err());
            assert!(unify(&c("f(a)"), &c("f(a, b)")).is_err());
            assert!(unify(&c("a"), &c("f(a)")).is_err());
            assert!(unify(&c("f(a)"), &c("f(a)")).unwrap().is_empty());
        })
    }

    #[test]
    fn extends_given_substitution() {
        session(|| {
            let start = Substitution::from_value(Symbol::intern("x"), c("a"));
            assert!(unify_terms(&var("x"), &c("b"), start.clone()).is_err());
            let u = unify_terms(&var("y"), &f("g", vec![var("x")]), start).unwrap();
            assert_eq!("{x = a, y = g(a)}", u.to_string());
        })
    }

    #[test]
    fn atoms() {
        session(|| {
            let hate = Symbol::intern("hate");
            let a1 = Atom::rel(hate, vec![var("x"), c("Caesar")]);
            let a2 = Atom::rel(hate, vec![c("Marcus"), var("y")]);
            let u = unify_atoms(&a1, &a2, Substitution::new()).unwrap();
            assert_eq!("{x = Marcus, y = Caesar}", u.to_string());

            let loyal = Atom::rel(Symbol::intern("loyal"), vec![var("x"), c("Caesar")]);
            assert!(matches!(
                unify_atoms(&a1, &loyal, Substitution::new()),
                Err(UnificationErr::DifferentRels(..))
            ));
            let short = Atom::rel(hate, vec![var("x")]);
            assert!(matches!(
                unify_atoms(&a1, &short, Substitution::new()),
                Err(UnificationErr::DifferentNum(..))
            ));
            let eq = Atom::Eq(var("x"), c("a"));
            assert!(matches!(
                unify_atoms(&a1, &eq, Substitution::new()),
                Err(UnificationErr::EqWithRel(..))
            ));
        })
    }

    #[test]
    fn restrict_resolves() {
        session(|| {
            let mut u = Substitution::new();
            u.add(Symbol::intern("x"), var("y"));
            u.add(Symbol::intern("y"), c("Marcus"));
            let r = u.restrict(&[Symbol::intern("x")]);
            assert_eq!("{x = Marcus}", r.to_string());
        })
    }
}
