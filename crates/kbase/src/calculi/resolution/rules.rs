//! Generating inferences of the saturation loop. Premises passed to the
//! binary rules must not share variables.

use crate::{
    clause::{Clause, Literal},
    logic::{
        fo::Atom,
        unify::{unify, unify_atoms, Substitution},
    },
};

/// Unifiers of two atoms. Equations are tried in both orientations.
fn atom_unifiers(a1: &Atom, a2: &Atom) -> Vec<Substitution> {
    let mut res = Vec::new();
    if let Ok(mgu) = unify_atoms(a1, a2, Substitution::new()) {
        res.push(mgu);
    }
    if let Atom::Eq(l, r) = a2 {
        let flipped = Atom::Eq(r.clone(), l.clone());
        if let Ok(mgu) = unify_atoms(a1, &flipped, Substitution::new()) {
            if !res.contains(&mgu) {
                res.push(mgu);
            }
        }
    }
    res
}

fn combine<'a>(
    lits: impl IntoIterator<Item = &'a Literal>,
    mgu: &Substitution,
) -> Clause {
    Clause::new(lits.into_iter().map(|l| l.instantiate(mgu)).collect())
}

/// Binary resolution on every pair of complementary literals whose atoms
/// unify. Answer literals are never resolved upon.
pub fn resolvents(c1: &Clause, c2: &Clause) -> Vec<Clause> {
    let mut res = Vec::new();

    for (i, l1) in c1.literals().iter().enumerate() {
        if l1.is_answer() {
            continue;
        }
        for (j, l2) in c2.literals().iter().enumerate() {
            if l2.is_answer() || l1.negated() == l2.negated() {
                continue;
            }
            for mgu in atom_unifiers(l1.atom(), l2.atom()) {
                res.push(combine(c1.without(i).chain(c2.without(j)), &mgu));
            }
        }
    }

    res
}

/// Instances of `c` in which two literals of equal polarity are merged.
pub fn factors(c: &Clause) -> Vec<Clause> {
    let mut res = Vec::new();
    let lits = c.literals();

    for (i, l1) in lits.iter().enumerate() {
        if l1.is_answer() {
            continue;
        }
        for l2 in &lits[i + 1..] {
            if l2.is_answer() || l1.negated() != l2.negated() {
                continue;
            }
            for mgu in atom_unifiers(l1.atom(), l2.atom()) {
                res.push(c.instantiate(&mgu));
            }
        }
    }

    res
}

/// Removes a literal `s != t` whose sides unify.
pub fn equality_resolvents(c: &Clause) -> Vec<Clause> {
    let mut res = Vec::new();

    for (i, l) in c.literals().iter().enumerate() {
        if let (Atom::Eq(s, t), true) = (l.atom(), l.negated()) {
            if let Ok(mgu) = unify(s, t) {
                res.push(combine(c.without(i), &mgu));
            }
        }
    }

    res
}

/// Rewrites non-variable subterms of `into` with the positive equations of
/// `from`, in both orientations.
///
/// `s = t ∨ C`, `L[s'] ∨ D` gives `(L[t] ∨ C ∨ D)σ` with `σ = mgu(s, s')`.
/// A variable `s` rewrites every non-variable subterm.
pub fn paramodulants(from: &Clause, into: &Clause) -> Vec<Clause> {
    let mut res = Vec::new();

    for (i, eq) in from.literals().iter().enumerate() {
        let (Atom::Eq(l, r), false) = (eq.atom(), eq.negated()) else {
            continue;
        };

        for (lhs, rhs) in [(l, r), (r, l)] {
            for (j, target) in into.literals().iter().enumerate() {
                if target.is_answer() {
                    continue;
                }
                for pos in target.atom().non_var_positions() {
                    let Some(sub) = target.atom().at(&pos) else {
                        continue;
                    };
                    let Ok(mgu) = unify(lhs, sub) else {
                        continue;
                    };
                    let rewritten = Literal::new(target.atom().replace_at(&pos, rhs), target.negated());
                    let lits = from
                        .without(i)
                        .chain(into.without(j))
                        .chain(std::iter::once(&rewritten));
                    res.push(combine(lits, &mgu));
                }
            }
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        logic::{fo::FOTerm, transform::fo_cnf::fo_cnf},
        parse::parse_fo_formula,
        session, Symbol,
    };

    fn clause(f: &str) -> Clause {
        let cs = fo_cnf(&parse_fo_formula(f).unwrap()).unwrap();
        assert_eq!(1, cs.size(), "{}", f);
        cs.clauses()[0].clone()
    }

    fn strs(cs: Vec<Clause>) -> Vec<String> {
        let mut res: Vec<_> = cs.into_iter().map(|c| c.to_string()).collect();
        res.sort();
        res
    }

    #[test]
    fn resolution() {
        session(|| {
            let c1 = clause("\\all x: (!man(x) | person(x))");
            let c2 = clause("man(Marcus)");
            assert_eq!(vec!["{person(Marcus)}"], strs(resolvents(&c1, &c2)));
            assert_eq!(vec!["{person(Marcus)}"], strs(resolvents(&c2, &c1)));

            let c3 = clause("person(Marcus)");
            assert!(resolvents(&c1, &c3).is_empty());
            assert!(resolvents(&c2, &c3).is_empty());
        })
    }

    #[test]
    fn resolution_to_empty() {
        session(|| {
            let c1 = clause("p(a)");
            let c2 = clause("!p(a)");
            let res = resolvents(&c1, &c2);
            assert_eq!(1, res.len());
            assert!(res[0].is_empty());
        })
    }

    #[test]
    fn answer_literals_are_carried() {
        session(|| {
            let ans = Atom::rel(
                Symbol::intern("$answer"),
                vec![FOTerm::Var(Symbol::intern("x"))],
            );
            let goal = Clause::new(vec![
                clause("\\all x: !hate(x, Caesar)").literals()[0].clone(),
                Literal::new(ans, false),
            ]);
            let fact = clause("hate(Marcus, Caesar)");
            let res = resolvents(&goal, &fact);
            assert!(res.iter().all(Clause::is_answer_only));
            assert_eq!(vec!["{$answer(Marcus)}"], strs(res));
        })
    }

    #[test]
    fn factoring() {
        session(|| {
            let c = clause("\\all x, y: (p(x) | p(f(y)) | q(y))");
            assert_eq!(vec!["{p(f(y)), q(y)}"], strs(factors(&c)));
            assert!(factors(&clause("\\all x: (p(x) | !p(a))")).is_empty());
        })
    }

    #[test]
    fn equality_resolution() {
        session(|| {
            let c = clause("\\all x: (f(x) != f(a) | p(x))");
            assert_eq!(vec!["{p(a)}"], strs(equality_resolvents(&c)));
            assert!(equality_resolvents(&clause("a != b")).is_empty());
            assert!(equality_resolvents(&clause("a = b | p")).is_empty());
        })
    }

    #[test]
    fn paramodulation() {
        session(|| {
            let from = clause("\\all x: add(x, zero) = x");
            let into = clause("add(succ(zero), zero) != succ(zero)");
            let res = strs(paramodulants(&from, &into));
            assert!(res.contains(&"{succ(zero) != succ(zero)}".to_string()), "{:?}", res);

            let from = clause("a = b");
            let into = clause("p(f(a))");
            assert_eq!(vec!["{p(f(b))}"], strs(paramodulants(&from, &into)));
        })
    }

    #[test]
    fn paramodulation_into_variables() {
        session(|| {
            let from = clause("a = b");
            let into = clause("\\all y: p(y)");
            assert!(paramodulants(&from, &into).is_empty());
        })
    }

    #[test]
    fn paramodulation_from_variable_side() {
        session(|| {
            let from = clause("\\all x: x = c");
            let into = clause("p(a)");
            assert_eq!(vec!["{p(c)}"], strs(paramodulants(&from, &into)));

            let into = clause("!p(f(b))");
            assert_eq!(
                vec!["{!p(c)}", "{!p(f(c))}"],
                strs(paramodulants(&from, &into))
            );
        })
    }
}
