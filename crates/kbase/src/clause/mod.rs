use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    logic::{
        fo::{Atom, FOTerm, Relation},
        transform::{canonical::canonical_clause, collectors::collect_vars},
        unify::{
            matching::{match_atoms, Bindings},
            Substitution,
        },
    },
    Symbol,
};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Literal {
    atom: Atom,
    negated: bool,
}

impl Literal {
    pub fn new(atom: Atom, negated: bool) -> Self {
        Literal { atom, negated }
    }

    pub fn atom(&self) -> &Atom {
        &self.atom
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    pub fn not(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            negated: !self.negated,
        }
    }

    pub fn is_answer(&self) -> bool {
        self.atom.is_answer()
    }

    pub fn weight(&self) -> usize {
        self.atom.weight()
    }

    /// Applies `f` to every top-level term of the atom.
    pub fn map_terms(&self, mut f: impl FnMut(&FOTerm) -> FOTerm) -> Literal {
        let atom = match &self.atom {
            Atom::Rel(r) => {
                Atom::Rel(Relation::new(r.spelling, r.args.iter().map(&mut f).collect()))
            }
            Atom::Eq(l, r) => {
                let l = f(l);
                Atom::equality(l, f(r))
            }
        };
        Literal::new(atom, self.negated)
    }

    pub fn instantiate(&self, u: &Substitution) -> Self {
        self.map_terms(|t| t.instantiate(u))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.atom, self.negated) {
            (Atom::Eq(l, r), true) => write!(f, "{} != {}", l, r),
            (a, negated) => write!(f, "{}{}", if negated { "!" } else { "" }, a),
        }
    }
}

/// A disjunction of literals with set semantics. Literals are kept sorted
/// and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    pub fn empty() -> Self {
        Clause {
            literals: Vec::new(),
        }
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn size(&self) -> usize {
        self.literals.len()
    }

    pub fn is_positive(&self) -> bool {
        self.literals.iter().all(|l| !l.negated())
    }

    pub fn weight(&self) -> usize {
        self.literals.iter().map(Literal::weight).sum()
    }

    pub fn instantiate(&self, u: &Substitution) -> Self {
        Clause::new(self.literals.iter().map(|l| l.instantiate(u)).collect())
    }

    pub fn rename_vars(&self, replacements: &HashMap<Symbol, Symbol>) -> Self {
        Clause::new(
            self.literals
                .iter()
                .map(|l| l.map_terms(|t| t.clone().rename_vars(replacements)))
                .collect(),
        )
    }

    /// All literals except the one at `idx`.
    pub fn without(&self, idx: usize) -> impl Iterator<Item = &Literal> {
        self.literals
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != idx)
            .map(|(_, l)| l)
    }

    /// Variables of the clause in order of first occurrence.
    pub fn vars(&self) -> Vec<Symbol> {
        collect_vars(self.literals.iter().flat_map(|l| l.atom().terms()))
    }

    /// Whether the clause contains a literal and its negation, or an
    /// equation `t = t`.
    pub fn is_tautology(&self) -> bool {
        let complementary = self
            .literals
            .windows(2)
            .any(|w| w[0].atom() == w[1].atom() && w[0].negated() != w[1].negated());
        complementary
            || self
                .literals
                .iter()
                .any(|l| !l.negated() && matches!(l.atom(), Atom::Eq(a, b) if a == b))
    }

    /// Whether the clause only records a query answer.
    pub fn is_answer_only(&self) -> bool {
        !self.is_empty() && self.literals.iter().all(Literal::is_answer)
    }

    /// Whether some instance of this clause is a subset of `other`.
    pub fn subsumes(&self, other: &Clause) -> bool {
        if self.size() > other.size() {
            return false;
        }
        subsumes_from(&self.literals, &other.literals, &Bindings::new())
    }

    /// A representative of the clause that is equal for clauses that only
    /// differ in the names of their variables.
    pub fn canonical(&self) -> Clause {
        canonical_clause(self)
    }
}

fn subsumes_from(lits: &[Literal], target: &[Literal], s: &Bindings) -> bool {
    let Some((first, rest)) = lits.split_first() else {
        return true;
    };
    target.iter().any(|t| {
        t.negated() == first.negated()
            && match match_atoms(first.atom(), t.atom(), s) {
                Some(s) => subsumes_from(rest, target, &s),
                None => false,
            }
    })
}

impl From<Clause> for Vec<Literal> {
    fn from(c: Clause) -> Self {
        c.literals
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lits = String::new();

        for (i, a) in self.literals.iter().enumerate() {
            lits.push_str(&a.to_string());
            if i < self.size() - 1 {
                lits.push_str(", ");
            }
        }

        write!(f, "{{{}}}", lits)
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Literal;

    type IntoIter = std::slice::Iter<'a, Literal>;

    fn into_iter(self) -> Self::IntoIter {
        self.literals.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ClauseSet {
    clauses: Vec<Clause>,
}

impl ClauseSet {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseSet { clauses }
    }

    pub fn add(&mut self, c: Clause) {
        self.clauses.push(c)
    }

    pub fn unite(&mut self, cs: ClauseSet) {
        self.clauses.extend(cs.clauses)
    }

    pub fn size(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn contains_empty(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = String::new();

        for (i, a) in self.clauses.iter().enumerate() {
            clauses.push_str(&a.to_string());
            if i < self.size() - 1 {
                clauses.push_str(", ");
            }
        }

        write!(f, "{}", clauses)
    }
}

impl From<ClauseSet> for Vec<Clause> {
    fn from(c: ClauseSet) -> Self {
        c.clauses
    }
}

impl<'a> IntoIterator for &'a ClauseSet {
    type Item = &'a Clause;

    type IntoIter = std::slice::Iter<'a, Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}
