use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{consts::ANSWER_PREDICATE, symbol::Symbol};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub spelling: Symbol,
    pub args: Vec<FOTerm>,
}

impl Relation {
    pub fn new(spelling: Symbol, args: Vec<FOTerm>) -> Self {
        Self { spelling, args }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spelling)?;
        if !self.args.is_empty() {
            write_args(f, &self.args)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FOTerm {
    Var(Symbol),
    Const(Symbol),
    Function(Symbol, Vec<FOTerm>),
}

impl FOTerm {
    pub fn is_var(&self) -> bool {
        matches!(self, FOTerm::Var(_))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, FOTerm::Const(_))
    }

    pub fn is_fn(&self) -> bool {
        matches!(self, FOTerm::Function(..))
    }

    pub fn is_ground(&self) -> bool {
        match self {
            FOTerm::Var(_) => false,
            FOTerm::Const(_) => true,
            FOTerm::Function(_, args) => args.iter().all(FOTerm::is_ground),
        }
    }

    pub fn contains_var(&self, v: Symbol) -> bool {
        match self {
            FOTerm::Var(s) => *s == v,
            FOTerm::Const(_) => false,
            FOTerm::Function(_, args) => args.iter().any(|a| a.contains_var(v)),
        }
    }

    /// Number of symbol occurrences in the term.
    pub fn weight(&self) -> usize {
        match self {
            FOTerm::Var(_) | FOTerm::Const(_) => 1,
            FOTerm::Function(_, args) => 1 + args.iter().map(FOTerm::weight).sum::<usize>(),
        }
    }

    /// The subterm reached by following `path` through argument indices.
    pub fn at(&self, path: &[usize]) -> Option<&FOTerm> {
        match path.split_first() {
            None => Some(self),
            Some((&i, rest)) => match self {
                FOTerm::Function(_, args) => args.get(i)?.at(rest),
                _ => None,
            },
        }
    }

    /// Copy of the term with the subterm at `path` replaced by `with`.
    pub fn replace_at(&self, path: &[usize], with: &FOTerm) -> FOTerm {
        match path.split_first() {
            None => with.clone(),
            Some((&i, rest)) => match self {
                FOTerm::Function(name, args) => FOTerm::Function(
                    *name,
                    args.iter()
                        .enumerate()
                        .map(|(j, a)| if j == i { a.replace_at(rest, with) } else { a.clone() })
                        .collect(),
                ),
                _ => self.clone(),
            },
        }
    }

    /// Collects the paths of all non-variable subterms, outermost first.
    pub fn non_var_positions(&self, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        match self {
            FOTerm::Var(_) => {}
            FOTerm::Const(_) => out.push(prefix.clone()),
            FOTerm::Function(_, args) => {
                out.push(prefix.clone());
                for (i, a) in args.iter().enumerate() {
                    prefix.push(i);
                    a.non_var_positions(prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}

impl fmt::Display for FOTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FOTerm::Var(name) => write!(f, "{}", name),
            FOTerm::Const(c) => write!(f, "{}", c),
            FOTerm::Function(name, args) => {
                write!(f, "{}", name)?;
                write_args(f, args)
            }
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[FOTerm]) -> fmt::Result {
    let mut arg_str = String::new();

    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            arg_str.push_str(", ");
        }
        arg_str.push_str(&a.to_string());
    }

    write!(f, "({})", arg_str)
}

/// An atomic formula: a relation application or an equation between terms.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Atom {
    Rel(Relation),
    Eq(FOTerm, FOTerm),
}

impl Atom {
    pub fn rel(spelling: Symbol, args: Vec<FOTerm>) -> Self {
        Atom::Rel(Relation::new(spelling, args))
    }

    /// Builds an equation with its sides in a fixed order, so `a = b` and
    /// `b = a` are the same atom.
    pub fn equality(l: FOTerm, r: FOTerm) -> Self {
        if r < l {
            Atom::Eq(r, l)
        } else {
            Atom::Eq(l, r)
        }
    }

    pub fn is_eq(&self) -> bool {
        matches!(self, Atom::Eq(..))
    }

    pub fn is_answer(&self) -> bool {
        match self {
            Atom::Rel(r) => r.spelling.as_str() == ANSWER_PREDICATE,
            Atom::Eq(..) => false,
        }
    }

    /// The top-level terms of the atom. For equations these are the two sides.
    pub fn terms(&self) -> Vec<&FOTerm> {
        match self {
            Atom::Rel(r) => r.args.iter().collect(),
            Atom::Eq(l, r) => vec![l, r],
        }
    }

    pub fn weight(&self) -> usize {
        1 + self.terms().into_iter().map(FOTerm::weight).sum::<usize>()
    }

    pub fn at(&self, path: &[usize]) -> Option<&FOTerm> {
        let (&i, rest) = path.split_first()?;
        self.terms().get(i)?.at(rest)
    }

    pub fn replace_at(&self, path: &[usize], with: &FOTerm) -> Atom {
        let Some((&i, rest)) = path.split_first() else {
            return self.clone();
        };
        let replace = |j: usize, t: &FOTerm| {
            if i == j {
                t.replace_at(rest, with)
            } else {
                t.clone()
            }
        };
        match self {
            Atom::Rel(r) => Atom::Rel(Relation::new(
                r.spelling,
                r.args.iter().enumerate().map(|(j, t)| replace(j, t)).collect(),
            )),
            Atom::Eq(l, r) => Atom::equality(replace(0, l), replace(1, r)),
        }
    }

    /// Paths of all non-variable subterms. The first index selects the
    /// argument (or side of an equation).
    pub fn non_var_positions(&self) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        for (i, t) in self.terms().into_iter().enumerate() {
            prefix.push(i);
            t.non_var_positions(&mut prefix, &mut out);
            prefix.pop();
        }
        out
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Rel(r) => fmt::Display::fmt(r, f),
            Atom::Eq(l, r) => write!(f, "{} = {}", l, r),
        }
    }
}
