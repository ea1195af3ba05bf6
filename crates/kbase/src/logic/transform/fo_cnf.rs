use std::{collections::HashSet, fmt};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    clause::{Clause, ClauseSet, Literal},
    consts,
    logic::{
        fo::{Atom, FOTerm},
        LogicNode,
    },
    symbol::Symbol,
};

use super::{
    negation_normal::negation_normal_form,
    skolem::skolemize,
    unique_vars::unique_vars,
    validate::{validate, MalformedFormulaErr},
    visitor::MutLogicNodeVisitor,
};

/// Converts a closed formula with a throwaway converter. Prefer a long-lived
/// [`CnfConverter`] when converting several formulas of one session.
pub fn fo_cnf(formula: &LogicNode) -> Result<ClauseSet, CnfErr> {
    CnfConverter::new().convert(formula)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CnfErr {
    Malformed(MalformedFormulaErr),
    HeavyBlowUp,
}

impl fmt::Display for CnfErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CnfErr::Malformed(e) => fmt::Display::fmt(e, f),
            CnfErr::HeavyBlowUp => write!(
                f,
                "Conversion to clause normal form would create more than {} clauses",
                consts::CNF_BLOWUP_LIMIT
            ),
        }
    }
}

impl From<MalformedFormulaErr> for CnfErr {
    fn from(e: MalformedFormulaErr) -> Self {
        Self::Malformed(e)
    }
}

/// Turns closed formulas into clause sets.
///
/// The converter owns the counters for renamed variables and Skolem symbols,
/// so one converter per session never hands out the same generated name
/// twice.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CnfConverter {
    var_counter: u32,
    skolem_counter: u32,
}

impl CnfConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the conversion pipeline:
    /// 1. reject free and rebound variables
    /// 2. rewrite `→` and `<=>`
    /// 3. push negations inward
    /// 4. give every quantifier its own variable
    /// 5. skolemize
    /// 6. distribute `∨` over `∧` and split into clauses
    ///
    /// Tautological and duplicate clauses are dropped, so a valid formula
    /// yields the empty clause set.
    pub fn convert(&mut self, formula: &LogicNode) -> Result<ClauseSet, CnfErr> {
        validate(formula)?;

        let basic = formula.clone().to_basic_ops();
        let nnf = negation_normal_form(basic);
        let unique = unique_vars(nnf, &mut self.var_counter);
        let skolemized = skolemize(unique, &mut self.skolem_counter);
        trace!("skolem normal form of {}: {}", formula, skolemized);

        let cs = FOCNF.visit(&skolemized)?;

        let mut seen = HashSet::new();
        let mut res = ClauseSet::default();
        for c in Vec::from(cs) {
            if c.is_tautology() {
                trace!("dropping tautology {}", c);
                continue;
            }
            if seen.insert(c.clone()) {
                res.add(c);
            }
        }

        debug!("{} converts to {}", formula, res);
        Ok(res)
    }
}

struct FOCNF;

impl FOCNF {
    fn literal(atom: Atom, negated: bool) -> ClauseSet {
        ClauseSet::new(vec![Clause::new(vec![Literal::new(atom, negated)])])
    }
}

impl MutLogicNodeVisitor for FOCNF {
    type Ret = Result<ClauseSet, CnfErr>;

    fn visit_rel(&mut self, spelling: Symbol, args: &[FOTerm]) -> Self::Ret {
        Ok(Self::literal(Atom::rel(spelling, args.to_vec()), false))
    }

    fn visit_eq(&mut self, left: &FOTerm, right: &FOTerm) -> Self::Ret {
        Ok(Self::literal(
            Atom::equality(left.clone(), right.clone()),
            false,
        ))
    }

    fn visit_not(&mut self, child: &LogicNode) -> Self::Ret {
        match child {
            LogicNode::Rel(name, args) => Ok(Self::literal(Atom::rel(*name, args.clone()), true)),
            LogicNode::Eq(l, r) => Ok(Self::literal(
                Atom::equality(l.clone(), r.clone()),
                true,
            )),
            // Not reachable after negation normal form; convert on the spot.
            _ => self.visit(&negation_normal_form(child.clone().negate())),
        }
    }

    fn visit_and(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        let mut left = self.visit(left)?;
        let right = self.visit(right)?;
        left.unite(right);
        Ok(left)
    }

    fn visit_or(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        let left = self.visit(left)?;
        let right = self.visit(right)?;

        if left.size() * right.size() > consts::CNF_BLOWUP_LIMIT as usize {
            return Err(CnfErr::HeavyBlowUp);
        }

        let mut cs = ClauseSet::default();

        for lc in left.clauses() {
            for rc in right.clauses() {
                let lits = lc.literals().iter().chain(rc.literals()).cloned().collect();
                cs.add(Clause::new(lits));
            }
        }

        Ok(cs)
    }

    fn visit_impl(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        let n = LogicNode::Impl(left.clone().into(), right.clone().into());
        self.visit(&negation_normal_form(n))
    }

    fn visit_equiv(&mut self, left: &LogicNode, right: &LogicNode) -> Self::Ret {
        let n = LogicNode::Equiv(left.clone().into(), right.clone().into());
        self.visit(&negation_normal_form(n))
    }

    fn visit_all(&mut self, _: Symbol, child: &LogicNode) -> Self::Ret {
        self.visit(child)
    }

    fn visit_ex(&mut self, _: Symbol, child: &LogicNode) -> Self::Ret {
        // Skolemization removes every existential quantifier before this runs.
        self.visit(child)
    }
}
