use std::{
    collections::{BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    time::{Duration, Instant},
};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{
    clause::Clause,
    consts::{DEFAULT_MAX_ITERATIONS, PICK_GIVEN_RATIO},
    logic::transform::term_manipulator::var_base_name,
    Symbol,
};

use super::rules::{equality_resolvents, factors, paramodulants, resolvents};

/// Bounds on a single proof attempt. They are checked before each given
/// clause is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct SearchLimits {
    pub max_iterations: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            timeout: None,
        }
    }
}

impl SearchLimits {
    /// No bound at all. A search for a non-theorem may run forever.
    pub fn unbounded() -> Self {
        Self {
            max_iterations: None,
            timeout: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProofOutcome {
    /// The empty clause was derived.
    Entailed,
    /// The clause set saturated without a contradiction.
    NotEntailed,
    /// The search ran out of iterations or time.
    Inconclusive,
}

impl fmt::Display for ProofOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofOutcome::Entailed => write!(f, "entailed"),
            ProofOutcome::NotEntailed => write!(f, "not entailed"),
            ProofOutcome::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SearchEvent {
    Contradiction,
    /// A clause made only of answer literals. It has a single literal unless
    /// the answer is disjunctive.
    Answer(Clause),
    Saturated,
    Exhausted,
}

/// Given-clause saturation over a working clause set.
///
/// Passive clauses are picked lightest first, with every
/// `PICK_GIVEN_RATIO + 1`-th pick taking the oldest one. The state can be
/// paused after any event and resumed by calling [`Saturation::next_event`]
/// again.
pub(crate) struct Saturation {
    clauses: Vec<Clause>,
    active: Vec<usize>,
    by_weight: BTreeSet<(usize, usize)>,
    by_age: BTreeSet<usize>,
    seen: HashSet<Clause>,
    pending: VecDeque<SearchEvent>,
    var_counter: u32,
    picks: usize,
    iterations: usize,
    limits: SearchLimits,
    /// Time spent inside `next_event`. Pauses between events do not count.
    spent: Duration,
}

fn priority(c: &Clause) -> usize {
    c.size() + c.weight()
}

impl Saturation {
    pub fn new(clauses: impl IntoIterator<Item = Clause>, limits: SearchLimits) -> Self {
        let mut sat = Self {
            clauses: Vec::new(),
            active: Vec::new(),
            by_weight: BTreeSet::new(),
            by_age: BTreeSet::new(),
            seen: HashSet::new(),
            pending: VecDeque::new(),
            var_counter: 0,
            picks: 0,
            iterations: 0,
            limits,
            spent: Duration::ZERO,
        };
        for c in clauses {
            sat.insert(c);
        }
        sat
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Copy of `c` with all variables replaced by names not used anywhere
    /// in the working set.
    fn rename_apart(&mut self, c: &Clause) -> Clause {
        let replacements: HashMap<Symbol, Symbol> = c
            .vars()
            .into_iter()
            .map(|v| {
                let base = format!("{}_", var_base_name(v));
                (v, Symbol::fresh(&base, &mut self.var_counter))
            })
            .collect();
        c.rename_vars(&replacements)
    }

    fn insert(&mut self, c: Clause) {
        if c.is_empty() {
            self.pending.push_back(SearchEvent::Contradiction);
            return;
        }
        if c.is_tautology() {
            trace!("dropping tautology {}", c);
            return;
        }
        if c.is_answer_only() {
            self.pending.push_back(SearchEvent::Answer(c));
            return;
        }
        if !self.seen.insert(c.canonical()) {
            trace!("dropping duplicate {}", c);
            return;
        }
        let subsumed = self
            .active
            .iter()
            .chain(&self.by_age)
            .any(|&id| self.clauses[id].subsumes(&c));
        if subsumed {
            trace!("dropping subsumed {}", c);
            return;
        }

        let c = self.rename_apart(&c);
        let id = self.clauses.len();
        debug!("[{}] {}", id, c);
        self.by_weight.insert((priority(&c), id));
        self.by_age.insert(id);
        self.clauses.push(c);
    }

    fn limits_reached(&self, resumed: Instant) -> bool {
        if let Some(max) = self.limits.max_iterations {
            if self.iterations >= max {
                return true;
            }
        }
        if let Some(timeout) = self.limits.timeout {
            if self.spent + resumed.elapsed() >= timeout {
                return true;
            }
        }
        false
    }

    fn pick_given(&mut self) -> Option<usize> {
        self.picks += 1;
        if self.picks % (PICK_GIVEN_RATIO + 1) == 0 {
            let id = self.by_age.pop_first()?;
            self.by_weight.remove(&(priority(&self.clauses[id]), id));
            Some(id)
        } else {
            let (_, id) = self.by_weight.pop_first()?;
            self.by_age.remove(&id);
            Some(id)
        }
    }

    /// Runs the loop until something worth reporting happens.
    pub fn next_event(&mut self) -> SearchEvent {
        let resumed = Instant::now();
        let event = self.run(resumed);
        self.spent += resumed.elapsed();
        event
    }

    fn run(&mut self, resumed: Instant) -> SearchEvent {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return event;
            }
            if self.limits_reached(resumed) {
                return SearchEvent::Exhausted;
            }
            let Some(id) = self.pick_given() else {
                return SearchEvent::Saturated;
            };

            self.iterations += 1;
            let given = self.clauses[id].clone();
            debug!("given [{}] {}", id, given);
            self.active.push(id);

            let mut derived = factors(&given);
            derived.extend(equality_resolvents(&given));

            let partners = self.active.clone();
            for partner in partners {
                if partner == id {
                    let copy = self.rename_apart(&given);
                    derived.extend(resolvents(&given, &copy));
                    derived.extend(paramodulants(&given, &copy));
                } else {
                    let other = &self.clauses[partner];
                    derived.extend(resolvents(&given, other));
                    derived.extend(paramodulants(&given, other));
                    derived.extend(paramodulants(other, &given));
                }
            }

            for c in derived {
                self.insert(c);
            }
        }
    }
}
