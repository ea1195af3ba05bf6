use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    calculi::resolution::{self, ProofOutcome, Query, SearchLimits},
    clause::{Clause, ClauseSet},
    logic::{
        transform::fo_cnf::{CnfConverter, CnfErr},
        LogicNode,
    },
    tamper_protect::ProtectedState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotErr {
    InvalidSeal,
}

impl fmt::Display for SnapshotErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotErr::InvalidSeal => write!(f, "The snapshot has been modified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KbErr {
    Cnf(CnfErr),
    Snapshot(SnapshotErr),
}

impl fmt::Display for KbErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KbErr::Cnf(e) => fmt::Display::fmt(e, f),
            KbErr::Snapshot(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl From<CnfErr> for KbErr {
    fn from(e: CnfErr) -> Self {
        Self::Cnf(e)
    }
}

impl From<SnapshotErr> for KbErr {
    fn from(e: SnapshotErr) -> Self {
        Self::Snapshot(e)
    }
}

pub type KbResult<T> = Result<T, KbErr>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Axiom,
    Lemma,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Axiom => write!(f, "axiom"),
            Provenance::Lemma => write!(f, "lemma"),
        }
    }
}

/// An asserted formula together with its clauses.
#[derive(Debug, Clone)]
pub struct Entry {
    formula: LogicNode,
    clauses: ClauseSet,
    provenance: Provenance,
}

impl Entry {
    pub fn formula(&self) -> &LogicNode {
        &self.formula
    }

    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.provenance, self.formula)
    }
}

/// An append-only collection of axioms and proven lemmas.
///
/// The base owns the [`CnfConverter`] used for every formula it sees, so
/// Skolem symbols stay unique over the whole session.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
    converter: CnfConverter,
    limits: SearchLimits,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, formula: LogicNode, clauses: ClauseSet, provenance: Provenance) {
        info!("added {} {} as {}", provenance, formula, clauses);
        self.entries.push(Entry {
            formula,
            clauses,
            provenance,
        });
    }

    /// Converts `formula` and appends it without any check for consistency.
    pub fn add_axiom(&mut self, formula: LogicNode) -> KbResult<()> {
        let clauses = self.converter.convert(&formula)?;
        self.push(formula, clauses, Provenance::Axiom);
        Ok(())
    }

    /// Appends `formula` only if the base entails it.
    pub fn add_lemma(&mut self, formula: LogicNode) -> KbResult<ProofOutcome> {
        let outcome = self.prove(&formula)?;
        if outcome == ProofOutcome::Entailed {
            let clauses = self.converter.convert(&formula)?;
            self.push(formula, clauses, Provenance::Lemma);
        } else {
            info!("rejected lemma {}: {}", formula, outcome);
        }
        Ok(outcome)
    }

    pub fn prove(&mut self, goal: &LogicNode) -> KbResult<ProofOutcome> {
        let clauses = self.entries.iter().flat_map(|e| e.clauses.clauses());
        Ok(resolution::prove(
            clauses,
            goal,
            &mut self.converter,
            self.limits,
        )?)
    }

    pub fn query(&mut self, goal: &LogicNode) -> KbResult<Query> {
        let clauses = self.entries.iter().flat_map(|e| e.clauses.clauses());
        Ok(resolution::query(
            clauses,
            goal,
            &mut self.converter,
            self.limits,
        )?)
    }

    /// The asserted formulas in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &LogicNode> {
        self.entries.iter().map(Entry::formula)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Clauses of all entries.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.entries.iter().flat_map(|e| e.clauses.clauses())
    }

    pub fn snapshot(&self) -> Snapshot {
        let entries = self
            .entries
            .iter()
            .map(|e| SnapshotEntry {
                provenance: e.provenance,
                formula: e.formula.clone(),
            })
            .collect();
        let mut snapshot = Snapshot {
            entries,
            seal: String::new(),
        };
        snapshot.seal = snapshot.compute_seal();
        snapshot
    }

    /// Rebuilds a base from a snapshot after checking its seal. Lemmas are
    /// taken over without proving them again.
    pub fn restore(snapshot: Snapshot, limits: SearchLimits) -> KbResult<Self> {
        if !snapshot.verify_seal(&snapshot.seal) {
            return Err(SnapshotErr::InvalidSeal.into());
        }

        let mut kb = Self::with_limits(limits);
        for e in snapshot.entries {
            let clauses = kb.converter.convert(&e.formula)?;
            kb.push(e.formula, clauses, e.provenance);
        }
        Ok(kb)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub provenance: Provenance,
    pub formula: LogicNode,
}

/// The formulas of a knowledge base, sealed against modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub entries: Vec<SnapshotEntry>,
    pub seal: String,
}

impl ProtectedState for Snapshot {
    fn compute_seal_info(&self) -> String {
        let entries: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{}:{}", e.provenance, e.formula))
            .collect();
        format!("kbase|entries=[{}]", entries.join(","))
    }
}
