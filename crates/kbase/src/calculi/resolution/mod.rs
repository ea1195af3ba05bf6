//! Refutation proving with resolution and paramodulation.
//!
//! A goal is negated, converted to clauses and saturated together with the
//! clauses of the knowledge base until the empty clause shows up, nothing
//! new can be derived or the [`SearchLimits`] run out.

mod query;
pub mod rules;
mod saturation;

use log::info;

pub use query::Query;
pub use saturation::{ProofOutcome, SearchLimits};

use crate::{
    clause::Clause,
    logic::{
        transform::fo_cnf::{CnfConverter, CnfErr},
        LogicNode,
    },
};

use self::{
    query::{negated_with_answer, peel_existentials},
    saturation::{Saturation, SearchEvent},
};

/// Decides whether `clauses` entail the closed formula `goal`.
///
/// Skolem symbols of the negated goal come from `converter`, so they never
/// clash with symbols already present in `clauses`.
pub fn prove<'c>(
    clauses: impl IntoIterator<Item = &'c Clause>,
    goal: &LogicNode,
    converter: &mut CnfConverter,
    limits: SearchLimits,
) -> Result<ProofOutcome, CnfErr> {
    let negated = converter.convert(&goal.clone().negate())?;
    let working = clauses.into_iter().cloned().chain(Vec::from(negated));

    let mut sat = Saturation::new(working, limits);
    let outcome = loop {
        match sat.next_event() {
            SearchEvent::Contradiction => break ProofOutcome::Entailed,
            SearchEvent::Answer(_) => continue,
            SearchEvent::Saturated => break ProofOutcome::NotEntailed,
            SearchEvent::Exhausted => break ProofOutcome::Inconclusive,
        }
    };

    info!("{} is {} ({} iterations)", goal, outcome, sat.iterations());
    Ok(outcome)
}

/// Starts a search for bindings of the leading existential variables of
/// `goal`. A goal without them yields at most the empty substitution.
pub fn query<'c>(
    clauses: impl IntoIterator<Item = &'c Clause>,
    goal: &LogicNode,
    converter: &mut CnfConverter,
    limits: SearchLimits,
) -> Result<Query, CnfErr> {
    let (vars, body) = peel_existentials(goal);
    let target = converter.convert(&negated_with_answer(&vars, body))?;
    let working = clauses.into_iter().cloned().chain(Vec::from(target));

    info!("querying {} for {} variables", goal, vars.len());
    Ok(Query::new(Saturation::new(working, limits), vars))
}
