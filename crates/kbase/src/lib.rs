pub mod arena;
pub mod calculi;
pub mod clause;
mod consts;
pub mod kb;
pub mod logic;
pub mod parse;
mod session;
mod symbol;
pub mod tamper_protect;

pub use consts::{CNF_BLOWUP_LIMIT, DEFAULT_MAX_ITERATIONS};
pub use session::session;
pub use symbol::Symbol;

pub use calculi::resolution::{ProofOutcome, Query, SearchLimits};
pub use kb::{KbErr, KbResult, KnowledgeBase, Provenance};
pub use logic::{fo::FOTerm, transform::fo_cnf::CnfConverter, LogicNode};
