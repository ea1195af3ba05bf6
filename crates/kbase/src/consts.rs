/// Upper bound on the number of clauses a single distribution step may create.
pub const CNF_BLOWUP_LIMIT: u32 = 200_000;

/// Given-clause selections a proof attempt may perform unless the caller
/// chooses otherwise.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Every `PICK_GIVEN_RATIO + 1`-th given clause is the oldest passive clause
/// instead of the lightest one.
pub const PICK_GIVEN_RATIO: usize = 4;

/// Predicate used to carry query bindings through a refutation.
pub const ANSWER_PREDICATE: &str = "$answer";

/// Prefix of generated Skolem functions and constants.
pub const SKOLEM_PREFIX: &str = "$sk";
