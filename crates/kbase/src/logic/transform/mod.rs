pub mod canonical;
pub mod collectors;
pub mod fo_cnf;
pub mod negation_normal;
pub mod skolem;
pub mod term_manipulator;
pub mod to_basic;
pub mod transformer;
pub mod unique_vars;
pub mod validate;
pub mod visitor;

pub use fo_cnf::{fo_cnf, CnfConverter, CnfErr};
pub use negation_normal::negation_normal_form;
pub use validate::MalformedFormulaErr;
