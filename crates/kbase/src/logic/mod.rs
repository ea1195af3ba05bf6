pub mod fo;
pub mod transform;
pub mod unify;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

use fo::FOTerm;

use self::transform::{
    collectors::collect_free_vars, to_basic::ToBasicOps, transformer::MutLogicNodeTransformer,
};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum LogicNode {
    Rel(Symbol, Vec<FOTerm>),
    Eq(FOTerm, FOTerm),
    Not(Box<LogicNode>),
    And(Box<LogicNode>, Box<LogicNode>),
    Or(Box<LogicNode>, Box<LogicNode>),
    Impl(Box<LogicNode>, Box<LogicNode>),
    Equiv(Box<LogicNode>, Box<LogicNode>),
    All(Symbol, Box<LogicNode>),
    Ex(Symbol, Box<LogicNode>),
}

impl LogicNode {
    pub fn to_basic_ops(self) -> Self {
        ToBasicOps.visit(self)
    }

    pub fn negate(self) -> Self {
        LogicNode::Not(Box::new(self))
    }

    /// Variables occurring in the formula outside the scope of a quantifier
    /// binding them, in order of first occurrence.
    pub fn free_vars(&self) -> Vec<Symbol> {
        collect_free_vars(self)
    }

    pub fn is_closed(&self) -> bool {
        self.free_vars().is_empty()
    }
}

impl fmt::Display for LogicNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicNode::Rel(name, args) => {
                if args.is_empty() {
                    return write!(f, "{}", name);
                }
                let mut arg_str = String::new();

                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        arg_str.push_str(", ");
                    }
                    arg_str.push_str(&a.to_string());
                }

                write!(f, "{}({})", name, arg_str)
            }
            LogicNode::Eq(l, r) => write!(f, "{} = {}", l, r),
            LogicNode::Not(c) => match c.as_ref() {
                LogicNode::Eq(l, r) => write!(f, "{} ≠ {}", l, r),
                _ => write!(f, "¬{}", c),
            },
            LogicNode::And(l, r) => write!(f, "({} ∧ {})", l, r),
            LogicNode::Or(l, r) => write!(f, "({} ∨ {})", l, r),
            LogicNode::Impl(l, r) => write!(f, "({} → {})", l, r),
            LogicNode::Equiv(l, r) => write!(f, "({} <=> {})", l, r),
            LogicNode::All(var, child) => write!(f, "(∀{}: {})", var, child),
            LogicNode::Ex(var, child) => write!(f, "(∃{}: {})", var, child),
        }
    }
}
