use std::{
    collections::{HashMap, HashSet},
    iter::Peekable,
};

use crate::{
    logic::{fo::FOTerm, LogicNode},
    symbol::Symbol,
};

use super::{ParseErr, ParseResult, Token, TokenKind, Tokenizer};

/// Parses a first-order formula.
///
/// Identifiers bound by an enclosing quantifier are variables. Every other
/// identifier is a constant or function inside a term and a relation at
/// formula level.
pub fn parse_fo_formula(formula: &str) -> ParseResult<LogicNode> {
    FOParser::parse(formula)
}

/// Parses a single term. No identifier is bound, so the result is ground.
pub fn parse_fo_term(term: &str) -> ParseResult<FOTerm> {
    let mut parser = FOParser::new(term);
    let res = parser.parse_term()?;
    match parser.tokens.next() {
        Some(_) => Err(ParseErr::Expected(
            "end of input".to_string(),
            parser.got_msg(),
        )),
        None => Ok(res),
    }
}

struct FOParser<'t> {
    tokens: Peekable<Tokenizer<'t>>,
    quantifier_scope: Vec<Symbol>,
    rel_arities: HashMap<Symbol, usize>,
    fn_arities: HashMap<Symbol, usize>,
    consts: HashSet<Symbol>,
}

impl<'t> FOParser<'t> {
    fn new(formula: &'t str) -> Self {
        Self {
            tokens: Tokenizer::new(formula).peekable(),
            quantifier_scope: Vec::new(),
            rel_arities: HashMap::new(),
            fn_arities: HashMap::new(),
            consts: HashSet::new(),
        }
    }

    pub fn parse(formula: &'t str) -> ParseResult<LogicNode> {
        let mut parser = FOParser::new(formula);
        if parser.tokens.peek().is_none() {
            return Err(ParseErr::EmptyFormula);
        }
        let node = parser.parse_equiv()?;
        match parser.tokens.next() {
            Some(Err(e)) => Err(e),
            Some(_) => Err(ParseErr::Expected(
                "end of input".to_string(),
                parser.got_msg(),
            )),
            None => Ok(*node),
        }
    }

    fn parse_equiv(&mut self) -> ParseResult<Box<LogicNode>> {
        let mut stub = self.parse_impl()?;

        while self.next_is(TokenKind::Equiv) {
            self.bump()?;
            let right = self.parse_impl()?;
            stub = Box::new(LogicNode::Equiv(stub, right));
        }

        Ok(stub)
    }

    fn parse_impl(&mut self) -> ParseResult<Box<LogicNode>> {
        let left = self.parse_or()?;

        if self.next_is(TokenKind::Impl) {
            self.bump()?;
            let right = self.parse_impl()?;
            Ok(Box::new(LogicNode::Impl(left, right)))
        } else {
            Ok(left)
        }
    }

    fn parse_or(&mut self) -> ParseResult<Box<LogicNode>> {
        let mut stub = self.parse_and()?;

        while self.next_is(TokenKind::Or) {
            self.bump()?;
            let right = self.parse_and()?;
            stub = Box::new(LogicNode::Or(stub, right));
        }

        Ok(stub)
    }

    fn parse_and(&mut self) -> ParseResult<Box<LogicNode>> {
        let mut stub = self.parse_not()?;

        while self.next_is(TokenKind::And) {
            self.bump()?;
            let right = self.parse_not()?;
            stub = Box::new(LogicNode::And(stub, right));
        }

        Ok(stub)
    }

    fn parse_not(&mut self) -> ParseResult<Box<LogicNode>> {
        if self.next_is(TokenKind::Not) {
            self.bump()?;
            Ok(Box::new(LogicNode::Not(self.parse_not()?)))
        } else {
            self.parse_quantifier()
        }
    }

    /// `\all x, y: F`, `*x, ?y: F`. The body extends as far to the right as
    /// possible.
    fn parse_quantifier(&mut self) -> ParseResult<Box<LogicNode>> {
        if !self.next_is(TokenKind::All) && !self.next_is(TokenKind::Ex) {
            return self.parse_paren();
        }

        let mut kind = self.cur_token()?.kind;
        self.bump()?;

        let mut bindings = Vec::new();
        loop {
            if !self.next_is(TokenKind::Ident) {
                return Err(ParseErr::Expected(
                    "variable to bind".to_string(),
                    self.got_msg(),
                ));
            }
            let name = Symbol::intern(self.cur_token()?.spelling);
            bindings.push((kind, name));
            self.quantifier_scope.push(name);
            self.bump()?;

            if self.next_is(TokenKind::Colon) {
                self.bump()?;
                break;
            }
            self.eat(TokenKind::Comma)?;
            if self.next_is(TokenKind::All) || self.next_is(TokenKind::Ex) {
                kind = self.cur_token()?.kind;
                self.bump()?;
            }
        }

        let mut sub = self.parse_equiv()?;

        for (kind, name) in bindings.into_iter().rev() {
            self.quantifier_scope.pop();
            sub = Box::new(match kind {
                TokenKind::All => LogicNode::All(name, sub),
                _ => LogicNode::Ex(name, sub),
            });
        }

        Ok(sub)
    }

    fn parse_paren(&mut self) -> ParseResult<Box<LogicNode>> {
        if self.next_is(TokenKind::LParen) {
            self.bump()?;
            let exp = self.parse_equiv()?;
            self.eat(TokenKind::RParen)?;
            Ok(exp)
        } else {
            self.parse_atomic()
        }
    }

    /// A relation application or an equation between two terms.
    fn parse_atomic(&mut self) -> ParseResult<Box<LogicNode>> {
        if !self.next_is(TokenKind::Ident) {
            return Err(ParseErr::Expected(
                "relation identifier".to_string(),
                self.got_msg(),
            ));
        }

        let id = Symbol::intern(self.cur_token()?.spelling);
        self.bump()?;

        let args = if self.next_is(TokenKind::LParen) {
            Some(self.parse_args()?)
        } else {
            None
        };

        if self.next_is(TokenKind::Eq) || self.next_is(TokenKind::NotEq) {
            let negated = self.next_is(TokenKind::NotEq);
            self.bump()?;
            let left = self.term_from(id, args)?;
            let right = self.parse_term()?;
            let eq = LogicNode::Eq(left, right);
            return Ok(Box::new(if negated { eq.negate() } else { eq }));
        }

        if self.quantifier_scope.contains(&id) {
            return Err(match args {
                Some(_) => ParseErr::VarApplied(id),
                None => ParseErr::VarAsFormula(id),
            });
        }

        let args = args.unwrap_or_default();
        match self.rel_arities.get(&id) {
            Some(&expected) => {
                let arity = args.len();
                if arity != expected {
                    return Err(ParseErr::IncorrectRelArity(id, expected, arity));
                }
            }
            None => {
                self.rel_arities.insert(id, args.len());
            }
        }

        Ok(Box::new(LogicNode::Rel(id, args)))
    }

    fn parse_term(&mut self) -> ParseResult<FOTerm> {
        if !self.next_is(TokenKind::Ident) {
            return Err(ParseErr::Expected("identifier".to_string(), self.got_msg()));
        }

        let ident = Symbol::intern(self.cur_token()?.spelling);
        self.bump()?;
        let args = if self.next_is(TokenKind::LParen) {
            Some(self.parse_args()?)
        } else {
            None
        };
        self.term_from(ident, args)
    }

    fn term_from(&mut self, ident: Symbol, args: Option<Vec<FOTerm>>) -> ParseResult<FOTerm> {
        if self.quantifier_scope.contains(&ident) {
            return match args {
                Some(_) => Err(ParseErr::VarApplied(ident)),
                None => Ok(FOTerm::Var(ident)),
            };
        }

        match args {
            None => {
                if self.fn_arities.contains_key(&ident) {
                    return Err(ParseErr::ConstAndFn(ident));
                }
                self.consts.insert(ident);
                Ok(FOTerm::Const(ident))
            }
            Some(args) => {
                if self.consts.contains(&ident) {
                    return Err(ParseErr::ConstAndFn(ident));
                }
                match self.fn_arities.get(&ident) {
                    Some(&expected) => {
                        let arity = args.len();
                        if arity != expected {
                            return Err(ParseErr::IncorrectFnArity(ident, expected, arity));
                        }
                    }
                    None => {
                        self.fn_arities.insert(ident, args.len());
                    }
                }
                Ok(FOTerm::Function(ident, args))
            }
        }
    }

    fn parse_args(&mut self) -> ParseResult<Vec<FOTerm>> {
        self.eat(TokenKind::LParen)?;

        let mut args = vec![self.parse_term()?];
        while self.next_is(TokenKind::Comma) {
            self.bump()?;
            args.push(self.parse_term()?);
        }

        self.eat(TokenKind::RParen)?;
        Ok(args)
    }

    fn next_is(&mut self, expected: TokenKind) -> bool {
        match self.tokens.peek() {
            Some(Ok(Token { kind, .. })) => *kind == expected,
            _ => false,
        }
    }

    fn bump(&mut self) -> ParseResult<()> {
        match self.tokens.next() {
            Some(Ok(_)) => Ok(()),
            Some(Err(e)) => Err(e),
            None => Err(ParseErr::Expected(
                "token".to_string(),
                "end of input".to_string(),
            )),
        }
    }

    fn eat(&mut self, expected: TokenKind) -> ParseResult<()> {
        if self.next_is(expected) {
            self.bump()
        } else {
            Err(ParseErr::Expected(expected.to_string(), self.got_msg()))
        }
    }

    fn got_msg(&mut self) -> String {
        match self.tokens.peek() {
            Some(Ok(t)) => format!("{} at position {}", t, t.src_pos),
            Some(Err(e)) => e.to_string(),
            None => "end of input".to_string(),
        }
    }

    fn cur_token(&mut self) -> ParseResult<&Token<'t>> {
        match self.tokens.peek() {
            Some(Ok(t)) => Ok(t),
            Some(Err(e)) => Err(e.clone()),
            _ => Err(ParseErr::Expected(
                "token".to_string(),
                "end of input".to_string(),
            )),
        }
    }
}
