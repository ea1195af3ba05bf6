use kbase::{parse::parse_fo_formula, KnowledgeBase, LogicNode, ProofOutcome};
use log::warn;
use rustyline::{error::ReadlineError, DefaultEditor};

pub const USAGE: &str = "Usage:
    help                Show this help screen
    list                List content of the knowledge base
    axiom <formula>     Add axiom to the knowledge base
    lemma <formula>     Prove and add lemma to the knowledge base
    prove <formula>     Prove formula
    query <formula>     Show the bindings that satisfy the formula

Formulas use \\all x: F, \\ex x: F, !, &, |, ->, <->, = and !=.
Everything after # is a comment.";

#[derive(Debug, PartialEq, Eq)]
enum Command<'l> {
    Empty,
    Help,
    List,
    Axiom(&'l str),
    Lemma(&'l str),
    Prove(&'l str),
    Query(&'l str),
    Unknown(&'l str),
}

fn parse_command(line: &str) -> Command<'_> {
    let line = match line.split_once('#') {
        Some((code, _)) => code,
        None => line,
    };
    let line = line.trim();
    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "" => Command::Empty,
        "help" => Command::Help,
        "list" => Command::List,
        "axiom" => Command::Axiom(arg),
        "lemma" => Command::Lemma(arg),
        "prove" => Command::Prove(arg),
        "query" => Command::Query(arg),
        _ => Command::Unknown(verb),
    }
}

pub struct Repl {
    kb: KnowledgeBase,
}

impl Repl {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb }
    }

    pub fn kb(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Runs one line of input and returns what should be shown to the user.
    pub fn execute(&mut self, line: &str) -> String {
        match parse_command(line) {
            Command::Empty => String::new(),
            Command::Help => USAGE.to_string(),
            Command::List => self.list(),
            Command::Axiom(arg) => self.with_formula(arg, Self::axiom),
            Command::Lemma(arg) => self.with_formula(arg, Self::lemma),
            Command::Prove(arg) => self.with_formula(arg, Self::prove),
            Command::Query(arg) => self.with_formula(arg, Self::query),
            Command::Unknown(verb) => {
                format!("Error: '{}' is not a valid command\n{}", verb, USAGE)
            }
        }
    }

    fn with_formula(&mut self, arg: &str, f: fn(&mut Self, LogicNode) -> String) -> String {
        if arg.is_empty() {
            return "Error: Expected 1 argument".to_string();
        }
        match parse_fo_formula(arg) {
            Ok(formula) => f(self, formula),
            Err(e) => format!("Error: {}", e),
        }
    }

    fn list(&self) -> String {
        self.kb
            .entries()
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{:>3}. {}", i + 1, e))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn axiom(&mut self, formula: LogicNode) -> String {
        match self.kb.add_axiom(formula) {
            Ok(()) => String::new(),
            Err(e) => format!("Error: {}", e),
        }
    }

    fn lemma(&mut self, formula: LogicNode) -> String {
        match self.kb.add_lemma(formula) {
            Ok(ProofOutcome::Entailed) => {
                "Lemma was proven and was added to the knowledge base.".to_string()
            }
            Ok(ProofOutcome::NotEntailed) => {
                "Lemma was not proven and was not added to the knowledge base.".to_string()
            }
            Ok(ProofOutcome::Inconclusive) => {
                "Lemma could not be proven within the search limits and was not added to the knowledge base."
                    .to_string()
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    fn prove(&mut self, formula: LogicNode) -> String {
        match self.kb.prove(&formula) {
            Ok(ProofOutcome::Entailed) => "Formula is entailed by the knowledge base.".to_string(),
            Ok(ProofOutcome::NotEntailed) => {
                "Formula is not entailed by the knowledge base.".to_string()
            }
            Ok(ProofOutcome::Inconclusive) => {
                "Could not decide within the search limits.".to_string()
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    fn query(&mut self, formula: LogicNode) -> String {
        let mut query = match self.kb.query(&formula) {
            Ok(q) => q,
            Err(e) => return format!("Error: {}", e),
        };

        let answers: Vec<String> = query.by_ref().map(|s| s.to_string()).collect();
        if !answers.is_empty() {
            return answers.join("\n");
        }
        match query.outcome() {
            Some(ProofOutcome::Entailed) => {
                "Query is entailed by the knowledge base, but no single binding satisfies it."
                    .to_string()
            }
            Some(ProofOutcome::Inconclusive) => {
                "No answer found within the search limits.".to_string()
            }
            _ => "Error: Query is not entailed by the knowledge base.".to_string(),
        }
    }
}

/// Reads commands until end of input or an interrupt.
pub fn run(repl: &mut Repl) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("Knowledge base\n");
    println!("{}\n", USAGE);

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let out = repl.execute(&line);
                if !out.is_empty() {
                    println!("{}\n", out);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                warn!("reading input failed: {}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}
