use std::collections::{BTreeSet, HashMap, HashSet};

use kbase::{
    clause::{Clause, Literal},
    logic::{
        fo::Atom,
        unify::{unify, UnificationErr},
    },
    parse::parse_fo_formula,
    session, CnfConverter, FOTerm, KnowledgeBase, LogicNode, ProofOutcome, Symbol,
};

fn var(s: &str) -> FOTerm {
    FOTerm::Var(Symbol::intern(s))
}

fn cst(s: &str) -> FOTerm {
    FOTerm::Const(Symbol::intern(s))
}

fn func(s: &str, args: Vec<FOTerm>) -> FOTerm {
    FOTerm::Function(Symbol::intern(s), args)
}

fn small_terms() -> Vec<FOTerm> {
    vec![
        var("x"),
        var("y"),
        cst("a"),
        cst("b"),
        func("f", vec![var("x")]),
        func("f", vec![var("y")]),
        func("f", vec![cst("a")]),
        func("f", vec![func("f", vec![var("y")])]),
        func("g", vec![var("x"), cst("b")]),
        func("g", vec![cst("a"), var("y")]),
        func("g", vec![func("f", vec![var("x")]), var("y")]),
        func("g", vec![var("y"), var("y")]),
    ]
}

#[test]
fn unifiers_equate_both_sides() {
    session(|| {
        let terms = small_terms();
        for t1 in &terms {
            for t2 in &terms {
                match unify(t1, t2) {
                    Ok(mgu) => assert_eq!(
                        mgu.resolve(t1),
                        mgu.resolve(t2),
                        "{} and {} under {}",
                        t1,
                        t2,
                        mgu
                    ),
                    Err(_) => assert!(
                        !(t1.is_ground() && t2.is_ground() && t1 == t2),
                        "{} should unify with itself",
                        t1
                    ),
                }
            }
        }
    })
}

#[test]
fn ground_terms_unify_only_when_equal() {
    session(|| {
        let ground: Vec<_> = small_terms().into_iter().filter(FOTerm::is_ground).collect();
        for t1 in &ground {
            for t2 in &ground {
                assert_eq!(t1 == t2, unify(t1, t2).is_ok(), "{} and {}", t1, t2);
            }
        }
    })
}

#[test]
fn occurs_check() {
    session(|| {
        let x = var("x");
        assert!(matches!(
            unify(&x, &func("f", vec![x.clone()])),
            Err(UnificationErr::Occurs(..))
        ));
        let t1 = func("g", vec![var("x"), var("y")]);
        let t2 = func("g", vec![var("y"), func("f", vec![var("x")])]);
        assert!(unify(&t1, &t2).is_err());
    })
}

fn literal_to_node(l: &Literal) -> LogicNode {
    let node = match l.atom() {
        Atom::Rel(r) => LogicNode::Rel(r.spelling, r.args.clone()),
        Atom::Eq(a, b) => LogicNode::Eq(a.clone(), b.clone()),
    };
    if l.negated() {
        node.negate()
    } else {
        node
    }
}

/// The universal closure of the conjunction of `clauses`.
fn clauses_to_node(clauses: &[Clause]) -> Option<LogicNode> {
    clauses
        .iter()
        .map(|c| {
            let disjunction = c
                .literals()
                .iter()
                .map(literal_to_node)
                .reduce(|l, r| LogicNode::Or(Box::new(l), Box::new(r)))
                .expect("non-empty clause");
            c.vars()
                .into_iter()
                .rev()
                .fold(disjunction, |n, v| LogicNode::All(v, Box::new(n)))
        })
        .reduce(|l, r| LogicNode::And(Box::new(l), Box::new(r)))
}

fn canonical_set(clauses: &[Clause]) -> HashSet<Clause> {
    clauses.iter().map(Clause::canonical).collect()
}

#[test]
fn clause_form_is_stable() {
    session(|| {
        let formulas = [
            "*x: pompeian(x) => roman(x)",
            "*x: roman(x) => loyal(x, Caesar) | hate(x, Caesar)",
            "*x, ?y: loyal(x, y)",
            "*x, *y: person(x) & ruler(y) & tryassassinate(x, y) => !loyal(x, y)",
            "(a <=> b) <=> c",
            "!(*x: ?y: (p(x, y) & !q(y)) | r(x))",
            "*x: Add(x, 0) = x",
            "*x, *y: human(x) & human(y) => x = y",
        ];
        for f in formulas {
            let mut converter = CnfConverter::new();
            let first = Vec::from(converter.convert(&parse_fo_formula(f).unwrap()).unwrap());
            let rebuilt = clauses_to_node(&first).unwrap();
            let second = Vec::from(converter.convert(&rebuilt).unwrap());
            assert_eq!(canonical_set(&first), canonical_set(&second), "{}", f);
        }
    })
}

#[test]
fn skolem_symbols_are_fresh() {
    session(|| {
        let mut converter = CnfConverter::new();
        let f = parse_fo_formula("*x, ?y: loyal(x, y)").unwrap();
        let first = converter.convert(&f).unwrap();
        let second = converter.convert(&f).unwrap();
        assert_ne!(
            canonical_set(first.clauses()),
            canonical_set(second.clauses()),
            "{} and {}",
            first,
            second
        );
    })
}

fn collect_atoms(n: &LogicNode, atoms: &mut BTreeSet<String>) {
    match n {
        LogicNode::Rel(..) | LogicNode::Eq(..) => {
            atoms.insert(n.to_string());
        }
        LogicNode::Not(c) => collect_atoms(c, atoms),
        LogicNode::And(l, r)
        | LogicNode::Or(l, r)
        | LogicNode::Impl(l, r)
        | LogicNode::Equiv(l, r) => {
            collect_atoms(l, atoms);
            collect_atoms(r, atoms);
        }
        LogicNode::All(_, c) | LogicNode::Ex(_, c) => collect_atoms(c, atoms),
    }
}

fn eval(n: &LogicNode, model: &HashMap<String, bool>) -> bool {
    match n {
        LogicNode::Rel(..) | LogicNode::Eq(..) => model[&n.to_string()],
        LogicNode::Not(c) => !eval(c, model),
        LogicNode::And(l, r) => eval(l, model) && eval(r, model),
        LogicNode::Or(l, r) => eval(l, model) || eval(r, model),
        LogicNode::Impl(l, r) => !eval(l, model) || eval(r, model),
        LogicNode::Equiv(l, r) => eval(l, model) == eval(r, model),
        LogicNode::All(..) | LogicNode::Ex(..) => unreachable!("ground formulas only"),
    }
}

/// Entailment by enumerating every assignment to the ground atoms.
fn truth_table(premises: &[LogicNode], conclusion: &LogicNode) -> bool {
    let mut atoms = BTreeSet::new();
    for n in premises.iter().chain([conclusion]) {
        collect_atoms(n, &mut atoms);
    }
    let atoms: Vec<_> = atoms.into_iter().collect();
    (0..1u32 << atoms.len()).all(|bits| {
        let model: HashMap<String, bool> = atoms
            .iter()
            .enumerate()
            .map(|(i, a)| (a.clone(), bits & (1 << i) != 0))
            .collect();
        !premises.iter().all(|p| eval(p, &model)) || eval(conclusion, &model)
    })
}

#[test]
fn agrees_with_truth_tables() {
    let table: Vec<(Vec<&str>, &str)> = vec![
        (vec!["f(P)"], "f(P)"),
        (vec!["f(P)"], "!f(P)"),
        (vec!["f(P)"], "f(Q)"),
        (vec!["f(P)"], "!f(Q)"),
        (vec!["f(P)"], "f(P) & f(Q)"),
        (vec!["f(P)"], "f(P) | f(Q)"),
        (vec!["f(P)"], "f(P) => f(Q)"),
        (vec!["f(P)"], "f(Q) => f(P)"),
        (vec!["f(P)"], "f(P) <=> f(Q)"),
        (vec!["f(P) & f(Q)"], "f(P)"),
        (vec!["f(P) & f(Q)"], "!f(Q)"),
        (vec!["f(P) & f(Q)"], "f(P) & f(Q)"),
        (vec!["f(P) & f(Q)"], "f(P) <=> f(Q)"),
        (vec!["f(P)", "f(Q)"], "f(P) | f(Q)"),
        (vec!["f(P)", "f(Q)"], "f(Q) => f(P)"),
        (vec!["f(P)", "f(Q)"], "!f(P)"),
        (vec!["f(P) | f(Q)"], "f(P)"),
        (vec!["f(P) | f(Q)"], "!f(P)"),
        (vec!["f(P) => f(Q)"], "f(P)"),
        (vec!["f(P) => f(Q)"], "f(Q)"),
        (vec!["f(P) & f(Q)", "f(Q) & f(R)"], "f(P) & f(R)"),
        (vec!["f(P) | f(Q)", "f(Q) | f(R)"], "f(P) | f(R)"),
        (vec!["f(P) => f(Q)", "f(Q) => f(R)"], "f(P) => f(R)"),
        (vec!["f(P) <=> f(Q)", "f(Q) <=> f(R)"], "f(P) <=> f(R)"),
        (vec!["f(P) | !f(P)"], "f(P)"),
        (vec!["f(P) | !f(P)"], "f(P) | !f(P)"),
        (vec![], "f(P)"),
        (vec!["f(P) & !f(P)"], "f(Q)"),
        (vec!["f(P) & !f(P)"], "!f(Q)"),
    ];

    session(|| {
        for (premises, conclusion) in table {
            let premises: Vec<_> = premises
                .iter()
                .map(|p| parse_fo_formula(p).unwrap())
                .collect();
            let conclusion = parse_fo_formula(conclusion).unwrap();
            let expected = if truth_table(&premises, &conclusion) {
                ProofOutcome::Entailed
            } else {
                ProofOutcome::NotEntailed
            };

            let mut kb = KnowledgeBase::new();
            for p in &premises {
                kb.add_axiom(p.clone()).unwrap();
            }
            assert_eq!(
                expected,
                kb.prove(&conclusion).unwrap(),
                "{:?} |- {}",
                premises.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
                conclusion
            );
        }
    })
}
