use paste::paste;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    convert::{self, formula_to_cnf},
    formula::{Assignment, Clause, Cnf, Literal, NamedLiteral, Variable, VariableMap},
    generator::{random_cnf, GeneratorConfig},
    parser::{self, decode, encode, parse_cnf, parse_dimacs, parse_file},
    pipeline::{self, cross_check, Options},
    selector::{select, ClauseStats, Reason},
    solver::{
        DavisPutnamSolver, DpllSolver, ResolutionSolver, Solver, SolverKind, Verdict, Witness,
    },
    wff::{self, is_well_formed, parse_formula},
};

fn cnf(clauses: &[Vec<i32>]) -> Cnf {
    Cnf::from_signed(clauses).unwrap()
}

fn lit(value: i32) -> Literal {
    Literal::from_signed(value).unwrap()
}

fn named(name: &str, negated: bool) -> NamedLiteral {
    NamedLiteral::new(name, negated)
}

/// Truth-table satisfiability, for checking the solvers on small formulas.
fn brute_force(formula: &Cnf) -> bool {
    let n = formula.num_variables();
    (0..1u64 << n).any(|bits| {
        formula.clauses().iter().all(|clause| {
            clause.iter().any(|literal| {
                let value = bits >> literal.variable().as_index() & 1 == 1;
                value == literal.positive()
            })
        })
    })
}

macro_rules! sat_testcase_with_solver {
    ($solver:ident, $dir:ident, $name:ident) => {
        paste! {
            #[test]
            fn [< $solver:snake _ $dir _ $name >]() {
                let formula = parse_file(
                    concat!("testcases/", stringify!($dir), "/", stringify!($name), ".cnf")
                ).unwrap();
                let solver = $solver::new(formula.clone());
                match solver.solve() {
                    Verdict::Satisfiable(Witness::Assignment(assignment)) => {
                        assert!(assignment.satisfies(&formula));
                    }
                    Verdict::Satisfiable(_) => (),
                    Verdict::Unsatisfiable => panic!("expected a satisfiable verdict"),
                }
            }
        }
    };
}

macro_rules! unsat_testcase_with_solver {
    ($solver:ident, $dir:ident, $name:ident) => {
        paste! {
            #[test]
            fn [< $solver:snake _ $dir _ $name >]() {
                let formula = parse_file(
                    concat!("testcases/", stringify!($dir), "/", stringify!($name), ".cnf")
                ).unwrap();
                let solver = $solver::new(formula);
                assert_eq!(solver.solve(), Verdict::Unsatisfiable);
            }
        }
    };
}

macro_rules! sat_testcase {
    ($dir:ident, $name:ident) => {
        sat_testcase_with_solver!(DpllSolver, $dir, $name);
        sat_testcase_with_solver!(DavisPutnamSolver, $dir, $name);
        sat_testcase_with_solver!(ResolutionSolver, $dir, $name);
    };
}

macro_rules! unsat_testcase {
    ($dir:ident, $name:ident) => {
        unsat_testcase_with_solver!(DpllSolver, $dir, $name);
        unsat_testcase_with_solver!(DavisPutnamSolver, $dir, $name);
        unsat_testcase_with_solver!(ResolutionSolver, $dir, $name);
    };
}

sat_testcase!(basic, empty);
sat_testcase!(basic, unit);
sat_testcase!(basic, xor);
sat_testcase!(basic, chain_sat);
sat_testcase!(basic, three_sat);

unsat_testcase!(basic, empty_clause);
unsat_testcase!(basic, contradiction);
unsat_testcase!(basic, forced_conflict);
unsat_testcase!(basic, chain_unsat);
unsat_testcase!(basic, all_signs2);
unsat_testcase!(basic, php3);

mod dpll {
    use super::*;

    #[test]
    fn unit_clause_is_assigned() {
        let verdict = DpllSolver::new(cnf(&[vec![1]])).solve();
        assert_eq!(
            verdict,
            Verdict::Satisfiable(Witness::Assignment(Assignment::new(vec![lit(1)])))
        );
    }

    #[test]
    fn branches_on_first_most_frequent_literal() {
        // Every literal occurs once, so the first one met is tried first.
        let verdict = DpllSolver::new(cnf(&[vec![1, 2], vec![-1, -2]])).solve();
        assert_eq!(
            verdict,
            Verdict::Satisfiable(Witness::Assignment(Assignment::new(vec![lit(1), lit(-2)])))
        );
    }

    #[test]
    fn most_frequent_literal_wins() {
        let formula = cnf(&[vec![1, 2], vec![-1, 2], vec![-2, 3], vec![2, -3]]);
        match DpllSolver::new(formula.clone()).solve() {
            Verdict::Satisfiable(Witness::Assignment(assignment)) => {
                assert_eq!(assignment.literals()[0], lit(2));
                assert!(assignment.satisfies(&formula));
            }
            verdict => panic!("unexpected verdict {:?}", verdict),
        }
    }

    #[test]
    fn backtracks_into_negated_branch() {
        // Choosing x1 first leads to a conflict; ¬x1 succeeds.
        let formula = cnf(&[vec![1, 2], vec![1, 3], vec![-1, 4], vec![-1, -4], vec![-2, 3, 1]]);
        match DpllSolver::new(formula.clone()).solve() {
            Verdict::Satisfiable(Witness::Assignment(assignment)) => {
                assert_eq!(assignment.value(Variable::from(0)), Some(false));
                assert!(assignment.satisfies(&formula));
            }
            verdict => panic!("unexpected verdict {:?}", verdict),
        }
    }

    #[test]
    fn propagated_conflict() {
        let verdict = DpllSolver::new(cnf(&[vec![1], vec![2], vec![-1, -2]])).solve();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }
}

mod davis_putnam {
    use super::*;

    #[test]
    fn witness_is_elimination_order() {
        let verdict = DavisPutnamSolver::new(cnf(&[vec![3, 1], vec![-1, 2]])).solve();
        let order = vec![Variable::from(0), Variable::from(1), Variable::from(2)];
        assert_eq!(verdict, Verdict::Satisfiable(Witness::EliminationOrder(order)));
    }

    #[test]
    fn only_occurring_variables_are_eliminated() {
        let mut formula = Cnf::new(5);
        formula.add_clause(Clause::new(vec![lit(2), lit(-4)]));
        let verdict = DavisPutnamSolver::new(formula).solve();
        let order = vec![Variable::from(1), Variable::from(3)];
        assert_eq!(verdict, Verdict::Satisfiable(Witness::EliminationOrder(order)));
    }

    #[test]
    fn tautologies_are_dropped() {
        // x1 ∨ ¬x1 must not resolve with ¬x1 into the empty clause.
        let verdict = DavisPutnamSolver::new(cnf(&[vec![1, -1], vec![-1]])).solve();
        assert!(verdict.is_satisfiable());
    }

    #[test]
    fn empty_resolvent_stops_elimination() {
        let verdict = DavisPutnamSolver::new(cnf(&[vec![1], vec![-1], vec![2, 3]])).solve();
        assert_eq!(verdict, Verdict::Unsatisfiable);
    }
}

mod resolution {
    use super::*;

    #[test]
    fn saturated_set_size() {
        // {x1 ∨ x2, ¬x1 ∨ x2} resolves to {x2}; nothing new after that.
        let verdict = ResolutionSolver::new(cnf(&[vec![1, 2], vec![-1, 2]])).solve();
        assert_eq!(verdict, Verdict::Satisfiable(Witness::Saturated { clauses: 3 }));
    }

    #[test]
    fn duplicate_clauses_collapse() {
        let verdict = ResolutionSolver::new(cnf(&[vec![1, 2], vec![2, 1], vec![1, 2, 1]])).solve();
        assert_eq!(verdict, Verdict::Satisfiable(Witness::Saturated { clauses: 1 }));
    }

    #[test]
    fn refutes_after_several_rounds() {
        let formula = cnf(&[vec![1, 2], vec![-1, 2], vec![1, -2], vec![-1, -2]]);
        assert_eq!(ResolutionSolver::new(formula).solve(), Verdict::Unsatisfiable);
    }
}

mod all_solvers {
    use super::*;

    #[test]
    fn empty_formula_is_satisfiable() {
        for kind in SolverKind::ALL.iter() {
            assert!(kind.solve(Cnf::new(0)).is_satisfiable(), "{}", kind);
        }
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = GeneratorConfig::default();
        for _ in 0..20 {
            let mut formula = random_cnf(&mut rng, &config);
            formula.add_clause(Clause::new(Vec::new()));
            for kind in SolverKind::ALL.iter() {
                assert_eq!(kind.solve(formula.clone()), Verdict::Unsatisfiable, "{}", kind);
            }
        }
    }

    #[test]
    fn contradicting_units() {
        for kind in SolverKind::ALL.iter() {
            assert_eq!(
                kind.solve(cnf(&[vec![1], vec![-1]])),
                Verdict::Unsatisfiable,
                "{}",
                kind
            );
        }
    }

    #[test]
    fn dpll_and_davis_putnam_agree_on_random_formulas() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let config = GeneratorConfig::default();
        for _ in 0..300 {
            let formula = random_cnf(&mut rng, &config);
            let expected = brute_force(&formula);

            let dpll = SolverKind::Dpll.solve(formula.clone());
            let davis_putnam = SolverKind::DavisPutnam.solve(formula.clone());
            assert_eq!(dpll.is_satisfiable(), expected, "{}", formula);
            assert_eq!(davis_putnam.is_satisfiable(), expected, "{}", formula);

            if let Verdict::Satisfiable(Witness::Assignment(assignment)) = dpll {
                assert!(assignment.satisfies(&formula), "{}", formula);
            }
        }
    }

    #[test]
    fn resolution_and_dpll_agree_on_random_formulas() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GeneratorConfig {
            max_variables: 5,
            ..GeneratorConfig::default()
        };
        for _ in 0..100 {
            let formula = random_cnf(&mut rng, &config);
            let check = cross_check(&formula);
            assert!(check.agrees(), "{} {:?}", formula, check.verdicts);
            assert!(check.assignments_hold(), "{}", formula);
            assert_eq!(check.verdicts[0].1.is_satisfiable(), brute_force(&formula));
        }
    }
}

mod selection {
    use super::*;

    #[test]
    fn default_rule() {
        let selection = select(&cnf(&[vec![1, 2], vec![-1, -2]]));
        assert_eq!(selection.solver, SolverKind::Dpll);
        assert_eq!(selection.reason, Reason::Default);
        assert_eq!(selection.reason.to_string(), "default");
    }

    #[test]
    fn high_unit_frequency() {
        let formula = cnf(&[vec![1], vec![2], vec![-1, -2]]);
        let stats = ClauseStats::collect(&formula);
        assert!((stats.unit_ratio() - 2.0 / 3.0).abs() < 1e-9);

        let selection = select(&formula);
        assert_eq!(selection.solver, SolverKind::Dpll);
        assert_eq!(selection.reason, Reason::HighUnitFrequency);
        assert_eq!(
            SolverKind::Dpll.solve(formula),
            Verdict::Unsatisfiable
        );
    }

    #[test]
    fn pure_literal_presence() {
        let formula = cnf(&[vec![1, 2], vec![1, 3]]);
        let stats = ClauseStats::collect(&formula);
        assert_eq!(stats.pure_literals, vec![lit(1), lit(2), lit(3)]);

        let selection = select(&formula);
        assert_eq!(selection.solver, SolverKind::DavisPutnam);
        assert_eq!(selection.reason, Reason::PureLiterals);
    }

    #[test]
    fn ratio_at_threshold_is_not_high() {
        // 1 of 3 clauses is a unit: 0.33 does not exceed 0.35.
        let formula = cnf(&[vec![1], vec![-1, 2], vec![-2, 1]]);
        assert_eq!(select(&formula).reason, Reason::Default);
    }

    #[test]
    fn empty_formula() {
        let stats = ClauseStats::collect(&Cnf::new(0));
        assert_eq!(stats.unit_ratio(), 0.0);
        assert_eq!(select(&Cnf::new(0)).reason, Reason::Default);
    }

    #[test]
    fn never_picks_resolution() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = GeneratorConfig::default();
        for _ in 0..200 {
            let formula = random_cnf(&mut rng, &config);
            let first = select(&formula);
            assert_ne!(first.solver, SolverKind::Resolution);
            assert_eq!(first, select(&formula));
        }
    }
}

mod parsing {
    use super::*;

    #[test]
    fn clauses_and_literals() {
        let clauses = parse_cnf("(A | ~B) & C").unwrap();
        assert_eq!(
            clauses,
            vec![
                vec![named("A", false), named("B", true)],
                vec![named("C", false)],
            ]
        );
    }

    #[test]
    fn identifiers_and_spacing() {
        let clauses = parse_cnf("( ~ alpha_1|beta ) &gamma").unwrap();
        assert_eq!(
            clauses,
            vec![
                vec![named("alpha_1", true), named("beta", false)],
                vec![named("gamma", false)],
            ]
        );
    }

    #[test]
    fn malformed_text() {
        assert!(matches!(parse_cnf(""), Err(parser::Error::EmptyCnf)));
        assert!(matches!(parse_cnf("()"), Err(parser::Error::EmptyCnf)));
        assert!(matches!(
            parse_cnf("(A | B"),
            Err(parser::Error::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            parse_cnf("A) & (B"),
            Err(parser::Error::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            parse_cnf("A & & B"),
            Err(parser::Error::EmptyClause { .. })
        ));
        assert!(matches!(
            parse_cnf("A | | B"),
            Err(parser::Error::EmptyLiteral { .. })
        ));
        assert!(matches!(
            parse_cnf("A | ~"),
            Err(parser::Error::EmptyLiteral { .. })
        ));
        assert!(matches!(
            parse_cnf("A | 1B"),
            Err(parser::Error::InvalidVariableName { .. })
        ));
    }

    #[test]
    fn encoding_follows_first_occurrence() {
        let clauses = parse_cnf("(B | ~A) & (A | C) & ~B").unwrap();
        let (formula, variables) = encode(&clauses);

        assert_eq!(formula.num_variables(), 3);
        assert_eq!(variables.get("B"), Some(Variable::from(0)));
        assert_eq!(variables.get("A"), Some(Variable::from(1)));
        assert_eq!(variables.get("C"), Some(Variable::from(2)));

        let signed = formula
            .clauses()
            .iter()
            .map(|clause| clause.iter().map(|l| l.to_signed()).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        assert_eq!(signed, vec![vec![1, -2], vec![2, 3], vec![-1]]);
    }

    #[test]
    fn decode_inverts_encode() {
        let clauses = parse_cnf("(P | ~Q | R) & (~P | Q) & ~R & (Q | S)").unwrap();
        let (formula, variables) = encode(&clauses);

        for (named_clause, clause) in clauses.iter().zip(formula.clauses()) {
            for (named_literal, literal) in named_clause.iter().zip(clause.iter()) {
                assert_eq!(decode(literal, &variables).as_ref(), Some(named_literal));
            }
        }
        assert_eq!(decode(lit(-2), &variables).unwrap().to_string(), "¬Q");
        assert_eq!(decode(lit(9), &variables), None);
    }

    #[test]
    fn signed_literals() {
        assert_eq!(lit(-3).to_signed(), -3);
        assert!(!lit(-3).positive());
        assert_eq!(!lit(-3), lit(3));
        assert!(Literal::from_signed(0).is_err());
        assert!(Literal::from_signed(i32::MIN).is_err());
        assert!("x".parse::<Literal>().is_err());
    }

    #[test]
    fn dimacs_errors() {
        let parse = |text: &str| parse_dimacs(text.as_bytes(), "input.cnf".as_ref());

        assert!(matches!(
            parse("1 2 0\n"),
            Err(parser::Error::MalformedProblemDefinition)
        ));
        assert!(matches!(
            parse("p cnf 2 2\n1 2 0\n"),
            Err(parser::Error::ClauseCountMismatch {
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(
            parse("p cnf 2 1\n1 3 0\n"),
            Err(parser::Error::VariableOutOfRange { .. })
        ));
        assert!(matches!(
            parse("p cnf 2 1\n1 2\n"),
            Err(parser::Error::MalformedClause { .. })
        ));
        assert!(matches!(
            parse("p cnf 2 1\n1 a 0\n"),
            Err(parser::Error::MalformedVariable { .. })
        ));
        assert!(matches!(
            parse_file("testcases/missing.cnf"),
            Err(parser::Error::IoError { .. })
        ));
    }

    #[test]
    fn declared_variable_count_is_not_materialized() {
        let text = "p cnf 2147483647 1\n1 0\n";
        let formula = parse_dimacs(text.as_bytes(), "input.cnf".as_ref()).unwrap();
        assert_eq!(formula.num_variables(), i32::MAX as usize);

        for &kind in SolverKind::ALL.iter() {
            assert!(kind.solve(formula.clone()).is_satisfiable(), "{}", kind);
        }

        let variables = VariableMap::numbered(formula.num_variables());
        let analysis = pipeline::solve_encoded(
            formula,
            variables,
            text.to_owned(),
            &Options::default(),
        );
        assert_eq!(analysis.decoded_witness(), Some(vec![named("x1", false)]));
    }

    #[test]
    fn numbered_names() {
        let variables = VariableMap::numbered(i32::MAX as usize);
        assert_eq!(variables.len(), i32::MAX as usize);
        assert_eq!(variables.name(Variable::from(4)).as_deref(), Some("x5"));
        assert_eq!(variables.get("x5"), Some(Variable::from(4)));
        assert_eq!(
            variables.get("x2147483647"),
            Some(Variable::from(i32::MAX as usize - 1))
        );
        assert_eq!(variables.get("x0"), None);
        assert_eq!(variables.get("x05"), None);
        assert_eq!(variables.get("x+5"), None);
        assert_eq!(VariableMap::numbered(3).name(Variable::from(3)), None);
    }

    #[test]
    fn dimacs_comments_and_trailer() {
        let formula = parse_file("testcases/basic/three_sat.cnf").unwrap();
        assert_eq!(formula.num_variables(), 4);
        assert_eq!(formula.clauses().len(), 6);
    }
}

mod well_formedness {
    use super::*;

    #[test]
    fn accepts_grammar() {
        assert!(is_well_formed("A"));
        assert!(is_well_formed("¬¬A"));
        assert!(is_well_formed("(A→B)"));
        assert!(is_well_formed(" ( ( A ∧ B ) ↔ ¬ C ) "));
        assert!(is_well_formed("(((A→B)∧(B→C))∧A)"));
    }

    #[test]
    fn rejects_outside_grammar() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("(A)"));
        assert!(!is_well_formed("A∧B"));
        assert!(!is_well_formed("((A→B)∧(B→C)∧(C→D))"));
        assert!(!is_well_formed("(A∧B"));
        assert!(!is_well_formed("AB"));
        assert!(!is_well_formed("(a∧B)"));
        assert!(!is_well_formed("¬"));
        assert!(!is_well_formed("(¬A)"));
        assert!(!is_well_formed("(¬(A∨B))"));
    }

    #[test]
    fn negation_is_not_parenthesized() {
        assert!(matches!(
            parse_formula("(¬(A∨B))"),
            Err(wff::Error::UnexpectedToken {
                expected: "a binary connective",
                found: wff::Token::Close,
                position: 7,
            })
        ));
    }

    #[test]
    fn negation_runs_fold_by_parity() {
        let atom = wff::Formula::Atom("A".to_owned());
        assert_eq!(parse_formula("¬¬A").unwrap(), atom);
        assert_eq!(
            parse_formula("¬¬¬A").unwrap(),
            wff::Formula::Not(Box::new(atom))
        );

        let even = format!("{}A", "¬".repeat(200_000));
        assert!(is_well_formed(&even));
        assert_eq!(formula_to_cnf(&even, convert::DEFAULT_CLAUSE_LIMIT).unwrap(), "A");

        let odd = format!("{}A", "¬".repeat(200_001));
        assert_eq!(formula_to_cnf(&odd, convert::DEFAULT_CLAUSE_LIMIT).unwrap(), "~A");
    }

    #[test]
    fn error_positions() {
        assert!(matches!(
            parse_formula("(A&B)"),
            Err(wff::Error::UnexpectedCharacter {
                character: '&',
                position: 2
            })
        ));
        assert!(matches!(
            parse_formula("(A∧B∨C)"),
            Err(wff::Error::UnexpectedToken { position: 4, .. })
        ));
        assert!(matches!(
            parse_formula("(A∧"),
            Err(wff::Error::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            parse_formula("A B"),
            Err(wff::Error::TrailingInput { position: 2 })
        ));
    }

    #[test]
    fn display_round_trips() {
        let formula = parse_formula("( ¬A ↔ (B ∨ C))").unwrap();
        assert_eq!(formula.to_string(), "(¬A↔(B∨C))");
        assert_eq!(parse_formula(&formula.to_string()).unwrap(), formula);
    }
}

mod conversion {
    use super::*;

    const LIMIT: usize = convert::DEFAULT_CLAUSE_LIMIT;

    #[test]
    fn implication() {
        assert_eq!(formula_to_cnf("(A→B)", LIMIT).unwrap(), "(~A | B)");
    }

    #[test]
    fn negated_disjunction() {
        assert_eq!(formula_to_cnf("¬(A∨B)", LIMIT).unwrap(), "~A & ~B");
    }

    #[test]
    fn equivalence() {
        assert_eq!(
            formula_to_cnf("(A↔¬B)", LIMIT).unwrap(),
            "(~A | ~B) & (A | B)"
        );
        assert_eq!(
            formula_to_cnf("¬(A↔B)", LIMIT).unwrap(),
            "(A | B) & (~A | ~B)"
        );
    }

    #[test]
    fn distribution() {
        assert_eq!(
            formula_to_cnf("((A∧B)∨(C∧D))", LIMIT).unwrap(),
            "(A | C) & (A | D) & (B | C) & (B | D)"
        );
    }

    #[test]
    fn duplicates_are_merged() {
        assert_eq!(formula_to_cnf("((A∨A)∧(A∨A))", LIMIT).unwrap(), "A");
    }

    #[test]
    fn clause_limit() {
        assert!(matches!(
            formula_to_cnf("((A∧B)∨(C∧D))", 3),
            Err(convert::Error::TooManyClauses { limit: 3 })
        ));
    }

    #[test]
    fn rejects_ill_formed() {
        assert!(matches!(
            formula_to_cnf("((A→B)∧(B→C)∧(C→D))", LIMIT),
            Err(convert::Error::NotWellFormed { .. })
        ));
        assert!(matches!(
            formula_to_cnf("(¬(A∨B))", LIMIT),
            Err(convert::Error::NotWellFormed { .. })
        ));
    }

    #[test]
    fn output_parses() {
        let text = formula_to_cnf("(((A∨B)∧(C∨D))→(E↔F))", LIMIT).unwrap();
        let clauses = parse_cnf(&text).unwrap();
        assert!(clauses.iter().all(|clause| !clause.is_empty()));
    }
}

mod orchestration {
    use super::*;

    #[test]
    fn equivalence_with_negation() {
        let analysis = pipeline::analyze_formula("(A↔¬B)", &Options::default()).unwrap();
        assert_eq!(analysis.selection.solver, SolverKind::Dpll);
        assert_eq!(analysis.selection.reason, Reason::Default);
        assert_eq!(
            analysis.decoded_witness(),
            Some(vec![named("A", true), named("B", false)])
        );
    }

    #[test]
    fn chain_with_fact_goes_to_davis_putnam() {
        let analysis =
            pipeline::analyze_formula("(((A→B)∧(B→C))∧A)", &Options::default()).unwrap();
        assert_eq!(analysis.cnf_text, "(~A | B) & (~B | C) & A");
        assert_eq!(analysis.selection.solver, SolverKind::DavisPutnam);
        assert_eq!(analysis.selection.reason, Reason::PureLiterals);
        assert_eq!(
            analysis.decoded_witness(),
            Some(vec![named("A", false), named("B", false), named("C", false)])
        );
    }

    #[test]
    fn contradiction() {
        let analysis = pipeline::analyze_formula("(A∧¬A)", &Options::default()).unwrap();
        assert_eq!(analysis.selection.reason, Reason::HighUnitFrequency);
        assert_eq!(analysis.verdict, Verdict::Unsatisfiable);
        assert_eq!(analysis.decoded_witness(), None);
    }

    #[test]
    fn tautology() {
        let analysis = pipeline::analyze_formula("¬(A∧¬A)", &Options::default()).unwrap();
        assert_eq!(
            analysis.decoded_clauses(),
            vec![vec![named("A", true), named("A", false)]]
        );
        assert!(analysis.verdict.is_satisfiable());
    }

    #[test]
    fn requested_solver_is_used() {
        let options = Options {
            solver: Some(SolverKind::Resolution),
            ..Options::default()
        };
        let analysis = pipeline::analyze_cnf("(A | B) & (~A | B)", &options).unwrap();
        assert_eq!(analysis.selection.solver, SolverKind::Resolution);
        assert_eq!(analysis.selection.reason, Reason::Requested);
        assert_eq!(
            analysis.verdict,
            Verdict::Satisfiable(Witness::Saturated { clauses: 3 })
        );
        assert_eq!(analysis.decoded_witness(), None);
    }

    #[test]
    fn errors_are_surfaced() {
        assert!(matches!(
            pipeline::analyze_formula("(A∧B", &Options::default()),
            Err(pipeline::Error::Conversion { .. })
        ));
        assert!(matches!(
            pipeline::analyze_cnf("A & (B", &Options::default()),
            Err(pipeline::Error::MalformedCnf { .. })
        ));
    }

    #[test]
    fn every_solver_agrees_on_formulas() {
        let formulas = [
            ("((A→B)∧(B→C))", true),
            ("((A∨B)∧(¬A∨¬B))", true),
            ("(((A↔B)∧(B↔C))∧(C↔D))", true),
            ("((A↔B)↔C)", true),
            ("¬(A∨A)", true),
            ("((A∧¬A)∨(B∧¬B))", false),
            ("(((A→B)∧(A→¬B))∧A)", false),
        ];

        for &(text, satisfiable) in formulas.iter() {
            for &kind in SolverKind::ALL.iter() {
                let options = Options {
                    solver: Some(kind),
                    ..Options::default()
                };
                let analysis = pipeline::analyze_formula(text, &options).unwrap();
                assert_eq!(
                    analysis.verdict.is_satisfiable(),
                    satisfiable,
                    "{} with {}",
                    text,
                    kind
                );
            }
        }
    }
}
