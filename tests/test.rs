use calculator::error::{CalcError, EvalError, LexError};
use calculator::session::Session;
use rstest::*;

#[rstest]
#[case("2 + 3 * 4", 14.0)]
#[case("(2 + 3) * 4", 20.0)]
#[case("2 ^ 3 ^ 2", 512.0)]
#[case("-2 ^ 2", 4.0)]
#[case("2 ^ -1", 0.5)]
#[case("10 / 4", 2.5)]
#[case("10 - 4 - 3", 3.0)]
#[case("sqrt(2)", std::f64::consts::SQRT_2)]
#[case("ln(e)", 1.0)]
#[case("log(100)", 2.0)]
#[case("sin(0)", 0.0)]
#[case("cos(0)", 1.0)]
#[case("sin(pi / 2)", 1.0)]
#[case("2 * π", std::f64::consts::TAU)]
#[case("SQRT(4) + Pi - pi", 2.0)]
#[case(".5 + 1.", 1.5)]
#[case("sqrt(sqrt(16))", 2.0)]
fn evaluates(#[case] expression: &str, #[case] expected: f64) {
    let mut session = Session::new();
    let result = session
        .evaluate_and_record(expression)
        .expect("evaluation should succeed");
    assert!(
        (result - expected).abs() < 1e-9,
        "'{expression}' evaluated to {result}, expected {expected}"
    );
}

#[rstest]
#[case("42")]
#[case("3.25")]
#[case("0")]
fn a_lone_literal_round_trips(#[case] expression: &str) {
    let mut session = Session::new();
    let expected: f64 = expression.parse().unwrap();

    let result = session.evaluate_and_record(expression).unwrap();
    assert_eq!(result, expected);

    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].expression, expression);
    assert_eq!(session.history()[0].result, expected);
}

#[rstest]
#[case::sqrt_negative("sqrt(-1)")]
#[case::log_zero("log(0)")]
#[case::ln_negative("ln(-2)")]
fn domain_errors(#[case] expression: &str) {
    let mut session = Session::new();
    let error = session.evaluate_and_record(expression).unwrap_err();
    assert!(
        matches!(error, CalcError::Eval(EvalError::Domain { .. })),
        "'{expression}' should be a domain error, got: {error}"
    );
    assert!(session.history().is_empty());
    assert_eq!(session.last_result(), 0.0);
}

#[test]
fn division_by_zero_does_not_mutate_the_session() {
    let mut session = Session::new();
    let error = session.evaluate_and_record("1/0").unwrap_err();
    assert!(matches!(
        error,
        CalcError::Eval(EvalError::DivisionByZero { .. })
    ));
    assert!(session.history().is_empty());
    assert_eq!(session.last_result(), 0.0);
}

#[test]
fn failed_calls_are_idempotent() {
    let mut session = Session::new();
    for _ in 0..2 {
        assert!(session.evaluate_and_record("1/0").is_err());
        assert_eq!(session.history().len(), 0);
    }
}

#[rstest]
#[case::implicit_multiplication("2sin(1)")]
#[case::unknown_name("x + 1")]
#[case::stray_character("2 $ 2")]
fn lex_errors(#[case] expression: &str) {
    let mut session = Session::new();
    let error = session.evaluate_and_record(expression).unwrap_err();
    assert!(
        matches!(error, CalcError::Lex(LexError::UnexpectedCharacter { .. })
            | CalcError::Lex(LexError::UnknownName { .. })
            | CalcError::Lex(LexError::InvalidNumber { .. })),
        "'{expression}' should be a lex error, got: {error}"
    );
}

#[rstest]
#[case::unclosed_paren("(2 + 3")]
#[case::stray_close_paren("2 + 3)")]
#[case::trailing_operator("2 +")]
#[case::call_without_parens("sin 1")]
#[case::two_arguments("sin(1, 2)")]
#[case::empty("")]
fn parse_errors(#[case] expression: &str) {
    let mut session = Session::new();
    let error = session.evaluate_and_record(expression).unwrap_err();
    assert!(
        matches!(error, CalcError::Parse(_)),
        "'{expression}' should be a parse error, got: {error}"
    );
    assert!(session.history().is_empty());
}

#[test]
fn memory_feeds_expressions() {
    let mut session = Session::new();

    session.store(5.0);
    assert_eq!(session.evaluate_and_record("m + 1").unwrap(), 6.0);

    session.add_memory(2.0);
    assert_eq!(session.memory(), 7.0);

    session.subtract_memory(4.0);
    assert_eq!(session.memory(), 3.0);

    session.clear_memory();
    assert_eq!(session.memory(), 0.0);
    assert_eq!(session.evaluate_and_record("m").unwrap(), 0.0);
}

#[test]
fn ans_chains_results() {
    let mut session = Session::new();
    assert_eq!(session.evaluate_and_record("2 + 2").unwrap(), 4.0);
    assert_eq!(session.evaluate_and_record("ans * 10").unwrap(), 40.0);
    assert_eq!(session.evaluate_and_record("ANS + ans").unwrap(), 80.0);
}

#[test]
fn ans_starts_at_zero() {
    let mut session = Session::new();
    assert_eq!(session.evaluate_and_record("ans + 1").unwrap(), 1.0);
}

#[test]
fn history_is_chronological() {
    let mut session = Session::new();
    session.evaluate_and_record("1 + 1").unwrap();
    session.evaluate_and_record("2 + 2").unwrap();
    session.evaluate_and_record("3 + 3").unwrap();

    let entries: Vec<_> = session
        .history()
        .iter()
        .map(|e| (e.expression.as_str(), e.result))
        .collect();
    assert_eq!(entries, vec![
        ("1 + 1", 2.0),
        ("2 + 2", 4.0),
        ("3 + 3", 6.0),
    ]);

    session.store(9.0);
    session.clear_history();
    assert!(session.history().is_empty());
    assert_eq!(session.memory(), 9.0);
}

#[test]
fn resolution_respects_word_boundaries() {
    // `m` inside `log` and `e` inside `sqrt`-adjacent positions must never
    // be substituted; only whole identifiers resolve.
    let mut session = Session::new();
    session.store(3.0);
    assert_eq!(session.evaluate_and_record("log(100) + m").unwrap(), 5.0);
    assert!((session.evaluate_and_record("ln(e) + e / e").unwrap() - 2.0).abs() < 1e-12);
}

#[test]
fn overflow_is_an_error_but_stored_infinity_propagates() {
    let mut session = Session::new();

    // Exponent notation is not part of the grammar; `e` is Euler's number.
    let error = session.evaluate_and_record("1e308 * 10").unwrap_err();
    assert!(matches!(error, CalcError::Lex(LexError::InvalidNumber { .. })));

    let error = session.evaluate_and_record("10 ^ 400").unwrap_err();
    assert!(matches!(error, CalcError::Eval(EvalError::Overflow { .. })));
    assert!(session.history().is_empty());

    session.store(f64::INFINITY);
    let result = session.evaluate_and_record("m + 1").unwrap();
    assert_eq!(result, f64::INFINITY);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn unary_minus_nests() {
    let mut session = Session::new();
    assert_eq!(session.evaluate_and_record("--2").unwrap(), 2.0);
    assert_eq!(session.evaluate_and_record("-sqrt(4)").unwrap(), -2.0);
    assert_eq!(session.evaluate_and_record("2 - -3").unwrap(), 5.0);
}
