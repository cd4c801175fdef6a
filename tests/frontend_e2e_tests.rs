/// End-to-end tests for the front end
/// Demonstrates: Scanner → Parser → Printers working together
use treewalk::{
    AstPrinter, Diagnostics, Expression, Literal, Lox, Parser, RpnPrinter, Scanner, Token,
    TokenKind,
};

fn scan(source: &str) -> (Vec<Token>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
    (tokens, diagnostics)
}

fn parse(source: &str) -> (Option<Expression>, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source, &mut diagnostics).scan_tokens();
    let expression = Parser::new(tokens, &mut diagnostics).parse();
    (expression, diagnostics)
}

fn reports(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.iter().map(|d| d.to_string()).collect()
}

#[test]
fn test_e2e_precedence_renderings() {
    let (expression, diagnostics) = parse("1 + 2 * 3");
    let expression = expression.unwrap();

    assert!(!diagnostics.had_error());
    assert_eq!(AstPrinter.print(&expression), "(+ 1 (* 2 3))");
    assert_eq!(RpnPrinter.print(&expression), "1 2 3 * +");
}

#[test]
fn test_e2e_grouping_overrides_precedence() {
    let (expression, _) = parse("(1 + 2) * 3");
    let expression = expression.unwrap();

    assert_eq!(AstPrinter.print(&expression), "(* (group (+ 1 2)) 3)");
    assert_eq!(RpnPrinter.print(&expression), "1 2 + 3 *");
}

#[test]
fn test_e2e_full_ladder() {
    let (expression, _) = parse("!(1 < 2) == -3 / 4 >= 5 - 6");
    let expression = expression.unwrap();

    assert_eq!(
        AstPrinter.print(&expression),
        "(== (! (group (< 1 2))) (>= (/ (- 3) 4) (- 5 6)))"
    );
    assert_eq!(
        RpnPrinter.print(&expression),
        "1 2 < ! 3 - 4 / 5 6 - >= =="
    );
}

#[test]
fn test_e2e_missing_close_paren() {
    let (expression, diagnostics) = parse("(1 + 2\n\n");

    assert!(expression.is_none());
    assert!(diagnostics.had_error());
    assert_eq!(
        reports(&diagnostics),
        vec!["[line 3] Error at end: Expected `)` after expression"]
    );
}

#[test]
fn test_e2e_error_aborts_without_recovery() {
    let (expression, diagnostics) = parse("1 + ; 2 + )");

    assert!(expression.is_none());
    // Only the first problem is reported
    assert_eq!(
        reports(&diagnostics),
        vec!["[line 1] Error at \";\": Expected an expression"]
    );
}

#[test]
fn test_e2e_lex_error_does_not_stop_parsing() {
    let (expression, diagnostics) = parse("@1");

    assert_eq!(
        reports(&diagnostics),
        vec!["[line 1] Error: Unexpected character: @"]
    );
    assert_eq!(AstPrinter.print(&expression.unwrap()), "1");
}

#[test]
fn test_e2e_number_disambiguation() {
    let (tokens, _) = scan("3.14");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].literal, Some(Literal::Number(3.14)));

    let (tokens, _) = scan("3.");
    let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["3", ".", ""]);
    assert_eq!(tokens[1].kind, TokenKind::Dot);
}

#[test]
fn test_e2e_comments() {
    let (tokens, diagnostics) = scan("/* a /* b */ c */");
    assert_eq!(tokens.len(), 1);
    assert!(!diagnostics.had_error());

    let (tokens, diagnostics) = scan("/* a");
    assert_eq!(tokens.len(), 1);
    assert_eq!(
        reports(&diagnostics),
        vec!["[line 1] Error: Unterminated comment"]
    );
}

#[test]
fn test_e2e_multiline_string_lines() {
    let (tokens, _) = scan("1\n\"two\nlines\" + 2");

    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 3, 3]);
    assert_eq!(tokens[1].lexeme, "\"two\nlines\"");
}

#[test]
fn test_e2e_session_keeps_runs_apart() {
    let mut first = Lox::default();
    let mut second = Lox::default();

    first.run("(");
    second.run("true");

    assert!(first.had_error());
    assert!(!second.had_error());
}
