#[cfg(test)]
mod parser_tests {
    use imp_interpreter as imp;

    use imp::ast_printer::AstPrinter;
    use imp::error::ImpError;
    use imp::expr::Expr;
    use imp::parser::{parse_source, MAX_DEPTH};
    use imp::stmt::{Program, Stmt};
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Program {
        parse_source(source.as_bytes()).expect("Expected program to parse")
    }

    fn parse_err(source: &str) -> ImpError {
        parse_source(source.as_bytes()).expect_err("Expected a syntax error")
    }

    #[test]
    fn test_parse_simple_program() {
        let program = parse(include_str!("../programs/simple.imp"));

        assert_eq!(
            program,
            vec![
                Stmt::assign("x", Expr::int(42)),
                Stmt::assign("y", Expr::var("x")),
                Stmt::assign("z", Expr::add(Expr::var("x"), Expr::var("y"))),
                Stmt::ret(Expr::var("z")),
            ]
        );
    }

    #[test]
    fn test_parse_while_loop() {
        let program = parse(include_str!("../programs/sum.imp"));

        assert_eq!(
            program[2],
            Stmt::while_loop(
                Expr::not_eq(Expr::var("n"), Expr::int(0)),
                vec![
                    Stmt::assign("sum", Expr::add(Expr::var("sum"), Expr::var("n"))),
                    Stmt::assign("n", Expr::sub(Expr::var("n"), Expr::int(1))),
                ],
            )
        );
    }

    #[test]
    fn test_json_program_matches_surface_syntax() {
        let from_json: Program =
            serde_json::from_str(include_str!("../programs/simple.json")).expect("valid JSON");

        assert_eq!(from_json, parse(include_str!("../programs/simple.imp")));
    }

    #[test]
    fn test_precedence() {
        // or < and < equality < term < unary
        let program = parse("r = !a and b == 1 + 2 - c or d;");

        assert_eq!(
            AstPrinter::program(&program),
            "(= r (or (and (! a) (== b (- (+ 1 2) c))) d))"
        );
    }

    #[test]
    fn test_arithmetic_is_left_associative() {
        let program = parse("r = 10 - 3 - 2;");

        assert_eq!(
            program[0],
            Stmt::assign(
                "r",
                Expr::sub(Expr::sub(Expr::int(10), Expr::int(3)), Expr::int(2))
            )
        );
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let program = parse("r = not (true or false);");

        assert_eq!(
            program[0],
            Stmt::assign(
                "r",
                Expr::not(Expr::or(Expr::boolean(true), Expr::boolean(false)))
            )
        );
    }

    #[test]
    fn test_printer_renders_blocks() {
        let program = parse(include_str!("../programs/branch.imp"));

        assert_eq!(
            AstPrinter::program(&program),
            "(= x 42)\n(if (or (== x 43) (== 5 5)) (return 1))\n(return 0)"
        );
    }

    #[test]
    fn test_empty_source_is_empty_program() {
        assert!(parse("  // nothing here\n").is_empty());
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_err("x = 1\ny = 2;");

        match err {
            ImpError::Parse { message, line } => {
                assert_eq!(message, "Expected ';' after assignment");
                assert_eq!(line, 2);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("while (true) { x = 1;");

        assert!(err.is_syntax());
        assert!(err.to_string().contains("Expected '}' after block"), "got: {}", err);
    }

    #[test]
    fn test_bare_expression_is_not_a_statement() {
        let err = parse_err("1 + 2;");

        assert!(err.to_string().contains("Expected statement"), "got: {}", err);
    }

    #[test]
    fn test_lex_error_surfaces_from_parse_source() {
        let err = parse_err("x = 1 * 2;");

        assert!(matches!(err, ImpError::Lex { line: 1, .. }), "got: {:?}", err);
    }

    fn assert_too_deep(source: &str) {
        let err = parse_err(source);

        assert!(
            matches!(&err, ImpError::Parse { message, .. } if message == "Too much nesting"),
            "got: {:?}",
            err
        );
    }

    #[test]
    fn test_deep_nesting_is_a_parse_error() {
        assert_too_deep(&format!("x = {}true;", "!".repeat(10_000)));
        assert_too_deep(&format!("x = {}1{};", "(".repeat(10_000), ")".repeat(10_000)));
        assert_too_deep(&format!(
            "{}x = 1;{}",
            "if (true) { ".repeat(10_000),
            "}".repeat(10_000)
        ));
    }

    #[test]
    fn test_long_operator_chain_counts_towards_nesting() {
        assert_too_deep(&format!("x = 1{};", " + 1".repeat(MAX_DEPTH + 1)));

        let program = parse(&format!("x = 1{};", " - 1".repeat(MAX_DEPTH / 2)));
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_nesting_below_limit_parses() {
        let depth = MAX_DEPTH - 1;

        let program = parse(&format!("x = {}true;", "!".repeat(depth)));
        assert_eq!(program.len(), 1);

        let program = parse(&format!(
            "{}x = 1;{}",
            "while (false) { ".repeat(depth),
            "}".repeat(depth)
        ));
        assert_eq!(program.len(), 1);
    }
}
