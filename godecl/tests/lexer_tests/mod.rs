use godecl::Error;
use godecl::lexer::{Lexer, tokenize};
use godecl::token::{Pos, Token};

const SEMI: Token = Token::Semicolon { implicit: true };

fn tokens(src: &str) -> Vec<Token> {
	tokenize(src)
		.unwrap_or_else(|e| panic!("lexing {src:?} failed: {e}"))
		.into_iter()
		.map(|t| t.token)
		.collect()
}

fn ident(name: &str) -> Token {
	Token::Ident(name.to_string())
}

fn lex_error(src: &str) -> Error {
	match tokenize(src) {
		Ok(tokens) => panic!("expected {src:?} to fail, got {tokens:?}"),
		Err(e) => e,
	}
}

#[test]
fn test_semicolon_inserted_at_newline() {
	assert_eq!(
		tokens("package main\ntype num int\n"),
		vec![Token::Package, ident("main"), SEMI, Token::Type, ident("num"), ident("int"), SEMI, Token::Eof]
	);
}

#[test]
fn test_no_semicolon_after_open_brace() {
	assert_eq!(
		tokens("struct {\n\tx int\n}\n"),
		vec![Token::Struct, Token::LBrace, ident("x"), ident("int"), SEMI, Token::RBrace, SEMI, Token::Eof]
	);
}

#[test]
fn test_semicolon_inserted_at_eof() {
	assert_eq!(tokens("type a b"), vec![Token::Type, ident("a"), ident("b"), SEMI, Token::Eof]);
}

#[test]
fn test_no_semicolon_after_operator_at_eof() {
	assert_eq!(tokens("a &&"), vec![ident("a"), Token::LogAnd, Token::Eof]);
}

#[test]
fn test_comments() {
	assert_eq!(
		tokens("a // trailing\nb /* inline */ c /* spans\nlines */ d"),
		vec![ident("a"), SEMI, ident("b"), ident("c"), SEMI, ident("d"), SEMI, Token::Eof]
	);
}

#[test]
fn test_explicit_semicolon() {
	assert_eq!(
		tokens("a; b"),
		vec![ident("a"), Token::Semicolon { implicit: false }, ident("b"), SEMI, Token::Eof]
	);
}

#[test]
fn test_keyword_statement_enders() {
	assert_eq!(
		tokens("return\nbreak\nx++\n"),
		vec![Token::Return, SEMI, Token::Break, SEMI, ident("x"), Token::Inc, SEMI, Token::Eof]
	);
}

#[test]
fn test_true_false_are_identifiers() {
	assert_eq!(tokens("true false"), vec![ident("true"), ident("false"), SEMI, Token::Eof]);
}

#[test]
fn test_number_literals() {
	assert_eq!(
		tokens("42 0x1F 0o17 0b101 017 1_000 3.25 1e3 .5 0"),
		vec![
			Token::Int(42),
			Token::Int(31),
			Token::Int(15),
			Token::Int(5),
			Token::Int(15),
			Token::Int(1000),
			Token::Float(3.25),
			Token::Float(1000.0),
			Token::Float(0.5),
			Token::Int(0),
			SEMI,
			Token::Eof,
		]
	);
}

#[test]
fn test_digit_separators() {
	assert_eq!(
		tokens("0x_1F 0_7 1_0.2_5 0b1_0"),
		vec![
			Token::Int(31),
			Token::Int(7),
			Token::Float(10.25),
			Token::Int(2),
			SEMI,
			Token::Eof,
		]
	);
}

#[test]
fn test_hex_floats() {
	assert_eq!(
		tokens("0x1p-2 0x1.8p1 0X_Ap0 0x.8p1"),
		vec![
			Token::Float(0.25),
			Token::Float(3.0),
			Token::Float(10.0),
			Token::Float(1.0),
			SEMI,
			Token::Eof,
		]
	);
}

#[test]
fn test_hex_float_errors_name_the_problem() {
	let reason = |src: &str| match lex_error(src) {
		Error::InvalidNumber { reason, .. } => reason,
		other => panic!("expected number error for {src:?}, got {other:?}"),
	};
	assert_eq!(reason("0x1.8"), "hexadecimal mantissa requires a 'p' exponent");
	assert_eq!(reason("0b1p2"), "'p' exponent requires hexadecimal mantissa");
	assert_eq!(reason("0x1p"), "exponent has no digits");
}

#[test]
fn test_minus_is_an_operator() {
	assert_eq!(tokens("-5"), vec![Token::Minus, Token::Int(5), SEMI, Token::Eof]);
}

#[test]
fn test_string_literals() {
	assert_eq!(
		tokens(r#""a\tb\"cé" `raw\n`"#),
		vec![
			Token::String("a\tb\"c\u{e9}".to_string()),
			Token::String("raw\\n".to_string()),
			SEMI,
			Token::Eof,
		]
	);
}

#[test]
fn test_raw_string_spans_lines() {
	assert_eq!(
		tokens("`one\r\ntwo`"),
		vec![Token::String("one\ntwo".to_string()), SEMI, Token::Eof]
	);
}

#[test]
fn test_rune_literals() {
	assert_eq!(
		tokens(r"'x' '\n' '\x41' '\101' 'é'"),
		vec![
			Token::Rune('x'),
			Token::Rune('\n'),
			Token::Rune('A'),
			Token::Rune('A'),
			Token::Rune('é'),
			SEMI,
			Token::Eof,
		]
	);
}

#[test]
fn test_operators_longest_match() {
	assert_eq!(
		tokens("<<= &^= ... := <- != && >= %"),
		vec![
			Token::ShlAssign,
			Token::AndNotAssign,
			Token::Ellipsis,
			Token::Define,
			Token::Arrow,
			Token::NotEq,
			Token::LogAnd,
			Token::GtEq,
			Token::Percent,
			Token::Eof,
		]
	);
}

#[test]
fn test_positions() {
	let spanned = tokenize("package main\n  type t int").unwrap();
	let positions: Vec<(u32, u32)> = spanned.iter().map(|t| (t.pos.line, t.pos.column)).collect();
	assert_eq!(positions, vec![(1, 1), (1, 9), (1, 13), (2, 3), (2, 8), (2, 10), (2, 13), (2, 13)]);
}

#[test]
fn test_iterator_stops_after_eof() {
	let lexer = Lexer::new("x");
	assert_eq!(lexer.count(), 3, "x, implicit semicolon, EOF");
}

#[test]
fn test_next_token_repeats_eof() {
	let mut lexer = Lexer::new("");
	assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
	assert_eq!(lexer.next_token().unwrap().token, Token::Eof);
}

#[test]
fn test_unterminated_string() {
	assert_eq!(
		lex_error("\"abc"),
		Error::Unterminated {
			what: "string",
			pos: Pos { line: 1, column: 1 }
		}
	);
	assert!(matches!(lex_error("\"abc\ndef\""), Error::Unterminated { what: "string", .. }));
	assert!(matches!(lex_error("`abc"), Error::Unterminated { what: "raw string", .. }));
	assert!(matches!(lex_error("/* open"), Error::Unterminated { what: "comment", .. }));
}

#[test]
fn test_invalid_escape() {
	assert_eq!(
		lex_error(r#""\q""#),
		Error::InvalidEscape {
			found: 'q',
			pos: Pos { line: 1, column: 2 }
		}
	);
	// \' is only valid inside rune literals
	assert!(matches!(lex_error(r#""\'""#), Error::InvalidEscape { found: '\'', .. }));
}

#[test]
fn test_invalid_runes() {
	assert!(matches!(lex_error("''"), Error::InvalidRune { .. }));
	assert!(matches!(lex_error("'ab'"), Error::InvalidRune { .. }));
	assert!(matches!(lex_error("'a"), Error::Unterminated { what: "rune", .. }));
	assert!(matches!(lex_error(r"'\777'"), Error::InvalidRune { .. }));
}

#[test]
fn test_invalid_numbers() {
	for src in [
		"08", "1e", "99999999999999999999", "12ab", "0x", "1__0", "1_", "1_.5", "1._5", "1_e3", "1e_3", "0x1_", "0x1_p2",
	] {
		assert!(
			matches!(lex_error(src), Error::InvalidNumber { .. }),
			"{src:?} should be an invalid number"
		);
	}
}

#[test]
fn test_unexpected_characters() {
	assert_eq!(
		lex_error("type @"),
		Error::UnexpectedChar {
			found: '@',
			pos: Pos { line: 1, column: 6 }
		}
	);
	assert!(matches!(lex_error("a..b"), Error::UnexpectedChar { found: '.', .. }));
}
