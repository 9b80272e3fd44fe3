use super::*;
use godecl::Error;
use godecl::ast::{Field, TypeExpr, TypeName};
use godecl::parser::MAX_NESTING;
use godecl::token::Pos;

fn parse_error(src: &str) -> Error {
	match godecl::parse(src) {
		Ok(file) => panic!("expected {src:?} to fail, got {file:?}"),
		Err(e) => e,
	}
}

fn field_names(fields: &[Field]) -> Vec<&str> {
	fields.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_fixture_declarations() {
	let file = godecl::parse(&read_fixture("test_decl.go")).unwrap();
	assert_eq!(file.package, "main");
	assert!(file.imports.is_empty());

	let names: Vec<&str> = file.type_specs().map(|(_, spec)| spec.name.as_str()).collect();
	assert_eq!(
		names,
		["num", "str", "char", "maybe", "decimal", "some", "another", "point", "square"]
	);

	// five single declarations, one group of two, two struct declarations
	assert_eq!(file.decls.len(), 8);
	let grouped: Vec<&str> = file
		.type_specs()
		.filter(|(decl, _)| decl.grouped)
		.map(|(_, spec)| spec.name.as_str())
		.collect();
	assert_eq!(grouped, ["some", "another"]);
}

#[test]
fn test_multiple_names_share_field_type() {
	let file = godecl::parse("package p\ntype point struct {\n\tx, y int\n}\n").unwrap();
	let (_, spec) = file.type_specs().next().unwrap();
	let TypeExpr::Struct(fields) = &spec.ty else {
		panic!("expected struct, got {:?}", spec.ty);
	};
	assert_eq!(field_names(fields), ["x", "y"]);
	assert_eq!(fields[0].ty, fields[1].ty);
	assert_eq!(fields[0].pos, Pos { line: 3, column: 2 });
	assert_eq!(fields[1].pos, Pos { line: 3, column: 5 });
}

#[test]
fn test_type_expressions() {
	let file = godecl::parse("package p\ntype t map[string][]*[4]pkg.Thing\n").unwrap();
	let (_, spec) = file.type_specs().next().unwrap();
	assert_eq!(spec.ty.to_string(), "map[string][]*[4]pkg.Thing");
	let TypeExpr::Map { value, .. } = &spec.ty else {
		panic!("expected map, got {:?}", spec.ty);
	};
	let TypeExpr::Slice(elem) = value.as_ref() else {
		panic!("expected slice, got {value:?}");
	};
	let TypeExpr::Pointer(inner) = elem.as_ref() else {
		panic!("expected pointer, got {elem:?}");
	};
	let TypeExpr::Array { len: 4, elem } = inner.as_ref() else {
		panic!("expected [4] array, got {inner:?}");
	};
	assert!(matches!(
		elem.as_ref(),
		TypeExpr::Named(TypeName { package: Some(pkg), name, .. }) if pkg == "pkg" && name == "Thing"
	));
}

#[test]
fn test_parenthesised_type() {
	let file = godecl::parse("package p\ntype t (int)\n").unwrap();
	let (_, spec) = file.type_specs().next().unwrap();
	assert_eq!(spec.ty.to_string(), "int");
}

#[test]
fn test_alias_form() {
	let file = godecl::parse("package p\ntype a = int\ntype b int\n").unwrap();
	let aliases: Vec<bool> = file.type_specs().map(|(_, spec)| spec.alias).collect();
	assert_eq!(aliases, [true, false]);
}

#[test]
fn test_embedded_fields_and_tags() {
	let src = "package p\ntype t struct {\n\tBase\n\t*io.Reader `x`\n\ta, b string \"both\"\n}\n";
	let file = godecl::parse(src).unwrap();
	let (_, spec) = file.type_specs().next().unwrap();
	let TypeExpr::Struct(fields) = &spec.ty else {
		panic!("expected struct");
	};
	assert_eq!(field_names(fields), ["Base", "Reader", "a", "b"]);
	assert!(fields[0].embedded && fields[1].embedded);
	assert!(!fields[2].embedded);
	assert_eq!(fields[1].ty.to_string(), "*io.Reader");
	assert_eq!(fields[1].tag.as_deref(), Some("x"));
	assert_eq!(fields[2].tag.as_deref(), Some("both"));
	assert_eq!(fields[3].tag.as_deref(), Some("both"));
}

#[test]
fn test_single_line_forms() {
	let file = godecl::parse("package p; type ( a int; b struct{ x int; y int } ); type c struct{}").unwrap();
	assert_eq!(file.decls.len(), 2);
	assert_eq!(file.decls[0].specs.len(), 2);
	assert_eq!(file.decls[1].specs[0].ty, TypeExpr::Struct(vec![]));
}

#[test]
fn test_empty_group() {
	let file = godecl::parse("package p\ntype ()\n").unwrap();
	assert_eq!(file.decls.len(), 1);
	assert!(file.decls[0].grouped);
	assert!(file.decls[0].specs.is_empty());
}

#[test]
fn test_imports() {
	let file = godecl::parse("package p\nimport \"a\"\nimport (\n\tb \"x/b\"\n\t. \"c\"\n\t_ \"d\"\n)\n").unwrap();
	let imports: Vec<(Option<&str>, &str)> = file
		.imports
		.iter()
		.map(|i| (i.name.as_deref(), i.path.as_str()))
		.collect();
	assert_eq!(
		imports,
		[(None, "a"), (Some("b"), "x/b"), (Some("."), "c"), (Some("_"), "d")]
	);
}

#[test]
fn test_package_only() {
	let file = godecl::parse("package empty").unwrap();
	assert_eq!(file.package, "empty");
	assert!(file.decls.is_empty());
}

#[test]
fn test_missing_package_clause() {
	let err = parse_error("type a int\n");
	assert_eq!(
		err,
		Error::UnexpectedToken {
			expected: "`package`".to_string(),
			found: "type".to_string(),
			pos: Pos { line: 1, column: 1 },
		}
	);
}

#[test]
fn test_unsupported_declarations() {
	for (src, keyword) in [
		("package p\nvar x int\n", "var"),
		("package p\nconst c = 1\n", "const"),
		("package p\nfunc main() {}\n", "func"),
	] {
		assert_eq!(
			parse_error(src),
			Error::UnsupportedDecl {
				keyword,
				pos: Pos { line: 2, column: 1 }
			}
		);
	}
}

#[test]
fn test_blank_type_name() {
	assert_eq!(
		parse_error("package p\ntype _ int\n"),
		Error::BlankTypeName {
			pos: Pos { line: 2, column: 6 }
		}
	);
}

#[test]
fn test_syntax_errors() {
	let cases = [
		("package p\ntype t struct {\n\tx y z\n}\n", "two types for one field"),
		("package p\ntype t\n", "missing type"),
		("package p\ntype t [-1]int\n", "negative length"),
		("package p\ntype t [n]int\n", "non-literal length"),
		("package p\ntype t map[string\n", "unclosed map key"),
		("package p\ntype ( a int b int )\n", "missing separator"),
		("package p\nimport x\n", "import without path"),
		("package p\ntype a int\nimport \"late\"\n", "import after declarations"),
	];
	for (src, what) in cases {
		let err = godecl::parse(src);
		assert!(
			matches!(err, Err(Error::UnexpectedToken { .. })),
			"{what}: expected syntax error for {src:?}, got {err:?}"
		);
	}
}

#[test]
fn test_error_message_has_position() {
	let err = parse_error("package p\ntype t struct {\n\tx int,\n}\n");
	assert_eq!(err.pos(), Pos { line: 3, column: 7 });
	assert_eq!(err.to_string(), "3:7: expected `;` or `}`, found ,");
}

#[test]
fn test_reparse_is_identical() {
	let src = read_fixture("test_decl.go");
	let first = godecl::parse(&src).unwrap();
	let second = godecl::parse(&src).unwrap();
	assert_eq!(first, second);
}

const ESCAPED_STRINGS: &str = r#"package p

import q "odd\x01path"

type t struct {
	a int "\x01\t\"\\é\u200b\x7f\u0085"
}
"#;

fn struct_fields(file: &godecl::ast::SourceFile) -> &[Field] {
	let (_, spec) = file.type_specs().next().unwrap();
	let TypeExpr::Struct(fields) = &spec.ty else {
		panic!("expected struct, got {:?}", spec.ty);
	};
	fields
}

#[test]
fn test_printed_form_reparses_to_same_structure() {
	let mut sources: Vec<(&str, String)> = ["test_decl.go", "declarations.go", "named_chain.go"]
		.into_iter()
		.map(|fixture| (fixture, read_fixture(fixture)))
		.collect();
	sources.push(("escaped strings", ESCAPED_STRINGS.to_string()));

	for (name, src) in sources {
		let original = godecl::parse(&src).unwrap();
		let printed = original.to_string();
		let reparsed = godecl::parse(&printed).unwrap_or_else(|e| panic!("{name}: reprint failed to parse: {e}\n{printed}"));
		assert_eq!(reparsed.to_string(), printed, "{name}: printing is not stable");
	}
}

#[test]
fn test_strings_print_with_go_escapes() {
	let original = godecl::parse(ESCAPED_STRINGS).unwrap();
	let tag = struct_fields(&original)[0].tag.clone().unwrap();
	assert_eq!(tag, "\u{1}\t\"\\é\u{200b}\u{7f}\u{85}");

	let printed = original.to_string();
	assert!(printed.contains(r#"import q "odd\x01path""#), "{printed}");
	assert!(printed.contains(r#"a int "\x01\t\"\\é\u200b\x7f\x85""#), "{printed}");

	let reparsed = godecl::parse(&printed).unwrap();
	assert_eq!(struct_fields(&reparsed)[0].tag.as_deref(), Some(tag.as_str()));
	assert_eq!(reparsed.imports[0].path, "odd\u{1}path");
}

#[test]
fn test_nesting_limit() {
	let at_limit = format!("package p\ntype t {}int\n", "*".repeat(MAX_NESTING - 1));
	godecl::parse(&at_limit).unwrap();

	let over = format!("package p\ntype t {}int\n", "*".repeat(MAX_NESTING));
	assert_eq!(
		parse_error(&over),
		Error::NestingTooDeep {
			pos: Pos { line: 2, column: 8 + MAX_NESTING as u32 }
		}
	);

	let far_over = format!("package p\ntype t {}int\n", "[]".repeat(100_000));
	assert!(matches!(parse_error(&far_over), Error::NestingTooDeep { .. }));
	let structs = format!("package p\ntype t {}int{}\n", "struct { a ".repeat(1_000), " }".repeat(1_000));
	assert!(matches!(parse_error(&structs), Error::NestingTooDeep { .. }));
}

#[test]
fn test_builtin_names_are_reserved() {
	assert_eq!(
		parse_error("package p\ntype t struct {\n\tlen int\n}\n"),
		Error::ReservedName {
			name: "len".to_string(),
			pos: Pos { line: 3, column: 2 }
		}
	);
	assert_eq!(
		parse_error("package p\ntype cap int\n").to_string(),
		"2:6: `cap` is a reserved builtin and cannot be used as an identifier"
	);
	assert!(matches!(
		parse_error("package p\ntype t []append\n"),
		Error::ReservedName { .. }
	));
}
