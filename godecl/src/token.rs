// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt::{self, Write};

/// 1-based line and column (columns count chars, not bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
	pub line: u32,
	pub column: u32,
}

impl Pos {
	pub const START: Pos = Pos { line: 1, column: 1 };
}

impl fmt::Display for Pos {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	// Keywords
	Break,
	Case,
	Chan,
	Const,
	Continue,
	Default,
	Defer,
	Else,
	Fallthrough,
	For,
	Func,
	Go,
	Goto,
	If,
	Import,
	Interface,
	Map,
	Package,
	Range,
	Return,
	Select,
	Struct,
	Switch,
	Type,
	Var,
	// Builtins that the GoLite dialect reserves as keywords
	Print,
	Println,
	Append,
	Len,
	Cap,

	// Operators
	Plus,
	Minus,
	Star,
	Slash,
	Percent,
	Amp,
	Pipe,
	Caret,
	Shl,
	Shr,
	AndNot,
	PlusAssign,
	MinusAssign,
	StarAssign,
	SlashAssign,
	PercentAssign,
	AmpAssign,
	PipeAssign,
	CaretAssign,
	ShlAssign,
	ShrAssign,
	AndNotAssign,
	LogAnd,
	LogOr,
	Arrow,
	Inc,
	Dec,
	EqEq,
	Lt,
	Gt,
	Assign,
	Not,
	NotEq,
	LtEq,
	GtEq,
	Define,
	Ellipsis,
	LParen,
	RParen,
	LBrack,
	RBrack,
	LBrace,
	RBrace,
	Comma,
	Dot,
	Semicolon { implicit: bool },
	Colon,

	// Literals
	Int(i64),
	Float(f64),
	Rune(char),
	String(String),

	Ident(String),
	Eof,
}

impl Token {
	#[must_use]
	pub fn keyword(word: &str) -> Option<Token> {
		use Token::*;
		Some(match word {
			"break" => Break,
			"case" => Case,
			"chan" => Chan,
			"const" => Const,
			"continue" => Continue,
			"default" => Default,
			"defer" => Defer,
			"else" => Else,
			"fallthrough" => Fallthrough,
			"for" => For,
			"func" => Func,
			"go" => Go,
			"goto" => Goto,
			"if" => If,
			"import" => Import,
			"interface" => Interface,
			"map" => Map,
			"package" => Package,
			"range" => Range,
			"return" => Return,
			"select" => Select,
			"struct" => Struct,
			"switch" => Switch,
			"type" => Type,
			"var" => Var,
			"print" => Print,
			"println" => Println,
			"append" => Append,
			"len" => Len,
			"cap" => Cap,
			_ => return None,
		})
	}

	/// Whether a newline directly after this token terminates the statement.
	#[must_use]
	pub fn ends_statement(&self) -> bool {
		matches!(
			self,
			Token::Ident(_)
				| Token::Int(_)
				| Token::Float(_)
				| Token::Rune(_)
				| Token::String(_)
				| Token::Break
				| Token::Continue
				| Token::Fallthrough
				| Token::Return
				| Token::Inc
				| Token::Dec
				| Token::RParen
				| Token::RBrack
				| Token::RBrace
		)
	}

	/// Predeclared functions that this dialect reserves as keywords.
	#[must_use]
	pub fn is_builtin(&self) -> bool {
		matches!(self, Token::Print | Token::Println | Token::Append | Token::Len | Token::Cap)
	}

	/// Same variant, ignoring payloads.
	#[must_use]
	pub fn same_kind(&self, other: &Token) -> bool {
		std::mem::discriminant(self) == std::mem::discriminant(other)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use Token::*;
		let s = match self {
			Break => "break",
			Case => "case",
			Chan => "chan",
			Const => "const",
			Continue => "continue",
			Default => "default",
			Defer => "defer",
			Else => "else",
			Fallthrough => "fallthrough",
			For => "for",
			Func => "func",
			Go => "go",
			Goto => "goto",
			If => "if",
			Import => "import",
			Interface => "interface",
			Map => "map",
			Package => "package",
			Range => "range",
			Return => "return",
			Select => "select",
			Struct => "struct",
			Switch => "switch",
			Type => "type",
			Var => "var",
			Print => "print",
			Println => "println",
			Append => "append",
			Len => "len",
			Cap => "cap",
			Plus => "+",
			Minus => "-",
			Star => "*",
			Slash => "/",
			Percent => "%",
			Amp => "&",
			Pipe => "|",
			Caret => "^",
			Shl => "<<",
			Shr => ">>",
			AndNot => "&^",
			PlusAssign => "+=",
			MinusAssign => "-=",
			StarAssign => "*=",
			SlashAssign => "/=",
			PercentAssign => "%=",
			AmpAssign => "&=",
			PipeAssign => "|=",
			CaretAssign => "^=",
			ShlAssign => "<<=",
			ShrAssign => ">>=",
			AndNotAssign => "&^=",
			LogAnd => "&&",
			LogOr => "||",
			Arrow => "<-",
			Inc => "++",
			Dec => "--",
			EqEq => "==",
			Lt => "<",
			Gt => ">",
			Assign => "=",
			Not => "!",
			NotEq => "!=",
			LtEq => "<=",
			GtEq => ">=",
			Define => ":=",
			Ellipsis => "...",
			LParen => "(",
			RParen => ")",
			LBrack => "[",
			RBrack => "]",
			LBrace => "{",
			RBrace => "}",
			Comma => ",",
			Dot => ".",
			Semicolon { implicit: false } => ";",
			Semicolon { implicit: true } => "newline",
			Colon => ":",
			Int(v) => return write!(f, "{v}"),
			Float(v) => return write!(f, "{v:?}"),
			Rune(c) => return write!(f, "{c:?}"),
			String(s) => return write!(f, "{}", Quoted(s)),
			Ident(name) => return f.write_str(name),
			Eof => "EOF",
		};
		f.write_str(s)
	}
}

/// A token and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
	pub token: Token,
	pub pos: Pos,
}

/// Go interpreted string literal syntax for a decoded string.
pub struct Quoted<'a>(pub &'a str);

impl fmt::Display for Quoted<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_char('"')?;
		for c in self.0.chars() {
			match c {
				'"' => f.write_str("\\\"")?,
				'\\' => f.write_str("\\\\")?,
				'\x07' => f.write_str("\\a")?,
				'\x08' => f.write_str("\\b")?,
				'\x0c' => f.write_str("\\f")?,
				'\n' => f.write_str("\\n")?,
				'\r' => f.write_str("\\r")?,
				'\t' => f.write_str("\\t")?,
				'\x0b' => f.write_str("\\v")?,
				c if c.is_control() && u32::from(c) <= 0xff => write!(f, "\\x{:02x}", u32::from(c))?,
				c if is_invisible(c) => write!(f, "\\u{:04x}", u32::from(c))?,
				c => f.write_char(c)?,
			}
		}
		f.write_char('"')
	}
}

/// Format characters and separators that would be unreadable if printed raw.
fn is_invisible(c: char) -> bool {
	matches!(c, '\u{200b}'..='\u{200f}' | '\u{2028}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}')
}
