// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

use crate::ast::{Field, Import, SourceFile, TypeDecl, TypeExpr, TypeName, TypeSpec};
use crate::error::{Error, Result};
use crate::lexer;
use crate::token::{Pos, Spanned, Token};

/// Lex and parse a Go source file.
pub fn parse(src: &str) -> Result<SourceFile> {
	let tokens = lexer::tokenize(src)?;
	tracing::trace!(count = tokens.len(), "lexed");
	Parser::new(tokens).parse_file()
}

/// Deepest type expression accepted before giving up with [`Error::NestingTooDeep`].
pub const MAX_NESTING: usize = 256;

/// Recursive descent over a token stream ending in [`Token::Eof`].
pub struct Parser {
	tokens: Vec<Spanned>,
	index: usize,
	depth: usize,
}

impl Parser {
	#[must_use]
	pub fn new(mut tokens: Vec<Spanned>) -> Self {
		if !tokens.last().is_some_and(|t| t.token == Token::Eof) {
			let pos = tokens.last().map_or(Pos::START, |t| t.pos);
			tokens.push(Spanned { token: Token::Eof, pos });
		}
		Self { tokens, index: 0, depth: 0 }
	}

	fn current(&self) -> &Spanned {
		// Eof is never consumed, so the index stays in bounds
		&self.tokens[self.index.min(self.tokens.len() - 1)]
	}

	fn peek(&self) -> &Token {
		&self.current().token
	}

	fn peek_second(&self) -> &Token {
		self.tokens.get(self.index + 1).map_or(&Token::Eof, |t| &t.token)
	}

	fn advance(&mut self) -> Spanned {
		let spanned = self.current().clone();
		if spanned.token != Token::Eof {
			self.index += 1;
		}
		spanned
	}

	fn at(&self, kind: &Token) -> bool {
		self.peek().same_kind(kind)
	}

	fn eat(&mut self, kind: &Token) -> bool {
		if self.at(kind) {
			self.advance();
			true
		} else {
			false
		}
	}

	fn unexpected(&self, expected: &str) -> Error {
		let current = self.current();
		Error::UnexpectedToken {
			expected: expected.to_string(),
			found: current.token.to_string(),
			pos: current.pos,
		}
	}

	fn expect(&mut self, kind: &Token, expected: &str) -> Result<Pos> {
		if self.at(kind) {
			Ok(self.advance().pos)
		} else {
			Err(self.unexpected(expected))
		}
	}

	fn expect_semicolon(&mut self) -> Result<()> {
		self.expect(&Token::Semicolon { implicit: false }, "`;` or newline").map(|_| ())
	}

	/// Inside `( ... )` or `{ ... }` the separator before the closing token is optional.
	fn expect_separator(&mut self, close: &Token, expected: &str) -> Result<()> {
		if self.eat(&Token::Semicolon { implicit: false }) || self.at(close) {
			Ok(())
		} else {
			Err(self.unexpected(expected))
		}
	}

	fn ident(&mut self) -> Result<(String, Pos)> {
		match self.peek() {
			Token::Ident(_) => {
				let Spanned { token, pos } = self.advance();
				let Token::Ident(name) = token else { unreachable!("checked by peek") };
				Ok((name, pos))
			}
			_ => Err(self.unexpected_or_reserved("identifier")),
		}
	}

	/// Builtins such as `len` lex as keywords, so name them when they show up where a name belongs.
	fn unexpected_or_reserved(&self, expected: &str) -> Error {
		let current = self.current();
		if current.token.is_builtin() {
			Error::ReservedName {
				name: current.token.to_string(),
				pos: current.pos,
			}
		} else {
			self.unexpected(expected)
		}
	}

	pub fn parse_file(&mut self) -> Result<SourceFile> {
		self.expect(&Token::Package, "`package`")?;
		let (package, _) = self.ident()?;
		self.expect_semicolon()?;

		let mut imports = Vec::new();
		while self.at(&Token::Import) {
			self.parse_import_decl(&mut imports)?;
			self.expect_semicolon()?;
		}

		let mut decls = Vec::new();
		loop {
			let pos = self.current().pos;
			let keyword = match self.peek() {
				Token::Eof => break,
				Token::Type => {
					decls.push(self.parse_type_decl()?);
					self.expect_semicolon()?;
					continue;
				}
				Token::Var => "var",
				Token::Const => "const",
				Token::Func => "func",
				_ => return Err(self.unexpected("`type` declaration")),
			};
			return Err(Error::UnsupportedDecl { keyword, pos });
		}

		tracing::debug!(package = %package, imports = imports.len(), decls = decls.len(), "parsed source file");
		Ok(SourceFile { package, imports, decls })
	}

	fn parse_import_decl(&mut self, imports: &mut Vec<Import>) -> Result<()> {
		self.expect(&Token::Import, "`import`")?;
		if self.eat(&Token::LParen) {
			while !self.eat(&Token::RParen) {
				imports.push(self.parse_import_spec()?);
				self.expect_separator(&Token::RParen, "`;` or `)`")?;
			}
		} else {
			imports.push(self.parse_import_spec()?);
		}
		Ok(())
	}

	fn parse_import_spec(&mut self) -> Result<Import> {
		let pos = self.current().pos;
		let name = match self.peek() {
			Token::Dot => {
				self.advance();
				Some(".".to_string())
			}
			Token::Ident(_) => Some(self.ident()?.0),
			_ => None,
		};
		let Token::String(path) = self.peek() else {
			return Err(self.unexpected("import path"));
		};
		let path = path.clone();
		self.advance();
		Ok(Import { name, path, pos })
	}

	/// `type Spec` or `type ( Spec; Spec; ... )`
	pub fn parse_type_decl(&mut self) -> Result<TypeDecl> {
		let pos = self.expect(&Token::Type, "`type`")?;
		let mut specs = Vec::new();
		let grouped = self.eat(&Token::LParen);
		if grouped {
			while !self.eat(&Token::RParen) {
				specs.push(self.parse_type_spec()?);
				self.expect_separator(&Token::RParen, "`;` or `)`")?;
			}
		} else {
			specs.push(self.parse_type_spec()?);
		}
		Ok(TypeDecl { grouped, specs, pos })
	}

	fn parse_type_spec(&mut self) -> Result<TypeSpec> {
		let (name, pos) = self.ident()?;
		if name == "_" {
			return Err(Error::BlankTypeName { pos });
		}
		let alias = self.eat(&Token::Assign);
		let ty = self.parse_type()?;
		Ok(TypeSpec { name, alias, ty, pos })
	}

	fn parse_type_name(&mut self) -> Result<TypeName> {
		let (first, pos) = self.ident()?;
		if self.eat(&Token::Dot) {
			let (name, _) = self.ident()?;
			Ok(TypeName {
				package: Some(first),
				name,
				pos,
			})
		} else {
			Ok(TypeName {
				package: None,
				name: first,
				pos,
			})
		}
	}

	pub fn parse_type(&mut self) -> Result<TypeExpr> {
		if self.depth >= MAX_NESTING {
			return Err(Error::NestingTooDeep { pos: self.current().pos });
		}
		self.depth += 1;
		let ty = self.type_expr();
		self.depth -= 1;
		ty
	}

	fn type_expr(&mut self) -> Result<TypeExpr> {
		match self.peek() {
			Token::Ident(_) => Ok(TypeExpr::Named(self.parse_type_name()?)),
			Token::Star => {
				self.advance();
				Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
			}
			Token::LBrack => {
				self.advance();
				if self.eat(&Token::RBrack) {
					return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
				}
				let len = match self.peek() {
					Token::Int(n) => u64::try_from(*n).map_err(|_| self.unexpected("non-negative array length"))?,
					_ => return Err(self.unexpected("array length or `]`")),
				};
				self.advance();
				self.expect(&Token::RBrack, "`]`")?;
				Ok(TypeExpr::Array {
					len,
					elem: Box::new(self.parse_type()?),
				})
			}
			Token::Map => {
				self.advance();
				self.expect(&Token::LBrack, "`[`")?;
				let key = self.parse_type()?;
				self.expect(&Token::RBrack, "`]`")?;
				let value = self.parse_type()?;
				Ok(TypeExpr::Map {
					key: Box::new(key),
					value: Box::new(value),
				})
			}
			Token::Struct => self.parse_struct(),
			Token::LParen => {
				self.advance();
				let ty = self.parse_type()?;
				self.expect(&Token::RParen, "`)`")?;
				Ok(ty)
			}
			_ => Err(self.unexpected_or_reserved("type")),
		}
	}

	fn parse_struct(&mut self) -> Result<TypeExpr> {
		self.expect(&Token::Struct, "`struct`")?;
		self.expect(&Token::LBrace, "`{`")?;
		let mut fields = Vec::new();
		while !self.eat(&Token::RBrace) {
			self.parse_field_decl(&mut fields)?;
			self.expect_separator(&Token::RBrace, "`;` or `}`")?;
		}
		Ok(TypeExpr::Struct(fields))
	}

	fn parse_field_decl(&mut self, fields: &mut Vec<Field>) -> Result<()> {
		let first = fields.len();
		let embedded = match (self.peek(), self.peek_second()) {
			(Token::Star, _) => true,
			(Token::Ident(_), Token::Semicolon { .. } | Token::RBrace | Token::String(_) | Token::Dot) => true,
			(Token::Ident(_), _) => false,
			_ => return Err(self.unexpected_or_reserved("field name or embedded type")),
		};

		if embedded {
			let pos = self.current().pos;
			let pointer = self.eat(&Token::Star);
			let name = self.parse_type_name()?;
			let field_name = name.name.clone();
			let ty = TypeExpr::Named(name);
			fields.push(Field {
				name: field_name,
				ty: if pointer { TypeExpr::Pointer(Box::new(ty)) } else { ty },
				embedded: true,
				tag: None,
				pos,
			});
		} else {
			let mut names = vec![self.ident()?];
			while self.eat(&Token::Comma) {
				names.push(self.ident()?);
			}
			let ty = self.parse_type()?;
			fields.extend(names.into_iter().map(|(name, pos)| Field {
				name,
				ty: ty.clone(),
				embedded: false,
				tag: None,
				pos,
			}));
		}

		if let Token::String(tag) = self.peek() {
			let tag = tag.clone();
			self.advance();
			for field in &mut fields[first..] {
				field.tag = Some(tag.clone());
			}
		}
		Ok(())
	}
}
