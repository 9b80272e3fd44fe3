// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

//! Go tokenizer with automatic semicolon insertion.

use crate::error::{Error, Result};
use crate::token::{Pos, Spanned, Token};

pub struct Lexer<'a> {
	src: &'a str,
	offset: usize,
	line: u32,
	column: u32,
	last: Option<Token>,
	finished: bool,
}

/// Lex the whole input. The returned vector always ends with [`Token::Eof`].
pub fn tokenize(src: &str) -> Result<Vec<Spanned>> {
	Lexer::new(src).collect()
}

impl<'a> Lexer<'a> {
	#[must_use]
	pub fn new(src: &'a str) -> Self {
		Self {
			src,
			offset: 0,
			line: 1,
			column: 1,
			last: None,
			finished: false,
		}
	}

	fn pos(&self) -> Pos {
		Pos {
			line: self.line,
			column: self.column,
		}
	}

	fn peek(&self) -> Option<char> {
		self.src[self.offset..].chars().next()
	}

	fn peek_second(&self) -> Option<char> {
		self.src[self.offset..].chars().nth(1)
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.offset += c.len_utf8();
		if c == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(c)
	}

	fn eat(&mut self, expected: char) -> bool {
		if self.peek() == Some(expected) {
			self.bump();
			true
		} else {
			false
		}
	}

	fn needs_semicolon(&self) -> bool {
		self.last.as_ref().is_some_and(Token::ends_statement)
	}

	fn emit(&mut self, token: Token, pos: Pos) -> Spanned {
		self.last = Some(token.clone());
		Spanned { token, pos }
	}

	/// Skip whitespace and comments. Returns the position of a line break
	/// that terminates the previous statement, if one was crossed.
	fn skip_trivia(&mut self) -> Result<Option<Pos>> {
		loop {
			match (self.peek(), self.peek_second()) {
				(Some('\n'), _) => {
					let pos = self.pos();
					self.bump();
					if self.needs_semicolon() {
						return Ok(Some(pos));
					}
				}
				(Some(c), _) if c.is_whitespace() => {
					self.bump();
				}
				(Some('/'), Some('/')) => {
					while self.peek().is_some_and(|c| c != '\n') {
						self.bump();
					}
				}
				(Some('/'), Some('*')) => {
					let pos = self.pos();
					self.bump();
					self.bump();
					let mut crossed_line = false;
					loop {
						match self.bump() {
							None => return Err(Error::Unterminated { what: "comment", pos }),
							Some('*') if self.peek() == Some('/') => {
								self.bump();
								break;
							}
							Some('\n') => crossed_line = true,
							Some(_) => {}
						}
					}
					// a comment spanning lines acts like a newline
					if crossed_line && self.needs_semicolon() {
						return Ok(Some(pos));
					}
				}
				_ => return Ok(None),
			}
		}
	}

	/// Produce the next token. Once the input is exhausted this keeps returning [`Token::Eof`].
	pub fn next_token(&mut self) -> Result<Spanned> {
		if let Some(pos) = self.skip_trivia()? {
			return Ok(self.emit(Token::Semicolon { implicit: true }, pos));
		}

		let pos = self.pos();
		let Some(c) = self.peek() else {
			if self.needs_semicolon() {
				return Ok(self.emit(Token::Semicolon { implicit: true }, pos));
			}
			return Ok(self.emit(Token::Eof, pos));
		};

		let token = if c.is_alphabetic() || c == '_' {
			self.word()
		} else if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|n| n.is_ascii_digit())) {
			self.number(pos)?
		} else {
			match c {
				'"' => self.string(pos)?,
				'`' => self.raw_string(pos)?,
				'\'' => self.rune(pos)?,
				_ => self.operator(pos)?,
			}
		};
		Ok(self.emit(token, pos))
	}

	fn word(&mut self) -> Token {
		let start = self.offset;
		while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
			self.bump();
		}
		let word = &self.src[start..self.offset];
		Token::keyword(word).unwrap_or_else(|| Token::Ident(word.to_string()))
	}

	fn digits(&mut self, radix: u32) {
		while self.peek().is_some_and(|c| c == '_' || c.is_digit(radix)) {
			self.bump();
		}
	}

	fn number(&mut self, pos: Pos) -> Result<Token> {
		let start = self.offset;

		let prefix = match (self.peek(), self.peek_second()) {
			(Some('0'), Some('x' | 'X')) => Some(16),
			(Some('0'), Some('o' | 'O')) => Some(8),
			(Some('0'), Some('b' | 'B')) => Some(2),
			_ => None,
		};

		let mut is_float = false;
		if let Some(radix) = prefix {
			self.bump();
			self.bump();
			self.digits(radix);
			if radix == 16 {
				if self.peek() == Some('.') {
					is_float = true;
					self.bump();
					self.digits(16);
				}
				if matches!(self.peek(), Some('p' | 'P')) {
					is_float = true;
					self.exponent(start, pos)?;
				} else if is_float {
					return Err(self.invalid_number(start, "hexadecimal mantissa requires a 'p' exponent", pos));
				}
			}
		} else {
			self.digits(10);
			if self.peek() == Some('.') && self.peek_second() != Some('.') {
				is_float = true;
				self.bump();
				self.digits(10);
			}
			if matches!(self.peek(), Some('e' | 'E')) {
				is_float = true;
				self.exponent(start, pos)?;
			}
		}

		// trailing junk such as `12ab` or `0x1g` belongs to the literal for error reporting
		if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
			while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
				self.bump();
			}
			let reason = match (prefix, self.src[start..self.offset].contains(['p', 'P'])) {
				(Some(8 | 2), true) => "'p' exponent requires hexadecimal mantissa",
				_ => "invalid digit",
			};
			return Err(self.invalid_number(start, reason, pos));
		}

		let src = self.src;
		let text = &src[start..self.offset];
		if !separators_between_digits(text, prefix) {
			return Err(self.invalid_number(start, "'_' must separate successive digits", pos));
		}
		let clean = text.replace('_', "");

		if is_float {
			let value = match prefix {
				Some(_) => hex_float(&clean[2..]),
				None => clean.parse::<f64>().map_err(|e| e.to_string()),
			};
			return value.map(Token::Float).map_err(|reason| self.invalid_number(start, &reason, pos));
		}

		let (digits, radix) = match prefix {
			Some(radix) => (&clean[2..], radix),
			None if clean.len() > 1 && clean.starts_with('0') => (&clean[1..], 8),
			None => (clean.as_str(), 10),
		};
		if digits.is_empty() {
			return Err(self.invalid_number(start, "literal has no digits", pos));
		}
		i64::from_str_radix(digits, radix)
			.map(Token::Int)
			.map_err(|e| self.invalid_number(start, &e.to_string(), pos))
	}

	/// `e`/`p` marker, optional sign, then at least one decimal digit.
	fn exponent(&mut self, start: usize, pos: Pos) -> Result<()> {
		self.bump();
		if matches!(self.peek(), Some('+' | '-')) {
			self.bump();
		}
		let exponent_start = self.offset;
		self.digits(10);
		if self.offset == exponent_start {
			return Err(self.invalid_number(start, "exponent has no digits", pos));
		}
		Ok(())
	}

	fn invalid_number(&self, start: usize, reason: &str, pos: Pos) -> Error {
		Error::InvalidNumber {
			text: self.src[start..self.offset].to_string(),
			reason: reason.to_string(),
			pos,
		}
	}

	fn hex_escape(&mut self, count: usize, pos: Pos) -> Result<u32> {
		let mut value = 0u32;
		for _ in 0..count {
			let Some(digit) = self.peek().and_then(|c| c.to_digit(16)) else {
				return Err(Error::InvalidRune {
					reason: "escape sequence has too few hex digits",
					pos,
				});
			};
			self.bump();
			value = value * 16 + digit;
		}
		Ok(value)
	}

	/// Decode an escape sequence; the backslash has already been consumed.
	fn escape(&mut self, quote: char, pos: Pos) -> Result<char> {
		let Some(c) = self.peek() else {
			return Err(Error::Unterminated { what: "escape", pos });
		};
		let simple = match c {
			'a' => Some('\x07'),
			'b' => Some('\x08'),
			'f' => Some('\x0c'),
			'n' => Some('\n'),
			'r' => Some('\r'),
			't' => Some('\t'),
			'v' => Some('\x0b'),
			'\\' => Some('\\'),
			c if c == quote => Some(quote),
			_ => None,
		};
		if let Some(decoded) = simple {
			self.bump();
			return Ok(decoded);
		}

		let value = match c {
			'x' => {
				self.bump();
				self.hex_escape(2, pos)?
			}
			'u' => {
				self.bump();
				self.hex_escape(4, pos)?
			}
			'U' => {
				self.bump();
				self.hex_escape(8, pos)?
			}
			'0'..='7' => {
				let mut value = 0u32;
				for _ in 0..3 {
					let Some(digit) = self.peek().and_then(|c| c.to_digit(8)) else {
						return Err(Error::InvalidRune {
							reason: "octal escape needs three digits",
							pos,
						});
					};
					self.bump();
					value = value * 8 + digit;
				}
				if value > 255 {
					return Err(Error::InvalidRune {
						reason: "octal escape value > 255",
						pos,
					});
				}
				value
			}
			other => return Err(Error::InvalidEscape { found: other, pos }),
		};
		char::from_u32(value).ok_or(Error::InvalidRune {
			reason: "escape is invalid Unicode code point",
			pos,
		})
	}

	fn string(&mut self, pos: Pos) -> Result<Token> {
		self.bump();
		let mut value = String::new();
		loop {
			match self.peek() {
				None | Some('\n') => return Err(Error::Unterminated { what: "string", pos }),
				Some('"') => {
					self.bump();
					return Ok(Token::String(value));
				}
				Some('\\') => {
					let escape_pos = self.pos();
					self.bump();
					value.push(self.escape('"', escape_pos)?);
				}
				Some(c) => {
					self.bump();
					value.push(c);
				}
			}
		}
	}

	fn raw_string(&mut self, pos: Pos) -> Result<Token> {
		self.bump();
		let mut value = String::new();
		loop {
			match self.bump() {
				None => return Err(Error::Unterminated { what: "raw string", pos }),
				Some('`') => return Ok(Token::String(value)),
				Some('\r') => {}
				Some(c) => value.push(c),
			}
		}
	}

	fn rune(&mut self, pos: Pos) -> Result<Token> {
		self.bump();
		let value = match self.peek() {
			None | Some('\n') => return Err(Error::Unterminated { what: "rune", pos }),
			Some('\'') => {
				self.bump();
				return Err(Error::InvalidRune {
					reason: "empty rune literal or unescaped ' in rune literal",
					pos,
				});
			}
			Some('\\') => {
				let escape_pos = self.pos();
				self.bump();
				self.escape('\'', escape_pos)?
			}
			Some(c) => {
				self.bump();
				c
			}
		};

		if self.eat('\'') {
			return Ok(Token::Rune(value));
		}
		while self.peek().is_some_and(|c| c != '\'' && c != '\n') {
			self.bump();
		}
		if self.eat('\'') {
			Err(Error::InvalidRune {
				reason: "more than one character in rune literal",
				pos,
			})
		} else {
			Err(Error::Unterminated { what: "rune", pos })
		}
	}

	/// `base`, or `with_eq` when the next char is `=`.
	fn or_assign(&mut self, base: Token, with_eq: Token) -> Token {
		if self.eat('=') { with_eq } else { base }
	}

	fn operator(&mut self, pos: Pos) -> Result<Token> {
		use Token::*;
		let Some(c) = self.bump() else {
			return Ok(Eof);
		};
		Ok(match c {
			'+' if self.eat('+') => Inc,
			'+' => self.or_assign(Plus, PlusAssign),
			'-' if self.eat('-') => Dec,
			'-' => self.or_assign(Minus, MinusAssign),
			'*' => self.or_assign(Star, StarAssign),
			'/' => self.or_assign(Slash, SlashAssign),
			'%' => self.or_assign(Percent, PercentAssign),
			'^' => self.or_assign(Caret, CaretAssign),
			'&' if self.eat('&') => LogAnd,
			'&' if self.eat('^') => self.or_assign(AndNot, AndNotAssign),
			'&' => self.or_assign(Amp, AmpAssign),
			'|' if self.eat('|') => LogOr,
			'|' => self.or_assign(Pipe, PipeAssign),
			'<' if self.eat('-') => Arrow,
			'<' if self.eat('<') => self.or_assign(Shl, ShlAssign),
			'<' => self.or_assign(Lt, LtEq),
			'>' if self.eat('>') => self.or_assign(Shr, ShrAssign),
			'>' => self.or_assign(Gt, GtEq),
			'=' => self.or_assign(Assign, EqEq),
			'!' => self.or_assign(Not, NotEq),
			':' => self.or_assign(Colon, Define),
			'.' if self.peek() == Some('.') => {
				self.bump();
				if !self.eat('.') {
					return Err(Error::UnexpectedChar { found: '.', pos });
				}
				Ellipsis
			}
			'.' => Dot,
			',' => Comma,
			';' => Semicolon { implicit: false },
			'(' => LParen,
			')' => RParen,
			'[' => LBrack,
			']' => RBrack,
			'{' => LBrace,
			'}' => RBrace,
			other => return Err(Error::UnexpectedChar { found: other, pos }),
		})
	}
}

/// Every `_` must sit between two digits, or between the base prefix and a digit.
fn separators_between_digits(text: &str, prefix: Option<u32>) -> bool {
	let radix = prefix.unwrap_or(10);
	let chars: Vec<char> = text.chars().collect();
	chars.iter().enumerate().filter(|&(_, &c)| c == '_').all(|(i, _)| {
		let before = i.checked_sub(1).map(|j| chars[j]);
		let after = chars.get(i + 1);
		let after_prefix = prefix.is_some() && i == 2;
		let digit_before = before.is_some_and(|c| c.is_digit(radix));
		(digit_before || after_prefix) && after.is_some_and(|c| c.is_digit(radix))
	})
}

/// Value of a hexadecimal float with the `0x` already stripped, e.g. `1.8p3`.
fn hex_float(text: &str) -> std::result::Result<f64, String> {
	let (mantissa, exponent) = text.split_once(['p', 'P']).ok_or("missing 'p' exponent")?;
	let mut exponent: i32 = exponent.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
	let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
	if whole.is_empty() && fraction.is_empty() {
		return Err("mantissa has no digits".to_string());
	}
	let mut value = 0f64;
	for c in whole.chars().chain(fraction.chars()) {
		value = value * 16.0 + f64::from(c.to_digit(16).ok_or("invalid digit")?);
	}
	let shift = i32::try_from(fraction.len()).map_err(|e| e.to_string())?.saturating_mul(4);
	exponent = exponent.saturating_sub(shift);
	Ok(value * 2f64.powi(exponent))
}

impl Iterator for Lexer<'_> {
	type Item = Result<Spanned>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}
		let next = self.next_token();
		if next.as_ref().map_or(true, |t| t.token == Token::Eof) {
			self.finished = true;
		}
		Some(next)
	}
}
