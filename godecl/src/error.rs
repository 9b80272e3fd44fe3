// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

use crate::token::Pos;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong between source text and a resolved [`TypeEnv`](crate::types::TypeEnv).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("{pos}: unexpected character {found:?}")]
	UnexpectedChar { found: char, pos: Pos },
	#[error("{pos}: {what} literal not terminated")]
	Unterminated { what: &'static str, pos: Pos },
	#[error("{pos}: unknown escape sequence \\{found}")]
	InvalidEscape { found: char, pos: Pos },
	#[error("{pos}: {reason}")]
	InvalidRune { reason: &'static str, pos: Pos },
	#[error("{pos}: invalid number literal {text:?}: {reason}")]
	InvalidNumber { text: String, reason: String, pos: Pos },

	#[error("{pos}: expected {expected}, found {found}")]
	UnexpectedToken { expected: String, found: String, pos: Pos },
	#[error("{pos}: `{keyword}` declarations are not supported, only `type`")]
	UnsupportedDecl { keyword: &'static str, pos: Pos },
	#[error("{pos}: cannot use _ as a type name")]
	BlankTypeName { pos: Pos },
	#[error("{pos}: `{name}` is a reserved builtin and cannot be used as an identifier")]
	ReservedName { name: String, pos: Pos },
	#[error("{pos}: type expression nested more than {} levels deep", crate::parser::MAX_NESTING)]
	NestingTooDeep { pos: Pos },

	#[error("{pos}: {name} redeclared (first declared at {first})")]
	DuplicateType { name: String, pos: Pos, first: Pos },
	#[error("{pos}: duplicate field {field} in struct {ty}")]
	DuplicateField { ty: String, field: String, pos: Pos },
	#[error("{pos}: undefined: {name}")]
	UndefinedType { name: String, pos: Pos },
	#[error("{pos}: invalid recursive type {}", .cycle.join(" -> "))]
	InvalidRecursiveType { cycle: Vec<String>, pos: Pos },
}

impl Error {
	/// Source position the error refers to.
	#[must_use]
	pub fn pos(&self) -> Pos {
		match self {
			Self::UnexpectedChar { pos, .. }
			| Self::Unterminated { pos, .. }
			| Self::InvalidEscape { pos, .. }
			| Self::InvalidRune { pos, .. }
			| Self::InvalidNumber { pos, .. }
			| Self::UnexpectedToken { pos, .. }
			| Self::UnsupportedDecl { pos, .. }
			| Self::BlankTypeName { pos }
			| Self::ReservedName { pos, .. }
			| Self::NestingTooDeep { pos }
			| Self::DuplicateType { pos, .. }
			| Self::DuplicateField { pos, .. }
			| Self::UndefinedType { pos, .. }
			| Self::InvalidRecursiveType { pos, .. } => *pos,
		}
	}
}
