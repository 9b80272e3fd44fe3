// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

//! Syntax tree for the declaration subset of Go.
//!
//! The `Display` impls print canonical Go: reparsing the printed form
//! produces a tree that prints identically.

use crate::token::{Pos, Quoted};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
	pub package: String,
	pub imports: Vec<Import>,
	pub decls: Vec<TypeDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
	/// Local name, `.` for dot imports, `_` for side-effect imports
	pub name: Option<String>,
	pub path: String,
	pub pos: Pos,
}

/// One `type` keyword and everything it introduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
	/// Parenthesised `type ( ... )` form
	pub grouped: bool,
	pub specs: Vec<TypeSpec>,
	pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
	pub name: String,
	/// `type A = B` rather than `type A B`
	pub alias: bool,
	pub ty: TypeExpr,
	pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
	pub package: Option<String>,
	pub name: String,
	pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
	Named(TypeName),
	Pointer(Box<TypeExpr>),
	Slice(Box<TypeExpr>),
	Array { len: u64, elem: Box<TypeExpr> },
	Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
	Struct(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	pub name: String,
	pub ty: TypeExpr,
	/// Embedded fields take their name from the type
	pub embedded: bool,
	pub tag: Option<String>,
	pub pos: Pos,
}

impl SourceFile {
	/// All type specs in declaration order, flattening grouped declarations.
	pub fn type_specs(&self) -> impl Iterator<Item = (&TypeDecl, &TypeSpec)> {
		self.decls.iter().flat_map(|decl| decl.specs.iter().map(move |spec| (decl, spec)))
	}
}

impl fmt::Display for TypeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.package {
			Some(package) => write!(f, "{package}.{}", self.name),
			None => f.write_str(&self.name),
		}
	}
}

impl fmt::Display for TypeExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TypeExpr::Named(name) => write!(f, "{name}"),
			TypeExpr::Pointer(inner) => write!(f, "*{inner}"),
			TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
			TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
			TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
			TypeExpr::Struct(fields) if fields.is_empty() => f.write_str("struct{}"),
			TypeExpr::Struct(fields) => {
				f.write_str("struct { ")?;
				for (i, field) in fields.iter().enumerate() {
					if i > 0 {
						f.write_str("; ")?;
					}
					write!(f, "{field}")?;
				}
				f.write_str(" }")
			}
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.embedded {
			write!(f, "{}", self.ty)?;
		} else {
			write!(f, "{} {}", self.name, self.ty)?;
		}
		if let Some(tag) = &self.tag {
			write!(f, " {}", Quoted(tag))?;
		}
		Ok(())
	}
}

impl fmt::Display for TypeSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let eq = if self.alias { " =" } else { "" };
		write!(f, "{}{eq} {}", self.name, self.ty)
	}
}

impl fmt::Display for SourceFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "package {}", self.package)?;
		for import in &self.imports {
			match &import.name {
				Some(name) => writeln!(f, "\nimport {name} {}", Quoted(&import.path))?,
				None => writeln!(f, "\nimport {}", Quoted(&import.path))?,
			}
		}
		for decl in &self.decls {
			if decl.grouped {
				writeln!(f, "\ntype (")?;
				for spec in &decl.specs {
					writeln!(f, "\t{spec}")?;
				}
				writeln!(f, ")")?;
			} else {
				for spec in &decl.specs {
					writeln!(f, "\ntype {spec}")?;
				}
			}
		}
		Ok(())
	}
}
