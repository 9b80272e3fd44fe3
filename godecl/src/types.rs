// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

//! Name resolution for declared types.
//!
//! [`TypeEnv::build`] binds every type spec of a file, rejects duplicates,
//! undefined names and types that contain themselves by value, and then
//! answers structural queries: underlying types, struct fields and the
//! flattened leaves of nested structs.

use crate::ast::{self, SourceFile, TypeExpr};
use crate::error::{Error, Result};
use crate::token::Pos;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

/// Go's predeclared basic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BasicKind {
	Bool,
	String,
	Int,
	Int8,
	Int16,
	Int32,
	Int64,
	Uint,
	Uint8,
	Uint16,
	Uint32,
	Uint64,
	Uintptr,
	Float32,
	Float64,
	Complex64,
	Complex128,
	/// Alias of uint8 that keeps its own spelling
	Byte,
	/// Alias of int32 holding a Unicode code point
	Rune,
}

impl BasicKind {
	pub const ALL: [BasicKind; 19] = [
		BasicKind::Bool,
		BasicKind::String,
		BasicKind::Int,
		BasicKind::Int8,
		BasicKind::Int16,
		BasicKind::Int32,
		BasicKind::Int64,
		BasicKind::Uint,
		BasicKind::Uint8,
		BasicKind::Uint16,
		BasicKind::Uint32,
		BasicKind::Uint64,
		BasicKind::Uintptr,
		BasicKind::Float32,
		BasicKind::Float64,
		BasicKind::Complex64,
		BasicKind::Complex128,
		BasicKind::Byte,
		BasicKind::Rune,
	];

	#[must_use]
	pub fn from_name(name: &str) -> Option<BasicKind> {
		BasicKind::ALL.into_iter().find(|kind| kind.name() == name)
	}

	#[must_use]
	pub fn name(self) -> &'static str {
		match self {
			BasicKind::Bool => "bool",
			BasicKind::String => "string",
			BasicKind::Int => "int",
			BasicKind::Int8 => "int8",
			BasicKind::Int16 => "int16",
			BasicKind::Int32 => "int32",
			BasicKind::Int64 => "int64",
			BasicKind::Uint => "uint",
			BasicKind::Uint8 => "uint8",
			BasicKind::Uint16 => "uint16",
			BasicKind::Uint32 => "uint32",
			BasicKind::Uint64 => "uint64",
			BasicKind::Uintptr => "uintptr",
			BasicKind::Float32 => "float32",
			BasicKind::Float64 => "float64",
			BasicKind::Complex64 => "complex64",
			BasicKind::Complex128 => "complex128",
			BasicKind::Byte => "byte",
			BasicKind::Rune => "rune",
		}
	}

	#[must_use]
	pub fn is_integer(self) -> bool {
		matches!(
			self,
			BasicKind::Int
				| BasicKind::Int8
				| BasicKind::Int16
				| BasicKind::Int32
				| BasicKind::Int64
				| BasicKind::Uint
				| BasicKind::Uint8
				| BasicKind::Uint16
				| BasicKind::Uint32
				| BasicKind::Uint64
				| BasicKind::Uintptr
				| BasicKind::Byte
				| BasicKind::Rune
		)
	}

	#[must_use]
	pub fn is_float(self) -> bool {
		matches!(self, BasicKind::Float32 | BasicKind::Float64)
	}

	#[must_use]
	pub fn is_complex(self) -> bool {
		matches!(self, BasicKind::Complex64 | BasicKind::Complex128)
	}

	#[must_use]
	pub fn is_numeric(self) -> bool {
		self.is_integer() || self.is_float() || self.is_complex()
	}
}

impl fmt::Display for BasicKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// A type expression with every name bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
	Basic(BasicKind),
	/// Declared in this file
	Named(String),
	/// Qualified, or undefined while undefined names are allowed
	Opaque(String),
	Pointer(Box<Type>),
	Slice(Box<Type>),
	Array(u64, Box<Type>),
	Map(Box<Type>, Box<Type>),
	Struct(Vec<FieldInfo>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
	pub name: String,
	pub ty: Type,
	pub embedded: bool,
	pub tag: Option<String>,
}

impl Type {
	#[must_use]
	pub fn basic(&self) -> Option<BasicKind> {
		match self {
			Type::Basic(kind) => Some(*kind),
			_ => None,
		}
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Type::Basic(kind) => write!(f, "{kind}"),
			Type::Named(name) | Type::Opaque(name) => f.write_str(name),
			Type::Pointer(inner) => write!(f, "*{inner}"),
			Type::Slice(elem) => write!(f, "[]{elem}"),
			Type::Array(len, elem) => write!(f, "[{len}]{elem}"),
			Type::Map(key, value) => write!(f, "map[{key}]{value}"),
			Type::Struct(fields) if fields.is_empty() => f.write_str("struct{}"),
			Type::Struct(fields) => {
				f.write_str("struct { ")?;
				for (i, field) in fields.iter().enumerate() {
					if i > 0 {
						f.write_str("; ")?;
					}
					if field.embedded {
						write!(f, "{}", field.ty)?;
					} else {
						write!(f, "{} {}", field.name, field.ty)?;
					}
				}
				f.write_str(" }")
			}
		}
	}
}

/// One declared type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
	pub name: String,
	pub alias: bool,
	/// Declared inside a `type ( ... )` block
	pub grouped: bool,
	pub pos: Pos,
	/// The right-hand side of the declaration, names bound
	pub definition: Type,
}

/// A non-struct component reached by flattening by-value struct fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
	/// Dotted field path from the root type, empty for the root itself
	pub path: String,
	pub ty: Type,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
	/// Treat unknown unqualified names as opaque instead of failing
	pub allow_undefined: bool,
}

#[derive(Debug, Clone, Default)]
pub struct TypeEnv {
	types: Vec<TypeInfo>,
	index: HashMap<String, usize>,
}

impl TypeEnv {
	pub fn build(file: &SourceFile, options: &ResolveOptions) -> Result<TypeEnv> {
		let mut env = TypeEnv::default();

		let mut declared_at = Vec::new();
		for (_, spec) in file.type_specs() {
			if let Some(&first) = env.index.get(&spec.name) {
				return Err(Error::DuplicateType {
					name: spec.name.clone(),
					pos: spec.pos,
					first: declared_at[first],
				});
			}
			env.index.insert(spec.name.clone(), declared_at.len());
			declared_at.push(spec.pos);
		}

		for (decl, spec) in file.type_specs() {
			let definition = env.lower(&spec.ty, &spec.name, options)?;
			env.types.push(TypeInfo {
				name: spec.name.clone(),
				alias: spec.alias,
				grouped: decl.grouped,
				pos: spec.pos,
				definition,
			});
		}

		env.check_recursion()?;
		debug!(types = env.types.len(), "resolved type declarations");
		Ok(env)
	}

	fn lower(&self, expr: &TypeExpr, owner: &str, options: &ResolveOptions) -> Result<Type> {
		Ok(match expr {
			TypeExpr::Named(ast::TypeName {
				package: Some(package),
				name,
				..
			}) => Type::Opaque(format!("{package}.{name}")),
			TypeExpr::Named(ast::TypeName { package: None, name, pos }) => {
				if self.index.contains_key(name) {
					Type::Named(name.clone())
				} else if let Some(kind) = BasicKind::from_name(name) {
					Type::Basic(kind)
				} else if options.allow_undefined {
					warn!(%name, %pos, "treating undefined type as opaque");
					Type::Opaque(name.clone())
				} else {
					return Err(Error::UndefinedType { name: name.clone(), pos: *pos });
				}
			}
			TypeExpr::Pointer(inner) => Type::Pointer(Box::new(self.lower(inner, owner, options)?)),
			TypeExpr::Slice(elem) => Type::Slice(Box::new(self.lower(elem, owner, options)?)),
			TypeExpr::Array { len, elem } => Type::Array(*len, Box::new(self.lower(elem, owner, options)?)),
			TypeExpr::Map { key, value } => Type::Map(
				Box::new(self.lower(key, owner, options)?),
				Box::new(self.lower(value, owner, options)?),
			),
			TypeExpr::Struct(fields) => {
				let mut seen = HashSet::new();
				let mut lowered = Vec::with_capacity(fields.len());
				for field in fields {
					if field.name != "_" && !seen.insert(field.name.as_str()) {
						return Err(Error::DuplicateField {
							ty: owner.to_string(),
							field: field.name.clone(),
							pos: field.pos,
						});
					}
					lowered.push(FieldInfo {
						name: field.name.clone(),
						ty: self.lower(&field.ty, owner, options)?,
						embedded: field.embedded,
						tag: field.tag.clone(),
					});
				}
				Type::Struct(lowered)
			}
		})
	}

	/// Names a type holds by value: pointers, slices and maps break the chain.
	fn by_value_refs<'a>(ty: &'a Type, out: &mut Vec<&'a str>) {
		match ty {
			Type::Named(name) => out.push(name),
			Type::Array(_, elem) => Self::by_value_refs(elem, out),
			Type::Struct(fields) => {
				for field in fields {
					Self::by_value_refs(&field.ty, out);
				}
			}
			Type::Basic(_) | Type::Opaque(_) | Type::Pointer(_) | Type::Slice(_) | Type::Map(..) => {}
		}
	}

	/// Depth-first search over by-value references. The stack is explicit
	/// since chains of named types can be as long as the file.
	fn check_recursion(&self) -> Result<()> {
		#[derive(Clone, Copy, PartialEq)]
		enum Mark {
			Unvisited,
			InProgress,
			Done,
		}

		let successors = |at: usize| -> Vec<usize> {
			let mut refs = Vec::new();
			Self::by_value_refs(&self.types[at].definition, &mut refs);
			refs.into_iter().map(|name| self.index[name]).collect()
		};

		let mut marks = vec![Mark::Unvisited; self.types.len()];
		// (type, its by-value successors, next successor to visit)
		let mut stack: Vec<(usize, Vec<usize>, usize)> = Vec::new();
		for root in 0..self.types.len() {
			if marks[root] != Mark::Unvisited {
				continue;
			}
			marks[root] = Mark::InProgress;
			stack.push((root, successors(root), 0));

			while let Some((at, refs, cursor)) = stack.last_mut() {
				let Some(&next) = refs.get(*cursor) else {
					marks[*at] = Mark::Done;
					stack.pop();
					continue;
				};
				*cursor += 1;
				match marks[next] {
					Mark::Done => {}
					Mark::InProgress => {
						let start = stack.iter().position(|&(i, ..)| i == next).unwrap_or(0);
						let mut cycle: Vec<String> = stack[start..].iter().map(|&(i, ..)| self.types[i].name.clone()).collect();
						cycle.push(self.types[next].name.clone());
						return Err(Error::InvalidRecursiveType {
							cycle,
							pos: self.types[next].pos,
						});
					}
					Mark::Unvisited => {
						marks[next] = Mark::InProgress;
						stack.push((next, successors(next), 0));
					}
				}
			}
		}
		Ok(())
	}

	/// Declared names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.types.iter().map(|t| t.name.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = &TypeInfo> {
		self.types.iter()
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&TypeInfo> {
		self.index.get(name).map(|&i| &self.types[i])
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.types.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// Follow named references until reaching a type literal, basic or opaque type.
	#[must_use]
	pub fn resolve<'a>(&'a self, mut ty: &'a Type) -> &'a Type {
		// terminates: build() rejects named cycles
		while let Type::Named(name) = ty {
			ty = &self.types[self.index[name]].definition;
		}
		ty
	}

	#[must_use]
	pub fn underlying(&self, name: &str) -> Option<&Type> {
		self.get(name).map(|info| self.resolve(&info.definition))
	}

	/// Fields of a type whose underlying type is a struct.
	#[must_use]
	pub fn fields(&self, name: &str) -> Option<&[FieldInfo]> {
		match self.underlying(name)? {
			Type::Struct(fields) => Some(fields),
			_ => None,
		}
	}

	/// Flatten by-value struct nesting down to non-struct leaves.
	#[must_use]
	pub fn leaves(&self, name: &str) -> Option<Vec<Leaf>> {
		let info = self.get(name)?;
		let mut out = Vec::new();
		// popped in field order, so children are pushed in reverse
		let mut pending = vec![(String::new(), &info.definition)];
		while let Some((path, ty)) = pending.pop() {
			match self.resolve(ty) {
				Type::Struct(fields) => {
					for field in fields.iter().rev() {
						let child = if path.is_empty() {
							field.name.clone()
						} else {
							format!("{path}.{}", field.name)
						};
						pending.push((child, &field.ty));
					}
				}
				other => out.push(Leaf { path, ty: other.clone() }),
			}
		}
		Some(out)
	}
}
