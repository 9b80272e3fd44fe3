// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

use crate::ast::SourceFile;
use crate::token::{Quoted, Spanned};
use crate::types::{BasicKind, Type, TypeEnv};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FileReport {
	pub path: String,
	pub package: String,
	pub imports: Vec<String>,
	pub types: Vec<TypeReport>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TypeReport {
	pub name: String,
	pub alias: bool,
	pub grouped: bool,
	pub line: u32,
	pub definition: String,
	pub underlying: String,
	/// Set when the underlying type is a basic type
	pub kind: Option<BasicKind>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub fields: Vec<FieldReport>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub leaves: Option<Vec<LeafReport>>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FieldReport {
	pub name: String,
	#[serde(rename = "type")]
	pub ty: String,
	pub embedded: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tag: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LeafReport {
	pub path: String,
	#[serde(rename = "type")]
	pub ty: String,
	pub kind: Option<BasicKind>,
}

impl FileReport {
	#[must_use]
	pub fn new(path: &Path, file: &SourceFile, env: &TypeEnv, flatten: bool) -> Self {
		let types = env
			.iter()
			.map(|info| {
				let underlying = env.resolve(&info.definition);
				let fields = match underlying {
					Type::Struct(fields) => fields
						.iter()
						.map(|f| FieldReport {
							name: f.name.clone(),
							ty: f.ty.to_string(),
							embedded: f.embedded,
							tag: f.tag.clone(),
						})
						.collect(),
					_ => Vec::new(),
				};
				let leaves = flatten.then(|| {
					env.leaves(&info.name)
						.unwrap_or_default()
						.into_iter()
						.map(|leaf| LeafReport {
							path: leaf.path,
							kind: leaf.ty.basic(),
							ty: leaf.ty.to_string(),
						})
						.collect()
				});
				TypeReport {
					name: info.name.clone(),
					alias: info.alias,
					grouped: info.grouped,
					line: info.pos.line,
					definition: info.definition.to_string(),
					underlying: underlying.to_string(),
					kind: underlying.basic(),
					fields,
					leaves,
				}
			})
			.collect();

		Self {
			path: path.display().to_string(),
			package: file.package.clone(),
			imports: file.imports.iter().map(|i| i.path.clone()).collect(),
			types,
		}
	}
}

/// Human-readable summary, one type per line with indented details.
#[must_use]
pub fn render_text(report: &FileReport) -> String {
	let mut out = String::new();
	// writing to a String cannot fail
	let _ = writeln!(out, "{}: package {}", report.path, report.package);
	for import in &report.imports {
		let _ = writeln!(out, "  import {}", Quoted(import));
	}
	for ty in &report.types {
		let eq = if ty.alias { " =" } else { "" };
		let _ = write!(out, "  type {}{eq} {}", ty.name, ty.definition);
		if ty.underlying != ty.definition {
			let _ = write!(out, " (underlying {})", ty.underlying);
		}
		out.push('\n');
		for field in &ty.fields {
			let _ = writeln!(out, "    field {} {}", field.name, field.ty);
		}
		if let Some(leaves) = &ty.leaves {
			if !ty.fields.is_empty() {
				for leaf in leaves {
					let _ = writeln!(out, "    leaf {} {}", leaf.path, leaf.ty);
				}
			}
		}
	}
	out
}

pub fn render_json(reports: &[FileReport]) -> serde_json::Result<String> {
	serde_json::to_string_pretty(reports)
}

#[must_use]
pub fn render_tokens(tokens: &[Spanned]) -> String {
	let mut out = String::new();
	for Spanned { token, pos } in tokens {
		let _ = writeln!(out, "{pos}\t{token}");
	}
	out
}
