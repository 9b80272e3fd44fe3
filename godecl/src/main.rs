// SPDX-FileCopyrightText: 2026 LunNova
//
// SPDX-License-Identifier: MIT

fn main() -> std::process::ExitCode {
	let args: Vec<String> = std::env::args().skip(1).collect();
	let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
	std::process::ExitCode::from(godecl::run(&args_refs) as u8)
}
