// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::Write;

use super::Diagnostic;
use crate::fragment::Fragment;

pub trait DiagnosticRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String;
}

pub struct DefaultRenderer;

impl DiagnosticRenderer for DefaultRenderer {
	fn render(&self, d: &Diagnostic) -> String {
		let mut output = String::new();
		render_into(&mut output, d, 0);
		output
	}
}

fn render_into(output: &mut String, d: &Diagnostic, depth: usize) {
	let indent = "  ".repeat(depth);
	let _ = writeln!(output, "{}error[{}]: {}", indent, d.code, d.message);

	if let Some(statement) = &d.statement {
		let _ = writeln!(output, "{} --> {}", indent, statement);
	}

	match &d.fragment {
		Fragment::None => {}
		Fragment::Statement {
			text,
			line,
			column,
		} => {
			let _ = writeln!(output, "{}  {:>2} │ {}", indent, line, text);
			let _ = writeln!(
				output,
				"{}     │ {}^ {}",
				indent,
				" ".repeat(*column as usize),
				d.label.as_deref().unwrap_or("")
			);
		}
		Fragment::Internal {
			text,
		} => {
			let _ = writeln!(output, "{}     │ {}", indent, text);
			if let Some(label) = &d.label {
				let _ = writeln!(output, "{}     = {}", indent, label);
			}
		}
	}

	if let Some(help) = &d.help {
		let _ = writeln!(output, "\n{}help: {}", indent, help);
	}

	for note in &d.notes {
		let _ = writeln!(output, "{}note: {}", indent, note);
	}

	if let Some(cause) = &d.cause {
		let _ = writeln!(output, "{}caused by:", indent);
		render_into(output, cause, depth + 1);
	}
}

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		DefaultRenderer.render(diagnostic)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_includes_code_message_and_notes() {
		let diagnostic = Diagnostic {
			code: "PARSE_001".to_string(),
			statement: None,
			message: "could not parse \"x\" as type bool".to_string(),
			fragment: Fragment::internal("x"),
			label: Some("invalid bool value".to_string()),
			help: Some("use true or false".to_string()),
			notes: vec!["valid: t, f, yes, no".to_string()],
			cause: None,
		};

		let out = DefaultRenderer::render_string(&diagnostic);
		assert!(out.starts_with("error[PARSE_001]: could not parse \"x\" as type bool"));
		assert!(out.contains("= invalid bool value"));
		assert!(out.contains("help: use true or false"));
		assert!(out.contains("note: valid: t, f, yes, no"));
	}
}
