// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::{Diagnostic, EnumErrorKind, IntoDiagnostic, TypeError};
use crate::{
	fragment::Fragment,
	value::{Family, Type},
};

fn parse_help(target: &Type) -> (String, Vec<String>) {
	match target.family() {
		Family::Bool => (
			"use one of true, false, yes, no, on, off, 1 or 0 (any unambiguous prefix)".to_string(),
			vec!["valid: 't'".to_string(), "valid: 'off'".to_string(), "valid: '1'".to_string()],
		),
		Family::Int | Family::Float | Family::Decimal => (
			"ensure the value is a valid number".to_string(),
			vec!["valid: 123".to_string(), "valid: -4.5".to_string(), "valid: 1.2e-3".to_string()],
		),
		Family::Date | Family::Timestamp | Family::TimestampTZ => (
			"use ISO 8601 format (e.g. 2024-03-15 or 2024-03-15 14:30:00+00)".to_string(),
			vec!["special values: epoch, now, today, tomorrow, yesterday".to_string()],
		),
		Family::Time | Family::TimeTZ => (
			"use HH:MM[:SS[.ffffff]] with an optional zone offset".to_string(),
			vec!["valid: 14:30:00".to_string(), "valid: 24:00".to_string()],
		),
		Family::Interval => (
			"use postgres (1 day 02:00:00), ISO 8601 (P1DT2H) or SQL standard (1 2:00:00) format".to_string(),
			vec![],
		),
		Family::Uuid => (
			"use the canonical form xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx".to_string(),
			vec![],
		),
		Family::Array => (
			"use an array literal such as {1,2,3}".to_string(),
			vec!["quote elements containing commas, braces or spaces with double quotes".to_string()],
		),
		_ => (format!("ensure the value is a valid {}", target), vec![]),
	}
}

impl IntoDiagnostic for TypeError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			TypeError::Parse {
				target,
				fragment,
				cause,
			} => {
				let mut message = format!("could not parse \"{}\" as type {}", fragment.text(), target);
				if let Some(cause) = &cause {
					message.push_str(": ");
					message.push_str(cause);
				}
				let (help, notes) = parse_help(&target);
				let cause = cause.map(|cause| {
					Box::new(Diagnostic {
						code: "PARSE_001".to_string(),
						statement: None,
						message: cause,
						fragment: fragment.clone(),
						label: None,
						help: None,
						notes: vec![],
						cause: None,
					})
				});
				Diagnostic {
					code: "PARSE_001".to_string(),
					statement: None,
					message,
					label: Some(format!("not a valid {} value", target)),
					fragment,
					help: Some(help),
					notes,
					cause,
				}
			}

			TypeError::OutOfRange {
				target,
				message,
				fragment,
			} => Diagnostic {
				code: "PARSE_002".to_string(),
				statement: None,
				message,
				label: Some(format!("value out of range for type {}", target)),
				fragment,
				help: Some(format!("use a value within the supported range of {}", target)),
				notes: vec![],
				cause: None,
			},

			TypeError::UnsupportedCast {
				from,
				to,
			} => Diagnostic {
				code: "CAST_001".to_string(),
				statement: None,
				message: format!("unsupported cast from {} to {}", from, to),
				fragment: Fragment::None,
				label: Some(format!("cannot cast {} to {}", from, to)),
				help: Some("ensure the source and target types are compatible for casting".to_string()),
				notes: vec!["casting through string is possible for most types".to_string()],
				cause: None,
			},

			TypeError::UnaryOperatorNotFound {
				operator,
				operand,
			} => Diagnostic {
				code: "OPERATOR_001".to_string(),
				statement: None,
				message: format!("unknown unary operator: {}{}", operator, operand),
				fragment: Fragment::None,
				label: Some(format!("'{}' operator on incompatible type", operator)),
				help: Some("consider casting the operand to a type the operator supports".to_string()),
				notes: vec![format!("operand is of type: {}", operand)],
				cause: None,
			},

			TypeError::BinaryOperatorNotFound {
				operator,
				left,
				right,
			} => Diagnostic {
				code: "OPERATOR_002".to_string(),
				statement: None,
				message: format!("unsupported binary operator: <{}> {} <{}>", left, operator, right),
				fragment: Fragment::None,
				label: Some(format!("'{}' operator on incompatible types", operator)),
				help: Some("consider converting operands to compatible types first".to_string()),
				notes: vec![
					format!("left operand is of type: {}", left),
					format!("right operand is of type: {}", right),
				],
				cause: None,
			},

			TypeError::ComparisonOperatorNotFound {
				operator,
				left,
				right,
			} => Diagnostic {
				code: "OPERATOR_003".to_string(),
				statement: None,
				message: format!("unsupported comparison operator: <{}> {} <{}>", left, operator, right),
				fragment: Fragment::None,
				label: Some(format!("'{}' comparison on incompatible types", operator)),
				help: Some("comparison is only supported between compatible types".to_string()),
				notes: vec![
					format!("left operand is of type: {}", left),
					format!("right operand is of type: {}", right),
				],
				cause: None,
			},

			TypeError::Enum {
				kind,
				message,
				fragment,
			} => {
				let (code, help) = match kind {
					EnumErrorKind::UnknownLabel => ("ENUM_001", "use one of the labels declared by the enum type"),
					EnumErrorKind::UnknownPhysical => {
						("ENUM_001", "the physical representation does not belong to this enum type")
					}
					EnumErrorKind::NotWritable => {
						("ENUM_002", "wait until the label has been made public before writing it")
					}
					EnumErrorKind::Unspecified => ("ENUM_003", "resolve the concrete enum type first"),
				};
				Diagnostic {
					code: code.to_string(),
					statement: None,
					message,
					fragment,
					label: Some("invalid enum value".to_string()),
					help: Some(help.to_string()),
					notes: vec![],
					cause: None,
				}
			}
		}
	}
}
