// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{iter::Peekable, str::Chars};

use tracing::instrument;

use super::{parse_and_require_string, parse_error};
use crate::{
	config::ParseTimeContext,
	datum::{Array, Datum},
	fragment::Fragment,
	value::Type,
};

/// One element of an array literal, unescaped.
#[derive(Debug, PartialEq)]
struct Element {
	text: String,
	quoted: bool,
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
	while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
	let mut text = String::new();
	loop {
		match chars.next()? {
			'\\' => text.push(chars.next()?),
			'"' => return Some(text),
			c => text.push(c),
		}
	}
}

/// Reads a nested `{...}` literal verbatim so that it can be parsed again
/// with the inner array type.
fn read_nested(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
	let mut text = String::new();
	let mut depth = 0usize;
	let mut in_quotes = false;
	loop {
		let c = chars.next()?;
		text.push(c);
		match c {
			'\\' if in_quotes => text.push(chars.next()?),
			'"' => in_quotes = !in_quotes,
			'{' if !in_quotes => depth += 1,
			'}' if !in_quotes => {
				depth -= 1;
				if depth == 0 {
					return Some(text);
				}
			}
			_ => {}
		}
	}
}

fn read_unquoted(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
	let mut text = String::new();
	while let Some(c) = chars.next_if(|c| *c != ',') {
		match c {
			'\\' => text.push(chars.next()?),
			'"' | '{' | '}' => return None,
			c => text.push(c),
		}
	}
	let trimmed = text.trim_end();
	if trimmed.is_empty() {
		return None;
	}
	Some(trimmed.to_string())
}

/// Splits `{a,"b c",{d}}` into its top level elements. Returns `None` for a
/// malformed literal.
fn split_elements(literal: &str) -> Option<Vec<Element>> {
	let inner = literal.trim().strip_prefix('{')?.strip_suffix('}')?;
	let mut elements = Vec::new();
	if inner.trim().is_empty() {
		return Some(elements);
	}
	let mut chars = inner.chars().peekable();
	loop {
		skip_whitespace(&mut chars);
		let element = match chars.peek() {
			Some('"') => {
				chars.next();
				Element {
					text: read_quoted(&mut chars)?,
					quoted: true,
				}
			}
			Some('{') => Element {
				text: read_nested(&mut chars)?,
				quoted: false,
			},
			_ => Element {
				text: read_unquoted(&mut chars)?,
				quoted: false,
			},
		};
		skip_whitespace(&mut chars);
		elements.push(element);
		match chars.next() {
			None => return Some(elements),
			Some(',') => {}
			Some(_) => return None,
		}
	}
}

/// Parses an array literal such as `{1,NULL,"x"}`. An unquoted `NULL` is the
/// null element; everything else is parsed as `element`. Arrays of arrays
/// take nested literals.
#[instrument(name = "pgtype::parse::array", level = "trace", skip_all, fields(element = %element))]
pub fn parse_array(element: &Type, fragment: Fragment, ctx: &dyn ParseTimeContext) -> crate::Result<(Array, bool)> {
	let Some(elements) = split_elements(fragment.text()) else {
		let ty = Type::array_of(element.clone());
		return Err(parse_error(&ty, fragment, Some("malformed array literal".to_string())));
	};
	let mut array = Array::new(element.clone());
	let mut depends = false;
	for Element {
		text,
		quoted,
	} in elements
	{
		let datum = if !quoted && text.eq_ignore_ascii_case("null") {
			Datum::null()
		} else {
			let (datum, element_depends) = parse_and_require_string(element, &text, ctx)?;
			depends |= element_depends;
			datum
		};
		array.try_append(datum)?;
	}
	Ok((array, depends))
}

/// Parses the space separated form of `int2vector` and `oidvector`.
#[instrument(name = "pgtype::parse::vector", level = "trace", skip_all, fields(ty = %ty))]
pub fn parse_vector(ty: &Type, fragment: Fragment, ctx: &dyn ParseTimeContext) -> crate::Result<(Array, bool)> {
	let Some(mut array) = Array::vector(ty) else {
		crate::panic_internal!("{} is not a vector type", ty);
	};
	let element = array.elem_type().clone();
	let mut depends = false;
	for token in fragment.text().split_whitespace() {
		let (datum, element_depends) = parse_and_require_string(&element, token, ctx)?;
		depends |= element_depends;
		array.try_append(datum)?;
	}
	Ok((array, depends))
}
