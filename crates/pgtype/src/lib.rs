// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Postgres compatible SQL values.
//!
//! This crate holds the datum model used by the planner and executor, the
//! static overload tables for unary, binary and comparison operators, the
//! cast matrix between type families, comparison folding, and text input for
//! every concrete type.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod cast;
pub mod config;
pub mod datum;
pub mod error;
pub mod fold;
pub mod fragment;
pub mod overload;
pub mod parse;
pub mod value;
pub mod volatility;

pub use cast::{CastRow, lookup_cast, lookup_cast_or_err, lookup_cast_types};
pub use config::{ParseTimeContext, SessionConfig, SimpleParseTimeContext};
pub use datum::{Array, Datum, FmtCtx, FmtFlags, Tuple};
pub use error::{Diagnostic, Error, TypeError};
pub use fold::{Folded, fold_comparison};
pub use fragment::Fragment;
pub use overload::{BinaryOperator, ComparisonOperator, Registry, UnaryOperator};
pub use parse::parse_and_require_string;
pub use value::{Family, Type};
pub use volatility::Volatility;

pub type Result<T> = std::result::Result<T, Error>;
