// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

mod binary;
mod comparison;
mod generate;
mod operator;
mod registry;
mod unary;

pub use generate::generate_derived_entries;
pub use operator::{BinaryOperator, ComparisonOperator, UnaryOperator};
pub use registry::{
	BaseTables, BinaryRow, ComparisonRow, Registry, Table, TypePattern, UnaryRow, build_base_tables,
};
