// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("expected exactly one '{declaration}' declaration, found {found}")]
    MalformedHeader { declaration: String, found: usize },
    #[error("found {found} mass records, but only {declared} atom types are declared")]
    TypeCountMismatch { declared: usize, found: usize },
    #[error("line {line}: unknown atom type {type_index} ({registered} types registered)")]
    UnknownAtomType {
        line: usize,
        type_index: i64,
        registered: usize,
    },
    #[error("line {line}: bond references atom {atom_id}, which is not in the Atoms section")]
    DanglingBondReference { line: usize, atom_id: i64 },
    #[error("{0} unit divisor must be non-zero")]
    UnitConfiguration(&'static str),
    #[error("{section} section, line {line}: invalid field '{field}': {reason}")]
    InvalidField {
        section: &'static str,
        line: usize,
        field: String,
        reason: String,
    },
    #[error("{section} section, line {line}: expected at least {expected} fields, got {got}")]
    MissingField {
        section: &'static str,
        line: usize,
        expected: usize,
        got: usize,
    },
}

impl ReadError {
    pub(crate) fn invalid_field(
        section: &'static str,
        line: usize,
        field: &str,
        reason: impl ToString,
    ) -> Self {
        ReadError::InvalidField {
            section,
            line,
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }
}
