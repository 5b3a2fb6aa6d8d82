// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Line-oriented scanning of LAMMPS data files.
//!
//! A data file is a header followed by named sections:
//!
//! ```text
//! Masses
//!
//! 1 15.9994
//! 2 1.008
//!
//! Atoms # full
//! ...
//! ```
//!
//! A section starts after its header line, skips the blank or comment lines
//! directly following it, and ends at the first row that is not numeric data.

use regex::Regex;

pub const COMMENT_MARKER: char = '#';

/// A single data row of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    /// 1-based line number in the file
    pub line: usize,
    /// Whitespace separated fields, with comments already removed
    pub fields: Vec<&'a str>,
}

/// A full line matching a pattern, as found by [`scan_occurrences`].
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence<'a> {
    /// Index of the file in the list given to [`scan_occurrences`]
    pub file: usize,
    /// 1-based line number in that file
    pub line: usize,
    pub text: &'a str,
}

/// Removes everything from the comment marker onward.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(position) => &line[..position],
        None => line,
    }
}

/// Returns `true` if `fields` is non-empty and every field up to the first
/// comment parses as a floating point number.
pub fn is_data_row(fields: &[&str]) -> bool {
    !fields.is_empty()
        && fields
            .iter()
            .take_while(|field| !field.starts_with(COMMENT_MARKER))
            .all(|field| field.parse::<f64>().is_ok())
}

/// Returns `true` if `line` has no fields or starts with a comment.
pub fn is_blank_or_comment(line: &str) -> bool {
    match line.split_whitespace().next() {
        None => true,
        Some(first) => first.starts_with(COMMENT_MARKER),
    }
}

/// Lazy iterator over the rows of one section.
///
/// Created by [`find_section`]. The iterator never mutates the lines it
/// borrows, so the same lines can be scanned for any number of sections.
pub struct Section<'a> {
    lines: &'a [&'a str],
    header: Option<usize>,
    cursor: usize,
    done: bool,
}

impl<'a> Section<'a> {
    /// 1-based line number of the section header, if it was found.
    pub fn header_line(&self) -> Option<usize> {
        self.header.map(|index| index + 1)
    }

    /// Full text of the section header line, if it was found.
    pub fn header_text(&self) -> Option<&'a str> {
        self.header.map(|index| self.lines[index])
    }
}

impl<'a> Iterator for Section<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor >= self.lines.len() {
            self.done = true;
            return None;
        }

        let fields: Vec<&str> = strip_comment(self.lines[self.cursor])
            .split_whitespace()
            .collect();
        if !is_data_row(&fields) {
            self.done = true;
            return None;
        }

        self.cursor += 1;
        Some(Row {
            line: self.cursor,
            fields,
        })
    }
}

/// Locates the first line matching `header` and returns an iterator over
/// the data rows following it.
///
/// If no line matches, the iterator is empty.
pub fn find_section<'a>(lines: &'a [&'a str], header: &Regex) -> Section<'a> {
    let header_index = lines.iter().position(|line| header.is_match(line));

    let mut cursor = header_index.map_or(lines.len(), |index| index + 1);
    while cursor < lines.len() && is_blank_or_comment(lines[cursor]) {
        cursor += 1;
    }

    Section {
        lines,
        header: header_index,
        cursor,
        done: false,
    }
}

/// Returns every line matching `pattern`, in all the given `files`.
///
/// This is used for single-line declarations (`2 atom types`,
/// `0.0 10.0 xlo xhi`), where the caller checks how many times they occur.
pub fn scan_occurrences<'a>(files: &[&'a [&'a str]], pattern: &Regex) -> Vec<Occurrence<'a>> {
    files
        .iter()
        .copied()
        .enumerate()
        .flat_map(move |(file, lines)| {
            lines
                .iter()
                .enumerate()
                .filter(move |(_, text)| pattern.is_match(text))
                .map(move |(index, text)| Occurrence {
                    file,
                    line: index + 1,
                    text: *text,
                })
        })
        .collect()
}
