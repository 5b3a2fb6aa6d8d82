// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use log::{debug, info, warn};
use nalgebra::Vector3;
use phf::phf_map;
use regex::Regex;

use crate::error::ReadError;
use crate::section::{find_section, scan_occurrences, strip_comment, Row};
use crate::state::{AtomIndex, BondCreator, SimulationState};
use crate::units::Units;

const AXES: [char; 3] = ['x', 'y', 'z'];

static ATOM_TYPES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s+atom\s+types\b").unwrap());
static MASSES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*Mass(es)?\b").unwrap());
static ATOMS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*Atoms\b").unwrap());
static BONDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*Bonds\b").unwrap());
static MASS_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*mass\s+[\d*]+\s+\S+").unwrap());
static AXIS_BOUNDS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    AXES.map(|axis| {
        Regex::new(&format!(
            r"^\s*[-+.\deE]+\s+[-+.\deE]+\s+{axis}lo\s+{axis}hi\b"
        ))
        .unwrap()
    })
});

/// Atom styles LAMMPS writes after the `Atoms` header, and whether their
/// rows carry a charge column.
static ATOM_STYLES: phf::Map<&'static str, bool> = phf_map! {
    "atomic" => false,
    "bond" => false,
    "angle" => false,
    "molecular" => false,
    "charge" => true,
    "full" => true,
};

/// Mapping from the atom ids used in the file to the index the atom gets in
/// the simulation state.
pub type IdIndexMap = HashMap<i64, AtomIndex>;

#[derive(Debug, Clone, PartialEq)]
struct AtomTypeRecord {
    /// 1-based index used in the file
    local_index: usize,
    handle: String,
    mass: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct AtomRecord {
    /// 1-based, validated against the declared atom types
    type_index: usize,
    charge: Option<f64>,
    position: Vector3<f64>,
}

#[derive(Debug, Clone, PartialEq)]
struct BondRecord {
    bond_type: usize,
    atoms: [AtomIndex; 2],
}

#[derive(Debug, Default)]
struct LoadedAtoms {
    records: Vec<AtomRecord>,
    id_to_index: IdIndexMap,
    style: Option<String>,
}

/// The lines of a data file and of its auxiliary input scripts.
struct DataFile<'a> {
    lines: Vec<&'a str>,
    inputs: Vec<Vec<&'a str>>,
    /// Set when the file has a non-empty `Bonds` section
    molecular: bool,
}

impl<'a> DataFile<'a> {
    fn new(data: &'a str, inputs: &[&'a str]) -> Self {
        let lines: Vec<&str> = data.lines().collect();
        let molecular = find_section(&lines, &BONDS).next().is_some();
        DataFile {
            lines,
            inputs: inputs.iter().map(|input| input.lines().collect()).collect(),
            molecular,
        }
    }
}

/// What a call to [`DataFileReader::read`] added to the simulation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadSummary {
    pub atom_types: usize,
    pub atoms: usize,
    pub bonds: usize,
    /// Whether the file has a `Bonds` section
    pub molecular: bool,
    /// Style named in the `Atoms` header comment, such as `full`
    pub atom_style: Option<String>,
}

impl Display for ReadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} atom types, {} atoms, {} bonds ({})",
            self.atom_types,
            self.atoms,
            self.bonds,
            if self.molecular { "molecular" } else { "atomic" }
        )?;
        if let Some(style) = &self.atom_style {
            write!(f, ", atom style '{style}'")?;
        }
        Ok(())
    }
}

/// Reads LAMMPS data files into a [`SimulationState`].
///
/// The whole file is parsed and validated before the state is touched, so a
/// failing read leaves the state as it was. Reading the same file twice
/// adds its atoms twice.
///
/// ```no_run
/// use std::path::Path;
/// use lmpdata::{connectivity::Connectivity, frame::Frame, reader::DataFileReader, units::Units};
///
/// let mut frame = Frame::new();
/// let mut bonds = Connectivity::new();
/// let units = Units::new(1.0, 1.0, 1.0)?;
/// let summary = DataFileReader::new(&mut frame, units)
///     .with_type_prefix("water_")
///     .with_bond_creator(&mut bonds)
///     .read(Path::new("water.data"), &[])?;
/// println!("{summary}");
/// # Ok::<(), lmpdata::error::ReadError>(())
/// ```
pub struct DataFileReader<'a, S: SimulationState> {
    state: &'a mut S,
    bond_creator: Option<&'a mut dyn BondCreator>,
    units: Units,
    type_prefix: String,
    set_bounds: bool,
}

impl<'a, S: SimulationState> DataFileReader<'a, S> {
    pub fn new(state: &'a mut S, units: Units) -> Self {
        DataFileReader {
            state,
            bond_creator: None,
            units,
            type_prefix: String::new(),
            set_bounds: true,
        }
    }

    /// Species handles are `prefix` followed by the 0-based atom type
    /// index. The default prefix is empty.
    pub fn with_type_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.type_prefix = prefix.into();
        self
    }

    /// Whether to overwrite the bounds of the state with the box of the
    /// file. Disable it to add a data file to an existing simulation.
    pub fn with_bounds(mut self, set_bounds: bool) -> Self {
        self.set_bounds = set_bounds;
        self
    }

    /// Bonds are only read when a bond creator is given.
    pub fn with_bond_creator(mut self, bond_creator: &'a mut dyn BondCreator) -> Self {
        self.bond_creator = Some(bond_creator);
        self
    }

    /// Reads the data file at `data_path`. `input_paths` are LAMMPS input
    /// scripts whose `mass` commands complete the masses of the data file.
    ///
    /// # Errors
    ///
    /// Returns an error if a file can not be read or if the data file is
    /// malformed. The state is left untouched in that case.
    pub fn read(
        &mut self,
        data_path: &Path,
        input_paths: &[&Path],
    ) -> Result<ReadSummary, ReadError> {
        debug!("reading LAMMPS data file {}", data_path.display());
        let data = fs::read_to_string(data_path)?;
        let inputs = input_paths
            .iter()
            .map(fs::read_to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
        self.read_str(&data, &inputs)
    }

    /// Same as [`DataFileReader::read`], with the file contents already in
    /// memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file is malformed. The state is left
    /// untouched in that case.
    pub fn read_str(&mut self, data: &str, inputs: &[&str]) -> Result<ReadSummary, ReadError> {
        let file = DataFile::new(data, inputs);

        let types = self.load_atom_types(&file)?;
        let bounds = if self.set_bounds {
            Some(self.load_bounds(&file)?)
        } else {
            None
        };
        let atoms = self.load_atoms(&file, types.len(), self.state.atom_count())?;
        let bonds = if file.molecular && self.bond_creator.is_some() {
            self.load_bonds(&file, &atoms.id_to_index)?
        } else {
            Vec::new()
        };

        let summary = ReadSummary {
            atom_types: types.len(),
            atoms: atoms.records.len(),
            bonds: bonds.len(),
            molecular: file.molecular,
            atom_style: atoms.style.clone(),
        };
        self.commit(&types, bounds, &atoms.records, &bonds);
        info!("read {summary}");
        Ok(summary)
    }

    fn load_atom_types(&self, file: &DataFile) -> Result<Vec<AtomTypeRecord>, ReadError> {
        let declarations = scan_occurrences(&[file.lines.as_slice()], &ATOM_TYPES);
        let [declaration] = declarations.as_slice() else {
            return Err(ReadError::MalformedHeader {
                declaration: "atom types".to_string(),
                found: declarations.len(),
            });
        };
        let count_field = declaration.text.split_whitespace().next().unwrap_or_default();
        let count: usize = parse_field("Header", declaration.line, count_field)?;

        let mut types: Vec<AtomTypeRecord> = Vec::new();
        types.try_reserve_exact(count).map_err(|e| {
            ReadError::invalid_field("Header", declaration.line, count_field, e)
        })?;
        types.extend((0..count).map(|index| AtomTypeRecord {
            local_index: index + 1,
            handle: format!("{}{}", self.type_prefix, index),
            mass: None,
        }));

        let masses: Vec<Row> = find_section(&file.lines, &MASSES).collect();
        if masses.len() > count {
            return Err(ReadError::TypeCountMismatch {
                declared: count,
                found: masses.len(),
            });
        }

        // masses are matched to types by position, not by the index in the row
        for (record, row) in types.iter_mut().zip(&masses) {
            let [index, mass, ..] = row.fields[..] else {
                return Err(ReadError::MissingField {
                    section: "Masses",
                    line: row.line,
                    expected: 2,
                    got: row.fields.len(),
                });
            };
            if index.parse::<usize>().ok() != Some(record.local_index) {
                warn!(
                    "Masses section, line {}: mass for type {index} is used for type {}",
                    row.line, record.local_index
                );
            }
            let mass: f64 = parse_field("Masses", row.line, mass)?;
            record.mass = Some(self.units.to_mass(mass));
        }
        if masses.len() < count {
            debug!(
                "{} of {count} atom types have no mass in the data file",
                count - masses.len()
            );
        }

        self.apply_mass_commands(file, &mut types)?;
        Ok(types)
    }

    /// Applies `mass <types> <value>` commands found in the input scripts.
    /// `<types>` is a single type or a range such as `*`, `2*` or `1*3`.
    fn apply_mass_commands(
        &self,
        file: &DataFile,
        types: &mut [AtomTypeRecord],
    ) -> Result<(), ReadError> {
        let inputs: Vec<&[&str]> = file.inputs.iter().map(Vec::as_slice).collect();
        for command in scan_occurrences(&inputs, &MASS_COMMAND) {
            let fields: Vec<&str> = strip_comment(command.text).split_whitespace().collect();
            let [_, type_index, mass, ..] = fields[..] else {
                return Err(ReadError::MissingField {
                    section: "mass command",
                    line: command.line,
                    expected: 3,
                    got: fields.len(),
                });
            };
            let range = type_range(type_index, command.line, types.len())?;
            let mass: f64 = parse_field("mass command", command.line, mass)?;
            if range.is_empty() {
                debug!(
                    "input script {}, line {}: 'mass {type_index}' selects no atom type",
                    command.file, command.line
                );
            }
            for type_index in range {
                let record = checked_type(types, type_index, command.line)?;
                record.mass = Some(self.units.to_mass(mass));
            }
        }
        Ok(())
    }

    fn load_bounds(&self, file: &DataFile) -> Result<(Vector3<f64>, Vector3<f64>), ReadError> {
        let mut lo = Vector3::zeros();
        let mut hi = Vector3::zeros();
        for (i, (axis, pattern)) in AXES.iter().zip(AXIS_BOUNDS.iter()).enumerate() {
            let declarations = scan_occurrences(&[file.lines.as_slice()], pattern);
            let [declaration] = declarations.as_slice() else {
                return Err(ReadError::MalformedHeader {
                    declaration: format!("{axis}lo {axis}hi"),
                    found: declarations.len(),
                });
            };
            let fields: Vec<&str> = declaration.text.split_whitespace().collect();
            lo[i] = self.units.to_length(parse_field("Header", declaration.line, fields[0])?);
            hi[i] = self.units.to_length(parse_field("Header", declaration.line, fields[1])?);
        }
        Ok((lo, hi))
    }

    /// Atoms get indices starting at `first_index`, in the order of the
    /// rows in the file.
    fn load_atoms(
        &self,
        file: &DataFile,
        type_count: usize,
        first_index: usize,
    ) -> Result<LoadedAtoms, ReadError> {
        let section = find_section(&file.lines, &ATOMS);
        let style = section.header_text().and_then(style_hint);
        let rows: Vec<Row> = section.collect();
        let Some(first) = rows.first() else {
            debug!("no Atoms section in the data file");
            return Ok(LoadedAtoms {
                style,
                ..Default::default()
            });
        };

        let has_charges = if file.molecular {
            first.fields.len() == 7
        } else {
            first.fields.len() == 6
        };
        if let Some(&charged) = style.as_deref().and_then(|s| ATOM_STYLES.get(s)) {
            if charged != has_charges {
                warn!(
                    "Atoms section is marked as '{}', but its rows {} charges",
                    style.as_deref().unwrap_or_default(),
                    if has_charges { "have" } else { "do not have" }
                );
            }
        }
        let expected = if has_charges { 6 } else { 5 };

        let mut loaded = LoadedAtoms {
            records: Vec::with_capacity(rows.len()),
            id_to_index: HashMap::with_capacity(rows.len()),
            style,
        };
        for (offset, row) in rows.iter().enumerate() {
            let n = row.fields.len();
            if n < expected {
                return Err(ReadError::MissingField {
                    section: "Atoms",
                    line: row.line,
                    expected,
                    got: n,
                });
            }

            let source_id: i64 = parse_field("Atoms", row.line, row.fields[0])?;
            let position = Vector3::new(
                self.units.to_length(parse_field("Atoms", row.line, row.fields[n - 3])?),
                self.units.to_length(parse_field("Atoms", row.line, row.fields[n - 2])?),
                self.units.to_length(parse_field("Atoms", row.line, row.fields[n - 1])?),
            );
            let (type_field, charge) = if has_charges {
                let charge: f64 = parse_field("Atoms", row.line, row.fields[n - 4])?;
                (row.fields[n - 5], Some(charge))
            } else {
                (row.fields[n - 4], None)
            };
            let type_index: i64 = parse_field("Atoms", row.line, type_field)?;
            if type_index < 1 || type_index as usize > type_count {
                return Err(ReadError::UnknownAtomType {
                    line: row.line,
                    type_index,
                    registered: type_count,
                });
            }

            let index = AtomIndex(first_index + offset);
            if loaded.id_to_index.insert(source_id, index).is_some() {
                warn!(
                    "Atoms section, line {}: atom id {source_id} is used more than once",
                    row.line
                );
            }
            loaded.records.push(AtomRecord {
                type_index: type_index as usize,
                charge,
                position,
            });
        }
        debug!("found {} atoms in the data file", loaded.records.len());
        Ok(loaded)
    }

    fn load_bonds(
        &self,
        file: &DataFile,
        id_to_index: &IdIndexMap,
    ) -> Result<Vec<BondRecord>, ReadError> {
        find_section(&file.lines, &BONDS)
            .map(|row| {
                let [_, bond_type, first, second, ..] = row.fields[..] else {
                    return Err(ReadError::MissingField {
                        section: "Bonds",
                        line: row.line,
                        expected: 4,
                        got: row.fields.len(),
                    });
                };
                let bond_type: usize = parse_field("Bonds", row.line, bond_type)?;
                let first_id: i64 = parse_field("Bonds", row.line, first)?;
                let second_id: i64 = parse_field("Bonds", row.line, second)?;
                if first_id == second_id {
                    return Err(ReadError::invalid_field(
                        "Bonds",
                        row.line,
                        second,
                        "a bond can not join an atom to itself",
                    ));
                }

                let resolve = |atom_id: i64| {
                    id_to_index
                        .get(&atom_id)
                        .copied()
                        .ok_or(ReadError::DanglingBondReference {
                            line: row.line,
                            atom_id,
                        })
                };
                Ok(BondRecord {
                    bond_type,
                    atoms: [resolve(first_id)?, resolve(second_id)?],
                })
            })
            .collect()
    }

    fn commit(
        &mut self,
        types: &[AtomTypeRecord],
        bounds: Option<(Vector3<f64>, Vector3<f64>)>,
        atoms: &[AtomRecord],
        bonds: &[BondRecord],
    ) {
        for record in types {
            let type_ref = self.state.register_species(&record.handle, None);
            if let Some(mass) = record.mass {
                self.state.set_species_mass(type_ref, mass);
            }
        }

        if let Some((lo, hi)) = bounds {
            self.state.set_bounds(lo, hi);
        }

        for atom in atoms {
            let handle = &types[atom.type_index - 1].handle;
            self.state
                .insert_atom(handle, atom.position, atom.charge.unwrap_or(0.0));
        }

        if let Some(bond_creator) = self.bond_creator.as_deref_mut() {
            for bond in bonds {
                bond_creator.create_bond(bond.atoms[0], bond.atoms[1], bond.bond_type);
            }
        }
    }
}

fn parse_field<T>(section: &'static str, line: usize, field: &str) -> Result<T, ReadError>
where
    T: FromStr,
    T::Err: Display,
{
    field
        .parse::<T>()
        .map_err(|e| ReadError::invalid_field(section, line, field, e))
}

fn checked_type(
    types: &mut [AtomTypeRecord],
    type_index: i64,
    line: usize,
) -> Result<&mut AtomTypeRecord, ReadError> {
    let registered = types.len();
    let index = usize::try_from(type_index)
        .ok()
        .and_then(|index| index.checked_sub(1))
        .filter(|&index| index < registered);
    match index {
        Some(index) => Ok(&mut types[index]),
        None => Err(ReadError::UnknownAtomType {
            line,
            type_index,
            registered,
        }),
    }
}

/// Expands the type field of a `mass` command. `*` stands for every type,
/// and a missing bound of `*3` or `2*` is the first or the last type.
fn type_range(
    field: &str,
    line: usize,
    registered: usize,
) -> Result<RangeInclusive<i64>, ReadError> {
    let Some((lo, hi)) = field.split_once('*') else {
        let type_index: i64 = parse_field("mass command", line, field)?;
        return Ok(type_index..=type_index);
    };
    let lo = match lo {
        "" => 1,
        lo => parse_field("mass command", line, lo)?,
    };
    let hi = match hi {
        "" => i64::try_from(registered).unwrap_or(i64::MAX),
        hi => parse_field("mass command", line, hi)?,
    };
    Ok(lo..=hi)
}

/// Extracts `full` from a header such as `Atoms # full`.
fn style_hint(header: &str) -> Option<String> {
    let (_, comment) = header.split_once(crate::section::COMMENT_MARKER)?;
    comment.split_whitespace().next().map(str::to_string)
}
