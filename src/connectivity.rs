// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::BTreeMap;

use log::warn;

use crate::{
    bond::Bond,
    state::{AtomIndex, BondCreator},
};

/// Typed bonds between atoms, playing the role of a bond force-field fix in
/// a simulation engine: it records which atoms are bonded and with which
/// bond type, but carries no bond parameters.
#[derive(Default, Debug)]
pub struct Connectivity {
    /// Bonds and their bond type
    bonds: BTreeMap<Bond, usize>,

    /// Biggest atom index within the bonds we know about
    biggest_atom: Option<usize>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Iterate over the bonds and their types, sorted by atom indices.
    pub fn bonds(&self) -> impl Iterator<Item = (&Bond, usize)> {
        self.bonds.iter().map(|(bond, bond_type)| (bond, *bond_type))
    }

    pub fn biggest_atom(&self) -> Option<usize> {
        self.biggest_atom
    }

    /// Add a bond between atoms `i` and `j`. An existing bond between the
    /// same atoms gets its type replaced.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`.
    pub fn add_bond(&mut self, i: usize, j: usize, bond_type: usize) {
        let bond = Bond::new(i, j);
        if let Some(previous) = self.bonds.insert(bond, bond_type) {
            if previous != bond_type {
                warn!("bond between {i} and {j} changed type from {previous} to {bond_type}");
            }
        }
        self.biggest_atom = Some(self.biggest_atom.map_or(bond[1], |b| b.max(bond[1])));
    }

    /// Get the type of the bond between `i` and `j`, if they are bonded
    pub fn bond_type(&self, i: usize, j: usize) -> Option<usize> {
        if i == j {
            return None;
        }
        self.bonds.get(&Bond::new(i, j)).copied()
    }
}

impl BondCreator for Connectivity {
    fn create_bond(&mut self, first: AtomIndex, second: AtomIndex, bond_type: usize) {
        self.add_bond(first.0, second.0, bond_type);
    }
}
