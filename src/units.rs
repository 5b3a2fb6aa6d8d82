// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use crate::error::ReadError;

/// Divisors bridging the units of a data file to the units of the
/// simulation being populated.
///
/// Every quantity read from the file is divided by the matching factor
/// exactly once, before it is handed to the simulation state. A divisor of
/// `1.0` keeps the file's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    length: f64,
    energy: f64,
    mass: f64,
}

impl Units {
    /// Creates a new set of unit divisors.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnitConfiguration`] if any divisor is zero.
    pub fn new(length: f64, energy: f64, mass: f64) -> Result<Self, ReadError> {
        if length == 0.0 {
            return Err(ReadError::UnitConfiguration("length"));
        }
        if energy == 0.0 {
            return Err(ReadError::UnitConfiguration("energy"));
        }
        if mass == 0.0 {
            return Err(ReadError::UnitConfiguration("mass"));
        }
        Ok(Units {
            length,
            energy,
            mass,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// No section read here carries an energy, but force-field
    /// collaborators configured alongside the reader use the same set.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub(crate) fn to_length(&self, value: f64) -> f64 {
        value / self.length
    }

    pub(crate) fn to_mass(&self, value: f64) -> f64 {
        value / self.mass
    }
}
