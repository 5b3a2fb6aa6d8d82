// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Capabilities a simulation engine provides so that a data file can be
//! imported into it.
//!
//! [`Frame`](crate::frame::Frame) and
//! [`Connectivity`](crate::connectivity::Connectivity) are in-memory
//! implementations; an engine binding implements the same traits on its own
//! state.

use nalgebra::Vector3;

/// Opaque identifier of a species registered in a [`SimulationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef(pub usize);

/// Position of an atom in a [`SimulationState`], in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomIndex(pub usize);

pub trait SimulationState {
    /// Registers a species named `handle`. A `None` mass means the mass is
    /// not known yet.
    fn register_species(&mut self, handle: &str, mass: Option<f64>) -> TypeRef;

    fn set_species_mass(&mut self, species: TypeRef, mass: f64);

    fn set_bounds(&mut self, lo: Vector3<f64>, hi: Vector3<f64>);

    /// Appends an atom. The new atom gets the index `self.atom_count()`
    /// had before the call.
    fn insert_atom(&mut self, handle: &str, position: Vector3<f64>, charge: f64);

    fn atom_count(&self) -> usize;
}

/// Creates bonds between atoms already inserted in a [`SimulationState`].
pub trait BondCreator {
    fn create_bond(&mut self, first: AtomIndex, second: AtomIndex, bond_type: usize);
}
