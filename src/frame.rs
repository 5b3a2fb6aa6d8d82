// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::HashMap;
use std::ops::Index;

use nalgebra::Vector3;

use crate::atom::{Atom, Species};
use crate::bounds::Bounds;
use crate::state::{SimulationState, TypeRef};

/// In-memory simulation state: species, atoms and the simulation box.
#[derive(Debug, Default)]
pub struct Frame {
    pub bounds: Bounds,
    species: Vec<Species>,
    atoms: Vec<Atom>,
    handles: HashMap<String, TypeRef>,
}

impl Frame {
    pub fn new() -> Self {
        Frame::default()
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn species(&self) -> &[Species] {
        &self.species
    }

    pub fn species_by_handle(&self, handle: &str) -> Option<&Species> {
        self.handles.get(handle).map(|type_ref| &self.species[type_ref.0])
    }

    /// Get the species of the atom at `index`, if the atom exists and its
    /// handle is registered
    pub fn species_of(&self, index: usize) -> Option<&Species> {
        self.atoms
            .get(index)
            .and_then(|atom| self.species_by_handle(&atom.handle))
    }

    pub fn add_atom(&mut self, atom: Atom) {
        self.atoms.push(atom)
    }
}

impl SimulationState for Frame {
    /// Registering a handle twice returns the species registered first,
    /// keeping its mass.
    fn register_species(&mut self, handle: &str, mass: Option<f64>) -> TypeRef {
        if let Some(type_ref) = self.handles.get(handle) {
            return *type_ref;
        }

        let type_ref = TypeRef(self.species.len());
        self.species.push(Species {
            handle: handle.to_string(),
            mass,
        });
        self.handles.insert(handle.to_string(), type_ref);
        type_ref
    }

    fn set_species_mass(&mut self, species: TypeRef, mass: f64) {
        self.species[species.0].mass = Some(mass);
    }

    fn set_bounds(&mut self, lo: Vector3<f64>, hi: Vector3<f64>) {
        self.bounds = Bounds::new(lo, hi);
    }

    fn insert_atom(&mut self, handle: &str, position: Vector3<f64>, charge: f64) {
        self.add_atom(Atom::with_charge(handle.to_string(), position, charge));
    }

    fn atom_count(&self) -> usize {
        self.size()
    }
}

impl Index<usize> for Frame {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn test_frame_indexing() {
        let mut frame = Frame::new();
        frame.add_atom(Atom::with_charge(
            "H".to_string(),
            Vector3::new(1.0, 2.0, 3.0),
            0.0,
        ));
        frame.add_atom(Atom::with_charge(
            "O".to_string(),
            Vector3::new(4.0, 5.0, 6.0),
            -0.8,
        ));

        // Test read access
        assert_eq!(frame[0].handle, "H");
        assert_eq!(frame[1].handle, "O");
        assert_approx_eq!(frame[0].position.x, 1.0);
        assert_approx_eq!(frame[1].position.x, 4.0);
        assert_approx_eq!(frame[1].charge, -0.8);
        assert_eq!(frame.atoms().len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_frame_indexing_out_of_bounds() {
        let frame = Frame::new();
        let _ = &frame[0];
    }

    #[test]
    fn species_registration() {
        let mut frame = Frame::new();
        let carbon = frame.register_species("C", None);
        let hydrogen = frame.register_species("H", Some(1.008));
        assert_eq!(carbon, TypeRef(0));
        assert_eq!(hydrogen, TypeRef(1));
        assert_eq!(frame.species()[0].mass, None);

        frame.set_species_mass(carbon, 12.011);
        assert_eq!(frame.species_by_handle("C").unwrap().mass, Some(12.011));
        assert!(frame.species_by_handle("N").is_none());

        // registering again gives back the same species
        assert_eq!(frame.register_species("C", Some(0.0)), carbon);
        assert_eq!(frame.species().len(), 2);
        assert_eq!(frame.species()[0].mass, Some(12.011));
    }

    #[test]
    fn state_interface() {
        let mut frame = Frame::new();
        frame.register_species("Ar", Some(39.948));
        assert_eq!(frame.atom_count(), 0);

        frame.insert_atom("Ar", Vector3::new(1.0, 2.0, 3.0), 0.0);
        frame.insert_atom("Xe", Vector3::zeros(), 1.0);
        assert_eq!(frame.atom_count(), 2);
        assert_eq!(frame.species_of(0).unwrap().handle, "Ar");
        assert!(frame.species_of(1).is_none());
        assert!(frame.species_of(2).is_none());

        frame.set_bounds(Vector3::zeros(), Vector3::new(5.0, 5.0, 5.0));
        assert_approx_eq!(frame.bounds.volume(), 125.0);
    }
}
