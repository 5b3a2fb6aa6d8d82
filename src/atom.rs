// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use nalgebra::Vector3;

/// A species (atom type) known to a [`Frame`](crate::frame::Frame).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Species {
    pub handle: String,
    /// `None` until a mass is assigned
    pub mass: Option<f64>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Atom {
    /// Handle of the species of this atom
    pub handle: String,
    pub position: Vector3<f64>,
    pub charge: f64,
}

impl Atom {
    pub fn with_charge(handle: String, position: Vector3<f64>, charge: f64) -> Self {
        Self {
            handle,
            position,
            charge,
        }
    }
}
