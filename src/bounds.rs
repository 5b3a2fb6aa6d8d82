// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use nalgebra::Vector3;

/// Orthogonal simulation box, given by its lower and upper corners.
#[derive(Default, Debug, Clone, Copy)]
pub struct Bounds {
    pub lo: Vector3<f64>,
    pub hi: Vector3<f64>,
}

/// Corners are compared with a tolerance relative to their magnitude, and
/// absolute below 1.
impl PartialEq for Bounds {
    fn eq(&self, other: &Self) -> bool {
        self.lo
            .iter()
            .chain(self.hi.iter())
            .zip(other.lo.iter().chain(other.hi.iter()))
            .all(|(a, b)| (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs()).max(1.0))
    }
}

impl Bounds {
    pub fn new(lo: Vector3<f64>, hi: Vector3<f64>) -> Self {
        Bounds { lo, hi }
    }

    /// Edge lengths of the box
    pub fn lengths(&self) -> Vector3<f64> {
        self.hi - self.lo
    }

    pub fn volume(&self) -> f64 {
        self.lengths().product()
    }
}
