//! Phong material parameters

use crate::point::Vector3f;
use serde::{Deserialize, Serialize};

/// Ambient colour of a light marker whose light is switched on
pub const LIT_MARKER_AMBIENT: [f32; 3] = [1.0, 0.5, 0.31];

/// Surface response to the scene lights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: Vector3f,
    pub diffuse: Vector3f,
    pub specular: Vector3f,
    pub shininess: f32,
}

impl Material {
    pub fn new(ambient: Vector3f, diffuse: Vector3f, specular: Vector3f, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Highly reflective, almost no diffuse response
    pub fn shiny() -> Self {
        Self::new(
            Vector3f::new(0.05, 0.05, 0.05),
            Vector3f::new(0.1, 0.1, 0.1),
            Vector3f::new(0.9, 0.9, 0.9),
            64.0,
        )
    }

    /// Purely diffuse, no highlights
    pub fn matte() -> Self {
        Self::new(
            Vector3f::new(0.1, 0.06, 0.03),
            Vector3f::new(0.6, 0.4, 0.2),
            Vector3f::zeros(),
            1.0,
        )
    }

    /// Both diffuse and specular response
    pub fn glossy() -> Self {
        Self::new(
            Vector3f::new(0.0, 0.1, 0.06),
            Vector3f::new(0.0, 0.5, 0.35),
            Vector3f::new(0.5, 0.5, 0.5),
            32.0,
        )
    }

    /// Self-coloured marker material; only the ambient term is used
    pub fn marker(lit: bool) -> Self {
        let ambient = if lit {
            Vector3f::from(LIT_MARKER_AMBIENT)
        } else {
            Vector3f::zeros()
        };
        Self::new(ambient, Vector3f::new(1.0, 1.0, 1.0), Vector3f::zeros(), 0.0)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::glossy()
    }
}
