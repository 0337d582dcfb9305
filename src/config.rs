// Visual constants for the particle field. The defaults reproduce the
// contact page backdrop exactly; nothing here is exposed to JS.

use crate::color::{Color, MIST, PERIWINKLE};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Viewports narrower than this (in CSS pixels) use the mobile tier.
    pub mobile_breakpoint: u32,
    pub mobile_particles: usize,
    pub desktop_particles: usize,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    /// Drift velocity is drawn from `[-max_drift, max_drift)` on each axis.
    pub max_drift: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub palette: [Color; 2],
    pub gradient_left: Color,
    pub gradient_right: Color,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            mobile_breakpoint: 768,
            mobile_particles: 100,
            desktop_particles: 200,
            repulsion_radius: 150.0,
            repulsion_strength: 3.0,
            max_drift: 0.25,
            min_size: 1.0,
            max_size: 4.0,
            min_alpha: 0.3,
            max_alpha: 0.8,
            palette: [PERIWINKLE, MIST],
            gradient_left: MIST,
            gradient_right: PERIWINKLE,
        }
    }
}
