// Particle state plus the per-frame motion rule: pointer repulsion when the
// pointer is close enough, constant drift otherwise, then toroidal wrap.

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
    pub alpha: f64,
}

/// Which rule moved a particle during a step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Motion {
    Repelled,
    Drifted,
}

impl Particle {
    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        size: f64,
        color: Color,
        alpha: f64,
    ) -> Particle {
        Particle {
            pos,
            vel,
            size,
            color,
            alpha,
        }
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_drift;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_drift;
        let size = rng.gen::<f64>() * (config.max_size - config.min_size) + config.min_size;
        let alpha = rng.gen::<f64>() * (config.max_alpha - config.min_alpha) + config.min_alpha;
        let color = if rng.gen_bool(0.5) {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, color, alpha)
    }

    /// Advances the particle one frame. `repel` says whether the pointer may
    /// push particles at all this frame; `bounds` is the surface size.
    pub fn step(
        &mut self,
        pointer: Vector2<f64>,
        repel: bool,
        bounds: Vector2<f64>,
        config: &FieldConfig,
    ) -> Motion {
        let to_pointer = vecmath::vec2_sub(pointer, self.pos);
        let distance = vecmath::vec2_len(to_pointer);

        let motion = if repel && distance < config.repulsion_radius {
            // atan2 is undefined on top of the pointer; push along -x there.
            let angle = if distance > 0.0 {
                to_pointer[1].atan2(to_pointer[0])
            } else {
                0.0
            };
            let force = (config.repulsion_radius - distance) / config.repulsion_radius;
            self.pos[0] -= angle.cos() * force * config.repulsion_strength;
            self.pos[1] -= angle.sin() * force * config.repulsion_strength;
            Motion::Repelled
        } else {
            self.pos = vecmath::vec2_add(self.pos, self.vel);
            Motion::Drifted
        };

        self.pos[0] = wrap(self.pos[0], bounds[0]);
        self.pos[1] = wrap(self.pos[1], bounds[1]);
        motion
    }
}

/// Wraps a coordinate into `[0, extent)`, re-entering at the opposite edge.
/// A coordinate that left by `d` re-enters at `extent - d` (or `d`), it does
/// not snap to the edge itself.
pub fn wrap(value: f64, extent: f64) -> f64 {
    let wrapped = if value < 0.0 {
        value + extent
    } else if value >= extent {
        value - extent
    } else {
        value
    };
    if wrapped >= 0.0 && wrapped < extent {
        wrapped
    } else {
        0.0
    }
}
