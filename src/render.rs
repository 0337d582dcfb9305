// One frame of the backdrop: background gradient, then move and draw every
// particle.

use crate::canvas::Canvas;
use crate::config::FieldConfig;
use crate::input::PointerState;
use crate::store::ParticleStore;
use crate::surface::SurfaceManager;

/// Everything a frame reads. Only the particles are mutated.
pub struct Frame<'a> {
    pub surface: &'a SurfaceManager,
    pub pointer: &'a PointerState,
    pub touch_capable: bool,
    pub config: &'a FieldConfig,
}

/// Draws one frame. Returns false without touching anything if the canvas is
/// no longer available, which tells the caller to stop scheduling frames.
pub fn render_frame(canvas: &mut dyn Canvas, particles: &mut ParticleStore, frame: &Frame) -> bool {
    if !canvas.is_available() {
        return false;
    }

    let bounds = frame.surface.bounds();
    canvas.fill_horizontal_gradient(
        bounds[0],
        bounds[1],
        frame.config.gradient_left,
        frame.config.gradient_right,
    );

    let pointer = frame.pointer.position();
    let repel = frame.pointer.repulsion_enabled(frame.touch_capable);
    for particle in particles.iter_mut() {
        particle.step(pointer, repel, bounds, frame.config);
        canvas.set_global_alpha(particle.alpha);
        canvas.fill_circle(particle.pos[0], particle.pos[1], particle.size, particle.color);
    }

    canvas.set_global_alpha(1.0);
    true
}
