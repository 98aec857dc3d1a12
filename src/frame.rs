use crate::{appearance::AppearanceTable, particle::Particle};

/// Render state of a single particle, extracted during the publish step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParticle {
    /// Horizontal position of the center.
    pub x: f64,
    /// Vertical position of the center.
    pub y: f64,
    /// Half of the particle size, to offset the drawn sprite.
    pub half_size: f64,
    /// Bucket in the [`AppearanceTable`].
    pub appearance_index: usize,
}

impl RenderParticle {
    pub(crate) fn extract(particle: &Particle, table: &AppearanceTable) -> Self {
        Self {
            x: particle.location.x,
            y: particle.location.y,
            half_size: particle.half_size(),
            appearance_index: table.index(particle.lifespan),
        }
    }
}

/// Read-only snapshot of the world published at the end of a tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Tick that produced this frame, starting at `1`.
    pub tick: u64,
    /// Every particle alive after the tick.
    pub particles: Vec<RenderParticle>,
    /// Particles emitted during the tick.
    pub emitted: usize,
    /// Particles removed during the tick.
    pub culled: usize,
}

impl Frame {
    /// Number of particles in the frame.
    #[inline]
    pub fn population(&self) -> usize {
        self.particles.len()
    }
}

/// Consumer of published frames, e.g. a canvas or a GPU sprite batch.
pub trait Renderer {
    /// Draws a frame. `table` maps each particle's appearance index to its look.
    fn render(&mut self, frame: &Frame, table: &AppearanceTable);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame, &AppearanceTable),
{
    #[inline]
    fn render(&mut self, frame: &Frame, table: &AppearanceTable) {
        self(frame, table)
    }
}
