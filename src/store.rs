use crate::config::FieldConfig;
use crate::particle::Particle;
use rand::Rng;

/// Owns the live particle set. The whole set is replaced on every rebuild.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        ParticleStore {
            particles: Vec::new(),
        }
    }

    pub fn rebuild<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::random(rng, width, height, config));
        }
        self.particles = particles;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rebuild_replaces_everything() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut store = ParticleStore::new();
        assert!(store.is_empty());

        store.rebuild(&mut rng, 200, 1024.0, 768.0, &config);
        assert_eq!(store.len(), 200);
        let before = store.as_slice()[0];

        store.rebuild(&mut rng, 100, 500.0, 900.0, &config);
        assert_eq!(store.len(), 100);
        assert_ne!(store.as_slice()[0], before);
        assert!(store
            .iter()
            .all(|p| p.pos[0] < 500.0 && p.pos[1] < 900.0));
    }

    #[test]
    fn zero_sized_surface_puts_everything_at_origin() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut store = ParticleStore::new();
        store.rebuild(&mut rng, 100, 0.0, 0.0, &config);
        assert_eq!(store.len(), 100);
        assert!(store.iter().all(|p| p.pos == [0.0, 0.0]));
    }
}
