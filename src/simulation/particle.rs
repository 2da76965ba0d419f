//! Explosion particles spawned at the impact point

use rand::Rng;

use super::config::ExplosionConfig;
use super::types::{Position, Rgba};

/// A single explosion fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Position,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life in `(0, 1]`
    pub life: f32,
}

impl Particle {
    /// Advance one tick. Returns false once the particle has expired.
    pub fn tick(&mut self, decay: f32, damping: Option<f32>) -> bool {
        self.position.x += self.vx;
        self.position.y += self.vy;
        if let Some(damping) = damping {
            self.vx *= damping;
            self.vy *= damping;
        }
        self.life -= decay;
        self.life > 0.0
    }

    /// Fiery orange fading to transparent red as life runs out
    pub fn color(&self) -> Rgba {
        let life = self.life.clamp(0.0, 1.0);
        Rgba::rgba(255, (life * 100.0).floor() as u8, 0, life)
    }
}

/// The set of live explosion fragments
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live fragments with a fresh explosion around `impact`
    pub fn spawn_explosion<R: Rng + ?Sized>(
        &mut self,
        impact: Position,
        config: &ExplosionConfig,
        rng: &mut R,
    ) {
        self.particles.clear();
        self.particles.reserve(config.particle_count);
        for _ in 0..config.particle_count {
            let x = impact.x + rng.random::<f32>() * config.spread_x - config.spread_x / 2.0;
            let y = impact.y + rng.random::<f32>() * config.spread_y - config.spread_y / 2.0;
            self.particles.push(Particle {
                position: Position::new(x, y),
                vx: (rng.random::<f32>() - 0.5) * config.velocity_range,
                vy: (rng.random::<f32>() - 0.5) * config.velocity_range,
                life: 1.0,
            });
        }
    }

    /// Integrate every fragment and drop the expired ones
    pub fn update(&mut self, config: &ExplosionConfig) {
        self.particles
            .retain_mut(|particle| particle.tick(config.decay, config.damping));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
