use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::scene::{CompositeRing, ParticleBillboard, SceneEntity, SolidBody};

/// Advances entity state from frame timing.
///
/// Owns the random stream used for particle respawns, so a given seed and
/// sequence of `(elapsed, dt)` pairs always produces the same scene.
#[derive(Debug, Clone)]
pub struct Animator {
    rng: StdRng,
}

impl Animator {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Animator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Random stream shared with scene construction.
    #[inline]
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Updates `entities` in place for the frame at `elapsed` seconds, `dt`
    /// seconds after the previous one.
    pub fn advance(&mut self, entities: &mut [SceneEntity], elapsed: f32, dt: f32) {
        for entity in entities {
            match entity {
                SceneEntity::Particle(p) => self.step_particle(p, dt),
                SceneEntity::Solid(s) => step_solid(s, elapsed, dt),
                SceneEntity::Ring(r) => step_ring(r, elapsed),
            }
        }
    }

    /// Moves a particle toward the viewer, respawning it at the far plane once
    /// it crosses the respawn depth.
    pub fn step_particle(&mut self, p: &mut ParticleBillboard, dt: f32) {
        p.z -= p.speed * dt * ParticleBillboard::DEPTH_SPEED;
        if p.z.is_nan() || p.z < ParticleBillboard::RESPAWN_DEPTH {
            p.respawn(&mut self.rng);
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Integrates rotation and samples bob and depth waves at `elapsed`.
pub fn step_solid(s: &mut SolidBody, elapsed: f32, dt: f32) {
    s.rotation += s.rotation_speed * dt;
    s.rotation.x = s.rotation.x.rem_euclid(360.0);
    s.rotation.y = s.rotation.y.rem_euclid(360.0);
    if let Some(spin) = s.spin {
        s.spin_angle = spin.angle_at(elapsed);
    }
    s.bob_offset = s.bob.sample(elapsed);
    s.depth = s.base_depth + s.depth_wave.sample(elapsed);
}

#[inline]
pub fn step_ring(r: &mut CompositeRing, elapsed: f32) {
    r.pose(elapsed);
}
