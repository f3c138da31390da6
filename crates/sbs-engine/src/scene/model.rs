use std::fmt;

use glam::Vec3;

use crate::animation::Animator;
use crate::paint::Color;

use super::{AxisSpin, CompositeRing, FaceColoring, Oscillation, ParticleBillboard, SceneEntity, SolidBody};

/// Built-in scenes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ScenePreset {
    /// Starfield, one floating cube, the cube ring and a floor grid.
    #[default]
    Demo,
    /// A single palette-colored cube, for alignment checks.
    Cube,
}

impl ScenePreset {
    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Demo => "demo",
            ScenePreset::Cube => "cube",
        }
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The animated scene.
///
/// Entities are created once and mutated in place by [`tick`](Self::tick).
/// Iteration order is insertion order; the compositor decides layer order.
#[derive(Debug, Clone)]
pub struct Scene {
    entities: Vec<SceneEntity>,
    floor_grid: bool,
    animator: Animator,
}

impl Scene {
    pub const DEMO_PARTICLES: usize = 200;

    /// Empty scene driven by `animator`.
    pub fn new(animator: Animator) -> Self {
        Self {
            entities: Vec::new(),
            floor_grid: false,
            animator,
        }
    }

    /// Builds `preset`. `seed` fixes the random stream; `None` draws from OS entropy.
    pub fn from_preset(preset: ScenePreset, seed: Option<u64>) -> Self {
        let animator = match seed {
            Some(seed) => Animator::from_seed(seed),
            None => Animator::from_entropy(),
        };
        match preset {
            ScenePreset::Demo => Self::demo_with(animator),
            ScenePreset::Cube => Self::cube_with(animator),
        }
    }

    pub fn demo(seed: u64) -> Self {
        Self::demo_with(Animator::from_seed(seed))
    }

    pub fn cube() -> Self {
        Self::cube_with(Animator::from_seed(0))
    }

    fn demo_with(animator: Animator) -> Self {
        let mut scene = Self::new(animator);
        scene.floor_grid = true;

        for _ in 0..Self::DEMO_PARTICLES {
            let p = ParticleBillboard::spawn(scene.animator.rng());
            scene.entities.push(p.into());
        }

        // Sweeps from depth 3 to 27 and back, slowly enough to follow.
        let cube = SolidBody::floating(
            scene.animator.rng(),
            Vec3::new(0.0, 0.0, 15.0),
            2.0,
            Color::rgb(1.0, 0.5, 0.2),
        )
        .with_depth_wave(Oscillation::new(12.0, 0.25, 0.0));
        scene.entities.push(cube.into());

        scene.entities.push(CompositeRing::standard().into());
        scene.tick(0.0, 0.0);
        scene
    }

    fn cube_with(animator: Animator) -> Self {
        let mut scene = Self::new(animator);
        let cube = SolidBody::fixed(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::WHITE)
            .with_faces(FaceColoring::Palette)
            .with_spin(AxisSpin::new(Vec3::new(1.0, 1.0, 0.0), 50.0));
        scene.entities.push(cube.into());
        scene.tick(0.0, 0.0);
        scene
    }

    #[inline]
    pub fn has_floor_grid(&self) -> bool {
        self.floor_grid
    }

    #[inline]
    pub fn entities(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn particles(&self) -> impl Iterator<Item = &ParticleBillboard> + '_ {
        self.entities.iter().filter_map(SceneEntity::as_particle)
    }

    pub fn solids(&self) -> impl Iterator<Item = &SolidBody> + '_ {
        self.entities.iter().filter_map(SceneEntity::as_solid)
    }

    /// The first ring in the scene, if any.
    pub fn composite_ring(&self) -> Option<&CompositeRing> {
        self.entities.iter().find_map(SceneEntity::as_ring)
    }

    /// Advances every entity once. Call exactly once per frame.
    pub fn tick(&mut self, elapsed: f32, dt: f32) {
        self.animator.advance(&mut self.entities, elapsed, dt);
    }
}
