//! Scene model.
//!
//! Responsibilities:
//! - hold the animated entities (particles, floating solids, the cube ring)
//! - build the stock presets
//! - forward per-frame ticks to the [`Animator`](crate::animation::Animator)

mod entity;
mod model;
mod particle;
mod ring;
mod solid;

pub use entity::SceneEntity;
pub use model::{Scene, ScenePreset};
pub use particle::ParticleBillboard;
pub use ring::{CompositeRing, RingMember};
pub use solid::{AxisSpin, FaceColoring, Oscillation, SolidBody};
