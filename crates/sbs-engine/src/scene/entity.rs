use super::{CompositeRing, ParticleBillboard, SolidBody};

/// Anything the scene holds and the animator advances.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEntity {
    Particle(ParticleBillboard),
    Solid(SolidBody),
    Ring(CompositeRing),
}

impl SceneEntity {
    #[inline]
    pub fn as_particle(&self) -> Option<&ParticleBillboard> {
        match self {
            SceneEntity::Particle(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn as_solid(&self) -> Option<&SolidBody> {
        match self {
            SceneEntity::Solid(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_ring(&self) -> Option<&CompositeRing> {
        match self {
            SceneEntity::Ring(r) => Some(r),
            _ => None,
        }
    }
}

impl From<ParticleBillboard> for SceneEntity {
    fn from(p: ParticleBillboard) -> Self {
        SceneEntity::Particle(p)
    }
}

impl From<SolidBody> for SceneEntity {
    fn from(s: SolidBody) -> Self {
        SceneEntity::Solid(s)
    }
}

impl From<CompositeRing> for SceneEntity {
    fn from(r: CompositeRing) -> Self {
        SceneEntity::Ring(r)
    }
}
