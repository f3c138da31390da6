use std::ops::Range;

use glam::Mat4;

use crate::camera::Eye;
use crate::coords::{Rect, SurfaceSize};
use crate::geometry::{MeshKind, ParticleInstance};
use crate::paint::Color;

/// Depth behavior of a mesh draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawPass {
    /// Alpha blended, no depth test or write.
    Overlay,
    /// Opaque faces: depth test `Less`, depth write.
    SolidFaces,
    /// Wireframe on top of faces: depth test `LessEqual`, no write.
    SolidEdges,
}

/// Renderer-agnostic frame command.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clears the full surface color and depth. First command of a frame.
    ClearSurface { color: Color },
    /// Restricts viewport and scissor to `rect`.
    Isolate { eye: Eye, rect: Rect },
    /// Clears the isolated region color and depth.
    ClearRegion { color: Color },
    /// Draws `instances` (indices into [`Frame::particles`]) as billboards.
    DrawParticles { view_proj: Mat4, instances: Range<u32> },
    /// Draws a static mesh with `mvp`, modulating vertex colors by `tint`.
    DrawMesh { mesh: MeshKind, pass: DrawPass, mvp: Mat4, tint: Color },
    /// Restores full-surface viewport and scissor.
    ReleaseIsolation,
}

/// One recorded command with the isolation it was recorded under.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    pub cmd: FrameCmd,
    /// Active eye, if isolated.
    pub eye: Option<Eye>,
}

/// Recorded commands for one presented frame.
///
/// Built by the [`Compositor`](super::Compositor), consumed by the GPU
/// backend. Reuse the same `Frame` across ticks with [`reset`](Self::reset)
/// to keep allocations warm.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    surface: SurfaceSize,
    items: Vec<FrameItem>,
    particles: Vec<ParticleInstance>,

    isolation: Option<(Eye, Rect)>,
}

impl Frame {
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    /// Clears recorded commands for a new frame. Keeps allocated capacity.
    pub fn reset(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        self.items.clear();
        self.particles.clear();
        self.isolation = None;
    }

    #[inline]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[inline]
    pub fn items(&self) -> &[FrameItem] {
        &self.items
    }

    #[inline]
    pub fn particles(&self) -> &[ParticleInstance] {
        &self.particles
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.isolation.is_some()
    }

    fn push(&mut self, cmd: FrameCmd) {
        let eye = self.isolation.map(|(eye, _)| eye);
        self.items.push(FrameItem { cmd, eye });
    }

    pub fn clear_surface(&mut self, color: Color) {
        debug_assert!(!self.is_isolated(), "clear_surface inside an isolated region");
        self.push(FrameCmd::ClearSurface { color });
    }

    /// Starts drawing into `eye`'s half of the surface.
    ///
    /// Replaces any previous isolation; the two halves never nest.
    pub fn isolate(&mut self, eye: Eye) -> Rect {
        let rect = self.surface.eye_rect(eye);
        self.isolation = Some((eye, rect));
        self.push(FrameCmd::Isolate { eye, rect });
        rect
    }

    pub fn release_isolation(&mut self) {
        self.isolation = None;
        self.push(FrameCmd::ReleaseIsolation);
    }

    pub fn clear_region(&mut self, color: Color) {
        debug_assert!(self.is_isolated(), "clear_region outside an isolated region");
        self.push(FrameCmd::ClearRegion { color });
    }

    /// Stores the frame's particle instances and returns their range.
    pub fn add_particles(&mut self, instances: impl IntoIterator<Item = ParticleInstance>) -> Range<u32> {
        let start = self.particles.len() as u32;
        self.particles.extend(instances);
        start..self.particles.len() as u32
    }

    pub fn draw_particles(&mut self, view_proj: Mat4, instances: Range<u32>) {
        if instances.is_empty() {
            return;
        }
        self.push(FrameCmd::DrawParticles { view_proj, instances });
    }

    pub fn draw_mesh(&mut self, mesh: MeshKind, pass: DrawPass, mvp: Mat4, tint: Color) {
        self.push(FrameCmd::DrawMesh { mesh, pass, mvp, tint });
    }

    /// Eyes in the order they were isolated.
    pub fn eye_order(&self) -> Vec<Eye> {
        self.items
            .iter()
            .filter_map(|item| match item.cmd {
                FrameCmd::Isolate { eye, .. } => Some(eye),
                _ => None,
            })
            .collect()
    }

    /// Number of commands that touch uniform data (one slot each).
    pub fn uniform_slots(&self) -> usize {
        self.items
            .iter()
            .filter(|item| {
                matches!(
                    item.cmd,
                    FrameCmd::ClearRegion { .. } | FrameCmd::DrawParticles { .. } | FrameCmd::DrawMesh { .. }
                )
            })
            .count()
    }
}
