use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::camera::Eye;
use crate::compositor::{DrawPass, Frame, FrameCmd};
use crate::coords::Rect;
use crate::geometry::MeshKind;
use crate::paint::Color;

/// Per-draw uniform block, mirrored by `DrawUniform` in `stereo.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawUniform {
    pub mvp: [[f32; 4]; 4],
    pub tint: [f32; 4],
    /// Viewport size in pixels.
    pub viewport: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

impl DrawUniform {
    pub fn new(mvp: Mat4, tint: Color, viewport: Rect) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            tint: tint.to_array(),
            viewport: [viewport.width as f32, viewport.height as f32],
            _pad: [0.0; 2],
        }
    }
}

/// What a [`DrawStep`] issues once its state is bound.
#[derive(Debug, Clone, PartialEq)]
pub enum StepDraw {
    /// Far-plane triangle covering the scissor.
    ClearRegion,
    Particles { instances: Range<u32> },
    Mesh { mesh: MeshKind, pass: DrawPass },
}

/// One GPU draw with the pass state it runs under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawStep {
    pub eye: Option<Eye>,
    /// Viewport and scissor, already clipped to the render target.
    pub scissor: Rect,
    /// Dynamic offset of this draw's [`DrawUniform`] slot, in bytes.
    pub uniform_offset: u32,
    pub uniform: DrawUniform,
    pub draw: StepDraw,
}

/// Flattens `frame` into the draws a render pass over `target` executes.
///
/// Isolation is tracked here: an eye rect is clipped to `target` and draws
/// under an isolation that misses `target` entirely are dropped. Particle
/// ranges past the frame's instance list are dropped too. Surviving draws
/// get consecutive uniform slots `stride` bytes apart.
pub fn replay(frame: &Frame, target: Rect, stride: u64) -> Vec<DrawStep> {
    let mut steps = Vec::new();
    replay_into(frame, target, stride, &mut steps);
    steps
}

/// [`replay`] into a reused buffer.
pub fn replay_into(frame: &Frame, target: Rect, stride: u64, steps: &mut Vec<DrawStep>) {
    steps.clear();

    let full = (!target.is_empty()).then_some(target);
    let mut scissor = full;
    let mut eye = None;

    for item in frame.items() {
        let (mvp, tint, draw) = match &item.cmd {
            FrameCmd::ClearSurface { .. } => continue,
            FrameCmd::Isolate { eye: isolated, rect } => {
                eye = Some(*isolated);
                scissor = rect.intersect(target);
                continue;
            }
            FrameCmd::ReleaseIsolation => {
                eye = None;
                scissor = full;
                continue;
            }
            FrameCmd::ClearRegion { color } => (Mat4::IDENTITY, *color, StepDraw::ClearRegion),
            FrameCmd::DrawParticles { view_proj, instances } => {
                if instances.end as usize > frame.particles().len() {
                    continue;
                }
                let draw = StepDraw::Particles { instances: instances.clone() };
                (*view_proj, Color::WHITE, draw)
            }
            FrameCmd::DrawMesh { mesh, pass, mvp, tint } => {
                (*mvp, *tint, StepDraw::Mesh { mesh: *mesh, pass: *pass })
            }
        };

        let Some(rect) = scissor else { continue };
        debug_assert_eq!(item.eye, eye);

        steps.push(DrawStep {
            eye,
            scissor: rect,
            uniform_offset: (steps.len() as u64 * stride) as u32,
            uniform: DrawUniform::new(mvp, tint, rect),
            draw,
        });
    }
}

/// Writes each step's uniform at its offset into `out`.
pub fn stage_uniforms(steps: &[DrawStep], out: &mut Vec<u8>) {
    out.clear();
    for step in steps {
        out.resize(step.uniform_offset as usize, 0);
        out.extend_from_slice(bytemuck::bytes_of(&step.uniform));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{StereoCameraConfig, StereoMode};
    use crate::compositor::{Compositor, ViewMode};
    use crate::coords::SurfaceSize;
    use crate::scene::Scene;

    const STRIDE: u64 = 256;

    fn composed(surface: SurfaceSize, view: ViewMode) -> Frame {
        Compositor::default().compose(
            &Scene::demo(9),
            &StereoCameraConfig::default(),
            StereoMode::ParallelAxis,
            view,
            surface,
        )
    }

    #[test]
    fn eye_draws_are_scissored_to_their_half() {
        for width in [3840, 3841] {
            let surface = SurfaceSize::new(width, 1080);
            let half = width / 2;
            for view in [ViewMode::Scene, ViewMode::TestPattern] {
                let steps = replay(&composed(surface, view), surface.full_rect(), STRIDE);

                let mut per_eye = [0usize; 2];
                for step in &steps {
                    let s = step.scissor;
                    match step.eye {
                        Some(Eye::Left) => {
                            per_eye[0] += 1;
                            assert_eq!((s.x, s.right()), (0, half), "{width}: {s:?}");
                        }
                        Some(Eye::Right) => {
                            per_eye[1] += 1;
                            assert_eq!(s.x, half, "{width}: {s:?}");
                            assert!(s.right() <= width, "{width}: {s:?}");
                        }
                        None => panic!("draw outside isolation: {step:?}"),
                    }
                    assert_eq!((s.y, s.height), (0, 1080));
                    assert_eq!(step.uniform.viewport, [s.width as f32, s.height as f32]);
                }
                assert!(per_eye[0] > 0);
                assert_eq!(per_eye[0], per_eye[1]);
            }
        }
    }

    #[test]
    fn isolation_missing_the_target_draws_nothing() {
        let surface = SurfaceSize::SBS_1080P;
        let frame = composed(surface, ViewMode::Scene);
        let target = Rect::new(0, 0, 1000, 1080);

        let steps = replay(&frame, target, STRIDE);
        assert!(!steps.is_empty());
        assert!(steps.iter().all(|s| s.eye == Some(Eye::Left)));
        assert!(steps.iter().all(|s| s.scissor == target));

        let left = replay(&frame, surface.full_rect(), STRIDE)
            .into_iter()
            .filter(|s| s.eye == Some(Eye::Left))
            .count();
        assert_eq!(steps.len(), left);

        assert!(replay(&frame, Rect::default(), STRIDE).is_empty());
    }

    #[test]
    fn each_draw_reads_its_own_uniform_slot() {
        let left_mvp = Mat4::from_translation(glam::Vec3::X);
        let right_mvp = Mat4::from_translation(glam::Vec3::Y);

        let mut frame = Frame::new(SurfaceSize::new(200, 100));
        frame.clear_surface(Color::BLACK);
        frame.isolate(Eye::Left);
        frame.clear_region(Color::RED);
        frame.draw_mesh(MeshKind::CubeEdges, DrawPass::SolidEdges, left_mvp, Color::GREEN);
        frame.isolate(Eye::Right);
        frame.clear_region(Color::BLUE);
        frame.draw_mesh(MeshKind::CubeEdges, DrawPass::SolidEdges, right_mvp, Color::YELLOW);
        frame.release_isolation();

        let steps = replay(&frame, frame.surface().full_rect(), STRIDE);
        let offsets: Vec<u32> = steps.iter().map(|s| s.uniform_offset).collect();
        assert_eq!(offsets, vec![0, 256, 512, 768]);

        let expected = [
            (Eye::Left, Mat4::IDENTITY, Color::RED),
            (Eye::Left, left_mvp, Color::GREEN),
            (Eye::Right, Mat4::IDENTITY, Color::BLUE),
            (Eye::Right, right_mvp, Color::YELLOW),
        ];
        for (step, (eye, mvp, tint)) in steps.iter().zip(expected) {
            assert_eq!(step.eye, Some(eye));
            assert_eq!(step.uniform.mvp, mvp.to_cols_array_2d());
            assert_eq!(step.uniform.tint, tint.to_array());
        }

        let mut bytes = Vec::new();
        stage_uniforms(&steps, &mut bytes);
        let size = std::mem::size_of::<DrawUniform>();
        assert_eq!(bytes.len(), 768 + size);
        for step in &steps {
            let at = step.uniform_offset as usize;
            assert_eq!(&bytes[at..at + size], bytemuck::bytes_of(&step.uniform));
        }
    }

    #[test]
    fn out_of_range_particles_are_skipped() {
        let mut frame = Frame::new(SurfaceSize::new(200, 100));
        frame.isolate(Eye::Left);
        frame.draw_particles(Mat4::IDENTITY, 0..5);
        frame.draw_mesh(MeshKind::FloorGrid, DrawPass::Overlay, Mat4::IDENTITY, Color::WHITE);

        let steps = replay(&frame, frame.surface().full_rect(), STRIDE);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].uniform_offset, 0);
        assert_eq!(steps[0].draw, StepDraw::Mesh { mesh: MeshKind::FloorGrid, pass: DrawPass::Overlay });
    }
}
