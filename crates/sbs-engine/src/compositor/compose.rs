use glam::Mat4;

use crate::camera::{Eye, StereoCameraConfig, StereoMode};
use crate::coords::SurfaceSize;
use crate::geometry::{MeshKind, ParticleInstance};
use crate::paint::Color;
use crate::scene::{FaceColoring, Scene, ScenePreset};

use super::{DrawPass, Frame};

/// What the compositor draws into each eye.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ViewMode {
    /// The animated scene through the stereo cameras.
    #[default]
    Scene,
    /// Per-eye tinted alignment grid.
    TestPattern,
}

impl ViewMode {
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Scene => ViewMode::TestPattern,
            ViewMode::TestPattern => ViewMode::Scene,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Scene => "scene",
            ViewMode::TestPattern => "test-pattern",
        }
    }
}

/// Clear colors per view mode: the full surface first, then each eye.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClearColors {
    pub scene_surface: Color,
    pub scene_left: Color,
    pub scene_right: Color,
    pub pattern_surface: Color,
    pub pattern_left: Color,
    pub pattern_right: Color,
}

impl ClearColors {
    const DEMO_BACKGROUND: Color = Color::rgb(0.0, 0.0, 0.02);

    /// Scene-mode clears for `preset`. The cube preset tints each eye so a
    /// swapped or overlapping half is visible at a glance.
    pub fn for_preset(preset: ScenePreset) -> Self {
        match preset {
            ScenePreset::Demo => Self::default(),
            ScenePreset::Cube => Self {
                scene_surface: Color::rgb(0.0, 0.0, 0.1),
                scene_left: Color::rgb(0.1, 0.0, 0.0),
                scene_right: Color::rgb(0.0, 0.0, 0.1),
                ..Self::default()
            },
        }
    }

    #[inline]
    pub fn scene_eye(&self, eye: Eye) -> Color {
        match eye {
            Eye::Left => self.scene_left,
            Eye::Right => self.scene_right,
        }
    }

    #[inline]
    pub fn pattern_eye(&self, eye: Eye) -> Color {
        match eye {
            Eye::Left => self.pattern_left,
            Eye::Right => self.pattern_right,
        }
    }
}

impl Default for ClearColors {
    fn default() -> Self {
        Self {
            scene_surface: Self::DEMO_BACKGROUND,
            scene_left: Self::DEMO_BACKGROUND,
            scene_right: Self::DEMO_BACKGROUND,
            pattern_surface: Color::rgb(0.0, 0.0, 0.1),
            pattern_left: Color::rgb(0.3, 0.0, 0.0),
            pattern_right: Color::rgb(0.0, 0.0, 0.3),
        }
    }
}

/// Turns a scene and a camera snapshot into a [`Frame`].
///
/// Per frame: clear the surface once, then for the left eye and then the
/// right eye isolate that half, clear it, and draw particles, floor grid and
/// solids in that order. Isolation is released after both eyes.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    clear: ClearColors,
}

impl Compositor {
    pub fn new(clear: ClearColors) -> Self {
        Self { clear }
    }

    /// Composes a new frame.
    pub fn compose(
        &self,
        scene: &Scene,
        camera: &StereoCameraConfig,
        mode: StereoMode,
        view: ViewMode,
        surface: SurfaceSize,
    ) -> Frame {
        let mut frame = Frame::new(surface);
        self.compose_into(&mut frame, scene, camera, mode, view, surface);
        frame
    }

    /// Composes into `frame`, reusing its allocations.
    pub fn compose_into(
        &self,
        frame: &mut Frame,
        scene: &Scene,
        camera: &StereoCameraConfig,
        mode: StereoMode,
        view: ViewMode,
        surface: SurfaceSize,
    ) {
        frame.reset(surface);

        // Both eyes see the same snapshot.
        let camera = *camera;

        match view {
            ViewMode::Scene => self.compose_scene(frame, scene, &camera, mode),
            ViewMode::TestPattern => self.compose_test_pattern(frame),
        }

        frame.release_isolation();
    }

    fn compose_scene(&self, frame: &mut Frame, scene: &Scene, camera: &StereoCameraConfig, mode: StereoMode) {
        frame.clear_surface(self.clear.scene_surface);

        let particles = frame.add_particles(scene.particles().map(|p| ParticleInstance {
            position: p.draw_position().to_array(),
            size: p.pixel_size(),
            color: p.color().to_array(),
        }));

        for eye in Eye::BOTH {
            frame.isolate(eye);
            frame.clear_region(self.clear.scene_eye(eye));

            let view_proj = mode.projection_and_view(eye, camera).view_projection();

            frame.draw_particles(view_proj, particles.clone());

            if scene.has_floor_grid() {
                frame.draw_mesh(MeshKind::FloorGrid, DrawPass::Overlay, view_proj, Color::WHITE);
            }

            for solid in scene.solids() {
                let tint = match solid.faces {
                    FaceColoring::Uniform => solid.color,
                    FaceColoring::Palette => Color::WHITE,
                };
                draw_cube(frame, view_proj * solid.model(), solid.faces, tint);
            }

            if let Some(ring) = scene.composite_ring() {
                for member in ring.members() {
                    draw_cube(frame, view_proj * member.model, FaceColoring::Uniform, member.color);
                }
            }
        }
    }

    fn compose_test_pattern(&self, frame: &mut Frame) {
        frame.clear_surface(self.clear.pattern_surface);

        let ortho = Mat4::orthographic_rh(0.0, 1.0, 0.0, 1.0, -1.0, 1.0);

        for eye in Eye::BOTH {
            frame.isolate(eye);
            frame.clear_region(self.clear.pattern_eye(eye));
            frame.draw_mesh(MeshKind::TestGrid, DrawPass::Overlay, ortho, Color::WHITE);
            frame.draw_mesh(MeshKind::TestCross, DrawPass::Overlay, ortho, Color::WHITE);
        }
    }
}

fn draw_cube(frame: &mut Frame, mvp: Mat4, faces: FaceColoring, tint: Color) {
    frame.draw_mesh(MeshKind::cube_faces(faces), DrawPass::SolidFaces, mvp, tint);
    frame.draw_mesh(MeshKind::CubeEdges, DrawPass::SolidEdges, mvp, Color::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::FrameCmd;

    fn compose(scene: &Scene, view: ViewMode) -> Frame {
        Compositor::default().compose(
            scene,
            &StereoCameraConfig::default(),
            StereoMode::ParallelAxis,
            view,
            SurfaceSize::SBS_1080P,
        )
    }

    #[test]
    fn clears_once_then_left_then_right() {
        let frame = compose(&Scene::demo(1), ViewMode::Scene);
        let clears = frame
            .items()
            .iter()
            .filter(|i| matches!(i.cmd, FrameCmd::ClearSurface { .. }))
            .count();
        assert_eq!(clears, 1);
        assert!(matches!(frame.items()[0].cmd, FrameCmd::ClearSurface { .. }));
        assert_eq!(frame.eye_order(), vec![Eye::Left, Eye::Right]);
        assert!(matches!(frame.items().last().map(|i| &i.cmd), Some(FrameCmd::ReleaseIsolation)));
    }

    #[test]
    fn layer_order_per_eye() {
        let frame = compose(&Scene::demo(1), ViewMode::Scene);
        for eye in Eye::BOTH {
            let cmds: Vec<&FrameCmd> = frame
                .items()
                .iter()
                .filter(|i| i.eye == Some(eye))
                .map(|i| &i.cmd)
                .collect();

            assert!(matches!(cmds[0], FrameCmd::Isolate { .. }));
            assert!(matches!(cmds[1], FrameCmd::ClearRegion { .. }));
            assert!(matches!(cmds[2], FrameCmd::DrawParticles { .. }));
            assert!(matches!(cmds[3], FrameCmd::DrawMesh { mesh: MeshKind::FloorGrid, pass: DrawPass::Overlay, .. }));
            // 1 floating cube + 8 ring members, faces then edges each.
            let solids = &cmds[4..];
            assert_eq!(solids.len(), 18);
            for pair in solids.chunks(2) {
                assert!(matches!(pair[0], FrameCmd::DrawMesh { pass: DrawPass::SolidFaces, .. }));
                assert!(matches!(pair[1], FrameCmd::DrawMesh { mesh: MeshKind::CubeEdges, .. }));
            }
        }
    }

    fn clears(frame: &Frame) -> Vec<(Option<Eye>, Color)> {
        frame
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                FrameCmd::ClearSurface { color } | FrameCmd::ClearRegion { color } => Some((i.eye, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn each_eye_is_isolated_to_its_half() {
        let frame = compose(&Scene::demo(3), ViewMode::Scene);
        let surface = frame.surface();
        let isolations: Vec<_> = frame
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                FrameCmd::Isolate { eye, rect } => Some((*eye, *rect)),
                _ => None,
            })
            .collect();
        assert_eq!(
            isolations,
            vec![
                (Eye::Left, surface.eye_rect(Eye::Left)),
                (Eye::Right, surface.eye_rect(Eye::Right)),
            ]
        );
    }

    #[test]
    fn demo_clears_everything_to_the_background() {
        let frame = compose(&Scene::demo(1), ViewMode::Scene);
        let bg = Color::rgb(0.0, 0.0, 0.02);
        assert_eq!(clears(&frame), vec![(None, bg), (Some(Eye::Left), bg), (Some(Eye::Right), bg)]);
    }

    #[test]
    fn cube_preset_tints_each_eye() {
        let frame = Compositor::new(ClearColors::for_preset(ScenePreset::Cube)).compose(
            &Scene::cube(),
            &StereoCameraConfig::default(),
            StereoMode::ParallelAxis,
            ViewMode::Scene,
            SurfaceSize::SBS_1080P,
        );
        assert_eq!(
            clears(&frame),
            vec![
                (None, Color::rgb(0.0, 0.0, 0.1)),
                (Some(Eye::Left), Color::rgb(0.1, 0.0, 0.0)),
                (Some(Eye::Right), Color::rgb(0.0, 0.0, 0.1)),
            ]
        );
    }

    #[test]
    fn preset_clears_keep_the_test_pattern_tints() {
        let cube = ClearColors::for_preset(ScenePreset::Cube);
        let demo = ClearColors::for_preset(ScenePreset::Demo);
        assert_eq!(cube.pattern_eye(Eye::Left), demo.pattern_eye(Eye::Left));
        assert_eq!(cube.pattern_eye(Eye::Right), demo.pattern_eye(Eye::Right));
        assert_eq!(demo, ClearColors::default());
    }

    #[test]
    fn particles_are_shared_by_both_eyes() {
        let frame = compose(&Scene::demo(5), ViewMode::Scene);
        assert_eq!(frame.particles().len(), 200);
        let ranges: Vec<_> = frame
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                FrameCmd::DrawParticles { instances, .. } => Some(instances.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(ranges, vec![0..200, 0..200]);
    }

    #[test]
    fn eye_cameras_differ_only_by_eye() {
        let frame = compose(&Scene::cube(), ViewMode::Scene);
        let mvps: Vec<Mat4> = frame
            .items()
            .iter()
            .filter_map(|i| match &i.cmd {
                FrameCmd::DrawMesh { pass: DrawPass::SolidFaces, mvp, .. } => Some(*mvp),
                _ => None,
            })
            .collect();
        assert_eq!(mvps.len(), 2);
        assert_ne!(mvps[0], mvps[1]);
        // Same row 1 (vertical) for both eyes under parallel-axis.
        assert_eq!(mvps[0].row(1), mvps[1].row(1));
    }

    #[test]
    fn palette_cube_is_not_tinted() {
        let frame = compose(&Scene::cube(), ViewMode::Scene);
        let tint = frame.items().iter().find_map(|i| match &i.cmd {
            FrameCmd::DrawMesh { mesh: MeshKind::PaletteCubeFaces, tint, .. } => Some(*tint),
            _ => None,
        });
        assert_eq!(tint, Some(Color::WHITE));
    }

    #[test]
    fn test_pattern_tints_each_eye() {
        let frame = compose(&Scene::demo(1), ViewMode::TestPattern);
        assert_eq!(
            clears(&frame),
            vec![
                (None, Color::rgb(0.0, 0.0, 0.1)),
                (Some(Eye::Left), Color::rgb(0.3, 0.0, 0.0)),
                (Some(Eye::Right), Color::rgb(0.0, 0.0, 0.3)),
            ]
        );
        assert!(frame.particles().is_empty());
        assert_eq!(frame.eye_order(), vec![Eye::Left, Eye::Right]);
    }

    #[test]
    fn compose_does_not_touch_camera() {
        let camera = StereoCameraConfig::default();
        let before = camera;
        let _ = Compositor::default().compose(
            &Scene::cube(),
            &camera,
            StereoMode::asymmetric(),
            ViewMode::Scene,
            SurfaceSize::SBS_1080P,
        );
        assert_eq!(camera, before);
    }
}
