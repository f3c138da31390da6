use crate::paint::Color;
use crate::scene::FaceColoring;

use super::Vertex;

/// Primitive kind a mesh is drawn with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Static meshes shared by every frame.
///
/// Each kind is built once by the backend and then drawn with a per-draw
/// transform and tint.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MeshKind {
    /// Unit cube, white faces (tinted per draw).
    CubeFaces,
    /// Unit cube, one fixed color per face.
    PaletteCubeFaces,
    /// Unit cube wireframe.
    CubeEdges,
    /// Fading floor grid at `y = -5`.
    FloorGrid,
    /// 11 x 7 line grid over the unit square.
    TestGrid,
    /// Red cross at the center of the unit square.
    TestCross,
}

impl MeshKind {
    pub const ALL: [MeshKind; 6] = [
        MeshKind::CubeFaces,
        MeshKind::PaletteCubeFaces,
        MeshKind::CubeEdges,
        MeshKind::FloorGrid,
        MeshKind::TestGrid,
        MeshKind::TestCross,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn topology(self) -> Topology {
        match self {
            MeshKind::CubeFaces | MeshKind::PaletteCubeFaces => Topology::Triangles,
            _ => Topology::Lines,
        }
    }

    pub fn cube_faces(coloring: FaceColoring) -> MeshKind {
        match coloring {
            FaceColoring::Uniform => MeshKind::CubeFaces,
            FaceColoring::Palette => MeshKind::PaletteCubeFaces,
        }
    }

    pub fn build(self) -> Vec<Vertex> {
        match self {
            MeshKind::CubeFaces => cube_faces([Color::WHITE; 6]),
            MeshKind::PaletteCubeFaces => cube_faces(FaceColoring::PALETTE),
            MeshKind::CubeEdges => cube_edges(Color::WHITE),
            MeshKind::FloorGrid => floor_grid(),
            MeshKind::TestGrid => test_grid(),
            MeshKind::TestCross => test_cross(),
        }
    }
}

// ── cube ──────────────────────────────────────────────────────────────────

const H: f32 = 0.5;

/// Face corners, counter-clockwise seen from outside, in
/// front/back/left/right/top/bottom order.
const CUBE_QUADS: [[[f32; 3]; 4]; 6] = [
    [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
    [[H, -H, -H], [-H, -H, -H], [-H, H, -H], [H, H, -H]],
    [[-H, -H, -H], [-H, -H, H], [-H, H, H], [-H, H, -H]],
    [[H, -H, H], [H, -H, -H], [H, H, -H], [H, H, H]],
    [[-H, H, H], [H, H, H], [H, H, -H], [-H, H, -H]],
    [[-H, -H, -H], [H, -H, -H], [H, -H, H], [-H, -H, H]],
];

/// 36 vertices, two triangles per face.
pub fn cube_faces(colors: [Color; 6]) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(36);
    for (quad, color) in CUBE_QUADS.iter().zip(colors) {
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(Vertex::new(quad[i], color));
        }
    }
    out
}

/// 12 edges as a line list.
pub fn cube_edges(color: Color) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(24);
    for i in [-H, H] {
        for j in [-H, H] {
            out.push(Vertex::new([i, j, -H], color));
            out.push(Vertex::new([i, j, H], color));
            out.push(Vertex::new([i, -H, j], color));
            out.push(Vertex::new([i, H, j], color));
            out.push(Vertex::new([-H, i, j], color));
            out.push(Vertex::new([H, i, j], color));
        }
    }
    out
}

// ── floor grid ────────────────────────────────────────────────────────────

pub const FLOOR_Y: f32 = -5.0;
const FLOOR_COLOR: Color = Color::rgb(0.2, 0.4, 0.6);

/// Lines running away from the viewer plus cross lines, fading with distance.
pub fn floor_grid() -> Vec<Vertex> {
    let mut out = Vec::new();

    for i in (-20..=20).step_by(2) {
        let x = i as f32;
        let alpha = (1.0 - x.abs() / 25.0).max(0.0) * 0.5;
        let c = FLOOR_COLOR.with_alpha(alpha);
        out.push(Vertex::new([x, FLOOR_Y, -5.0], c));
        out.push(Vertex::new([x, FLOOR_Y, -100.0], c));
    }

    for z in (-100..0).step_by(5) {
        let z = z as f32;
        let alpha = (1.0 - z.abs() / 100.0).max(0.0) * 0.5;
        let c = FLOOR_COLOR.with_alpha(alpha);
        out.push(Vertex::new([-20.0, FLOOR_Y, z], c));
        out.push(Vertex::new([20.0, FLOOR_Y, z], c));
    }

    out
}

// ── test pattern ──────────────────────────────────────────────────────────

pub fn test_grid() -> Vec<Vertex> {
    let mut out = Vec::with_capacity(2 * (11 + 7));
    for i in 0..=10 {
        let x = i as f32 / 10.0;
        out.push(Vertex::new([x, 0.0, 0.0], Color::WHITE));
        out.push(Vertex::new([x, 1.0, 0.0], Color::WHITE));
    }
    for i in 0..=6 {
        let y = i as f32 / 6.0;
        out.push(Vertex::new([0.0, y, 0.0], Color::WHITE));
        out.push(Vertex::new([1.0, y, 0.0], Color::WHITE));
    }
    out
}

pub fn test_cross() -> Vec<Vertex> {
    vec![
        Vertex::new([0.4, 0.5, 0.0], Color::RED),
        Vertex::new([0.6, 0.5, 0.0], Color::RED),
        Vertex::new([0.5, 0.4, 0.0], Color::RED),
        Vertex::new([0.5, 0.6, 0.0], Color::RED),
    ]
}
