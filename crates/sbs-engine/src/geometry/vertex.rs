use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Mesh vertex: object-space position plus straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: [f32; 3], color: Color) -> Self {
        Self { position, color: color.to_array() }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Unit billboard corner, expanded in the vertex shader.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CornerVertex {
    pub corner: [f32; 2], // -1..1
}

impl CornerVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CornerVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const BILLBOARD_CORNERS: [CornerVertex; 4] = [
    CornerVertex { corner: [-1.0, -1.0] },
    CornerVertex { corner: [1.0, -1.0] },
    CornerVertex { corner: [1.0, 1.0] },
    CornerVertex { corner: [-1.0, 1.0] },
];

pub const BILLBOARD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Per-particle instance data.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    /// Billboard edge length in pixels.
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x3, // position
        2 => Float32,   // size
        3 => Float32x4  // color
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
