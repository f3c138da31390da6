//! Color model shared between the scene and the GPU backend.
//!
//! Colors are straight alpha in display space; the backend blends with
//! `SrcAlpha, OneMinusSrcAlpha`.

pub mod color;

pub use color::Color;
