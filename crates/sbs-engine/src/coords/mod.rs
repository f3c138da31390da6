//! Pixel-space geometry shared by the compositor and the GPU backend.
//!
//! Canonical surface space:
//! - Physical pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The left eye owns `[0, width/2)` and the right eye `[width/2, width)`.

mod rect;
mod surface;

pub use rect::Rect;
pub use surface::SurfaceSize;
