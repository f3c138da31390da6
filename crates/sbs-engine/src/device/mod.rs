//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain) and its depth buffer
//! - acquiring frames and providing encoders/views for rendering
//! - mapping surface errors to recovery actions

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction, DEPTH_FORMAT};
