//! Math utilities and types for 3D graphics and game logic.
//!
//! This module provides matrix and vector types and operations, the grid/world
//! coordinate mapping, and helper functions for angle conversions. The matrix
//! and vector types are `bytemuck::Pod` so they can be written straight into
//! GPU uniform buffers.
//!
//! # Module Organization
//!
//! - [`vec`] module contains the vector types
//! - [`mat`] module contains the 4x4 matrix type
//! - [`coordinates`] maps grid cells to world space and back

pub mod coordinates;
pub mod mat;
pub mod vec;

/// Converts degrees to radians.
///
/// The input is first reduced modulo 360, so very large accumulated angles
/// (an unbounded yaw, for example) keep their precision. The sign is kept.
///
/// # Arguments
///
/// * `degrees` - The angle in degrees (can be any finite value)
///
/// # Returns
///
/// The angle in radians in range (-2π, 2π)
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}
