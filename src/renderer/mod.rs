//! Main renderer module.
//!
//! This module contains submodules for uniform management, vertex definitions, textures and the
//! wgpu renderer implementation.

/// Pipeline building utilities for WGPU.
pub mod pipeline_builder;
/// Scene geometry and per-frame drawing.
pub mod scene;
/// Surface texture loading.
pub mod texture;
pub mod uniform;
pub mod vertex;
/// Core WGPU device and surface management.
pub mod wgpu_lib;
