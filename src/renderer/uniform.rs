//! Uniform buffer utilities for wgpu rendering.
//!
//! This module provides the [`SceneUniforms`] struct holding everything the
//! scene shader needs per frame: the view-projection matrix, the eye position
//! and the flashlight, plus helpers for buffer and bind group creation.

use crate::game::player::Player;
use crate::renderer::pipeline_builder::BindGroupLayoutBuilder;
use wgpu::util::DeviceExt;

/// Light applied to every fragment regardless of the flashlight.
pub const AMBIENT_LIGHT: f32 = 0.08;

/// Per-frame uniforms for the scene pipeline.
///
/// Vectors are padded to `vec4` to match WGSL uniform alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    /// Projection times view, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// Render (eye) position, `w` unused.
    pub camera_pos: [f32; 4],
    /// Flashlight position, `w` unused.
    pub light_pos: [f32; 4],
    /// Unit beam direction, `w` unused.
    pub light_dir: [f32; 4],
    /// `x` cosine of the cutoff, `y` range, `z` ambient, `w` unused.
    pub light_params: [f32; 4],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: [[0.0; 4]; 4],
            camera_pos: [0.0; 4],
            light_pos: [0.0; 4],
            light_dir: [0.0; 4],
            light_params: [1.0, 0.0, AMBIENT_LIGHT, 0.0],
        }
    }
}

fn pad(v: [f32; 3]) -> [f32; 4] {
    [v[0], v[1], v[2], 0.0]
}

impl SceneUniforms {
    /// Snapshot of the player's camera and flashlight for this frame.
    pub fn from_player(player: &Player, aspect_ratio: f32) -> Self {
        let light = player.flashlight();
        Self {
            view_proj: player.view_proj_matrix(aspect_ratio).into(),
            camera_pos: pad(player.render_position().into()),
            light_pos: pad(light.position.into()),
            light_dir: pad(light.direction.into()),
            light_params: [light.cutoff_cos, light.range, AMBIENT_LIGHT, 0.0],
        }
    }

    /// Returns the raw bytes of the uniform struct for uploading to the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Creates a GPU buffer containing the uniform data.
    pub fn create_buffer(&self, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: self.as_bytes(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        })
    }

    /// Creates a bind group and layout for the uniform buffer.
    ///
    /// # Returns
    /// A tuple of (`wgpu::BindGroup`, `wgpu::BindGroupLayout`), visible to both
    /// shader stages.
    pub fn create_bind_group(
        &self,
        buffer: &wgpu::Buffer,
        device: &wgpu::Device,
    ) -> (wgpu::BindGroup, wgpu::BindGroupLayout) {
        let layout = BindGroupLayoutBuilder::new(device)
            .with_label("scene_uniform_bind_group_layout")
            .with_uniform_buffer(0, wgpu::ShaderStages::VERTEX_FRAGMENT)
            .build();
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("scene_uniform_bind_group"),
        });
        (bind_group, layout)
    }
}
