//! Main renderer for the 3D maze.
//!
//! The [`GameRenderer`] draws the static map geometry (floor, walls and
//! ceiling) from one combined vertex buffer built at start-up, then the props
//! (collectables and cars) from a dynamic buffer rewritten every frame. Both
//! go through a single pipeline with depth testing and no face culling.
//!
//! ## Bind Groups
//!
//! - Group 0: [`SceneUniforms`] (camera and flashlight)
//! - Group 1: floor, wall and ceiling textures plus one repeating sampler

use crate::config::TextureConfig;
use crate::game::GameState;
use crate::maze::GridMap;
use crate::renderer::pipeline_builder::{BindGroupLayoutBuilder, PipelineBuilder, opaque_depth_state};
use crate::renderer::texture;
use crate::renderer::uniform::SceneUniforms;
use crate::renderer::vertex::{self, Vertex};
use wgpu::util::DeviceExt;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

/// Vertices in one prop cube.
const BOX_VERTEX_COUNT: usize = 36;

const COLLECTABLE_COLOR: [u8; 4] = [240, 200, 60, 255];
const CAR_COLOR: [u8; 4] = [180, 40, 35, 255];

/// Floor, ceiling and walls for `map` in one list.
pub fn static_vertices(map: &GridMap) -> Vec<Vertex> {
    let mut vertices = vertex::create_floor_vertices(map);
    vertices.append(&mut vertex::create_ceiling_vertices(map));
    vertices.append(&mut vertex::create_wall_vertices(map));
    vertices
}

/// Cubes for every remaining collectable and every car, at their current pose.
pub fn prop_vertices(game_state: &GameState) -> Vec<Vertex> {
    let collectables = game_state
        .collectables
        .items()
        .iter()
        .map(|item| (item.model_matrix(), COLLECTABLE_COLOR));
    let cars = game_state
        .cars
        .cars()
        .iter()
        .map(|car| (car.model_matrix(), CAR_COLOR));

    collectables
        .chain(cars)
        .flat_map(|(model, color)| vertex::create_box_vertices(&model, color))
        .collect()
}

pub struct GameRenderer {
    pub pipeline: wgpu::RenderPipeline,
    /// Floor, ceiling and walls. Never rewritten.
    pub static_buffer: wgpu::Buffer,
    pub static_vertex_count: u32,
    /// Props, rewritten each frame.
    pub prop_buffer: wgpu::Buffer,
    /// Capacity of `prop_buffer` in vertices.
    pub prop_capacity: usize,
    pub prop_vertex_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub uniform_bind_group: wgpu::BindGroup,
    pub texture_bind_group: wgpu::BindGroup,
    /// Recreated when the surface size changes.
    pub depth_texture: Option<wgpu::Texture>,
}

impl GameRenderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_config: &wgpu::SurfaceConfiguration,
        game_state: &GameState,
        textures: &TextureConfig,
    ) -> Self {
        let uniforms = SceneUniforms::default();
        let uniform_buffer = uniforms.create_buffer(device);
        let (uniform_bind_group, uniform_bind_group_layout) =
            uniforms.create_bind_group(&uniform_buffer, device);

        let texture_layout = BindGroupLayoutBuilder::new(device)
            .with_label("Scene Texture Layout")
            .with_texture(0, wgpu::ShaderStages::FRAGMENT)
            .with_texture(1, wgpu::ShaderStages::FRAGMENT)
            .with_texture(2, wgpu::ShaderStages::FRAGMENT)
            .with_sampler(3, wgpu::ShaderStages::FRAGMENT)
            .build();
        let texture_bind_group = create_texture_bind_group(device, queue, &texture_layout, textures);

        let pipeline = PipelineBuilder::new(
            device,
            surface_config.format,
            include_str!("shaders/scene.wgsl"),
        )
        .with_label("Scene Pipeline")
        .with_vertex_buffer(Vertex::desc())
        .with_bind_group_layout(&uniform_bind_group_layout)
        .with_bind_group_layout(&texture_layout)
        .with_no_culling()
        .with_depth_stencil(opaque_depth_state(DEPTH_FORMAT))
        .build();

        let static_vertices = static_vertices(&game_state.map);
        let static_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Static Scene Vertex Buffer"),
            contents: bytemuck::cast_slice(&static_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::info!("Built {} static scene vertices", static_vertices.len());

        // Props only ever disappear, so the initial count bounds the buffer.
        let prop_count = game_state.collectables.remaining() + game_state.cars.cars().len();
        let prop_capacity = prop_count.max(1) * BOX_VERTEX_COUNT;
        let prop_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Prop Vertex Buffer"),
            size: (prop_capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            static_buffer,
            static_vertex_count: static_vertices.len() as u32,
            prop_buffer,
            prop_capacity,
            prop_vertex_count: 0,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            depth_texture: None,
        }
    }

    /// Returns a depth view matching `width` x `height`, recreating the
    /// texture if the size changed.
    pub fn update_depth_texture(
        &mut self,
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = match self.depth_texture.take() {
            Some(texture) if texture.width() == width && texture.height() == height => texture,
            _ => device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }),
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.depth_texture = Some(texture);
        view
    }

    /// Uploads this frame's uniforms and props. Must run before the pass is
    /// recorded.
    pub fn prepare(&mut self, queue: &wgpu::Queue, game_state: &GameState, aspect: f32) {
        let uniforms = SceneUniforms::from_player(&game_state.player, aspect);
        queue.write_buffer(&self.uniform_buffer, 0, uniforms.as_bytes());

        let mut props = prop_vertices(game_state);
        props.truncate(self.prop_capacity);
        if !props.is_empty() {
            queue.write_buffer(&self.prop_buffer, 0, bytemuck::cast_slice(&props));
        }
        self.prop_vertex_count = props.len() as u32;
    }

    /// Records the static geometry and the props into `pass`.
    pub fn render(&self, pass: &mut wgpu::RenderPass) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);

        pass.set_vertex_buffer(0, self.static_buffer.slice(..));
        pass.draw(0..self.static_vertex_count, 0..1);

        if self.prop_vertex_count > 0 {
            pass.set_vertex_buffer(0, self.prop_buffer.slice(..));
            pass.draw(0..self.prop_vertex_count, 0..1);
        }
    }
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    textures: &TextureConfig,
) -> wgpu::BindGroup {
    let floor = texture::decode_or_fallback(textures.floor_texture_path.as_deref(), texture::FLOOR_FALLBACK);
    let wall = texture::decode_or_fallback(textures.wall_texture_path.as_deref(), texture::WALL_FALLBACK);
    let ceiling = texture::decode_or_fallback(
        textures.ceiling_texture_path.as_deref(),
        texture::CEILING_FALLBACK,
    );

    let floor_view = texture::upload_texture(device, queue, &floor, "Floor Texture");
    let wall_view = texture::upload_texture(device, queue, &wall, "Wall Texture");
    let ceiling_view = texture::upload_texture(device, queue, &ceiling, "Ceiling Texture");
    let sampler = texture::create_repeat_sampler(device);

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Scene Texture Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&floor_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&wall_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(&ceiling_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}
