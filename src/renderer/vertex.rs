//! Vertex definitions and geometry generation for the maze scene.
//!
//! This module provides the [`Vertex`] struct, which describes the layout of
//! vertex data for the scene pipeline, and functions that turn a [`GridMap`]
//! into floor, ceiling and wall triangles. Props are unit cubes transformed
//! on the CPU by their model matrix.

use crate::math::coordinates::constants::{CELL_SIZE, WALL_HEIGHT};
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;
use crate::maze::{CellType, GridMap};

/// Material ids understood by `scene.wgsl`.
pub mod material {
    pub const FLOOR: u32 = 0;
    pub const WALL: u32 = 1;
    pub const CEILING: u32 = 2;
    /// Untextured, coloured by the vertex colour only.
    pub const PROP: u32 = 3;
}

const WHITE: [u8; 4] = [255, 255, 255, 255];

/// Vertex data for the scene pipeline.
///
/// Each vertex contains:
/// - `position`: 3D position in world space.
/// - `normal`: Unit surface normal in world space.
/// - `uv`: Texture coordinates; walls and floor repeat once per cell.
/// - `color`: RGBA tint (normalized 0-255).
/// - `material`: One of the [`material`] ids.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [u8; 4],
    pub material: u32,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Unorm8x4,
        4 => Uint32
    ];

    /// Returns the vertex buffer layout for use in a wgpu pipeline.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Appends two triangles for the quad `a b c d` (in winding order).
fn push_quad(
    out: &mut Vec<Vertex>,
    corners: [Vec3; 4],
    uvs: [[f32; 2]; 4],
    normal: Vec3,
    color: [u8; 4],
    material: u32,
) {
    for i in [0, 1, 2, 0, 2, 3] {
        out.push(Vertex {
            position: corners[i].into(),
            normal: normal.into(),
            uv: uvs[i],
            color,
            material,
        });
    }
}

/// A horizontal quad covering the whole map at height `y`.
fn map_plane(map: &GridMap, y: f32, normal: Vec3, material: u32) -> Vec<Vertex> {
    let width = map.columns() as f32 * CELL_SIZE;
    let depth = map.rows() as f32 * CELL_SIZE;
    let (u_max, v_max) = (map.columns() as f32, map.rows() as f32);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            Vec3::new(0.0, y, 0.0),
            Vec3::new(0.0, y, depth),
            Vec3::new(width, y, depth),
            Vec3::new(width, y, 0.0),
        ],
        [[0.0, 0.0], [0.0, v_max], [u_max, v_max], [u_max, 0.0]],
        normal,
        WHITE,
        material,
    );
    vertices
}

/// Floor at `y = 0`, textured once per cell.
pub fn create_floor_vertices(map: &GridMap) -> Vec<Vertex> {
    map_plane(map, 0.0, Vec3::UNIT_Y, material::FLOOR)
}

/// Ceiling at the wall height, facing down.
pub fn create_ceiling_vertices(map: &GridMap) -> Vec<Vertex> {
    map_plane(map, WALL_HEIGHT, -Vec3::UNIT_Y, material::CEILING)
}

/// Generates wall geometry for every wall cell.
///
/// Only faces that border a non-wall cell inside the map are emitted; faces
/// shared by two walls or facing out of the map can never be seen.
pub fn create_wall_vertices(map: &GridMap) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let is_open = |row: i64, col: i64| {
        if row < 0 || col < 0 {
            return false;
        }
        matches!(map.cell(row as usize, col as usize), Some(c) if c != CellType::Wall)
    };

    for cell in map.cells_of(CellType::Wall) {
        let (row, col) = (cell.row as i64, cell.col as i64);
        let x0 = cell.col as f32 * CELL_SIZE;
        let z0 = cell.row as f32 * CELL_SIZE;
        let (x1, z1) = (x0 + CELL_SIZE, z0 + CELL_SIZE);
        let (top, bottom) = (WALL_HEIGHT, 0.0);

        // (neighbour offset, face corners left to right as seen from outside, normal)
        let faces = [
            ((-1, 0), [(x1, z0), (x0, z0)], Vec3::new(0.0, 0.0, -1.0)),
            ((1, 0), [(x0, z1), (x1, z1)], Vec3::new(0.0, 0.0, 1.0)),
            ((0, -1), [(x0, z0), (x0, z1)], Vec3::new(-1.0, 0.0, 0.0)),
            ((0, 1), [(x1, z1), (x1, z0)], Vec3::new(1.0, 0.0, 0.0)),
        ];

        for ((dr, dc), [(ax, az), (bx, bz)], normal) in faces {
            if !is_open(row + dr, col + dc) {
                continue;
            }
            push_quad(
                &mut vertices,
                [
                    Vec3::new(ax, bottom, az),
                    Vec3::new(bx, bottom, bz),
                    Vec3::new(bx, top, bz),
                    Vec3::new(ax, top, az),
                ],
                [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                normal,
                WHITE,
                material::WALL,
            );
        }
    }
    vertices
}

/// Unit cube centred on the origin, transformed by `model` and tinted `color`.
pub fn create_box_vertices(model: &Mat4, color: [u8; 4]) -> Vec<Vertex> {
    let axes = [
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ];
    let origin = model.transform_point(Vec3::ZERO);
    let mut vertices = Vec::with_capacity(36);

    for (i, axis) in axes.iter().enumerate() {
        let u = axes[(i + 1) % 3] * 0.5;
        let v = axes[(i + 2) % 3] * 0.5;
        for sign in [1.0f32, -1.0] {
            let n = *axis * sign;
            let center = n * 0.5;
            let corners = [
                center - u * sign - v,
                center + u * sign - v,
                center + u * sign + v,
                center - u * sign + v,
            ]
            .map(|corner| model.transform_point(corner));
            let normal = (model.transform_point(n) - origin).normalize();
            push_quad(
                &mut vertices,
                corners,
                [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                normal,
                color,
                material::PROP,
            );
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_map;

    #[test]
    fn test_floor_covers_map() {
        let map = parse_map("3x2\n@  \n   ").unwrap();
        let floor = create_floor_vertices(&map);
        assert_eq!(floor.len(), 6);
        let max_x = floor.iter().map(|v| v.position[0]).fold(0.0, f32::max);
        let max_z = floor.iter().map(|v| v.position[2]).fold(0.0, f32::max);
        assert_eq!((max_x, max_z), (6.0, 4.0));
        assert!(floor.iter().all(|v| v.position[1] == 0.0 && v.normal == [0.0, 1.0, 0.0]));

        let ceiling = create_ceiling_vertices(&map);
        assert!(ceiling.iter().all(|v| v.position[1] == WALL_HEIGHT));
    }

    #[test]
    fn test_wall_faces() {
        let map = parse_map("3x3\n@  \n o \n   ").unwrap();
        assert_eq!(create_wall_vertices(&map).len(), 4 * 6);

        // Two walls side by side share a hidden face.
        let map = parse_map("4x3\n@   \n oo \n    ").unwrap();
        assert_eq!(create_wall_vertices(&map).len(), 6 * 6);

        // Faces on the map border are skipped.
        let map = parse_map("2x1\no@").unwrap();
        assert_eq!(create_wall_vertices(&map).len(), 6);
    }

    #[test]
    fn test_wall_normals_face_out() {
        let map = parse_map("3x3\n@  \n o \n   ").unwrap();
        for vertex in create_wall_vertices(&map) {
            let p = Vec3::from(vertex.position);
            let n = Vec3::from(vertex.normal);
            let to_center = Vec3::new(3.0, p.y(), 3.0) - p;
            assert!(n.dot(&to_center) < 0.0);
        }
    }

    #[test]
    fn test_box_vertices() {
        let model = Mat4::translation(5.0, 1.0, 3.0).multiply(&Mat4::scaling(2.0, 1.0, 0.5));
        let vertices = create_box_vertices(&model, [200, 30, 30, 255]);
        assert_eq!(vertices.len(), 36);
        for vertex in &vertices {
            let [x, y, z] = vertex.position;
            assert!((4.0 - 1e-5..=6.0 + 1e-5).contains(&x));
            assert!((0.5 - 1e-5..=1.5 + 1e-5).contains(&y));
            assert!((2.75 - 1e-5..=3.25 + 1e-5).contains(&z));
            assert!((Vec3::from(vertex.normal).length() - 1.0).abs() < 1e-5);
            assert_eq!(vertex.material, material::PROP);
        }
    }
}
