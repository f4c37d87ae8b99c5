//! Static car props placed on `Car` cells.

use crate::math::coordinates::cell_center;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;
use crate::maze::{CellType, GridMap};

/// Uniform scale applied to every car.
pub const CAR_SCALE: f32 = 0.9;
/// Yaw every car faces, in degrees.
pub const CAR_YAW: f32 = 90.0;
/// Unscaled car body as (length, height, width).
pub const CAR_SIZE: [f32; 3] = [1.8, 0.8, 0.9];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Car {
    /// Centre of the car's footprint on the floor.
    pub position: Vec3,
    pub yaw: f32,
}

impl Car {
    /// Model matrix for a unit cube centred on the origin: scale, rotate, then
    /// translate so the body rests on the floor.
    pub fn model_matrix(&self) -> Mat4 {
        let [length, height, width] = CAR_SIZE;
        let lift = height * CAR_SCALE * 0.5;
        Mat4::translation(self.position.x(), self.position.y() + lift, self.position.z())
            .multiply(&Mat4::rotation_y(self.yaw))
            .multiply(&Mat4::scaling(
                length * CAR_SCALE,
                height * CAR_SCALE,
                width * CAR_SCALE,
            ))
    }
}

/// Cars are decoration only and take no part in collision.
#[derive(Debug, Default, Clone)]
pub struct CarManager {
    cars: Vec<Car>,
}

impl CarManager {
    pub fn from_map(map: &GridMap) -> Self {
        let cars: Vec<Car> = map
            .cells_of(CellType::Car)
            .map(|cell| Car {
                position: cell_center(cell, 0.0),
                yaw: CAR_YAW,
            })
            .collect();
        log::info!("Placed {} cars", cars.len());
        Self { cars }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }
}
