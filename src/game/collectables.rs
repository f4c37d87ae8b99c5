//! Collectable pickups placed on `Collectable` cells.
//!
//! Each pickup spins and hovers in place until the player's logical position
//! comes within the pickup radius, at which point it is removed and counted.

use crate::math::coordinates::cell_center;
use crate::math::mat::Mat4;
use crate::math::vec::Vec2;
use crate::math::vec::Vec3;
use crate::maze::{CellType, GridMap};

/// Resting height of a pickup's centre above the floor.
pub const BASE_HEIGHT: f32 = 0.3;
/// Edge length of the pickup cube.
pub const PICKUP_SIZE: f32 = 0.25;
/// Spin speed in degrees per second.
pub const SPIN_SPEED: f32 = 90.0;
/// Hover oscillation in radians per second.
pub const HOVER_FREQUENCY: f32 = 2.0;
pub const HOVER_AMPLITUDE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectable {
    /// Resting centre position.
    pub position: Vec3,
    /// Current spin in degrees.
    pub spin: f32,
    /// Hover phase in radians.
    pub hover_phase: f32,
}

impl Collectable {
    fn new(position: Vec3) -> Self {
        Self {
            position,
            spin: 0.0,
            hover_phase: 0.0,
        }
    }

    /// Current centre including the hover offset.
    pub fn animated_position(&self) -> Vec3 {
        self.position
            .with_y(self.position.y() + self.hover_phase.sin() * HOVER_AMPLITUDE)
    }

    /// Model matrix for a unit cube centred on the origin.
    pub fn model_matrix(&self) -> Mat4 {
        let center = self.animated_position();
        Mat4::translation(center.x(), center.y(), center.z())
            .multiply(&Mat4::rotation_y(self.spin))
            .multiply(&Mat4::scaling(PICKUP_SIZE, PICKUP_SIZE, PICKUP_SIZE))
    }
}

/// Owns the remaining pickups and the score.
#[derive(Debug, Clone)]
pub struct CollectableManager {
    items: Vec<Collectable>,
    pickup_radius: f32,
    collected: usize,
}

impl CollectableManager {
    pub fn from_map(map: &GridMap, pickup_radius: f32) -> Self {
        let items: Vec<Collectable> = map
            .cells_of(CellType::Collectable)
            .map(|cell| Collectable::new(cell_center(cell, BASE_HEIGHT)))
            .collect();
        log::info!("Placed {} collectables", items.len());
        Self {
            items,
            pickup_radius,
            collected: 0,
        }
    }

    /// Animates the pickups and collects those within reach of `player`.
    ///
    /// # Arguments
    /// * `dt` - Frame time in seconds
    /// * `player` - The player's logical position on the XZ plane
    ///
    /// # Returns
    /// The number of pickups collected this frame.
    pub fn update(&mut self, dt: f32, player: Vec2) -> usize {
        for item in &mut self.items {
            item.spin = (item.spin + SPIN_SPEED * dt) % 360.0;
            item.hover_phase =
                (item.hover_phase + HOVER_FREQUENCY * dt) % std::f32::consts::TAU;
        }

        let radius_squared = self.pickup_radius * self.pickup_radius;
        let before = self.items.len();
        self.items.retain(|item| {
            let offset = item.position.xz();
            let dx = offset.x() - player.x();
            let dz = offset.y() - player.y();
            dx * dx + dz * dz > radius_squared
        });

        let picked = before - self.items.len();
        if picked > 0 {
            self.collected += picked;
            log::info!(
                "Picked up {} item(s), score {}, {} remaining",
                picked,
                self.collected,
                self.items.len()
            );
        }
        picked
    }

    pub fn items(&self) -> &[Collectable] {
        &self.items
    }

    /// Total pickups collected so far.
    pub fn collected(&self) -> usize {
        self.collected
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::parse_map;

    fn manager() -> CollectableManager {
        CollectableManager::from_map(&parse_map("4x1\n@T T").unwrap(), 0.75)
    }

    /// Tests placement at cell centres.
    #[test]
    fn test_placement() {
        let manager = manager();
        assert_eq!(manager.remaining(), 2);
        assert_eq!(manager.items()[0].position, Vec3::new(3.0, BASE_HEIGHT, 1.0));
        assert_eq!(manager.items()[1].position, Vec3::new(7.0, BASE_HEIGHT, 1.0));
    }

    /// Tests pickup inside the radius and not outside it.
    #[test]
    fn test_pickup_radius() {
        let mut manager = manager();
        assert_eq!(manager.update(0.016, Vec2::new(2.0, 1.0)), 0);
        assert_eq!(manager.update(0.016, Vec2::new(2.3, 1.0)), 1);
        assert_eq!(manager.remaining(), 1);
        assert_eq!(manager.items()[0].position.x(), 7.0);
        assert_eq!(manager.update(0.016, Vec2::new(2.3, 1.0)), 0);
        assert_eq!(manager.collected(), 1);
    }

    /// Tests that spin and hover advance and stay wrapped.
    #[test]
    fn test_animation() {
        let mut manager = manager();
        manager.update(0.5, Vec2::new(100.0, 100.0));
        let item = manager.items()[0];
        assert!((item.spin - 45.0).abs() < 1e-4);
        assert!((item.hover_phase - 1.0).abs() < 1e-6);
        assert!(item.animated_position().y() > BASE_HEIGHT);

        for _ in 0..100 {
            manager.update(0.5, Vec2::new(100.0, 100.0));
        }
        let item = manager.items()[0];
        assert!((0.0..360.0).contains(&item.spin));
        assert!((0.0..std::f32::consts::TAU).contains(&item.hover_phase));
    }
}
