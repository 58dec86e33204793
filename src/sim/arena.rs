//! Static arena geometry: boundary walls and cover blocks
//!
//! Built once from the world config and shared read-only by player
//! collision and enemy line-of-sight checks.

use glam::Vec3;

use super::geometry::{Aabb, Ray};
use crate::config::WorldConfig;

/// What an obstacle is, for rendering and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Wall,
    Cover,
}

/// An immutable collidable box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub bounds: Aabb,
}

/// The fixed obstacle set
#[derive(Debug, Clone)]
pub struct Arena {
    half_extent: f32,
    obstacles: Vec<Obstacle>,
}

impl Arena {
    /// Four boundary walls plus one cover block per layout entry, all resting on y = 0
    pub fn from_config(config: &WorldConfig) -> Self {
        let h = config.arena_half_extent;
        let t = config.wall_thickness;
        let wall_y = config.wall_height / 2.0;
        // Walls overlap at the corners so there are no gaps
        let long = h + t;

        let mut obstacles = vec![
            wall(Vec3::new(0.0, wall_y, -h), Vec3::new(long, wall_y, t / 2.0)),
            wall(Vec3::new(0.0, wall_y, h), Vec3::new(long, wall_y, t / 2.0)),
            wall(Vec3::new(-h, wall_y, 0.0), Vec3::new(t / 2.0, wall_y, long)),
            wall(Vec3::new(h, wall_y, 0.0), Vec3::new(t / 2.0, wall_y, long)),
        ];

        let half_cover = config.cover_size / 2.0;
        obstacles.extend(config.cover_layout.iter().map(|&(x, z)| Obstacle {
            kind: ObstacleKind::Cover,
            bounds: Aabb::new(
                Vec3::new(x, wall_y, z),
                Vec3::new(half_cover, wall_y, half_cover),
            ),
        }));

        log::debug!(
            "Arena built: half extent {}, {} obstacles",
            h,
            obstacles.len()
        );

        Self {
            half_extent: h,
            obstacles,
        }
    }

    /// Arena with an explicit obstacle set
    pub fn with_obstacles(half_extent: f32, obstacles: Vec<Obstacle>) -> Self {
        Self {
            half_extent,
            obstacles,
        }
    }

    pub fn half_extent(&self) -> f32 {
        self.half_extent
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// True if `bounds` overlaps any obstacle
    pub fn overlaps(&self, bounds: &Aabb) -> bool {
        self.obstacles.iter().any(|o| o.bounds.overlaps(bounds))
    }

    /// Distance to the nearest obstacle along `ray`, if one is closer than `max_dist`
    pub fn first_hit(&self, ray: &Ray, max_dist: f32) -> Option<f32> {
        self.obstacles
            .iter()
            .filter_map(|o| o.bounds.ray_entry(ray))
            .filter(|&t| t < max_dist)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// True if nothing blocks the straight line from `from` to `to`
    pub fn line_of_sight(&self, from: Vec3, to: Vec3) -> bool {
        match Ray::between(from, to) {
            Some((ray, dist)) => self.first_hit(&ray, dist).is_none(),
            None => true,
        }
    }
}

fn wall(center: Vec3, half_extents: Vec3) -> Obstacle {
    Obstacle {
        kind: ObstacleKind::Wall,
        bounds: Aabb::new(center, half_extents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let arena = Arena::from_config(&WorldConfig::default());
        let walls = arena
            .obstacles()
            .iter()
            .filter(|o| o.kind == ObstacleKind::Wall)
            .count();
        assert_eq!(walls, 4);
        assert_eq!(arena.obstacles().len(), 4 + 8);
    }

    #[test]
    fn test_spawn_point_is_clear() {
        let arena = Arena::from_config(&WorldConfig::default());
        let player_box = Aabb::from_size(Vec3::new(0.0, 10.0, 0.0), Vec3::new(2.0, 10.0, 2.0));
        assert!(!arena.overlaps(&player_box));
    }

    #[test]
    fn test_cover_blocks_line_of_sight() {
        let arena = Arena::from_config(&WorldConfig::default());
        // Cover at (40, 40), size 10: sight line along z = 40 crosses it
        assert!(!arena.line_of_sight(Vec3::new(20.0, 6.0, 40.0), Vec3::new(60.0, 6.0, 40.0)));
        // Sight line along z = 20 is clear
        assert!(arena.line_of_sight(Vec3::new(20.0, 6.0, 20.0), Vec3::new(-20.0, 6.0, 20.0)));
    }

    #[test]
    fn test_first_hit_respects_max_distance() {
        let arena = Arena::from_config(&WorldConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X).unwrap();
        // Cover at (60, 0) starts at x = 55
        let t = arena.first_hit(&ray, 1000.0).unwrap();
        assert!((t - 55.0).abs() < 1e-4);
        assert!(arena.first_hit(&ray, 50.0).is_none());
    }
}
