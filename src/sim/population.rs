//! Enemy population manager
//!
//! Owns the live agents, hands out ids, and keeps the head count at the
//! configured floor by spawning one replacement per missing agent.

use glam::Vec3;

use super::enemy::{Enemy, EnemyId};
use super::geometry::Ray;
use super::random::RandomSource;
use crate::config::WorldConfig;

/// Rejection-sampling attempts before falling back to the exclusion edge
const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// The set of live enemy agents (kept in spawn order)
#[derive(Debug, Clone)]
pub struct Population {
    enemies: Vec<Enemy>,
    target_count: usize,
    next_id: u32,
}

impl Population {
    pub fn new(target_count: usize) -> Self {
        Self {
            enemies: Vec::with_capacity(target_count),
            target_count,
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Insert an agent at an explicit position
    pub fn spawn_at(&mut self, position: Vec3) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::new(id, position));
        log::debug!("Spawned enemy {:?} at {:?}", id, position);
        id
    }

    /// Spawn one agent at a random point outside the exclusion zone around `origin`
    pub fn spawn(
        &mut self,
        config: &WorldConfig,
        origin: Vec3,
        rng: &mut impl RandomSource,
    ) -> EnemyId {
        let position = spawn_point(config, origin, rng);
        self.spawn_at(position)
    }

    /// Spawn replacements until the target count is met. Returns how many spawned.
    pub fn replenish(
        &mut self,
        config: &WorldConfig,
        origin: Vec3,
        rng: &mut impl RandomSource,
    ) -> usize {
        let missing = self.target_count.saturating_sub(self.enemies.len());
        for _ in 0..missing {
            self.spawn(config, origin, rng);
        }
        missing
    }

    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Drop every agent whose health is gone. Returns how many were removed.
    pub fn remove_dead(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        before - self.enemies.len()
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
    }

    /// Nearest live agent whose hitbox the ray enters, with the entry distance.
    ///
    /// Equal distances resolve to the earliest-spawned agent.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(EnemyId, f32)> {
        self.enemies
            .iter()
            .filter(|e| !e.is_dead())
            .filter_map(|e| e.bounds().ray_entry(ray).map(|t| (e.id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Uniform point in the spawn square, outside the exclusion square around `origin`
pub fn spawn_point(config: &WorldConfig, origin: Vec3, rng: &mut impl RandomSource) -> Vec3 {
    let extent = config.spawn_extent;
    let exclusion = config.spawn_exclusion;

    let mut x = 0.0;
    let mut z = 0.0;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        x = rng.range(-extent, extent);
        z = rng.range(-extent, extent);
        if (x - origin.x).abs() > exclusion || (z - origin.z).abs() > exclusion {
            return Vec3::new(x, config.enemy_height, z);
        }
    }

    // Out of attempts: push the last sample out past the exclusion edge on x
    let side = if x >= origin.x { 1.0 } else { -1.0 };
    x = origin.x + side * (exclusion + extent) / 2.0;
    log::debug!("Spawn sampling exhausted, using fallback point");
    Vec3::new(x, config.enemy_height, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_outside_exclusion() {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = spawn_point(&config, Vec3::ZERO, &mut rng);
            assert!(p.x.abs() <= 80.0 && p.z.abs() <= 80.0);
            assert!(p.x.abs() > 20.0 || p.z.abs() > 20.0);
            assert_eq!(p.y, 6.0);
        }
    }

    #[test]
    fn test_spawn_rejects_samples_in_exclusion() {
        let config = WorldConfig::default();
        // First pair lands at (0, 0), second at (40, -40)
        let mut rng = ScriptedRandom::new([0.5, 0.5, 0.75, 0.25]);
        let p = spawn_point(&config, Vec3::ZERO, &mut rng);
        assert!(p.abs_diff_eq(Vec3::new(40.0, 6.0, -40.0), 1e-4));
    }

    #[test]
    fn test_spawn_fallback_terminates() {
        let config = WorldConfig::default();
        let mut rng = ScriptedRandom::constant(0.5);
        let p = spawn_point(&config, Vec3::ZERO, &mut rng);
        assert_eq!(p, Vec3::new(50.0, 6.0, 0.0));
    }

    #[test]
    fn test_replenish_fills_each_gap() {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut population = Population::new(5);
        assert_eq!(population.replenish(&config, Vec3::ZERO, &mut rng), 5);

        let ids: Vec<_> = population.iter().take(3).map(|e| e.id).collect();
        for enemy in population.iter_mut().take(3) {
            enemy.health = 0;
        }
        assert_eq!(population.remove_dead(), 3);
        assert_eq!(population.len(), 2);

        assert_eq!(population.replenish(&config, Vec3::ZERO, &mut rng), 3);
        assert_eq!(population.len(), 5);
        // Fresh ids, never reused
        assert!(population.iter().all(|e| !ids.contains(&e.id)));
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let mut population = Population::new(0);
        let far = population.spawn_at(Vec3::new(0.0, 6.0, -40.0));
        let near = population.spawn_at(Vec3::new(0.0, 6.0, -20.0));
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Z).unwrap();

        let (id, dist) = population.nearest_hit(&ray).unwrap();
        assert_eq!(id, near);
        assert!((dist - 18.0).abs() < 1e-4);

        population.remove(near);
        assert_eq!(population.nearest_hit(&ray).map(|h| h.0), Some(far));
    }

    #[test]
    fn test_nearest_hit_misses() {
        let mut population = Population::new(0);
        population.spawn_at(Vec3::new(30.0, 6.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Z).unwrap();
        assert!(population.nearest_hit(&ray).is_none());
    }
}
