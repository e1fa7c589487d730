//! Level layouts and the bitmap source interface

use serde::{Deserialize, Serialize};

use super::triggers::{Door, EnemySpawn, Killbox, LevelGeometry};
use crate::config::Config;
use crate::foundation::math::Vec2;
use crate::render::MonoBitmap;

/// Supplies the terrain bitmap for a level index
///
/// The bitmap is placed with its bottom-left corner at the world origin.
pub trait LevelSource {
    /// Terrain of `level`, `None` when the level has no art
    fn bitmap(&self, level: usize) -> Option<&MonoBitmap>;
}

impl LevelSource for Vec<MonoBitmap> {
    fn bitmap(&self, level: usize) -> Option<&MonoBitmap> {
        self.get(level)
    }
}

/// Trigger and spawn description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    /// Player start (x, top)
    pub spawn: Vec2,
    /// Doors to other levels
    #[serde(default)]
    pub doors: Vec<Door>,
    /// Fatal regions
    #[serde(default)]
    pub killboxes: Vec<Killbox>,
    /// Patrolling enemies
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
}

impl LevelLayout {
    /// Layout with only a spawn point
    pub fn new(spawn_x: f32, spawn_top: f32) -> Self {
        Self {
            spawn: Vec2::new(spawn_x, spawn_top),
            doors: Vec::new(),
            killboxes: Vec::new(),
            enemies: Vec::new(),
        }
    }

    /// Add a door
    pub fn with_door(mut self, door: Door) -> Self {
        self.doors.push(door);
        self
    }

    /// Add a killbox
    pub fn with_killbox(mut self, killbox: Killbox) -> Self {
        self.killboxes.push(killbox);
        self
    }

    /// Add an enemy
    pub fn with_enemy(mut self, enemy: EnemySpawn) -> Self {
        self.enemies.push(enemy);
        self
    }

    /// Build the bounded trigger lists; returns the geometry and how many entries were dropped
    pub fn build_geometry(&self) -> (LevelGeometry, usize) {
        let mut geometry = LevelGeometry::new();
        let mut outcomes = Vec::new();
        for door in &self.doors {
            outcomes.push(geometry.add_door(*door));
        }
        for killbox in &self.killboxes {
            outcomes.push(geometry.add_killbox(*killbox));
        }
        for enemy in &self.enemies {
            outcomes.push(geometry.add_enemy(*enemy));
        }
        let dropped = outcomes.iter().filter(|outcome| outcome.is_dropped()).count();
        (geometry, dropped)
    }
}

/// Ordered set of level layouts, indexed by level number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalogue {
    /// Layouts by index
    pub levels: Vec<LevelLayout>,
}

impl LevelCatalogue {
    /// Layout of `level`
    pub fn get(&self, level: usize) -> Option<&LevelLayout> {
        self.levels.get(level)
    }

    /// Number of levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no levels
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The six levels shipped with the board
    pub fn board_levels() -> Self {
        let levels = vec![
            LevelLayout::new(60.0, 80.0).with_door(Door::new(100, 80, 20, 30, 1)),
            LevelLayout::new(20.0, 107.0)
                .with_door(Door::new(10, 86, 10, 24, 0))
                .with_door(Door::new(118, 11, 10, 24, 2))
                .with_killbox(Killbox::new(64, 64, 10, 55)),
            LevelLayout::new(20.0, 35.0)
                .with_door(Door::new(0, 8, 10, 24, 1))
                .with_door(Door::new(101, 94, 10, 24, 3))
                .with_killbox(Killbox::new(0, 70, 8, 54))
                .with_killbox(Killbox::new(93, 60, 33, 8))
                .with_enemy(EnemySpawn::new(63.0, 55.0, 63.0, 79.0, 1.0, 1)),
            LevelLayout::new(26.0, 112.0)
                .with_door(Door::new(10, 93, 10, 24, 2))
                .with_door(Door::new(118, 11, 10, 90, 4))
                .with_enemy(EnemySpawn::new(0.0, 33.0, 0.0, 54.0, 1.0, 1))
                .with_enemy(EnemySpawn::new(86.0, 33.0, 86.0, 118.0, 1.0, 1)),
            LevelLayout::new(12.0, 41.0)
                .with_door(Door::new(0, 20, 10, 24, 3))
                .with_door(Door::new(118, 40, 10, 50, 5))
                .with_enemy(EnemySpawn::new(62.0, 55.0, 62.0, 85.0, 1.0, 1)),
            LevelLayout::new(8.0, 73.0)
                .with_door(Door::new(0, 48, 3, 50, 4))
                .with_door(Door::new(123, 48, 4, 50, 0))
                .with_killbox(Killbox::new(0, 95, 32, 9))
                .with_killbox(Killbox::new(95, 95, 32, 9))
                .with_killbox(Killbox::new(0, 0, 127, 30))
                .with_enemy(EnemySpawn::new(46.0, 95.0, 46.0, 71.0, 1.0, 1))
                .with_enemy(EnemySpawn::new(94.0, 67.0, 94.0, 118.0, 1.0, 1)),
        ];
        Self { levels }
    }
}

impl Default for LevelCatalogue {
    fn default() -> Self {
        Self::board_levels()
    }
}

impl Config for LevelCatalogue {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_levels_fit_capacity() {
        let catalogue = LevelCatalogue::board_levels();
        assert_eq!(catalogue.len(), 6);
        for (index, layout) in catalogue.levels.iter().enumerate() {
            let (geometry, dropped) = layout.build_geometry();
            assert_eq!(dropped, 0, "level {index}");
            assert_eq!(geometry.doors().len(), layout.doors.len());
            for door in geometry.doors() {
                assert!(door.target < catalogue.len());
                assert_ne!(door.target, index);
            }
        }
    }

    #[test]
    fn test_overfull_layout_reports_drops() {
        let mut layout = LevelLayout::new(0.0, 0.0);
        for i in 0..12 {
            layout = layout.with_killbox(Killbox::new(i, 0, 1, 1));
        }
        let (geometry, dropped) = layout.build_geometry();
        assert_eq!(dropped, 2);
        assert_eq!(geometry.killboxes().len(), 10);
    }

    #[test]
    fn test_catalogue_ron_round_trip() {
        let catalogue = LevelCatalogue::board_levels();
        let text = ron::ser::to_string(&catalogue).unwrap();
        let parsed = LevelCatalogue::from_str_with_format(&text, "levels.ron").unwrap();
        assert_eq!(parsed, catalogue);
    }

    #[test]
    fn test_vec_level_source() {
        let source = vec![MonoBitmap::from_fn(8, 8, |_, r| r == 7).unwrap()];
        assert!(source.bitmap(0).is_some());
        assert!(source.bitmap(1).is_none());
    }
}
