//! Killboxes, doors and patrolling enemies of the active level
//!
//! The lists are bounded. Adding past capacity drops the entry and reports
//! [`PushOutcome::Dropped`].

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::foundation::collections::{BoundedVec, PushOutcome};
use crate::foundation::math::utils::truncate_to_pixel;

/// Killboxes per level
pub const MAX_KILLBOXES: usize = 10;
/// Doors per level
pub const MAX_DOORS: usize = 5;
/// Enemies per level
pub const MAX_ENEMIES: usize = 8;

/// Region that kills the player on overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Killbox {
    /// Trigger area
    pub area: Rect,
}

impl Killbox {
    /// Create a killbox
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            area: Rect::new(x, y, width, height),
        }
    }
}

/// Region that moves the player to another level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// Trigger area
    pub area: Rect,
    /// Level index loaded on entry
    pub target: usize,
}

impl Door {
    /// Create a door
    pub const fn new(x: i32, y: i32, width: i32, height: i32, target: usize) -> Self {
        Self {
            area: Rect::new(x, y, width, height),
            target,
        }
    }
}

/// Where an enemy starts and how it patrols
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    /// Start x
    pub x: f32,
    /// Fixed y (top of the body)
    pub y: f32,
    /// Left patrol bound
    pub x1: f32,
    /// Right patrol bound
    pub x2: f32,
    /// Pixels per frame
    pub speed: f32,
    /// 1 for right, -1 for left
    pub direction: i8,
}

impl EnemySpawn {
    /// Create a spawn record
    pub const fn new(x: f32, y: f32, x1: f32, x2: f32, speed: f32, direction: i8) -> Self {
        Self {
            x,
            y,
            x1,
            x2,
            speed,
            direction,
        }
    }
}

/// Live enemy patrolling between two x bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    /// Current x
    pub x: f32,
    /// Fixed y (top of the body)
    pub y: f32,
    /// Left patrol bound
    pub x1: f32,
    /// Right patrol bound
    pub x2: f32,
    /// Pixels per frame
    pub speed: f32,
    /// 1 for right, -1 for left
    pub direction: i8,
    /// Walk-cycle frame
    pub animation_frame: f32,
}

impl Enemy {
    /// Move one frame, reversing exactly at the bounds
    pub fn patrol(&mut self) {
        self.x += f32::from(self.direction) * self.speed;
        if self.x <= self.x1 {
            self.x = self.x1;
            self.direction = 1;
        } else if self.x >= self.x2 {
            self.x = self.x2;
            self.direction = -1;
        }
    }

    /// Advance the walk cycle at a rate proportional to speed
    pub fn advance_animation(&mut self, max_speed: f32, run_frames: u32) {
        self.animation_frame += self.speed / max_speed * 2.0;
        if self.animation_frame >= run_frames as f32 {
            self.animation_frame = 0.0;
        }
    }

    /// Body box; enemies share the player's size
    pub fn collision_box(&self, width: i32, height: i32) -> Rect {
        Rect::new(
            truncate_to_pixel(self.x),
            truncate_to_pixel(self.y) - height,
            width,
            height,
        )
    }
}

impl From<EnemySpawn> for Enemy {
    fn from(spawn: EnemySpawn) -> Self {
        Self {
            x: spawn.x,
            y: spawn.y,
            x1: spawn.x1,
            x2: spawn.x2,
            speed: spawn.speed,
            direction: spawn.direction,
            animation_frame: 0.0,
        }
    }
}

/// Trigger geometry of the active level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelGeometry {
    killboxes: BoundedVec<Killbox, MAX_KILLBOXES>,
    doors: BoundedVec<Door, MAX_DOORS>,
    enemies: BoundedVec<Enemy, MAX_ENEMIES>,
}

impl LevelGeometry {
    /// Empty level
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every trigger and enemy
    pub fn clear(&mut self) {
        self.killboxes.clear();
        self.doors.clear();
        self.enemies.clear();
    }

    /// Add a killbox if there is room
    pub fn add_killbox(&mut self, killbox: Killbox) -> PushOutcome {
        let outcome = self.killboxes.push(killbox);
        if outcome.is_dropped() {
            log::warn!("killbox list full ({MAX_KILLBOXES}), dropping {:?}", killbox.area);
        }
        outcome
    }

    /// Add a door if there is room
    pub fn add_door(&mut self, door: Door) -> PushOutcome {
        let outcome = self.doors.push(door);
        if outcome.is_dropped() {
            log::warn!("door list full ({MAX_DOORS}), dropping door to level {}", door.target);
        }
        outcome
    }

    /// Add an enemy if there is room
    pub fn add_enemy(&mut self, spawn: EnemySpawn) -> PushOutcome {
        let outcome = self.enemies.push(Enemy::from(spawn));
        if outcome.is_dropped() {
            log::warn!("enemy list full ({MAX_ENEMIES}), dropping enemy at x={}", spawn.x);
        }
        outcome
    }

    /// Killboxes
    pub fn killboxes(&self) -> &[Killbox] {
        self.killboxes.as_slice()
    }

    /// Doors
    pub fn doors(&self) -> &[Door] {
        self.doors.as_slice()
    }

    /// Enemies
    pub fn enemies(&self) -> &[Enemy] {
        self.enemies.as_slice()
    }

    /// Whether `body` overlaps any killbox
    pub fn hits_killbox(&self, body: &Rect) -> bool {
        self.killboxes.iter().any(|k| k.area.overlaps(body))
    }

    /// Whether `body` overlaps any enemy
    pub fn hits_enemy(&self, body: &Rect) -> bool {
        self.enemies
            .iter()
            .any(|e| e.collision_box(body.width, body.height).overlaps(body))
    }

    /// Target of the first overlapped door that leads somewhere other than `current`
    pub fn door_target(&self, body: &Rect, current: usize) -> Option<usize> {
        self.doors
            .iter()
            .find(|door| door.area.overlaps(body) && door.target != current)
            .map(|door| door.target)
    }

    /// Move every enemy one frame
    pub fn patrol_enemies(&mut self) {
        for enemy in self.enemies.iter_mut() {
            enemy.patrol();
        }
    }

    /// Advance every enemy's walk cycle
    pub fn animate_enemies(&mut self, max_speed: f32, run_frames: u32) {
        for enemy in self.enemies.iter_mut() {
            enemy.advance_animation(max_speed, run_frames);
        }
    }
}
