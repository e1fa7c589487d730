//! Side-scrolling platformer physics
//!
//! World space is y-up with the origin at the bottom-left of the level.
//! The player and enemies are axis-aligned boxes; terrain is a monochrome
//! bitmap; killboxes and doors are rectangle triggers.

pub mod collision;
pub mod geometry;
pub mod levels;
pub mod player;
pub mod triggers;

pub use crate::render::MonoBitmap as LevelBitmap;
pub use collision::{resolve_bitmap, scan_bitmap, BitmapContacts, BitmapPlacement};
pub use geometry::Rect;
pub use levels::{LevelCatalogue, LevelLayout, LevelSource};
pub use player::{AnimationMode, JumpKind, PlayerState};
pub use triggers::{
    Door, Enemy, EnemySpawn, Killbox, LevelGeometry, MAX_DOORS, MAX_ENEMIES, MAX_KILLBOXES,
};
