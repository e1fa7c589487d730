//! Player against terrain bitmap
//!
//! Every set pixel of the level bitmap is a solid square. The scan collects
//! the nearest contact on each side of the player box, then the resolver
//! moves the player out and zeroes the blocked velocity component.

use super::geometry::Rect;
use super::player::PlayerState;
use crate::config::{CollisionTuning, PlatformerConfig};
use crate::foundation::math::Vec2;
use crate::render::MonoBitmap;

/// Where a bitmap sits in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapPlacement {
    /// World x of the left edge
    pub x: i32,
    /// World y of the bottom edge
    pub y: i32,
    /// World pixels per bitmap pixel
    pub pixel_size: i32,
}

impl BitmapPlacement {
    /// Placement at `(x, y)` with square pixels of `pixel_size`
    pub const fn new(x: i32, y: i32, pixel_size: i32) -> Self {
        Self { x, y, pixel_size }
    }

    /// World rectangle covered by a `width` x `height` bitmap
    pub const fn extent(&self, width: u32, height: u32) -> Rect {
        Rect::new(
            self.x,
            self.y,
            width as i32 * self.pixel_size,
            height as i32 * self.pixel_size,
        )
    }

    /// World rectangle of the pixel at `(column, row)`, row 0 being the top row
    pub const fn pixel_rect(&self, column: u32, row: u32, height: u32) -> Rect {
        Rect::new(
            self.x + column as i32 * self.pixel_size,
            self.y + (height as i32 - 1 - row as i32) * self.pixel_size,
            self.pixel_size,
            self.pixel_size,
        )
    }
}

impl Default for BitmapPlacement {
    fn default() -> Self {
        Self::new(0, 0, 1)
    }
}

/// Nearest contact found on each side of the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitmapContacts {
    /// Highest pixel top under the feet
    pub bottom: Option<i32>,
    /// Lowest pixel bottom above the head
    pub top: Option<i32>,
    /// Leftmost wall edge to the right
    pub right: Option<i32>,
    /// Rightmost wall edge to the left
    pub left: Option<i32>,
}

impl BitmapContacts {
    /// Whether nothing was touched
    pub const fn is_empty(&self) -> bool {
        self.bottom.is_none() && self.top.is_none() && self.right.is_none() && self.left.is_none()
    }
}

fn keep_max(slot: &mut Option<i32>, value: i32) {
    *slot = Some(slot.map_or(value, |current| current.max(value)));
}

fn keep_min(slot: &mut Option<i32>, value: i32) {
    *slot = Some(slot.map_or(value, |current| current.min(value)));
}

/// Collect contacts between `body` moving at `velocity` and the solid pixels
///
/// Returns `None` when the body does not reach the bitmap's extent.
pub fn scan_bitmap(
    body: &Rect,
    velocity: Vec2,
    bitmap: &MonoBitmap,
    placement: BitmapPlacement,
    tuning: &CollisionTuning,
) -> Option<BitmapContacts> {
    let extent = placement.extent(bitmap.width(), bitmap.height());
    if body.right() < extent.x
        || body.x > extent.right()
        || body.y > extent.top()
        || body.top() < extent.y
    {
        return None;
    }

    let (left, right, bottom, top) = (body.x, body.right(), body.y, body.top());
    let step = tuning.step_height(body.height);
    let mut contacts = BitmapContacts::default();

    for (column, row) in bitmap.set_pixels() {
        let pixel = placement.pixel_rect(column, row, bitmap.height());
        let horizontal_overlap = right > pixel.x && left < pixel.right();

        if velocity.y <= 0.0
            && bottom >= pixel.top() - tuning.landing_below
            && bottom <= pixel.top() + tuning.landing_above
            && horizontal_overlap
        {
            keep_max(&mut contacts.bottom, pixel.top());
        } else if velocity.y > 0.0
            && top >= pixel.y
            && top <= pixel.y + tuning.head_window
            && horizontal_overlap
        {
            keep_min(&mut contacts.top, pixel.y);
        }

        let vertical_overlap = bottom < pixel.top() && top > pixel.y;
        let is_wall = pixel.top() - bottom >= step;

        if velocity.x > 0.0
            && right >= pixel.x
            && right <= pixel.x + tuning.side_window
            && vertical_overlap
            && is_wall
        {
            keep_min(&mut contacts.right, pixel.x);
        } else if velocity.x < 0.0
            && left <= pixel.right()
            && left >= pixel.right() - tuning.side_window
            && vertical_overlap
            && is_wall
        {
            keep_max(&mut contacts.left, pixel.right());
        }
    }

    Some(contacts)
}

/// Scan and push the player out of the terrain
///
/// Sets `on_ground` from the bottom contact; a player away from the bitmap
/// is airborne.
pub fn resolve_bitmap(
    player: &mut PlayerState,
    bitmap: &MonoBitmap,
    placement: BitmapPlacement,
    config: &PlatformerConfig,
) -> BitmapContacts {
    let (width, height) = config.player_size();
    let body = player.collision_box(width, height);

    let Some(contacts) = scan_bitmap(&body, player.velocity, bitmap, placement, &config.collision)
    else {
        player.on_ground = false;
        return BitmapContacts::default();
    };

    if let Some(ground) = contacts.bottom {
        player.position.y = (ground + height) as f32;
        player.velocity.y = config.collision.ground_bias;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }

    if let Some(ceiling) = contacts.top {
        player.position.y = ceiling as f32;
        player.velocity.y = 0.0;
    }

    if let Some(wall) = contacts.right {
        player.position.x = (wall - width) as f32;
        player.velocity.x = 0.0;
    } else if let Some(wall) = contacts.left {
        player.position.x = wall as f32;
        player.velocity.x = 0.0;
    }

    contacts
}
