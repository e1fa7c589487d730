//! Procedural level art
//!
//! The board loads its map bitmaps from flash. The host has no such assets,
//! so it builds terrain from each layout: a floor strip, a ledge under the
//! spawn point, under every door and along every enemy's patrol.

use board_physics::foundation::math::ScreenSize;
use board_physics::physics::platformer::{LevelCatalogue, LevelLayout, LevelSource, Rect};
use board_physics::render::{BitmapError, MonoBitmap};

/// Thickness of generated floors and ledges
const LEDGE_THICKNESS: i32 = 3;
/// Ledge overhang past the thing it supports
const LEDGE_MARGIN: i32 = 4;

/// Terrain built from a level catalogue
#[derive(Debug, Clone)]
pub struct GeneratedLevels {
    bitmaps: Vec<MonoBitmap>,
}

impl GeneratedLevels {
    /// One screen-sized bitmap per layout
    pub fn from_catalogue(
        catalogue: &LevelCatalogue,
        screen: ScreenSize,
        player_size: (i32, i32),
    ) -> Result<Self, BitmapError> {
        let bitmaps = catalogue
            .levels
            .iter()
            .map(|layout| {
                let solids = solids_for(layout, screen, player_size);
                rasterize(&solids, screen)
            })
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("generated terrain for {} levels", bitmaps.len());
        Ok(Self { bitmaps })
    }
}

impl LevelSource for GeneratedLevels {
    fn bitmap(&self, level: usize) -> Option<&MonoBitmap> {
        self.bitmaps.get(level)
    }
}

fn ledge_under(x: i32, right: i32, feet: i32) -> Rect {
    Rect::new(
        x - LEDGE_MARGIN,
        feet - LEDGE_THICKNESS,
        right - x + 2 * LEDGE_MARGIN,
        LEDGE_THICKNESS,
    )
}

/// Solid rectangles for one layout, in world pixels
pub fn solids_for(layout: &LevelLayout, screen: ScreenSize, player_size: (i32, i32)) -> Vec<Rect> {
    let (player_width, player_height) = player_size;
    let mut solids = vec![Rect::new(0, 0, screen.width, LEDGE_THICKNESS + 1)];

    let spawn_x = layout.spawn.x as i32;
    let spawn_feet = layout.spawn.y as i32 - player_height;
    solids.push(ledge_under(spawn_x, spawn_x + player_width, spawn_feet));

    for door in &layout.doors {
        solids.push(ledge_under(door.area.x, door.area.right(), door.area.y));
    }

    for enemy in &layout.enemies {
        let feet = enemy.y as i32 - player_height;
        solids.push(ledge_under(enemy.x1 as i32, enemy.x2 as i32 + player_width, feet));
    }

    solids
}

fn rasterize(solids: &[Rect], screen: ScreenSize) -> Result<MonoBitmap, BitmapError> {
    let width = screen.width.max(1) as u32;
    let height = screen.height.max(1) as u32;
    MonoBitmap::from_fn(width, height, |column, row| {
        let x = column as i32;
        let y = height as i32 - 1 - row as i32;
        let pixel = Rect::new(x, y, 1, 1);
        solids.iter().any(|solid| solid.contains(&pixel))
    })
}
