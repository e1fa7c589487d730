//! Platformer demo: one level on screen, doors between levels
//!
//! Each frame runs input, integration, trigger checks, terrain collision,
//! screen-edge handling, enemy patrol and animation, then redraws the
//! player and enemy outlines incrementally. Loading a level (start, death
//! or door) clears the screen and redraws the terrain in full.

use super::{DeathCause, Demo, FrameEvent, FrameReport};
use crate::config::PlatformerConfig;
use crate::foundation::math::{utils::truncate_to_pixel, ScreenPoint, ScreenSize, Vec2};
use crate::foundation::time::FrameClock;
use crate::input::InputSample;
use crate::physics::platformer::{
    resolve_bitmap, BitmapPlacement, LevelCatalogue, LevelGeometry, LevelLayout, LevelSource,
    PlayerState,
};
use crate::render::{rect_outline, Color, Display, RenderStats, WireframeTracker, QUAD_EDGES};

/// State of the platformer demo
pub struct PlatformerDemo {
    config: PlatformerConfig,
    screen: ScreenSize,
    catalogue: LevelCatalogue,
    levels: Box<dyn LevelSource>,
    placement: BitmapPlacement,
    level: usize,
    player: PlayerState,
    geometry: LevelGeometry,
    clock: FrameClock,
    player_tracker: WireframeTracker<4>,
    enemy_trackers: Vec<WireframeTracker<4>>,
}

impl PlatformerDemo {
    /// Platformer over the board's six levels
    pub fn new(
        config: &PlatformerConfig,
        screen: ScreenSize,
        levels: Box<dyn LevelSource>,
    ) -> Self {
        Self {
            config: config.clone(),
            screen,
            catalogue: LevelCatalogue::board_levels(),
            levels,
            placement: BitmapPlacement::default(),
            level: 0,
            player: PlayerState::spawn(Vec2::zeros()),
            geometry: LevelGeometry::new(),
            clock: FrameClock::new(config.frame_period_ms),
            player_tracker: WireframeTracker::new(screen),
            enemy_trackers: Vec::new(),
        }
    }

    /// Use a different set of level layouts
    pub fn with_catalogue(mut self, catalogue: LevelCatalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Active level index
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Player state
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable player state, for hosts that teleport the player
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// Triggers and enemies of the active level
    pub const fn geometry(&self) -> &LevelGeometry {
        &self.geometry
    }

    /// Simulated time
    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Layout of the active level
    pub fn layout(&self) -> Option<&LevelLayout> {
        self.catalogue.get(self.level)
    }

    fn load_level(&mut self, level: usize, out: &mut dyn Display) {
        self.level = level;
        let layout = self
            .catalogue
            .get(level)
            .cloned()
            .unwrap_or_else(|| LevelLayout::new(0.0, 0.0));

        let (geometry, dropped) = layout.build_geometry();
        if dropped > 0 {
            log::warn!("level {level}: {dropped} trigger entries did not fit");
        }
        self.geometry = geometry;
        self.player = PlayerState::spawn(layout.spawn);

        self.player_tracker.reset();
        let enemies = self.geometry.enemies().len();
        self.enemy_trackers = vec![WireframeTracker::new(self.screen); enemies];

        out.fill_screen(Color::BLACK);
        match self.levels.bitmap(level) {
            Some(bitmap) => {
                let extent = self.placement.extent(bitmap.width(), bitmap.height());
                out.draw_bitmap(extent.x, self.screen.height - extent.top(), bitmap, Color::WHITE);
            }
            None => log::warn!("level {level} has no terrain bitmap"),
        }

        log::info!(
            "level {level} loaded: spawn=({:.0}, {:.0}) doors={} killboxes={} enemies={}",
            layout.spawn.x,
            layout.spawn.y,
            self.geometry.doors().len(),
            self.geometry.killboxes().len(),
            self.geometry.enemies().len()
        );
    }

    fn die(&mut self, cause: DeathCause, report: &mut FrameReport, out: &mut dyn Display) {
        log::debug!(
            "player died ({cause:?}) at ({:.1}, {:.1}) on level {}",
            self.player.position.x,
            self.player.position.y,
            self.level
        );
        report.push(FrameEvent::Died(cause));
        self.load_level(self.level, out);
    }

    /// Enemy, killbox and door checks; returns `true` when the level was reloaded
    fn check_triggers(&mut self, report: &mut FrameReport, out: &mut dyn Display) -> bool {
        let (width, height) = self.config.player_size();
        let body = self.player.collision_box(width, height);

        if self.geometry.hits_enemy(&body) {
            self.die(DeathCause::Enemy, report, out);
            return true;
        }
        if self.geometry.hits_killbox(&body) {
            self.die(DeathCause::Killbox, report, out);
            return true;
        }
        if let Some(target) = self.geometry.door_target(&body, self.level) {
            if self.catalogue.get(target).is_some() {
                let from = self.level;
                log::debug!("door: level {from} -> {target}");
                report.push(FrameEvent::EnteredDoor { from, to: target });
                self.load_level(target, out);
                return true;
            }
            log::warn!("door on level {} leads to missing level {target}", self.level);
        }
        false
    }

    /// Horizontal screen clamp and the fall-out check
    fn apply_screen_edges(&mut self) -> bool {
        let (width, _) = self.config.player_size();
        let max_x = (self.screen.width - width) as f32;
        if self.player.position.x < 0.0 {
            self.player.position.x = 0.0;
            self.player.velocity.x = 0.0;
        } else if self.player.position.x > max_x {
            self.player.position.x = max_x;
            self.player.velocity.x = 0.0;
        }

        if self.player.position.y < 0.0 {
            return true;
        }
        let ceiling = self.screen.height as f32;
        if self.player.position.y > ceiling {
            self.player.position.y = ceiling;
            self.player.velocity.y = 0.0;
        }
        false
    }

    fn to_screen(&self, x: f32, top: f32) -> ScreenPoint {
        ScreenPoint::new(
            truncate_to_pixel(x),
            self.screen.height - truncate_to_pixel(top),
        )
    }

    fn render(&mut self, out: &mut dyn Display) -> RenderStats {
        let (width, height) = self.config.player_size();
        let color = if self.player.on_ground {
            Color::GREEN
        } else {
            Color::CYAN
        };
        let corner = self.to_screen(self.player.position.x, self.player.position.y);
        let mut stats = self.player_tracker.render(
            rect_outline(corner, width, height),
            &QUAD_EDGES,
            color,
            Color::BLACK,
            out,
        );

        let corners: Vec<ScreenPoint> = self
            .geometry
            .enemies()
            .iter()
            .map(|enemy| self.to_screen(enemy.x, enemy.y))
            .collect();
        for (tracker, corner) in self.enemy_trackers.iter_mut().zip(corners) {
            stats += tracker.render(
                rect_outline(corner, width, height),
                &QUAD_EDGES,
                Color::RED,
                Color::BLACK,
                out,
            );
        }
        stats
    }
}

impl Demo for PlatformerDemo {
    fn name(&self) -> &'static str {
        "platformer"
    }

    fn init(&mut self, selector: usize, out: &mut dyn Display) {
        let level = if selector < self.catalogue.len() {
            selector
        } else {
            log::warn!("no level {selector}, starting at level 0");
            0
        };
        self.clock = FrameClock::new(self.config.frame_period_ms);
        self.load_level(level, out);
    }

    fn step(&mut self, input: &InputSample, out: &mut dyn Display) -> FrameReport {
        let mut report = FrameReport::default();
        self.clock.tick();
        let now = self.clock.now_ms();
        let was_on_ground = self.player.on_ground;

        if let Some(kind) = self.player.apply_input(input, now, &self.config) {
            log::trace!("jump {kind:?} at {now} ms");
        }
        self.player.integrate(&self.config);

        if self.check_triggers(&mut report, out) {
            return report;
        }

        match self.levels.bitmap(self.level) {
            Some(bitmap) => {
                resolve_bitmap(&mut self.player, bitmap, self.placement, &self.config);
            }
            None => self.player.on_ground = false,
        }

        if self.apply_screen_edges() {
            self.die(DeathCause::FellOut, &mut report, out);
            return report;
        }

        if self.player.on_ground && !was_on_ground {
            report.push(FrameEvent::Landed);
        }

        self.geometry.patrol_enemies();
        self.geometry
            .animate_enemies(self.config.max_speed, self.config.run_frames);
        self.player.update_animation(&self.config);

        report.render = self.render(out);
        report
    }

    fn teardown(&mut self, out: &mut dyn Display) {
        let mut erased = self.player_tracker.clear(&QUAD_EDGES, Color::BLACK, out);
        for tracker in &mut self.enemy_trackers {
            erased += tracker.clear(&QUAD_EDGES, Color::BLACK, out);
        }
        log::info!("platformer stopped on level {}, erased {erased} edges", self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCommand, DrawList, MonoBitmap};

    fn demo_with(levels: Vec<MonoBitmap>) -> PlatformerDemo {
        PlatformerDemo::new(&PlatformerConfig::default(), ScreenSize::OLED_128, Box::new(levels))
    }

    #[test]
    fn test_init_redraws_level() {
        let floor = MonoBitmap::from_fn(128, 128, |_, row| row == 127).unwrap();
        let mut demo = demo_with(vec![floor]);
        let mut out = DrawList::new();
        demo.init(0, &mut out);
        assert_eq!(out.commands()[0], DrawCommand::FillScreen(Color::BLACK));
        assert!(matches!(
            out.commands()[1],
            DrawCommand::Bitmap { x: 0, y: 0, color: Color::WHITE, .. }
        ));
        assert_eq!(demo.level(), 0);
        assert_eq!(demo.player().position.x, 60.0);
    }

    #[test]
    fn test_out_of_range_selector_starts_at_zero() {
        let mut demo = demo_with(Vec::new());
        let mut out = DrawList::new();
        demo.init(42, &mut out);
        assert_eq!(demo.level(), 0);
    }

    #[test]
    fn test_clock_advances_per_step() {
        let mut demo = demo_with(Vec::new());
        let mut out = DrawList::new();
        demo.init(0, &mut out);
        demo.step(&InputSample::idle(1.4), &mut out);
        demo.step(&InputSample::idle(1.4), &mut out);
        assert_eq!(demo.clock().now_ms(), 32);
    }

    #[test]
    fn test_player_colour_tracks_ground_state() {
        let mut demo = demo_with(Vec::new());
        let mut out = DrawList::new();
        demo.init(0, &mut out);
        out.clear();
        let report = demo.step(&InputSample::idle(1.4), &mut out);
        assert_eq!(report.render.drawn, 4);
        assert_eq!(out.count_lines_with(Color::CYAN), 4);
    }
}
