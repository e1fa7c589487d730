//! Player kinematics, jump handling and animation state
//!
//! World y points up. `position.y` is the top of the player's box; the box
//! extends `player_height` pixels below it.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::PlatformerConfig;
use crate::foundation::math::{utils::truncate_to_pixel, Vec2};
use crate::input::{Buttons, InputSample};

/// Animation the player is in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationMode {
    /// Standing on the ground
    #[default]
    Idle,
    /// Moving on the ground
    Run,
    /// First jump, plays once then holds
    Jump,
    /// Mid-air jump, holds its last frame until landing
    DoubleJump,
}

/// Which kind of jump was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// From the ground
    Ground,
    /// In mid-air, consuming the double jump
    Double,
}

/// Kinematic and animation state of the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Left edge (x) and top edge (y)
    pub position: Vec2,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Resting on terrain this frame
    pub on_ground: bool,
    /// A mid-air jump is still allowed
    pub double_jump_available: bool,
    /// Fractional animation frame
    pub animation_frame: f32,
    /// Current animation
    pub animation: AnimationMode,
    jump_held: bool,
    last_jump_ms: u64,
}

impl PlayerState {
    /// Fresh player at a spawn point
    pub fn spawn(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            on_ground: false,
            double_jump_available: true,
            animation_frame: 0.0,
            animation: AnimationMode::Idle,
            jump_held: false,
            last_jump_ms: 0,
        }
    }

    /// Collision box in world pixels
    pub fn collision_box(&self, width: i32, height: i32) -> Rect {
        Rect::new(
            truncate_to_pixel(self.position.x),
            truncate_to_pixel(self.position.y) - height,
            width,
            height,
        )
    }

    /// Apply stick acceleration and the jump button
    ///
    /// The stick is inverted: deflection above centre pushes left. Jumps
    /// fire on the press edge only, need `jump_cooldown_ms` since the last
    /// one, and in mid-air consume the double jump.
    pub fn apply_input(
        &mut self,
        input: &InputSample,
        now_ms: u64,
        config: &PlatformerConfig,
    ) -> Option<JumpKind> {
        let deflection = input.joystick_axis(0, config.joystick_reference) - 0.5;
        if deflection.abs() >= config.dead_zone {
            self.velocity.x -= deflection * config.horizontal_accel;
        }
        self.velocity.x = self.velocity.x.clamp(-config.max_speed, config.max_speed);

        let pressed = input.pressed(Buttons::JUMP);
        let cooled_down = now_ms.saturating_sub(self.last_jump_ms) > config.jump_cooldown_ms;
        let mut jump = None;

        if pressed
            && !self.jump_held
            && cooled_down
            && (self.on_ground || self.double_jump_available)
        {
            let kind = if self.on_ground {
                self.animation = AnimationMode::Jump;
                JumpKind::Ground
            } else {
                self.double_jump_available = false;
                self.animation = AnimationMode::DoubleJump;
                JumpKind::Double
            };
            self.on_ground = false;
            self.last_jump_ms = now_ms;
            self.animation_frame = 0.0;
            self.velocity.y = config.jump_velocity;
            jump = Some(kind);
        }

        if self.on_ground {
            self.double_jump_available = true;
        }
        self.jump_held = pressed;
        jump
    }

    /// Gravity while airborne, horizontal damping, then position
    pub fn integrate(&mut self, config: &PlatformerConfig) {
        if !self.on_ground {
            self.velocity.y += config.gravity;
        }
        self.velocity.x *= config.horizontal_damping;
        self.position += self.velocity;
    }

    /// Advance the animation after collisions have settled `on_ground`
    pub fn update_animation(&mut self, config: &PlatformerConfig) {
        let vx = self.velocity.x;
        match self.animation {
            AnimationMode::DoubleJump => {
                let last = config.double_jump_frames.saturating_sub(1) as f32;
                self.animation_frame += config.jump_animation_rate;
                if self.animation_frame >= last {
                    self.animation_frame = last;
                    if self.on_ground {
                        self.land();
                    }
                }
            }
            AnimationMode::Jump => {
                let last = config.jump_frames.saturating_sub(1) as f32;
                if self.animation_frame < last {
                    self.animation_frame += config.jump_animation_rate;
                }
                if self.on_ground {
                    self.land();
                }
            }
            AnimationMode::Idle | AnimationMode::Run if self.on_ground => {
                let cycle = config.run_frames as f32;
                let step = 2.0 * vx / config.max_speed;
                if vx < -0.5 {
                    self.animation_frame -= step;
                    self.animation = AnimationMode::Run;
                } else if vx > 0.5 {
                    self.animation_frame += step;
                    self.animation = AnimationMode::Run;
                } else {
                    self.animation_frame = 0.0;
                    self.animation = AnimationMode::Idle;
                }
                if self.animation_frame > cycle {
                    self.animation_frame = 0.0;
                }
            }
            AnimationMode::Idle | AnimationMode::Run => {}
        }
    }

    fn land(&mut self) {
        self.animation = AnimationMode::Idle;
        self.animation_frame = 0.0;
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> PlatformerConfig {
        PlatformerConfig::default()
    }

    fn input(stick: f32, jump: bool) -> InputSample {
        InputSample {
            joystick: [stick, 0.7],
            buttons: if jump { Buttons::JUMP } else { Buttons::empty() },
            ..InputSample::default()
        }
    }

    #[test]
    fn test_dead_zone_and_inverted_stick() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::new(60.0, 80.0));

        // 0.77 V -> 0.55 -> deflection 0.05, inside the dead zone
        player.apply_input(&input(0.77, false), 100, &cfg);
        assert_eq!(player.velocity.x, 0.0);

        // full deflection pushes left by half the acceleration
        player.apply_input(&input(1.4, false), 116, &cfg);
        assert_relative_eq!(player.velocity.x, -0.5, epsilon = 1e-6);

        // low stick pushes right
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.apply_input(&input(0.0, false), 100, &cfg);
        assert_relative_eq!(player.velocity.x, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_speed_clamp() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.velocity.x = 7.9;
        player.apply_input(&input(0.0, false), 100, &cfg);
        assert_eq!(player.velocity.x, 8.0);
    }

    #[test]
    fn test_jump_needs_press_edge_and_cooldown() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.on_ground = true;

        // 48 ms since the start is not past the 50 ms cool-down
        assert_eq!(player.apply_input(&input(0.7, true), 48, &cfg), None);
        // still held: no new edge
        assert_eq!(player.apply_input(&input(0.7, true), 100, &cfg), None);
        player.apply_input(&input(0.7, false), 116, &cfg);
        assert_eq!(
            player.apply_input(&input(0.7, true), 132, &cfg),
            Some(JumpKind::Ground)
        );
        assert_eq!(player.velocity.y, 6.0);
        assert!(!player.on_ground);
        assert_eq!(player.animation, AnimationMode::Jump);
    }

    #[test]
    fn test_double_jump_once_per_flight() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.on_ground = true;
        assert_eq!(
            player.apply_input(&input(0.7, true), 100, &cfg),
            Some(JumpKind::Ground)
        );
        player.apply_input(&input(0.7, false), 116, &cfg);
        assert_eq!(
            player.apply_input(&input(0.7, true), 200, &cfg),
            Some(JumpKind::Double)
        );
        assert!(!player.double_jump_available);
        assert_eq!(player.animation, AnimationMode::DoubleJump);

        player.apply_input(&input(0.7, false), 216, &cfg);
        assert_eq!(player.apply_input(&input(0.7, true), 300, &cfg), None);

        // landing restores it
        player.on_ground = true;
        player.apply_input(&input(0.7, false), 316, &cfg);
        assert!(player.double_jump_available);
    }

    #[test]
    fn test_integrate_gravity_only_when_airborne() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::new(10.0, 50.0));
        player.velocity = Vec2::new(2.0, 0.0);
        player.integrate(&cfg);
        assert_relative_eq!(player.velocity.y, -0.5);
        assert_relative_eq!(player.velocity.x, 1.84, epsilon = 1e-6);
        assert_relative_eq!(player.position, Vec2::new(11.84, 49.5), epsilon = 1e-5);

        player.on_ground = true;
        player.velocity.y = 0.0;
        player.integrate(&cfg);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_collision_box_hangs_below_top() {
        let player = PlayerState::spawn(Vec2::new(20.7, 107.9));
        assert_eq!(player.collision_box(13, 17), Rect::new(20, 90, 13, 17));
    }

    #[test]
    fn test_double_jump_animation_holds_until_landing() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.animation = AnimationMode::DoubleJump;
        for _ in 0..40 {
            player.update_animation(&cfg);
        }
        assert_eq!(player.animation_frame, 5.0);

        player.on_ground = true;
        player.update_animation(&cfg);
        assert_eq!(player.animation, AnimationMode::Idle);
        assert_eq!(player.animation_frame, 0.0);
    }

    #[test]
    fn test_run_cycle_and_idle() {
        let cfg = config();
        let mut player = PlayerState::spawn(Vec2::zeros());
        player.on_ground = true;
        player.velocity.x = 4.0;
        player.update_animation(&cfg);
        assert_eq!(player.animation, AnimationMode::Run);
        assert_relative_eq!(player.animation_frame, 1.0);

        player.velocity.x = -4.0;
        player.update_animation(&cfg);
        assert_relative_eq!(player.animation_frame, 2.0);
        assert_eq!(player.animation, AnimationMode::Run);

        player.velocity.x = 0.2;
        player.update_animation(&cfg);
        assert_eq!(player.animation, AnimationMode::Idle);
        assert_eq!(player.animation_frame, 0.0);
    }
}
