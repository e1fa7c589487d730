//! Tilt-controlled cube bouncing inside a box
//!
//! The box is drawn world-fixed so it stays put on screen; the cube is
//! drawn relative to its own position and orientation.

use super::{Demo, FrameEvent, FrameReport};
use crate::config::CubeConfig;
use crate::foundation::math::{ScreenPoint, ScreenSize};
use crate::foundation::random::{LcgRandom, RandomSource};
use crate::input::InputSample;
use crate::physics::{
    rotate_point, BoundaryBox, IntegratorParams, Polyhedron, Projection, RigidBody, StepOutcome,
    CUBOID_VERTEX_COUNT,
};
use crate::render::{Color, Display, WireframeTracker};

/// State of the cube demo
pub struct CubeDemo {
    config: CubeConfig,
    params: IntegratorParams,
    body: RigidBody,
    cube: Polyhedron,
    environment: Polyhedron,
    bounds: BoundaryBox,
    projection: Projection,
    cube_tracker: WireframeTracker<CUBOID_VERTEX_COUNT>,
    environment_tracker: WireframeTracker<CUBOID_VERTEX_COUNT>,
    rng: Box<dyn RandomSource>,
    last_step: Option<StepOutcome>,
}

impl CubeDemo {
    /// Cube demo using the seeded LCG for bounce jitter
    pub fn new(config: &CubeConfig, screen: ScreenSize) -> Self {
        let environment =
            Polyhedron::environment(config.environment_half_size, config.environment_z_offset);
        Self {
            config: config.clone(),
            params: IntegratorParams::from(config),
            body: RigidBody::at_rest(config.start_position),
            cube: Polyhedron::cube(config.cube_half_size),
            bounds: BoundaryBox::from_environment(&environment, screen.center_anchor()),
            environment,
            projection: Projection::from_config(&config.projection, screen),
            cube_tracker: WireframeTracker::new(screen),
            environment_tracker: WireframeTracker::new(screen),
            rng: Box::new(LcgRandom::new(config.rng_seed)),
            last_step: None,
        }
    }

    /// Replace the bounce jitter source
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Current body state
    pub const fn body(&self) -> &RigidBody {
        &self.body
    }

    /// Mutable body state, for hosts that place the cube directly
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    /// Result of the last step, `None` before the first
    pub const fn last_step(&self) -> Option<&StepOutcome> {
        self.last_step.as_ref()
    }

    /// Box the body is kept inside
    pub const fn bounds(&self) -> &BoundaryBox {
        &self.bounds
    }

    /// Screen corners of the cube as last drawn
    pub const fn cube_outline(&self) -> Option<&[ScreenPoint; CUBOID_VERTEX_COUNT]> {
        self.cube_tracker.previous()
    }

    /// Screen corners of the cube for the current state
    pub fn project_cube(&self) -> [ScreenPoint; CUBOID_VERTEX_COUNT] {
        self.cube.vertices().map(|vertex| {
            let rotated = rotate_point(vertex, self.body.orientation);
            self.projection
                .object_relative(rotated, self.body.position)
                .point
        })
    }

    /// Screen corners of the box
    pub fn project_environment(&self) -> [ScreenPoint; CUBOID_VERTEX_COUNT] {
        self.environment
            .vertices()
            .map(|vertex| self.projection.world_fixed(vertex).point)
    }

    fn render(&mut self, out: &mut dyn Display) -> crate::render::RenderStats {
        let cube_points = self.project_cube();
        let environment_points = self.project_environment();

        // the box goes last so erasing the cube never leaves holes in it
        let mut stats = self.cube_tracker.render(
            cube_points,
            self.cube.edges(),
            Color::WHITE,
            Color::BLACK,
            out,
        );
        stats += self.environment_tracker.render(
            environment_points,
            self.environment.edges(),
            Color::WALL,
            Color::BLACK,
            out,
        );
        stats
    }
}

impl Demo for CubeDemo {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn init(&mut self, _selector: usize, out: &mut dyn Display) {
        self.body = RigidBody::at_rest(self.config.start_position);
        self.cube_tracker.reset();
        self.environment_tracker.reset();
        self.last_step = None;
        out.fill_screen(Color::BLACK);
        log::info!(
            "cube demo started at ({:.1}, {:.1}, {:.1})",
            self.body.position.x,
            self.body.position.y,
            self.body.position.z
        );
    }

    fn step(&mut self, input: &InputSample, out: &mut dyn Display) -> FrameReport {
        let gravity = input.accel.gravity_direction();
        let outcome = self.body.step(
            gravity,
            &self.cube,
            &self.bounds,
            &self.params,
            self.rng.as_mut(),
        );

        let mut report = FrameReport::default();
        if outcome.boundary.bounced() {
            report.push(FrameEvent::Bounced {
                violations: outcome.boundary.violations(),
            });
        }
        self.last_step = Some(outcome);

        report.render = self.render(out);
        log::trace!(
            "cube frame: erased={} drawn={} dropped={}",
            report.render.erased,
            report.render.drawn,
            report.render.dropped
        );
        report
    }

    fn teardown(&mut self, out: &mut dyn Display) {
        let erased = self.cube_tracker.clear(self.cube.edges(), Color::BLACK, out)
            + self
                .environment_tracker
                .clear(self.environment.edges(), Color::BLACK, out);
        log::info!("cube demo stopped, erased {erased} edges");
    }
}
