//! Whole-frame scenarios for the tilt cube

use approx::assert_relative_eq;
use board_physics::physics::{BoundaryOutcome, IntegratorParams};
use board_physics::prelude::*;
use board_physics::render::RenderStats;

/// Always returns the same value; 50 maps to zero jitter
struct Constant(u32);

impl RandomSource for Constant {
    fn next_u32(&mut self) -> u32 {
        self.0
    }
}

fn unit_params() -> IntegratorParams {
    IntegratorParams {
        gravity_strength: 1.0,
        linear_damping: 1.0,
        angular_damping: 0.25,
        time_step: 1.0,
        stabilization_strength: 0.02,
        restitution: 0.5,
    }
}

#[test]
fn test_half_unit_from_wall_bounces_once() {
    let shape = Polyhedron::cube(15.0);
    let environment = Polyhedron::environment(60.0, 60.0);
    let bounds = BoundaryBox::from_environment(&environment, Vec3::zeros());

    // +X face half a unit from the +X wall
    let mut body = RigidBody::at_rest(Vec3::new(44.5, 0.0, 60.0));
    let gravity = AccelSample::new(0, 64, 0).gravity_direction();
    let outcome = body.step(gravity, &shape, &bounds, &unit_params(), &mut Constant(50));

    match outcome.boundary {
        BoundaryOutcome::Reflected {
            violations,
            normal,
            spin,
        } => {
            assert_eq!(violations, 1);
            assert_relative_eq!(normal, Vec3::new(-1.0, 0.0, 0.0));
            assert_relative_eq!(spin, Vec3::zeros());
        }
        other => panic!("expected a reflection, got {other:?}"),
    }
    assert_relative_eq!(body.position.x + 15.0, bounds.max.x);
    assert_relative_eq!(body.velocity, Vec3::new(-0.5, 0.0, 0.0));
    assert_relative_eq!(body.angular_velocity, Vec3::zeros());
}

#[test]
fn test_cube_comes_to_rest_on_the_floor() {
    let config = CubeConfig::default();
    let mut demo = CubeDemo::new(&config, ScreenSize::OLED_128)
        .with_random_source(Box::new(Constant(50)));
    let mut frame = DrawList::new();
    demo.init(0, &mut frame);

    let tilt = InputSample {
        accel: AccelSample::new(0, 0, 64),
        ..InputSample::default()
    };
    let mut bounces = 0;
    for _ in 0..600 {
        frame.clear();
        let report = demo.step(&tilt, &mut frame);
        bounces += report
            .events
            .iter()
            .filter(|event| matches!(event, FrameEvent::Bounced { .. }))
            .count();
    }

    // gravity along body -Y pushes the cube onto the floor of the box
    assert!(bounces > 0);
    let body = demo.body();
    let floor = demo.bounds().min.y + demo.bounds().anchor.y + config.cube_half_size;
    assert!((body.position.y - floor).abs() < 1.0, "y = {}", body.position.y);
    assert!(body.velocity.magnitude() < 1.5);
}

#[test]
fn test_erase_matches_previous_draw_over_a_sweep() {
    let mut demo = CubeDemo::new(&CubeConfig::default(), ScreenSize::OLED_128)
        .with_random_source(Box::new(LcgRandom::new(7)));
    let mut frame = DrawList::new();
    demo.init(0, &mut frame);

    let mut previous: Option<RenderStats> = None;
    for i in 0..120i16 {
        // slow circular tilt sweep
        let angle = f32::from(i) * 0.1;
        let input = InputSample {
            accel: AccelSample::new(
                (angle.cos() * 60.0) as i16,
                (angle.sin() * 60.0) as i16,
                -20,
            ),
            ..InputSample::default()
        };
        frame.clear();
        let report = demo.step(&input, &mut frame);
        match previous {
            None => assert_eq!(report.render.erased, 0),
            Some(last) => assert_eq!(report.render.erased, last.drawn, "frame {i}"),
        }
        assert_eq!(
            frame.count_lines_with(Color::BLACK),
            report.render.erased,
            "frame {i}"
        );
        previous = Some(report.render);
    }
}

#[test]
fn test_replay_onto_framebuffer_shows_both_shapes() {
    let mut demo = CubeDemo::new(&CubeConfig::default(), ScreenSize::OLED_128);
    let mut frame = DrawList::new();
    demo.init(0, &mut frame);
    demo.step(&InputSample::default(), &mut frame);

    let mut panel = Framebuffer::new(ScreenSize::OLED_128);
    frame.replay(&mut panel);
    assert!(panel.count(Color::WHITE) > 0);
    assert!(panel.count(Color::WALL) > 0);
}
