//! # Board Physics
//!
//! Physics, collision and incremental wireframe rendering kernel for the
//! demos of a small 128x128 display board.
//!
//! ## Features
//!
//! - **Tilt Cube**: rigid cube driven by an accelerometer, settling onto a face
//! - **Platformer**: box player against bitmap terrain, triggers and enemies
//! - **Incremental Renderer**: erase-then-draw line output, no framebuffer read-back
//! - **Host Agnostic**: draw into any [`render::Display`], feed plain input samples
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use board_physics::prelude::*;
//!
//! let config = KernelConfig::default();
//! let mut demo = CubeDemo::new(&config.cube, config.screen);
//! let mut frame = DrawList::new();
//! demo.init(0, &mut frame);
//!
//! let input = InputSample {
//!     accel: AccelSample::new(0, 64, 0),
//!     ..InputSample::default()
//! };
//! let report = demo.step(&input, &mut frame);
//! println!("drew {} edges", report.render.drawn);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod demos;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, CubeConfig, KernelConfig, PlatformerConfig},
        demos::{
            ActiveDemo, CubeDemo, DeathCause, Demo, DemoKind, FrameEvent, FrameReport,
            PlatformerDemo,
        },
        foundation::{
            math::{ScreenPoint, ScreenSize, Vec2, Vec3},
            random::{LcgRandom, RandomSource},
            time::{FrameClock, Stopwatch},
        },
        input::{AccelSample, Buttons, InputSample},
        physics::{
            platformer::{LevelBitmap, LevelCatalogue, LevelLayout, LevelSource},
            BoundaryBox, Polyhedron, Projection, RigidBody,
        },
        render::{Color, Display, DrawList, Framebuffer, MonoBitmap},
    };
}
