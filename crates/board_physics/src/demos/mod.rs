//! Demo lifecycle and frame reports
//!
//! A host owns exactly one [`ActiveDemo`] at a time and drives it through
//! `init`, a run of `step` calls and `teardown`. Demos never look at the
//! exit button; leaving a demo is the host's decision.

pub mod cube;
pub mod platformer;

pub use cube::CubeDemo;
pub use platformer::PlatformerDemo;

use serde::{Deserialize, Serialize};

use crate::config::KernelConfig;
use crate::input::InputSample;
use crate::physics::platformer::LevelSource;
use crate::render::{Display, RenderStats};

/// Lifecycle shared by the demos
pub trait Demo {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Reset state and draw the opening frame
    ///
    /// `selector` picks the level for the platformer and is ignored by the cube.
    fn init(&mut self, selector: usize, out: &mut dyn Display);

    /// Advance one fixed frame and emit its draw commands
    fn step(&mut self, input: &InputSample, out: &mut dyn Display) -> FrameReport;

    /// Erase what the demo drew
    fn teardown(&mut self, out: &mut dyn Display);
}

/// Which demo a host runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoKind {
    /// Tilt-controlled cube
    #[default]
    Cube,
    /// Side-scrolling platformer
    Platformer,
}

/// Why the player was reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Overlapped a killbox
    Killbox,
    /// Touched an enemy
    Enemy,
    /// Dropped below the playfield
    FellOut,
}

/// Something notable that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameEvent {
    /// Player reset to the level spawn
    Died(DeathCause),
    /// Player went through a door
    EnteredDoor {
        /// Level left
        from: usize,
        /// Level entered
        to: usize,
    },
    /// Player touched ground after being airborne
    Landed,
    /// Cube bounced off its box
    Bounced {
        /// Vertex-plane violations in the contact
        violations: u32,
    },
}

/// Result of one [`Demo::step`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Events in the order they happened
    pub events: Vec<FrameEvent>,
    /// Incremental renderer counts summed over every tracked shape
    pub render: RenderStats,
}

impl FrameReport {
    /// Record an event
    pub fn push(&mut self, event: FrameEvent) {
        self.events.push(event);
    }

    /// Whether `event` happened this frame
    pub fn contains(&self, event: &FrameEvent) -> bool {
        self.events.contains(event)
    }

    /// Cause of death this frame, if any
    pub fn death(&self) -> Option<DeathCause> {
        self.events.iter().find_map(|event| match event {
            FrameEvent::Died(cause) => Some(*cause),
            _ => None,
        })
    }
}

/// The demo a host is currently running
pub enum ActiveDemo {
    /// Tilt cube
    Cube(CubeDemo),
    /// Platformer
    Platformer(PlatformerDemo),
}

impl ActiveDemo {
    /// Build the demo of `kind`; `levels` is only used by the platformer
    pub fn new(kind: DemoKind, config: &KernelConfig, levels: Box<dyn LevelSource>) -> Self {
        match kind {
            DemoKind::Cube => Self::Cube(CubeDemo::new(&config.cube, config.screen)),
            DemoKind::Platformer => Self::Platformer(PlatformerDemo::new(
                &config.platformer,
                config.screen,
                levels,
            )),
        }
    }

    /// Kind of the running demo
    pub const fn kind(&self) -> DemoKind {
        match self {
            Self::Cube(_) => DemoKind::Cube,
            Self::Platformer(_) => DemoKind::Platformer,
        }
    }

    fn inner(&mut self) -> &mut dyn Demo {
        match self {
            Self::Cube(demo) => demo,
            Self::Platformer(demo) => demo,
        }
    }
}

impl Demo for ActiveDemo {
    fn name(&self) -> &'static str {
        match self {
            Self::Cube(demo) => demo.name(),
            Self::Platformer(demo) => demo.name(),
        }
    }

    fn init(&mut self, selector: usize, out: &mut dyn Display) {
        self.inner().init(selector, out);
    }

    fn step(&mut self, input: &InputSample, out: &mut dyn Display) -> FrameReport {
        self.inner().step(input, out)
    }

    fn teardown(&mut self, out: &mut dyn Display) {
        self.inner().teardown(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawList, MonoBitmap};

    #[test]
    fn test_active_demo_dispatch() {
        let config = KernelConfig::default();
        let levels: Vec<MonoBitmap> = Vec::new();
        let mut demo = ActiveDemo::new(DemoKind::Platformer, &config, Box::new(levels));
        assert_eq!(demo.kind(), DemoKind::Platformer);
        assert_eq!(demo.name(), "platformer");

        let mut out = DrawList::new();
        demo.init(0, &mut out);
        assert!(!out.is_empty());

        let cube = ActiveDemo::new(DemoKind::Cube, &config, Box::new(Vec::<MonoBitmap>::new()));
        assert_eq!(cube.kind(), DemoKind::Cube);
        assert_eq!(cube.name(), "cube");
    }

    #[test]
    fn test_report_helpers() {
        let mut report = FrameReport::default();
        assert_eq!(report.death(), None);
        report.push(FrameEvent::Landed);
        report.push(FrameEvent::Died(DeathCause::Enemy));
        assert!(report.contains(&FrameEvent::Landed));
        assert_eq!(report.death(), Some(DeathCause::Enemy));
    }
}
