//! Fixed-step host loop
//!
//! Each frame the host samples the input script, steps the demo into a
//! [`DrawList`], then replays the list onto a software panel. The panel
//! can be saved as a PNG once the run ends.

use board_physics::demos::{ActiveDemo, Demo, FrameEvent};
use board_physics::foundation::time::Stopwatch;
use board_physics::input::Buttons;
use board_physics::physics::platformer::LevelCatalogue;
use board_physics::render::{DrawList, Framebuffer};

use crate::assets::GeneratedLevels;
use crate::config::HostConfig;
use crate::error::DemoError;
use crate::script::InputScript;

/// Totals gathered over one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames stepped
    pub frames: u32,
    /// Whether the script pressed exit
    pub exited: bool,
    /// Platformer deaths
    pub deaths: u32,
    /// Level changes through doors
    pub doors: u32,
    /// Frames on which the cube hit a wall
    pub bounces: u32,
    /// Edges drawn
    pub drawn: usize,
    /// Edges erased
    pub erased: usize,
}

impl RunSummary {
    fn tally(&mut self, events: &[FrameEvent]) {
        for event in events {
            match event {
                FrameEvent::Died(_) => self.deaths += 1,
                FrameEvent::EnteredDoor { .. } => self.doors += 1,
                FrameEvent::Bounced { .. } => self.bounces += 1,
                FrameEvent::Landed => {}
            }
        }
    }
}

/// Owns the running demo and its panel
pub struct Host {
    config: HostConfig,
    demo: ActiveDemo,
    script: InputScript,
    panel: Framebuffer,
    frame: DrawList,
}

impl Host {
    /// Build the demo named in `config`
    pub fn new(config: HostConfig) -> Result<Self, DemoError> {
        let kernel = &config.kernel;
        let levels = GeneratedLevels::from_catalogue(
            &LevelCatalogue::board_levels(),
            kernel.screen,
            kernel.platformer.player_size(),
        )?;
        let demo = ActiveDemo::new(config.demo, kernel, Box::new(levels));
        let script = InputScript::for_demo(config.demo, kernel.platformer.joystick_reference)
            .with_exit_at(config.exit_at);

        Ok(Self {
            panel: Framebuffer::new(kernel.screen),
            frame: DrawList::new(),
            config,
            demo,
            script,
        })
    }

    /// Panel contents after the last replayed frame
    pub const fn panel(&self) -> &Framebuffer {
        &self.panel
    }

    /// The running demo
    pub const fn demo(&self) -> &ActiveDemo {
        &self.demo
    }

    fn present(&mut self) {
        self.frame.replay(&mut self.panel);
        self.frame.clear();
    }

    /// Run until exit is pressed or the frame budget is spent
    pub fn run(&mut self) -> Result<RunSummary, DemoError> {
        log::info!(
            "running {} demo for up to {} frames",
            self.demo.name(),
            self.config.frames
        );

        self.demo.init(self.config.level, &mut self.frame);
        self.present();

        let mut summary = RunSummary::default();
        let stopwatch = Stopwatch::start_new();

        for frame in 0..self.config.frames {
            let input = self.script.sample(frame);
            if input.pressed(Buttons::EXIT) {
                log::info!("exit pressed on frame {frame}");
                summary.exited = true;
                break;
            }

            let report = self.demo.step(&input, &mut self.frame);
            self.present();

            summary.frames += 1;
            summary.tally(&report.events);
            summary.drawn += report.render.drawn;
            summary.erased += report.render.erased;
        }

        log::info!(
            "{} frames in {:.2?}: {} deaths, {} doors, {} bounces, {} edges drawn",
            summary.frames,
            stopwatch.elapsed(),
            summary.deaths,
            summary.doors,
            summary.bounces,
            summary.drawn
        );

        if let Some(path) = &self.config.snapshot {
            self.panel.to_rgb_image().save(path)?;
            log::info!("wrote snapshot to {path}");
        }

        self.demo.teardown(&mut self.frame);
        self.present();
        Ok(summary)
    }
}
