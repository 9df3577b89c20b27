use heartglow_platform::{Key, RenderSurface, SurfaceEvent};
use tracing::{debug, info};

use crate::clock::{AnimationClock, Regime};
use crate::config::OverlayConfig;
use crate::error::Result;
use crate::scene::Scene;

/// Key that stops the overlay alongside a window-close request.
pub const CANCEL_KEY: Key = Key::Escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
}

/// Fixed-rate loop: draw every particle, present, pace, then poll for a stop.
pub struct FrameDriver<S: RenderSurface> {
    surface: S,
    scene: Scene,
    config: OverlayConfig,
    clock: Option<AnimationClock>,
    state: DriverState,
    frames: u64,
    last_regime: Option<&'static str>,
}

impl<S: RenderSurface> FrameDriver<S> {
    pub fn new(surface: S, scene: Scene, config: OverlayConfig) -> Self {
        Self {
            surface,
            scene,
            config,
            clock: None,
            state: DriverState::Running,
            frames: 0,
            last_regime: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Runs one iteration. A no-op once stopped.
    pub fn step(&mut self) -> Result<DriverState> {
        if self.state == DriverState::Stopped {
            return Ok(self.state);
        }

        let now = self.surface.ticks_ms();
        let clock = *self.clock.get_or_insert_with(|| AnimationClock::start(now));
        let elapsed = clock.elapsed(now);
        self.note_regime(self.config.timeline().regime(elapsed));

        for command in self.scene.draw_commands(elapsed, &self.config) {
            self.surface.draw(&command)?;
        }
        self.surface.present()?;
        self.frames += 1;
        self.surface.wait_frame();

        for event in self.surface.poll_events() {
            let stop = match event {
                SurfaceEvent::CloseRequested => true,
                SurfaceEvent::KeyPressed(key) => key == CANCEL_KEY,
            };
            if stop {
                info!("stop requested by {:?} after {} frames", event, self.frames);
                self.state = DriverState::Stopped;
                break;
            }
        }
        Ok(self.state)
    }

    pub fn run(&mut self) -> Result<RunSummary> {
        while self.step()? == DriverState::Running {}
        Ok(RunSummary {
            frames: self.frames,
        })
    }

    fn note_regime(&mut self, regime: Regime) {
        let name = regime.name();
        if self.last_regime != Some(name) {
            debug!("animation regime -> {} at frame {}", name, self.frames);
            self.last_regime = Some(name);
        }
    }
}
