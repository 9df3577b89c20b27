//! In-memory render surface for driving the frame loop in tests.

use std::collections::HashMap;

use heartglow_platform::{
    DrawCommand, MonitorRect, OverlayOptions, OverlayPlatform, OverlayWindow, RenderSurface,
    Result, SurfaceEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    Draw,
    Present,
    Wait,
    Poll,
}

/// Records every draw call and advances a fake clock by a fixed step per frame.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    start_ms: u64,
    step_ms: u64,
    pending: Vec<DrawCommand>,
    frames: Vec<Vec<DrawCommand>>,
    events: HashMap<usize, Vec<SurfaceEvent>>,
    calls: Vec<SurfaceCall>,
}

impl ScriptedSurface {
    pub fn new(step_ms: u64) -> Self {
        Self::starting_at(0, step_ms)
    }

    pub fn starting_at(start_ms: u64, step_ms: u64) -> Self {
        Self {
            start_ms,
            step_ms,
            ..Self::default()
        }
    }

    /// Delivers `event` when polled at the end of frame `frame` (0-based).
    pub fn with_event(mut self, frame: usize, event: SurfaceEvent) -> Self {
        self.events.entry(frame).or_default().push(event);
        self
    }

    pub fn frames_presented(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, index: usize) -> &[DrawCommand] {
        &self.frames[index]
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.frames
            .iter()
            .flatten()
            .chain(self.pending.iter())
            .copied()
            .collect()
    }

    /// Every surface call in the order the driver made it.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn waits(&self) -> usize {
        self.calls.iter().filter(|c| **c == SurfaceCall::Wait).count()
    }
}

impl RenderSurface for ScriptedSurface {
    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        self.calls.push(SurfaceCall::Draw);
        self.pending.push(*command);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.calls.push(SurfaceCall::Present);
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn ticks_ms(&self) -> u64 {
        self.start_ms + self.frames.len() as u64 * self.step_ms
    }

    fn wait_frame(&mut self) {
        self.calls.push(SurfaceCall::Wait);
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.calls.push(SurfaceCall::Poll);
        let current = self.frames.len().saturating_sub(1);
        self.events.remove(&current).unwrap_or_default()
    }
}

impl OverlayWindow for ScriptedSurface {
    fn set_click_through(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }

    fn set_always_on_top(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }
}

/// Hands out one pre-scripted surface for a fixed monitor.
pub struct ScriptedPlatform {
    pub monitor: MonitorRect,
    pub surface: Option<ScriptedSurface>,
    pub options: Option<OverlayOptions>,
}

impl OverlayPlatform for ScriptedPlatform {
    type Surface = ScriptedSurface;

    fn primary_monitor(&self) -> Result<MonitorRect> {
        Ok(self.monitor)
    }

    fn create_overlay(
        &mut self,
        _rect: &MonitorRect,
        options: &OverlayOptions,
    ) -> Result<Self::Surface> {
        self.options = Some(options.clone());
        let surface = self.surface.take().ok_or("overlay already created")?;
        Ok(surface)
    }
}
