//! Platform abstraction traits so `heartglow-core` stays OS-agnostic.

use glam::IVec2;
use serde::{Deserialize, Serialize};

mod pacing;
pub use pacing::{FrameClock, FramePacer};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub dpi: u32,
}

/// A single primitive handed to the render surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillCircle {
        center: IVec2,
        radius: u32,
        color: Rgb,
    },
    /// Outline of the rectangle `origin..origin + size`, drawn inwards.
    StrokeRect {
        origin: IVec2,
        size: IVec2,
        thickness: u32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    CloseRequested,
    KeyPressed(Key),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub title: String,
    /// Pixels of this color are fully see-through.
    pub color_key: Rgb,
    pub click_through: bool,
    pub always_on_top: bool,
    pub target_fps: u32,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            title: "Heartglow".into(),
            color_key: Rgb::BLACK,
            click_through: true,
            always_on_top: true,
            target_fps: 60,
        }
    }
}

/// Creates the transparent full-screen overlay for one OS.
pub trait OverlayPlatform {
    type Surface: RenderSurface + OverlayWindow;

    fn primary_monitor(&self) -> Result<MonitorRect>;
    fn create_overlay(
        &mut self,
        rect: &MonitorRect,
        options: &OverlayOptions,
    ) -> Result<Self::Surface>;
}

/// Window attributes that may be toggled after creation.
pub trait OverlayWindow {
    fn set_click_through(&mut self, enabled: bool) -> Result<()>;
    fn set_always_on_top(&mut self, enabled: bool) -> Result<()>;
}

/// Drawing, presentation, pacing and event polling for one overlay.
pub trait RenderSurface {
    fn draw(&mut self, command: &DrawCommand) -> Result<()>;
    fn present(&mut self) -> Result<()>;
    /// Monotonic milliseconds since the surface was created.
    fn ticks_ms(&self) -> u64;
    /// Blocks until the next frame boundary.
    fn wait_frame(&mut self);
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
}
