//! Windows implementation of the Heartglow platform traits: a color-keyed,
//! click-through, topmost overlay drawn with GDI.
#![cfg(windows)]

mod platform;
mod surface;

pub use platform::WinOverlayPlatform;
pub use surface::WinOverlaySurface;
