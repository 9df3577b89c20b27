use heartglow_platform::OverlayPlatform;
use rand::Rng;
use tracing::info;

use crate::config::OverlayConfig;
use crate::driver::{FrameDriver, RunSummary};
use crate::error::Result;
use crate::scene::Scene;

/// Measures the screen once, builds the scene, opens the overlay and runs until stopped.
pub fn run_overlay<P, R>(platform: &mut P, config: OverlayConfig, rng: &mut R) -> Result<RunSummary>
where
    P: OverlayPlatform,
    R: Rng + ?Sized,
{
    config.validate()?;
    let monitor = platform.primary_monitor()?;
    info!(
        "primary display {}x{} @ ({}, {}) dpi {}",
        monitor.width, monitor.height, monitor.x, monitor.y, monitor.dpi
    );

    let scene = Scene::generate(rng, &config, monitor.width, monitor.height);
    let surface = platform.create_overlay(&monitor, &config.overlay_options())?;
    info!(
        "overlay ready: {} dots, {} fps target",
        scene.particles().len(),
        config.target_fps
    );

    let mut driver = FrameDriver::new(surface, scene, config);
    let summary = driver.run()?;
    drop(driver.into_surface());
    Ok(summary)
}
