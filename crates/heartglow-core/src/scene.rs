use glam::IVec2;
use heartglow_platform::DrawCommand;
use rand::Rng;
use tracing::debug;

use crate::clock::Elapsed;
use crate::config::OverlayConfig;
use crate::error::{Error, Result};
use crate::particle::{FrameParams, Particle, ParticleState, Style};
use crate::phases::PhaseTable;
use crate::shapes::generate_scatter;

/// The fixed particle set plus the frame it is drawn into.
#[derive(Debug, Clone)]
pub struct Scene {
    particles: Vec<Particle>,
    size: IVec2,
}

impl Scene {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        config: &OverlayConfig,
        width: i32,
        height: i32,
    ) -> Self {
        let n = config.particle_count;
        let base = generate_scatter(rng, n, width, height, config.scatter_margin);
        let target = config.heart_shape().generate(n, width, height);
        let phases = PhaseTable::generate(rng, n);
        debug!("generated {n} particles for a {width}x{height} frame");
        Self {
            particles: zip_particles(base, target, &phases),
            size: IVec2::new(width, height),
        }
    }

    /// Builds a scene from explicit attributes; all three must be the same length.
    pub fn from_parts(
        size: IVec2,
        base: Vec<IVec2>,
        target: Vec<IVec2>,
        phases: PhaseTable,
    ) -> Result<Self> {
        if base.len() != target.len() || base.len() != phases.len() {
            return Err(Error::ShapeMismatch {
                base: base.len(),
                target: target.len(),
                phases: phases.len(),
            });
        }
        Ok(Self {
            particles: zip_particles(base, target, &phases),
            size,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn states(&self, elapsed: Elapsed, config: &OverlayConfig) -> Vec<ParticleState> {
        let frame = FrameParams::at(&config.timeline(), elapsed);
        let style = Style::from(config);
        self.particles
            .iter()
            .map(|p| p.state(&frame, &style))
            .collect()
    }

    /// Background, one dot per particle in index order, then the border.
    pub fn draw_commands(&self, elapsed: Elapsed, config: &OverlayConfig) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.particles.len() + 2);
        commands.push(DrawCommand::Clear(config.background));
        commands.extend(
            self.states(elapsed, config)
                .into_iter()
                .map(|state| DrawCommand::FillCircle {
                    center: state.position,
                    radius: config.dot_radius,
                    color: state.color,
                }),
        );
        if config.border_thickness > 0 {
            commands.push(DrawCommand::StrokeRect {
                origin: IVec2::ZERO,
                size: self.size,
                thickness: config.border_thickness,
                color: config.border_color,
            });
        }
        commands
    }
}

fn zip_particles(base: Vec<IVec2>, target: Vec<IVec2>, phases: &PhaseTable) -> Vec<Particle> {
    base.into_iter()
        .zip(target)
        .zip(phases.iter())
        .map(|((base, target), phases)| Particle::new(base, target, *phases))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::PhaseOffsets;
    use crate::shapes::generate_heart_shape;
    use heartglow_platform::Rgb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still_config() -> OverlayConfig {
        OverlayConfig {
            particle_count: 4,
            drift_amplitude: 0.0,
            ..OverlayConfig::default()
        }
    }

    fn mocked_scene() -> Scene {
        let scatter = vec![
            IVec2::new(60, 60),
            IVec2::new(140, 60),
            IVec2::new(60, 140),
            IVec2::new(140, 140),
        ];
        let phases = PhaseTable::generate(&mut StdRng::seed_from_u64(5), 4);
        Scene::from_parts(
            IVec2::new(200, 200),
            scatter,
            generate_heart_shape(4, 200, 200),
            phases,
        )
        .unwrap()
    }

    fn positions(scene: &Scene, millis: u64, config: &OverlayConfig) -> Vec<IVec2> {
        scene
            .states(Elapsed::from_millis(millis), config)
            .into_iter()
            .map(|s| s.position)
            .collect()
    }

    #[test]
    fn four_dot_scenario_lands_on_the_heart() {
        let config = still_config();
        let scene = mocked_scene();
        for p in scene.particles() {
            assert!((50..=150).contains(&p.base.x) && (50..=150).contains(&p.base.y));
        }
        assert_eq!(
            positions(&scene, 0, &config),
            scene.particles().iter().map(|p| p.base).collect::<Vec<_>>()
        );
        assert_eq!(positions(&scene, 5000, &config), generate_heart_shape(4, 200, 200));
        assert_eq!(positions(&scene, 30_000, &config), generate_heart_shape(4, 200, 200));
    }

    #[test]
    fn idle_scene_is_uniformly_dim() {
        let config = still_config();
        let states = mocked_scene().states(Elapsed::from_millis(0), &config);
        assert!(states.iter().all(|s| s.color == Rgb::new(80, 30, 30)));
    }

    #[test]
    fn generated_scene_has_one_particle_per_count() {
        let config = OverlayConfig::default();
        let scene = Scene::generate(&mut StdRng::seed_from_u64(1), &config, 1920, 1080);
        assert_eq!(scene.particles().len(), 150);
        let heart = generate_heart_shape(150, 1920, 1080);
        for (p, target) in scene.particles().iter().zip(heart) {
            assert_eq!(p.target, target);
            assert!((50..=1870).contains(&p.base.x));
            assert!((50..=1030).contains(&p.base.y));
        }
    }

    #[test]
    fn mismatched_parts_are_rejected() {
        let err = Scene::from_parts(
            IVec2::new(10, 10),
            vec![IVec2::ZERO; 3],
            vec![IVec2::ZERO; 2],
            PhaseTable::from(vec![PhaseOffsets::default(); 3]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                base: 3,
                target: 2,
                phases: 3
            }
        ));
    }

    #[test]
    fn draw_commands_are_clear_dots_border() {
        let config = still_config();
        let commands = mocked_scene().draw_commands(Elapsed::from_millis(0), &config);
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[0], DrawCommand::Clear(Rgb::BLACK));
        assert_eq!(
            commands[1],
            DrawCommand::FillCircle {
                center: IVec2::new(60, 60),
                radius: 3,
                color: Rgb::new(80, 30, 30),
            }
        );
        assert_eq!(
            commands[5],
            DrawCommand::StrokeRect {
                origin: IVec2::ZERO,
                size: IVec2::new(200, 200),
                thickness: 3,
                color: Rgb::WHITE,
            }
        );
    }

    #[test]
    fn zero_thickness_skips_the_border() {
        let config = OverlayConfig {
            border_thickness: 0,
            ..still_config()
        };
        let commands = mocked_scene().draw_commands(Elapsed::from_millis(0), &config);
        assert_eq!(commands.len(), 5);
        assert!(commands
            .iter()
            .all(|c| !matches!(c, DrawCommand::StrokeRect { .. })));
    }
}
