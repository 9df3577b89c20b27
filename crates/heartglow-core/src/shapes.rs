//! Initial scatter and target heart formations.

use std::f64::consts::PI;

use glam::IVec2;
use rand::Rng;

/// Random points in `[margin, width - margin] x [margin, height - margin]`, bounds inclusive.
pub fn generate_scatter<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    width: i32,
    height: i32,
    margin: i32,
) -> Vec<IVec2> {
    let x_max = (width - margin).max(margin);
    let y_max = (height - margin).max(margin);
    (0..n)
        .map(|_| IVec2::new(rng.gen_range(margin..=x_max), rng.gen_range(margin..=y_max)))
        .collect()
}

/// Parametric heart curve, centred on the screen and lifted by `y_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartShape {
    pub scale: f64,
    pub y_offset: f64,
}

impl Default for HeartShape {
    fn default() -> Self {
        Self {
            scale: 20.0,
            y_offset: 50.0,
        }
    }
}

impl HeartShape {
    /// Samples the curve at `n` equal parameter steps over `[0, 2π)`.
    ///
    /// Spacing is uneven along the outline (dense near the cusp) and points
    /// may land off-screen for large scales.
    pub fn generate(&self, n: usize, width: i32, height: i32) -> Vec<IVec2> {
        let half = n as f64 / 2.0;
        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        (0..n)
            .map(|i| {
                let t = PI * (i as f64 / half);
                let x = 16.0 * t.sin().powi(3) * self.scale + cx;
                let y = -((13.0 * t.cos()
                    - 5.0 * (2.0 * t).cos()
                    - 2.0 * (3.0 * t).cos()
                    - (4.0 * t).cos())
                    * self.scale)
                    + cy
                    - self.y_offset;
                IVec2::new(x as i32, y as i32)
            })
            .collect()
    }
}

pub fn generate_heart_shape(n: usize, width: i32, height: i32) -> Vec<IVec2> {
    HeartShape::default().generate(n, width, height)
}
