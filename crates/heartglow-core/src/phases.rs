use std::f64::consts::TAU;

use rand::Rng;

/// Per-particle offsets that keep otherwise identical sinusoids out of step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseOffsets {
    pub color: f64,
    pub drift_x: f64,
    pub drift_y: f64,
}

impl PhaseOffsets {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            color: rng.gen_range(0.0..TAU),
            drift_x: rng.gen_range(0.0..TAU),
            drift_y: rng.gen_range(0.0..TAU),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseTable {
    entries: Vec<PhaseOffsets>,
}

impl PhaseTable {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Self {
        Self {
            entries: (0..n).map(|_| PhaseOffsets::random(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseOffsets> {
        self.entries.iter()
    }
}

impl From<Vec<PhaseOffsets>> for PhaseTable {
    fn from(entries: Vec<PhaseOffsets>) -> Self {
        Self { entries }
    }
}
