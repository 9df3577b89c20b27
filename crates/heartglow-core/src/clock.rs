//! Elapsed time and the scripted scatter -> heart -> pulse timeline.

use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    pub millis: u64,
}

impl Elapsed {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn secs(self) -> f64 {
        self.millis as f64 / 1000.0
    }
}

/// Session clock owned by the frame driver. Anchored once, never paused.
#[derive(Debug, Clone, Copy)]
pub struct AnimationClock {
    start_ms: u64,
}

impl AnimationClock {
    pub fn start(now_ms: u64) -> Self {
        Self { start_ms: now_ms }
    }

    pub fn elapsed(&self, now_ms: u64) -> Elapsed {
        Elapsed::from_millis(now_ms.saturating_sub(self.start_ms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regime {
    Idle,
    Transitioning { progress: f64 },
    Settled,
}

impl Regime {
    pub fn name(&self) -> &'static str {
        match self {
            Regime::Idle => "idle",
            Regime::Transitioning { .. } => "transitioning",
            Regime::Settled => "settled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    pub delay_ms: u64,
    pub transition_ms: u64,
    pub pulse_period_ms: u64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            transition_ms: 3000,
            pulse_period_ms: 2000,
        }
    }
}

impl Timeline {
    /// Idle is inclusive of the delay boundary.
    pub fn is_idle(&self, elapsed: Elapsed) -> bool {
        elapsed.millis <= self.delay_ms
    }

    pub fn progress(&self, elapsed: Elapsed) -> f64 {
        if self.is_idle(elapsed) {
            return 0.0;
        }
        let since = elapsed.secs() - self.delay_ms as f64 / 1000.0;
        (since / (self.transition_ms as f64 / 1000.0)).clamp(0.0, 1.0)
    }

    pub fn regime(&self, elapsed: Elapsed) -> Regime {
        if self.is_idle(elapsed) {
            return Regime::Idle;
        }
        let progress = self.progress(elapsed);
        if progress < 1.0 {
            Regime::Transitioning { progress }
        } else {
            Regime::Settled
        }
    }

    /// Shared heartbeat in `[0, 1]`, phase-referenced to the end of the delay.
    pub fn global_pulse(&self, elapsed: Elapsed) -> Option<f64> {
        if self.is_idle(elapsed) {
            return None;
        }
        Some(self.pulse_wave(elapsed))
    }

    /// The heartbeat waveform without the idle gate.
    pub fn pulse_wave(&self, elapsed: Elapsed) -> f64 {
        if self.pulse_period_ms == 0 {
            return 0.0;
        }
        let pulse_time = elapsed.millis.saturating_sub(self.delay_ms) % self.pulse_period_ms;
        let phase = TAU * pulse_time as f64 / self.pulse_period_ms as f64;
        (phase.sin() + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(millis: u64) -> Elapsed {
        Elapsed::from_millis(millis)
    }

    #[test]
    fn clock_measures_from_start_and_never_goes_negative() {
        let clock = AnimationClock::start(10_000);
        assert_eq!(clock.elapsed(10_000), at(0));
        assert_eq!(clock.elapsed(12_500).secs(), 2.5);
        assert_eq!(clock.elapsed(9_000), at(0));
    }

    #[rstest]
    #[case(0, Regime::Idle)]
    #[case(2000, Regime::Idle)]
    #[case(3500, Regime::Transitioning { progress: 0.5 })]
    #[case(5000, Regime::Settled)]
    #[case(60_000, Regime::Settled)]
    fn regimes(#[case] millis: u64, #[case] expected: Regime) {
        assert_eq!(Timeline::default().regime(at(millis)), expected);
    }

    #[test]
    fn progress_is_clamped_and_monotonic() {
        let timeline = Timeline::default();
        let mut last = 0.0;
        for millis in (0..20_000).step_by(7) {
            let p = timeline.progress(at(millis));
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= last, "progress fell at {millis}ms");
            last = p;
        }
        assert_eq!(timeline.progress(at(5000)), 1.0);
        assert_eq!(timeline.progress(at(9999)), 1.0);
    }

    #[test]
    fn pulse_is_absent_while_idle() {
        let timeline = Timeline::default();
        assert_eq!(timeline.global_pulse(at(0)), None);
        assert_eq!(timeline.global_pulse(at(2000)), None);
        assert!(timeline.global_pulse(at(2001)).is_some());
    }

    #[test]
    fn pulse_restarts_at_the_delay_boundary() {
        let timeline = Timeline::default();
        // Quarter period after the delay is the crest.
        assert!((timeline.global_pulse(at(2500)).unwrap() - 1.0).abs() < 1e-12);
        assert!((timeline.global_pulse(at(4000)).unwrap() - 0.5).abs() < 1e-12);
        assert!(timeline.global_pulse(at(3500)).unwrap() < 1e-12);
    }

    #[test]
    fn wave_matches_at_whole_periods_after_delay() {
        let timeline = Timeline::default();
        assert_eq!(timeline.pulse_wave(at(2000)), timeline.pulse_wave(at(4000)));
        assert_eq!(timeline.pulse_wave(at(4000)), 0.5);
    }

    #[test]
    fn pulse_has_two_second_period_and_unit_range() {
        let timeline = Timeline::default();
        for millis in 2001..8000 {
            let p = timeline.global_pulse(at(millis)).unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(Some(p), timeline.global_pulse(at(millis + 2000)));
        }
    }
}
