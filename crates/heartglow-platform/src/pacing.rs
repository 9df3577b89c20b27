use std::time::{Duration, Instant};

use tracing::trace;

/// Monotonic millisecond counter anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn ticks_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Sleeps the thread up to the next frame deadline.
///
/// Missed deadlines are dropped rather than caught up: when a frame overruns,
/// the schedule re-anchors at the current instant.
#[derive(Debug, Clone)]
pub struct FramePacer {
    period: Option<Duration>,
    next_deadline: Option<Instant>,
}

impl FramePacer {
    /// `fps == 0` disables pacing.
    pub fn new(fps: u32) -> Self {
        let period = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        Self {
            period,
            next_deadline: None,
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn wait(&mut self) {
        let Some(period) = self.period else {
            return;
        };
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + period);
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next_deadline = Some(deadline + period);
        } else {
            let behind = now - deadline;
            trace!(
                "frame pacer behind by {:?}, dropping {} frame(s)",
                behind,
                (behind.as_secs_f64() / period.as_secs_f64()).floor() as u64
            );
            self.next_deadline = Some(now + period);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(60, 16_666)]
    #[case(30, 33_333)]
    #[case(1, 1_000_000)]
    fn period_matches_rate(#[case] fps: u32, #[case] micros: u128) {
        let pacer = FramePacer::new(fps);
        assert_eq!(pacer.period().map(|p| p.as_micros()), Some(micros));
    }

    #[test]
    fn zero_fps_is_unpaced() {
        let mut pacer = FramePacer::new(0);
        assert_eq!(pacer.period(), None);
        let started = Instant::now();
        for _ in 0..100 {
            pacer.wait();
        }
        assert!(started.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn overrun_does_not_build_backlog() {
        let mut pacer = FramePacer::new(200);
        pacer.wait();
        std::thread::sleep(Duration::from_millis(30));
        // Overrun of several periods: the next wait returns immediately and
        // the one after sleeps roughly one period, not zero.
        pacer.wait();
        let started = Instant::now();
        pacer.wait();
        assert!(started.elapsed() >= Duration::from_millis(3));
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.ticks_ms();
        std::thread::sleep(Duration::from_millis(2));
        let b = clock.ticks_ms();
        assert!(b >= a + 1);
    }
}
