// Copyright (c) 2026 the snowfall authors

use std::time::{Duration, Instant};

const CURVE: [i32; 12] = [0, 1, 0, 1, 2, 1, 0, -1, -2, -1, 0, 1];

const STEP: Duration = Duration::from_millis(3000);

pub struct WindCurve {
    drift: i32,
    index: usize,
    last_update: Instant,
}

impl WindCurve {
    pub fn new(now: Instant) -> Self {
        Self {
            drift: 0,
            index: 0,
            last_update: now,
        }
    }

    pub fn maybe_advance(&mut self, now: Instant) -> i32 {
        if now.saturating_duration_since(self.last_update) > STEP {
            if self.index < CURVE.len() - 1 {
                self.index += 1;
                self.drift = CURVE[self.index];
            } else {
                self.index = 0;
                self.drift = 0;
            }
            self.last_update = now;
        }
        self.drift
    }

    pub fn delay(&mut self, by: Duration) {
        self.last_update += by;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_until_cadence_elapses() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(2999)), 0);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(3000)), 0);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(3100)), 1);
    }

    #[test]
    fn drift_walks_the_curve() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        let mut seen = Vec::new();
        for k in 1..=11u64 {
            seen.push(wind.maybe_advance(t0 + Duration::from_millis(k * 3100)));
        }
        assert_eq!(seen, vec![1, 0, 1, 2, 1, 0, -1, -2, -1, 0, 1]);
    }

    #[test]
    fn resets_after_full_pass_and_repeats() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        for k in 1..=11u64 {
            wind.maybe_advance(t0 + Duration::from_millis(k * 3100));
        }
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(12 * 3100)), 0);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(13 * 3100)), 1);
    }

    #[test]
    fn drift_stays_on_the_curve_across_cycles() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        for k in 1..=40u64 {
            let drift = wind.maybe_advance(t0 + Duration::from_millis(k * 3100));
            assert_eq!(drift, CURVE[(k % 12) as usize], "advance {k}");
        }
    }

    #[test]
    fn stale_calls_between_steps_do_not_advance() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(3100)), 1);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(4000)), 1);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(6000)), 1);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(6300)), 0);
    }

    #[test]
    fn delay_pushes_the_next_step_out() {
        let t0 = Instant::now();
        let mut wind = WindCurve::new(t0);

        wind.delay(Duration::from_millis(5000));
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(3100)), 0);
        assert_eq!(wind.maybe_advance(t0 + Duration::from_millis(8200)), 1);
    }
}
