// Ubermap Pointer Pump
// Tick schedule and acceleration curve for held pointer directions

use crate::mapping::MouseSpeed;

/// Interval between pointer-motion frames while a direction is held
pub const PUMP_INTERVAL_MS: u64 = 10;

/// Pointer step in pixels after `elapsed_ms` of continuous motion.
///
/// Base speed is `round(sensitivity)` (at least 1). From `speedup_ms` on the
/// step grows by one base step every 100 ms, capped at `max_step` but never
/// below the base step.
pub fn step_size(speed: &MouseSpeed, elapsed_ms: u64) -> i32 {
    let base = (speed.sensitivity.round() as i32).max(1);
    if elapsed_ms < speed.speedup_ms {
        return base;
    }
    let boost = 1.0 + (elapsed_ms - speed.speedup_ms) as f64 / 100.0;
    let accelerated = (speed.sensitivity * boost).round() as i32;
    accelerated.min(speed.max_step).max(base)
}

/// When the next motion frame is due.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerPump {
    next_tick_ms: Option<u64>,
}

impl PointerPump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    /// First tick comes one interval after motion starts.
    pub fn start(&mut self, start_ms: u64) {
        self.next_tick_ms = Some(start_ms + PUMP_INTERVAL_MS);
    }

    pub fn stop(&mut self) {
        self.next_tick_ms = None;
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_tick_ms.is_some_and(|t| now_ms >= t)
    }

    /// Milliseconds the loop may sleep before the next tick.
    pub fn timeout_ms(&self, now_ms: u64) -> Option<u64> {
        self.next_tick_ms.map(|t| t.saturating_sub(now_ms))
    }

    /// Schedule the tick after the one just taken. A late wake-up does not
    /// cause a burst of catch-up frames.
    pub fn advance(&mut self, now_ms: u64) {
        if let Some(next) = self.next_tick_ms {
            let following = next + PUMP_INTERVAL_MS;
            self.next_tick_ms = Some(if following <= now_ms {
                now_ms + PUMP_INTERVAL_MS
            } else {
                following
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed(sensitivity: f64) -> MouseSpeed {
        MouseSpeed {
            sensitivity,
            speedup_ms: 400,
            max_step: 30,
        }
    }

    #[test]
    fn test_base_step_before_speedup() {
        assert_eq!(step_size(&speed(1.0), 0), 1);
        assert_eq!(step_size(&speed(1.0), 399), 1);
        assert_eq!(step_size(&speed(2.6), 100), 3);
    }

    #[test]
    fn test_base_step_is_at_least_one() {
        assert_eq!(step_size(&speed(0.2), 0), 1);
        assert_eq!(step_size(&speed(0.2), 450), 1);
    }

    #[test]
    fn test_accelerated_step() {
        // round(1 * (1 + 0/100)) at the threshold
        assert_eq!(step_size(&speed(1.0), 400), 1);
        // round(1 * (1 + 200/100))
        assert_eq!(step_size(&speed(1.0), 600), 3);
        // round(2 * (1 + 150/100))
        assert_eq!(step_size(&speed(2.0), 550), 5);
    }

    #[test]
    fn test_accelerated_step_is_capped() {
        assert_eq!(step_size(&speed(1.0), 60_000), 30);
        assert_eq!(step_size(&speed(50.0), 60_000), 50);
    }

    #[test]
    fn test_step_is_monotonic_in_time() {
        let s = speed(1.5);
        let mut last = 0;
        for t in (0..5000).step_by(10) {
            let step = step_size(&s, t);
            assert!(step >= last, "step fell from {} to {} at {}ms", last, step, t);
            last = step;
        }
    }

    #[test]
    fn test_pump_schedule() {
        let mut pump = PointerPump::new();
        assert!(!pump.is_due(1000));
        assert_eq!(pump.timeout_ms(0), None);

        pump.start(100);
        assert!(!pump.is_due(105));
        assert_eq!(pump.timeout_ms(105), Some(5));
        assert!(pump.is_due(110));

        pump.advance(110);
        assert_eq!(pump.timeout_ms(110), Some(10));

        pump.stop();
        assert!(!pump.is_running());
    }

    #[test]
    fn test_pump_skips_missed_ticks() {
        let mut pump = PointerPump::new();
        pump.start(0);
        pump.advance(75);
        assert_eq!(pump.timeout_ms(75), Some(10));
    }
}
