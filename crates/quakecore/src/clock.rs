use chrono::DateTime;

/// What happened to the simulated clock during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Not yet running: no catalog bounds were available.
    Idle,
    /// First tick after data became available; the clock was placed at the
    /// earliest record.
    Started,
    Advanced,
    /// Ran past the last record and looped back to the first.
    Wrapped,
}

/// Fast-forwarded historical time, in epoch milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    current: Option<i64>,
    millis_per_second: f64,
}

impl SimulationClock {
    pub fn new(millis_per_second: f64) -> Self {
        Self {
            current: None,
            millis_per_second,
        }
    }

    pub fn now(&self) -> Option<i64> {
        self.current
    }

    pub fn is_started(&self) -> bool {
        self.current.is_some()
    }

    pub fn advance(&mut self, delta_time: f32, playback_speed: f32, min: i64, max: i64) -> ClockTick {
        let Some(current) = self.current else {
            self.current = Some(min);
            return ClockTick::Started;
        };

        let step = (delta_time.max(0.0) as f64 * playback_speed.max(0.0) as f64 * self.millis_per_second)
            .round() as i64;
        let next = current.saturating_add(step);
        if next <= max {
            self.current = Some(next);
            ClockTick::Advanced
        } else if current < max || max <= min {
            // Stop on the last record before looping so it is never skipped.
            // A single-instant catalog never loops.
            self.current = Some(max);
            ClockTick::Advanced
        } else {
            self.current = Some(min);
            ClockTick::Wrapped
        }
    }

    pub fn seek(&mut self, time: i64, min: i64, max: i64) -> i64 {
        let time = time.clamp(min, max.max(min));
        self.current = Some(time);
        time
    }
}

/// Calendar date of a simulated time, for display.
pub fn format_sim_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
