use chrono::{DateTime, Duration, DurationRound, Utc};
use std::sync::Mutex;

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock truncated to microseconds that never repeats or goes
/// backwards: a reading at or before the previous one is bumped one
/// microsecond past it.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn advance(&self, reading: DateTime<Utc>) -> DateTime<Utc> {
        let reading = reading
            .duration_trunc(Duration::microseconds(1))
            .unwrap_or(reading);
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = match *last {
            Some(prev) if reading <= prev => prev + Duration::microseconds(1),
            _ => reading,
        };
        *last = Some(next);
        next
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> DateTime<Utc> {
        self.advance(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn repeated_readings_are_bumped() {
        let clock = MonotonicClock::new();
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let first = clock.advance(t);
        let second = clock.advance(t);
        let third = clock.advance(t - Duration::seconds(5));
        assert_eq!(first, t);
        assert_eq!(second, t + Duration::microseconds(1));
        assert_eq!(third, t + Duration::microseconds(2));
    }

    #[test]
    fn readings_are_truncated_to_micros() {
        let clock = MonotonicClock::new();
        let t = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(clock.advance(t).timestamp_subsec_nanos(), 123_456_000);
    }

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = MonotonicClock::new();
        let readings: Vec<_> = (0..100).map(|_| clock.now()).collect();
        assert!(readings.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
