use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone, Utc};
use std::sync::{Arc, Mutex};

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Real time left until the next local midnight.
    fn until_midnight(&self) -> std::time::Duration;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn until_midnight(&self) -> std::time::Duration {
        until_next_midnight(&Local::now())
    }
}

/// Manually driven clock without a timezone: every day is 24 hours long.
/// Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn until_midnight(&self) -> std::time::Duration {
        until_next_midnight(&Utc.from_utc_datetime(&self.now()))
    }
}

/// Time left until the next midnight in `now`'s timezone, measured in real
/// elapsed time. Always positive.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    let tz = now.timezone();
    let midnight = (now.date_naive() + Duration::days(1)).and_time(NaiveTime::MIN);
    // Zones that jump over 00:00 start the day at the first valid instant.
    let target = tz
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest());

    let delta = match target {
        Some(target) => target.naive_utc() - now.naive_utc(),
        None => midnight - now.naive_local(),
    };
    delta.to_std().unwrap_or(std::time::Duration::from_secs(1))
}
