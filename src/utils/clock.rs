use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Source of the current time for every expiry comparison.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Wall clock pinned to one named time zone, independent of the host's local zone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(timezone: &str) -> AppResult<Self> {
        let tz = timezone
            .parse::<Tz>()
            .map_err(|e| AppError::ClockError(format!("unable to load location {timezone}: {e}")))?;
        Ok(Self { tz })
    }
}

impl Clock for ZonedClock {
    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Manually driven clock for expiry tests.
    pub struct FixedClock {
        now: Mutex<DateTime<Tz>>,
    }

    impl FixedClock {
        pub fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now.with_timezone(&chrono_tz::Europe::Moscow)),
            }
        }

        pub fn advance(&self, by: chrono::Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Tz> {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoned_clock_uses_configured_zone() {
        let clock = ZonedClock::new("Europe/Moscow").unwrap();
        assert_eq!(clock.now().timezone(), chrono_tz::Europe::Moscow);

        let drift = (Utc::now() - clock.now().with_timezone(&Utc)).num_seconds().abs();
        assert!(drift < 5);
    }

    #[test]
    fn test_unknown_zone_is_clock_error() {
        let err = ZonedClock::new("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, AppError::ClockError(_)));
    }
}
