use chrono::NaiveDateTime;

use crate::config::Config;
use crate::core::time::{Clock, SystemClock};
use crate::domain::filter::Interval;
use crate::ledger::recurring::ProjectionOptions;

/// Per-call inputs shared by every projection pipeline: the instant used to
/// resolve relative expressions, the expansion limits and the chart interval
/// used when a saved filter names none.
///
/// `now` is read from the clock exactly once, so the start and end of a range
/// are always resolved against the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionContext {
    now: NaiveDateTime,
    options: ProjectionOptions,
    default_interval: Interval,
}

impl ProjectionContext {
    pub fn capture(clock: &dyn Clock) -> Self {
        Self::at(clock.now())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            now,
            options: ProjectionOptions::default(),
            default_interval: Interval::default(),
        }
    }

    pub fn system() -> Self {
        Self::capture(&SystemClock)
    }

    pub fn from_config(clock: &dyn Clock, config: &Config) -> Self {
        Self::capture(clock)
            .with_options(config.projection_options())
            .with_default_interval(config.default_interval)
    }

    pub fn with_options(mut self, options: ProjectionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_default_interval(mut self, interval: Interval) -> Self {
        self.default_interval = interval;
        self
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    pub fn default_interval(&self) -> Interval {
        self.default_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use chrono::NaiveDate;

    #[test]
    fn captures_clock_once_with_config_limits() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let config = Config {
            expansion_cap: 10,
            default_interval: Interval::Yearly,
            ..Config::default()
        };
        let ctx = ProjectionContext::from_config(&FixedClock(now), &config);
        assert_eq!(ctx.now(), now);
        assert_eq!(ctx.options().max_iterations, 10);
        assert_eq!(ctx.default_interval(), Interval::Yearly);
    }
}
