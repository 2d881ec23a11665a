//! Injectable time source.

use time::{OffsetDateTime, UtcOffset};

/// Wall-clock source used for task timestamps and weekday bucketing.
pub trait Clock {
    /// Current Unix time in milliseconds.
    fn now_ms(&self) -> i64;
    /// Offset that turns instants into the user's local calendar day.
    fn offset(&self) -> UtcOffset;
}

/// System clock with a configured local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
    }

    fn offset(&self) -> UtcOffset {
        self.offset
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now_ms: i64,
    pub offset: UtcOffset,
}

impl FixedClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms,
            offset: UtcOffset::UTC,
        }
    }

    pub fn advance(&mut self, delta_ms: i64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }

    fn offset(&self) -> UtcOffset {
        (**self).offset()
    }
}
