//! Wall-clock adapter for the `Clock` port.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Clock adapter reading the system time in UTC.
///
/// Lesson headings derive their RFC 3339 timestamps from this clock; the
/// fixed clock used in tests stands in for it everywhere else.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
