use anyhow::Context;
use chrono::{DateTime, Duration, Local};

/// Inclusive time range a history search is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl Window {
    /// Trailing window of `days` days ending at today's 23:59:59.
    ///
    /// Recomputed from scratch every run; overlapping runs cover overlapping
    /// periods.
    pub fn trailing_days(now: DateTime<Local>, days: i64) -> anyhow::Result<Window> {
        let end = now
            .date_naive()
            .and_hms_opt(23, 59, 59)
            .context("end of day")?
            .and_local_timezone(Local)
            .single()
            .context("ambiguous end of day")?;
        let start = end - Duration::days(days);
        Ok(Window { start, end })
    }

    /// `start_stamp_from` wire value, Unix seconds.
    pub fn start_stamp(&self) -> i64 {
        self.start.timestamp()
    }

    /// `start_stamp_to` wire value, Unix seconds.
    pub fn end_stamp(&self) -> i64 {
        self.end.timestamp()
    }
}
