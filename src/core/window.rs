//! core/window.rs — Fixed-width bucketing over a Unix-time window.
//!
//! A `TimeWindow` plus a bucket count yields a `BucketGrid` of half-open
//! spans `[start, start + width)`. The `BucketCursor` assigns a sorted item
//! slice to consecutive spans in one forward pass; both the presence and the
//! sound pipeline partition through it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds since the Unix epoch.
pub type UnixTime = i64;

const DAY_SECS: i64 = 24 * 60 * 60;

/// Rejected window or bucket-count parameters. No output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidWindow {
    #[error("window must end after it starts (start={start}, end={end})")]
    EmptyRange { start: UnixTime, end: UnixTime },
    #[error("bucket count must be at least 1")]
    NoBuckets,
}

/// Half-open time window `[start, end)` in Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: UnixTime,
    pub end: UnixTime,
}

impl TimeWindow {
    pub fn new(start: UnixTime, end: UnixTime) -> Result<Self, InvalidWindow> {
        if end <= start {
            return Err(InvalidWindow::EmptyRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration_secs(&self) -> i64 {
        self.end - self.start
    }

    /// Bucket count for a chart over this window: one bucket per day once
    /// the window spans more than `daily_threshold_days`, otherwise the
    /// fixed `window_buckets` count.
    pub fn plan_buckets(&self, window_buckets: usize, daily_threshold_days: u32) -> usize {
        let days = self.duration_secs() as f64 / DAY_SECS as f64;
        if days > daily_threshold_days as f64 {
            days.ceil() as usize
        } else {
            window_buckets
        }
    }

    pub fn grid(&self, bucket_count: usize) -> Result<BucketGrid, InvalidWindow> {
        if bucket_count == 0 {
            return Err(InvalidWindow::NoBuckets);
        }
        Ok(BucketGrid {
            start: self.start,
            width: self.duration_secs() as f64 / bucket_count as f64,
            count: bucket_count,
        })
    }
}

/// Evenly spaced buckets spanning a window.
#[derive(Clone, Copy, Debug)]
pub struct BucketGrid {
    start: UnixTime,
    width: f64,
    count: usize,
}

impl BucketGrid {
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bucket width in seconds. Fractional when the window length is not a
    /// multiple of the bucket count.
    pub fn width_secs(&self) -> f64 {
        self.width
    }

    pub fn span(&self, index: usize) -> BucketSpan {
        let start = self.start as f64 + index as f64 * self.width;
        BucketSpan {
            index,
            start,
            end: start + self.width,
        }
    }

    pub fn spans(&self) -> impl Iterator<Item = BucketSpan> + '_ {
        (0..self.count).map(|i| self.span(i))
    }
}

/// One bucket interval `[start, end)`.
#[derive(Clone, Copy, Debug)]
pub struct BucketSpan {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// Forward-only cursor assigning timestamp-sorted items to consecutive
/// spans. Items before the first span are skipped; each item is visited at
/// most once, so a full grid walk stays O(n).
pub struct BucketCursor<'a, T, F> {
    items: &'a [T],
    key: F,
    pos: usize,
}

impl<'a, T, F> BucketCursor<'a, T, F>
where
    F: Fn(&T) -> f64,
{
    pub fn new(items: &'a [T], key: F) -> Self {
        Self { items, key, pos: 0 }
    }

    /// Items whose key falls in `[span.start, span.end)`. Spans must be
    /// requested in ascending order.
    pub fn slice_for(&mut self, span: BucketSpan) -> &'a [T] {
        while self.pos < self.items.len() && (self.key)(&self.items[self.pos]) < span.start {
            self.pos += 1;
        }
        let lo = self.pos;
        while self.pos < self.items.len() && (self.key)(&self.items[self.pos]) < span.end {
            self.pos += 1;
        }
        &self.items[lo..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::{BucketCursor, InvalidWindow, TimeWindow};

    #[test]
    fn grid_spans_cover_window() {
        let window = TimeWindow::new(0, 1000).unwrap();
        let grid = window.grid(10).unwrap();
        assert_eq!(grid.count(), 10);
        assert_eq!(grid.width_secs(), 100.0);
        let span = grid.span(3);
        assert_eq!(span.start, 300.0);
        assert_eq!(span.end, 400.0);
        assert_eq!(grid.spans().count(), 10);
    }

    #[test]
    fn fractional_width_keeps_exact_bounds() {
        let window = TimeWindow::new(0, 10).unwrap();
        let grid = window.grid(4).unwrap();
        assert_eq!(grid.width_secs(), 2.5);
        assert_eq!(grid.span(3).start, 7.5);
        assert_eq!(grid.span(3).end, 10.0);
    }

    #[test]
    fn rejects_empty_range_and_zero_buckets() {
        assert_eq!(
            TimeWindow::new(5, 5),
            Err(InvalidWindow::EmptyRange { start: 5, end: 5 })
        );
        assert!(TimeWindow::new(10, 3).is_err());
        let window = TimeWindow::new(0, 100).unwrap();
        assert_eq!(window.grid(0).unwrap_err(), InvalidWindow::NoBuckets);
    }

    #[test]
    fn cursor_visits_each_item_once() {
        let items: Vec<f64> = vec![-5.0, 1.0, 1.0, 99.0, 100.0, 250.0, 999.0, 1500.0];
        let window = TimeWindow::new(0, 1000).unwrap();
        let grid = window.grid(10).unwrap();
        let mut cursor = BucketCursor::new(&items, |t| *t);

        let mut seen = 0;
        for span in grid.spans() {
            let matched = cursor.slice_for(span);
            for t in matched {
                assert!(*t >= span.start && *t < span.end);
            }
            seen += matched.len();
        }
        // -5.0 precedes the window, 1500.0 follows it.
        assert_eq!(seen, items.len() - 2);
    }

    #[test]
    fn plan_buckets_switches_to_daily_past_threshold() {
        let day = 24 * 60 * 60;
        let short = TimeWindow::new(0, day).unwrap();
        assert_eq!(short.plan_buckets(24, 5), 24);
        let week = TimeWindow::new(0, 7 * day).unwrap();
        assert_eq!(week.plan_buckets(24, 5), 7);
        let ragged = TimeWindow::new(0, 6 * day + day / 2).unwrap();
        assert_eq!(ragged.plan_buckets(24, 5), 7);
    }
}
