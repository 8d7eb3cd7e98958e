//! core/resample.rs — Resample presence snapshots onto a fixed bucket grid.
//!
//! Each bucket reports its busiest snapshot. Empty buckets in the past
//! inherit the last known state; buckets that have not happened yet stay
//! empty, and `active_count: None` marks "no data" as distinct from a
//! genuine zero-occupancy reading.

use serde::Serialize;

use crate::core::event::{ChannelId, LogEvent};
use crate::core::presence::{reconstruct, Snapshot};
use crate::core::window::{BucketCursor, InvalidWindow, TimeWindow, UnixTime};

/// One chart bar: the resampled value for a bucket starting at `timestamp`.
#[derive(Clone, Debug, PartialEq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BucketedSample {
    /// Bucket start. Fractional when the window does not divide evenly.
    pub timestamp: f64,
    pub active_count: Option<u32>,
    pub active_users: Vec<String>,
    #[serde(rename = "botDown")]
    pub down: bool,
    pub carried_from_prior: bool,
}

#[derive(Clone)]
struct Carry {
    active_count: u32,
    active_users: Vec<String>,
    down: bool,
}

/// Resample timestamp-sorted `snapshots` onto `bucket_count` buckets of
/// `window`. `now` decides which empty buckets lie in the future; it is a
/// parameter, not a clock read, so calls stay deterministic.
pub fn resample(
    snapshots: &[Snapshot],
    window: TimeWindow,
    bucket_count: usize,
    now: UnixTime,
) -> Result<Vec<BucketedSample>, InvalidWindow> {
    let grid = window.grid(bucket_count)?;
    let mut cursor = BucketCursor::new(snapshots, |snap: &Snapshot| snap.timestamp as f64);
    let mut carry: Option<Carry> = None;
    let mut out = Vec::with_capacity(bucket_count);

    for span in grid.spans() {
        let matched = cursor.slice_for(span);

        if matched.is_empty() {
            if span.start >= now as f64 {
                // Nothing has happened yet; never invent future data.
                out.push(empty_sample(span.start));
            } else if let Some(prior) = &carry {
                out.push(BucketedSample {
                    timestamp: span.start,
                    active_count: Some(prior.active_count),
                    active_users: prior.active_users.clone(),
                    down: prior.down,
                    carried_from_prior: true,
                });
            } else {
                out.push(empty_sample(span.start));
            }
            continue;
        }

        // Representative pick: highest count wins, first match on ties.
        let mut best = &matched[0];
        for snap in &matched[1..] {
            if snap.active_count > best.active_count {
                best = snap;
            }
        }

        let down = matched.iter().any(|snap| snap.down);
        // An outage must register as visible activity, so a bucket whose
        // maximum is the tombstone's zero reports 1 instead.
        let active_count = if down && best.active_count == 0 {
            1
        } else {
            best.active_count
        };

        carry = Some(Carry {
            active_count,
            active_users: best.active_users.clone(),
            down,
        });
        out.push(BucketedSample {
            timestamp: span.start,
            active_count: Some(active_count),
            active_users: best.active_users.clone(),
            down,
            carried_from_prior: false,
        });
    }
    Ok(out)
}

fn empty_sample(timestamp: f64) -> BucketedSample {
    BucketedSample {
        timestamp,
        active_count: None,
        active_users: Vec::new(),
        down: false,
        carried_from_prior: false,
    }
}

/// Full user-activity pipeline: reconstruct presence from the raw log, then
/// resample it onto the window grid.
pub fn user_activity(
    events: &[LogEvent],
    scope: Option<ChannelId>,
    window: TimeWindow,
    bucket_count: usize,
    now: UnixTime,
) -> Result<Vec<BucketedSample>, InvalidWindow> {
    let snapshots = reconstruct(events, scope);
    resample(&snapshots, window, bucket_count, now)
}
