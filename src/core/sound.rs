//! core/sound.rs — Sound-play intervals for the soundboard chart.
//!
//! Unlike presence, an empty bucket here is a real zero ("no sounds were
//! played"), so there is no carry-forward and no null state.

use serde::Serialize;

use crate::core::event::{EventKind, LogEvent, SoundRef};
use crate::core::window::{BucketCursor, InvalidWindow, TimeWindow, UnixTime};

/// One `PLAYED_SOUND` occurrence, with the detail a chart tooltip shows.
#[derive(Clone, Debug, PartialEq, Serialize, schemars::JsonSchema)]
pub struct SoundEvent {
    pub timestamp: UnixTime,
    pub user: String,
    pub sound: SoundRef,
}

/// Count and detail of plays within one bucket.
#[derive(Clone, Debug, PartialEq, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SoundInterval {
    pub timestamp: f64,
    pub sound_count: usize,
    pub sound_events: Vec<SoundEvent>,
}

/// Raw mode: one interval per play, in chronological order.
pub fn sound_events(events: &[LogEvent]) -> Vec<SoundInterval> {
    plays(events)
        .into_iter()
        .map(|play| SoundInterval {
            timestamp: play.timestamp as f64,
            sound_count: 1,
            sound_events: vec![play],
        })
        .collect()
}

/// Bucketed mode: plays partitioned onto the window grid with the same
/// forward cursor the presence resampler uses.
pub fn aggregate(
    events: &[LogEvent],
    window: TimeWindow,
    bucket_count: usize,
) -> Result<Vec<SoundInterval>, InvalidWindow> {
    let grid = window.grid(bucket_count)?;
    let plays = plays(events);
    let mut cursor = BucketCursor::new(&plays, |play: &SoundEvent| play.timestamp as f64);
    let mut out = Vec::with_capacity(bucket_count);
    for span in grid.spans() {
        let matched = cursor.slice_for(span);
        out.push(SoundInterval {
            timestamp: span.start,
            sound_count: matched.len(),
            sound_events: matched.to_vec(),
        });
    }
    Ok(out)
}

fn plays(events: &[LogEvent]) -> Vec<SoundEvent> {
    let mut plays: Vec<SoundEvent> = events.iter().filter_map(play_detail).collect();
    plays.sort_by_key(|play| play.timestamp);
    plays
}

fn play_detail(event: &LogEvent) -> Option<SoundEvent> {
    if event.kind != EventKind::PlayedSound {
        return None;
    }
    let sound = event.sound.clone()?;
    Some(SoundEvent {
        timestamp: event.timestamp,
        user: event.display_name().unwrap_or("").to_string(),
        sound,
    })
}
