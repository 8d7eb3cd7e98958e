//! core/presence.rs — Replay the event log into presence snapshots.
//!
//! Joins, moves, plays and stream starts prove a member present; a leave
//! removes them; a `BOT_DOWN` tombstone wipes the whole set (the bot was not
//! watching, so nothing can be claimed about who stayed). One snapshot is
//! emitted per event, after applying it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::event::{ChannelId, EventKind, LogEvent, UserId};
use crate::core::window::UnixTime;

/// Point-in-time presence, taken immediately after applying one event.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub timestamp: UnixTime,
    pub active_count: u32,
    pub active_users: Vec<String>,
    #[serde(rename = "botDown")]
    pub down: bool,
}

/// Rebuild the presence time series from a (possibly unsorted) log.
///
/// Events are stably sorted by timestamp, so simultaneous events apply in
/// input order. The presence map lives only for this call.
///
/// With a channel scope only events in that channel feed the presence set,
/// but leaves and tombstones always apply: a member going offline or the bot
/// dying clears state no matter which channel was being watched.
pub fn reconstruct(events: &[LogEvent], scope: Option<ChannelId>) -> Vec<Snapshot> {
    let mut ordered: Vec<&LogEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.timestamp);

    let mut present: BTreeMap<UserId, String> = BTreeMap::new();
    let mut series = Vec::with_capacity(ordered.len());

    for event in ordered {
        match event.kind {
            EventKind::Left => {
                if let Some(user) = &event.user {
                    present.remove(&user.id);
                }
            }
            EventKind::BotDown => {
                present.clear();
                series.push(Snapshot {
                    timestamp: event.timestamp,
                    active_count: 0,
                    active_users: Vec::new(),
                    down: true,
                });
                continue;
            }
            kind if kind.marks_present() => {
                if in_scope(event, scope) {
                    if let Some(user) = &event.user {
                        present.insert(user.id, user.display_name().to_string());
                    }
                }
            }
            // Stream stops and mute/deafen changes leave the set untouched
            // but still timestamp the current state.
            _ => {}
        }
        series.push(Snapshot {
            timestamp: event.timestamp,
            active_count: present.len() as u32,
            active_users: present.values().cloned().collect(),
            down: false,
        });
    }
    series
}

fn in_scope(event: &LogEvent, scope: Option<ChannelId>) -> bool {
    match scope {
        None => true,
        Some(id) => event
            .channel
            .as_ref()
            .is_some_and(|channel| channel.id == id),
    }
}
