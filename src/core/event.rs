//! core/event.rs — Wire model of the bot's activity log.
//!
//! `logs.json` is a flat JSON array the bot appends to. Most entries carry
//! an event tag, a Unix timestamp, and the member/channel involved;
//! `BOT_DOWN` entries carry only a timestamp and a reason, so everything
//! past the tag and timestamp is optional here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::window::UnixTime;

pub type UserId = u64;
pub type ChannelId = u64;

/// Event tags the bot writes. Entries with any other tag are dropped by
/// [`parse_log`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum EventKind {
    #[serde(rename = "JOINED_CHANNEL")]
    Joined,
    #[serde(rename = "MOVED_CHANNEL")]
    Moved,
    #[serde(rename = "LEFT_CHANNEL")]
    Left,
    #[serde(rename = "PLAYED_SOUND")]
    PlayedSound,
    #[serde(rename = "STOPPED_SOUND")]
    StoppedSound,
    #[serde(rename = "STARTED_STREAMING")]
    StartedStreaming,
    #[serde(rename = "STOPPED_STREAMING")]
    StoppedStreaming,
    #[serde(rename = "VOICE_STATE_CHANGED")]
    VoiceStateChanged,
    #[serde(rename = "BOT_DOWN")]
    BotDown,
}

impl EventKind {
    /// Kinds that prove the member is in a voice channel right now.
    pub fn marks_present(self) -> bool {
        matches!(
            self,
            EventKind::Joined
                | EventKind::Moved
                | EventKind::PlayedSound
                | EventKind::StartedStreaming
        )
    }
}

/// The member an event concerns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Actor {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub is_on_mobile: bool,
}

impl Actor {
    /// Server nickname when set, account name otherwise.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or(&self.name)
    }
}

/// Voice channel the member was in when the event fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
}

/// Soundboard entry referenced by a play event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SoundRef {
    pub filename: String,
    pub displayname: String,
}

/// Self-mute/deafen flags at event time. Logged by the bot; the timeline
/// pipelines ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VoiceState {
    #[serde(default)]
    pub deafened: bool,
    #[serde(default)]
    pub muted: bool,
}

/// One observed occurrence from the log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LogEvent {
    #[serde(rename = "event")]
    pub kind: EventKind,
    pub timestamp: UnixTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Actor>,
    #[serde(
        rename = "voiceState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub voice_state: Option<VoiceState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl LogEvent {
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(Actor::display_name)
    }
}

/// Parse a raw `logs.json` document.
///
/// A malformed top-level document is a hard error; a malformed element
/// (missing timestamp, unrecognized tag, wrong shape) is skipped with a
/// warning so one bad entry cannot blank the whole chart.
pub fn parse_log(raw: &str) -> Result<Vec<LogEvent>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    Ok(parse_entries(entries))
}

/// Convert already-decoded JSON entries, skipping malformed ones.
pub fn parse_entries(entries: Vec<Value>) -> Vec<LogEvent> {
    let total = entries.len();
    let mut events = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<LogEvent>(entry) {
            Ok(event) => events.push(event),
            Err(err) => warn!("skipping malformed log entry {index}: {err}"),
        }
    }
    if events.len() < total {
        debug!("kept {} of {} log entries", events.len(), total);
    }
    events
}
