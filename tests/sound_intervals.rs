use voicetide::core::event::{Actor, Channel, EventKind, LogEvent, SoundRef};
use voicetide::core::sound::{aggregate, sound_events};
use voicetide::core::window::{InvalidWindow, TimeWindow};

fn play(timestamp: i64, user_id: u64, nick: Option<&str>, filename: &str) -> LogEvent {
    LogEvent {
        kind: EventKind::PlayedSound,
        timestamp,
        user: Some(Actor {
            id: user_id,
            name: format!("user{user_id}"),
            nick: nick.map(str::to_string),
            is_on_mobile: false,
        }),
        voice_state: None,
        channel: Some(Channel {
            id: 1,
            name: "general".to_string(),
        }),
        sound: Some(SoundRef {
            filename: filename.to_string(),
            displayname: filename.trim_end_matches(".mp3").to_string(),
        }),
        reason: None,
    }
}

fn joined(timestamp: i64, user_id: u64) -> LogEvent {
    LogEvent {
        kind: EventKind::Joined,
        timestamp,
        user: Some(Actor {
            id: user_id,
            name: format!("user{user_id}"),
            nick: None,
            is_on_mobile: false,
        }),
        voice_state: None,
        channel: None,
        sound: None,
        reason: None,
    }
}

#[test]
fn raw_mode_is_one_interval_per_play() {
    let events = vec![play(30, 1, None, "horn.mp3"), play(10, 2, None, "quack.mp3")];
    let intervals = sound_events(&events);

    assert_eq!(intervals.len(), 2);
    assert_eq!(intervals[0].timestamp, 10.0);
    assert_eq!(intervals[0].sound_count, 1);
    assert_eq!(intervals[0].sound_events[0].sound.filename, "quack.mp3");
    assert_eq!(intervals[1].timestamp, 30.0);
}

#[test]
fn non_play_events_and_payload_free_plays_are_filtered() {
    let mut stripped = play(20, 1, None, "horn.mp3");
    stripped.sound = None;
    let events = vec![joined(5, 1), stripped, play(40, 2, None, "quack.mp3")];

    let intervals = sound_events(&events);
    assert_eq!(intervals.len(), 1);
    assert_eq!(intervals[0].sound_events[0].sound.filename, "quack.mp3");
}

#[test]
fn plays_land_in_exactly_one_bucket() {
    let events = vec![
        play(210, 1, None, "horn.mp3"),
        play(220, 2, None, "quack.mp3"),
        play(290, 3, None, "drum.mp3"),
    ];
    let window = TimeWindow::new(0, 1000).unwrap();
    let intervals = aggregate(&events, window, 10).unwrap();

    assert_eq!(intervals.len(), 10);
    for (i, interval) in intervals.iter().enumerate() {
        let expected = if i == 2 { 3 } else { 0 };
        assert_eq!(interval.sound_count, expected, "bucket {i}");
    }
    assert_eq!(intervals[2].sound_events.len(), 3);
}

#[test]
fn empty_buckets_report_zero_not_null() {
    let window = TimeWindow::new(0, 100).unwrap();
    let intervals = aggregate(&[], window, 4).unwrap();
    assert_eq!(intervals.len(), 4);
    assert!(intervals.iter().all(|i| i.sound_count == 0));
    assert!(intervals.iter().all(|i| i.sound_events.is_empty()));
}

#[test]
fn bucket_detail_keeps_chronological_order_and_nicknames() {
    let events = vec![
        play(60, 2, None, "quack.mp3"),
        play(10, 1, Some("Annie"), "horn.mp3"),
    ];
    let window = TimeWindow::new(0, 100).unwrap();
    let intervals = aggregate(&events, window, 1).unwrap();

    let detail = &intervals[0].sound_events;
    assert_eq!(detail.len(), 2);
    assert_eq!(detail[0].user, "Annie");
    assert_eq!(detail[0].timestamp, 10);
    assert_eq!(detail[1].user, "user2");
}

#[test]
fn invalid_window_is_rejected_before_aggregation() {
    let window = TimeWindow::new(0, 100).unwrap();
    assert_eq!(
        aggregate(&[], window, 0).unwrap_err(),
        InvalidWindow::NoBuckets
    );
}
