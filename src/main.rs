// Entry point: loads the activity log and prints chart-ready JSON.

use std::error::Error;
use std::fs;

use chrono::Local;
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use voicetide::cli::{Args, Series};
use voicetide::config::AppConfig;
use voicetide::core::event::parse_log;
use voicetide::core::resample::{user_activity, BucketedSample};
use voicetide::core::sound::{self, SoundInterval};
use voicetide::core::window::{InvalidWindow, TimeWindow};

const DAY_SECS: i64 = 24 * 60 * 60;

/// The payload the charting layer binds to, one series per chart.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartReport {
    window: TimeWindow,
    buckets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_activity: Option<Vec<BucketedSample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sound_activity: Option<Vec<SoundInterval>>,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load_or_default(&args.config);

    let log_path = args.log.clone().unwrap_or_else(|| config.log.path.clone());
    let raw = fs::read_to_string(&log_path)?;
    let events = parse_log(&raw)?;
    info!("loaded {} events from {log_path}", events.len());

    let now = Local::now();
    let window = resolve_window(&args, local_midnight(&now))?;
    let buckets = args.buckets.unwrap_or_else(|| {
        window.plan_buckets(config.chart.window_buckets, config.chart.daily_threshold_days)
    });

    let report = ChartReport {
        window,
        buckets,
        user_activity: match args.only {
            Some(Series::Sounds) => None,
            _ => Some(user_activity(
                &events,
                args.channel,
                window,
                buckets,
                now.timestamp(),
            )?),
        },
        sound_activity: match args.only {
            Some(Series::Users) => None,
            _ => Some(sound::aggregate(&events, window, buckets)?),
        },
    };

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}

/// Day-aligned defaults, matching how the dashboard frames its date range:
/// chart today from local midnight, or `--days` whole days further back.
fn resolve_window(args: &Args, midnight: i64) -> Result<TimeWindow, InvalidWindow> {
    let start = match (args.start, args.days) {
        (Some(start), _) => start,
        (None, Some(days)) => midnight - i64::from(days) * DAY_SECS,
        (None, None) => midnight,
    };
    let end = match args.end {
        Some(end) => end,
        None if args.start.is_some() => start + DAY_SECS,
        None => midnight + DAY_SECS,
    };
    TimeWindow::new(start, end)
}

fn local_midnight(now: &chrono::DateTime<Local>) -> i64 {
    let offset = i64::from(now.offset().local_minus_utc());
    (now.timestamp() + offset).div_euclid(DAY_SECS) * DAY_SECS - offset
}
