//! Render the activity charts as SVG files.
//!
//! Run:
//! - cargo run --bin render_charts -- logs.json

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use plotters::prelude::*;

use voicetide::config::AppConfig;
use voicetide::core::event::parse_log;
use voicetide::core::resample::{user_activity, BucketedSample};
use voicetide::core::sound::{self, SoundInterval};
use voicetide::core::window::TimeWindow;

const DAY_SECS: i64 = 24 * 60 * 60;

fn main() -> Result<(), Box<dyn Error>> {
    let log_path = env::args().nth(1).unwrap_or_else(|| "logs.json".to_string());
    let out_dir = Path::new("target/plots");
    fs::create_dir_all(out_dir)?;

    let config = AppConfig::load_or_default("voicetide.toml");
    let raw = fs::read_to_string(&log_path)?;
    let events = parse_log(&raw)?;

    let now = Local::now().timestamp();
    let window = TimeWindow::new(now - DAY_SECS, now)?;
    let buckets =
        window.plan_buckets(config.chart.window_buckets, config.chart.daily_threshold_days);

    let activity = user_activity(&events, None, window, buckets, now)?;
    let sounds = sound::aggregate(&events, window, buckets)?;

    plot_user_activity(out_dir, &activity)?;
    plot_sound_activity(out_dir, &sounds)?;

    println!("Saved charts to {}", out_dir.display());
    Ok(())
}

fn plot_user_activity(out_dir: &Path, samples: &[BucketedSample]) -> Result<(), Box<dyn Error>> {
    let path = out_dir.join("user_activity.svg");
    let root = SVGBackend::new(&path, (1000, 420)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_count = samples
        .iter()
        .filter_map(|sample| sample.active_count)
        .max()
        .unwrap_or(0)
        .max(1);
    let daily = daily_scale(samples.first().map(|s| s.timestamp), samples.get(1).map(|s| s.timestamp));

    let mut chart = ChartBuilder::on(&root)
        .caption("User activity", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(34)
        .y_label_area_size(30)
        .build_cartesian_2d(0..samples.len(), 0..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(samples.len().min(12))
        .x_label_formatter(&|index| {
            samples
                .get(*index)
                .map(|sample| time_label(sample.timestamp, daily))
                .unwrap_or_default()
        })
        .draw()?;

    // Outage buckets get the alert color, like the dashboard's bars.
    chart.draw_series(samples.iter().enumerate().filter_map(|(index, sample)| {
        let count = sample.active_count?;
        let color = if sample.down { RED.mix(0.8) } else { BLUE.mix(0.8) };
        Some(Rectangle::new([(index, 0), (index + 1, count)], color.filled()))
    }))?;

    root.present()?;
    Ok(())
}

fn plot_sound_activity(out_dir: &Path, intervals: &[SoundInterval]) -> Result<(), Box<dyn Error>> {
    let path = out_dir.join("sound_activity.svg");
    let root = SVGBackend::new(&path, (1000, 420)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_count = intervals
        .iter()
        .map(|interval| interval.sound_count)
        .max()
        .unwrap_or(0)
        .max(1);
    let daily = daily_scale(
        intervals.first().map(|i| i.timestamp),
        intervals.get(1).map(|i| i.timestamp),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption("Soundboard activity", ("sans-serif", 22))
        .margin(10)
        .x_label_area_size(34)
        .y_label_area_size(30)
        .build_cartesian_2d(0..intervals.len(), 0..max_count + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(intervals.len().min(12))
        .x_label_formatter(&|index| {
            intervals
                .get(*index)
                .map(|interval| time_label(interval.timestamp, daily))
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(intervals.iter().enumerate().map(|(index, interval)| {
        Rectangle::new(
            [(index, 0), (index + 1, interval.sound_count)],
            GREEN.mix(0.8).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn daily_scale(first: Option<f64>, second: Option<f64>) -> bool {
    match (first, second) {
        (Some(a), Some(b)) => b - a >= DAY_SECS as f64,
        _ => false,
    }
}

fn time_label(timestamp: f64, daily: bool) -> String {
    match Local.timestamp_opt(timestamp as i64, 0).single() {
        Some(at) => at
            .format(if daily { "%d %b" } else { "%H:%M" })
            .to_string(),
        None => String::new(),
    }
}
