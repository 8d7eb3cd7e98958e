use clap::{Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to the activity log (overrides config)
    #[arg(long)]
    pub log: Option<String>,

    /// Window start, Unix seconds (defaults to today's local midnight)
    #[arg(long)]
    pub start: Option<i64>,

    /// Window end, Unix seconds (defaults to one day after the start)
    #[arg(long)]
    pub end: Option<i64>,

    /// Look back this many whole days from today's midnight
    #[arg(long, conflicts_with = "start")]
    pub days: Option<u32>,

    /// Bucket count (defaults to the configured chart plan)
    #[arg(long)]
    pub buckets: Option<usize>,

    /// Track presence in this voice channel only
    #[arg(long)]
    pub channel: Option<u64>,

    /// Emit a single series instead of both
    #[arg(long, value_enum)]
    pub only: Option<Series>,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Path to config TOML
    #[arg(long, default_value = "voicetide.toml")]
    pub config: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Series {
    Users,
    Sounds,
}
