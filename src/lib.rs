//! voicetide — presence and soundboard activity timelines for a Discord
//! companion dashboard.
//!
//! The engine is a pure transformation: a flat `logs.json` event array in,
//! fixed-width chart buckets out. `core::presence` replays the log into
//! point-in-time snapshots, `core::resample` maps them onto a bucket grid
//! with carry-forward, and `core::sound` counts sound plays per bucket.

pub mod cli;
pub mod config;
pub mod core;
