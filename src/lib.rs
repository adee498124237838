//! golfpool — golf tournament betting pool scorer
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod leaderboard;
pub mod engine;
pub mod storage;
