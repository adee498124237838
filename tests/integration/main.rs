//! Integration tests: leaderboard source → store → scoring → results.

mod mocks;
mod pipeline;
