//! Statistics module for TaskTally
//!
//! Replays the activation log to derive per-task session durations.

mod engine;

pub use engine::{calculate_task_stats, session_seconds, TaskStats};
