//! WorldCup Live — reporter
//!
//! Polls the match feed, reports each new fact once, remembers what was
//! reported across restarts.

pub mod config;
pub mod poller;

pub use config::Config;
pub use poller::{CycleReport, PollSettings, Poller};
