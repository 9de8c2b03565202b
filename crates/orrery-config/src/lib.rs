//! Configuration system for the orrery viewer.
//!
//! Provides runtime-configurable settings that persist to disk as RON files,
//! with CLI overrides via clap. Scene defaults mirror the compiled-in planet
//! catalog; the config only exposes the knobs that make sense to turn
//! (window size, star count, audio track and fade parameters, log level).

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AudioConfig, Config, DebugConfig, SkyConfig, WindowConfig};
pub use error::ConfigError;
