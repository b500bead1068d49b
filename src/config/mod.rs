//! Configuration management for Plinth.
//!
//! Supports configuration from (later overrides earlier):
//! - Built-in defaults (lowest priority)
//! - Optional profile override (development, testing, production)
//! - Optional instance file with machine-local secrets
//! - Environment variables / command-line arguments (highest priority,
//!   applied in `main.rs` via clap)

mod instance;
mod settings;

pub use instance::InstanceOverrides;
pub use settings::{Config, Profile};
