//! Plinth
//!
//! Minimal production-ready HTTP service scaffold: application factory,
//! layered configuration, one route group, and the ambient plumbing
//! (tracing, metrics, graceful shutdown) a real deployment needs.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod server;

pub use config::{Config, Profile};
pub use error::{Error, Result};
