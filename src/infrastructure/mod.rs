//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! rating logic.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`limiter`] - Shared upstream rate limiter

pub mod bootstrap;
pub mod config;
pub mod limiter;
