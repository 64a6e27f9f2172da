//! Common types for the gmsweep workspace.
//!
//! This crate provides the sweep roster model (patterns, graph datasets),
//! engine command construction, and configuration shared between the driver
//! and the CLI.

mod config;
mod engine;
mod graph;
mod pattern;
mod presets;

pub use crate::config::*;
pub use crate::engine::*;
pub use crate::graph::*;
pub use crate::pattern::*;
pub use crate::presets::*;
