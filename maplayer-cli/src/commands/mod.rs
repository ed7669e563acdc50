//! CLI command implementations, one module per command group.

pub mod camera;
pub mod common;
pub mod config;
pub mod geometry;
pub mod style;
pub mod theme;
