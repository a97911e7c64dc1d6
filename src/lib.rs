//! Vidstream - range-request video streaming server
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod library;
pub mod server;
pub mod streaming;
