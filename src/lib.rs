//! Awesome - minimal web application backend
//!
//! This library crate exposes the application's configuration, models, and
//! HTTP server for the binary and for integration testing.

pub mod config;
pub mod models;
pub mod server;
