//! CryptoVault market dashboard.
//!
//! Decodes the analysis backend's JSON, normalizes it into display strings and
//! signal categories, and renders the dashboard screens.

pub mod config;
pub mod core;
pub mod dashboard;
pub mod formatting;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod render;
pub mod services;
pub mod signals;
