//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use tracing::warn;

use crate::formatting::{ChangeSource, Placeholder};
use crate::render::{RenderOptions, RenderStyle};
use crate::signals::ConfidenceSources;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_PORT: u16 = 8080;

/// Deployment environment, `sandbox` unless `APP_ENV` or `ENVIRONMENT` says otherwise.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .map(|e| e.trim().to_lowercase())
        .ok()
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub render: RenderOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            port: DEFAULT_PORT,
            render: RenderOptions::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unknown or malformed values keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let backend_url = lookup("BACKEND_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.backend_url);
        let port = parse_var(&lookup, "PORT", defaults.port, u16::from_str);
        let render = RenderOptions {
            style: parse_var(&lookup, "RENDER_STYLE", RenderStyle::default(), RenderStyle::from_str),
            placeholder: parse_var(&lookup, "PLACEHOLDER", Placeholder::default(), Placeholder::from_str),
            change_source: parse_var(
                &lookup,
                "CHANGE_SOURCE",
                ChangeSource::default(),
                ChangeSource::from_str,
            ),
            confidence_sources: parse_var(
                &lookup,
                "CONFIDENCE_SOURCES",
                ConfidenceSources::default(),
                ConfidenceSources::parse_list,
            ),
        };
        Self {
            backend_url,
            port,
            render,
        }
    }
}

fn parse_var<F, T, E, P>(lookup: &F, key: &str, default: T, parse: P) -> T
where
    F: Fn(&str) -> Option<String>,
    E: std::fmt::Display,
    P: Fn(&str) -> Result<T, E>,
{
    match lookup(key) {
        Some(raw) => match parse(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, value = %raw, error = %e, "Ignoring invalid configuration value");
                default
            }
        },
        None => default,
    }
}
