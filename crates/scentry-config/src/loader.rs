// SPDX-FileCopyrightText: 2026 Scentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./scentry.toml` > `~/.config/scentry/scentry.toml`
//! > `/etc/scentry/scentry.toml`, with environment variable overrides via the
//! `SCENTRY_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ScentryConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/scentry/scentry.toml` (system-wide)
/// 3. `~/.config/scentry/scentry.toml` (user XDG config)
/// 4. `./scentry.toml` (local directory)
/// 5. `SCENTRY_*` environment variables
pub fn load_config() -> Result<ScentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ScentryConfig::default()))
        .merge(Toml::file("/etc/scentry/scentry.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("scentry/scentry.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("scentry.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string over the compiled defaults.
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ScentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ScentryConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ScentryConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ScentryConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so underscore-containing
/// key names stay intact: `SCENTRY_CLASSIFIER_MATCH_THRESHOLD` must map to
/// `classifier.match_threshold`, not `classifier.match.threshold`.
fn env_provider() -> Env {
    Env::prefixed("SCENTRY_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("routing_", "routing.", 1);
        mapped.into()
    })
}
