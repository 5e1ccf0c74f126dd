//! # Settings Loader
//!
//! Centralized settings loading for the claimbook dashboard. Settings come from
//! three layers, later layers winning:
//!
//! 1. built-in defaults (`models::Settings::default()`)
//! 2. an optional `settings.json`
//! 3. environment variables (a `.env` file in the working directory is honoured)
//!
//! Command-line flags are applied by the binaries on top of the result.
//!
//! ## Environment variables
//!
//! - `CLAIMBOOK_API_URL`: snapshot endpoint
//! - `CLAIMBOOK_TIMEOUT_SECS`: request timeout in seconds
//! - `CLAIMBOOK_FALLBACK`: `sample` or `surface`
//! - `HOST` / `PORT`: bind address for the API server
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! // Load settings from a specific path
//! let settings = settings_loader::load_settings("config/my_settings.json")?;
//!
//! // Defaults + optional file + environment
//! let path = Some(PathBuf::from("settings.json"));
//! let settings = settings_loader::load_layered(path.as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use models::{FallbackPolicy, Settings};

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// Loads settings from a JSON file. Missing keys take their default values.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading settings file: {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing settings JSON in {}", path.display()))?;
    Ok(settings)
}

/// Loads settings from an optional path, returning None if no path is provided
pub fn load_optional_settings(path: Option<&PathBuf>) -> Result<Option<Settings>> {
    match path {
        Some(settings_path) => Ok(Some(load_settings(settings_path)?)),
        None => Ok(None),
    }
}

/// An explicitly given path must load. Without one, `settings.json` in the
/// current directory is used when present, otherwise the defaults.
pub fn load_settings_with_fallback(path: Option<&PathBuf>) -> Result<Settings> {
    if let Some(settings) = load_optional_settings(path)? {
        return Ok(settings);
    }

    if settings_file_exists(DEFAULT_SETTINGS_FILE) {
        return load_settings(DEFAULT_SETTINGS_FILE);
    }

    tracing::debug!("no settings file found, using defaults");
    Ok(Settings::default())
}

/// Checks if a settings file exists at the given path
pub fn settings_file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists() && path.as_ref().is_file()
}

/// Overlays environment values onto `settings`. `lookup` abstracts the
/// environment so the overlay can be tested without touching process state.
pub fn apply_env_overrides<F>(mut settings: Settings, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("CLAIMBOOK_API_URL") {
        settings.api_url = url;
    }
    if let Some(raw) = lookup("CLAIMBOOK_TIMEOUT_SECS") {
        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid CLAIMBOOK_TIMEOUT_SECS: {raw}"))?;
        settings.timeout_secs = Some(secs);
    }
    if let Some(raw) = lookup("CLAIMBOOK_FALLBACK") {
        settings.fallback = parse_fallback_policy(&raw)?;
    }
    if let Some(host) = lookup("HOST") {
        settings.server.host = host;
    }
    if let Some(raw) = lookup("PORT") {
        settings.server.port = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT: {raw}"))?;
    }
    Ok(settings)
}

pub fn parse_fallback_policy(raw: &str) -> Result<FallbackPolicy> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "sample" | "use_sample" => Ok(FallbackPolicy::UseSample),
        "surface" => Ok(FallbackPolicy::Surface),
        other => Err(anyhow!(
            "Unknown fallback policy '{other}' (expected 'sample' or 'surface')"
        )),
    }
}

/// Defaults, then the optional settings file, then the process environment.
pub fn load_layered(path: Option<&PathBuf>) -> Result<Settings> {
    if let Ok(env_file) = dotenvy::dotenv() {
        tracing::debug!("loaded environment from {}", env_file.display());
    }
    let settings = load_settings_with_fallback(path)?;
    apply_env_overrides(settings, |key| std::env::var(key).ok())
}
