//! Settings loading.
//!
//! Three layers, lowest priority first: compiled defaults, the user's
//! `~/.aula/settings.json`, then `AULA_*` environment variables. The file
//! layer is merged key-by-key so a user can pin a single value without
//! restating the rest.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::AulaSettings;

/// Where the user settings file lives: `$HOME/.aula/settings.json`.
pub fn settings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map_or_else(|| PathBuf::from("/tmp"), PathBuf::from)
        .join(".aula")
        .join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<AulaSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from `path` with env var overrides.
///
/// A missing file is not an error (defaults apply); an unreadable or
/// syntactically invalid file is.
pub fn load_settings_from_path(path: &Path) -> Result<AulaSettings> {
    let defaults = serde_json::to_value(AulaSettings::default())?;

    let merged = match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(?path, "merging user settings file");
            let user: Value = serde_json::from_str(&content)?;
            deep_merge(defaults, user)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(?path, "no settings file, defaults apply");
            defaults
        }
        Err(e) => return Err(e.into()),
    };

    let mut settings: AulaSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Merge `overlay` into `base`, key by key.
///
/// Matching object keys recurse; anything else (arrays included) is taken
/// wholesale from the overlay. A null in the overlay means "no opinion" and
/// leaves the base value alone.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                if value.is_null() {
                    continue;
                }
                let slot = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                let _ = base.insert(key, slot);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

/// Apply `AULA_*` environment variable overrides on top of loaded settings.
///
/// Integers must parse and fall within range; invalid values are logged and
/// silently ignored (fall back to file/default).
pub fn apply_env_overrides(settings: &mut AulaSettings) {
    if let Some(v) = read_env_string("AULA_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = read_env_u16("AULA_PORT", 1, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = read_env_string("AULA_TOKEN_SECRET") {
        settings.auth.token_secret = v;
    }
    if let Some(v) = read_env_string("AULA_COOKIE_NAME") {
        settings.auth.cookie_name = v;
    }
    if let Some(v) = read_env_string("AULA_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_u16(name: &str, min: u16, max: u16) -> Option<u16> {
    let val = std::env::var(name).ok()?;
    let result = parse_u16_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
    }
    result
}
