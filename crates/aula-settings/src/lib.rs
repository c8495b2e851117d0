//! # aula-settings
//!
//! Configuration for the Aula presence service, loaded from three layers
//! (in priority order):
//! 1. **Compiled defaults** — [`AulaSettings::default()`]
//! 2. **User file** — `~/.aula/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `AULA_*` overrides (highest priority)
//!
//! There is no global singleton: the binary loads settings once at startup
//! and passes them down explicitly.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{AulaSettings, AuthSettings, LoggingSettings, ServerSettings};
