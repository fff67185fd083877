//! CLI-owned configuration: optional TOML file, `CGX_` environment
//! overrides, then command-line flags.
//!
//! Auth tokens never come from here.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use cgx_api::{TlsMode, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Controller API base URL.
    #[serde(default = "default_controller")]
    pub controller: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,

    #[serde(default = "default_exclude_hub_sites")]
    pub exclude_hub_sites: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: default_controller(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            exclude_hub_sites: default_exclude_hub_sites(),
        }
    }
}

fn default_controller() -> String {
    cgx_api::DEFAULT_CONTROLLER.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_exclude_hub_sites() -> bool {
    true
}

// ── Config file path ─────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cgx-wanbfd", "cgx-wanbfd")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("cgx-wanbfd");
            p.push("config.toml");
            p
        })
}

// ── Loading ──────────────────────────────────────────────────────────

/// Load defaults, then the config file if present, then `CGX_*` variables.
pub fn load_config() -> Result<Config, CliError> {
    load_from(Figment::new().merge(Toml::file(config_path())))
}

fn load_from(file: Figment) -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(file)
        .merge(Env::prefixed("CGX_"));

    Ok(figment.extract()?)
}

// ── Resolution ───────────────────────────────────────────────────────

/// Settings for one run after flags are layered over the config.
#[derive(Debug)]
pub struct Resolved {
    pub controller: url::Url,
    pub transport: TransportConfig,
    pub exclude_hub_sites: bool,
}

/// Apply command-line overrides to the loaded config.
pub fn resolve(config: Config, global: &GlobalOpts) -> Result<Resolved, CliError> {
    let url_str = global.controller.as_deref().unwrap_or(&config.controller);
    let controller: url::Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let tls = if global.insecure || config.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ca) = config.ca_cert {
        TlsMode::CustomCa(ca)
    } else {
        TlsMode::System
    };

    let transport = TransportConfig {
        tls,
        timeout: Duration::from_secs(global.timeout.unwrap_or(config.timeout)),
        cookie_jar: None,
    };

    Ok(Resolved {
        controller,
        transport,
        exclude_hub_sites: config.exclude_hub_sites && !global.include_hub_sites,
    })
}
